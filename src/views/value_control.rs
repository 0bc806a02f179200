//! This file is part of the xilem_value_control project.
//! (c) 2026 by Jacek Wisniowski
//!
//! This project was released as open source under the
//! Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
//! (compatible with the Xilem licence).

use xilem::core::{MessageContext, Mut, View, ViewMarker};
use xilem::core::MessageResult;
use xilem::masonry::vello::peniko::Color;
use xilem::{Pod, ViewCtx};

use crate::attributes::{Appearance, ControlAttributes};
use crate::control::ControlEvent;
use crate::widgets::value_control::VerticalValueControl as ValueControlWidget;

/// A vertical, integer-stepped value control view.
///
/// `on_event` is the single observer. It receives every [`ControlEvent`]:
/// drag start, intermediate values while dragging, and the committed value.
pub struct ValueControlView<F> {
    min: i32,
    max: i32,
    value: i32,
    on_event: F,
    look: Appearance,
}

/// Create a vertical value control over `min..=max`.
///
/// Setting `value` from app state never produces events; only pointer input
/// does.
pub fn value_control<State, Action>(
    min: i32,
    max: i32,
    value: i32,
    on_event: impl Fn(&mut State, ControlEvent) -> Action + Send + Sync + 'static,
) -> ValueControlView<impl Fn(&mut State, ControlEvent) -> Action + Send + Sync + 'static> {
    ValueControlView { min, max, value, on_event, look: Appearance::default() }
}

/// Create a value control whose range and appearance come from declarative
/// attributes.
pub fn value_control_from<State, Action>(
    attrs: &ControlAttributes,
    value: i32,
    on_event: impl Fn(&mut State, ControlEvent) -> Action + Send + Sync + 'static,
) -> ValueControlView<impl Fn(&mut State, ControlEvent) -> Action + Send + Sync + 'static> {
    let (min, max) = attrs.range();
    ValueControlView { min, max, value, on_event, look: attrs.appearance() }
}

impl<F> ValueControlView<F> {
    pub fn track_color(mut self, color: Color) -> Self { self.look.track_color = color; self }
    pub fn progress_color(mut self, color: Color) -> Self { self.look.progress_color = color; self }
    pub fn thumb_color(mut self, color: Color) -> Self { self.look.thumb_color = color; self }
    pub fn text_color(mut self, color: Color) -> Self { self.look.text_color = color; self }
    pub fn track_width(mut self, width: f64) -> Self { self.look.track_width = width; self }
    pub fn thumb_radius(mut self, radius: f64) -> Self { self.look.thumb_radius = radius; self }
    pub fn show_ticks(mut self) -> Self { self.look.show_ticks = true; self }
    pub fn show_numbers(mut self) -> Self { self.look.show_numbers = true; self }

    /// Overlay every attribute that is set, range included.
    pub fn attributes(mut self, attrs: &ControlAttributes) -> Self {
        if let Some(min) = attrs.min { self.min = min; }
        if let Some(max) = attrs.max { self.max = max; }
        self.look = attrs.apply_to(self.look);
        self
    }
}

impl<F> ViewMarker for ValueControlView<F> {}

impl<F, State, Action> View<State, Action, ViewCtx> for ValueControlView<F>
where
    State: 'static,
    Action: 'static,
    F: Fn(&mut State, ControlEvent) -> Action + Send + Sync + 'static,
{
    type Element = Pod<ValueControlWidget>;
    type ViewState = ();

    fn build(&self, ctx: &mut ViewCtx, _: &mut State) -> (Self::Element, Self::ViewState) {
        let w = ValueControlWidget::new(self.min, self.max, self.value).with_appearance(self.look);
        let pod = ctx.with_action_widget(|ctx| ctx.create_pod(w));
        (pod, ())
    }

    fn rebuild(
        &self, prev: &Self, _: &mut (), _: &mut ViewCtx,
        mut element: Mut<'_, Self::Element>, _: &mut State,
    ) {
        // Range first, so a new value is clamped against the new bounds.
        if prev.min != self.min || prev.max != self.max {
            ValueControlWidget::set_range(&mut element, self.min, self.max);
        }
        if prev.value != self.value {
            ValueControlWidget::set_value(&mut element, self.value);
        }
        if prev.look != self.look {
            ValueControlWidget::set_appearance(&mut element, self.look);
        }
    }

    fn teardown(&self, _: &mut (), ctx: &mut ViewCtx, element: Mut<'_, Self::Element>) {
        ctx.teardown_leaf(element);
    }

    fn message(
        &self, _: &mut (), message: &mut MessageContext,
        _: Mut<'_, Self::Element>, state: &mut State,
    ) -> MessageResult<Action> {
        if message.take_first().is_some() { return MessageResult::Stale; }
        match message.take_message::<ControlEvent>() {
            Some(event) => MessageResult::Action((self.on_event)(state, *event)),
            None => MessageResult::Stale,
        }
    }
}
