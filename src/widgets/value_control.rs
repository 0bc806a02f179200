//! This file is part of the xilem_value_control project.
//! (c) 2026 by Jacek Wisniowski
//!
//! This project was released as open source under the
//! Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
//! (compatible with the Xilem licence).

use xilem::masonry::accesskit::{Node, Role};
use xilem::masonry::core::{
    AccessCtx, BoxConstraints, BrushIndex, EventCtx, LayoutCtx, PaintCtx, PointerButtonEvent,
    PointerEvent, PointerUpdate, PropertiesMut, PropertiesRef, RegisterCtx, StyleProperty, Update,
    UpdateCtx, Widget, WidgetId, WidgetMut, render_text,
};
use xilem::masonry::parley::Layout;
use xilem::masonry::vello::Scene;
use xilem::masonry::vello::kurbo::{Affine, Cap, Circle, Line, Point, Size, Stroke, Vec2};
use xilem::masonry::vello::peniko::Fill;

use smallvec::SmallVec;
use tracing::trace_span;

use crate::attributes::Appearance;
use crate::control::{ControlEvent, ControlEvents, TrackGeometry, ValueControl};

const CONTROL_WIDTH: f64 = 40.0;
const CONTROL_HEIGHT: f64 = 200.0;
const LABEL_GAP: f64 = 6.0;
const FONT_SIZE: f32 = 10.0;
const TICK_STROKE: f64 = 1.0;
/// Closer marks than this merge into a solid bar, so they are skipped.
const MIN_MARK_SPACING: f64 = 2.0;
/// No control is tall enough to show more labels than this.
const MAX_NUMBER_LABELS: i64 = 512;

/// A vertical, integer-stepped value control.
///
/// Press anywhere on the track to jump there, drag to move in whole steps.
/// Emits [`ControlEvent`]s as actions: drag start, value changing, and the
/// committed value on release.
pub struct VerticalValueControl {
    control: ValueControl,
    look: Appearance,
    /// One text layout per step, bottom to top. Built only with numbers on.
    number_layouts: Vec<Layout<BrushIndex>>,
    needs_layout: bool,
    /// Commit of a drag that ended outside an event pass, sent with the
    /// next pointer event.
    pending: ControlEvents,
    size: Size,
}

impl VerticalValueControl {
    pub fn new(min: i32, max: i32, value: i32) -> Self {
        Self {
            control: ValueControl::new(min, max, value),
            look: Appearance::default(),
            number_layouts: Vec::new(),
            needs_layout: true,
            pending: ControlEvents::new(),
            size: Size::ZERO,
        }
    }

    pub fn with_appearance(mut self, look: Appearance) -> Self {
        self.look = look;
        self.needs_layout = true;
        self
    }

    pub fn value(&self) -> i32 {
        self.control.value()
    }

    pub fn set_value(this: &mut WidgetMut<'_, Self>, value: i32) {
        if this.widget.control.set_value(value) {
            this.ctx.request_render();
        }
    }

    pub fn set_range(this: &mut WidgetMut<'_, Self>, min: i32, max: i32) {
        this.widget.control.set_range(min, max);
        if this.widget.look.show_numbers {
            this.widget.needs_layout = true;
            this.ctx.request_layout();
        }
        this.ctx.request_render();
    }

    pub fn set_appearance(this: &mut WidgetMut<'_, Self>, look: Appearance) {
        if this.widget.look == look {
            return;
        }
        this.widget.look = look;
        this.widget.needs_layout = true;
        this.ctx.request_layout();
    }

    fn geometry(&self, size: Size) -> TrackGeometry {
        TrackGeometry::new(size.height, self.look.thumb_radius)
    }

    fn submit(ctx: &mut EventCtx<'_>, events: ControlEvents) {
        if events.is_empty() {
            return;
        }
        for event in events {
            ctx.submit_action::<ControlEvent>(event);
        }
        ctx.request_render();
    }

    fn rebuild_number_layouts(&mut self, ctx: &mut LayoutCtx<'_>) {
        self.number_layouts.clear();
        if !self.look.show_numbers || self.control.range().span() >= MAX_NUMBER_LABELS {
            return;
        }
        let (font_ctx, layout_ctx) = ctx.text_contexts();
        for step in self.control.range().steps() {
            let text = step.to_string();
            let mut builder = layout_ctx.ranged_builder(font_ctx, &text, 1.0, true);
            builder.push_default(StyleProperty::FontSize(FONT_SIZE));
            let mut layout = builder.build(&text);
            layout.break_all_lines(None);
            self.number_layouts.push(layout);
        }
    }

    /// Labels need a full line of room each, ticks only a couple of pixels.
    fn marks_fit(&self, geometry: &TrackGeometry, min_spacing: f64) -> bool {
        geometry.step_spacing(&self.control.range()) >= min_spacing
    }
}

impl Widget for VerticalValueControl {
    type Action = ControlEvent;

    fn on_pointer_event(
        &mut self,
        ctx: &mut EventCtx<'_>,
        _props: &mut PropertiesMut<'_>,
        event: &PointerEvent,
    ) {
        if !self.pending.is_empty() {
            Self::submit(ctx, std::mem::take(&mut self.pending));
        }
        if ctx.is_disabled() {
            return;
        }
        let geometry = self.geometry(ctx.size());
        match event {
            PointerEvent::Down(PointerButtonEvent { state, .. }) => {
                if self.control.is_dragging() {
                    if ctx.is_active() {
                        return;
                    }
                    // The pointer that started this drag was lost without a cancel.
                    Self::submit(ctx, self.control.cancel(&geometry));
                }
                ctx.request_focus();
                ctx.capture_pointer();
                let pos = ctx.local_position(state.position);
                Self::submit(ctx, self.control.press(pos.y, &geometry));
            }
            PointerEvent::Move(PointerUpdate { current, .. }) => {
                if ctx.is_active() {
                    let pos = ctx.local_position(current.position);
                    Self::submit(ctx, self.control.drag_to(pos.y, &geometry));
                }
            }
            PointerEvent::Up(PointerButtonEvent { state, .. }) => {
                if ctx.is_active() {
                    let pos = ctx.local_position(state.position);
                    Self::submit(ctx, self.control.release(pos.y, &geometry));
                    ctx.release_pointer();
                }
            }
            PointerEvent::Cancel(..) => {
                Self::submit(ctx, self.control.cancel(&geometry));
            }
            _ => {}
        }
    }

    fn accepts_pointer_interaction(&self) -> bool {
        true
    }

    fn accepts_focus(&self) -> bool {
        true
    }

    fn register_children(&mut self, _ctx: &mut RegisterCtx<'_>) {}

    fn update(&mut self, ctx: &mut UpdateCtx<'_>, _props: &mut PropertiesMut<'_>, event: &Update) {
        if let Update::DisabledChanged(true) = event {
            if self.control.is_dragging() {
                let geometry = self.geometry(self.size);
                self.pending.extend(self.control.cancel(&geometry));
                ctx.request_render();
            }
        }
    }

    fn layout(
        &mut self,
        ctx: &mut LayoutCtx<'_>,
        _props: &mut PropertiesMut<'_>,
        bc: &BoxConstraints,
    ) -> Size {
        if self.needs_layout || ctx.fonts_changed() {
            self.rebuild_number_layouts(ctx);
            self.needs_layout = false;
        }

        let thumb_w = self.look.thumb_radius * 2.0 + 4.0;
        let mut width = CONTROL_WIDTH.max(thumb_w);
        if let Some(widest) = self
            .number_layouts
            .iter()
            .map(|l| l.width() as f64)
            .reduce(f64::max)
        {
            // Track stays centered, so labels on the right need mirrored room.
            width = width.max(2.0 * (self.look.thumb_radius + LABEL_GAP + widest));
        }
        let height = CONTROL_HEIGHT.max(thumb_w);
        self.size = bc.constrain(Size::new(width, height));
        self.size
    }

    fn paint(&mut self, ctx: &mut PaintCtx<'_>, _props: &PropertiesRef<'_>, scene: &mut Scene) {
        let size = ctx.size();
        let cx = size.width / 2.0;
        let geometry = self.geometry(size);
        let range = self.control.range();
        let look = &self.look;

        // Track
        let track_stroke = Stroke::new(look.track_width).with_caps(Cap::Round);
        scene.stroke(
            &track_stroke,
            Affine::IDENTITY,
            look.track_color,
            None,
            &Line::new(Point::new(cx, geometry.top()), Point::new(cx, geometry.bottom())),
        );

        // Progress grows upward from the bottom anchor
        let thumb_y = geometry.y_for_value(self.control.value(), &range);
        if thumb_y < geometry.bottom() {
            scene.stroke(
                &track_stroke,
                Affine::IDENTITY,
                look.progress_color,
                None,
                &Line::new(Point::new(cx, geometry.bottom()), Point::new(cx, thumb_y)),
            );
        }

        if look.show_ticks && self.marks_fit(&geometry, MIN_MARK_SPACING) {
            let half = look.track_width / 2.0 + look.thumb_radius / 2.0;
            let tick_stroke = Stroke::new(TICK_STROKE);
            for step in range.steps() {
                let y = geometry.y_for_value(step, &range);
                scene.stroke(
                    &tick_stroke,
                    Affine::IDENTITY,
                    look.text_color,
                    None,
                    &Line::new(Point::new(cx - half, y), Point::new(cx + half, y)),
                );
            }
        }

        let line_height = self
            .number_layouts
            .first()
            .map_or(0.0, |l| l.height() as f64);
        if look.show_numbers && self.marks_fit(&geometry, line_height.max(MIN_MARK_SPACING)) {
            let text_x = cx + look.thumb_radius + LABEL_GAP;
            for (step, layout) in range.steps().zip(&self.number_layouts) {
                let y = geometry.y_for_value(step, &range);
                let text_y = y - layout.height() as f64 / 2.0;
                render_text(
                    scene,
                    Affine::translate(Vec2::new(text_x, text_y)),
                    layout,
                    &[look.text_color.into()],
                    true,
                );
            }
        }

        // Thumb
        let thumb = Circle::new(Point::new(cx, thumb_y), look.thumb_radius);
        scene.fill(Fill::NonZero, Affine::IDENTITY, look.thumb_color, None, &thumb);
        if ctx.is_active() {
            scene.stroke(
                &Stroke::new(1.5),
                Affine::IDENTITY,
                look.progress_color,
                None,
                &thumb,
            );
        }
    }

    fn accessibility_role(&self) -> Role {
        Role::Slider
    }

    fn accessibility(
        &mut self,
        _ctx: &mut AccessCtx<'_>,
        _props: &PropertiesRef<'_>,
        node: &mut Node,
    ) {
        node.set_numeric_value(self.control.value() as f64);
        node.set_min_numeric_value(self.control.min() as f64);
        node.set_max_numeric_value(self.control.max() as f64);
        node.set_numeric_value_step(1.0);
    }

    fn children_ids(&self) -> SmallVec<[WidgetId; 16]> {
        SmallVec::new()
    }

    fn make_trace_span(&self, id: WidgetId) -> tracing::Span {
        trace_span!("VerticalValueControl", id = id.trace())
    }
}
