//! This file is part of the xilem_value_control project.
//! (c) 2026 by Jacek Wisniowski
//!
//! This project was released as open source under the
//! Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
//! (compatible with the Xilem licence).

//! Headless model of the vertical value control.
//!
//! Holds the range, the value, and the drag session, and maps vertical
//! pointer positions to integer steps. The Masonry widget drives it with
//! pointer coordinates; it can equally be driven directly, e.g. from tests.

use std::ops::RangeInclusive;

use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::saved_state::SavedState;

/// Inclusive integer bounds. `min <= max` always holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValueRange {
    min: i32,
    max: i32,
}

impl ValueRange {
    /// Inverted bounds are swapped rather than rejected.
    pub fn new(min: i32, max: i32) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn min(&self) -> i32 { self.min }
    pub fn max(&self) -> i32 { self.max }

    /// Number of integer steps between the bounds (`max - min`).
    pub fn span(&self) -> i64 {
        self.max as i64 - self.min as i64
    }

    /// A fixed range admits exactly one value.
    pub fn is_fixed(&self) -> bool {
        self.min == self.max
    }

    pub fn clamp(&self, value: i32) -> i32 {
        value.clamp(self.min, self.max)
    }

    pub fn contains(&self, value: i32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Every integer step in the range, bottom to top.
    pub fn steps(&self) -> RangeInclusive<i32> {
        self.min..=self.max
    }

    /// Position of `value` in the range as 0..1. A fixed range is always 0.
    pub fn ratio_of(&self, value: i32) -> f64 {
        let span = self.span();
        if span == 0 {
            return 0.0;
        }
        ((self.clamp(value) as i64 - self.min as i64) as f64 / span as f64).clamp(0.0, 1.0)
    }

    /// The step nearest to `ratio` (0..1), rounding half away from zero.
    pub fn value_at_ratio(&self, ratio: f64) -> i32 {
        let ratio = if ratio.is_nan() { 0.0 } else { ratio.clamp(0.0, 1.0) };
        let offset = (ratio * self.span() as f64).round() as i64;
        (self.min as i64 + offset).clamp(self.min as i64, self.max as i64) as i32
    }
}

impl Default for ValueRange {
    fn default() -> Self {
        Self { min: 0, max: 10 }
    }
}

/// Vertical placement of the drag track inside the widget.
///
/// The track runs from `y = height - thumb_radius` (minimum) up to
/// `y = thumb_radius` (maximum), so the thumb never leaves the widget.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackGeometry {
    pub height: f64,
    pub thumb_radius: f64,
}

impl TrackGeometry {
    pub fn new(height: f64, thumb_radius: f64) -> Self {
        Self { height, thumb_radius }
    }

    /// y-coordinate of the minimum end.
    pub fn bottom(&self) -> f64 {
        self.height - self.thumb_radius
    }

    /// y-coordinate of the maximum end.
    pub fn top(&self) -> f64 {
        self.thumb_radius
    }

    /// Usable track length. Zero or negative when the thumb does not fit.
    pub fn length(&self) -> f64 {
        self.height - 2.0 * self.thumb_radius
    }

    /// Ratio (0..1) for a pointer at `y`. Degenerate tracks map to 0.
    pub fn ratio_at(&self, y: f64) -> f64 {
        let length = self.length();
        if length <= 0.0 {
            return 0.0;
        }
        ((self.bottom() - y) / length).clamp(0.0, 1.0)
    }

    pub fn value_at(&self, y: f64, range: &ValueRange) -> i32 {
        range.value_at_ratio(self.ratio_at(y))
    }

    /// Inverse of [`value_at`](Self::value_at): where `value` is drawn.
    pub fn y_for_value(&self, value: i32, range: &ValueRange) -> f64 {
        let length = self.length();
        if length <= 0.0 {
            return self.height / 2.0;
        }
        self.bottom() - range.ratio_of(value) * length
    }

    /// Distance between two adjacent steps on screen.
    pub fn step_spacing(&self, range: &ValueRange) -> f64 {
        let span = range.span();
        if span == 0 {
            return f64::INFINITY;
        }
        self.length().max(0.0) / span as f64
    }
}

/// Notification emitted by the control while it is being dragged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlEvent {
    DragStarted,
    /// The value moved during a drag. `from_user` is false for the jump
    /// to the initial press position.
    ValueChanging { value: i32, from_user: bool },
    /// The drag ended (release or cancel) at `value`.
    ValueCommitted { value: i32 },
}

/// Observer of drag lifecycle and value changes.
///
/// Any `FnMut(&ValueControl, ControlEvent)` closure is a listener.
pub trait ValueChangeListener {
    fn on_drag_started(&mut self, _control: &ValueControl) {}
    fn on_value_changing(&mut self, _control: &ValueControl, _value: i32, _from_user: bool) {}
    fn on_value_committed(&mut self, _control: &ValueControl, _value: i32) {}
}

impl<F> ValueChangeListener for F
where
    F: FnMut(&ValueControl, ControlEvent),
{
    fn on_drag_started(&mut self, control: &ValueControl) {
        self(control, ControlEvent::DragStarted);
    }

    fn on_value_changing(&mut self, control: &ValueControl, value: i32, from_user: bool) {
        self(control, ControlEvent::ValueChanging { value, from_user });
    }

    fn on_value_committed(&mut self, control: &ValueControl, value: i32) {
        self(control, ControlEvent::ValueCommitted { value });
    }
}

/// Events produced by a single pointer transition.
pub type ControlEvents = SmallVec<[ControlEvent; 2]>;

#[derive(Clone, Copy, Debug, PartialEq)]
enum DragState {
    Idle,
    Dragging { last_y: f64 },
}

/// A bounded integer with a vertical drag interaction.
pub struct ValueControl {
    range: ValueRange,
    value: i32,
    drag: DragState,
    listener: Option<Box<dyn ValueChangeListener + Send>>,
}

impl ValueControl {
    pub fn new(min: i32, max: i32, value: i32) -> Self {
        let range = ValueRange::new(min, max);
        Self {
            range,
            value: range.clamp(value),
            drag: DragState::Idle,
            listener: None,
        }
    }

    pub fn value(&self) -> i32 { self.value }
    pub fn range(&self) -> ValueRange { self.range }
    pub fn min(&self) -> i32 { self.range.min }
    pub fn max(&self) -> i32 { self.range.max }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    /// Set the value without notifying the listener.
    ///
    /// Returns `true` if the stored value changed.
    pub fn set_value(&mut self, value: i32) -> bool {
        let v = self.range.clamp(value);
        if v == self.value {
            return false;
        }
        trace!(from = self.value, to = v, "value set");
        self.value = v;
        true
    }

    /// Replace the bounds and re-clamp the value. Returns `true` if the
    /// value had to move.
    pub fn set_range(&mut self, min: i32, max: i32) -> bool {
        let range = ValueRange::new(min, max);
        if min > max {
            debug!(min, max, "inverted range swapped");
        }
        self.range = range;
        let v = range.clamp(self.value);
        let moved = v != self.value;
        self.value = v;
        debug!(min = range.min, max = range.max, value = v, "range set");
        moved
    }

    /// Register the single observer, replacing any previous one.
    pub fn set_listener(&mut self, listener: impl ValueChangeListener + Send + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn clear_listener(&mut self) {
        self.listener = None;
    }

    /// Pointer down. Ignored while a drag is already in progress.
    pub fn press(&mut self, y: f64, geometry: &TrackGeometry) -> ControlEvents {
        let mut events = ControlEvents::new();
        if self.is_dragging() {
            trace!("second pointer ignored");
            return events;
        }
        self.drag = DragState::Dragging { last_y: y };
        debug!(y, "drag started");
        self.emit(&mut events, ControlEvent::DragStarted);
        if let Some(value) = self.update_from(y, geometry) {
            self.emit(&mut events, ControlEvent::ValueChanging { value, from_user: false });
        }
        events
    }

    /// Pointer move. Only reports when the integer step changes.
    pub fn drag_to(&mut self, y: f64, geometry: &TrackGeometry) -> ControlEvents {
        let mut events = ControlEvents::new();
        let DragState::Dragging { last_y } = &mut self.drag else {
            return events;
        };
        *last_y = y;
        if let Some(value) = self.update_from(y, geometry) {
            self.emit(&mut events, ControlEvent::ValueChanging { value, from_user: true });
        }
        events
    }

    /// Pointer up: commit the value under `y`.
    pub fn release(&mut self, y: f64, geometry: &TrackGeometry) -> ControlEvents {
        if !self.is_dragging() {
            return ControlEvents::new();
        }
        self.commit(y, geometry)
    }

    /// Pointer cancel: commit at the last position seen during the drag.
    pub fn cancel(&mut self, geometry: &TrackGeometry) -> ControlEvents {
        match self.drag {
            DragState::Dragging { last_y } => self.commit(last_y, geometry),
            DragState::Idle => ControlEvents::new(),
        }
    }

    /// Snapshot for recreation. Only the value is kept.
    pub fn save_state(&self) -> SavedState {
        SavedState::new(self.value)
    }

    /// Apply a snapshot, clamped into the current range.
    pub fn restore_state(&mut self, state: &SavedState) {
        let v = self.range.clamp(state.value);
        if v != state.value {
            debug!(saved = state.value, restored = v, "saved value clamped into range");
        }
        self.value = v;
    }

    /// Restore from serialized state. Malformed input is logged and
    /// discarded, leaving the current value untouched.
    pub fn restore_from_json(&mut self, json: &str) -> bool {
        match SavedState::from_json(json) {
            Ok(state) => {
                self.restore_state(&state);
                true
            }
            Err(err) => {
                warn!(%err, "discarding saved state");
                false
            }
        }
    }

    fn commit(&mut self, y: f64, geometry: &TrackGeometry) -> ControlEvents {
        self.update_from(y, geometry);
        self.drag = DragState::Idle;
        debug!(value = self.value, "value committed");
        let mut events = ControlEvents::new();
        self.emit(&mut events, ControlEvent::ValueCommitted { value: self.value });
        events
    }

    /// Recompute from `y`; returns the new value only if it changed.
    fn update_from(&mut self, y: f64, geometry: &TrackGeometry) -> Option<i32> {
        let v = geometry.value_at(y, &self.range);
        if v == self.value {
            return None;
        }
        trace!(from = self.value, to = v, y, "value changing");
        self.value = v;
        Some(v)
    }

    /// Record `event` and hand it to the listener right away, so the
    /// listener sees the control as it was at that point.
    fn emit(&mut self, events: &mut ControlEvents, event: ControlEvent) {
        events.push(event);
        let Some(mut listener) = self.listener.take() else {
            return;
        };
        match event {
            ControlEvent::DragStarted => listener.on_drag_started(self),
            ControlEvent::ValueChanging { value, from_user } => {
                listener.on_value_changing(self, value, from_user)
            }
            ControlEvent::ValueCommitted { value } => listener.on_value_committed(self, value),
        }
        self.listener = Some(listener);
    }
}

impl Default for ValueControl {
    fn default() -> Self {
        Self::new(ValueRange::default().min, ValueRange::default().max, 0)
    }
}

impl std::fmt::Debug for ValueControl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValueControl")
            .field("range", &self.range)
            .field("value", &self.value)
            .field("drag", &self.drag)
            .field("listener", &self.listener.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn geometry() -> TrackGeometry {
        TrackGeometry::new(200.0, 20.0)
    }

    fn recorder(control: &mut ValueControl) -> Arc<Mutex<Vec<ControlEvent>>> {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        control.set_listener(move |_: &ValueControl, event: ControlEvent| {
            sink.lock().unwrap().push(event)
        });
        log
    }

    // ─── Range and setter ───────────────────────────────────────

    #[test]
    fn setter_clamps_to_nearest_bound() {
        let mut c = ValueControl::new(1, 10, 5);
        c.set_value(42);
        assert_eq!(c.value(), 10);
        c.set_value(-3);
        assert_eq!(c.value(), 1);
        c.set_value(i32::MIN);
        assert_eq!(c.value(), 1);
    }

    #[test]
    fn setter_reports_change_only_when_value_moves() {
        let mut c = ValueControl::new(1, 10, 5);
        assert!(!c.set_value(5));
        assert!(c.set_value(6));
        assert!(c.set_value(60));
        assert_eq!(c.value(), 10);
        assert!(!c.set_value(11));
    }

    #[test]
    fn setter_does_not_notify() {
        let mut c = ValueControl::new(1, 10, 5);
        let log = recorder(&mut c);
        c.set_value(8);
        c.set_range(1, 4);
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn step_edge_rounds_half_up() {
        let mut c = ValueControl::new(1, 10, 1);
        let g = geometry();
        c.press(100.0, &g);
        assert_eq!(c.value(), 6);
        // Just below the halfway mark is already the lower step.
        assert_eq!(
            c.drag_to(101.0, &g).as_slice(),
            &[ControlEvent::ValueChanging { value: 5, from_user: true }]
        );
    }

    #[test]
    fn range_then_value_clamps_against_new_bounds() {
        let mut c = ValueControl::new(1, 10, 7);
        c.set_range(5, 10);
        c.set_value(3);
        assert_eq!(c.value(), 5);
        assert!(c.range().contains(c.value()));
        assert!(!c.range().contains(3));
    }

    #[test]
    fn widening_range_keeps_in_range_value() {
        let mut c = ValueControl::new(1, 10, 7);
        assert!(!c.set_range(1, 20));
        assert_eq!(c.value(), 7);
    }

    #[test]
    fn narrowing_range_lifts_value_to_new_min() {
        let mut c = ValueControl::new(1, 10, 3);
        assert!(c.set_range(5, 10));
        assert_eq!(c.value(), 5);
    }

    #[test]
    fn inverted_range_is_swapped() {
        let mut c = ValueControl::new(10, 1, 20);
        assert_eq!((c.min(), c.max()), (1, 10));
        assert_eq!(c.value(), 10);
        c.set_range(8, 2);
        assert_eq!((c.min(), c.max()), (2, 8));
        assert_eq!(c.value(), 8);
    }

    #[test]
    fn fixed_range_pins_every_position() {
        let mut c = ValueControl::new(4, 4, 0);
        assert_eq!(c.value(), 4);
        let g = geometry();
        for y in [0.0, 20.0, 100.0, 180.0, 250.0] {
            assert_eq!(g.value_at(y, &c.range()), 4);
        }
        c.press(20.0, &g);
        let events = c.release(20.0, &g);
        assert_eq!(events.as_slice(), &[ControlEvent::ValueCommitted { value: 4 }]);
        assert_eq!(g.y_for_value(4, &c.range()), g.bottom());
    }

    // ─── Mapping ────────────────────────────────────────────────

    #[test]
    fn scenario_one_to_ten() {
        let range = ValueRange::new(1, 10);
        let g = geometry();
        assert_eq!(g.value_at(20.0, &range), 10);
        assert_eq!(g.value_at(180.0, &range), 1);
        assert_eq!(g.value_at(100.0, &range), 6);
    }

    #[test]
    fn touches_past_the_ends_hit_the_bounds() {
        let range = ValueRange::new(-5, 5);
        let g = geometry();
        for y in [-100.0, 0.0, 10.0, 20.0] {
            assert_eq!(g.value_at(y, &range), 5);
        }
        for y in [180.0, 190.0, 200.0, 1000.0] {
            assert_eq!(g.value_at(y, &range), -5);
        }
    }

    #[test]
    fn moving_up_never_decreases_value() {
        let range = ValueRange::new(0, 37);
        let g = geometry();
        let mut previous = i32::MIN;
        let mut y = 210.0;
        while y >= -10.0 {
            let v = g.value_at(y, &range);
            assert!(v >= previous, "value dropped to {v} at y={y}");
            previous = v;
            y -= 0.25;
        }
        assert_eq!(previous, 37);
    }

    #[test]
    fn placement_inverts_mapping() {
        let range = ValueRange::new(1, 10);
        let g = geometry();
        for v in range.steps() {
            assert_eq!(g.value_at(g.y_for_value(v, &range), &range), v);
        }
        assert_eq!(g.y_for_value(1, &range), 180.0);
        assert_eq!(g.y_for_value(10, &range), 20.0);
    }

    #[test]
    fn degenerate_geometry_maps_to_min() {
        let range = ValueRange::new(1, 10);
        let g = TrackGeometry::new(30.0, 20.0);
        assert_eq!(g.value_at(0.0, &range), 1);
        assert_eq!(g.y_for_value(10, &range), 15.0);
    }

    #[test]
    fn extreme_range_does_not_overflow() {
        let range = ValueRange::new(i32::MIN, i32::MAX);
        let g = geometry();
        assert_eq!(g.value_at(0.0, &range), i32::MAX);
        assert_eq!(g.value_at(200.0, &range), i32::MIN);
    }

    #[test]
    fn step_spacing_follows_track_length() {
        let g = geometry();
        assert_eq!(g.step_spacing(&ValueRange::new(0, 16)), 10.0);
        assert!(g.step_spacing(&ValueRange::new(3, 3)).is_infinite());
    }

    // ─── Drag session ───────────────────────────────────────────

    #[test]
    fn press_starts_drag_and_jumps_to_touch() {
        let mut c = ValueControl::new(1, 10, 1);
        let log = recorder(&mut c);
        let events = c.press(20.0, &geometry());
        assert!(c.is_dragging());
        assert_eq!(c.value(), 10);
        assert_eq!(
            events.as_slice(),
            &[
                ControlEvent::DragStarted,
                ControlEvent::ValueChanging { value: 10, from_user: false },
            ]
        );
        assert_eq!(log.lock().unwrap().as_slice(), events.as_slice());
    }

    #[test]
    fn sub_step_motion_is_silent() {
        let mut c = ValueControl::new(1, 10, 1);
        let g = geometry();
        let center = g.y_for_value(6, &c.range());
        c.press(center, &g);
        assert_eq!(c.value(), 6);
        for dy in [1.0, 3.0, -1.0, -3.0, 0.0] {
            assert!(c.drag_to(center + dy, &g).is_empty(), "step left at dy={dy}");
        }
        assert_eq!(c.value(), 6);
        let events = c.drag_to(20.0, &g);
        assert_eq!(
            events.as_slice(),
            &[ControlEvent::ValueChanging { value: 10, from_user: true }]
        );
    }

    #[test]
    fn release_commits_final_position() {
        let mut c = ValueControl::new(1, 10, 5);
        let log = recorder(&mut c);
        let g = geometry();
        c.press(100.0, &g);
        c.drag_to(60.0, &g);
        let events = c.release(180.0, &g);
        assert!(!c.is_dragging());
        assert_eq!(c.value(), 1);
        assert_eq!(events.as_slice(), &[ControlEvent::ValueCommitted { value: 1 }]);
        assert_eq!(
            log.lock().unwrap().last(),
            Some(&ControlEvent::ValueCommitted { value: 1 })
        );
    }

    #[test]
    fn committing_twice_at_same_y_is_idempotent() {
        let mut c = ValueControl::new(1, 10, 1);
        let log = recorder(&mut c);
        let g = geometry();
        c.press(100.0, &g);
        let first = c.release(60.0, &g);
        let after_first = log.lock().unwrap().len();

        c.press(60.0, &g);
        let second = c.release(60.0, &g);
        assert_eq!(first, second);

        let log = log.lock().unwrap();
        let replay = &log[after_first..];
        assert_eq!(
            replay,
            &[ControlEvent::DragStarted, ControlEvent::ValueCommitted { value: c.value() }]
        );
    }

    #[test]
    fn cancel_commits_last_seen_position() {
        let mut c = ValueControl::new(1, 10, 1);
        let g = geometry();
        c.press(180.0, &g);
        c.drag_to(20.0, &g);
        let events = c.cancel(&g);
        assert_eq!(events.as_slice(), &[ControlEvent::ValueCommitted { value: 10 }]);
        assert!(!c.is_dragging());
    }

    #[test]
    fn second_pointer_is_ignored() {
        let mut c = ValueControl::new(1, 10, 1);
        let g = geometry();
        c.press(100.0, &g);
        assert!(c.press(20.0, &g).is_empty());
        assert_eq!(c.value(), 6);
    }

    #[test]
    fn idle_moves_and_releases_are_ignored() {
        let mut c = ValueControl::new(1, 10, 3);
        let g = geometry();
        assert!(c.drag_to(20.0, &g).is_empty());
        assert!(c.release(20.0, &g).is_empty());
        assert!(c.cancel(&g).is_empty());
        assert_eq!(c.value(), 3);
    }

    #[test]
    fn listener_is_replaced_not_composed() {
        let mut c = ValueControl::new(1, 10, 1);
        let first = recorder(&mut c);
        let second = recorder(&mut c);
        c.press(20.0, &geometry());
        assert!(first.lock().unwrap().is_empty());
        assert_eq!(second.lock().unwrap().len(), 2);

        c.clear_listener();
        c.release(20.0, &geometry());
        assert_eq!(second.lock().unwrap().len(), 2);
    }

    #[test]
    fn listener_sees_updated_control() {
        let mut c = ValueControl::new(1, 10, 1);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        c.set_listener(move |control: &ValueControl, _: ControlEvent| {
            sink.lock().unwrap().push((control.value(), control.is_dragging()))
        });
        let g = geometry();
        c.press(20.0, &g);
        c.release(20.0, &g);
        assert_eq!(
            seen.lock().unwrap().as_slice(),
            &[(1, true), (10, true), (10, false)]
        );
    }

    // ─── Saved state ────────────────────────────────────────────

    #[test]
    fn save_restore_round_trip() {
        let mut c = ValueControl::new(1, 10, 1);
        let g = geometry();
        c.press(60.0, &g);
        c.release(60.0, &g);
        let saved = c.save_state().to_json().unwrap();

        let mut fresh = ValueControl::new(1, 10, 1);
        assert!(fresh.restore_from_json(&saved));
        assert_eq!(fresh.value(), c.value());
    }

    #[test]
    fn restored_value_is_clamped() {
        let mut c = ValueControl::new(5, 10, 5);
        c.restore_state(&SavedState::new(2));
        assert_eq!(c.value(), 5);
    }

    #[test]
    fn malformed_state_is_discarded() {
        let mut c = ValueControl::new(1, 10, 4);
        assert!(!c.restore_from_json(r#"{"value":"seven"}"#));
        assert_eq!(c.value(), 4);
    }
}
