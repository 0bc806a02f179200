//! This file is part of the xilem_value_control project.
//! (c) 2026 by Jacek Wisniowski
//!
//! This project was released as open source under the
//! Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
//! (compatible with the Xilem licence).

use xilem::masonry::properties::types::{AsUnit, CrossAxisAlignment};
use xilem::masonry::vello::peniko::Color;
use xilem::style::Style;
use xilem::view::{flex_col, flex_row, label};
use xilem::{EventLoop, WidgetView, WindowOptions, Xilem};

use xilem_value_control::{
    value_control, value_control_from, ControlAttributes, ControlEvent, SavedState, ValueControl,
};

const TEXT_COLOR: Color = Color::from_rgb8(0xDD, 0xCC, 0xCC);
const DIM_TEXT: Color = Color::from_rgb8(0xAA, 0x99, 0x99);

const BRIGHTNESS_ATTRS: &str = r##"
min = 1
max = 10
progress_color = "#FFFFD54F"
thumb_radius = 12.0
show_ticks = true
show_numbers = true
"##;

/// What a previous run left behind.
const SAVED_VOLUME: &str = r#"{"value":7}"#;

struct DemoState {
    volume: i32,
    brightness: i32,
    brightness_attrs: ControlAttributes,
    status: String,
    saved: String,
}

impl DemoState {
    fn new() -> Self {
        let brightness_attrs = match ControlAttributes::from_toml(BRIGHTNESS_ATTRS) {
            Ok(attrs) => attrs,
            Err(e) => {
                eprintln!("Bad brightness attributes: {e}");
                ControlAttributes::default()
            }
        };

        let mut volume = ValueControl::new(0, 15, 0);
        volume.restore_from_json(SAVED_VOLUME);

        Self {
            volume: volume.value(),
            brightness: 5,
            brightness_attrs,
            status: "Idle".into(),
            saved: SAVED_VOLUME.into(),
        }
    }

    fn on_volume(&mut self, event: ControlEvent) {
        match event {
            ControlEvent::DragStarted => {
                self.status = "Dragging".into();
            }
            ControlEvent::ValueChanging { value, from_user } => {
                self.volume = value;
                self.status = if from_user { "Dragging".into() } else { "Jumped".into() };
            }
            ControlEvent::ValueCommitted { value } => {
                self.volume = value;
                self.status = format!("Committed {value}");
                self.saved = SavedState::new(value)
                    .to_json()
                    .unwrap_or_else(|e| format!("<{e}>"));
            }
        }
    }
}

fn app_logic(state: &mut DemoState) -> impl WidgetView<DemoState> + use<> {
    flex_col((
        flex_row((
            flex_col((
                label(format!("{}", state.volume)).text_size(11.0).color(TEXT_COLOR),
                value_control(0, 15, state.volume, |s: &mut DemoState, e| s.on_volume(e))
                    .track_width(6.0)
                    .show_ticks(),
                label("Volume").text_size(10.0).color(DIM_TEXT),
            ))
            .gap(2.0.px()),
            flex_col((
                label(format!("{}", state.brightness)).text_size(11.0).color(TEXT_COLOR),
                value_control_from(
                    &state.brightness_attrs,
                    state.brightness,
                    |s: &mut DemoState, e| {
                        if let ControlEvent::ValueChanging { value, .. }
                        | ControlEvent::ValueCommitted { value } = e
                        {
                            s.brightness = value;
                        }
                    },
                ),
                label("Brightness").text_size(10.0).color(DIM_TEXT),
            ))
            .gap(2.0.px()),
        ))
        .gap(16.0.px()),
        label(state.status.clone()).text_size(10.0).color(DIM_TEXT),
        label(format!("Saved: {}", state.saved)).text_size(9.0).color(DIM_TEXT),
    ))
    .cross_axis_alignment(CrossAxisAlignment::Center)
    .gap(6.0.px())
}

fn main() {
    let app = Xilem::new_simple(
        DemoState::new(),
        app_logic,
        WindowOptions::new("Value Control Demo")
            .with_initial_inner_size(xilem::winit::dpi::LogicalSize::new(260.0, 340.0)),
    );
    app.run_in(EventLoop::with_user_event()).unwrap();
}
