//! This file is part of the xilem_value_control project.
//! (c) 2026 by Jacek Wisniowski
//!
//! This project was released as open source under the
//! Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
//! (compatible with the Xilem licence).

mod widgets;
mod views;
pub mod attributes;
pub mod control;
pub mod error;
pub mod saved_state;
pub mod theme;

pub use attributes::{Appearance, ControlAttributes, HexColor};
pub use control::{ControlEvent, TrackGeometry, ValueChangeListener, ValueControl, ValueRange};
pub use error::{Error, Result};
pub use saved_state::SavedState;
pub use views::value_control::{value_control, value_control_from};
pub use widgets::value_control::VerticalValueControl;

pub use xilem;
