//! This file is part of the xilem_value_control project.
//! (c) 2026 by Jacek Wisniowski
//!
//! This project was released as open source under the
//! Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
//! (compatible with the Xilem licence).

use xilem::masonry::vello::peniko::Color;

/// Default tint color: a shining orange. Used for the progress fill.
pub const DEFAULT_TINT: Color = Color::from_rgb8(0xFF, 0x8C, 0x00);

pub const DEFAULT_TRACK: Color = Color::from_rgb8(0x4A, 0x4A, 0x4A);
pub const DEFAULT_THUMB: Color = Color::from_rgb8(0xEE, 0xEE, 0xEE);
pub const DEFAULT_TEXT: Color = Color::from_rgb8(0x99, 0x99, 0x99);

pub const DEFAULT_TRACK_WIDTH: f64 = 4.0;
pub const DEFAULT_THUMB_RADIUS: f64 = 10.0;
