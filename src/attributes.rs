//! This file is part of the xilem_value_control project.
//! (c) 2026 by Jacek Wisniowski
//!
//! This project was released as open source under the
//! Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
//! (compatible with the Xilem licence).

//! Declarative configuration for a value control.
//!
//! Every key is optional. A typical TOML snippet:
//!
//! ```toml
//! min = 1
//! max = 10
//! progress_color = "#FF2196F3"
//! thumb_radius = 12.0
//! show_ticks = true
//! ```

use std::str::FromStr;

use serde::Deserialize;
use xilem::masonry::vello::peniko::Color;

use crate::error::{Error, Result};
use crate::theme::{
    DEFAULT_TEXT, DEFAULT_THUMB, DEFAULT_THUMB_RADIUS, DEFAULT_TINT, DEFAULT_TRACK,
    DEFAULT_TRACK_WIDTH,
};

/// A color written as `#RRGGBB` or `#AARRGGBB`.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct HexColor(pub Color);

impl FromStr for HexColor {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| format!("`{s}` does not start with '#'"))?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(format!("`{s}` is not hexadecimal"));
        }
        if !matches!(hex.len(), 6 | 8) {
            return Err(format!("`{s}` has {} digits, expected 6 or 8", hex.len()));
        }
        let bits = u32::from_str_radix(hex, 16).map_err(|e| format!("`{s}`: {e}"))?;
        let byte = |shift: u32| (bits >> shift) as u8;
        // No alpha digits means opaque.
        let alpha = if hex.len() == 8 { byte(24) } else { 0xFF };
        Ok(Self(Color::from_rgba8(byte(16), byte(8), byte(0), alpha)))
    }
}

impl TryFrom<String> for HexColor {
    type Error = String;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        s.parse()
    }
}

/// Presentation state of a value control.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Appearance {
    pub track_color: Color,
    pub progress_color: Color,
    pub thumb_color: Color,
    pub text_color: Color,
    pub track_width: f64,
    pub thumb_radius: f64,
    pub show_ticks: bool,
    pub show_numbers: bool,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            track_color: DEFAULT_TRACK,
            progress_color: DEFAULT_TINT,
            thumb_color: DEFAULT_THUMB,
            text_color: DEFAULT_TEXT,
            track_width: DEFAULT_TRACK_WIDTH,
            thumb_radius: DEFAULT_THUMB_RADIUS,
            show_ticks: false,
            show_numbers: false,
        }
    }
}

/// Optional declarative attributes, as found in a TOML table.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ControlAttributes {
    pub min: Option<i32>,
    pub max: Option<i32>,
    pub track_color: Option<HexColor>,
    pub progress_color: Option<HexColor>,
    pub thumb_color: Option<HexColor>,
    pub text_color: Option<HexColor>,
    pub track_width: Option<f64>,
    pub thumb_radius: Option<f64>,
    pub show_ticks: Option<bool>,
    pub show_numbers: Option<bool>,
}

impl ControlAttributes {
    pub fn from_toml(source: &str) -> Result<Self> {
        let attrs: Self = toml::from_str(source)?;
        attrs.validate()?;
        Ok(attrs)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(w) = self.track_width {
            if !w.is_finite() || w <= 0.0 {
                return Err(Error::InvalidAttribute {
                    name: "track_width",
                    reason: format!("{w} is not a positive width"),
                });
            }
        }
        if let Some(r) = self.thumb_radius {
            if !r.is_finite() || r < 0.0 {
                return Err(Error::InvalidAttribute {
                    name: "thumb_radius",
                    reason: format!("{r} is not a valid radius"),
                });
            }
        }
        Ok(())
    }

    /// Bounds with defaults filled in: `(min, max)`.
    pub fn range(&self) -> (i32, i32) {
        (self.min.unwrap_or(0), self.max.unwrap_or(10))
    }

    /// Overlay the attributes that are set onto `base`.
    pub fn apply_to(&self, base: Appearance) -> Appearance {
        let color = |attr: Option<HexColor>, fallback: Color| attr.map_or(fallback, |c| c.0);
        Appearance {
            track_color: color(self.track_color, base.track_color),
            progress_color: color(self.progress_color, base.progress_color),
            thumb_color: color(self.thumb_color, base.thumb_color),
            text_color: color(self.text_color, base.text_color),
            track_width: self.track_width.unwrap_or(base.track_width),
            thumb_radius: self.thumb_radius.unwrap_or(base.thumb_radius),
            show_ticks: self.show_ticks.unwrap_or(base.show_ticks),
            show_numbers: self.show_numbers.unwrap_or(base.show_numbers),
        }
    }

    pub fn appearance(&self) -> Appearance {
        self.apply_to(Appearance::default())
    }
}
