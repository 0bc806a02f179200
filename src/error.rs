//! This file is part of the xilem_value_control project.
//! (c) 2026 by Jacek Wisniowski
//!
//! This project was released as open source under the
//! Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
//! (compatible with the Xilem licence).

use thiserror::Error;

/// Errors from loading attributes or restoring saved state.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid attribute `{name}`: {reason}")]
    InvalidAttribute { name: &'static str, reason: String },
    #[error("could not parse attributes: {0}")]
    Attributes(#[from] toml::de::Error),
    #[error("malformed saved state: {0}")]
    MalformedState(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
