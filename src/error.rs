use thiserror::Error;

use crate::jet::moments::MomentKind;

/// Failures surfaced while building or running a selector.
///
/// Inverted or empty cut configurations are not errors; they simply select
/// nothing (or everything).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SelectError {
    #[error("no value for moment `{key}`{}", describe_position(.position))]
    MissingMoment {
        key: String,
        /// Position of the offending jet in the collection being filtered,
        /// when known.
        position: Option<usize>,
    },

    #[error("moment `{key}` is stored as {declared} but was requested as {requested}")]
    MomentTypeMismatch {
        key: String,
        declared: MomentKind,
        requested: MomentKind,
    },
}

impl SelectError {
    pub(crate) fn missing_moment(key: &str) -> Self {
        SelectError::MissingMoment {
            key: key.to_string(),
            position: None,
        }
    }

    /// Attach the collection position of the jet being evaluated.
    pub(crate) fn at(self, position: usize) -> Self {
        match self {
            SelectError::MissingMoment { key, .. } => SelectError::MissingMoment {
                key,
                position: Some(position),
            },
            other => other,
        }
    }
}

fn describe_position(position: &Option<usize>) -> String {
    match position {
        Some(p) => format!(" for jet at position {p}"),
        None => String::new(),
    }
}

/// Failures reading a selector description.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid selector configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid selector configuration: {0}")]
    Invalid(String),
}
