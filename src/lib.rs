//! # jetsel
//!
//! Kinematic and moment cuts for picking jets out of an event's collection.
//!
//! A [`Selector`] binds one predicate (a [`Cut`] on the fixed jet fields, or a
//! [`MomentWindow`] on a named moment held in an [`AttributeStore`]) to a
//! collection pass that keeps survivors in input order, optionally capped.
//!
//! ```rust
//! use jetsel::{Jet, Selector};
//!
//! let jets = vec![
//!     Jet::new(0, 80.0, 95.0, 0.4, 9.0),
//!     Jet::new(1, 12.0, 40.0, 1.1, 2.0),
//!     Jet::new(2, 45.0, 60.0, -3.0, 6.0),
//! ];
//!
//! let central = Selector::eta_central(2.5).select(&jets)?;
//! assert_eq!(central.len(), 2);
//!
//! let leading = Selector::pt(20.0).with_limit(1).select(&jets)?;
//! assert_eq!(leading[0].index, 0);
//! # Ok::<(), jetsel::SelectError>(())
//! ```
//!
//! Field cuts are strict (`pt > cut`); moment windows are inclusive
//! (`min <= v <= max`).

pub mod config;
pub mod error;
pub mod jet;
pub mod select;

pub use crate::config::{load_selector, parse_selector, CutConfig, SelectorConfig};
pub use crate::error::{ConfigError, SelectError};
pub use crate::jet::model::{Jet, JetLike};
pub use crate::jet::moments::{
    get_moment, AttributeStore, Moment, MomentKind, MomentMap, MomentSchema, MomentValue,
};
pub use crate::select::cut::Cut;
pub use crate::select::diagnostics::{DiagnosticSink, LogSink, NoDiagnostics};
pub use crate::select::moment::MomentWindow;
pub use crate::select::predicate::Predicate;
pub use crate::select::selector::Selector;
