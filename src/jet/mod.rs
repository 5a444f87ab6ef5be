/// Jet-side collaborators: the kinematic accessor surface and the moment
/// lookup service.
///
/// ```text
///   Jet / any JetLike ──► kinematics (pt, e, eta, m, id)
///         │
///         ▼
///   AttributeStore ──► (key, jet) → Moment
///   (MomentMap: per-key columns keyed by jet index)
/// ```

pub mod model;
pub mod moments;
