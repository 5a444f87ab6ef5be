use crate::error::SelectError;

/// A pure pass/fail decision on one jet.
///
/// Implementations hold no per-jet state, so `evaluate` may be called any
/// number of times, in any order. The only failure is a moment lookup that
/// cannot be answered.
pub trait Predicate<J: ?Sized> {
    fn evaluate(&self, jet: &J) -> Result<bool, SelectError>;
}
