use std::fmt;

use super::predicate::Predicate;
use crate::error::SelectError;
use crate::jet::moments::{get_moment, AttributeStore, MomentSchema, MomentValue};

/// Inclusive window `min <= v <= max` on a named moment.
///
/// The scalar type `T` is fixed when the window is built and checked against
/// the store's declaration then, so a type mismatch never surfaces mid-pass.
/// A key the store has not declared yet is accepted; any jet without a
/// recorded value fails the whole pass with [`SelectError::MissingMoment`].
pub struct MomentWindow<'s, T, S: ?Sized> {
    key: String,
    min: T,
    max: T,
    store: &'s S,
}

impl<'s, T, S> MomentWindow<'s, T, S>
where
    T: MomentValue,
    S: MomentSchema + ?Sized,
{
    pub fn new(store: &'s S, key: impl Into<String>, min: T, max: T) -> Result<Self, SelectError> {
        let key = key.into();
        if let Some(declared) = store.declared_kind(&key) {
            if declared != T::KIND {
                return Err(SelectError::MomentTypeMismatch {
                    key,
                    declared,
                    requested: T::KIND,
                });
            }
        }
        Ok(MomentWindow {
            key,
            min,
            max,
            store,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn bounds(&self) -> (T, T) {
        (self.min, self.max)
    }
}

impl<'s, T, S, J> Predicate<J> for MomentWindow<'s, T, S>
where
    T: MomentValue,
    S: AttributeStore<J> + ?Sized,
    J: ?Sized,
{
    fn evaluate(&self, jet: &J) -> Result<bool, SelectError> {
        let value: T = get_moment(self.store, &self.key, jet)?;
        Ok(self.min <= value && value <= self.max)
    }
}

impl<T: fmt::Debug, S: ?Sized> fmt::Debug for MomentWindow<'_, T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MomentWindow")
            .field("key", &self.key)
            .field("min", &self.min)
            .field("max", &self.max)
            .finish_non_exhaustive()
    }
}
