use std::collections::HashMap;
use std::fmt;

use super::model::Jet;
use crate::error::SelectError;

// ---------------------------------------------------------------------------
// Moment – one scalar attribute value
// ---------------------------------------------------------------------------

/// A named jet moment as stored in an attribute store.
///
/// Only the scalar types selectors can be parameterized with are
/// representable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Moment {
    Float(f32),
    Double(f64),
    Int(i32),
    Long(i64),
}

/// The declared scalar type of a moment key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MomentKind {
    Float,
    Double,
    Int,
    Long,
}

impl Moment {
    pub fn kind(&self) -> MomentKind {
        match self {
            Moment::Float(_) => MomentKind::Float,
            Moment::Double(_) => MomentKind::Double,
            Moment::Int(_) => MomentKind::Int,
            Moment::Long(_) => MomentKind::Long,
        }
    }
}

impl fmt::Display for MomentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MomentKind::Float => "float",
            MomentKind::Double => "double",
            MomentKind::Int => "int",
            MomentKind::Long => "long",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// MomentValue – typed extraction
// ---------------------------------------------------------------------------

/// A Rust scalar type a moment selector can be parameterized with.
///
/// Extraction is exact: an `Int` moment is never read back as `f32`.
pub trait MomentValue: Copy + PartialOrd + fmt::Debug {
    const KIND: MomentKind;

    fn from_moment(moment: Moment) -> Option<Self>;

    fn into_moment(self) -> Moment;
}

macro_rules! moment_value {
    ($ty:ty, $variant:ident) => {
        impl MomentValue for $ty {
            const KIND: MomentKind = MomentKind::$variant;

            fn from_moment(moment: Moment) -> Option<Self> {
                match moment {
                    Moment::$variant(v) => Some(v),
                    _ => None,
                }
            }

            fn into_moment(self) -> Moment {
                Moment::$variant(self)
            }
        }
    };
}

moment_value!(f32, Float);
moment_value!(f64, Double);
moment_value!(i32, Int);
moment_value!(i64, Long);

// ---------------------------------------------------------------------------
// AttributeStore – the lookup service selectors consult
// ---------------------------------------------------------------------------

/// Which moment keys a store knows about, and their declared types.
pub trait MomentSchema {
    /// Declared scalar type of `key`, or `None` when the key is unknown.
    fn declared_kind(&self, key: &str) -> Option<MomentKind>;
}

/// Read-only (key, jet) → moment lookup.
///
/// Implementations must answer deterministically for a fixed (key, jet)
/// pair for the duration of a filtering pass.
pub trait AttributeStore<J: ?Sized>: MomentSchema {
    /// Stored value of `key` for `jet`, if one was recorded.
    fn moment(&self, key: &str, jet: &J) -> Option<Moment>;
}

/// Fetch `key` for `jet` as a `T`.
///
/// A missing value is a [`SelectError::MissingMoment`]; a value of another
/// scalar type is a [`SelectError::MomentTypeMismatch`].
pub fn get_moment<T, J, S>(store: &S, key: &str, jet: &J) -> Result<T, SelectError>
where
    T: MomentValue,
    J: ?Sized,
    S: AttributeStore<J> + ?Sized,
{
    let moment = store
        .moment(key, jet)
        .ok_or_else(|| SelectError::missing_moment(key))?;
    T::from_moment(moment).ok_or_else(|| SelectError::MomentTypeMismatch {
        key: key.to_string(),
        declared: moment.kind(),
        requested: T::KIND,
    })
}

// ---------------------------------------------------------------------------
// MomentMap – in-memory store keyed by jet index
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct MomentColumn {
    kind: MomentKind,
    values: HashMap<usize, Moment>,
}

/// Per-event moment storage: one typed column per key, rows keyed by
/// [`Jet::index`].
#[derive(Debug, Clone, Default)]
pub struct MomentMap {
    columns: HashMap<String, MomentColumn>,
}

impl MomentMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `key` with a scalar type without recording any value.
    ///
    /// Re-declaring with the same type is a no-op.
    pub fn declare(&mut self, key: &str, kind: MomentKind) -> Result<(), SelectError> {
        match self.columns.get(key) {
            Some(column) if column.kind != kind => Err(SelectError::MomentTypeMismatch {
                key: key.to_string(),
                declared: column.kind,
                requested: kind,
            }),
            Some(_) => Ok(()),
            None => {
                self.columns.insert(
                    key.to_string(),
                    MomentColumn {
                        kind,
                        values: HashMap::new(),
                    },
                );
                Ok(())
            }
        }
    }

    /// Record `value` for the jet at `jet_index`, declaring the key on first
    /// use. Overwrites any previous value for that jet.
    pub fn set<T: MomentValue>(
        &mut self,
        key: &str,
        jet_index: usize,
        value: T,
    ) -> Result<(), SelectError> {
        self.declare(key, T::KIND)?;
        if let Some(column) = self.columns.get_mut(key) {
            column.values.insert(jet_index, value.into_moment());
        }
        Ok(())
    }

    /// Typed lookup by jet index.
    pub fn get<T: MomentValue>(&self, key: &str, jet_index: usize) -> Result<T, SelectError> {
        get_moment(self, key, &jet_index)
    }

    /// Number of declared keys.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl MomentSchema for MomentMap {
    fn declared_kind(&self, key: &str) -> Option<MomentKind> {
        self.columns.get(key).map(|c| c.kind)
    }
}

impl AttributeStore<usize> for MomentMap {
    fn moment(&self, key: &str, jet_index: &usize) -> Option<Moment> {
        self.columns.get(key)?.values.get(jet_index).copied()
    }
}

impl AttributeStore<Jet> for MomentMap {
    fn moment(&self, key: &str, jet: &Jet) -> Option<Moment> {
        AttributeStore::<usize>::moment(self, key, &jet.index)
    }
}

impl<'a> AttributeStore<&'a Jet> for MomentMap {
    fn moment(&self, key: &str, jet: &&'a Jet) -> Option<Moment> {
        AttributeStore::<usize>::moment(self, key, &jet.index)
    }
}
