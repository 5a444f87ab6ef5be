use std::collections::BTreeSet;

use super::predicate::Predicate;
use crate::error::SelectError;
use crate::jet::model::JetLike;

// ---------------------------------------------------------------------------
// Cut – the closed set of kinematic predicates
// ---------------------------------------------------------------------------

/// A kinematic cut on the fixed jet fields.
///
/// Field comparisons are strict. Bounds are stored exactly as given; an
/// inverted window is kept as-is, so a central or mass window selects
/// nothing and a forward region selects everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cut {
    /// Keeps every jet.
    #[default]
    All,
    /// `pt > pt_min`.
    Pt { pt_min: f64 },
    /// `pt > pt_min || e > e_min`.
    PtOrE { pt_min: f64, e_min: f64 },
    /// `lower < eta < upper`.
    EtaCentral { upper: f64, lower: f64 },
    /// `eta < lower || eta > upper`; ties on either edge fail here and in the
    /// matching central window.
    EtaForward { upper: f64, lower: f64 },
    /// `min < m < max`.
    Mass { min: f64, max: f64 },
    /// Identifier tag is one of `ids`.
    PdgId { ids: BTreeSet<i32> },
}

impl Cut {
    /// Central window `-abs_eta < eta < abs_eta`. The lower edge is the
    /// negated argument; a negative `abs_eta` yields an empty window.
    pub fn eta_central(abs_eta: f64) -> Self {
        Cut::EtaCentral {
            upper: abs_eta,
            lower: -abs_eta,
        }
    }

    /// Central window `eta_min < eta < eta_max`.
    pub fn eta_central_range(eta_min: f64, eta_max: f64) -> Self {
        Cut::EtaCentral {
            upper: eta_max,
            lower: eta_min,
        }
    }

    /// Forward region `|eta| > abs_eta`, split at `±abs_eta`.
    pub fn eta_forward(abs_eta: f64) -> Self {
        Cut::EtaForward {
            upper: abs_eta,
            lower: -abs_eta,
        }
    }

    /// Forward region `eta < eta_min || eta > eta_max`.
    pub fn eta_forward_range(eta_min: f64, eta_max: f64) -> Self {
        Cut::EtaForward {
            upper: eta_max,
            lower: eta_min,
        }
    }

    /// Mass window with no upper limit beyond `f64::MAX`.
    pub fn mass_above(mass_min: f64) -> Self {
        Cut::mass_window(mass_min, f64::MAX)
    }

    pub fn mass_window(mass_min: f64, mass_max: f64) -> Self {
        Cut::Mass {
            min: mass_min,
            max: mass_max,
        }
    }

    pub fn pdg_ids<I: IntoIterator<Item = i32>>(ids: I) -> Self {
        Cut::PdgId {
            ids: ids.into_iter().collect(),
        }
    }

    /// Replace the first threshold: the pt cut, the upper eta edge, or the
    /// lower mass bound. Identifier and pass-through cuts are unchanged.
    pub fn with_cut(self, value: f64) -> Self {
        match self {
            Cut::Pt { .. } => Cut::Pt { pt_min: value },
            Cut::PtOrE { e_min, .. } => Cut::PtOrE {
                pt_min: value,
                e_min,
            },
            Cut::EtaCentral { lower, .. } => Cut::EtaCentral {
                upper: value,
                lower,
            },
            Cut::EtaForward { lower, .. } => Cut::EtaForward {
                upper: value,
                lower,
            },
            Cut::Mass { max, .. } => Cut::Mass { min: value, max },
            other => other,
        }
    }

    /// Replace the second threshold: the energy cut, the lower eta edge, or
    /// the upper mass bound. Single-threshold cuts are unchanged.
    pub fn with_cut2(self, value: f64) -> Self {
        match self {
            Cut::PtOrE { pt_min, .. } => Cut::PtOrE {
                pt_min,
                e_min: value,
            },
            Cut::EtaCentral { upper, .. } => Cut::EtaCentral {
                upper,
                lower: value,
            },
            Cut::EtaForward { upper, .. } => Cut::EtaForward {
                upper,
                lower: value,
            },
            Cut::Mass { min, .. } => Cut::Mass { min, max: value },
            other => other,
        }
    }

    /// Conventional selector name for this kind of cut.
    pub fn default_name(&self) -> &'static str {
        match self {
            Cut::All => "JetSelector",
            Cut::Pt { .. } => "JetPtSelector",
            Cut::PtOrE { .. } => "JetPtORESelector",
            Cut::EtaCentral { .. } => "JetEtaCentralSelector",
            Cut::EtaForward { .. } => "JetEtaForwardSelector",
            Cut::Mass { .. } => "JetMassSelector",
            Cut::PdgId { .. } => "JetInputPdgIdSelector",
        }
    }

    /// Infallible verdict for one jet.
    pub fn pass<J: JetLike + ?Sized>(&self, jet: &J) -> bool {
        match self {
            Cut::All => true,
            Cut::Pt { pt_min } => jet.momentum() > *pt_min,
            Cut::PtOrE { pt_min, e_min } => jet.momentum() > *pt_min || jet.energy() > *e_min,
            Cut::EtaCentral { upper, lower } => {
                let eta = jet.pseudorapidity();
                eta > *lower && eta < *upper
            }
            Cut::EtaForward { upper, lower } => {
                let eta = jet.pseudorapidity();
                eta < *lower || eta > *upper
            }
            Cut::Mass { min, max } => {
                let m = jet.mass();
                m > *min && m < *max
            }
            Cut::PdgId { ids } => ids.contains(&jet.identifier()),
        }
    }
}

impl<J: JetLike + ?Sized> Predicate<J> for Cut {
    fn evaluate(&self, jet: &J) -> Result<bool, SelectError> {
        Ok(self.pass(jet))
    }
}
