use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// JetLike – the accessor surface a selector needs
// ---------------------------------------------------------------------------

/// Read-only kinematic view of a jet.
///
/// Selectors only ever borrow jets through this trait; any event model that
/// can answer these five questions can be filtered.
pub trait JetLike {
    /// Transverse momentum.
    fn momentum(&self) -> f64;
    /// Energy.
    fn energy(&self) -> f64;
    /// Pseudorapidity (eta).
    fn pseudorapidity(&self) -> f64;
    /// Invariant mass.
    fn mass(&self) -> f64;
    /// Particle identifier tag (e.g. a PDG id).
    fn identifier(&self) -> i32;
}

impl<J: JetLike + ?Sized> JetLike for &J {
    fn momentum(&self) -> f64 {
        (**self).momentum()
    }
    fn energy(&self) -> f64 {
        (**self).energy()
    }
    fn pseudorapidity(&self) -> f64 {
        (**self).pseudorapidity()
    }
    fn mass(&self) -> f64 {
        (**self).mass()
    }
    fn identifier(&self) -> i32 {
        (**self).identifier()
    }
}

// ---------------------------------------------------------------------------
// Jet – a plain record implementing JetLike
// ---------------------------------------------------------------------------

/// A reconstructed jet as handed over by the clustering stage.
///
/// `index` is the jet's position in its owning event and is what
/// [`MomentMap`](super::moments::MomentMap) keys moments on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Jet {
    pub index: usize,
    pub pt: f64,
    pub e: f64,
    pub eta: f64,
    pub m: f64,
    #[serde(default)]
    pub pdg_id: i32,
}

impl Jet {
    pub fn new(index: usize, pt: f64, e: f64, eta: f64, m: f64) -> Self {
        Jet {
            index,
            pt,
            e,
            eta,
            m,
            pdg_id: 0,
        }
    }

    /// Same jet with the identifier tag replaced.
    pub fn with_pdg_id(mut self, pdg_id: i32) -> Self {
        self.pdg_id = pdg_id;
        self
    }
}

impl JetLike for Jet {
    fn momentum(&self) -> f64 {
        self.pt
    }
    fn energy(&self) -> f64 {
        self.e
    }
    fn pseudorapidity(&self) -> f64 {
        self.eta
    }
    fn mass(&self) -> f64 {
        self.m
    }
    fn identifier(&self) -> i32 {
        self.pdg_id
    }
}

impl fmt::Display for Jet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "jet #{} pt={:.3} e={:.3} eta={:.3} m={:.3} id={}",
            self.index, self.pt, self.e, self.eta, self.m, self.pdg_id
        )
    }
}
