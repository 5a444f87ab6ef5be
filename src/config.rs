use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::select::cut::Cut;
use crate::select::selector::Selector;

// ---------------------------------------------------------------------------
// Selector descriptions
// ---------------------------------------------------------------------------

/// Serializable description of a kinematic selector.
///
/// ```json
/// { "name": "leading", "max_jets": 2, "cut": { "kind": "pt", "pt": 25.0 } }
/// ```
///
/// `max_jets` defaults to `-1` (no cap). Moment selectors carry a
/// compile-time scalar type and are built in code instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectorConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default = "unbounded")]
    pub max_jets: i64,
    pub cut: CutConfig,
}

fn unbounded() -> i64 {
    -1
}

fn no_ceiling() -> f64 {
    f64::MAX
}

/// The cut half of a [`SelectorConfig`], tagged by `kind`.
///
/// Eta windows take either `abs_eta` or both `eta_min` and `eta_max`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CutConfig {
    All,
    Pt {
        pt: f64,
    },
    PtOrE {
        pt: f64,
        e: f64,
    },
    EtaCentral {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        abs_eta: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        eta_min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        eta_max: Option<f64>,
    },
    EtaForward {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        abs_eta: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        eta_min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        eta_max: Option<f64>,
    },
    Mass {
        mass_min: f64,
        #[serde(default = "no_ceiling")]
        mass_max: f64,
    },
    PdgId {
        ids: Vec<i32>,
    },
}

impl CutConfig {
    pub fn to_cut(&self) -> Result<Cut, ConfigError> {
        let cut = match self {
            CutConfig::All => Cut::All,
            CutConfig::Pt { pt } => Cut::Pt { pt_min: *pt },
            CutConfig::PtOrE { pt, e } => Cut::PtOrE {
                pt_min: *pt,
                e_min: *e,
            },
            CutConfig::EtaCentral {
                abs_eta,
                eta_min,
                eta_max,
            } => match eta_window("eta_central", *abs_eta, *eta_min, *eta_max)? {
                EtaWindow::Symmetric(abs_eta) => Cut::eta_central(abs_eta),
                EtaWindow::Range(min, max) => Cut::eta_central_range(min, max),
            },
            CutConfig::EtaForward {
                abs_eta,
                eta_min,
                eta_max,
            } => match eta_window("eta_forward", *abs_eta, *eta_min, *eta_max)? {
                EtaWindow::Symmetric(abs_eta) => Cut::eta_forward(abs_eta),
                EtaWindow::Range(min, max) => Cut::eta_forward_range(min, max),
            },
            CutConfig::Mass { mass_min, mass_max } => Cut::mass_window(*mass_min, *mass_max),
            CutConfig::PdgId { ids } => Cut::pdg_ids(ids.iter().copied()),
        };
        Ok(cut)
    }
}

enum EtaWindow {
    Symmetric(f64),
    Range(f64, f64),
}

fn eta_window(
    kind: &str,
    abs_eta: Option<f64>,
    eta_min: Option<f64>,
    eta_max: Option<f64>,
) -> Result<EtaWindow, ConfigError> {
    match (abs_eta, eta_min, eta_max) {
        (Some(abs_eta), None, None) => Ok(EtaWindow::Symmetric(abs_eta)),
        (None, Some(min), Some(max)) => Ok(EtaWindow::Range(min, max)),
        _ => Err(ConfigError::Invalid(format!(
            "{kind} needs either `abs_eta` or both `eta_min` and `eta_max`"
        ))),
    }
}

impl SelectorConfig {
    pub fn build(&self) -> Result<Selector<Cut>, ConfigError> {
        let mut selector = Selector::from_cut(self.cut.to_cut()?).with_limit(self.max_jets);
        if let Some(name) = &self.name {
            selector = selector.named(name.as_str());
        }
        Ok(selector)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Parse a selector description from a JSON string and build it.
pub fn parse_selector(text: &str) -> Result<Selector<Cut>, ConfigError> {
    SelectorConfig::from_json(text)?.build()
}

/// Read a JSON selector description from disk and build it.
pub fn load_selector(path: &Path) -> anyhow::Result<Selector<Cut>> {
    let config = SelectorConfig::from_path(path)
        .with_context(|| format!("reading selector config {}", path.display()))?;
    let selector = config
        .build()
        .with_context(|| format!("building selector from {}", path.display()))?;
    log::debug!(
        "loaded selector {} from {}",
        selector.name(),
        path.display()
    );
    Ok(selector)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pt_with_cap() {
        let selector =
            parse_selector(r#"{"name":"leading","max_jets":2,"cut":{"kind":"pt","pt":25.0}}"#)
                .unwrap();
        assert_eq!(selector.name(), "leading");
        assert_eq!(selector.limit(), Some(2));
        assert_eq!(selector.predicate(), &Cut::Pt { pt_min: 25.0 });
    }

    #[test]
    fn defaults_to_unbounded_and_kind_name() {
        let selector = parse_selector(r#"{"cut":{"kind":"pt_or_e","pt":20.0,"e":50.0}}"#).unwrap();
        assert_eq!(selector.name(), "JetPtORESelector");
        assert_eq!(selector.limit(), None);
    }

    #[test]
    fn eta_shapes() {
        let symmetric = parse_selector(r#"{"cut":{"kind":"eta_central","abs_eta":2.5}}"#).unwrap();
        assert_eq!(symmetric.predicate(), &Cut::eta_central(2.5));

        let range = parse_selector(
            r#"{"cut":{"kind":"eta_forward","eta_min":-3.2,"eta_max":2.8}}"#,
        )
        .unwrap();
        assert_eq!(range.predicate(), &Cut::eta_forward_range(-3.2, 2.8));
    }

    #[test]
    fn ambiguous_eta_is_rejected() {
        let err = parse_selector(r#"{"cut":{"kind":"eta_central","abs_eta":2.5,"eta_min":-1.0}}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = parse_selector(r#"{"cut":{"kind":"eta_forward"}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn mass_ceiling_defaults_to_max() {
        let selector = parse_selector(r#"{"cut":{"kind":"mass","mass_min":40.0}}"#).unwrap();
        assert_eq!(selector.predicate(), &Cut::mass_above(40.0));
    }

    #[test]
    fn pdg_ids_and_pass_through() {
        let ids = parse_selector(r#"{"cut":{"kind":"pdg_id","ids":[11,-11]}}"#).unwrap();
        assert_eq!(ids.predicate(), &Cut::pdg_ids([11, -11]));

        let all = parse_selector(r#"{"name":"keep","cut":{"kind":"all"}}"#).unwrap();
        assert_eq!(all.predicate(), &Cut::All);
    }

    #[test]
    fn unknown_kind_is_parse_error() {
        let err = parse_selector(r#"{"cut":{"kind":"rapidity","y":1.0}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn serializes_back() {
        let config = SelectorConfig {
            name: None,
            max_jets: -1,
            cut: CutConfig::Pt { pt: 10.0 },
        };
        let text = serde_json::to_string(&config).unwrap();
        assert_eq!(text, r#"{"max_jets":-1,"cut":{"kind":"pt","pt":10.0}}"#);
    }
}
