use log::trace;

use super::cut::Cut;
use super::diagnostics::{DiagnosticSink, NoDiagnostics};
use super::moment::MomentWindow;
use super::predicate::Predicate;
use crate::error::SelectError;
use crate::jet::moments::{MomentSchema, MomentValue};

// ---------------------------------------------------------------------------
// Selector – a named predicate plus its collection policy
// ---------------------------------------------------------------------------

/// A configured filter unit: one predicate, a name for diagnostics, and an
/// optional cap on how many survivors are kept.
///
/// Selectors are immutable. The `with_*` methods return a reconfigured copy.
#[derive(Debug, Clone, PartialEq)]
pub struct Selector<P> {
    name: String,
    predicate: P,
    limit: Option<usize>,
}

impl<P> Selector<P> {
    pub fn from_predicate(name: impl Into<String>, predicate: P) -> Self {
        Selector {
            name: name.into(),
            predicate,
            limit: None,
        }
    }

    /// Same selector under a different name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Keep at most the first `n` survivors in input order. A negative `n`
    /// removes the cap.
    pub fn with_limit(mut self, n: i64) -> Self {
        self.limit = usize::try_from(n).ok();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn predicate(&self) -> &P {
        &self.predicate
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }
}

impl Selector<Cut> {
    /// Pass-through selector that keeps every jet.
    pub fn new(name: impl Into<String>) -> Self {
        Selector::from_predicate(name, Cut::All)
    }

    /// Selector named after its cut kind.
    pub fn from_cut(cut: Cut) -> Self {
        Selector::from_predicate(cut.default_name(), cut)
    }

    pub fn pt(pt_min: f64) -> Self {
        Selector::from_cut(Cut::Pt { pt_min })
    }

    pub fn pt_or_e(pt_min: f64, e_min: f64) -> Self {
        Selector::from_cut(Cut::PtOrE { pt_min, e_min })
    }

    pub fn eta_central(abs_eta: f64) -> Self {
        Selector::from_cut(Cut::eta_central(abs_eta))
    }

    pub fn eta_central_range(eta_min: f64, eta_max: f64) -> Self {
        Selector::from_cut(Cut::eta_central_range(eta_min, eta_max))
    }

    pub fn eta_forward(abs_eta: f64) -> Self {
        Selector::from_cut(Cut::eta_forward(abs_eta))
    }

    pub fn eta_forward_range(eta_min: f64, eta_max: f64) -> Self {
        Selector::from_cut(Cut::eta_forward_range(eta_min, eta_max))
    }

    pub fn mass(mass_min: f64) -> Self {
        Selector::from_cut(Cut::mass_above(mass_min))
    }

    pub fn mass_window(mass_min: f64, mass_max: f64) -> Self {
        Selector::from_cut(Cut::mass_window(mass_min, mass_max))
    }

    pub fn pdg_ids<I: IntoIterator<Item = i32>>(ids: I) -> Self {
        Selector::from_cut(Cut::pdg_ids(ids))
    }

    /// See [`Cut::with_cut`].
    pub fn with_cut(mut self, value: f64) -> Self {
        self.predicate = self.predicate.with_cut(value);
        self
    }

    /// See [`Cut::with_cut2`].
    pub fn with_cut2(mut self, value: f64) -> Self {
        self.predicate = self.predicate.with_cut2(value);
        self
    }

    /// Replace the identifier set. Only meaningful for identifier cuts.
    pub fn with_ids<I: IntoIterator<Item = i32>>(mut self, ids: I) -> Self {
        if let Cut::PdgId { .. } = self.predicate {
            self.predicate = Cut::pdg_ids(ids);
        }
        self
    }
}

impl<'s, T, S> Selector<MomentWindow<'s, T, S>>
where
    T: MomentValue,
    S: MomentSchema + ?Sized,
{
    /// Inclusive window on a named moment looked up in `store`.
    pub fn moment(
        store: &'s S,
        key: impl Into<String>,
        min: T,
        max: T,
    ) -> Result<Self, SelectError> {
        let window = MomentWindow::new(store, key, min, max)?;
        Ok(Selector::from_predicate("JetMomentSelector", window))
    }
}

// ---------------------------------------------------------------------------
// Collection filtering
// ---------------------------------------------------------------------------

impl<P> Selector<P> {
    /// Verdict for a single jet.
    pub fn pass_cut<J: ?Sized>(&self, jet: &J) -> Result<bool, SelectError>
    where
        P: Predicate<J>,
    {
        self.predicate.evaluate(jet)
    }

    /// Survivors of `jets`, in input order, capped at the configured limit.
    pub fn select<'j, J>(&self, jets: &'j [J]) -> Result<Vec<&'j J>, SelectError>
    where
        P: Predicate<J>,
    {
        self.select_with(jets, &mut NoDiagnostics)
    }

    /// [`select`](Self::select), reporting each survivor to `sink`.
    pub fn select_with<'j, J>(
        &self,
        jets: &'j [J],
        sink: &mut dyn DiagnosticSink<J>,
    ) -> Result<Vec<&'j J>, SelectError>
    where
        P: Predicate<J>,
    {
        let kept = self.passing_positions(jets, sink)?;
        Ok(kept.into_iter().map(|position| &jets[position]).collect())
    }

    /// Replace `jets` with its survivors. On error `jets` is left untouched.
    pub fn execute<J>(&self, jets: &mut Vec<J>) -> Result<(), SelectError>
    where
        P: Predicate<J>,
    {
        self.execute_with(jets, &mut NoDiagnostics)
    }

    /// [`execute`](Self::execute), reporting each survivor to `sink`.
    pub fn execute_with<J>(
        &self,
        jets: &mut Vec<J>,
        sink: &mut dyn DiagnosticSink<J>,
    ) -> Result<(), SelectError>
    where
        P: Predicate<J>,
    {
        let mut kept = self.passing_positions(jets, sink)?.into_iter().peekable();
        let mut position = 0;
        jets.retain(|_| {
            let keep = kept.next_if_eq(&position).is_some();
            position += 1;
            keep
        });
        Ok(())
    }

    /// Single pass over `jets`. Stops scanning once the cap is reached.
    fn passing_positions<J>(
        &self,
        jets: &[J],
        sink: &mut dyn DiagnosticSink<J>,
    ) -> Result<Vec<usize>, SelectError>
    where
        P: Predicate<J>,
    {
        let mut kept = Vec::new();
        for (position, jet) in jets.iter().enumerate() {
            if self.limit.is_some_and(|n| kept.len() >= n) {
                break;
            }
            if self.predicate.evaluate(jet).map_err(|e| e.at(position))? {
                sink.jet_passed(&self.name, position, jet);
                kept.push(position);
            }
        }
        trace!("{}: kept {} of {} jets", self.name, kept.len(), jets.len());
        Ok(kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jet::model::Jet;
    use crate::jet::moments::MomentMap;

    #[derive(Default)]
    struct Recorder {
        seen: Vec<(String, usize)>,
    }

    impl DiagnosticSink<Jet> for Recorder {
        fn jet_passed(&mut self, selector: &str, position: usize, _jet: &Jet) {
            self.seen.push((selector.to_string(), position));
        }
    }

    fn event() -> Vec<Jet> {
        vec![
            Jet::new(0, 120.0, 150.0, 0.3, 12.0),
            Jet::new(1, 15.0, 400.0, 3.1, 2.0),
            Jet::new(2, 80.0, 95.0, -1.7, 9.0),
            Jet::new(3, 25.0, 30.0, 2.4, 3.0),
            Jet::new(4, 55.0, 70.0, -4.0, 6.0),
        ]
    }

    fn indices(jets: &[&Jet]) -> Vec<usize> {
        jets.iter().map(|j| j.index).collect()
    }

    #[test]
    fn default_names() {
        assert_eq!(Selector::new("keep").name(), "keep");
        assert_eq!(Selector::pt(10.0).name(), "JetPtSelector");
        assert_eq!(Selector::pt_or_e(1.0, 2.0).name(), "JetPtORESelector");
        assert_eq!(Selector::eta_central(2.5).name(), "JetEtaCentralSelector");
        assert_eq!(Selector::eta_forward(2.5).name(), "JetEtaForwardSelector");
        assert_eq!(Selector::mass(1.0).name(), "JetMassSelector");
        assert_eq!(Selector::pdg_ids([1]).name(), "JetInputPdgIdSelector");
        assert_eq!(Selector::pt(10.0).named("leading").name(), "leading");
    }

    #[test]
    fn pass_through_keeps_all() {
        let jets = event();
        let kept = Selector::new("all").select(&jets).unwrap();
        assert_eq!(indices(&kept), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn select_preserves_order() {
        let jets = event();
        let kept = Selector::pt(50.0).select(&jets).unwrap();
        assert_eq!(indices(&kept), vec![0, 2, 4]);
    }

    #[test]
    fn limit_keeps_first_survivors() {
        let jets = event();
        let kept = Selector::pt(20.0).with_limit(2).select(&jets).unwrap();
        assert_eq!(indices(&kept), vec![0, 2]);

        let none = Selector::pt(20.0).with_limit(0).select(&jets).unwrap();
        assert!(none.is_empty());

        let all = Selector::pt(20.0).with_limit(-1).select(&jets).unwrap();
        assert_eq!(indices(&all), vec![0, 2, 3, 4]);
    }

    #[test]
    fn limit_larger_than_survivors() {
        let jets = event();
        let kept = Selector::pt(50.0).with_limit(10).select(&jets).unwrap();
        assert_eq!(indices(&kept), vec![0, 2, 4]);
    }

    #[test]
    fn execute_filters_in_place() {
        let mut jets = event();
        Selector::eta_central(2.5).execute(&mut jets).unwrap();
        let kept: Vec<usize> = jets.iter().map(|j| j.index).collect();
        assert_eq!(kept, vec![0, 2, 3]);
    }

    #[test]
    fn execute_on_references() {
        let owned = event();
        let mut jets: Vec<&Jet> = owned.iter().collect();
        Selector::eta_forward(2.5).with_limit(1).execute(&mut jets).unwrap();
        assert_eq!(indices(&jets), vec![1]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let jets = event();
        let selector = Selector::pt_or_e(50.0, 300.0);
        let once: Vec<Jet> = selector.select(&jets).unwrap().into_iter().copied().collect();
        let twice: Vec<Jet> = selector.select(&once).unwrap().into_iter().copied().collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn diagnostics_report_only_survivors_before_cap() {
        let jets = event();
        let mut sink = Recorder::default();
        let kept = Selector::pt(20.0)
            .with_limit(2)
            .select_with(&jets, &mut sink)
            .unwrap();

        assert_eq!(kept.len(), 2);
        assert_eq!(
            sink.seen,
            vec![
                ("JetPtSelector".to_string(), 0),
                ("JetPtSelector".to_string(), 2)
            ]
        );
    }

    #[test]
    fn reconfiguration_returns_new_selector() {
        let base = Selector::pt(20.0).with_limit(3);
        let tighter = base.clone().with_cut(100.0);

        assert_eq!(base.predicate(), &Cut::Pt { pt_min: 20.0 });
        assert_eq!(tighter.predicate(), &Cut::Pt { pt_min: 100.0 });
        assert_eq!(tighter.limit(), Some(3));

        let window = Selector::mass(5.0).with_cut2(10.0);
        assert_eq!(window.predicate(), &Cut::mass_window(5.0, 10.0));

        let ids = Selector::pdg_ids([11]).with_ids([13, 15]);
        assert_eq!(ids.predicate(), &Cut::pdg_ids([13, 15]));
        assert_eq!(Selector::pt(1.0).with_ids([1]).predicate(), &Cut::Pt { pt_min: 1.0 });
    }

    #[test]
    fn moment_lookup_failure_aborts_and_leaves_collection() {
        let mut map = MomentMap::new();
        map.set("width", 0, 0.1f32).unwrap();
        map.set("width", 2, 0.3f32).unwrap();

        let mut jets = event();
        let selector = Selector::moment(&map, "width", 0.0f32, 0.2f32).unwrap();
        let err = selector.execute(&mut jets).unwrap_err();

        assert_eq!(
            err,
            SelectError::MissingMoment {
                key: "width".into(),
                position: Some(1)
            }
        );
        assert_eq!(jets.len(), 5);
    }

    #[test]
    fn moment_selector_filters() {
        let mut map = MomentMap::new();
        for (index, ntrk) in [4i64, 12, 7, 1, 9].into_iter().enumerate() {
            map.set("ntrk", index, ntrk).unwrap();
        }

        let jets = event();
        let selector = Selector::moment(&map, "ntrk", 4i64, 9i64).unwrap();
        assert_eq!(selector.name(), "JetMomentSelector");
        let kept = selector.select(&jets).unwrap();
        assert_eq!(indices(&kept), vec![0, 2, 4]);
    }
}
