use log::debug;

use crate::jet::model::JetLike;

/// Receives one record per jet a selector keeps.
///
/// Sinks observe; they never influence the verdict.
pub trait DiagnosticSink<J: ?Sized> {
    fn jet_passed(&mut self, selector: &str, position: usize, jet: &J);
}

/// Discards every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDiagnostics;

impl<J: ?Sized> DiagnosticSink<J> for NoDiagnostics {
    fn jet_passed(&mut self, _selector: &str, _position: usize, _jet: &J) {}
}

/// Writes each passing jet's kinematics at `debug` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl<J: JetLike + ?Sized> DiagnosticSink<J> for LogSink {
    fn jet_passed(&mut self, selector: &str, position: usize, jet: &J) {
        debug!(
            "{selector}: jet {position} passed (pt={:.3} e={:.3} eta={:.3} m={:.3} id={})",
            jet.momentum(),
            jet.energy(),
            jet.pseudorapidity(),
            jet.mass(),
            jet.identifier()
        );
    }
}
