use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::error::{MinVerError, Result};
use crate::resolver::Candidate;

/// Pick the candidate with the highest version
///
/// Among candidates with equal versions the one discovered first wins.
/// The losers are reported in ascending version order before the winner.
pub fn select(candidates: Vec<Candidate>, sink: &mut dyn DiagnosticSink) -> Result<Candidate> {
    let mut ordered = candidates;
    // sort_by is stable, so equal versions keep discovery order
    ordered.sort_by(|a, b| a.version.cmp(&b.version));

    let highest = ordered
        .last()
        .map(|candidate| candidate.version.clone())
        .ok_or_else(|| MinVerError::invariant("no candidates found while walking history"))?;

    let index = ordered
        .iter()
        .position(|candidate| candidate.version == highest)
        .unwrap_or(ordered.len() - 1);
    let selected = ordered.remove(index);

    for candidate in ordered {
        sink.emit(Diagnostic::Ignoring(candidate));
    }
    sink.emit(Diagnostic::Using(selected.clone()));

    Ok(selected)
}
