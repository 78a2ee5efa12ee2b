//! Evidence aggregation
//!
//! Folds any number of weighted outcomes into the two scalars the rest of the
//! update needs: the evidence-only variance `v` and the shift estimate `delta`.

use crate::rating::weighting::Evidence;

/// Aggregated evidence for one update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aggregate {
    /// Estimated variance of performance based on expected outcomes only
    pub v: f64,
    /// Estimated improvement in strength, `v * improvement`
    pub delta: f64,
    /// Sum of `g * (score - e)` over all outcomes
    pub improvement: f64,
}

/// Aggregate a batch of evidence.
///
/// Returns `None` for an empty batch, or when the games carry no weight at all
/// (every opponent infinitely uncertain). There is no variance to estimate
/// then, and the caller must take the no-match path instead.
pub fn aggregate(evidence: &[Evidence]) -> Option<Aggregate> {
    if evidence.is_empty() {
        return None;
    }

    let (v_inv, improvement) = evidence.iter().fold((0.0, 0.0), |(v_inv, imp), ev| {
        (
            v_inv + ev.g() * ev.g() * ev.e() * (1.0 - ev.e()),
            imp + ev.g() * (ev.score() - ev.e()),
        )
    });

    if !(v_inv > 0.0 && v_inv.is_finite()) {
        return None;
    }

    let v = 1.0 / v_inv;
    Some(Aggregate {
        v,
        delta: v * improvement,
        improvement,
    })
}
