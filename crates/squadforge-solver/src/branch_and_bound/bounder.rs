//! Search layout and optimistic bounds for branch-and-bound pruning.
//!
//! The bounder estimates the best objective any completion of a partial
//! assignment can reach. It also detects partial assignments that cannot be
//! completed at all, which prunes infeasible branches early.

use crate::model::{AssignmentModel, ModelConstraint};
use crate::optimizer::SolveError;

use super::Partial;

/// Tolerance for objective comparisons and budget checks.
pub(super) const EPS: f64 = 1e-9;

/// A linear budget over assigned candidates.
#[derive(Debug, Clone)]
pub(super) struct Budget {
    pub weights: Vec<f64>,
    pub limit: f64,
}

/// The model in search-friendly form.
#[derive(Debug, Clone)]
pub(super) struct Layout {
    /// `[candidate][slot]` objective coefficients.
    pub coefficients: Vec<Vec<Option<f64>>>,
    pub slot_min: Vec<usize>,
    pub slot_max: Vec<usize>,
    pub total_min: usize,
    pub budgets: Vec<Budget>,
    /// Decision order: candidates with at least one slot, best coefficient first.
    pub order: Vec<usize>,
    /// Per candidate, the slots it may take, best coefficient first.
    pub options: Vec<Vec<usize>>,
}

impl Layout {
    pub fn from_model(model: &AssignmentModel) -> Result<Self, SolveError> {
        let slot_count = model.slot_count();
        let candidate_count = model.candidate_count();

        let mut exclusive = false;
        let mut slot_min = vec![0; slot_count];
        let mut slot_max = vec![usize::MAX; slot_count];
        let mut total_min = 0;
        let mut budgets = Vec::new();

        for constraint in model.constraints() {
            match constraint {
                ModelConstraint::ExclusiveCandidates => exclusive = true,
                ModelConstraint::SlotCount { slot, min, max } => {
                    if *slot >= slot_count {
                        return Err(SolveError::Unsupported(format!(
                            "slot {} out of range for {} slots",
                            slot, slot_count
                        )));
                    }
                    slot_min[*slot] = slot_min[*slot].max(*min);
                    slot_max[*slot] = slot_max[*slot].min(*max);
                }
                ModelConstraint::TotalAtLeast { min } => total_min = total_min.max(*min),
                ModelConstraint::WeightBudget {
                    name,
                    weights,
                    limit,
                } => {
                    if weights.len() != candidate_count {
                        return Err(SolveError::Unsupported(format!(
                            "budget '{}' has {} weights for {} candidates",
                            name,
                            weights.len(),
                            candidate_count
                        )));
                    }
                    if !limit.is_finite() || weights.iter().any(|w| !w.is_finite()) {
                        return Err(SolveError::Unsupported(format!(
                            "budget '{}' is not finite",
                            name
                        )));
                    }
                    budgets.push(Budget {
                        weights: weights.clone(),
                        limit: *limit,
                    });
                }
            }
        }

        // Several slots per candidate is a different problem shape.
        if !exclusive {
            return Err(SolveError::Unsupported(
                "candidates must be exclusive".to_string(),
            ));
        }

        let mut coefficients = Vec::with_capacity(candidate_count);
        for c in 0..candidate_count {
            let row: Vec<Option<f64>> = (0..slot_count).map(|s| model.coefficient(c, s)).collect();
            if row.iter().flatten().any(|v| !v.is_finite()) {
                return Err(SolveError::Unsupported(format!(
                    "candidate {} has a non-finite coefficient",
                    c
                )));
            }
            coefficients.push(row);
        }

        let options: Vec<Vec<usize>> = coefficients
            .iter()
            .map(|row| {
                let mut slots: Vec<usize> = (0..slot_count).filter(|&s| row[s].is_some()).collect();
                slots.sort_by(|&a, &b| coef(row, b).total_cmp(&coef(row, a)));
                slots
            })
            .collect();

        let best = |c: usize| {
            options[c]
                .first()
                .map_or(f64::NEG_INFINITY, |&s| coef(&coefficients[c], s))
        };
        let mut order: Vec<usize> = (0..candidate_count)
            .filter(|&c| !options[c].is_empty())
            .collect();
        order.sort_by(|&a, &b| best(b).total_cmp(&best(a)));

        Ok(Self {
            coefficients,
            slot_min,
            slot_max,
            total_min,
            budgets,
            order,
            options,
        })
    }

    pub fn candidate_count(&self) -> usize {
        self.coefficients.len()
    }

    pub fn slot_count(&self) -> usize {
        self.slot_min.len()
    }

    pub fn coefficient(&self, candidate: usize, slot: usize) -> f64 {
        coef(&self.coefficients[candidate], slot)
    }

    /// First slot whose minimum exceeds its maximum.
    pub fn contradictory_slot(&self) -> Option<usize> {
        (0..self.slot_count()).find(|&s| self.slot_min[s] > self.slot_max[s])
    }
}

fn coef(row: &[Option<f64>], slot: usize) -> f64 {
    row[slot].unwrap_or(f64::NEG_INFINITY)
}

/// Golden-section steps spent tightening one budget's multiplier.
const MULTIPLIER_STEPS: usize = 10;

const GOLDEN: f64 = 0.618_033_988_749_895;

/// Upper bound on the objective of any feasible completion of `partial`
/// that only assigns candidates from `remaining`.
///
/// Returns `None` when no feasible completion exists. At a leaf (no
/// remaining candidates) `Some` therefore means the partial assignment is
/// itself feasible, and the bound equals its objective.
///
/// Budgets are priced into the objective (Lagrangian relaxation). Pricing
/// stops early once the bound drops to `cutoff`, since the branch is pruned
/// either way.
pub(super) fn optimistic_bound(
    layout: &Layout,
    partial: &Partial,
    remaining: &[usize],
    cutoff: Option<f64>,
) -> Option<f64> {
    // Per slot: enough eligible candidates left.
    let mut slot_need = 0usize;
    let mut capacity = 0usize;
    for s in 0..layout.slot_count() {
        let open = layout.slot_max[s].saturating_sub(partial.counts[s]);
        let need = layout.slot_min[s].saturating_sub(partial.counts[s]);
        let eligible = remaining
            .iter()
            .filter(|&&c| layout.coefficients[c][s].is_some())
            .count();
        if eligible < need {
            return None;
        }
        slot_need += need;
        capacity = capacity.saturating_add(open.min(eligible));
    }

    let total_need = layout
        .total_min
        .saturating_sub(partial.assigned)
        .max(slot_need);
    if capacity < total_need {
        return None;
    }

    // Per candidate: best coefficient among slots that still have room.
    let open: Vec<(usize, f64)> = remaining
        .iter()
        .filter_map(|&c| {
            layout.options[c]
                .iter()
                .find(|&&s| partial.counts[s] < layout.slot_max[s])
                .map(|&s| (c, layout.coefficient(c, s)))
        })
        .collect();
    if open.len() < total_need {
        return None;
    }

    // Budgets: the cheapest way to add `total_need` more candidates.
    for (budget, used) in layout.budgets.iter().zip(&partial.used) {
        let mut weights: Vec<f64> = open.iter().map(|&(c, _)| budget.weights[c]).collect();
        weights.sort_by(|a, b| a.total_cmp(b));
        let negatives = weights.iter().filter(|w| **w < 0.0).count();
        let least: f64 = weights.iter().take(total_need.max(negatives)).sum();
        if used + least > budget.limit + EPS {
            return None;
        }
    }

    let relaxation = Relaxation {
        layout,
        partial,
        remaining,
        open: &open,
        total_need,
        capacity,
    };
    let mut scratch = Vec::with_capacity(remaining.len());
    let mut gain = relaxation.priced(|_| 0.0, &mut scratch);
    let gain_cutoff = cutoff.map(|c| c - partial.objective);

    for (budget, used) in layout.budgets.iter().zip(&partial.used) {
        if reaches(gain, gain_cutoff) {
            break;
        }
        let room = budget.limit - used;
        gain = gain.min(relaxation.lagrangian(&budget.weights, room, gain_cutoff, &mut scratch));
    }

    Some(partial.objective + gain)
}

fn reaches(gain: f64, cutoff: Option<f64>) -> bool {
    cutoff.is_some_and(|c| gain <= c + EPS)
}

/// What a completion may still add, with slot and candidate structure
/// relaxed separately.
struct Relaxation<'a> {
    layout: &'a Layout,
    partial: &'a Partial,
    remaining: &'a [usize],
    /// Remaining candidates with room in some slot, with their best coefficient there.
    open: &'a [(usize, f64)],
    total_need: usize,
    capacity: usize,
}

impl Relaxation<'_> {
    /// Upper bound on the added objective when each assigned candidate `c`
    /// also costs `price(c)`.
    ///
    /// Slot view: every slot takes its best candidates, sharing allowed.
    /// Candidate view: the best `total_need..=capacity` candidates each take
    /// their best open slot. Both overestimate, so the smaller one holds.
    fn priced(&self, price: impl Fn(usize) -> f64, scratch: &mut Vec<f64>) -> f64 {
        let layout = self.layout;

        let mut slot_bound = 0.0;
        for s in 0..layout.slot_count() {
            let open = layout.slot_max[s].saturating_sub(self.partial.counts[s]);
            if open == 0 {
                continue;
            }
            let need = layout.slot_min[s].saturating_sub(self.partial.counts[s]);
            scratch.clear();
            scratch.extend(
                self.remaining
                    .iter()
                    .filter_map(|&c| layout.coefficients[c][s].map(|v| v - price(c))),
            );
            slot_bound += best_sum(scratch, need, open);
        }

        scratch.clear();
        scratch.extend(self.open.iter().map(|&(c, v)| v - price(c)));
        let candidate_bound = best_sum(scratch, self.total_need, self.capacity);

        slot_bound.min(candidate_bound)
    }

    /// Tightest added-objective bound found for one budget with `room`
    /// weight left.
    ///
    /// Any multiplier `lambda >= 0` gives the bound
    /// `lambda * room + priced(lambda * weight)`. The function is searched
    /// by golden section; every evaluated point is a valid bound, so the
    /// search only has to be good, not exact.
    fn lagrangian(
        &self,
        weights: &[f64],
        room: f64,
        cutoff: Option<f64>,
        scratch: &mut Vec<f64>,
    ) -> f64 {
        let mut sorted: Vec<f64> = self.open.iter().map(|&(c, _)| weights[c]).collect();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let gap = sorted
            .windows(2)
            .map(|pair| pair[1] - pair[0])
            .filter(|d| *d > EPS)
            .fold(f64::INFINITY, f64::min);
        let gap = if gap.is_finite() { gap } else { 1.0 };

        let (low, high) = self
            .open
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(_, v)| {
                (lo.min(v), hi.max(v))
            });
        let span = if high >= low { high - low } else { 0.0 };

        let mut evaluate =
            |lambda: f64| lambda * room + self.priced(|c| lambda * weights[c], &mut *scratch);

        // Past a value spread per weight step the candidate order stops changing.
        let (mut lo, mut hi) = (0.0, (span + 1.0) / gap);
        let mut x1 = hi - GOLDEN * (hi - lo);
        let mut x2 = lo + GOLDEN * (hi - lo);
        let mut f1 = evaluate(x1);
        let mut f2 = evaluate(x2);
        let mut best = f1.min(f2);

        for _ in 0..MULTIPLIER_STEPS {
            if reaches(best, cutoff) {
                break;
            }
            if f1 <= f2 {
                hi = x2;
                x2 = x1;
                f2 = f1;
                x1 = hi - GOLDEN * (hi - lo);
                f1 = evaluate(x1);
                best = best.min(f1);
            } else {
                lo = x1;
                x1 = x2;
                f1 = f2;
                x2 = lo + GOLDEN * (hi - lo);
                f2 = evaluate(x2);
                best = best.min(f2);
            }
        }
        best
    }
}

/// Sum of the `need` largest values plus any further positive ones, at
/// most `take` values in all.
fn best_sum(values: &mut [f64], need: usize, take: usize) -> f64 {
    values.sort_by(|a, b| b.total_cmp(a));
    values
        .iter()
        .take(take)
        .enumerate()
        .filter(|&(i, v)| i < need || *v > 0.0)
        .map(|(_, v)| v)
        .sum()
}
