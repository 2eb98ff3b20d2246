use log::debug;
use serde::Serialize;

use crate::stats::{Attribute, PerStat, RawWeights};

/// Percentages derived from [`RawWeights`]. They sum to 100 whenever the raw
/// total is positive and are all zero otherwise. The integer weights they came
/// from are kept so apportioning never depends on floating-point rounding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NormalizedShares {
    shares: PerStat<f64>,
    #[serde(skip)]
    weights: PerStat<u32>,
    #[serde(skip)]
    total: u32,
}

impl NormalizedShares {
    pub fn get(&self, attr: Attribute) -> f64 {
        self.shares[attr]
    }

    pub fn total(&self) -> f64 {
        self.shares.iter().map(|(_, share)| *share).sum()
    }

    pub fn is_zero(&self) -> bool {
        self.total == 0
    }

    pub fn as_stats(&self) -> &PerStat<f64> {
        &self.shares
    }
}

pub fn normalize(weights: &RawWeights) -> NormalizedShares {
    let total = weights.total();
    if total == 0 {
        return NormalizedShares::default();
    }
    NormalizedShares {
        shares: PerStat::from_fn(|attr| weights.get(attr) as f64 / total as f64 * 100.0),
        weights: *weights.as_stats(),
        total,
    }
}

/// Splits `budget` into whole points following `shares` with the
/// largest-remainder method. The result always sums to `budget` unless the
/// budget or every share is zero, in which case it is all zeros.
///
/// Quotas are `budget * weight / total`, kept as an exact quotient and
/// remainder over the common denominator `total`. Remainder ties go to the
/// attribute declared first.
pub fn apportion(budget: u32, shares: &NormalizedShares) -> PerStat<u32> {
    let mut points = PerStat::<u32>::default();
    if budget == 0 || shares.is_zero() {
        return points;
    }

    let total = u64::from(shares.total);
    let mut remainders = [0u64; Attribute::COUNT];
    let mut used: u64 = 0;
    for attr in Attribute::ALL {
        let scaled = u64::from(budget) * u64::from(shares.weights[attr]);
        let whole = scaled / total;
        points[attr] = whole as u32;
        used += whole;
        remainders[attr.index()] = scaled % total;
    }

    // Each floor loses less than one unit, so the deficit is below COUNT.
    let deficit = (u64::from(budget) - used) as usize;
    let mut order = Attribute::ALL;
    // sort_by is stable, so equal remainders stay in declared order.
    order.sort_by(|a, b| remainders[b.index()].cmp(&remainders[a.index()]));
    for attr in order.iter().take(deficit) {
        points[*attr] += 1;
    }

    debug!(
        "apportioned {budget} points as {:?} (deficit {deficit})",
        points.to_array()
    );
    points
}

/// Everything derived from one set of weights and a budget.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Allocation {
    pub raw_total: u32,
    pub shares: NormalizedShares,
    pub points: PerStat<u32>,
}

pub fn allocate(budget: u32, weights: &RawWeights) -> Allocation {
    let shares = normalize(weights);
    let raw_total = weights.total();
    let points = if raw_total > 0 {
        apportion(budget, &shares)
    } else {
        PerStat::default()
    };
    Allocation {
        raw_total,
        shares,
        points,
    }
}
