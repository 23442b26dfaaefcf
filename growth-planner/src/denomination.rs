//! Greedy conversion of an experience total into denominated materials.
use smallvec::SmallVec;

use crate::resources::{Needs, ResourceKey};
use crate::tables::Denomination;

/// Units of each denomination needed to cover an experience total.
pub type Redemption = SmallVec<[(ResourceKey, u64); 4]>;

/// Cover `total` experience with the given denominations.
///
/// Denominations are consumed from the highest value down, each taking as many
/// whole units as fit. A leftover remainder buys one extra unit of the
/// lowest-valued denomination, so the result never falls short and overshoots
/// by less than that unit. Zero-valued denominations are ignored.
#[must_use]
pub fn redeem(total: u64, denominations: &[Denomination]) -> Redemption {
    let mut ordered: SmallVec<[&Denomination; 4]> =
        denominations.iter().filter(|d| d.value > 0).collect();
    ordered.sort_by(|a, b| b.value.cmp(&a.value));

    let mut units = Redemption::new();
    if total == 0 {
        return units;
    }
    let Some(lowest) = ordered.last().map(|d| d.key) else {
        return units;
    };

    let mut remaining = total;
    for denomination in &ordered {
        let count = remaining / denomination.value;
        if count > 0 {
            units.push((denomination.key, count));
            remaining -= count * denomination.value;
        }
    }
    if remaining > 0 {
        match units.iter_mut().find(|(key, _)| *key == lowest) {
            Some((_, count)) => *count += 1,
            None => units.push((lowest, 1)),
        }
    }
    units
}

/// Total experience the redeemed units are worth.
#[must_use]
pub fn redeemed_value(units: &[(ResourceKey, u64)], denominations: &[Denomination]) -> u64 {
    units
        .iter()
        .filter_map(|(key, count)| {
            denominations
                .iter()
                .find(|d| d.key == *key)
                .map(|d| d.value.saturating_mul(*count))
        })
        .sum()
}

/// Redeem `total` and add the units to `needs`.
pub fn add_redeemed(needs: &mut Needs, total: u64, denominations: &[Denomination]) {
    for (key, count) in redeem(total, denominations) {
        needs.add(key, count);
    }
}
