//! Eligma shop simulation for funding star promotions.
use crate::plan::EligmaInfo;
use crate::tables::EligmaPricing;

/// Eligma spent to buy `deficit` eleph.
///
/// Eleph is bought in batches at the current unit price; the price rises by
/// one after every batch and never exceeds `pricing.max_price`. When
/// `info.stock` names a partially consumed batch, the first batch is that size.
/// Once the price reaches the cap the rest is charged in one step.
#[must_use]
pub fn eligma_cost(deficit: u64, info: &EligmaInfo, pricing: &EligmaPricing) -> u64 {
    let batch_size = pricing.batch_size.max(1);
    let mut price = info.price.min(pricing.max_price);
    let mut batch = match info.stock {
        Some(stock) if stock > 0 => u64::from(stock).min(batch_size),
        _ => batch_size,
    };

    let mut remaining = deficit;
    let mut total = 0u64;
    while remaining > 0 {
        if price == pricing.max_price {
            return total.saturating_add(remaining.saturating_mul(u64::from(price)));
        }
        let bought = remaining.min(batch);
        total = total.saturating_add(bought.saturating_mul(u64::from(price)));
        remaining -= bought;
        price = price.saturating_add(1).min(pricing.max_price);
        batch = batch_size;
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(price: u32, stock: Option<u32>) -> EligmaInfo {
        EligmaInfo { price, stock }
    }

    #[test]
    fn single_partial_batch_uses_current_price() {
        assert_eq!(eligma_cost(15, &info(1, None), &EligmaPricing::default()), 15);
    }

    #[test]
    fn price_escalates_per_batch_and_caps() {
        // 20@1 + 20@2 + 20@3 + 20@4 + 20@5 + 20@5
        let cost = eligma_cost(120, &info(1, None), &EligmaPricing::default());
        assert_eq!(cost, 20 + 40 + 60 + 80 + 100 + 100);
    }

    #[test]
    fn starting_price_is_capped() {
        assert_eq!(eligma_cost(10, &info(9, None), &EligmaPricing::default()), 50);
    }

    #[test]
    fn remaining_stock_shortens_first_batch() {
        // 5@3, then 20@4, then 5@5
        let cost = eligma_cost(30, &info(3, Some(5)), &EligmaPricing::default());
        assert_eq!(cost, 15 + 80 + 25);
    }

    #[test]
    fn huge_deficit_is_charged_at_capped_price() {
        // 20@1 + 20@2 + 20@3 + 20@4, then everything else @5
        let deficit = u64::from(u32::MAX);
        let cost = eligma_cost(deficit, &info(1, None), &EligmaPricing::default());
        assert_eq!(cost, 20 + 40 + 60 + 80 + (deficit - 80) * 5);
    }

    #[test]
    fn zero_deficit_costs_nothing() {
        assert_eq!(eligma_cost(0, &info(4, Some(3)), &EligmaPricing::default()), 0);
    }

    #[test]
    fn zero_batch_size_still_terminates() {
        let pricing = EligmaPricing {
            batch_size: 0,
            max_price: 2,
        };
        assert_eq!(eligma_cost(3, &info(1, None), &pricing), 1 + 2 + 2);
    }
}
