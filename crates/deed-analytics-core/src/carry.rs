//! Carrying-cost and return-scaling math shared by the analysis modules.
//!
//! The monthly carry estimate is a deliberate quick-estimate heuristic:
//! 1.5%/year of purchase price (taxes, insurance, upkeep) plus a flat
//! $200/month for utilities and incidentals. It is not reconciled against
//! itemized per-property figures; callers that hold itemized costs pass
//! them in themselves.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::DeedAnalyticsError;
use crate::types::{Money, Percent, Rate};
use crate::DeedAnalyticsResult;

/// Annual recurring ownership cost as a fraction of purchase price.
pub const ANNUAL_CARRY_RATE: Decimal = dec!(0.015);

/// Flat monthly add-on for utilities and incidentals.
pub const MONTHLY_FIXED_COSTS: Decimal = dec!(200);

const MONTHS_PER_YEAR: Decimal = dec!(12);
const HUNDRED: Decimal = dec!(100);

/// Estimated monthly carrying cost for a property at the given purchase price.
pub fn monthly_carry_estimate(purchase_price: Money) -> Money {
    purchase_price * ANNUAL_CARRY_RATE / MONTHS_PER_YEAR + MONTHLY_FIXED_COSTS
}

/// Non-amortizing interest carry: principal held at a nominal annual rate
/// for a number of months. Rate is a plain percentage (12 = 12%/year).
pub fn simple_interest(principal: Money, annual_rate_percent: Percent, months: u32) -> Money {
    let monthly_rate: Rate = annual_rate_percent / HUNDRED / MONTHS_PER_YEAR;
    principal * monthly_rate * Decimal::from(months)
}

/// Annualize a holding-period return by compounding:
/// ((1 + r)^(12/months) - 1) * 100, with r the period return fraction.
///
/// Returns `Ok(None)` when the compounding base (1 + r) is not positive:
/// a total loss beyond the cash invested has no defined annualized rate.
pub fn annualize_return(
    period_return_percent: Percent,
    holding_months: u32,
) -> DeedAnalyticsResult<Option<Percent>> {
    if holding_months == 0 {
        return Err(DeedAnalyticsError::InvalidInput {
            field: "holding_months".into(),
            reason: "Annualization requires at least one month".into(),
        });
    }

    let base = Decimal::ONE + period_return_percent / HUNDRED;
    if base <= Decimal::ZERO {
        return Ok(None);
    }

    let exponent = MONTHS_PER_YEAR / Decimal::from(holding_months);
    let annualized = (base.powd(exponent) - Decimal::ONE) * HUNDRED;
    Ok(Some(annualized))
}
