//! Deal cost breakdown by category: acquisition, rehab, holding, selling.
//!
//! Monthly carry comes from the quick-estimate heuristic unless the caller
//! supplies the property's itemized monthly figures (taxes, insurance,
//! utilities, HOA), in which case the itemized sum is used instead.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::carry;
use crate::error::DeedAnalyticsError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Ratio};
use crate::DeedAnalyticsResult;

const HUNDRED: Decimal = dec!(100);

// ---------------------------------------------------------------------------
// Input / Output
// ---------------------------------------------------------------------------

/// Itemized monthly ownership costs held per property elsewhere in the
/// system. All amounts are per month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemizedMonthlyCosts {
    pub property_taxes: Money,
    pub insurance: Money,
    pub utilities: Money,
    pub hoa_dues: Money,
}

impl ItemizedMonthlyCosts {
    fn total(&self) -> Money {
        self.property_taxes + self.insurance + self.utilities + self.hoa_dues
    }
}

/// Input for the deal cost breakdown.
///
/// Percent fields are plain percentages (3 = 3%).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostBreakdownInput {
    /// Acquisition price before closing costs
    pub purchase_price: Money,
    /// Projected resale price (sizes selling costs)
    pub after_repair_value: Money,
    /// Planned renovation spend
    pub rehab_budget: Money,
    /// Planned ownership duration before sale, in whole months
    pub holding_period_months: u32,
    /// Whether a loan funds part of the purchase
    pub use_financing: bool,
    /// Cash fraction of purchase price when financed, in [0, 100]
    pub down_payment_percent: Percent,
    /// Nominal annual loan interest rate
    pub annual_interest_rate_percent: Percent,
    /// Acquisition closing costs as a fraction of purchase price
    pub closing_cost_percent: Percent,
    /// Selling costs as a fraction of resale value
    pub selling_cost_percent: Percent,
    /// Itemized monthly costs; replaces the heuristic carry when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_costs: Option<ItemizedMonthlyCosts>,
}

/// Where the monthly carry figure came from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum CarrySource {
    /// 1.5%/year of purchase price plus flat monthly costs
    Heuristic,
    /// Sum of the property's itemized monthly figures
    Itemized,
}

/// One cost category with its share of the total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostLineItem {
    pub category: String,
    pub amount: Money,
    pub share_of_total: Ratio,
}

/// Deal costs itemized by category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostBreakdownOutput {
    /// Purchase price + closing costs
    pub acquisition_costs: Money,
    pub closing_costs: Money,
    pub rehab_costs: Money,
    /// Monthly carry over the hold plus interest
    pub holding_costs: Money,
    pub interest_costs: Money,
    pub selling_costs: Money,
    pub total_cost: Money,
    /// Monthly carry figure used for the holding category
    pub monthly_carry: Money,
    pub carry_source: CarrySource,
    /// Total cost spread over the holding period
    pub cost_per_month_held: Money,
    /// Category list for charting, ordered acquisition/rehab/holding/selling
    pub line_items: Vec<CostLineItem>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Break a deal's projected spend into the dashboard's cost categories.
pub fn break_down_costs(
    input: &CostBreakdownInput,
) -> DeedAnalyticsResult<ComputationOutput<CostBreakdownOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input)?;

    let closing_costs = input.purchase_price * input.closing_cost_percent / HUNDRED;
    let acquisition_costs = input.purchase_price + closing_costs;

    let interest_costs = if input.use_financing {
        let down_fraction = input.down_payment_percent / HUNDRED;
        let loan = input.purchase_price * (Decimal::ONE - down_fraction);
        carry::simple_interest(
            loan,
            input.annual_interest_rate_percent,
            input.holding_period_months,
        )
    } else {
        Decimal::ZERO
    };

    let (monthly_carry, carry_source) = match &input.monthly_costs {
        Some(itemized) => {
            let total = itemized.total();
            if total.is_zero() {
                warnings.push(
                    "Itemized monthly costs sum to zero; carry excludes recurring ownership costs"
                        .into(),
                );
            }
            (total, CarrySource::Itemized)
        }
        None => (
            carry::monthly_carry_estimate(input.purchase_price),
            CarrySource::Heuristic,
        ),
    };

    let months = Decimal::from(input.holding_period_months);
    let holding_costs = monthly_carry * months + interest_costs;
    let selling_costs = input.after_repair_value * input.selling_cost_percent / HUNDRED;

    let total_cost = acquisition_costs + input.rehab_budget + holding_costs + selling_costs;
    if total_cost.is_zero() {
        return Err(DeedAnalyticsError::InsufficientData(
            "All cost categories are zero; nothing to break down".into(),
        ));
    }

    let cost_per_month_held = total_cost / months;

    let line_items = vec![
        line_item("Acquisition", acquisition_costs, total_cost),
        line_item("Rehab", input.rehab_budget, total_cost),
        line_item("Holding", holding_costs, total_cost),
        line_item("Selling", selling_costs, total_cost),
    ];

    let output = CostBreakdownOutput {
        acquisition_costs,
        closing_costs,
        rehab_costs: input.rehab_budget,
        holding_costs,
        interest_costs,
        selling_costs,
        total_cost,
        monthly_carry,
        carry_source,
        cost_per_month_held,
        line_items,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Deal Cost Breakdown",
        input,
        warnings,
        elapsed,
        output,
    ))
}

fn line_item(category: &str, amount: Money, total: Money) -> CostLineItem {
    CostLineItem {
        category: category.into(),
        amount,
        share_of_total: amount / total,
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(input: &CostBreakdownInput) -> DeedAnalyticsResult<()> {
    if input.holding_period_months == 0 {
        return Err(DeedAnalyticsError::InvalidInput {
            field: "holding_period_months".into(),
            reason: "Holding period must be at least 1 month".into(),
        });
    }

    let non_negative = [
        ("purchase_price", input.purchase_price),
        ("after_repair_value", input.after_repair_value),
        ("rehab_budget", input.rehab_budget),
        (
            "annual_interest_rate_percent",
            input.annual_interest_rate_percent,
        ),
        ("closing_cost_percent", input.closing_cost_percent),
        ("selling_cost_percent", input.selling_cost_percent),
    ];
    for (field, value) in non_negative {
        if value < Decimal::ZERO {
            return Err(DeedAnalyticsError::InvalidInput {
                field: field.into(),
                reason: "Value cannot be negative".into(),
            });
        }
    }

    if input.down_payment_percent < Decimal::ZERO || input.down_payment_percent > HUNDRED {
        return Err(DeedAnalyticsError::InvalidInput {
            field: "down_payment_percent".into(),
            reason: "Down payment must be between 0 and 100 percent".into(),
        });
    }

    if let Some(itemized) = &input.monthly_costs {
        let fields = [
            ("monthly_costs.property_taxes", itemized.property_taxes),
            ("monthly_costs.insurance", itemized.insurance),
            ("monthly_costs.utilities", itemized.utilities),
            ("monthly_costs.hoa_dues", itemized.hoa_dues),
        ];
        for (field, value) in fields {
            if value < Decimal::ZERO {
                return Err(DeedAnalyticsError::InvalidInput {
                    field: field.into(),
                    reason: "Value cannot be negative".into(),
                });
            }
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
