//! Fix-and-flip return analysis for tax-deed acquisitions.
//!
//! Maps a deal's acquisition assumptions to the dashboard's return metrics:
//! total investment, cash required, ROI, annualized ROI, profit margin,
//! price-to-ARV ratio, break-even price, and the 70%-rule maximum offer.
//!
//! All arithmetic uses `rust_decimal::Decimal`. No `f64`.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::carry;
use crate::error::DeedAnalyticsError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Ratio};
use crate::DeedAnalyticsResult;

/// Maximum offer heuristic: 70% of ARV less rehab.
pub const SEVENTY_PERCENT_RULE: Decimal = dec!(0.7);

const HUNDRED: Decimal = dec!(100);

// ---------------------------------------------------------------------------
// Input / Output
// ---------------------------------------------------------------------------

/// Deal assumptions for a fix-and-flip analysis.
///
/// Percent fields are plain percentages (12 = 12%).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlipAnalysisInput {
    /// Acquisition price before closing costs
    pub purchase_price: Money,
    /// Projected resale price once renovation is complete
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
    /// Selling costs (commission etc.) as a fraction of resale value
    pub selling_cost_percent: Percent,
}

impl Default for FlipAnalysisInput {
    /// The dashboard's form defaults for a new deal.
    fn default() -> Self {
        FlipAnalysisInput {
            purchase_price: Decimal::ZERO,
            after_repair_value: Decimal::ZERO,
            rehab_budget: Decimal::ZERO,
            holding_period_months: 6,
            use_financing: false,
            down_payment_percent: dec!(25),
            annual_interest_rate_percent: dec!(12),
            closing_cost_percent: dec!(3),
            selling_cost_percent: dec!(8),
        }
    }
}

/// Derived return metrics for a fix-and-flip deal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlipReturnsOutput {
    /// Acquisition + rehab + holding + selling costs
    pub total_investment: Money,
    /// Cash the investor must bring to the deal
    pub cash_required: Money,
    /// ARV - purchase - rehab
    pub gross_profit: Money,
    /// ARV - total investment
    pub net_profit: Money,
    /// Net profit over cash required
    pub roi_percent: Percent,
    /// ROI compounded to a 12-month rate; undefined when losses
    /// exceed the cash invested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annualized_roi_percent: Option<Percent>,
    /// Return on actual cash outlay. Currently identical to `roi_percent`
    /// whether or not financing is used.
    pub cash_on_cash_percent: Percent,
    /// Net profit over total investment
    pub profit_margin_percent: Percent,
    /// Purchase price over ARV
    pub price_to_arv_ratio: Ratio,
    /// Resale price at which net profit is zero. Approximate: selling
    /// costs inside total investment are sized from ARV, not from the
    /// break-even price itself.
    pub break_even_price: Money,
    /// 70% of ARV less rehab budget
    pub max_offer_70_percent_rule: Money,
    /// Acquisition closing costs
    pub closing_costs: Money,
    /// Loan principal when financed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_amount: Option<Money>,
    /// Interest carry over the holding period
    pub interest_costs: Money,
    /// Estimated monthly carrying cost (taxes, insurance, utilities)
    pub monthly_holding_cost: Money,
    /// Monthly carry over the holding period plus interest
    pub total_holding_costs: Money,
    /// Selling costs at the assumed resale value
    pub selling_costs: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Analyze fix-and-flip returns for a deal.
///
/// Returns a `ComputationOutput<FlipReturnsOutput>` with the derived
/// metrics, advisory warnings for marginal deals, and computation metadata.
/// Degenerate inputs (zero holding period, zero ARV, zero cash basis)
/// produce typed errors rather than NaN/Infinity metrics.
pub fn analyze_flip(
    input: &FlipAnalysisInput,
) -> DeedAnalyticsResult<ComputationOutput<FlipReturnsOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input)?;

    // --- Acquisition ---
    let closing_costs = input.purchase_price * input.closing_cost_percent / HUNDRED;
    let total_acquisition = input.purchase_price + closing_costs;

    // --- Financing ---
    let (loan_amount, interest_costs, cash_required) = if input.use_financing {
        let down_fraction = input.down_payment_percent / HUNDRED;
        let loan = input.purchase_price * (Decimal::ONE - down_fraction);
        let interest = carry::simple_interest(
            loan,
            input.annual_interest_rate_percent,
            input.holding_period_months,
        );
        let cash = input.purchase_price * down_fraction + closing_costs + input.rehab_budget;
        (Some(loan), interest, cash)
    } else {
        (None, Decimal::ZERO, total_acquisition + input.rehab_budget)
    };

    if cash_required.is_zero() {
        return Err(DeedAnalyticsError::InsufficientData(
            "Cash required is zero; return ratios need a non-zero cash basis".into(),
        ));
    }

    // --- Holding ---
    let monthly_holding_cost = carry::monthly_carry_estimate(input.purchase_price);
    let total_holding_costs =
        monthly_holding_cost * Decimal::from(input.holding_period_months) + interest_costs;

    // --- Disposition ---
    let selling_costs = input.after_repair_value * input.selling_cost_percent / HUNDRED;

    // --- Profit ---
    let total_investment =
        total_acquisition + input.rehab_budget + total_holding_costs + selling_costs;
    let gross_profit = input.after_repair_value - input.purchase_price - input.rehab_budget;
    let net_profit = input.after_repair_value - total_investment;

    // --- Return ratios ---
    let roi_percent = net_profit / cash_required * HUNDRED;

    let annualized_roi_percent =
        carry::annualize_return(roi_percent, input.holding_period_months)?;
    if annualized_roi_percent.is_none() {
        warnings.push("Annualized ROI is undefined: losses exceed the cash invested".into());
    }

    // Mirrors ROI in both the financed and unfinanced case; the leverage
    // already enters through cash_required.
    let cash_on_cash_percent = roi_percent;

    let price_to_arv_ratio = input.purchase_price / input.after_repair_value;

    let profit_margin_percent = if total_investment.is_zero() {
        warnings.push("Total investment is zero; profit margin reported as 0".into());
        Decimal::ZERO
    } else {
        net_profit / total_investment * HUNDRED
    };

    let break_even_price = total_investment;
    let max_offer_70_percent_rule =
        input.after_repair_value * SEVENTY_PERCENT_RULE - input.rehab_budget;

    // --- Advisory warnings ---
    if input.purchase_price > max_offer_70_percent_rule {
        warnings.push(format!(
            "Purchase price {} exceeds the 70%-rule maximum offer of {}",
            input.purchase_price, max_offer_70_percent_rule
        ));
    }
    if net_profit < Decimal::ZERO {
        warnings.push("Deal nets a loss at the assumed resale value".into());
    } else if profit_margin_percent < dec!(10) {
        warnings.push(format!(
            "Profit margin {profit_margin_percent:.1}% is below 10% — little room for overruns"
        ));
    }
    if input.holding_period_months > 24 {
        warnings.push(format!(
            "Holding period of {} months carries extended market exposure",
            input.holding_period_months
        ));
    }
    if input.use_financing && input.down_payment_percent < dec!(10) {
        warnings.push(format!(
            "Down payment of {}% is below 10% — highly leveraged",
            input.down_payment_percent
        ));
    }

    let output = FlipReturnsOutput {
        total_investment,
        cash_required,
        gross_profit,
        net_profit,
        roi_percent,
        annualized_roi_percent,
        cash_on_cash_percent,
        profit_margin_percent,
        price_to_arv_ratio,
        break_even_price,
        max_offer_70_percent_rule,
        closing_costs,
        loan_amount,
        interest_costs,
        monthly_holding_cost,
        total_holding_costs,
        selling_costs,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fix-and-Flip Return Analysis",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(input: &FlipAnalysisInput) -> DeedAnalyticsResult<()> {
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

    if input.after_repair_value.is_zero() {
        return Err(DeedAnalyticsError::InsufficientData(
            "After-repair value is required to size resale proceeds and price ratios".into(),
        ));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
