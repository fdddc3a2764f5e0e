//! Deterministic deal-risk scoring.
//!
//! Five factors, each banded into a severity:
//! 1. **Price to ARV** -- how much of the resale value is paid up front.
//!    0.70 is the dashboard's good-deal threshold.
//! 2. **Profit margin** -- room for overruns at the assumed resale value.
//! 3. **Leverage** -- down-payment thickness when financed.
//! 4. **Market exposure** -- months of price risk before sale.
//! 5. **Rehab scale** -- renovation spend relative to purchase price.
//!
//! Severities sum to a 0-100 score mapped to an overall risk level.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::returns::flip::{self, FlipAnalysisInput};
use crate::types::{with_metadata, ComputationOutput, Ratio};
use crate::DeedAnalyticsResult;

/// Price-to-ARV threshold below which the dashboard flags a good deal.
pub const GOOD_DEAL_PRICE_TO_ARV: Decimal = dec!(0.70);

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Severity of a single risk factor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum RiskSeverity {
    Low,
    Moderate,
    Elevated,
    High,
}

impl RiskSeverity {
    fn points(&self) -> Decimal {
        match self {
            RiskSeverity::Low => Decimal::ZERO,
            RiskSeverity::Moderate => dec!(8),
            RiskSeverity::Elevated => dec!(15),
            RiskSeverity::High => dec!(25),
        }
    }
}

impl std::fmt::Display for RiskSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskSeverity::Low => write!(f, "Low"),
            RiskSeverity::Moderate => write!(f, "Moderate"),
            RiskSeverity::Elevated => write!(f, "Elevated"),
            RiskSeverity::High => write!(f, "High"),
        }
    }
}

/// Overall risk classification for a deal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum RiskLevel {
    Low,
    Moderate,
    Elevated,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Moderate => write!(f, "Moderate"),
            RiskLevel::Elevated => write!(f, "Elevated"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

/// A single scored risk factor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskFactor {
    pub name: String,
    pub severity: RiskSeverity,
    pub detail: String,
}

/// Output of the deal risk assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessmentOutput {
    /// 0 (no flagged factors) to 100
    pub risk_score: Decimal,
    pub risk_level: RiskLevel,
    pub factors: Vec<RiskFactor>,
    pub price_to_arv_ratio: Ratio,
    /// Price-to-ARV below the 0.70 threshold
    pub good_deal_indicator: bool,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Assess deal risk from the same assumptions the return calculator takes.
pub fn assess_risk(
    input: &FlipAnalysisInput,
) -> DeedAnalyticsResult<ComputationOutput<RiskAssessmentOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let returns = flip::analyze_flip(input)?.result;

    let mut factors = Vec::with_capacity(5);
    factors.push(price_to_arv_factor(returns.price_to_arv_ratio));
    factors.push(margin_factor(returns.profit_margin_percent));
    factors.push(leverage_factor(input));
    factors.push(exposure_factor(input.holding_period_months));
    factors.push(rehab_factor(input));

    let raw_score: Decimal = factors.iter().map(|f| f.severity.points()).sum();
    let risk_score = raw_score.min(dec!(100));

    let risk_level = if risk_score < dec!(15) {
        RiskLevel::Low
    } else if risk_score < dec!(35) {
        RiskLevel::Moderate
    } else if risk_score < dec!(60) {
        RiskLevel::Elevated
    } else {
        RiskLevel::High
    };

    if factors.iter().any(|f| f.severity == RiskSeverity::High) {
        warnings.push("At least one factor scored High — review before bidding".into());
    }

    let good_deal_indicator = returns.price_to_arv_ratio < GOOD_DEAL_PRICE_TO_ARV;

    let output = RiskAssessmentOutput {
        risk_score,
        risk_level,
        factors,
        price_to_arv_ratio: returns.price_to_arv_ratio,
        good_deal_indicator,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Deal Risk Assessment",
        &serde_json::json!({
            "purchase_price": input.purchase_price.to_string(),
            "after_repair_value": input.after_repair_value.to_string(),
            "holding_period_months": input.holding_period_months,
            "use_financing": input.use_financing,
        }),
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Factor bands
// ---------------------------------------------------------------------------

fn price_to_arv_factor(ratio: Ratio) -> RiskFactor {
    let severity = if ratio <= dec!(0.60) {
        RiskSeverity::Low
    } else if ratio <= GOOD_DEAL_PRICE_TO_ARV {
        RiskSeverity::Moderate
    } else if ratio <= dec!(0.85) {
        RiskSeverity::Elevated
    } else {
        RiskSeverity::High
    };
    RiskFactor {
        name: "Price to ARV".into(),
        severity,
        detail: format!("Purchase price is {:.1}% of ARV", ratio * dec!(100)),
    }
}

fn margin_factor(margin_percent: Decimal) -> RiskFactor {
    let severity = if margin_percent >= dec!(20) {
        RiskSeverity::Low
    } else if margin_percent >= dec!(10) {
        RiskSeverity::Moderate
    } else if margin_percent >= Decimal::ZERO {
        RiskSeverity::Elevated
    } else {
        RiskSeverity::High
    };
    RiskFactor {
        name: "Profit margin".into(),
        severity,
        detail: format!("Net margin of {margin_percent:.1}% on total investment"),
    }
}

fn leverage_factor(input: &FlipAnalysisInput) -> RiskFactor {
    if !input.use_financing {
        return RiskFactor {
            name: "Leverage".into(),
            severity: RiskSeverity::Low,
            detail: "All-cash purchase".into(),
        };
    }
    let severity = if input.down_payment_percent >= dec!(20) {
        RiskSeverity::Moderate
    } else if input.down_payment_percent >= dec!(10) {
        RiskSeverity::Elevated
    } else {
        RiskSeverity::High
    };
    RiskFactor {
        name: "Leverage".into(),
        severity,
        detail: format!("Financed with {}% down", input.down_payment_percent),
    }
}

fn exposure_factor(holding_months: u32) -> RiskFactor {
    let severity = if holding_months <= 6 {
        RiskSeverity::Low
    } else if holding_months <= 12 {
        RiskSeverity::Moderate
    } else if holding_months <= 24 {
        RiskSeverity::Elevated
    } else {
        RiskSeverity::High
    };
    RiskFactor {
        name: "Market exposure".into(),
        severity,
        detail: format!("{holding_months} months of price risk before sale"),
    }
}

fn rehab_factor(input: &FlipAnalysisInput) -> RiskFactor {
    if input.purchase_price.is_zero() {
        let severity = if input.rehab_budget.is_zero() {
            RiskSeverity::Low
        } else {
            RiskSeverity::High
        };
        return RiskFactor {
            name: "Rehab scale".into(),
            severity,
            detail: "No purchase price to scale rehab against".into(),
        };
    }
    let ratio = input.rehab_budget / input.purchase_price;
    let severity = if ratio <= dec!(0.3) {
        RiskSeverity::Low
    } else if ratio <= dec!(0.6) {
        RiskSeverity::Moderate
    } else if ratio <= Decimal::ONE {
        RiskSeverity::Elevated
    } else {
        RiskSeverity::High
    };
    RiskFactor {
        name: "Rehab scale".into(),
        severity,
        detail: format!("Rehab budget is {:.0}% of purchase price", ratio * dec!(100)),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_input() -> FlipAnalysisInput {
        FlipAnalysisInput {
            purchase_price: dec!(50000),
            after_repair_value: dec!(150000),
            rehab_budget: dec!(30000),
            holding_period_months: 6,
            use_financing: false,
            down_payment_percent: dec!(25),
            annual_interest_rate_percent: dec!(12),
            closing_cost_percent: dec!(3),
            selling_cost_percent: dec!(8),
        }
    }

    #[test]
    fn test_deep_discount_deal_scores_low() {
        // 33% of ARV all-cash with a fat margin: only rehab scale flags
        let result = assess_risk(&sample_input()).unwrap();
        let out = &result.result;

        assert_eq!(out.risk_level, RiskLevel::Low);
        assert!(out.good_deal_indicator);
        assert_eq!(out.factors.len(), 5);
    }

    #[test]
    fn test_good_deal_indicator_threshold() {
        // Exactly at the threshold: 0.70 is not a good deal
        let mut input = sample_input();
        input.purchase_price = dec!(105000); // 105000 / 150000 = 0.70
        let result = assess_risk(&input).unwrap();
        assert!(!result.result.good_deal_indicator);

        input.purchase_price = dec!(104999);
        let result = assess_risk(&input).unwrap();
        assert!(result.result.good_deal_indicator);
    }

    #[test]
    fn test_thin_deal_scores_high() {
        // 90% of ARV, thin margin, long hold, heavy leverage
        let input = FlipAnalysisInput {
            purchase_price: dec!(135000),
            after_repair_value: dec!(150000),
            rehab_budget: dec!(5000),
            holding_period_months: 30,
            use_financing: true,
            down_payment_percent: dec!(5),
            annual_interest_rate_percent: dec!(12),
            closing_cost_percent: dec!(3),
            selling_cost_percent: dec!(8),
        };
        let result = assess_risk(&input).unwrap();
        let out = &result.result;

        assert_eq!(out.risk_level, RiskLevel::High);
        assert!(!out.good_deal_indicator);
        assert!(result.warnings.iter().any(|w| w.contains("scored High")));
    }

    #[test]
    fn test_leverage_bands() {
        let mut input = sample_input();
        input.use_financing = true;

        input.down_payment_percent = dec!(25);
        let result = assess_risk(&input).unwrap();
        let leverage = factor(&result.result, "Leverage");
        assert_eq!(leverage.severity, RiskSeverity::Moderate);

        input.down_payment_percent = dec!(15);
        let result = assess_risk(&input).unwrap();
        assert_eq!(factor(&result.result, "Leverage").severity, RiskSeverity::Elevated);

        input.down_payment_percent = dec!(5);
        let result = assess_risk(&input).unwrap();
        assert_eq!(factor(&result.result, "Leverage").severity, RiskSeverity::High);
    }

    #[test]
    fn test_all_cash_leverage_is_low() {
        let result = assess_risk(&sample_input()).unwrap();
        assert_eq!(factor(&result.result, "Leverage").severity, RiskSeverity::Low);
    }

    #[test]
    fn test_exposure_bands() {
        let mut input = sample_input();

        input.holding_period_months = 12;
        let result = assess_risk(&input).unwrap();
        assert_eq!(
            factor(&result.result, "Market exposure").severity,
            RiskSeverity::Moderate
        );

        input.holding_period_months = 18;
        let result = assess_risk(&input).unwrap();
        assert_eq!(
            factor(&result.result, "Market exposure").severity,
            RiskSeverity::Elevated
        );
    }

    #[test]
    fn test_rehab_scale_bands() {
        let mut input = sample_input();

        // 30000 / 50000 = 60%, top of Moderate
        let result = assess_risk(&input).unwrap();
        assert_eq!(factor(&result.result, "Rehab scale").severity, RiskSeverity::Moderate);

        input.rehab_budget = dec!(60000); // 120% of purchase
        input.after_repair_value = dec!(250000);
        let result = assess_risk(&input).unwrap();
        assert_eq!(factor(&result.result, "Rehab scale").severity, RiskSeverity::High);
    }

    #[test]
    fn test_score_is_clamped() {
        let result = assess_risk(&sample_input()).unwrap();
        assert!(result.result.risk_score >= Decimal::ZERO);
        assert!(result.result.risk_score <= dec!(100));
    }

    #[test]
    fn test_invalid_deal_propagates_error() {
        let mut input = sample_input();
        input.after_repair_value = Decimal::ZERO;
        assert!(assess_risk(&input).is_err());
    }

    fn factor<'a>(out: &'a RiskAssessmentOutput, name: &str) -> &'a RiskFactor {
        out.factors
            .iter()
            .find(|f| f.name == name)
            .unwrap_or_else(|| panic!("factor {name} missing"))
    }
}
