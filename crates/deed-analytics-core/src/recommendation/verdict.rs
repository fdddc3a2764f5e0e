//! Buy/pass recommendation combining return and risk analysis.
//!
//! Decision table, evaluated top-down:
//! - net loss or High risk -> Pass
//! - ROI >= 30%, risk at most Moderate, price within the 70%-rule -> StrongBuy
//! - ROI >= 15%, risk at most Elevated -> Buy
//! - otherwise (profitable but marginal) -> Caution

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::returns::flip::{self, FlipAnalysisInput};
use crate::risk::assessment::{self, RiskLevel};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::DeedAnalyticsResult;

const STRONG_BUY_ROI: Decimal = dec!(30);
const BUY_ROI: Decimal = dec!(15);

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// The dashboard's investment recommendation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Verdict {
    StrongBuy,
    Buy,
    Caution,
    Pass,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::StrongBuy => write!(f, "Strong Buy"),
            Verdict::Buy => write!(f, "Buy"),
            Verdict::Caution => write!(f, "Caution"),
            Verdict::Pass => write!(f, "Pass"),
        }
    }
}

/// Output of the recommendation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationOutput {
    pub verdict: Verdict,
    /// Conditions that drove the verdict, in evaluation order
    pub reasons: Vec<String>,
    pub roi_percent: Percent,
    pub net_profit: Money,
    pub risk_level: RiskLevel,
    /// 70% of ARV less rehab budget
    pub max_offer: Money,
    /// max_offer - purchase_price; negative when overpaying
    pub offer_headroom: Money,
    pub good_deal_indicator: bool,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Produce a buy/pass recommendation for a deal.
pub fn recommend(
    input: &FlipAnalysisInput,
) -> DeedAnalyticsResult<ComputationOutput<RecommendationOutput>> {
    let start = Instant::now();
    let warnings: Vec<String> = Vec::new();

    let returns = flip::analyze_flip(input)?.result;
    let risk = assessment::assess_risk(input)?.result;

    let max_offer = returns.max_offer_70_percent_rule;
    let offer_headroom = max_offer - input.purchase_price;

    let mut reasons: Vec<String> = Vec::new();

    let verdict = if returns.net_profit < Decimal::ZERO {
        reasons.push(format!(
            "Projected net loss of {} at the assumed resale value",
            -returns.net_profit
        ));
        Verdict::Pass
    } else if risk.risk_level == RiskLevel::High {
        reasons.push(format!(
            "Overall risk is High (score {})",
            risk.risk_score
        ));
        Verdict::Pass
    } else if returns.roi_percent >= STRONG_BUY_ROI
        && risk.risk_level <= RiskLevel::Moderate
        && input.purchase_price <= max_offer
    {
        reasons.push(format!(
            "ROI of {:.1}% clears the {STRONG_BUY_ROI}% bar",
            returns.roi_percent
        ));
        reasons.push(format!("Risk is {}", risk.risk_level));
        reasons.push(format!(
            "Price is within the 70%-rule maximum offer of {max_offer}"
        ));
        Verdict::StrongBuy
    } else if returns.roi_percent >= BUY_ROI && risk.risk_level <= RiskLevel::Elevated {
        reasons.push(format!(
            "ROI of {:.1}% clears the {BUY_ROI}% bar",
            returns.roi_percent
        ));
        reasons.push(format!("Risk is {}", risk.risk_level));
        if input.purchase_price > max_offer {
            reasons.push(format!(
                "Price exceeds the 70%-rule maximum offer of {max_offer}"
            ));
        }
        Verdict::Buy
    } else {
        reasons.push(format!(
            "Profitable but marginal: ROI {:.1}%, risk {}",
            returns.roi_percent, risk.risk_level
        ));
        Verdict::Caution
    };

    let output = RecommendationOutput {
        verdict,
        reasons,
        roi_percent: returns.roi_percent,
        net_profit: returns.net_profit,
        risk_level: risk.risk_level,
        max_offer,
        offer_headroom,
        good_deal_indicator: risk.good_deal_indicator,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Investment Recommendation",
        input,
        warnings,
        elapsed,
        output,
    ))
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
    fn test_deep_discount_is_strong_buy() {
        let result = recommend(&sample_input()).unwrap();
        let out = &result.result;

        assert_eq!(out.verdict, Verdict::StrongBuy);
        assert_eq!(out.max_offer, dec!(75000));
        assert_eq!(out.offer_headroom, dec!(25000));
        assert!(out.good_deal_indicator);
        assert!(!out.reasons.is_empty());
    }

    #[test]
    fn test_net_loss_is_pass() {
        let mut input = sample_input();
        input.after_repair_value = dec!(85000);
        let result = recommend(&input).unwrap();
        let out = &result.result;

        assert_eq!(out.verdict, Verdict::Pass);
        assert!(out.net_profit < Decimal::ZERO);
        assert!(out.reasons[0].contains("net loss"));
    }

    #[test]
    fn test_high_risk_is_pass_even_when_profitable() {
        // Profitable on paper but financed thin on a long hold
        let input = FlipAnalysisInput {
            purchase_price: dec!(100000),
            after_repair_value: dec!(150000),
            rehab_budget: dec!(4000),
            holding_period_months: 30,
            use_financing: true,
            down_payment_percent: dec!(5),
            annual_interest_rate_percent: dec!(6),
            closing_cost_percent: dec!(1),
            selling_cost_percent: dec!(4),
        };
        let result = recommend(&input).unwrap();
        let out = &result.result;

        assert!(out.net_profit > Decimal::ZERO, "net {}", out.net_profit);
        assert_eq!(out.risk_level, RiskLevel::High);
        assert_eq!(out.verdict, Verdict::Pass);
    }

    #[test]
    fn test_priced_at_max_offer_has_zero_headroom() {
        let mut input = sample_input();
        input.purchase_price = dec!(75000);
        let result = recommend(&input).unwrap();
        assert_eq!(result.result.offer_headroom, dec!(0));
    }

    #[test]
    fn test_moderate_deal_is_buy() {
        // 64% of ARV on a 12-month hold: decent ROI, some exposure
        let input = FlipAnalysisInput {
            purchase_price: dec!(96000),
            after_repair_value: dec!(150000),
            rehab_budget: dec!(8000),
            holding_period_months: 12,
            use_financing: false,
            down_payment_percent: dec!(25),
            annual_interest_rate_percent: dec!(12),
            closing_cost_percent: dec!(3),
            selling_cost_percent: dec!(8),
        };
        let result = recommend(&input).unwrap();
        let out = &result.result;

        assert!(matches!(out.verdict, Verdict::StrongBuy | Verdict::Buy));
        assert!(out.roi_percent >= dec!(15));
    }

    #[test]
    fn test_thin_but_profitable_is_caution() {
        // Small positive margin, ROI below the Buy bar
        let input = FlipAnalysisInput {
            purchase_price: dec!(100000),
            after_repair_value: dec!(130000),
            rehab_budget: dec!(10000),
            holding_period_months: 6,
            use_financing: false,
            down_payment_percent: dec!(25),
            annual_interest_rate_percent: dec!(12),
            closing_cost_percent: dec!(3),
            selling_cost_percent: dec!(8),
        };
        let result = recommend(&input).unwrap();
        let out = &result.result;

        assert!(out.net_profit > Decimal::ZERO, "net {}", out.net_profit);
        assert!(out.roi_percent < dec!(15), "roi {}", out.roi_percent);
        assert_eq!(out.verdict, Verdict::Caution);
    }

    #[test]
    fn test_good_deal_indicator_matches_ratio() {
        let result = recommend(&sample_input()).unwrap();
        assert!(result.result.good_deal_indicator);

        let mut input = sample_input();
        input.purchase_price = dec!(120000);
        let result = recommend(&input).unwrap();
        assert!(!result.result.good_deal_indicator);
    }

    #[test]
    fn test_invalid_input_propagates() {
        let mut input = sample_input();
        input.holding_period_months = 0;
        assert!(recommend(&input).is_err());
    }
}
