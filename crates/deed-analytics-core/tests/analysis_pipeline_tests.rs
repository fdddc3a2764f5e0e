#![cfg(all(feature = "costs", feature = "risk", feature = "recommendation"))]

use deed_analytics_core::costs::breakdown::{self, CostBreakdownInput, ItemizedMonthlyCosts};
use deed_analytics_core::recommendation::verdict::{self, Verdict};
use deed_analytics_core::returns::flip::{self, FlipAnalysisInput};
use deed_analytics_core::risk::assessment::{self, RiskLevel};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

// ===========================================================================
// Cross-module consistency: the dashboard shows all four analyses for the
// same deal, so their shared figures must agree.
// ===========================================================================

fn deal() -> FlipAnalysisInput {
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

fn breakdown_input(deal: &FlipAnalysisInput) -> CostBreakdownInput {
    CostBreakdownInput {
        purchase_price: deal.purchase_price,
        after_repair_value: deal.after_repair_value,
        rehab_budget: deal.rehab_budget,
        holding_period_months: deal.holding_period_months,
        use_financing: deal.use_financing,
        down_payment_percent: deal.down_payment_percent,
        annual_interest_rate_percent: deal.annual_interest_rate_percent,
        closing_cost_percent: deal.closing_cost_percent,
        selling_cost_percent: deal.selling_cost_percent,
        monthly_costs: None,
    }
}

#[test]
fn test_breakdown_total_matches_flip_total_investment() {
    let deal = deal();
    let returns = flip::analyze_flip(&deal).unwrap().result;
    let costs = breakdown::break_down_costs(&breakdown_input(&deal)).unwrap().result;

    assert_eq!(costs.total_cost, returns.total_investment);
    assert_eq!(costs.closing_costs, returns.closing_costs);
    assert_eq!(costs.holding_costs, returns.total_holding_costs);
    assert_eq!(costs.selling_costs, returns.selling_costs);
    assert_eq!(costs.total_cost, returns.break_even_price);
}

#[test]
fn test_breakdown_total_matches_flip_when_financed() {
    let mut deal = deal();
    deal.use_financing = true;
    let returns = flip::analyze_flip(&deal).unwrap().result;
    let costs = breakdown::break_down_costs(&breakdown_input(&deal)).unwrap().result;

    assert_eq!(costs.interest_costs, returns.interest_costs);
    assert_eq!(costs.total_cost, returns.total_investment);
}

#[test]
fn test_itemized_carry_diverges_from_flip_heuristic() {
    let deal = deal();
    let mut costs_input = breakdown_input(&deal);
    costs_input.monthly_costs = Some(ItemizedMonthlyCosts {
        property_taxes: dec!(300),
        insurance: dec!(120),
        utilities: dec!(150),
        hoa_dues: dec!(0),
    });

    let returns = flip::analyze_flip(&deal).unwrap().result;
    let costs = breakdown::break_down_costs(&costs_input).unwrap().result;

    // Itemized carry (570/mo) replaces the 262.50/mo heuristic
    assert_eq!(costs.monthly_carry, dec!(570));
    assert_ne!(costs.total_cost, returns.total_investment);
}

// ===========================================================================
// Risk and recommendation agree on the shared indicators
// ===========================================================================

#[test]
fn test_good_deal_indicator_agrees_across_modules() {
    for price in [dec!(50000), dec!(104000), dec!(106000), dec!(130000)] {
        let mut deal = deal();
        deal.purchase_price = price;

        let returns = flip::analyze_flip(&deal).unwrap().result;
        let risk = assessment::assess_risk(&deal).unwrap().result;
        let rec = verdict::recommend(&deal).unwrap().result;

        let expected = returns.price_to_arv_ratio < dec!(0.70);
        assert_eq!(risk.good_deal_indicator, expected, "price {price}");
        assert_eq!(rec.good_deal_indicator, expected, "price {price}");
    }
}

#[test]
fn test_recommendation_reflects_risk_level() {
    let mut deal = deal();
    deal.use_financing = true;
    deal.down_payment_percent = dec!(5);
    deal.holding_period_months = 30;
    deal.purchase_price = dec!(130000);
    deal.rehab_budget = dec!(2000);

    let risk = assessment::assess_risk(&deal).unwrap().result;
    let rec = verdict::recommend(&deal).unwrap().result;

    assert_eq!(risk.risk_level, rec.risk_level);
    if risk.risk_level == RiskLevel::High {
        assert_eq!(rec.verdict, Verdict::Pass);
    }
}

#[test]
fn test_max_offer_agrees_between_flip_and_recommendation() {
    let deal = deal();
    let returns = flip::analyze_flip(&deal).unwrap().result;
    let rec = verdict::recommend(&deal).unwrap().result;

    assert_eq!(rec.max_offer, returns.max_offer_70_percent_rule);
    assert_eq!(rec.roi_percent, returns.roi_percent);
    assert_eq!(rec.net_profit, returns.net_profit);
}

#[test]
fn test_priced_below_seventy_percent_rule_is_never_pass_when_profitable() {
    // A deal inside the 70% rule with a healthy margin should clear Pass
    let mut deal = deal();
    deal.purchase_price = dec!(70000);
    let rec = verdict::recommend(&deal).unwrap().result;

    assert!(rec.net_profit > dec!(0));
    assert_ne!(rec.verdict, Verdict::Pass);
}
