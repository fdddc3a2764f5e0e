use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use deed_analytics_core::returns::flip::{self, FlipAnalysisInput};

use crate::input;

/// Arguments for fix-and-flip return analysis
#[derive(Args)]
pub struct FlipArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Acquisition price before closing costs
    #[arg(long)]
    pub purchase_price: Option<Decimal>,

    /// Projected after-repair resale value
    #[arg(long)]
    pub arv: Option<Decimal>,

    /// Planned renovation spend
    #[arg(long)]
    pub rehab_budget: Option<Decimal>,

    /// Planned hold before sale, in months
    #[arg(long)]
    pub holding_months: Option<u32>,

    /// Fund part of the purchase with a loan
    #[arg(long)]
    pub financed: bool,

    /// Down payment as a percentage of purchase price
    #[arg(long)]
    pub down_payment_pct: Option<Decimal>,

    /// Nominal annual loan interest rate, as a percentage
    #[arg(long)]
    pub interest_rate_pct: Option<Decimal>,

    /// Closing costs as a percentage of purchase price
    #[arg(long)]
    pub closing_cost_pct: Option<Decimal>,

    /// Selling costs as a percentage of resale value
    #[arg(long)]
    pub selling_cost_pct: Option<Decimal>,
}

pub fn run_flip(args: FlipArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let flip_input: FlipAnalysisInput = if let Some(ref path) = args.input {
        input::read_json(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let purchase = args
            .purchase_price
            .ok_or("--purchase-price is required (or provide --input)")?;
        let arv = args.arv.ok_or("--arv is required (or provide --input)")?;

        let defaults = FlipAnalysisInput::default();
        FlipAnalysisInput {
            purchase_price: purchase,
            after_repair_value: arv,
            rehab_budget: args.rehab_budget.unwrap_or(Decimal::ZERO),
            holding_period_months: args
                .holding_months
                .unwrap_or(defaults.holding_period_months),
            use_financing: args.financed,
            down_payment_percent: args
                .down_payment_pct
                .unwrap_or(defaults.down_payment_percent),
            annual_interest_rate_percent: args
                .interest_rate_pct
                .unwrap_or(defaults.annual_interest_rate_percent),
            closing_cost_percent: args
                .closing_cost_pct
                .unwrap_or(defaults.closing_cost_percent),
            selling_cost_percent: args
                .selling_cost_pct
                .unwrap_or(defaults.selling_cost_percent),
        }
    };

    let result = flip::analyze_flip(&flip_input)?;
    Ok(serde_json::to_value(result)?)
}
