use clap::Args;
use serde_json::Value;

use deed_analytics_core::costs::breakdown::{self, CostBreakdownInput};

use crate::input;

/// Arguments for deal cost breakdown
#[derive(Args)]
pub struct CostsArgs {
    /// Path to JSON input file
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_costs(args: CostsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let costs_input: CostBreakdownInput = if let Some(ref path) = args.input {
        input::read_json(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file.json> or stdin required for cost breakdown".into());
    };
    let result = breakdown::break_down_costs(&costs_input)?;
    Ok(serde_json::to_value(result)?)
}
