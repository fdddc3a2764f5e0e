use clap::Args;
use serde_json::Value;

use deed_analytics_core::returns::flip::FlipAnalysisInput;
use deed_analytics_core::risk::assessment;

use crate::input;

/// Arguments for deal risk assessment
#[derive(Args)]
pub struct RiskArgs {
    /// Path to JSON input file
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_risk(args: RiskArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let deal: FlipAnalysisInput = if let Some(ref path) = args.input {
        input::read_json(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file.json> or stdin required for risk assessment".into());
    };
    let result = assessment::assess_risk(&deal)?;
    Ok(serde_json::to_value(result)?)
}
