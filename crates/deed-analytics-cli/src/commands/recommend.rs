use clap::Args;
use serde_json::Value;

use deed_analytics_core::recommendation::verdict;
use deed_analytics_core::returns::flip::FlipAnalysisInput;

use crate::input;

/// Arguments for the buy/pass recommendation
#[derive(Args)]
pub struct RecommendArgs {
    /// Path to JSON input file
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_recommend(args: RecommendArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let deal: FlipAnalysisInput = if let Some(ref path) = args.input {
        input::read_json(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file.json> or stdin required for a recommendation".into());
    };
    let result = verdict::recommend(&deal)?;
    Ok(serde_json::to_value(result)?)
}
