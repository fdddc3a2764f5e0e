use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Returns
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_flip(input_json: String) -> NapiResult<String> {
    let input: deed_analytics_core::returns::flip::FlipAnalysisInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        deed_analytics_core::returns::flip::analyze_flip(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Costs
// ---------------------------------------------------------------------------

#[napi]
pub fn break_down_costs(input_json: String) -> NapiResult<String> {
    let input: deed_analytics_core::costs::breakdown::CostBreakdownInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = deed_analytics_core::costs::breakdown::break_down_costs(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Risk
// ---------------------------------------------------------------------------

#[napi]
pub fn assess_risk(input_json: String) -> NapiResult<String> {
    let input: deed_analytics_core::returns::flip::FlipAnalysisInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        deed_analytics_core::risk::assessment::assess_risk(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Recommendation
// ---------------------------------------------------------------------------

#[napi]
pub fn recommend(input_json: String) -> NapiResult<String> {
    let input: deed_analytics_core::returns::flip::FlipAnalysisInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        deed_analytics_core::recommendation::verdict::recommend(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
