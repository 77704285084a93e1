use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Amortisation
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_payment(input_json: String) -> NapiResult<String> {
    let input: mortgage_roce_core::amortization::payment::PaymentInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = mortgage_roce_core::amortization::payment::calculate_payment(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn analyze_interest(input_json: String) -> NapiResult<String> {
    let input: mortgage_roce_core::amortization::payment::PaymentInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = mortgage_roce_core::amortization::interest::analyze_interest(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// ROCE
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_roce(input_json: String) -> NapiResult<String> {
    let input: mortgage_roce_core::roce::metric::RoceInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        mortgage_roce_core::roce::metric::calculate_roce(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Offer comparison
// ---------------------------------------------------------------------------

#[napi]
pub fn compare_offers(input_json: String) -> NapiResult<String> {
    let input: mortgage_roce_core::comparison::offers::ComparisonInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = mortgage_roce_core::comparison::offers::compare_offers(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
