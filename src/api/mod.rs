use std::collections::BTreeMap;
use std::net::SocketAddr;

use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use clap::Parser;
use serde::{Deserialize, Deserializer, Serialize};
use tokio::net::TcpListener;

use crate::core::{ScenarioParams, run_comparison, validate_params};

/// Parameter record as the web layer sends it: every field optional, keys
/// in camelCase, with the sharing codec's compact abbreviations accepted as
/// aliases. Numeric strings ("425000") coerce to numbers.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ComparePayload {
    #[serde(alias = "hp", deserialize_with = "de_opt_number")]
    home_price: Option<f64>,
    #[serde(alias = "dp", deserialize_with = "de_opt_number")]
    down_payment_pct: Option<f64>,
    #[serde(alias = "mr", deserialize_with = "de_opt_number")]
    mortgage_rate: Option<f64>,
    #[serde(alias = "lt", deserialize_with = "de_opt_number")]
    loan_term_years: Option<f64>,
    #[serde(alias = "pt", deserialize_with = "de_opt_number")]
    property_tax_rate: Option<f64>,
    #[serde(alias = "hi", deserialize_with = "de_opt_number")]
    home_insurance: Option<f64>,
    #[serde(alias = "mn", deserialize_with = "de_opt_number")]
    maintenance: Option<f64>,
    #[serde(alias = "hoa", deserialize_with = "de_opt_number")]
    hoa_monthly: Option<f64>,
    #[serde(alias = "ap", deserialize_with = "de_opt_number")]
    appreciation_rate: Option<f64>,
    #[serde(alias = "ri", deserialize_with = "de_opt_number")]
    rental_income: Option<f64>,
    #[serde(alias = "rent", deserialize_with = "de_opt_number")]
    monthly_rent: Option<f64>,
    #[serde(alias = "rr", deserialize_with = "de_opt_number")]
    rent_increase_rate: Option<f64>,
    #[serde(alias = "sb", deserialize_with = "de_opt_number")]
    investment_start_balance: Option<f64>,
    #[serde(alias = "mb", deserialize_with = "de_opt_number")]
    monthly_budget: Option<f64>,
    #[serde(alias = "ret", deserialize_with = "de_opt_number")]
    investment_return_rate: Option<f64>,
    #[serde(alias = "th", deserialize_with = "de_opt_number")]
    time_horizon_years: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

fn de_opt_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Number(value)) => Ok(Some(value)),
        Some(NumberOrString::Text(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<f64>()
                .map(Some)
                .map_err(|_| serde::de::Error::custom(format!("invalid number: {trimmed:?}")))
        }
    }
}

/// Documented defaults for every parameter; doubles as the `compare`
/// subcommand's argument surface and as the defaults container the API
/// overlays payloads onto.
#[derive(Parser, Debug)]
#[command(
    name = "hearth",
    about = "Buy-vs-rent projector (amortization + investment growth + break-even comparison)"
)]
pub struct Cli {
    #[arg(long, default_value_t = 0.0, help = "Purchase price of the home")]
    home_price: f64,
    #[arg(
        long,
        default_value_t = 0.0,
        help = "Down payment as percent of the home price"
    )]
    down_payment_pct: f64,
    #[arg(
        long,
        default_value_t = 0.0,
        help = "Annual mortgage rate in percent, e.g. 6.5"
    )]
    mortgage_rate: f64,
    #[arg(long, default_value_t = 30.0, help = "Mortgage term in years")]
    loan_term_years: f64,
    #[arg(
        long,
        default_value_t = 0.0,
        help = "Annual property tax as percent of the home price"
    )]
    property_tax_rate: f64,
    #[arg(long, default_value_t = 0.0, help = "Annual home insurance premium")]
    home_insurance: f64,
    #[arg(long, default_value_t = 0.0, help = "Annual maintenance budget")]
    maintenance: f64,
    #[arg(long, default_value_t = 0.0, help = "Monthly HOA fee")]
    hoa_monthly: f64,
    #[arg(
        long,
        default_value_t = 0.0,
        help = "Annual home appreciation rate in percent"
    )]
    appreciation_rate: f64,
    #[arg(
        long,
        default_value_t = 0.0,
        help = "Monthly rental income collected from the property"
    )]
    rental_income: f64,
    #[arg(
        long,
        default_value_t = 0.0,
        help = "Current monthly rent for the rent scenario"
    )]
    monthly_rent: f64,
    #[arg(
        long,
        default_value_t = 0.0,
        help = "Annual rent increase rate in percent"
    )]
    rent_increase_rate: f64,
    #[arg(
        long,
        default_value_t = 0.0,
        help = "Investment balance at the time of decision"
    )]
    investment_start_balance: f64,
    #[arg(
        long,
        default_value_t = 0.0,
        help = "Total monthly budget available for housing plus investing"
    )]
    monthly_budget: f64,
    #[arg(
        long,
        default_value_t = 0.0,
        help = "Expected annual investment return in percent"
    )]
    investment_return_rate: f64,
    #[arg(
        long,
        default_value_t = 30.0,
        help = "Comparison horizon in years (clamped to 50)"
    )]
    time_horizon_years: f64,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidationErrorResponse {
    error: String,
    field_errors: BTreeMap<&'static str, String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidateResponse {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    errors: BTreeMap<&'static str, String>,
}

fn build_params(cli: &Cli) -> ScenarioParams {
    ScenarioParams {
        home_price: cli.home_price,
        down_payment_pct: cli.down_payment_pct,
        mortgage_rate: cli.mortgage_rate,
        loan_term_years: cli.loan_term_years,
        property_tax_rate: cli.property_tax_rate,
        home_insurance: cli.home_insurance,
        maintenance: cli.maintenance,
        hoa_monthly: cli.hoa_monthly,
        appreciation_rate: cli.appreciation_rate,
        rental_income: cli.rental_income,
        monthly_rent: cli.monthly_rent,
        rent_increase_rate: cli.rent_increase_rate,
        investment_start_balance: cli.investment_start_balance,
        monthly_budget: cli.monthly_budget,
        investment_return_rate: cli.investment_return_rate,
        time_horizon_years: cli.time_horizon_years,
    }
}

fn default_cli() -> Cli {
    Cli::parse_from(["hearth"])
}

fn params_from_payload(payload: ComparePayload) -> ScenarioParams {
    let mut cli = default_cli();

    if let Some(v) = payload.home_price {
        cli.home_price = v;
    }
    if let Some(v) = payload.down_payment_pct {
        cli.down_payment_pct = v;
    }
    if let Some(v) = payload.mortgage_rate {
        cli.mortgage_rate = v;
    }
    if let Some(v) = payload.loan_term_years {
        cli.loan_term_years = v;
    }
    if let Some(v) = payload.property_tax_rate {
        cli.property_tax_rate = v;
    }
    if let Some(v) = payload.home_insurance {
        cli.home_insurance = v;
    }
    if let Some(v) = payload.maintenance {
        cli.maintenance = v;
    }
    if let Some(v) = payload.hoa_monthly {
        cli.hoa_monthly = v;
    }
    if let Some(v) = payload.appreciation_rate {
        cli.appreciation_rate = v;
    }
    if let Some(v) = payload.rental_income {
        cli.rental_income = v;
    }
    if let Some(v) = payload.monthly_rent {
        cli.monthly_rent = v;
    }
    if let Some(v) = payload.rent_increase_rate {
        cli.rent_increase_rate = v;
    }
    if let Some(v) = payload.investment_start_balance {
        cli.investment_start_balance = v;
    }
    if let Some(v) = payload.monthly_budget {
        cli.monthly_budget = v;
    }
    if let Some(v) = payload.investment_return_rate {
        cli.investment_return_rate = v;
    }
    if let Some(v) = payload.time_horizon_years {
        cli.time_horizon_years = v;
    }

    build_params(&cli)
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route(
            "/api/compare",
            get(compare_get_handler).post(compare_post_handler),
        )
        .route(
            "/api/validate",
            get(validate_get_handler).post(validate_post_handler),
        )
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    println!("Buy-vs-rent API listening on http://{addr}");
    println!("Local access: http://127.0.0.1:{port}/api/compare");

    axum::serve(listener, app).await
}

/// Runs one comparison from CLI flags, gated on validation; returns the
/// pretty-printed result or the aggregated validation message.
pub fn run_compare_command(args: Vec<String>) -> Result<String, String> {
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;
    let params = build_params(&cli);
    if let Some(message) = validate_params(&params).summary() {
        return Err(message);
    }
    let result = run_comparison(&params);
    serde_json::to_string_pretty(&result).map_err(|e| e.to_string())
}

async fn compare_get_handler(Query(payload): Query<ComparePayload>) -> Response {
    compare_handler_impl(payload)
}

async fn compare_post_handler(Json(payload): Json<ComparePayload>) -> Response {
    compare_handler_impl(payload)
}

fn compare_handler_impl(payload: ComparePayload) -> Response {
    let params = params_from_payload(payload);
    let report = validate_params(&params);
    if let Some(message) = report.summary() {
        return json_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            ValidationErrorResponse {
                error: message,
                field_errors: report.errors,
            },
        );
    }
    json_response(StatusCode::OK, run_comparison(&params))
}

async fn validate_get_handler(Query(payload): Query<ComparePayload>) -> Response {
    validate_handler_impl(payload)
}

async fn validate_post_handler(Json(payload): Json<ComparePayload>) -> Response {
    validate_handler_impl(payload)
}

fn validate_handler_impl(payload: ComparePayload) -> Response {
    let params = params_from_payload(payload);
    let report = validate_params(&params);
    json_response(
        StatusCode::OK,
        ValidateResponse {
            valid: report.is_valid(),
            message: report.summary(),
            errors: report.errors,
        },
    )
}

async fn not_found_handler() -> Response {
    json_response(
        StatusCode::NOT_FOUND,
        ErrorResponse {
            error: "Not found".to_string(),
        },
    )
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

#[cfg(test)]
fn params_from_json(json: &str) -> Result<ScenarioParams, String> {
    let payload = serde_json::from_str::<ComparePayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    Ok(params_from_payload(payload))
}
