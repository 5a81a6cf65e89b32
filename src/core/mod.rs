mod engine;
mod format;
mod types;
mod validate;

pub use engine::{
    find_break_even, home_equity_series, investment_growth, investment_growth_variable,
    monthly_housing_cost, monthly_payment, remaining_balance, rental_cost_series, run_comparison,
};
pub use format::{format_currency, format_currency_compact, format_percent};
pub use types::{
    ComparisonResult, OwnershipProjection, RentalProjection, ScenarioParams,
    DEFAULT_LOAN_TERM_YEARS, DEFAULT_TIME_HORIZON_YEARS, MAX_TIME_HORIZON_YEARS,
};
pub use validate::{validate_params, ValidationReport};
