use std::collections::BTreeMap;

use serde::Serialize;

use super::types::ScenarioParams;

/// Field-keyed validation errors. Keys match the API payload's camelCase
/// field names so a form layer can attach messages to inputs directly.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub errors: BTreeMap<&'static str, String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Single aggregated message for callers that surface one error line,
    /// in stable field order. `None` when everything passed.
    pub fn summary(&self) -> Option<String> {
        if self.errors.is_empty() {
            return None;
        }
        Some(
            self.errors
                .iter()
                .map(|(field, message)| format!("{field}: {message}"))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    fn flag(&mut self, field: &'static str, message: String) {
        self.errors.insert(field, message);
    }
}

/// Strict pre-check over the raw parameters. Reports every out-of-policy
/// field without blocking the computation; `run_comparison` stays safe to
/// call regardless of the outcome.
pub fn validate_params(params: &ScenarioParams) -> ValidationReport {
    let mut report = ValidationReport::default();

    require_positive(&mut report, "homePrice", params.home_price);
    require_positive(&mut report, "monthlyRent", params.monthly_rent);

    check_range(&mut report, "downPaymentPct", params.down_payment_pct, 0.0, 100.0);
    check_range(&mut report, "mortgageRate", params.mortgage_rate, 0.0, 50.0);
    check_range(&mut report, "loanTermYears", params.loan_term_years, 1.0, 50.0);
    check_range(
        &mut report,
        "timeHorizonYears",
        params.time_horizon_years,
        1.0,
        50.0,
    );
    check_range(&mut report, "propertyTaxRate", params.property_tax_rate, 0.0, 10.0);
    check_range(
        &mut report,
        "appreciationRate",
        params.appreciation_rate,
        -20.0,
        20.0,
    );
    check_range(
        &mut report,
        "rentIncreaseRate",
        params.rent_increase_rate,
        -20.0,
        20.0,
    );
    check_range(
        &mut report,
        "investmentReturnRate",
        params.investment_return_rate,
        -20.0,
        50.0,
    );

    require_non_negative(&mut report, "homeInsurance", params.home_insurance);
    require_non_negative(&mut report, "maintenance", params.maintenance);
    require_non_negative(&mut report, "hoaMonthly", params.hoa_monthly);
    require_non_negative(&mut report, "rentalIncome", params.rental_income);
    require_non_negative(
        &mut report,
        "investmentStartBalance",
        params.investment_start_balance,
    );
    require_non_negative(&mut report, "monthlyBudget", params.monthly_budget);

    report
}

fn require_positive(report: &mut ValidationReport, field: &'static str, value: f64) {
    if !value.is_finite() {
        report.flag(field, "must be a finite number".to_string());
    } else if value <= 0.0 {
        report.flag(field, "is required and must be greater than 0".to_string());
    }
}

fn require_non_negative(report: &mut ValidationReport, field: &'static str, value: f64) {
    if !value.is_finite() {
        report.flag(field, "must be a finite number".to_string());
    } else if value < 0.0 {
        report.flag(field, "must be greater than or equal to 0".to_string());
    }
}

fn check_range(report: &mut ValidationReport, field: &'static str, value: f64, min: f64, max: f64) {
    if !value.is_finite() {
        report.flag(field, "must be a finite number".to_string());
    } else if !(min..=max).contains(&value) {
        report.flag(field, format!("must be between {min} and {max}"));
    }
}
