use serde::Serialize;

pub const DEFAULT_LOAN_TERM_YEARS: f64 = 30.0;
pub const DEFAULT_TIME_HORIZON_YEARS: f64 = 30.0;
pub const MAX_TIME_HORIZON_YEARS: f64 = 50.0;

/// All rate fields hold plain percent values (6.5 means 6.5%) and are
/// divided by 100 at point of use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioParams {
    pub home_price: f64,
    pub down_payment_pct: f64,
    pub mortgage_rate: f64,
    pub loan_term_years: f64,
    pub property_tax_rate: f64,
    pub home_insurance: f64,
    pub maintenance: f64,
    pub hoa_monthly: f64,
    pub appreciation_rate: f64,
    pub rental_income: f64,
    pub monthly_rent: f64,
    pub rent_increase_rate: f64,
    pub investment_start_balance: f64,
    pub monthly_budget: f64,
    pub investment_return_rate: f64,
    pub time_horizon_years: f64,
}

impl Default for ScenarioParams {
    fn default() -> Self {
        Self {
            home_price: 0.0,
            down_payment_pct: 0.0,
            mortgage_rate: 0.0,
            loan_term_years: DEFAULT_LOAN_TERM_YEARS,
            property_tax_rate: 0.0,
            home_insurance: 0.0,
            maintenance: 0.0,
            hoa_monthly: 0.0,
            appreciation_rate: 0.0,
            rental_income: 0.0,
            monthly_rent: 0.0,
            rent_increase_rate: 0.0,
            investment_start_balance: 0.0,
            monthly_budget: 0.0,
            investment_return_rate: 0.0,
            time_horizon_years: DEFAULT_TIME_HORIZON_YEARS,
        }
    }
}

impl ScenarioParams {
    /// Coerces every field to a finite number; non-finite values fall back
    /// to the documented defaults (0, except loan term and horizon).
    pub fn normalized(&self) -> Self {
        Self {
            home_price: finite_or(self.home_price, 0.0),
            down_payment_pct: finite_or(self.down_payment_pct, 0.0),
            mortgage_rate: finite_or(self.mortgage_rate, 0.0),
            loan_term_years: finite_or(self.loan_term_years, DEFAULT_LOAN_TERM_YEARS),
            property_tax_rate: finite_or(self.property_tax_rate, 0.0),
            home_insurance: finite_or(self.home_insurance, 0.0),
            maintenance: finite_or(self.maintenance, 0.0),
            hoa_monthly: finite_or(self.hoa_monthly, 0.0),
            appreciation_rate: finite_or(self.appreciation_rate, 0.0),
            rental_income: finite_or(self.rental_income, 0.0),
            monthly_rent: finite_or(self.monthly_rent, 0.0),
            rent_increase_rate: finite_or(self.rent_increase_rate, 0.0),
            investment_start_balance: finite_or(self.investment_start_balance, 0.0),
            monthly_budget: finite_or(self.monthly_budget, 0.0),
            investment_return_rate: finite_or(self.investment_return_rate, 0.0),
            time_horizon_years: finite_or(self.time_horizon_years, DEFAULT_TIME_HORIZON_YEARS),
        }
    }

    /// Number of projected months. The horizon is clamped to 0..=50 years,
    /// so a series never holds more than 601 entries.
    pub fn months(&self) -> usize {
        let years = finite_or(self.time_horizon_years, DEFAULT_TIME_HORIZON_YEARS)
            .clamp(0.0, MAX_TIME_HORIZON_YEARS);
        (years * 12.0).round() as usize
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnershipProjection {
    pub net_worth: Vec<f64>,
    pub home_equity: Vec<f64>,
    pub investments: Vec<f64>,
    pub cumulative_cost: Vec<f64>,
    pub monthly_payment: f64,
    pub monthly_housing_cost: f64,
    pub effective_monthly_housing_cost: f64,
    pub monthly_investment: f64,
    pub down_payment: f64,
    pub loan_amount: f64,
    pub starting_investment_balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalProjection {
    pub net_worth: Vec<f64>,
    pub investments: Vec<f64>,
    pub monthly_rent: Vec<f64>,
    pub cumulative_cost: Vec<f64>,
    pub starting_investment_balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub months: usize,
    pub own: OwnershipProjection,
    pub rent: RentalProjection,
    /// First month (as fractional years) where owning pulls ahead; `None`
    /// when no crossing occurs within the horizon.
    pub break_even_years: Option<f64>,
}
