use super::types::{ComparisonResult, OwnershipProjection, RentalProjection, ScenarioParams};

const MONTHS_PER_YEAR: f64 = 12.0;

fn coerce(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Fixed-rate amortizing-loan payment. Falls back to straight-line
/// `principal / total_months` for a zero or negative rate and to 0 when the
/// principal or term is degenerate, so all-zero form states still render.
pub fn monthly_payment(principal: f64, annual_rate_pct: f64, term_years: f64) -> f64 {
    let principal = coerce(principal);
    let rate = coerce(annual_rate_pct);
    let total_months = coerce(term_years) * MONTHS_PER_YEAR;

    if principal <= 0.0 || total_months <= 0.0 {
        return 0.0;
    }
    if rate <= 0.0 {
        return principal / total_months;
    }

    let monthly_rate = rate / 100.0 / MONTHS_PER_YEAR;
    let growth = (1.0 + monthly_rate).powf(total_months);
    principal * monthly_rate * growth / (growth - 1.0)
}

/// Outstanding principal after `months_paid` payments. Clamps to the full
/// principal before the first payment and to exactly 0 from the final
/// payment onward; a zero rate runs the balance off linearly.
pub fn remaining_balance(
    principal: f64,
    annual_rate_pct: f64,
    term_years: f64,
    months_paid: f64,
) -> f64 {
    let principal = coerce(principal);
    let rate = coerce(annual_rate_pct);
    let total_months = coerce(term_years) * MONTHS_PER_YEAR;
    let months_paid = coerce(months_paid);

    if principal <= 0.0 || total_months <= 0.0 {
        return 0.0;
    }
    if months_paid < 0.0 {
        return principal;
    }
    if months_paid >= total_months {
        return 0.0;
    }
    if rate <= 0.0 {
        return principal * (1.0 - months_paid / total_months);
    }

    let monthly_rate = rate / 100.0 / MONTHS_PER_YEAR;
    let full = (1.0 + monthly_rate).powf(total_months);
    let paid = (1.0 + monthly_rate).powf(months_paid);
    (principal * (full - paid) / (full - 1.0)).max(0.0)
}

/// Contribution-then-growth balance series. `series[0]` is the starting
/// principal; each subsequent month applies the monthly return to the
/// balance plus that month's contribution.
pub fn investment_growth(
    principal: f64,
    monthly_contribution: f64,
    annual_return_pct: f64,
    months: usize,
) -> Vec<f64> {
    let contribution = coerce(monthly_contribution);
    let monthly_rate = coerce(annual_return_pct) / MONTHS_PER_YEAR / 100.0;

    let mut series = Vec::with_capacity(months + 1);
    let mut balance = coerce(principal).max(0.0);
    series.push(balance);
    for _ in 0..months {
        balance = ((balance + contribution) * (1.0 + monthly_rate)).max(0.0);
        series.push(balance);
    }
    series
}

/// Same recurrence with a per-month contribution schedule: month m
/// (1-indexed) draws from `contributions[m - 1]`, defaulting to 0 when the
/// entry is missing or non-finite.
pub fn investment_growth_variable(
    principal: f64,
    contributions: &[f64],
    annual_return_pct: f64,
    months: usize,
) -> Vec<f64> {
    let monthly_rate = coerce(annual_return_pct) / MONTHS_PER_YEAR / 100.0;

    let mut series = Vec::with_capacity(months + 1);
    let mut balance = coerce(principal).max(0.0);
    series.push(balance);
    for month in 1..=months {
        let contribution = contributions
            .get(month - 1)
            .copied()
            .map(coerce)
            .unwrap_or(0.0);
        balance = ((balance + contribution) * (1.0 + monthly_rate)).max(0.0);
        series.push(balance);
    }
    series
}

/// Home equity per month: appreciated value minus outstanding mortgage,
/// floored at 0. Appreciation compounds annually, applied at month
/// granularity through a fractional-year exponent.
pub fn home_equity_series(
    initial_price: f64,
    appreciation_rate_pct: f64,
    loan_principal: f64,
    mortgage_rate_pct: f64,
    term_years: f64,
    months: usize,
) -> Vec<f64> {
    let price = coerce(initial_price).max(0.0);
    let growth = (1.0 + coerce(appreciation_rate_pct) / 100.0).max(0.0);

    let mut series = Vec::with_capacity(months + 1);
    for month in 0..=months {
        let value = price * growth.powf(month as f64 / MONTHS_PER_YEAR);
        let balance = remaining_balance(
            loan_principal,
            mortgage_rate_pct,
            term_years,
            month as f64,
        );
        series.push((value - balance).max(0.0));
    }
    series
}

pub fn monthly_housing_cost(
    monthly_mortgage_payment: f64,
    annual_property_tax: f64,
    annual_insurance: f64,
    annual_maintenance: f64,
    monthly_hoa: f64,
) -> f64 {
    coerce(monthly_mortgage_payment)
        + (coerce(annual_property_tax) + coerce(annual_insurance) + coerce(annual_maintenance))
            / MONTHS_PER_YEAR
        + coerce(monthly_hoa)
}

/// Rent per month, escalating with the same fractional-year-exponent
/// convention as home appreciation.
pub fn rental_cost_series(initial_rent: f64, increase_rate_pct: f64, months: usize) -> Vec<f64> {
    let rent = coerce(initial_rent).max(0.0);
    let growth = (1.0 + coerce(increase_rate_pct) / 100.0).max(0.0);
    (0..=months)
        .map(|month| rent * growth.powf(month as f64 / MONTHS_PER_YEAR))
        .collect()
}

/// First month where the own trajectory strictly exceeds the rent
/// trajectory, as fractional years. Equal values do not count, and the scan
/// stops at the first crossing.
pub fn find_break_even(own_net_worth: &[f64], rent_net_worth: &[f64]) -> Option<f64> {
    own_net_worth
        .iter()
        .zip(rent_net_worth)
        .position(|(own, rent)| own > rent)
        .map(|month| month as f64 / MONTHS_PER_YEAR)
}

/// Projects both strategies month by month and locates the break-even
/// point. Never fails: out-of-range inputs are normalized or clamped and
/// the result is always finite.
pub fn run_comparison(params: &ScenarioParams) -> ComparisonResult {
    let params = params.normalized();
    let months = params.months();

    let down_payment = params.down_payment_pct / 100.0 * params.home_price;
    let loan_amount = params.home_price - down_payment;
    let payment = monthly_payment(loan_amount, params.mortgage_rate, params.loan_term_years);
    let annual_property_tax = params.property_tax_rate / 100.0 * params.home_price;
    let housing_cost = monthly_housing_cost(
        payment,
        annual_property_tax,
        params.home_insurance,
        params.maintenance,
        params.hoa_monthly,
    );

    // Rental income offsets the cost of ownership but never drives it
    // negative. Investment accounting intentionally differs: the full
    // rental income is reinvested on top of whatever the budget leaves
    // after the gross housing cost.
    let effective_housing_cost = (housing_cost - params.rental_income).max(0.0);
    let own_monthly_investment =
        (params.monthly_budget - housing_cost + params.rental_income).max(0.0);
    let own_starting_balance = (params.investment_start_balance - down_payment).max(0.0);

    let home_equity = home_equity_series(
        params.home_price,
        params.appreciation_rate,
        loan_amount,
        params.mortgage_rate,
        params.loan_term_years,
        months,
    );
    let own_investments = investment_growth(
        own_starting_balance,
        own_monthly_investment,
        params.investment_return_rate,
        months,
    );
    let own_net_worth: Vec<f64> = home_equity
        .iter()
        .zip(&own_investments)
        .map(|(equity, invested)| equity + invested)
        .collect();

    let rent_costs = rental_cost_series(params.monthly_rent, params.rent_increase_rate, months);
    let rent_contributions: Vec<f64> = rent_costs
        .iter()
        .map(|rent| (params.monthly_budget - rent).max(0.0))
        .collect();
    let rent_starting_balance = params.investment_start_balance.max(0.0);
    let rent_investments = investment_growth_variable(
        rent_starting_balance,
        &rent_contributions,
        params.investment_return_rate,
        months,
    );
    let rent_net_worth = rent_investments.clone();

    let own_cumulative_cost = cumulative_flat(effective_housing_cost, months);
    let rent_cumulative_cost = cumulative_in_force(&rent_costs, months);

    let break_even_years = find_break_even(&own_net_worth, &rent_net_worth);

    ComparisonResult {
        months,
        own: OwnershipProjection {
            net_worth: own_net_worth,
            home_equity,
            investments: own_investments,
            cumulative_cost: own_cumulative_cost,
            monthly_payment: payment,
            monthly_housing_cost: housing_cost,
            effective_monthly_housing_cost: effective_housing_cost,
            monthly_investment: own_monthly_investment,
            down_payment,
            loan_amount,
            starting_investment_balance: own_starting_balance,
        },
        rent: RentalProjection {
            net_worth: rent_net_worth,
            investments: rent_investments,
            monthly_rent: rent_costs,
            cumulative_cost: rent_cumulative_cost,
            starting_investment_balance: rent_starting_balance,
        },
        break_even_years,
    }
}

fn cumulative_flat(monthly_cost: f64, months: usize) -> Vec<f64> {
    let cost = coerce(monthly_cost).max(0.0);
    let mut series = Vec::with_capacity(months + 1);
    let mut total = 0.0;
    series.push(total);
    for _ in 0..months {
        total += cost;
        series.push(total);
    }
    series
}

// Month m accumulates the cost in force at its start, matching the
// contribution convention of investment_growth_variable.
fn cumulative_in_force(monthly_costs: &[f64], months: usize) -> Vec<f64> {
    let mut series = Vec::with_capacity(months + 1);
    let mut total = 0.0;
    series.push(total);
    for month in 1..=months {
        total += monthly_costs
            .get(month - 1)
            .copied()
            .map(coerce)
            .unwrap_or(0.0)
            .max(0.0);
        series.push(total);
    }
    series
}
