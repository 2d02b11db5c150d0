//! Code for reading investment calculator defaults from a TOML file.
use super::*;
use crate::finance::{DevelopmentRates, InvestmentDefaults};

const INVESTMENT_FILE_NAME: &str = "investment.toml";

/// Check that a development type's rates are usable
fn check_development_rates(name: &str, rates: &DevelopmentRates) -> Result<()> {
    let cost = rates.cost_per_sqm.value();
    ensure!(
        cost.is_finite() && cost >= 0.0,
        "Construction cost for {name} development must be a finite, non-negative number"
    );
    ensure!(
        rates.rental_yield.is_finite() && rates.rental_yield >= 0.0,
        "Rental yield for {name} development must be a finite, non-negative percentage"
    );

    Ok(())
}

/// Validate calculator defaults after reading in file
fn validate(defaults: &InvestmentDefaults) -> Result<()> {
    let price = defaults.purchase_price.value();
    ensure!(
        price.is_finite() && price > 0.0,
        "purchase_price must be a finite number greater than zero"
    );
    let size = defaults.land_size.value();
    ensure!(
        size.is_finite() && size >= 0.0,
        "land_size must be a finite, non-negative number"
    );
    ensure!(
        defaults.appreciation_rate.is_finite() && defaults.appreciation_rate > -100.0,
        "appreciation_rate must be a finite percentage above -100"
    );
    ensure!(
        defaults.holding_period > 0,
        "holding_period cannot be zero"
    );

    for (development_type, rates) in defaults.development.iter() {
        check_development_rates(&format!("{development_type:?}").to_lowercase(), rates)?;
    }

    Ok(())
}

/// Read investment calculator defaults from `investment.toml`.
///
/// # Arguments
///
/// * `dataset_dir` - Folder containing the dataset files
///
/// # Returns
///
/// The defaults or, if the file doesn't exist, the built-in values (see
/// [`InvestmentDefaults::default()`]).
pub fn read_investment_defaults(dataset_dir: &Path) -> Result<InvestmentDefaults> {
    let file_path = dataset_dir.join(INVESTMENT_FILE_NAME);
    if !file_path.exists() {
        return Ok(InvestmentDefaults::default());
    }

    let defaults: InvestmentDefaults = read_toml(&file_path)?;
    validate(&defaults).with_context(|| input_err_msg(&file_path))?;

    Ok(defaults)
}
