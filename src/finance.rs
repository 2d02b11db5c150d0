//! Investment projections for land purchases.
//!
//! Land value is assumed to appreciate at a constant compound annual rate. Optionally the land is
//! developed, which adds a per-square-metre construction cost to the initial outlay and produces
//! a rental income proportional to that outlay.
//!
//! Note that appreciation compounds on the purchase price only, not on the total investment
//! including development costs.
use crate::parcel::LandParcel;
use crate::units::{Area, Dimensionless, Money, MoneyPerArea};
use clap::ValueEnum;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

/// How the land will be developed after purchase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum DevelopmentType {
    /// Hold the land without building on it
    #[default]
    #[value(name = "none")]
    LandOnly,
    /// Residential development
    Residential,
    /// Commercial development
    Commercial,
    /// Mixed-use development
    Mixed,
}

/// Construction cost and expected rental yield for one type of development
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct DevelopmentRates {
    /// Construction cost per square metre of land
    pub cost_per_sqm: MoneyPerArea,
    /// Annual rental income as a percentage of the total investment
    pub rental_yield: f64,
}

impl DevelopmentRates {
    const fn new(cost_per_sqm: f64, rental_yield: f64) -> Self {
        Self {
            cost_per_sqm: MoneyPerArea(cost_per_sqm),
            rental_yield,
        }
    }
}

/// The rates for each type of development
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DevelopmentRateTable {
    /// Rates for residential development
    pub residential: DevelopmentRates,
    /// Rates for commercial development
    pub commercial: DevelopmentRates,
    /// Rates for mixed-use development
    pub mixed: DevelopmentRates,
}

impl Default for DevelopmentRateTable {
    fn default() -> Self {
        Self {
            residential: DevelopmentRates::new(150_000.0, 5.0),
            commercial: DevelopmentRates::new(200_000.0, 8.0),
            mixed: DevelopmentRates::new(180_000.0, 7.0),
        }
    }
}

impl DevelopmentRateTable {
    /// The rates for a development type, or `None` if the land is not developed
    pub fn get(&self, development_type: DevelopmentType) -> Option<&DevelopmentRates> {
        match development_type {
            DevelopmentType::LandOnly => None,
            DevelopmentType::Residential => Some(&self.residential),
            DevelopmentType::Commercial => Some(&self.commercial),
            DevelopmentType::Mixed => Some(&self.mixed),
        }
    }

    /// Iterate over the development types and their rates
    pub fn iter(&self) -> impl Iterator<Item = (DevelopmentType, &DevelopmentRates)> {
        [
            (DevelopmentType::Residential, &self.residential),
            (DevelopmentType::Commercial, &self.commercial),
            (DevelopmentType::Mixed, &self.mixed),
        ]
        .into_iter()
    }
}

/// Calculator defaults for a dataset, read from `investment.toml`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct InvestmentDefaults {
    /// Default purchase price
    pub purchase_price: Money,
    /// Default land size
    pub land_size: Area,
    /// Default annual appreciation, in percent
    pub appreciation_rate: f64,
    /// Default holding period, in years
    pub holding_period: u32,
    /// Construction costs and rental yields
    pub development: DevelopmentRateTable,
}

impl Default for InvestmentDefaults {
    fn default() -> Self {
        Self {
            purchase_price: Money(50_000_000.0),
            land_size: Area(1000.0),
            appreciation_rate: 15.0,
            holding_period: 5,
            development: DevelopmentRateTable::default(),
        }
    }
}

impl InvestmentDefaults {
    /// Parameters made up entirely of default values, with no development
    pub fn parameters(&self) -> InvestmentParameters {
        InvestmentParameters {
            purchase_price: self.purchase_price,
            land_size: self.land_size,
            appreciation_rate: self.appreciation_rate,
            holding_period: self.holding_period,
            development_type: DevelopmentType::LandOnly,
            rental_yield_override: None,
        }
    }
}

/// The user's chosen purchase parameters
#[derive(Debug, Clone, PartialEq)]
pub struct InvestmentParameters {
    /// The price paid for the land
    pub purchase_price: Money,
    /// The size of the land
    pub land_size: Area,
    /// Assumed annual appreciation of the land value, in percent
    pub appreciation_rate: f64,
    /// How long the land is held, in whole years
    pub holding_period: u32,
    /// How the land will be developed
    pub development_type: DevelopmentType,
    /// A rental yield (percent) to use instead of the development type's usual yield
    pub rental_yield_override: Option<f64>,
}

impl InvestmentParameters {
    /// Parameters for a specific parcel, taking the price and size from the parcel itself
    pub fn for_parcel(parcel: &LandParcel, defaults: &InvestmentDefaults) -> Self {
        Self {
            purchase_price: parcel.price_money(),
            land_size: parcel.area(),
            ..defaults.parameters()
        }
    }

    /// The construction cost per square metre for the chosen development type
    pub fn development_cost_per_sqm(&self, rates: &DevelopmentRateTable) -> MoneyPerArea {
        rates
            .get(self.development_type)
            .map_or(MoneyPerArea(0.0), |rates| rates.cost_per_sqm)
    }

    /// The rental yield (percent) for the chosen development type.
    ///
    /// Undeveloped land yields nothing, whatever the override.
    pub fn rental_yield(&self, rates: &DevelopmentRateTable) -> f64 {
        rates.get(self.development_type).map_or(0.0, |rates| {
            self.rental_yield_override.unwrap_or(rates.rental_yield)
        })
    }

    /// Check that the parameters can be projected without producing NaN or infinities
    pub fn validate(&self) -> Result<(), ProjectionError> {
        let price = self.purchase_price.value();
        if !(price.is_finite() && price > 0.0) {
            return Err(ProjectionError::NonPositivePrice { price });
        }

        if self.holding_period == 0 {
            return Err(ProjectionError::ZeroHoldingPeriod);
        }

        let size = self.land_size.value();
        if !(size.is_finite() && size >= 0.0) {
            return Err(ProjectionError::InvalidLandSize { size });
        }

        // Below -100% the base of the power goes negative
        let rate = self.appreciation_rate;
        if !(rate.is_finite() && rate > -100.0) {
            return Err(ProjectionError::InvalidAppreciationRate { rate });
        }

        if let Some(rental_yield) = self.rental_yield_override {
            if !(rental_yield.is_finite() && rental_yield >= 0.0) {
                return Err(ProjectionError::InvalidRentalYield { rental_yield });
            }
        }

        Ok(())
    }
}

/// Why a projection could not be made
#[derive(Debug, Clone, Copy, PartialEq, Display, Error)]
pub enum ProjectionError {
    /// The purchase price is zero, negative or not a number
    #[display("Purchase price must be greater than zero (got {price})")]
    NonPositivePrice {
        /// The offending price
        price: f64,
    },
    /// The holding period is zero years
    #[display("Holding period must be at least one year")]
    ZeroHoldingPeriod,
    /// The land size is negative or not finite
    #[display("Land size must be a finite, non-negative number (got {size})")]
    InvalidLandSize {
        /// The offending size
        size: f64,
    },
    /// The appreciation rate is not finite or is -100% or lower
    #[display("Appreciation rate must be a finite percentage above -100 (got {rate})")]
    InvalidAppreciationRate {
        /// The offending rate
        rate: f64,
    },
    /// The rental yield override is negative or not finite
    #[display("Rental yield must be a finite, non-negative percentage (got {rental_yield})")]
    InvalidRentalYield {
        /// The offending yield
        rental_yield: f64,
    },
    /// The inputs are valid but too large to project
    #[display("Projection overflowed")]
    NonFiniteResult,
}

/// Estimated returns for an investment
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Projection {
    /// Cost of developing the land
    pub development_cost: Money,
    /// Purchase price plus development cost
    pub total_investment: Money,
    /// Value of the land at the end of the holding period
    pub future_value: Money,
    /// Gain in land value over the holding period
    pub total_return: Money,
    /// Compound annual growth rate of the land value, in percent
    pub annualized_return: f64,
    /// Expected annual rental income from the development
    pub annual_rental_income: Money,
}

impl Projection {
    fn is_finite(&self) -> bool {
        self.development_cost.is_finite()
            && self.total_investment.is_finite()
            && self.future_value.is_finite()
            && self.total_return.is_finite()
            && self.annualized_return.is_finite()
            && self.annual_rental_income.is_finite()
    }
}

/// Project the returns on a land investment.
///
/// # Arguments
///
/// * `params` - The purchase parameters
/// * `rates` - Construction costs and rental yields per development type
///
/// # Returns
///
/// The projection, or an error if the parameters are invalid or the result is not finite.
pub fn project(
    params: &InvestmentParameters,
    rates: &DevelopmentRateTable,
) -> Result<Projection, ProjectionError> {
    params.validate()?;

    let purchase_price = params.purchase_price;
    let development_cost = params.development_cost_per_sqm(rates) * params.land_size;
    let total_investment = purchase_price + development_cost;

    let growth = Dimensionless(1.0) + Dimensionless::from_percent(params.appreciation_rate);
    let years =
        i32::try_from(params.holding_period).map_err(|_| ProjectionError::NonFiniteResult)?;
    let future_value = purchase_price * growth.powi(years);
    let total_return = future_value - purchase_price;

    let annualized_return = ((future_value / purchase_price)
        .powf(1.0 / f64::from(params.holding_period))
        - Dimensionless(1.0))
    .to_percent();

    let annual_rental_income =
        total_investment * Dimensionless::from_percent(params.rental_yield(rates));

    let projection = Projection {
        development_cost,
        total_investment,
        future_value,
        total_return,
        annualized_return,
        annual_rental_income,
    };

    if !projection.is_finite() {
        return Err(ProjectionError::NonFiniteResult);
    }

    Ok(projection)
}
