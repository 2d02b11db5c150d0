//! The command line interface for exploring a land catalog.
use crate::catalog::Catalog;
use crate::comparison::ComparisonTable;
use crate::dataset::{REFERENCE_DATASET, extract_dataset};
use crate::filter::{FilterBounds, FilterCriteria};
use crate::finance::{DevelopmentType, InvestmentDefaults, InvestmentParameters, project};
use crate::format::{format_naira, format_size};
use crate::input::read_investment_defaults;
use crate::location::LocationHierarchy;
use crate::log;
use crate::output::{create_output_file, write_markers, write_parcels};
use crate::parcel::Zoning;
use crate::session::DiscoverySession;
use crate::settings::Settings;
use crate::units::{Area, Money};
use ::log::{info, warn};
use anyhow::{Context, Result, bail};
use clap::{Args, CommandFactory, Parser, Subcommand};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub mod dataset;
use dataset::DatasetSubcommands;
pub mod settings;
use settings::SettingsSubcommands;

/// The command line interface for LandScout.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// The available commands.
    #[command(subcommand)]
    command: Option<Commands>,
    /// Flag to provide the CLI docs as markdown
    #[arg(long, hide = true)]
    markdown_help: bool,
}

/// Options for choosing the dataset and where logs go
#[derive(Args, Default)]
pub struct DatasetOpts {
    /// Directory containing the dataset (defaults to the bundled reference catalog)
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,
    /// Directory in which to write log files
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

/// Search filters. State and city names are matched ignoring case.
#[derive(Args, Default)]
pub struct FilterArgs {
    /// Only parcels in this state
    #[arg(long)]
    pub state: Option<String>,
    /// Only parcels in this city
    #[arg(long)]
    pub city: Option<String>,
    /// Only parcels with this zoning (e.g. residential, mixed-use)
    #[arg(long)]
    pub zoning: Option<Zoning>,
    /// Lowest price, in naira
    #[arg(long)]
    pub min_price: Option<u64>,
    /// Highest price, in naira (defaults to the price ceiling in settings)
    #[arg(long)]
    pub max_price: Option<u64>,
    /// Smallest size, in square metres
    #[arg(long)]
    pub min_size: Option<f64>,
    /// Largest size, in square metres (defaults to the size ceiling in settings)
    #[arg(long)]
    pub max_size: Option<f64>,
    /// Free text to look for in titles, addresses, descriptions, features and amenities
    #[arg(short, long)]
    pub query: Option<String>,
}

impl FilterArgs {
    /// Convert the arguments to criteria, using the canonical spelling of known places
    fn to_criteria(&self, locations: &LocationHierarchy, bounds: &FilterBounds) -> FilterCriteria {
        let state = self.state.as_deref().map(|name| {
            locations.find_state(name).map_or_else(
                || {
                    warn!("Unknown state {name}");
                    name.to_string()
                },
                ToString::to_string,
            )
        });

        let city = self.city.as_deref().map(|name| {
            let found = match state.as_deref() {
                Some(state) => locations.find_city(state, name),
                None => locations
                    .states()
                    .find_map(|state| locations.find_city(state, name)),
            };
            found.map_or_else(
                || {
                    warn!("Unknown city {name}");
                    name.to_string()
                },
                ToString::to_string,
            )
        });

        let price_range =
            self.min_price.unwrap_or(0)..=self.max_price.unwrap_or(bounds.price_ceiling);
        let size_range = self.min_size.unwrap_or(0.0)..=self.max_size.unwrap_or(bounds.size_ceiling);
        if price_range.is_empty() || size_range.is_empty() {
            warn!("The minimum is above the maximum, so nothing will match");
        }

        FilterCriteria {
            state,
            city,
            zoning: self.zoning,
            price_range,
            size_range,
            search_text: self.query.clone(),
        }
    }
}

/// Options for the project command
#[derive(Args, Default)]
pub struct ProjectOpts {
    /// Take the price and size from this parcel
    #[arg(short, long, conflicts_with_all = ["price", "size"])]
    pub parcel: Option<String>,
    /// Purchase price, in naira
    #[arg(long)]
    pub price: Option<f64>,
    /// Land size, in square metres
    #[arg(long)]
    pub size: Option<f64>,
    /// Annual appreciation rate, in percent
    #[arg(short, long)]
    pub rate: Option<f64>,
    /// Holding period, in years
    #[arg(short, long)]
    pub years: Option<u32>,
    /// How the land will be developed
    #[arg(long, value_enum, default_value_t)]
    pub development: DevelopmentType,
    /// Annual rental yield, in percent, replacing the usual yield for the development type
    #[arg(long)]
    pub rental_yield: Option<f64>,
}

/// The available commands.
#[derive(Subcommand)]
enum Commands {
    /// Search the catalog.
    Search {
        /// Search filters
        #[command(flatten)]
        filters: FilterArgs,
        /// Write the results to this CSV file instead of the console
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Dataset options
        #[command(flatten)]
        opts: DatasetOpts,
    },
    /// Compare parcels side by side.
    Compare {
        /// The IDs of the parcels to compare, in column order
        #[arg(required = true)]
        ids: Vec<String>,
        /// Dataset options
        #[command(flatten)]
        opts: DatasetOpts,
    },
    /// Project the returns on a land purchase.
    Project {
        /// Purchase parameters
        #[command(flatten)]
        params: ProjectOpts,
        /// Dataset options
        #[command(flatten)]
        opts: DatasetOpts,
    },
    /// Place the parcels matching a search on the map.
    Map {
        /// Search filters
        #[command(flatten)]
        filters: FilterArgs,
        /// Seed for the marker jitter, for reproducible output
        #[arg(long)]
        seed: Option<u64>,
        /// Write the markers to this CSV file instead of the console
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Dataset options
        #[command(flatten)]
        opts: DatasetOpts,
    },
    /// List states, or the cities of a state.
    Locations {
        /// The state whose cities should be listed
        state: Option<String>,
        /// Dataset options
        #[command(flatten)]
        opts: DatasetOpts,
    },
    /// Validate a dataset.
    Validate {
        /// The path to the dataset directory.
        data_dir: PathBuf,
    },
    /// Manage bundled datasets.
    Dataset {
        /// The available subcommands for managing bundled datasets.
        #[command(subcommand)]
        subcommand: DatasetSubcommands,
    },
    /// Manage settings file.
    Settings {
        /// The subcommands for managing the settings file.
        #[command(subcommand)]
        subcommand: SettingsSubcommands,
    },
}

impl Commands {
    /// Execute the supplied CLI command
    fn execute(self) -> Result<()> {
        match self {
            Self::Search {
                filters,
                output,
                opts,
            } => handle_search_command(&filters, output.as_deref(), &opts, None),
            Self::Compare { ids, opts } => handle_compare_command(&ids, &opts, None),
            Self::Project { params, opts } => handle_project_command(&params, &opts, None),
            Self::Map {
                filters,
                seed,
                output,
                opts,
            } => handle_map_command(&filters, seed, output.as_deref(), &opts, None),
            Self::Locations { state, opts } => {
                handle_locations_command(state.as_deref(), &opts, None)
            }
            Self::Validate { data_dir } => handle_validate_command(&data_dir, None),
            Self::Dataset { subcommand } => subcommand.execute(),
            Self::Settings { subcommand } => subcommand.execute(),
        }
    }
}

/// Parse CLI arguments and start LandScout
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    // Invoked as: `$ landscout --markdown-help`
    if cli.markdown_help {
        clap_markdown::print_help_markdown::<Cli>();
        return Ok(());
    }

    let Some(command) = cli.command else {
        // Output program help in markdown format
        let help_str = Cli::command().render_long_help().to_string();
        println!("{help_str}");
        return Ok(());
    };

    command.execute()
}

/// Load program settings (if not provided) and initialise the program logger
fn init(settings: Option<Settings>, log_dir: Option<&Path>) -> Result<Settings> {
    let settings = if let Some(settings) = settings {
        settings
    } else {
        Settings::load().context("Failed to load settings.")?
    };

    log::init(Some(&settings.log_level), log_dir).context("Failed to initialise logging.")?;

    Ok(settings)
}

/// Load the catalog and investment defaults from `data_dir`, or the bundled reference dataset
fn load_dataset(data_dir: Option<&Path>) -> Result<(Catalog, InvestmentDefaults)> {
    // Keep the extracted files until loading is complete
    let temp_dir;
    let data_dir = if let Some(data_dir) = data_dir {
        data_dir.to_path_buf()
    } else {
        temp_dir = TempDir::new().context("Failed to create temporary directory.")?;
        let path = temp_dir.path().join(REFERENCE_DATASET);
        extract_dataset(REFERENCE_DATASET, &path)?;
        path
    };

    let catalog = Catalog::from_path(&data_dir).context("Failed to load dataset.")?;
    let defaults = read_investment_defaults(&data_dir).context("Failed to load dataset.")?;

    Ok((catalog, defaults))
}

/// Handle the `search` command.
pub fn handle_search_command(
    filters: &FilterArgs,
    output: Option<&Path>,
    opts: &DatasetOpts,
    settings: Option<Settings>,
) -> Result<()> {
    let settings = init(settings, opts.log_dir.as_deref())?;
    let (catalog, _) = load_dataset(opts.data_dir.as_deref())?;

    let criteria = filters.to_criteria(catalog.locations(), &settings.filter_bounds());
    let results = catalog.search(&criteria);
    info!("Found {} of {} parcels", results.len(), catalog.len());

    let parcels = results.iter().map(|parcel| &**parcel);
    if let Some(output) = output {
        write_parcels(create_output_file(output)?, parcels)?;
        info!("Results written to {}", output.display());
    } else {
        for parcel in parcels {
            println!(
                "{}\t{}\t{}, {}\t{}\t{}\t{}",
                parcel.id,
                parcel.title,
                parcel.city,
                parcel.state,
                parcel.zoning,
                format_naira(parcel.price as f64),
                format_size(parcel.size_sqm)
            );
        }
    }

    Ok(())
}

/// Handle the `compare` command.
pub fn handle_compare_command(
    ids: &[String],
    opts: &DatasetOpts,
    settings: Option<Settings>,
) -> Result<()> {
    let settings = init(settings, opts.log_dir.as_deref())?;
    let (catalog, _) = load_dataset(opts.data_dir.as_deref())?;

    let mut session = DiscoverySession::new(&settings.filter_bounds());
    for id in ids {
        let parcel = catalog.get_by_str(id)?;
        let outcome = session.toggle_compare(&parcel.id);
        info!("{}", outcome.message(&parcel.title));
    }

    let table = ComparisonTable::new(session.comparison(), &catalog);
    println!("\t{}", table.headings.join("\t"));
    for row in &table.rows {
        println!("{}\t{}", row.label, row.cells.join("\t"));
    }

    Ok(())
}

/// Handle the `project` command.
pub fn handle_project_command(
    params: &ProjectOpts,
    opts: &DatasetOpts,
    settings: Option<Settings>,
) -> Result<()> {
    init(settings, opts.log_dir.as_deref())?;
    let (catalog, defaults) = load_dataset(opts.data_dir.as_deref())?;

    let mut investment = if let Some(id) = &params.parcel {
        InvestmentParameters::for_parcel(catalog.get_by_str(id)?, &defaults)
    } else {
        defaults.parameters()
    };
    if let Some(price) = params.price {
        investment.purchase_price = Money(price);
    }
    if let Some(size) = params.size {
        investment.land_size = Area(size);
    }
    if let Some(rate) = params.rate {
        investment.appreciation_rate = rate;
    }
    if let Some(years) = params.years {
        investment.holding_period = years;
    }
    investment.development_type = params.development;
    investment.rental_yield_override = params.rental_yield;

    let projection = project(&investment, &defaults.development)
        .context("Could not project returns for these parameters.")?;

    println!(
        "Total investment:      {}",
        format_naira(projection.total_investment.value())
    );
    println!(
        "Development cost:      {}",
        format_naira(projection.development_cost.value())
    );
    println!(
        "Value after {} years: {}",
        investment.holding_period,
        format_naira(projection.future_value.value())
    );
    println!(
        "Total return:          {}",
        format_naira(projection.total_return.value())
    );
    println!(
        "Annualised return:     {:.2}%",
        projection.annualized_return
    );
    println!(
        "Annual rental income:  {}",
        format_naira(projection.annual_rental_income.value())
    );

    Ok(())
}

/// Handle the `map` command.
pub fn handle_map_command(
    filters: &FilterArgs,
    seed: Option<u64>,
    output: Option<&Path>,
    opts: &DatasetOpts,
    settings: Option<Settings>,
) -> Result<()> {
    let settings = init(settings, opts.log_dir.as_deref())?;
    let (catalog, _) = load_dataset(opts.data_dir.as_deref())?;

    let mut session = DiscoverySession::new(&settings.filter_bounds());
    session.criteria = filters.to_criteria(catalog.locations(), &settings.filter_bounds());
    let resolver = catalog.resolver().with_jitter(settings.marker_jitter);

    let mut rng: Box<dyn RngCore> = match seed {
        Some(seed) => Box::new(ChaCha8Rng::seed_from_u64(seed)),
        None => Box::new(rand::thread_rng()),
    };
    let markers = session.markers(&catalog, &resolver, &mut *rng);
    info!("Placed {} markers", markers.len());

    if let Some(output) = output {
        write_markers(create_output_file(output)?, &markers)?;
        info!("Markers written to {}", output.display());
    } else {
        write_markers(io::stdout().lock(), &markers)?;
    }

    Ok(())
}

/// Handle the `locations` command.
pub fn handle_locations_command(
    state: Option<&str>,
    opts: &DatasetOpts,
    settings: Option<Settings>,
) -> Result<()> {
    init(settings, opts.log_dir.as_deref())?;
    let (catalog, _) = load_dataset(opts.data_dir.as_deref())?;
    let locations = catalog.locations();

    let Some(name) = state else {
        for state in locations.states() {
            println!("{state} ({} cities)", locations.cities(state).count());
        }
        return Ok(());
    };

    let Some(state) = locations.find_state(name) else {
        bail!("Unknown state {name}");
    };
    for city in locations.cities(state) {
        println!("{city}");
    }

    Ok(())
}

/// Handle the `validate` command.
pub fn handle_validate_command(data_dir: &Path, settings: Option<Settings>) -> Result<()> {
    // We won't save log files when running the validate command
    init(settings, None)?;

    // Load/validate the dataset
    Catalog::from_path(data_dir).context("Failed to validate dataset.")?;
    read_investment_defaults(data_dir).context("Failed to validate dataset.")?;
    info!("Dataset validation successful!");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::locations;
    use rstest::rstest;

    #[rstest]
    fn test_to_criteria_normalises_names(locations: LocationHierarchy) {
        let filters = FilterArgs {
            state: Some("ogun".into()),
            city: Some("AGBARA".into()),
            ..Default::default()
        };
        let criteria = filters.to_criteria(&locations, &FilterBounds::default());
        assert_eq!(criteria.state.as_deref(), Some("Ogun"));
        assert_eq!(criteria.city.as_deref(), Some("Agbara"));
    }

    #[rstest]
    fn test_to_criteria_city_without_state(locations: LocationHierarchy) {
        let filters = FilterArgs {
            city: Some("umuahia".into()),
            ..Default::default()
        };
        let criteria = filters.to_criteria(&locations, &FilterBounds::default());
        assert_eq!(criteria.state, None);
        assert_eq!(criteria.city.as_deref(), Some("Umuahia"));
    }

    #[rstest]
    fn test_to_criteria_unknown_names_kept(locations: LocationHierarchy) {
        let filters = FilterArgs {
            state: Some("Atlantis".into()),
            ..Default::default()
        };
        let criteria = filters.to_criteria(&locations, &FilterBounds::default());
        assert_eq!(criteria.state.as_deref(), Some("Atlantis"));
    }

    #[rstest]
    fn test_to_criteria_ranges(locations: LocationHierarchy) {
        let bounds = FilterBounds {
            price_ceiling: 100,
            size_ceiling: 50.0,
        };
        let filters = FilterArgs {
            min_price: Some(10),
            max_size: Some(20.0),
            ..Default::default()
        };
        let criteria = filters.to_criteria(&locations, &bounds);
        assert_eq!(criteria.price_range, 10..=100);
        assert_eq!(criteria.size_range, 0.0..=20.0);
    }

    #[test]
    fn test_cli_parses() {
        Cli::command().debug_assert();
    }
}
