use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use plugit_geofence::api::geocode_address;
use plugit_geofence::config::{FileConfig, NominatimConfig};
use plugit_geofence::{
    FulfillmentCheck, FulfillmentOption, GeoPoint, RingClosure, ServiceArea, ShopArea, Validator,
};

/// Validate shop availability areas and check buyer locations against them
///
/// Examples:
///   # Validate an area a vendor submitted and print its stored form
///   plugit-geofence validate area.json
///
///   # Refuse open polygon rings instead of closing them
///   plugit-geofence validate area.json --strict
///
///   # Is this point inside the area?
///   plugit-geofence check area.json --lat 37.7749 --lon -122.4194
///
///   # Geocode a delivery address and check it against a shop record
///   plugit-geofence shop shop.json --option delivery --address "1 Market St, San Francisco, CA 94105"
#[derive(Parser, Debug)]
#[command(name = "plugit-geofence")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to config file (optional, auto-searches plugit-geofence.toml if not provided)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate an availability area payload and print its stored form
    Validate {
        /// JSON file holding the area payload
        file: PathBuf,

        /// Reject open polygon rings instead of closing them
        #[arg(long)]
        strict: bool,
    },

    /// Check whether a location lies inside an availability area
    Check {
        /// JSON file holding the area payload
        area: PathBuf,

        #[command(flatten)]
        location: LocationArgs,
    },

    /// Check a buyer's fulfillment choice and location against a shop record
    Shop {
        /// JSON file holding the shop document
        shop: PathBuf,

        /// Fulfillment option the buyer picked
        #[arg(long, value_enum)]
        option: FulfillmentOption,

        #[command(flatten)]
        location: LocationArgs,
    },
}

#[derive(Args, Debug)]
struct LocationArgs {
    /// Latitude of the buyer's location (use with --lon)
    #[arg(long, requires = "lon", conflicts_with = "address", allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Longitude of the buyer's location (use with --lat)
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Street address to geocode through Nominatim
    #[arg(long)]
    address: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let file_config = match cli.config {
        Some(ref config_path) => {
            if !config_path.exists() {
                bail!("Config file not found: {:?}", config_path);
            }
            FileConfig::load_from(config_path)?
        }
        None => FileConfig::load().unwrap_or_default(),
    };

    let verbose = cli.verbose || file_config.verbose;
    init_tracing(verbose);

    if verbose {
        println!("Configuration:");
        println!(
            "  Open rings: {}",
            if file_config.strict_rings { "rejected" } else { "auto-closed" }
        );
        println!("  Nominatim: {}", file_config.nominatim().url);
        println!();
    }

    match cli.command {
        Command::Validate { file, strict } => {
            let validator = if strict {
                file_config.validator().with_ring_closure(RingClosure::Reject)
            } else {
                file_config.validator()
            };
            run_validate(&file, &validator)
        }
        Command::Check { area, location } => {
            run_check(&area, &location, &file_config.validator(), &file_config.nominatim())
        }
        Command::Shop {
            shop,
            option,
            location,
        } => run_shop(
            &shop,
            option,
            &location,
            &file_config.validator(),
            &file_config.nominatim(),
        ),
    }
}

fn run_validate(path: &Path, validator: &Validator) -> Result<()> {
    let raw = read_json(path)?;
    let area = validator
        .validate(&raw)
        .with_context(|| format!("{} is not a valid availability area", path.display()))?;

    println!("Valid {} area", area.kind());
    describe_area(&area);
    println!();
    println!(
        "{}",
        serde_json::to_string_pretty(&area).context("Failed to serialize area")?
    );

    Ok(())
}

fn run_check(
    path: &Path,
    location: &LocationArgs,
    validator: &Validator,
    nominatim: &NominatimConfig,
) -> Result<()> {
    let raw = read_json(path)?;
    let area = validator
        .validate(&raw)
        .with_context(|| format!("{} is not a valid availability area", path.display()))?;

    let Some(point) = resolve_location(location, nominatim)? else {
        bail!("Must provide either --lat and --lon, or --address");
    };

    describe_area(&area);
    println!("Location: {}", point);
    println!(
        "Distance to area center: {:.0}m",
        area.distance_to_center(point)
    );

    if area.contains(point) {
        println!("Result: inside the availability area");
    } else {
        println!("Result: outside the availability area");
    }

    Ok(())
}

fn run_shop(
    path: &Path,
    option: FulfillmentOption,
    location: &LocationArgs,
    validator: &Validator,
    nominatim: &NominatimConfig,
) -> Result<()> {
    let raw = read_json(path)?;
    let shop = ShopArea::validate(&raw, validator)
        .with_context(|| format!("{} is not a valid shop record", path.display()))?;

    let point = resolve_location(location, nominatim)?;

    let name = if shop.name().is_empty() {
        "Unnamed shop"
    } else {
        shop.name()
    };
    println!("Shop: {} at {}", name, shop.location());
    match shop.availability_area() {
        Some(area) => describe_area(area),
        None => println!("Area: none (serves everywhere)"),
    }
    if let Some(point) = point {
        println!("Location: {}", point);
    }

    let check = shop.check(option, point);
    let verdict = match check {
        FulfillmentCheck::OptionUnavailable(_) => "option not offered",
        FulfillmentCheck::Unrestricted => "no area restriction applies",
        FulfillmentCheck::LocationRequired => "location needed",
        FulfillmentCheck::Inside => "inside the availability area",
        FulfillmentCheck::Outside => "outside the availability area",
    };
    println!("Result ({}): {}", option, verdict);
    if let Some(warning) = check.warning() {
        println!("Warning: {}", warning);
    }

    Ok(())
}

fn describe_area(area: &ServiceArea) {
    match area {
        ServiceArea::Circle(circle) => println!(
            "Area: Circle around {}, radius {:.0}m",
            circle.center(),
            circle.radius_meters()
        ),
        ServiceArea::Polygon(polygon) => {
            let bounds = polygon.bounds();
            println!(
                "Area: Polygon with {} vertices centered on {} ({:.4}° x {:.4}°)",
                polygon.ring().len() - 1,
                area.center(),
                bounds.width_degrees(),
                bounds.height_degrees()
            );
        }
    }
}

fn resolve_location(
    location: &LocationArgs,
    nominatim: &NominatimConfig,
) -> Result<Option<GeoPoint>> {
    if let (Some(lat), Some(lon)) = (location.lat, location.lon) {
        let point = GeoPoint::new(lon, lat).context("Invalid --lat/--lon")?;
        return Ok(Some(point));
    }

    let Some(ref address) = location.address else {
        return Ok(None);
    };

    let spinner = create_spinner("Geocoding address...");
    let start = Instant::now();
    let point = geocode_address(address, nominatim).context("Failed to geocode address")?;
    spinner.finish_with_message(format!(
        "Geocoded: {} -> {} [{:.1}s]",
        address,
        point,
        start.elapsed().as_secs_f32()
    ));

    Ok(Some(point))
}

fn read_json(path: &Path) -> Result<Value> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {:?}", path))?;
    serde_json::from_str(&contents).with_context(|| format!("Failed to parse JSON in {:?}", path))
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "plugit_geofence=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
