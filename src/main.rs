use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::time::Instant;

use geofence::config::{FileConfig, Overrides, Settings};
use geofence::geometry::Boundary;
use geofence::tracking::{FenceMonitor, fixes};
use geofence::{GeoCoordinate, point_in_polygon};

/// Check GPS fixes against a polygon geofence
///
/// Examples:
///   # Is a single point inside the fence from geofence.toml?
///   geofence --lat 40.7125 --lon -74.0065
///
///   # Replay a recorded track and report entries and exits
///   geofence --config office.toml --fixes track.csv
///
///   # Read fixes from stdin, JSON lines out
///   gps-reader | geofence --fixes - --json
#[derive(Parser, Debug)]
#[command(name = "geofence")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches geofence.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Latitude of a single point to test (use with --lon)
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    lat: Option<f32>,

    /// Longitude of a single point to test (use with --lat)
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<f32>,

    /// File of `lat,lon` fixes, one per line ("-" for stdin)
    #[arg(short = 'f', long, conflicts_with = "lat")]
    fixes: Option<PathBuf>,

    /// Simplify the fence before testing (tolerance in degrees)
    #[arg(long)]
    simplify: Option<f32>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let file_config = if let Some(ref config_path) = args.config {
        Some(FileConfig::from_path(config_path)?)
    } else {
        FileConfig::load()
    };

    let settings = Settings::resolve(
        file_config,
        Overrides {
            fixes: args.fixes.clone(),
            simplify: args.simplify,
            verbose: args.verbose,
            json: args.json,
        },
    );

    let (name, ring) = settings.fence_ring()?;
    let boundary = Boundary::new(&ring);

    if settings.verbose {
        println!("Fence '{}':", name);
        println!("  Vertices: {}", boundary.vertex_count());
        println!(
            "  Latitude:  {} .. {}",
            boundary.min_lat(),
            boundary.max_lat()
        );
        println!(
            "  Longitude: {} .. {}",
            boundary.min_lon(),
            boundary.max_lon()
        );
        println!();
    }

    if let (Some(lat), Some(lon)) = (args.lat, args.lon) {
        let point = GeoCoordinate::new(lat, lon);
        let inside = point_in_polygon(point, &ring);
        if settings.json {
            println!(
                "{}",
                serde_json::json!({ "fence": name, "fix": point, "inside": inside })
            );
        } else {
            println!("{}", if inside { "inside" } else { "outside" });
        }
        return Ok(());
    }

    let Some(fixes_path) = settings.fixes.clone() else {
        bail!("Nothing to check: pass --lat and --lon, or --fixes");
    };

    let start = Instant::now();
    let mut monitor = FenceMonitor::new(name, boundary);

    let summary = if fixes_path.as_os_str() == "-" {
        track(io::stdin().lock(), &mut monitor, settings.json, None)
            .context("Failed to read fixes from stdin")?
    } else {
        let file = File::open(&fixes_path)
            .context(format!("Failed to open fixes file: {:?}", fixes_path))?;
        let spinner = create_spinner(&format!("Checking fixes from {}...", fixes_path.display()));
        let result = track(BufReader::new(file), &mut monitor, settings.json, Some(&spinner));
        spinner.finish_and_clear();
        result.context(format!("Failed to parse fixes file: {:?}", fixes_path))?
    };

    if !settings.json {
        println!();
        println!(
            "{} fixes, {} inside '{}', {} transitions [{:.1}s]",
            summary.fixes,
            summary.inside,
            monitor.name(),
            summary.transitions,
            start.elapsed().as_secs_f32()
        );
    }

    Ok(())
}

#[derive(Debug, Default)]
struct TrackSummary {
    fixes: usize,
    inside: usize,
    transitions: usize,
}

/// Check fixes one at a time as the reader yields them, printing each result
/// immediately
fn track<R: BufRead>(
    reader: R,
    monitor: &mut FenceMonitor<'_>,
    json: bool,
    spinner: Option<&ProgressBar>,
) -> Result<TrackSummary> {
    let mut summary = TrackSummary::default();
    let stdout = io::stdout();

    for fix in fixes(reader) {
        let obs = monitor.observe(fix?);
        summary.fixes += 1;
        if obs.inside {
            summary.inside += 1;
        }
        if obs.transition.is_some() {
            summary.transitions += 1;
        }

        let line = if json {
            serde_json::to_string(&obs)?
        } else {
            obs.to_string()
        };

        let print = || -> io::Result<()> {
            let mut out = stdout.lock();
            writeln!(out, "{}", line)?;
            out.flush()
        };
        match spinner {
            Some(pb) => pb.suspend(print)?,
            None => print()?,
        }
    }

    Ok(summary)
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
