//! Define the application's command line interface
use crate::config::Config;
use crate::dataset::{load_points_from_path, PointRecord, RowPolicy};
use crate::Error;
use log::{debug, info};
use simplelog::LevelFilter;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use structopt::StructOpt;

mod list_points;
use list_points::{list_points_command, ListPointsOpts};
mod plot;
use plot::{plot_command, PlotOpts};
mod route;
use route::{route_command, RouteOpts};

/// Plot sport locations on a map and get directions to them
#[derive(Debug, StructOpt)]
#[structopt(name = "sport-map")]
pub struct Cli {
    /// Set logging level to debug, use a second time (e.g. -vv) to set logging to trace
    #[structopt(short, long, parse(from_occurrences))]
    verbose: i32,
    /// Suppress info logging messages use a second time (e.g. -qq) to hide warnings
    #[structopt(short, long, parse(from_occurrences))]
    quiet: i32,
    /// Config file to use instead of the one in the user's config directory
    #[structopt(short, long, parse(from_os_str))]
    config: Option<PathBuf>,
    #[structopt(subcommand)]
    cmd: Command,
}

impl Cli {
    /// Return the verbose flag counts as a log level filter
    pub fn verbosity(&self, default: LevelFilter) -> LevelFilter {
        if self.quiet == 1 {
            LevelFilter::Warn
        } else if self.quiet > 1 {
            LevelFilter::Error
        } else if self.verbose == 1 {
            LevelFilter::Debug
        } else if self.verbose == 2 {
            LevelFilter::Trace
        } else if self.verbose > 2 {
            LevelFilter::Off
        } else {
            default
        }
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config.as_deref()
    }

    /// Consume options struct and return the result of subcommand execution
    pub fn execute_subcommand(self, config: Config) -> Result<(), Box<dyn std::error::Error>> {
        self.cmd.execute(config)
    }
}

#[derive(Debug, StructOpt)]
pub enum Command {
    /// Plot every point of the dataset on a map
    #[structopt(name = "plot")]
    Plot(PlotOpts),
    /// Request directions to one of the points and draw the route
    #[structopt(name = "route")]
    Route(RouteOpts),
    /// List the points of the dataset along with their marker style
    #[structopt(name = "list-points")]
    ListPoints(ListPointsOpts),
}

impl Command {
    /// Consume enum variant and return the result of the command's execution
    fn execute(self, config: Config) -> Result<(), Box<dyn std::error::Error>> {
        match self {
            Command::Plot(opts) => plot_command(config, opts),
            Command::Route(opts) => route_command(config, opts),
            Command::ListPoints(opts) => list_points_command(config, opts),
        }
    }
}

/// Options shared by every command that reads the dataset
#[derive(Debug, StructOpt)]
pub struct DatasetOpts {
    /// CSV file with the sport locations, defaults to dataset_path from the config file
    #[structopt(name = "DATASET", parse(from_os_str))]
    dataset: Option<PathBuf>,
    /// Skip malformed rows with a warning instead of stopping at the first one
    #[structopt(long)]
    skip_invalid: bool,
}

impl DatasetOpts {
    fn load(&self, config: &Config) -> Result<Vec<PointRecord>, Error> {
        let path = match (&self.dataset, config.dataset_path()) {
            (Some(path), _) => path.clone(),
            (None, Some(path)) => PathBuf::from(path),
            (None, None) => {
                return Err(Error::Other(
                    "no dataset given, pass DATASET or set dataset_path in the config file"
                        .to_string(),
                ))
            }
        };
        let policy = if self.skip_invalid {
            RowPolicy::SkipAndWarn
        } else {
            RowPolicy::FailFast
        };
        debug!("Loading dataset {:?} ({:?})", path, policy);
        let points = load_points_from_path(&path, policy)?;
        info!("Loaded {} points from {:?}", points.len(), path);
        Ok(points)
    }
}

/// Write rendered map data to a file, "-" or no path writes to stdout
fn write_output(data: &[u8], output: Option<&Path>) -> io::Result<()> {
    // backends that draw directly on the terminal have nothing to write
    if data.is_empty() {
        return Ok(());
    }
    match output {
        Some(path) if path.to_string_lossy() != "-" => {
            let mut fp = File::create(path)?;
            fp.write_all(data)?;
            info!("Map written to {:?}", path);
            Ok(())
        }
        _ => write_to_stdout(data),
    }
}

fn write_to_stdout(data: &[u8]) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle.write_all(data)
}
