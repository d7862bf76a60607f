//! Define the route subcommand
use super::{write_output, DatasetOpts};
use crate::config::Config;
use crate::console::{prompt_destination, prompt_location};
use crate::dataset::PointRecord;
use crate::gps::Location;
use crate::plot::plot_all_points;
use crate::route::render_route;
use crate::services::TravelMode;
use crate::Error;
use log::info;
use std::io;
use std::path::PathBuf;
use structopt::StructOpt;

/// Request directions from a starting point to one of the dataset points and draw the route
#[derive(Debug, StructOpt)]
pub struct RouteOpts {
    #[structopt(flatten)]
    dataset: DatasetOpts,
    /// Latitude of the starting point, asked for on the console if not provided
    #[structopt(long, allow_hyphen_values = true)]
    start_lat: Option<f64>,
    /// Longitude of the starting point, asked for on the console if not provided
    #[structopt(long, allow_hyphen_values = true)]
    start_lon: Option<f64>,
    /// Index of the destination point (use list-points command to see indices)
    #[structopt(short, long)]
    destination: Option<usize>,
    /// Travel mode, defaults to the mode set in the directions config
    #[structopt(short, long, possible_values = TravelMode::variants())]
    mode: Option<TravelMode>,
    /// Only draw the route, without the dataset points
    #[structopt(long)]
    no_points: bool,
    /// name of file to output map data to, if not provided or "-" is used data is written to stdout
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,
}

impl RouteOpts {
    /// Starting point from the command line, prompts are written to stderr to keep stdout clean
    fn start(&self) -> Result<Location, Error> {
        match (self.start_lat, self.start_lon) {
            (Some(lat), Some(lon)) => {
                if !Location::is_valid_latitude(lat) {
                    return Err(Error::Other(format!(
                        "--start-lat must be between -90 and 90 degrees: {}",
                        lat
                    )));
                }
                if !Location::is_valid_longitude(lon) {
                    return Err(Error::Other(format!(
                        "--start-lon must be between -180 and 180 degrees: {}",
                        lon
                    )));
                }
                Ok(Location::new(lat, lon))
            }
            (None, None) => {
                let stdin = io::stdin();
                prompt_location(&mut stdin.lock(), &mut io::stderr(), "starting")
            }
            _ => Err(Error::Other(
                "--start-lat and --start-lon must be used together".to_string(),
            )),
        }
    }

    fn destination<'a>(&self, points: &'a [PointRecord]) -> Result<&'a PointRecord, Error> {
        match self.destination {
            Some(idx) => points.get(idx).ok_or_else(|| {
                Error::Other(format!(
                    "no point with index {}, the dataset has {} points",
                    idx,
                    points.len()
                ))
            }),
            None => {
                let stdin = io::stdin();
                prompt_destination(&mut stdin.lock(), &mut io::stderr(), points)
            }
        }
    }
}

pub fn route_command(config: Config, opts: RouteOpts) -> Result<(), Box<dyn std::error::Error>> {
    let points = opts.dataset.load(&config)?;
    let directions_handler = config.get_directions_handler()?;
    let mut map = config.get_map_handler()?;

    let start = opts.start()?;
    let destination = opts.destination(&points)?;
    let mode = opts
        .mode
        .unwrap_or_else(|| directions_handler.default_mode());
    info!(
        "Requesting {} directions from {} to {} {}",
        mode,
        start,
        destination.name(),
        destination.location()
    );
    let directions =
        directions_handler.request_directions(start, destination.location(), mode)?;
    if let (Some(distance), Some(time)) = (directions.distance(), directions.time()) {
        info!(
            "Route is {:.1} km long and takes {:.0} minutes",
            distance / 1000.0,
            time / 60.0
        );
    }

    if !opts.no_points {
        plot_all_points(map.as_mut(), &config.style_resolver(), &points);
    }
    let bbox = render_route(map.as_mut(), directions.geometry())?;
    info!("Map fitted to route bounds {}", bbox);

    let data = map.render()?;
    write_output(&data, opts.output.as_deref())?;
    Ok(())
}
