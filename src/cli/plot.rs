//! Define the plot subcommand
use super::{write_output, DatasetOpts};
use crate::config::Config;
use crate::plot::plot_all_points;
use log::info;
use std::path::PathBuf;
use structopt::StructOpt;

/// Put a marker on the map for every point in the dataset
#[derive(Debug, StructOpt)]
pub struct PlotOpts {
    #[structopt(flatten)]
    dataset: DatasetOpts,
    /// name of file to output map data to, if not provided or "-" is used data is written to stdout
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,
}

pub fn plot_command(config: Config, opts: PlotOpts) -> Result<(), Box<dyn std::error::Error>> {
    let points = opts.dataset.load(&config)?;
    let resolver = config.style_resolver();
    let mut map = config.get_map_handler()?;

    let count = plot_all_points(map.as_mut(), &resolver, &points);
    info!("Plotted {} points", count);

    let data = map.render()?;
    write_output(&data, opts.output.as_deref())?;
    Ok(())
}
