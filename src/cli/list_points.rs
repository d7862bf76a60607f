//! Define the list-points subcommand
use super::DatasetOpts;
use crate::config::Config;
use structopt::StructOpt;

/// List all points in the dataset with the marker style they are drawn with
#[derive(Debug, StructOpt)]
pub struct ListPointsOpts {
    #[structopt(flatten)]
    dataset: DatasetOpts,
}

pub fn list_points_command(
    config: Config,
    opts: ListPointsOpts,
) -> Result<(), Box<dyn std::error::Error>> {
    let points = opts.dataset.load(&config)?;
    let resolver = config.style_resolver();

    println!("Index, Name, Category, Icon, Color, Coordinates");
    for (idx, point) in points.iter().enumerate() {
        let style = resolver.resolve(point.category());
        println!(
            "{} {} ({}) {} {} {}",
            idx,
            point.name(),
            point.category(),
            style.icon(),
            style.color(),
            point.location()
        );
    }

    Ok(())
}
