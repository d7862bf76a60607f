use log::{debug, info, warn};
use simplelog::{Config as LogConfig, TermLogger, TerminalMode};
use sport_map::cli::Cli;
use sport_map::config::Config;
use sport_map::config_file;
use structopt::StructOpt;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opt = Cli::from_args();
    let config = Config::load_from_path(opt.config_path())?;
    let level_filter = opt.verbosity(config.log_level());
    TermLogger::init(level_filter, LogConfig::default(), TerminalMode::Mixed)?;
    match config.source() {
        Some(path) => debug!("Loaded config file: {:?}", path),
        None => info!("No config file found at {:?}, using defaults", config_file()),
    }

    // a category listed in only one style table falls back to a default for the other
    let resolver = config.style_resolver();
    for category in resolver.unpaired_categories() {
        warn!(
            "Style for category '{}' only defines an icon or a color, the default is used for the other",
            category
        );
    }

    // execute any subcommands
    opt.execute_subcommand(config)
}
