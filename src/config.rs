//! Store application configuration that gets read from disk
use crate::services::{
    new_directions_handler, new_map_handler, DirectionsService, MapSurface,
};
use crate::style::StyleResolver;
use crate::Error;
use log::debug;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_yaml::Value;
use simplelog::LevelFilter;
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::prelude::*;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub use sport_map_derive::FromServiceConfig;

/// Defines the allowed keys under the services map
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    Directions,
    Map,
}

/// Type alias for clarity
pub type ServiceParameters = HashMap<String, Value>;

/// Configuration options for a single service of any type
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServiceConfig {
    handler: String,
    #[serde(default)]
    configuration: ServiceParameters,
}

impl ServiceConfig {
    pub fn new(handler: String, configuration: ServiceParameters) -> Self {
        ServiceConfig {
            handler,
            configuration,
        }
    }

    pub fn handler(&self) -> &str {
        &self.handler
    }

    pub fn parameters(&self) -> impl Iterator<Item = &String> + '_ {
        self.configuration.keys()
    }

    pub fn get_parameter(&self, key: &str) -> Option<&Value> {
        self.configuration.get(key)
    }

    pub fn get_parameter_as_string(&self, key: &str) -> Option<Result<String, Error>> {
        self.configuration.get(key).map(|value| {
            value
                .as_str()
                .ok_or_else(|| self.invalid_value(key, "a string", value))
                .map(|v| v.to_string())
        })
    }

    pub fn get_parameter_as_i64(&self, key: &str) -> Option<Result<i64, Error>> {
        self.configuration.get(key).map(|value| {
            value
                .as_i64()
                .ok_or_else(|| self.invalid_value(key, "an integer", value))
        })
    }

    pub fn get_parameter_as_f64(&self, key: &str) -> Option<Result<f64, Error>> {
        self.configuration.get(key).map(|value| {
            value
                .as_f64()
                .ok_or_else(|| self.invalid_value(key, "a floating point value", value))
        })
    }

    pub fn get_parameter_as_bool(&self, key: &str) -> Option<Result<bool, Error>> {
        self.configuration.get(key).map(|value| {
            value
                .as_bool()
                .ok_or_else(|| self.invalid_value(key, "a boolean", value))
        })
    }

    fn invalid_value(&self, key: &str, expected: &str, value: &Value) -> Error {
        Error::InvalidConfigurationValue(format!(
            "invalid value for {}.{}, expected {}: {:?}",
            &self.handler, key, expected, value
        ))
    }
}

/// Build a service instance from its configuration entry, use `#[derive(FromServiceConfig)]`
/// to generate the implementation from the struct's fields.
pub trait FromServiceConfig: Sized {
    fn from_config(config: &ServiceConfig) -> Result<Self, Error>;
}

/// Additional entries for the category style tables
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StyleTables {
    #[serde(default)]
    icons: BTreeMap<String, String>,
    #[serde(default)]
    colors: BTreeMap<String, String>,
}

/// Configuration struct that we can create from the config file used
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    dataset_path: Option<String>,
    #[serde(
        deserialize_with = "deserialize_level_filter",
        serialize_with = "serialize_level_filter",
        default = "default_level_filter"
    )]
    log_level: LevelFilter,
    #[serde(default)]
    styles: StyleTables,
    #[serde(default)]
    services: HashMap<ServiceType, ServiceConfig>,
    /// file the config was read from, `None` when the defaults are used
    #[serde(skip)]
    source: Option<PathBuf>,
}

impl Config {
    pub fn load<T: Read>(source: &mut T) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_reader(source)
    }

    /// Load the config from `path`, or from the default location when no path is given.
    ///
    /// An explicitly requested file must exist, a missing default file yields the defaults.
    pub fn load_from_path(path: Option<&Path>) -> Result<Self, Error> {
        let default_path = crate::config_file();
        let path = match path {
            Some(path) => path,
            None if default_path.exists() => default_path.as_path(),
            None => return Ok(Config::default()),
        };
        debug!("Reading config file: {:?}", path);
        let mut fp = File::open(path)?;
        let mut config = Config::load(&mut fp)?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Path of the file the config was loaded from
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn dataset_path(&self) -> Option<&str> {
        self.dataset_path.as_deref()
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    /// Built-in style tables extended with the entries from the config file
    pub fn style_resolver(&self) -> StyleResolver {
        let mut resolver = StyleResolver::default();
        resolver.extend_icons(self.styles.icons.clone());
        resolver.extend_colors(self.styles.colors.clone());
        resolver
    }

    pub fn get_directions_handler(&self) -> Result<Box<dyn DirectionsService>, Error> {
        match self.services.get(&ServiceType::Directions) {
            Some(cfg) => new_directions_handler(cfg),
            None => {
                // the handler can still be set up from the environment
                new_directions_handler(&ServiceConfig::new(
                    "rapidapi".to_string(),
                    HashMap::new(),
                ))
            }
        }
    }

    pub fn get_map_handler(&self) -> Result<Box<dyn MapSurface>, Error> {
        match self.services.get(&ServiceType::Map) {
            Some(cfg) => new_map_handler(cfg),
            None => {
                // a standalone HTML page works everywhere so use it as the default
                new_map_handler(&ServiceConfig::new("leaflet".to_string(), HashMap::new()))
            }
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            dataset_path: None,
            log_level: default_level_filter(),
            styles: StyleTables::default(),
            services: HashMap::new(),
            source: None,
        }
    }
}

fn deserialize_level_filter<'de, D>(deserializer: D) -> Result<LevelFilter, D::Error>
where
    D: Deserializer<'de>,
{
    let buf = String::deserialize(deserializer)?;
    LevelFilter::from_str(&buf)
        .map_err(|_| serde::de::Error::custom(format!("invalid level value: {}", buf)))
}

fn serialize_level_filter<S>(level: &LevelFilter, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&level.to_string())
}

fn default_level_filter() -> LevelFilter {
    LevelFilter::Info
}
