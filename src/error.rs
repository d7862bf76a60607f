//! Defines the general error type for the crate and various conversions into it
use std::convert;
use std::fmt;

/// General error type for the crate
#[derive(Debug)]
pub enum Error {
    Csv(csv::Error),
    /// The directions service could not be reached at all
    DirectionsUnavailable(reqwest::Error),
    EmptyRoute,
    InvalidConfigurationValue(String),
    InvalidDirectionsResponse(String),
    /// A dataset row that could not be converted, CSV line number and reason
    InvalidRecord(u64, String),
    Io(std::io::Error),
    MissingColumn(String),
    Other(String),
    /// The directions service answered with a non-success status
    RequestError(reqwest::StatusCode, String),
    /// The directions service answered but did not contain a usable route
    RouteNotFound,
    UnknownServiceHandler(String),
    Yaml(serde_yaml::Error),
}

impl convert::From<csv::Error> for Error {
    fn from(err: csv::Error) -> Error {
        Error::Csv(err)
    }
}

impl convert::From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Error {
        Error::DirectionsUnavailable(err)
    }
}

impl convert::From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Error {
        Error::Yaml(err)
    }
}

impl convert::From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Csv(e) => write!(f, "{}", e),
            Error::DirectionsUnavailable(e) => {
                write!(f, "Directions service is unreachable: {}", e)
            }
            Error::EmptyRoute => write!(f, "Cannot render a route without any points"),
            Error::InvalidConfigurationValue(msg) => write!(f, "{}", msg),
            Error::InvalidDirectionsResponse(msg) => {
                write!(f, "Directions service returned an invalid response: {}", msg)
            }
            Error::InvalidRecord(line, msg) => {
                write!(f, "Invalid dataset record on line {}: {}", line, msg)
            }
            Error::Io(e) => write!(f, "{}", e),
            Error::MissingColumn(column) => {
                write!(f, "Dataset is missing the required column '{}'", column)
            }
            Error::Other(msg) => write!(f, "{}", msg),
            Error::RequestError(code, msg) => write!(
                f,
                "Directions request failed with code: {} - {}",
                code, msg
            ),
            Error::RouteNotFound => write!(f, "No route found between the selected points"),
            Error::UnknownServiceHandler(msg) => write!(f, "{}", msg),
            Error::Yaml(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for Error {}
