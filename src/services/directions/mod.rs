//! Request a route between two locations from an external directions API
use crate::config::ServiceConfig;
use crate::gps::Location;
use crate::Error;
use reqwest::StatusCode;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
mod rapidapi;
pub use rapidapi::RouteAndDirections;

/// Means of travel the route is computed for
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TravelMode {
    Drive,
    Truck,
    Bicycle,
    Walk,
    Transit,
}

impl TravelMode {
    pub fn variants() -> &'static [&'static str] {
        &["drive", "truck", "bicycle", "walk", "transit"]
    }
}

impl FromStr for TravelMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "drive" => Ok(TravelMode::Drive),
            "truck" => Ok(TravelMode::Truck),
            "bicycle" => Ok(TravelMode::Bicycle),
            "walk" => Ok(TravelMode::Walk),
            "transit" => Ok(TravelMode::Transit),
            _ => Err(format!(
                "unknown travel mode '{}', expected one of: {}",
                s,
                TravelMode::variants().join(", ")
            )),
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TravelMode::Drive => "drive",
            TravelMode::Truck => "truck",
            TravelMode::Bicycle => "bicycle",
            TravelMode::Walk => "walk",
            TravelMode::Transit => "transit",
        };
        write!(f, "{}", name)
    }
}

/// Route returned by a directions service
#[derive(Clone, Debug, PartialEq)]
pub struct Directions {
    /// route points in GeoJSON `[longitude, latitude]` order
    geometry: Vec<[f64; 2]>,
    /// length of the route in meters
    distance: Option<f64>,
    /// travel time in seconds
    time: Option<f64>,
}

impl Directions {
    pub fn geometry(&self) -> &[[f64; 2]] {
        &self.geometry
    }

    pub fn distance(&self) -> Option<f64> {
        self.distance
    }

    pub fn time(&self) -> Option<f64> {
        self.time
    }
}

/// trait that defines how a route between two points is requested
pub trait DirectionsService {
    fn request_directions(
        &self,
        start: Location,
        destination: Location,
        mode: TravelMode,
    ) -> Result<Directions, Error>;

    /// Mode used when the caller doesn't pick one
    fn default_mode(&self) -> TravelMode {
        TravelMode::Drive
    }
}

pub fn new_directions_handler(config: &ServiceConfig) -> Result<Box<dyn DirectionsService>, Error> {
    match config.handler() {
        "rapidapi" => Ok(Box::new(RouteAndDirections::from_config_and_env(config)?)),
        _ => Err(Error::UnknownServiceHandler(format!(
            "no directions handler exists for: {}",
            config.handler()
        ))),
    }
}

/// Format the `waypoints` query value, latitude first
pub fn waypoints(start: Location, destination: Location) -> String {
    format!(
        "{},{}|{},{}",
        start.latitude(),
        start.longitude(),
        destination.latitude(),
        destination.longitude()
    )
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: Option<Geometry>,
    #[serde(default)]
    properties: Properties,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    /// a multi line string, one line per leg
    coordinates: Vec<Vec<Vec<f64>>>,
}

#[derive(Debug, Default, Deserialize)]
struct Properties {
    distance: Option<f64>,
    time: Option<f64>,
}

/// Interpret the status and body of a directions response.
///
/// The route is the first line of the first feature's geometry.
pub fn parse_directions(status: StatusCode, body: &str) -> Result<Directions, Error> {
    if !status.is_success() {
        // parse error response to get reason why the request failed
        let msg = serde_json::from_str::<ErrorResponse>(body)
            .ok()
            .and_then(|e| e.message.or(e.error))
            .unwrap_or_else(|| body.trim().to_string());
        return Err(Error::RequestError(status, msg));
    }

    let json: FeatureCollection = serde_json::from_str(body)
        .map_err(|e| Error::InvalidDirectionsResponse(e.to_string()))?;
    let feature = json.features.into_iter().next().ok_or(Error::RouteNotFound)?;
    let line = feature
        .geometry
        .and_then(|g| g.coordinates.into_iter().next())
        .filter(|line| !line.is_empty())
        .ok_or(Error::RouteNotFound)?;
    let geometry = line
        .into_iter()
        .map(|pos| match pos.as_slice() {
            [lon, lat, ..] => Ok([*lon, *lat]),
            _ => Err(Error::InvalidDirectionsResponse(format!(
                "route position needs a longitude and latitude: {:?}",
                pos
            ))),
        })
        .collect::<Result<Vec<[f64; 2]>, Error>>()?;

    Ok(Directions {
        geometry,
        distance: feature.properties.distance,
        time: feature.properties.time,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waypoints_are_latitude_first() {
        let start = Location::new(52.52, 13.405);
        let dest = Location::new(52.5, 13.4);
        assert_eq!(waypoints(start, dest), "52.52,13.405|52.5,13.4");
    }

    #[test]
    fn travel_modes_round_trip_through_strings() {
        for name in TravelMode::variants() {
            let mode: TravelMode = name.parse().unwrap();
            assert_eq!(&mode.to_string(), name);
        }
        assert!("fly".parse::<TravelMode>().is_err());
    }

    #[test]
    fn first_line_of_first_feature_is_the_route() {
        let body = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {"mode": "drive", "distance": 1234.5, "time": 300.0},
                "geometry": {
                    "type": "MultiLineString",
                    "coordinates": [
                        [[10.0, 50.0], [10.5, 50.2], [11.0, 50.5, 120.0]],
                        [[12.0, 51.0]]
                    ]
                }
            }]
        }"#;
        let directions = parse_directions(StatusCode::OK, body).unwrap();
        assert_eq!(
            directions.geometry(),
            &[[10.0, 50.0], [10.5, 50.2], [11.0, 50.5]]
        );
        assert_eq!(directions.distance(), Some(1234.5));
        assert_eq!(directions.time(), Some(300.0));
    }

    #[test]
    fn missing_properties_are_tolerated() {
        let body = r#"{"features": [{"geometry": {"coordinates": [[[1.0, 2.0]]]}}]}"#;
        let directions = parse_directions(StatusCode::OK, body).unwrap();
        assert_eq!(directions.geometry(), &[[1.0, 2.0]]);
        assert_eq!(directions.distance(), None);
    }

    #[test]
    fn service_errors_keep_status_and_message() {
        let body = r#"{"statusCode": 400, "error": "Bad Request", "message": "Invalid waypoints"}"#;
        match parse_directions(StatusCode::BAD_REQUEST, body) {
            Err(Error::RequestError(code, msg)) => {
                assert_eq!(code, StatusCode::BAD_REQUEST);
                assert_eq!(msg, "Invalid waypoints");
            }
            other => panic!("expected a request error, got {:?}", other),
        }
        match parse_directions(StatusCode::BAD_GATEWAY, "upstream down\n") {
            Err(Error::RequestError(_, msg)) => assert_eq!(msg, "upstream down"),
            other => panic!("expected a request error, got {:?}", other),
        }
    }

    #[test]
    fn empty_results_mean_no_route() {
        for body in &[
            r#"{"features": []}"#,
            r#"{"features": [{"geometry": null}]}"#,
            r#"{"features": [{"geometry": {"coordinates": []}}]}"#,
            r#"{"features": [{"geometry": {"coordinates": [[]]}}]}"#,
        ] {
            assert!(
                matches!(parse_directions(StatusCode::OK, body), Err(Error::RouteNotFound)),
                "{}",
                body
            );
        }
    }

    #[test]
    fn malformed_bodies_are_invalid_responses() {
        for body in &[
            "<html>oops</html>",
            r#"{"type": "FeatureCollection"}"#,
            r#"{"features": [{"geometry": {"coordinates": [[[1.0]]]}}]}"#,
        ] {
            assert!(
                matches!(
                    parse_directions(StatusCode::OK, body),
                    Err(Error::InvalidDirectionsResponse(_))
                ),
                "{}",
                body
            );
        }
    }
}
