//! Request routes from the Route and Directions API hosted on RapidAPI
use super::{parse_directions, waypoints, Directions, DirectionsService, TravelMode};
use crate::config::{FromServiceConfig, ServiceConfig};
use crate::gps::Location;
use crate::Error;
use log::{debug, info};
use reqwest::blocking::Client;

/// Environment variable checked when no host is configured
pub static HOST_ENV_VAR: &str = "SPORT_MAP_DIRECTIONS_HOST";
/// Environment variable checked when no API key is configured
pub static KEY_ENV_VAR: &str = "SPORT_MAP_DIRECTIONS_KEY";

/// Defines parameters to interact with the Route and Directions API
#[derive(Clone, Debug, Default, FromServiceConfig)]
pub struct RouteAndDirections {
    /// full endpoint url, built from the host when unset
    base_url: Option<String>,
    host: Option<String>,
    api_key: Option<String>,
    #[service_config(rename = "mode")]
    default_mode: Option<String>,
}

impl RouteAndDirections {
    /// Read the handler config and fill in credentials missing from it with the environment
    pub fn from_config_and_env(config: &ServiceConfig) -> Result<Self, Error> {
        Self::from_config(config)?.with_fallbacks(|key| std::env::var(key).ok())
    }

    fn with_fallbacks<F>(mut self, lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.host.as_deref().map_or(true, str::is_empty) {
            self.host = lookup(HOST_ENV_VAR);
        }
        if self.api_key.as_deref().map_or(true, str::is_empty) {
            self.api_key = lookup(KEY_ENV_VAR);
        }

        if self.host.as_deref().map_or(true, str::is_empty) {
            return Err(Error::InvalidConfigurationValue(format!(
                "rapidapi.host is not set in the config file or {}",
                HOST_ENV_VAR
            )));
        }
        if self.api_key.as_deref().map_or(true, str::is_empty) {
            return Err(Error::InvalidConfigurationValue(format!(
                "rapidapi.api_key is not set in the config file or {}",
                KEY_ENV_VAR
            )));
        }
        if let Some(mode) = &self.default_mode {
            mode.parse::<TravelMode>()
                .map_err(|e| Error::InvalidConfigurationValue(format!("rapidapi.mode: {}", e)))?;
        }
        Ok(self)
    }

    fn host(&self) -> &str {
        self.host.as_deref().unwrap_or_default()
    }

    fn api_key(&self) -> &str {
        self.api_key.as_deref().unwrap_or_default()
    }

    fn base_url(&self) -> String {
        match &self.base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://{}/v1/routing", self.host()),
        }
    }

    fn request_url(&self, start: Location, destination: Location, mode: TravelMode) -> String {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("waypoints", &waypoints(start, destination))
            .append_pair("mode", &mode.to_string())
            .finish();
        format!("{}?{}", self.base_url(), query)
    }
}

impl DirectionsService for RouteAndDirections {
    fn request_directions(
        &self,
        start: Location,
        destination: Location,
        mode: TravelMode,
    ) -> Result<Directions, Error> {
        let request_url = self.request_url(start, destination, mode);
        debug!("Requesting directions: {}", request_url);

        let client = Client::new();
        let resp = client
            .get(&request_url)
            .header("X-RapidAPI-Key", self.api_key())
            .header("X-RapidAPI-Host", self.host())
            .send()?;
        let status = resp.status();
        let body = resp.text()?;
        let directions = parse_directions(status, &body)?;
        info!(
            "Received {} route points from {} to {} ({})",
            directions.geometry().len(),
            start,
            destination,
            mode
        );
        Ok(directions)
    }

    fn default_mode(&self) -> TravelMode {
        self.default_mode
            .as_deref()
            .and_then(|m| m.parse().ok())
            .unwrap_or(TravelMode::Drive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServiceParameters;
    use serde_yaml::Value;

    fn config(pairs: &[(&str, &str)]) -> ServiceConfig {
        let mut params = ServiceParameters::new();
        for (key, val) in pairs {
            params.insert(key.to_string(), Value::from(*val));
        }
        ServiceConfig::new("rapidapi".to_string(), params)
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn configured_credentials_are_used() {
        let handler = RouteAndDirections::from_config(&config(&[
            ("host", "directions.example.com"),
            ("api_key", "secret"),
            ("mode", "walk"),
        ]))
        .unwrap()
        .with_fallbacks(no_env)
        .unwrap();
        assert_eq!(handler.host(), "directions.example.com");
        assert_eq!(handler.api_key(), "secret");
        assert_eq!(handler.default_mode(), TravelMode::Walk);
    }

    #[test]
    fn environment_fills_missing_credentials() {
        let handler = RouteAndDirections::from_config(&config(&[("api_key", "")]))
            .unwrap()
            .with_fallbacks(|key| match key {
                "SPORT_MAP_DIRECTIONS_HOST" => Some("env.example.com".to_string()),
                "SPORT_MAP_DIRECTIONS_KEY" => Some("env-secret".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(handler.host(), "env.example.com");
        assert_eq!(handler.api_key(), "env-secret");
        assert_eq!(handler.default_mode(), TravelMode::Drive);
    }

    #[test]
    fn missing_credentials_are_an_error() {
        let missing_host = RouteAndDirections::from_config(&config(&[("api_key", "secret")]))
            .unwrap()
            .with_fallbacks(no_env);
        match missing_host {
            Err(Error::InvalidConfigurationValue(msg)) => assert!(msg.contains("host")),
            other => panic!("expected a configuration error, got {:?}", other),
        }

        let missing_key = RouteAndDirections::from_config(&config(&[("host", "h.example.com")]))
            .unwrap()
            .with_fallbacks(no_env);
        match missing_key {
            Err(Error::InvalidConfigurationValue(msg)) => assert!(msg.contains("api_key")),
            other => panic!("expected a configuration error, got {:?}", other),
        }
    }

    #[test]
    fn invalid_mode_is_rejected() {
        let result = RouteAndDirections::from_config(&config(&[
            ("host", "h.example.com"),
            ("api_key", "secret"),
            ("mode", "teleport"),
        ]))
        .unwrap()
        .with_fallbacks(no_env);
        assert!(matches!(result, Err(Error::InvalidConfigurationValue(_))));
    }

    #[test]
    fn request_url_encodes_waypoints_and_mode() {
        let handler = RouteAndDirections::from_config(&config(&[
            ("host", "directions.example.com"),
            ("api_key", "secret"),
        ]))
        .unwrap()
        .with_fallbacks(no_env)
        .unwrap();
        let url = handler.request_url(
            Location::new(52.52, 13.405),
            Location::new(52.5, 13.4),
            TravelMode::Bicycle,
        );
        assert_eq!(
            url,
            "https://directions.example.com/v1/routing?waypoints=52.52%2C13.405%7C52.5%2C13.4&mode=bicycle"
        );
    }

    #[test]
    fn base_url_overrides_the_host() {
        let handler = RouteAndDirections::from_config(&config(&[
            ("base_url", "http://localhost:8080/routing/"),
            ("host", "directions.example.com"),
            ("api_key", "secret"),
        ]))
        .unwrap()
        .with_fallbacks(no_env)
        .unwrap();
        let url = handler.request_url(
            Location::new(1.0, 2.0),
            Location::new(3.0, 4.0),
            TravelMode::Drive,
        );
        assert!(url.starts_with("http://localhost:8080/routing?waypoints="));
    }

    #[test]
    fn unreachable_service_is_reported_as_unavailable() {
        // nothing listens on port 1 so the connection is refused
        let handler = RouteAndDirections::from_config(&config(&[
            ("base_url", "http://127.0.0.1:1/routing"),
            ("host", "directions.example.com"),
            ("api_key", "secret"),
        ]))
        .unwrap()
        .with_fallbacks(no_env)
        .unwrap();
        let result = handler.request_directions(
            Location::new(52.52, 13.405),
            Location::new(52.5, 13.4),
            TravelMode::Walk,
        );
        assert!(
            matches!(result, Err(Error::DirectionsUnavailable(_))),
            "{:?}",
            result
        );
    }
}
