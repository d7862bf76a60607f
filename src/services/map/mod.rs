//! Draw markers and lines on a map using one of the configured map backends
use crate::config::{FromServiceConfig, ServiceConfig};
use crate::gps::{BoundingBox, Location};
use crate::style::MarkerStyle;
use crate::Error;
use serde::Serialize;
mod leaflet;
pub use leaflet::LeafletMap;
mod terminal;
pub use terminal::TerminalMap;

/// A pin placed on the map
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Marker {
    location: Location,
    popup: Option<String>,
    tooltip: Option<String>,
    /// Marker icon and color, `None` uses the backend's plain pin
    style: Option<MarkerStyle>,
}

impl Marker {
    pub fn new(location: Location) -> Self {
        Marker {
            location,
            popup: None,
            tooltip: None,
            style: None,
        }
    }

    pub fn with_popup(mut self, popup: String) -> Self {
        self.popup = Some(popup);
        self
    }

    pub fn with_tooltip(mut self, tooltip: String) -> Self {
        self.tooltip = Some(tooltip);
        self
    }

    pub fn with_style(mut self, style: MarkerStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn popup(&self) -> Option<&str> {
        self.popup.as_deref()
    }

    pub fn tooltip(&self) -> Option<&str> {
        self.tooltip.as_deref()
    }

    pub fn style(&self) -> Option<&MarkerStyle> {
        self.style.as_ref()
    }
}

/// A connected line through an ordered list of points
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Polyline {
    points: Vec<Location>,
    weight: u32,
    opacity: f32,
    color: String,
}

impl Polyline {
    pub fn new(points: Vec<Location>, weight: u32, opacity: f32) -> Self {
        Polyline {
            points,
            weight,
            opacity,
            color: "#3388ff".to_string(),
        }
    }

    pub fn points(&self) -> &[Location] {
        &self.points
    }

    pub fn weight(&self) -> u32 {
        self.weight
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn color(&self) -> &str {
        &self.color
    }
}

/// trait that defines the drawing operations of a map backend, calls are applied in order
pub trait MapSurface {
    fn add_marker(&mut self, marker: Marker);

    fn add_polyline(&mut self, line: Polyline);

    /// Set the view so the whole box is visible
    fn fit_bounds(&mut self, bounds: BoundingBox);

    /// Produce the finished map, backends that draw directly to the screen return no data
    fn render(&self) -> Result<Vec<u8>, Box<dyn std::error::Error>>;
}

pub fn new_map_handler(config: &ServiceConfig) -> Result<Box<dyn MapSurface>, Error> {
    match config.handler() {
        "leaflet" => Ok(Box::new(LeafletMap::from_config(config)?)),
        "terminal" => Ok(Box::new(TerminalMap::from_config(config)?)),
        _ => Err(Error::UnknownServiceHandler(format!(
            "no map handler exists for: {}",
            config.handler()
        ))),
    }
}

/// Records every call, used to test code that draws on a map
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub markers: Vec<Marker>,
    pub polylines: Vec<Polyline>,
    pub bounds: Vec<BoundingBox>,
}

#[cfg(test)]
impl MapSurface for RecordingSurface {
    fn add_marker(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    fn add_polyline(&mut self, line: Polyline) {
        self.polylines.push(line);
    }

    fn fit_bounds(&mut self, bounds: BoundingBox) {
        self.bounds.push(bounds);
    }

    fn render(&self) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
        Ok(Vec::new())
    }
}
