//! Render the map as a standalone HTML page using Leaflet and Font Awesome marker icons
use super::{MapSurface, Marker, Polyline};
use crate::config::FromServiceConfig;
use crate::gps::{BoundingBox, Location};
use crate::Error;
use handlebars::Handlebars;
use log::debug;
use serde::Serialize;
use serde_json::json;

static TEMPLATE_NAME: &str = "map";
static TEMPLATE: &str = include_str!("../../../templates/map.html.hbs");

/// Everything the page script needs to rebuild the map
#[derive(Debug, Serialize)]
struct MapView<'a> {
    markers: &'a [Marker],
    polylines: &'a [Polyline],
    bounds: Option<BoundingBox>,
    center: Location,
    zoom: u32,
    max_zoom: u32,
    popup_width: u32,
    tile_url: &'a str,
    attribution: &'a str,
}

/// Defines the look of the generated page and collects the layers drawn on it
#[derive(Debug, FromServiceConfig)]
pub struct LeafletMap {
    title: String,
    tile_url: String,
    attribution: String,
    popup_width: u32,
    max_zoom: u32,
    center_latitude: f64,
    center_longitude: f64,
    zoom: u32,
    #[service_config(skip)]
    markers: Vec<Marker>,
    #[service_config(skip)]
    polylines: Vec<Polyline>,
    #[service_config(skip)]
    bounds: Option<BoundingBox>,
}

impl LeafletMap {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: String) {
        self.title = title;
    }

    /// Bounds the page will fit to, all markers are used when no bounds were requested
    fn view_bounds(&self) -> Option<BoundingBox> {
        self.bounds.or_else(|| {
            let locations: Vec<Location> = self.markers.iter().map(|m| m.location()).collect();
            BoundingBox::from_locations(&locations)
        })
    }

    fn render_html(&self) -> Result<String, Error> {
        let view = MapView {
            markers: &self.markers,
            polylines: &self.polylines,
            bounds: self.view_bounds(),
            center: Location::new(self.center_latitude, self.center_longitude),
            zoom: self.zoom,
            max_zoom: self.max_zoom,
            popup_width: self.popup_width,
            tile_url: &self.tile_url,
            attribution: &self.attribution,
        };
        let view = serde_json::to_string(&view)
            .map_err(|e| Error::Other(format!("could not serialize map data: {}", e)))?;
        let view = escape_script_json(&view);

        let mut hbs = Handlebars::new();
        hbs.register_template_string(TEMPLATE_NAME, TEMPLATE)
            .map_err(|e| Error::Other(format!("invalid map template: {}", e)))?;
        hbs.render(TEMPLATE_NAME, &json!({ "title": self.title, "view": view }))
            .map_err(|e| Error::Other(format!("could not render map template: {}", e)))
    }
}

/// Escape the characters HTML treats specially inside a script element.
///
/// They can only occur inside JSON strings, where the `\u` escapes decode to the same text.
fn escape_script_json(json: &str) -> String {
    json.replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}

impl Default for LeafletMap {
    fn default() -> Self {
        LeafletMap {
            title: "Sport map".to_string(),
            tile_url: "https://tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "&copy; OpenStreetMap contributors".to_string(),
            popup_width: 300,
            max_zoom: 18,
            center_latitude: 0.0,
            center_longitude: 0.0,
            zoom: 2,
            markers: Vec::new(),
            polylines: Vec::new(),
            bounds: None,
        }
    }
}

impl MapSurface for LeafletMap {
    fn add_marker(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    fn add_polyline(&mut self, line: Polyline) {
        self.polylines.push(line);
    }

    fn fit_bounds(&mut self, bounds: BoundingBox) {
        self.bounds = Some(bounds);
    }

    fn render(&self) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
        debug!(
            "Rendering Leaflet map with {} markers and {} lines",
            self.markers.len(),
            self.polylines.len()
        );
        Ok(self.render_html()?.into_bytes())
    }
}
