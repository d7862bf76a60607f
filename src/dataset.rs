//! Load the sport location dataset from CSV into typed records
use crate::gps::Location;
use crate::Error;
use log::{debug, warn};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Columns every dataset must have, alternate spellings share an entry
static REQUIRED_COLUMNS: &[&[&str]] = &[
    &["name"],
    &["coordinates"],
    &["sport_type", "sport-type"],
    &["description"],
];

/// A dataset row as it appears in the file
#[derive(Debug, Deserialize)]
struct RawRecord {
    name: String,
    coordinates: String,
    #[serde(alias = "sport-type")]
    sport_type: String,
    description: String,
}

/// A single validated location from the dataset
#[derive(Clone, Debug, PartialEq)]
pub struct PointRecord {
    name: String,
    location: Location,
    category: String,
    description: String,
}

impl PointRecord {
    pub fn new(name: String, location: Location, category: String, description: String) -> Self {
        PointRecord {
            name,
            location,
            category,
            description,
        }
    }

    fn from_raw(raw: RawRecord) -> Result<Self, String> {
        let location = parse_coordinates(&raw.coordinates)
            .map_err(|e| format!("record '{}' has {}", raw.name, e))?;
        Ok(PointRecord {
            name: raw.name,
            location,
            category: raw.sport_type,
            description: raw.description,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> Location {
        self.location
    }

    /// The sport type used to pick the marker style
    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// How rows that cannot be converted into a `PointRecord` are handled
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowPolicy {
    /// Abort loading with an error naming the offending line
    FailFast,
    /// Log a warning and leave the row out
    SkipAndWarn,
}

impl Default for RowPolicy {
    fn default() -> Self {
        RowPolicy::FailFast
    }
}

/// Read all point records from a CSV file
pub fn load_points_from_path<P: AsRef<Path>>(
    path: P,
    policy: RowPolicy,
) -> Result<Vec<PointRecord>, Error> {
    let path = path.as_ref();
    debug!("Loading point dataset from {:?}", path);
    let fp = File::open(path)?;
    load_points(fp, policy)
}

/// Read all point records from CSV data with a header row
pub fn load_points<R: Read>(source: R, policy: RowPolicy) -> Result<Vec<PointRecord>, Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(source);
    let headers = rdr.headers()?.clone();
    check_columns(&headers)?;

    let mut points = Vec::new();
    let mut row = csv::StringRecord::new();
    loop {
        let result = match rdr.read_record(&mut row) {
            Ok(false) => break,
            Ok(true) => {
                let line = row.position().map_or(0, |p| p.line());
                row.deserialize::<RawRecord>(Some(&headers))
                    .map_err(|e| e.to_string())
                    .and_then(PointRecord::from_raw)
                    .map_err(|msg| (line, msg))
            }
            Err(e) if e.is_io_error() => return Err(Error::Csv(e)),
            Err(e) => {
                let line = e.position().map_or(0, |p| p.line());
                Err((line, e.to_string()))
            }
        };

        match result {
            Ok(point) => points.push(point),
            Err((line, msg)) => match policy {
                RowPolicy::FailFast => return Err(Error::InvalidRecord(line, msg)),
                RowPolicy::SkipAndWarn => {
                    warn!("Skipping invalid dataset record on line {}: {}", line, msg)
                }
            },
        }
    }

    debug!("Loaded {} point records", points.len());
    Ok(points)
}

fn check_columns(headers: &csv::StringRecord) -> Result<(), Error> {
    for names in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| names.contains(&h)) {
            return Err(Error::MissingColumn(names[0].to_string()));
        }
    }
    Ok(())
}

/// Parse a "latitude,longitude" pair, optionally wrapped in brackets or parentheses
fn parse_coordinates(src: &str) -> Result<Location, String> {
    let inner = src
        .trim()
        .trim_start_matches(|c: char| c == '[' || c == '(')
        .trim_end_matches(|c: char| c == ']' || c == ')');
    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    if parts.len() != 2 {
        return Err(format!(
            "coordinates '{}', expected 'latitude,longitude'",
            src
        ));
    }
    Ok(Location::new(
        parse_degrees(parts[0], src)?,
        parse_degrees(parts[1], src)?,
    ))
}

fn parse_degrees(value: &str, src: &str) -> Result<f64, String> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("non-numeric coordinate '{}' in '{}'", value, src))
}
