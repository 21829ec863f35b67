//! Airport directory backed by the OpenFlights `airports.dat` dataset.
//!
//! The file is a headerless CSV with one airport per line:
//! `id,name,city,country,IATA,ICAO,latitude,longitude,...`.

#[macro_use]
pub mod macros;

use crate::router::{AirportLookup, Location};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::io::Read;
use std::path::Path;

const FIELD_NAME: usize = 1;
const FIELD_CITY: usize = 2;
const FIELD_COUNTRY: usize = 3;
const FIELD_IATA: usize = 4;
const FIELD_LATITUDE: usize = 6;
const FIELD_LONGITUDE: usize = 7;

/// Null marker used by OpenFlights.
const NULL_FIELD: &str = "\\N";

/// Errors that may occur while loading the airport directory
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AirportError {
    /// The dataset could not be opened
    Unreadable,
}

impl Display for AirportError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            AirportError::Unreadable => write!(f, "Airport dataset could not be read."),
        }
    }
}

impl std::error::Error for AirportError {}

/// An airport with a known IATA code and position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Airport {
    /// Airport name, e.g. `John F Kennedy International Airport`.
    pub name: String,
    /// City served.
    pub city: String,
    /// Country the airport is in.
    pub country: String,
    /// Three-letter IATA code.
    pub iata_code: String,
    /// Position of the airport.
    pub location: Location,
}

/// Airports indexed by IATA code.
#[derive(Debug, Clone, Default)]
pub struct AirportDirectory {
    airports: Vec<Airport>,
    by_iata: HashMap<String, usize>,
}

impl AirportDirectory {
    /// Load the directory from a file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AirportError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| {
            airports_error!(
                "(from_path) Could not open airport dataset [{}]: {}",
                path.display(),
                e
            );
            AirportError::Unreadable
        })?;

        let directory = Self::from_reader(file);
        airports_info!(
            "(from_path) Loaded {} airports from [{}].",
            directory.len(),
            path.display()
        );
        Ok(directory)
    }

    /// Load the directory from any reader.
    ///
    /// Lines without an IATA code or with unreadable coordinates are
    /// skipped. When a code appears twice the first line wins.
    pub fn from_reader(reader: impl Read) -> Self {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(false)
            .from_reader(reader);

        let mut directory = AirportDirectory::default();
        for (line, result) in rdr.records().enumerate() {
            let record = match result {
                Ok(r) => r,
                Err(e) => {
                    airports_debug!("(from_reader) Skipping line {}: {}", line + 1, e);
                    continue;
                }
            };

            let Some(airport) = parse_record(&record) else {
                airports_debug!("(from_reader) Skipping line {}: {:?}", line + 1, record);
                continue;
            };

            if directory.by_iata.contains_key(&airport.iata_code) {
                continue;
            }

            directory
                .by_iata
                .insert(airport.iata_code.clone(), directory.airports.len());
            directory.airports.push(airport);
        }

        directory
    }

    /// Get an airport by IATA code.
    pub fn get(&self, iata_code: &str) -> Option<&Airport> {
        self.by_iata
            .get(iata_code)
            .and_then(|index| self.airports.get(*index))
    }

    /// Airports whose city or country contains `query`, ignoring case,
    /// in file order.
    pub fn search(&self, query: &str) -> Vec<&Airport> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return vec![];
        }

        self.airports
            .iter()
            .filter(|airport| {
                airport.city.to_lowercase().contains(&query)
                    || airport.country.to_lowercase().contains(&query)
            })
            .collect()
    }

    /// Number of airports loaded.
    pub fn len(&self) -> usize {
        self.airports.len()
    }

    /// True if no airport was loaded.
    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }
}

impl AirportLookup for AirportDirectory {
    fn coordinates(&self, iata_code: &str) -> Option<Location> {
        self.get(iata_code).map(|airport| airport.location)
    }
}

fn parse_record(record: &csv::StringRecord) -> Option<Airport> {
    let field = |index: usize| {
        record
            .get(index)
            .map(str::trim)
            .filter(|value| !value.is_empty() && *value != NULL_FIELD)
    };

    let iata_code = field(FIELD_IATA)?;
    let latitude = field(FIELD_LATITUDE)?.parse::<f64>().ok()?;
    let longitude = field(FIELD_LONGITUDE)?.parse::<f64>().ok()?;

    Some(Airport {
        name: field(FIELD_NAME).unwrap_or_default().to_string(),
        city: field(FIELD_CITY).unwrap_or_default().to_string(),
        country: field(FIELD_COUNTRY).unwrap_or_default().to_string(),
        iata_code: iata_code.to_string(),
        location: Location::new(latitude, longitude),
    })
}
