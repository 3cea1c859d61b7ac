use std::{fmt, num::ParseFloatError, str::FromStr};

use serde::Serialize;
use thiserror::Error;

#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoordinatesParseError {
    #[error("Expected <latitude>,<longitude>, got: {0}")]
    Format(String),
    #[error("Invalid latitude: {0}")]
    InvalidLatitude(ParseFloatError),
    #[error("Invalid longitude: {0}")]
    InvalidLongitude(ParseFloatError),
    #[error("Latitude out of range: {0}")]
    LatitudeOutOfRange(f64),
    #[error("Longitude out of range: {0}")]
    LongitudeOutOfRange(f64),
}

/// Parses `"<latitude>,<longitude>"`
impl FromStr for Coordinates {
    type Err = CoordinatesParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (latitude, longitude) = value
            .split_once(',')
            .ok_or_else(|| CoordinatesParseError::Format(value.to_string()))?;

        let latitude: f64 = latitude
            .trim()
            .parse()
            .map_err(CoordinatesParseError::InvalidLatitude)?;
        let longitude: f64 = longitude
            .trim()
            .parse()
            .map_err(CoordinatesParseError::InvalidLongitude)?;

        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinatesParseError::LatitudeOutOfRange(latitude));
        }

        if !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinatesParseError::LongitudeOutOfRange(longitude));
        }

        Ok(Coordinates {
            latitude,
            longitude,
        })
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Geolocation is not supported")]
    Unsupported,
}

impl LocationError {
    pub fn message_key(&self) -> &'static str {
        match self {
            LocationError::PermissionDenied => "Location permission denied",
            LocationError::Unsupported => "Geolocation is not supported",
        }
    }
}

pub trait LocationProvider: Send {
    fn current_position(&self) -> Result<Coordinates, LocationError>;
}

/// Where the home view's location panel gets its position from
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum LocationSource {
    #[default]
    Unsupported,
    Denied,
    Fixed(Coordinates),
}

impl LocationProvider for LocationSource {
    fn current_position(&self) -> Result<Coordinates, LocationError> {
        match self {
            LocationSource::Unsupported => Err(LocationError::Unsupported),
            LocationSource::Denied => Err(LocationError::PermissionDenied),
            LocationSource::Fixed(coordinates) => Ok(*coordinates),
        }
    }
}
