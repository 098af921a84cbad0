//! # Solar position models
//!
//! Two closed-form models giving the apparent position of the sun (azimuth and elevation) for an
//! observer, from a UTC date/time and a geographic position.
//!
//! | Model | Entry point | Time argument | Notes |
//! |-------|-------------|---------------|-------|
//! | [`SimpleSunPosition`] | [`solar_position_simple`] | linear date approximation | mean elements + equation of time |
//! | [`SolarAzEl`] | [`solar_position_precise`] | true Julian Day | eccentric anomaly, ecliptic → equatorial → horizontal |
//!
//! Both models implement [`SolarEphemeris`], and [`SolarModel`] selects one at runtime
//! (e.g. from a configuration file).
//!
//! ## Accuracy
//!
//! These are low/medium precision approximations: no refraction, nutation or aberration.
//! [`SolarAzEl`] agrees with reference ephemerides to a few tenths of a degree.
//! [`SimpleSunPosition`] is driven by a coarse date mapping (see
//! [`simplified_julian_date`](crate::time::simplified_julian_date)) and its output should be
//! considered indicative only.
//!
//! ## Numerical domain
//!
//! Arguments of `asin`/`acos` are clamped to `[-1, 1]`, so rounding never produces NaN.
//! The models are infallible; non-finite inputs still propagate NaN.

use std::{fmt, str::FromStr};

use serde::Deserialize;

use crate::{constants::Degree, heliostat_errors::HeliostatError, observer::GeoObservation};

pub mod az_el;
pub mod simple;

pub use az_el::{solar_position_precise, SolarAzEl};
pub use simple::{solar_position_simple, SimpleSolarElements, SimpleSunPosition};

/// Apparent position of the sun for an observer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarPosition {
    /// Compass bearing of the sun, degrees clockwise from north
    pub azimuth: Degree,
    /// Angle of the sun above the local horizon, degrees
    pub elevation: Degree,
}

impl SolarPosition {
    pub fn new(azimuth: Degree, elevation: Degree) -> Self {
        SolarPosition {
            azimuth,
            elevation,
        }
    }

    /// Zenith angle in degrees (`90 - elevation`).
    pub fn zenith_angle(&self) -> Degree {
        90.0 - self.elevation
    }

    /// `true` when the sun center is on or above the geometric horizon.
    pub fn is_above_horizon(&self) -> bool {
        self.elevation >= 0.0
    }
}

impl fmt::Display for SolarPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "az={:.4}° el={:.4}°", self.azimuth, self.elevation)
    }
}

/// Capability shared by every solar position model.
pub trait SolarEphemeris {
    /// Apparent position of the sun for the given observation.
    fn solar_position(&self, observation: &GeoObservation) -> SolarPosition;
}

/// Runtime selection of a solar position model.
///
/// Parsed from `"simple"` or `"az_el"` (`"azel"` is accepted too).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum SolarModel {
    /// [`SimpleSunPosition`]
    Simple,
    /// [`SolarAzEl`]
    #[default]
    AzEl,
}

impl SolarEphemeris for SolarModel {
    fn solar_position(&self, observation: &GeoObservation) -> SolarPosition {
        match self {
            SolarModel::Simple => SimpleSunPosition.solar_position(observation),
            SolarModel::AzEl => SolarAzEl.solar_position(observation),
        }
    }
}

impl FromStr for SolarModel {
    type Err = HeliostatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(SolarModel::Simple),
            "az_el" | "azel" => Ok(SolarModel::AzEl),
            other => Err(HeliostatError::InvalidSolarModel(other.to_string())),
        }
    }
}

impl TryFrom<String> for SolarModel {
    type Error = HeliostatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for SolarModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolarModel::Simple => write!(f, "simple"),
            SolarModel::AzEl => write!(f, "az_el"),
        }
    }
}
