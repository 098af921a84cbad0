//! # Heliostat: installation, solar model and mirror aiming
//!
//! This module defines the [`Heliostat`] struct, the façade that wires together:
//!
//! 1. **Installation parameters** ([`HeliostatConfig`]): observer position, target direction,
//!    azimuth offset of the local frame and the solar model to use.
//! 2. **Solar position** through the [`SolarEphemeris`] implementation selected by
//!    [`SolarModel`].
//! 3. **Mirror geometry**: the mirror normal bisecting the reversed sun ray and the target
//!    direction, its orientation angles, and the reflected ray.
//!
//! ## Typical usage
//!
//! ```rust
//! use heliostat::heliostat::{Heliostat, HeliostatConfig};
//!
//! let config = HeliostatConfig::builder()
//!     .latitude(-33.8352)
//!     .longitude(18.6510)
//!     .target([9.5, -13.0, -2.2])
//!     .azimuth_offset(-8.0)
//!     .build()
//!     .unwrap();
//!
//! let heliostat = Heliostat::new(config);
//! let aim = heliostat.aim_at_str("2023-08-01T10:00:00 UTC").unwrap();
//! println!("sun {} -> mirror {:?}", aim.sun, aim.orientation);
//! ```
//!
//! ## Configuration file
//!
//! [`HeliostatConfig::from_toml_str`] reads the same parameters from TOML:
//!
//! ```toml
//! latitude = -33.8352
//! longitude = 18.6510
//! altitude = 120.0
//! target = [9.5, -13.0, -2.2]
//! azimuth_offset = -8.0
//! model = "az_el"
//! ```
//!
//! ## Frame
//!
//! Directions live in the frame of [`crate::orientation`]. `azimuth_offset` is added to the solar
//! azimuth before building the sun ray, to account for an installation whose reference axis is
//! not aligned with true north.

use std::str::FromStr;

use hifitime::Epoch;
use log::debug;
use nalgebra::Vector3;
use serde::Deserialize;

use crate::{
    constants::{Degree, Meter},
    heliostat_errors::HeliostatError,
    observer::GeoObservation,
    orientation::{orientation_from_normal, reflect_ray, sun_ray, Orientation},
    solar_position::{SolarEphemeris, SolarModel, SolarPosition},
    vector_math::normalize,
};

/// Parameters of a heliostat installation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeliostatConfig {
    /// Latitude of the mirror in degrees, positive north
    pub latitude: Degree,
    /// Longitude of the mirror in degrees, positive east
    pub longitude: Degree,
    /// Altitude of the mirror in meters
    #[serde(default)]
    pub altitude: Meter,
    /// Direction from the mirror to the target, any non-zero length
    pub target: [f64; 3],
    /// Added to the solar azimuth before building the sun ray, degrees
    #[serde(default)]
    pub azimuth_offset: Degree,
    /// Solar position model
    #[serde(default)]
    pub model: SolarModel,
}

impl HeliostatConfig {
    /// Create a new [`HeliostatConfigBuilder`].
    ///
    /// All fields start at zero except the target, which has no default and must be set.
    /// The model defaults to [`SolarModel::AzEl`].
    pub fn builder() -> HeliostatConfigBuilder {
        HeliostatConfigBuilder::new()
    }

    /// Parse and validate a configuration from a TOML document.
    ///
    /// Return
    /// ------
    /// * The configuration, [`HeliostatError::TomlParsing`] for malformed TOML or unknown keys,
    ///   [`HeliostatError::InvalidSolarModel`] for an unknown `model`, or
    ///   [`HeliostatError::InvalidConfig`] if a value is out of range.
    pub fn from_toml_str(input: &str) -> Result<Self, HeliostatError> {
        let config: HeliostatConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Target direction as a vector.
    pub fn target_vector(&self) -> Vector3<f64> {
        Vector3::from(self.target)
    }

    fn validate(&self) -> Result<(), HeliostatError> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(HeliostatError::InvalidConfig(format!(
                "latitude must be in [-90, 90], got {}",
                self.latitude
            )));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(HeliostatError::InvalidConfig(format!(
                "longitude must be in [-180, 180], got {}",
                self.longitude
            )));
        }
        if !self.altitude.is_finite() {
            return Err(HeliostatError::InvalidConfig(format!(
                "altitude must be finite, got {}",
                self.altitude
            )));
        }
        if !self.azimuth_offset.is_finite() {
            return Err(HeliostatError::InvalidConfig(format!(
                "azimuth_offset must be finite, got {}",
                self.azimuth_offset
            )));
        }
        if self.target.iter().any(|c| !c.is_finite()) || self.target_vector().norm() == 0.0 {
            return Err(HeliostatError::InvalidConfig(format!(
                "target must be a finite non-zero vector, got {:?}",
                self.target
            )));
        }
        Ok(())
    }
}

impl FromStr for HeliostatConfig {
    type Err = HeliostatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HeliostatConfig::from_toml_str(s)
    }
}

/// Builder for [`HeliostatConfig`], with validation.
#[derive(Debug, Clone)]
pub struct HeliostatConfigBuilder {
    latitude: Degree,
    longitude: Degree,
    altitude: Meter,
    target: Option<[f64; 3]>,
    azimuth_offset: Degree,
    model: SolarModel,
}

impl Default for HeliostatConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HeliostatConfigBuilder {
    pub fn new() -> Self {
        HeliostatConfigBuilder {
            latitude: 0.0,
            longitude: 0.0,
            altitude: 0.0,
            target: None,
            azimuth_offset: 0.0,
            model: SolarModel::default(),
        }
    }

    pub fn latitude(mut self, v: Degree) -> Self {
        self.latitude = v;
        self
    }

    pub fn longitude(mut self, v: Degree) -> Self {
        self.longitude = v;
        self
    }

    pub fn altitude(mut self, v: Meter) -> Self {
        self.altitude = v;
        self
    }

    pub fn target(mut self, v: [f64; 3]) -> Self {
        self.target = Some(v);
        self
    }

    pub fn azimuth_offset(mut self, v: Degree) -> Self {
        self.azimuth_offset = v;
        self
    }

    pub fn model(mut self, v: SolarModel) -> Self {
        self.model = v;
        self
    }

    /// Finalize the builder and produce a validated [`HeliostatConfig`].
    ///
    /// # Errors
    /// [`HeliostatError::InvalidConfig`] if the target is missing or a value is out of range.
    pub fn build(self) -> Result<HeliostatConfig, HeliostatError> {
        let target = self
            .target
            .ok_or_else(|| HeliostatError::InvalidConfig("target is not set".into()))?;

        let config = HeliostatConfig {
            latitude: self.latitude,
            longitude: self.longitude,
            altitude: self.altitude,
            target,
            azimuth_offset: self.azimuth_offset,
            model: self.model,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Mirror normal that reflects `sun_ray` onto `target`.
///
/// ```text
/// n = (-ray/|ray| + target/|target|) / 2
/// ```
///
/// The result is not unit length. It is zero when the target lies exactly along the sun ray,
/// in which case any later normalization fails with [`HeliostatError::DegenerateVector`].
pub fn mirror_normal(
    sun_ray: &Vector3<f64>,
    target: &Vector3<f64>,
) -> Result<Vector3<f64>, HeliostatError> {
    Ok((-normalize(sun_ray)? + normalize(target)?) / 2.0)
}

/// Result of aiming a heliostat at a given instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeliostatAim {
    /// Position of the sun for the installation
    pub sun: SolarPosition,
    /// Unit direction of the incoming light
    pub sun_ray: Vector3<f64>,
    /// Unit normal of the mirror
    pub mirror_normal: Vector3<f64>,
    /// Orientation angles of the mirror
    pub orientation: Orientation,
    /// Unit direction of the light leaving the mirror, toward the target
    pub reflected_ray: Vector3<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Heliostat {
    config: HeliostatConfig,
}

impl Heliostat {
    pub fn new(config: HeliostatConfig) -> Self {
        Heliostat { config }
    }

    pub fn config(&self) -> &HeliostatConfig {
        &self.config
    }

    /// Observation at the mirror location for a UTC date and time.
    pub fn observation(
        &self,
        year: i32,
        month: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: f64,
    ) -> GeoObservation {
        GeoObservation::new(
            year,
            month,
            day,
            hour,
            minute,
            second,
            self.config.latitude,
            self.config.longitude,
            self.config.altitude,
        )
    }

    /// Position of the sun for the installation at the time of `observation`.
    ///
    /// Only the date and time of `observation` are used; the position comes from the
    /// configuration.
    pub fn sun_position(&self, observation: &GeoObservation) -> SolarPosition {
        let observation = GeoObservation {
            latitude: self.config.latitude,
            longitude: self.config.longitude,
            altitude: self.config.altitude,
            ..*observation
        };
        self.config.model.solar_position(&observation)
    }

    /// `true` when the sun is above the geometric horizon at the time of `observation`.
    pub fn is_sun_up(&self, observation: &GeoObservation) -> bool {
        self.sun_position(observation).is_above_horizon()
    }

    /// Aim the mirror for the time of `observation`.
    ///
    /// Steps
    /// -----
    /// 1. Sun position from the configured [`SolarModel`].
    /// 2. Sun ray from `(azimuth + azimuth_offset, elevation)`.
    /// 3. Mirror normal with [`mirror_normal`], converted to angles with
    ///    [`orientation_from_normal`].
    /// 4. Reflected ray from the normal rebuilt from those angles, which checks that the angles
    ///    describe the mirror.
    ///
    /// # Errors
    /// [`HeliostatError::DegenerateVector`] if the target lies exactly along the sun ray.
    pub fn aim(&self, observation: &GeoObservation) -> Result<HeliostatAim, HeliostatError> {
        let sun = self.sun_position(observation);
        let ray = sun_ray(sun.azimuth + self.config.azimuth_offset, sun.elevation)?;

        let normal = normalize(&mirror_normal(&ray, &self.config.target_vector())?)?;
        let orientation = orientation_from_normal(&normal)?;
        let reflected_ray = reflect_ray(&ray, &orientation.normal())?;

        debug!(
            "heliostat aim: sun {sun}, mirror theta={:.4}° phi={:.4}°",
            orientation.theta, orientation.phi
        );

        Ok(HeliostatAim {
            sun,
            sun_ray: ray,
            mirror_normal: normal,
            orientation,
            reflected_ray,
        })
    }

    /// Aim the mirror at a [`hifitime::Epoch`].
    pub fn aim_at_epoch(&self, epoch: &Epoch) -> Result<HeliostatAim, HeliostatError> {
        let observation = GeoObservation::from_epoch(
            epoch,
            self.config.latitude,
            self.config.longitude,
            self.config.altitude,
        );
        self.aim(&observation)
    }

    /// Aim the mirror at a date given as a string, e.g. `"2023-08-01T10:00:00 UTC"`.
    ///
    /// Any format accepted by [`hifitime::Epoch::from_str`] works.
    pub fn aim_at_str(&self, date: &str) -> Result<HeliostatAim, HeliostatError> {
        let epoch =
            Epoch::from_str(date).map_err(|e| HeliostatError::InvalidEpoch(format!("{date}: {e}")))?;
        self.aim_at_epoch(&epoch)
    }
}

#[cfg(test)]
mod heliostat_test {
    use super::*;
    use approx::assert_relative_eq;

    fn durbanville() -> Heliostat {
        Heliostat::new(
            HeliostatConfig::builder()
                .latitude(-33.8352)
                .longitude(18.6510)
                .target([9.5, -13.0, -2.2])
                .azimuth_offset(-8.0)
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn test_builder_defaults() {
        let config = HeliostatConfig::builder()
            .target([1.0, 0.0, 0.0])
            .build()
            .unwrap();
        assert_eq!(config.latitude, 0.0);
        assert_eq!(config.altitude, 0.0);
        assert_eq!(config.model, SolarModel::AzEl);
    }

    #[test]
    fn test_builder_validation() {
        assert_eq!(
            HeliostatConfig::builder().build(),
            Err(HeliostatError::InvalidConfig("target is not set".into()))
        );

        let err = HeliostatConfig::builder()
            .latitude(91.0)
            .target([1.0, 0.0, 0.0])
            .build();
        assert!(matches!(err, Err(HeliostatError::InvalidConfig(_))));

        let err = HeliostatConfig::builder()
            .longitude(-180.5)
            .target([1.0, 0.0, 0.0])
            .build();
        assert!(matches!(err, Err(HeliostatError::InvalidConfig(_))));

        let err = HeliostatConfig::builder().target([0.0, 0.0, 0.0]).build();
        assert!(matches!(err, Err(HeliostatError::InvalidConfig(_))));

        let err = HeliostatConfig::builder()
            .altitude(f64::NAN)
            .target([0.0, 1.0, 0.0])
            .build();
        assert!(matches!(err, Err(HeliostatError::InvalidConfig(_))));
    }

    #[test]
    fn test_from_toml() {
        let config = HeliostatConfig::from_toml_str(
            r#"
            latitude = -33.8352
            longitude = 18.6510
            altitude = 120.0
            target = [9.5, -13.0, -2.2]
            azimuth_offset = -8.0
            model = "simple"
            "#,
        )
        .unwrap();

        assert_eq!(config.model, SolarModel::Simple);
        assert_eq!(config.altitude, 120.0);
        assert_eq!(config.target, [9.5, -13.0, -2.2]);

        let minimal: HeliostatConfig = "latitude = 10.0\nlongitude = 20.0\ntarget = [0.0, 0.0, 1.0]"
            .parse()
            .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(minimal.model, SolarModel::AzEl);
        assert_eq!(minimal.azimuth_offset, 0.0);
    }

    #[test]
    fn test_from_toml_errors() {
        let err = HeliostatConfig::from_toml_str("latitude = 0.0\nlongitude = 0.0");
        assert!(matches!(err, Err(HeliostatError::TomlParsing(_))));

        let err = HeliostatConfig::from_toml_str(
            "latitude = 0.0\nlongitude = 0.0\ntarget = [1.0, 0.0, 0.0]\nmodel = \"spa\"",
        );
        assert!(matches!(err, Err(HeliostatError::TomlParsing(_))));

        let err = HeliostatConfig::from_toml_str(
            "latitude = 100.0\nlongitude = 0.0\ntarget = [1.0, 0.0, 0.0]",
        );
        assert!(matches!(err, Err(HeliostatError::InvalidConfig(_))));
    }

    #[test]
    fn test_mirror_normal() {
        let ray = Vector3::new(0.0, 0.0, -2.0);
        let target = Vector3::new(5.0, 0.0, 0.0);
        let n = mirror_normal(&ray, &target).unwrap();
        assert_relative_eq!(n, Vector3::new(0.5, 0.0, 0.5));

        assert_eq!(
            mirror_normal(&ray, &Vector3::zeros()),
            Err(HeliostatError::DegenerateVector("normalize"))
        );
    }

    #[test]
    fn test_aim_reflects_onto_target() {
        let heliostat = durbanville();
        let obs = heliostat.observation(2023, 8, 1, 10, 0, 0.0);
        let aim = heliostat.aim(&obs).unwrap();

        let target = normalize(&heliostat.config().target_vector()).unwrap();
        assert_relative_eq!(aim.reflected_ray, target, epsilon = 1e-12);
        assert_relative_eq!(aim.orientation.normal(), aim.mirror_normal, epsilon = 1e-12);
        assert_relative_eq!(aim.sun.azimuth, 15.40429083847792, epsilon = 1e-9);
    }

    #[test]
    fn test_aim_at_epoch_and_str_agree() {
        let heliostat = durbanville();
        let from_str = heliostat.aim_at_str("2023-08-01T10:00:00 UTC").unwrap();
        let from_epoch = heliostat
            .aim_at_epoch(&Epoch::from_gregorian_utc(2023, 8, 1, 10, 0, 0, 0))
            .unwrap();
        let from_parts = heliostat
            .aim(&heliostat.observation(2023, 8, 1, 10, 0, 0.0))
            .unwrap();

        assert_eq!(from_str, from_epoch);
        assert_eq!(from_epoch, from_parts);

        assert!(matches!(
            heliostat.aim_at_str("not a date"),
            Err(HeliostatError::InvalidEpoch(_))
        ));
    }

    #[test]
    fn test_sun_position_uses_installation_site() {
        let heliostat = durbanville();
        let elsewhere = GeoObservation::new(2023, 8, 1, 10, 0, 0.0, 51.5, -0.1, 35.0);
        let here = heliostat.observation(2023, 8, 1, 10, 0, 0.0);

        assert_eq!(
            heliostat.sun_position(&elsewhere),
            heliostat.sun_position(&here)
        );
        assert!(heliostat.is_sun_up(&here));
        assert!(!heliostat.is_sun_up(&heliostat.observation(2023, 8, 1, 22, 0, 0.0)));
    }
}
