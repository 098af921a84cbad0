//! # Constants and type definitions for Heliostat
//!
//! This module centralizes the **conversion factors**, **astronomical epochs**, and **common type
//! aliases** used throughout the `heliostat` library.
//!
//! ## Overview
//!
//! - Unit conversions (degrees ↔ radians, hours ↔ degrees of rotation)
//! - Julian Day reference epochs used by the two solar position models
//! - Core type aliases used across the crate
//!
//! The values are the ones the solar position models were fitted with; some of them differ
//! slightly from the current IAU recommendations (e.g. [`AU_KM_APPROX`]).

// -------------------------------------------------------------------------------------------------
// Unit conversions
// -------------------------------------------------------------------------------------------------

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Radians → degrees
pub const DEGRAD: f64 = 180.0 / std::f64::consts::PI;

/// Degrees of Earth rotation per hour of time
pub const DEG_PER_HOUR: f64 = 15.0;

/// Number of days in a Julian century
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Astronomical Unit in kilometers, rounded value used by the az/el solar model
pub const AU_KM_APPROX: f64 = 149_598_000.0;

// -------------------------------------------------------------------------------------------------
// Epochs
// -------------------------------------------------------------------------------------------------

/// Julian Day of J2000.0 (2000-01-01 12:00:00)
pub const J2000_JD: f64 = 2_451_545.0;

/// Julian Day of 1999-12-31 00:00:00, day zero of the az/el solar model
pub const J1999_DEC31_JD: f64 = 2_451_543.5;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in meters
pub type Meter = f64;
/// Time of day in decimal hours
pub type Hour = f64;
/// Julian Day (days)
pub type JulianDay = f64;
