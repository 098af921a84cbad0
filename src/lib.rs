//! Sun tracking geometry for heliostats.
//!
//! * [`solar_position`]: two closed-form models of the sun's azimuth and elevation
//! * [`orientation`]: orientation angles of a flat surface and its normal
//! * [`heliostat`]: aiming a mirror so that sunlight lands on a fixed target

pub mod constants;
pub mod heliostat;
pub mod heliostat_errors;
pub mod observer;
pub mod orientation;
pub mod solar_position;
pub mod time;
pub mod vector_math;
