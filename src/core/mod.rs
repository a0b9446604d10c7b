//! Core building blocks: the time-of-flight and aperture mask engines, input
//! validation, coordinate generation and transmit configuration. The high-level
//! `api` module composes these into caller-facing helpers.
pub mod geometry;
pub mod mask;
pub mod params;
pub mod tof;
pub mod validate;
