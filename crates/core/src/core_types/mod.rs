//! Core types and utilities

pub mod geo;
pub mod units;

pub use geo::GeoBounds;
pub use units::*;
