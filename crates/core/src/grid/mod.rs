//! Sample grids

pub mod field;

pub use field::Field;
