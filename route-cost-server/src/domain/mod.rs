//! Domain types for route cost estimation.
//!
//! Small value types shared by the geocoding, routing and estimation
//! layers. Parsing functions validate their input, so code receiving a
//! `Coordinates` can trust it came from a well-formed source.

mod address;
mod coordinates;
mod rounding;

pub use address::normalize_address;
pub use coordinates::Coordinates;
pub use rounding::round_to;
