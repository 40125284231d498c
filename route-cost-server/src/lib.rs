//! Route cost estimation server.
//!
//! Answers: "how much will this vehicle's commute from the base cost per
//! month, and does it fit the current spending limit?"

pub mod config;
pub mod domain;
pub mod estimate;
pub mod geocode;
pub mod routing;
pub mod web;
