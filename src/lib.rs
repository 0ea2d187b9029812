//! Deklination - declinations of the Sun, Moon and planets
//!
//! A single HTTP endpoint returning the equatorial declination of eleven solar
//! system bodies at UT 00:00 of a given date, computed with the Swiss Ephemeris.

pub mod config;
pub mod ephemeris;
pub mod models;
pub mod server;

pub use config::Config;
pub use server::{router, run_server, AppState};
