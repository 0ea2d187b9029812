use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_ROUTE: &str = "/api/declinations";

/// Service configuration, from flags or environment
#[derive(Debug, Clone, Parser)]
#[command(name = "deklination")]
#[command(version, about = "Declinations of Sun, Moon and planets at UT 00:00")]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "DECLINATIONS_BIND", default_value = "0.0.0.0:8080")]
    pub bind: String,

    /// Path of the declination endpoint
    #[arg(long, env = "DECLINATIONS_ROUTE", default_value = DEFAULT_ROUTE, value_parser = parse_route)]
    pub route: String,

    /// Directory holding Swiss Ephemeris data files (*.se1)
    #[arg(long, env = "SE_EPHE_PATH")]
    pub ephe_path: Option<PathBuf>,
}

fn parse_route(s: &str) -> Result<String, String> {
    if !s.starts_with('/') {
        return Err(format!("route must start with '/': {}", s));
    }
    if s.contains(['{', '}', '*']) {
        return Err(format!("route must not contain path parameters: {}", s));
    }
    if s == "/health" {
        return Err("route /health is reserved".to_string());
    }
    Ok(s.to_string())
}
