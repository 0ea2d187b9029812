use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use super::CelestialBody;
use crate::ephemeris::{Ephemeris, EphemerisError};

/// Positions are computed at this UT hour
pub const UT_HOUR: f64 = 0.0;
pub const UT_LABEL: &str = "00:00";
pub const NOTE: &str = "Deklinationen sind ortsunabhängig; nur UT ist hier fix (00:00).";

pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 2050;

// ASCII digits only
static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})$").expect("date pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateInputError {
    #[error("date parameter is missing")]
    Missing,
    #[error("date {0:?} does not match YYYY-MM-DD")]
    Malformed(String),
    #[error("year {0} is outside 1900-2050")]
    Year(i32),
    #[error("month {0} is outside 1-12")]
    Month(i32),
    #[error("day {0} is outside 1-31")]
    Day(i32),
}

/// Calendar date taken from the query string
///
/// The day is only checked against 1-31; month lengths are not considered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateInput {
    pub year: i32,
    pub month: i32,
    pub day: i32,
}

impl DateInput {
    pub fn parse(raw: &str) -> Result<Self, DateInputError> {
        let caps = DATE_PATTERN
            .captures(raw)
            .ok_or_else(|| DateInputError::Malformed(raw.to_string()))?;

        let field = |i: usize| -> Result<i32, DateInputError> {
            caps[i]
                .parse()
                .map_err(|_| DateInputError::Malformed(raw.to_string()))
        };
        let (year, month, day) = (field(1)?, field(2)?, field(3)?);

        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(DateInputError::Year(year));
        }
        if !(1..=12).contains(&month) {
            return Err(DateInputError::Month(month));
        }
        if !(1..=31).contains(&day) {
            return Err(DateInputError::Day(day));
        }

        Ok(Self { year, month, day })
    }
}

/// Which side of the celestial equator a body is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Hemisphere {
    #[serde(rename = "Nördlich (+)")]
    North,
    #[serde(rename = "Südlich (-)")]
    South,
    #[serde(rename = "Äquator (0)")]
    Equator,
}

impl Hemisphere {
    pub fn from_declination(declination: f64) -> Self {
        if declination > 0.0 {
            Hemisphere::North
        } else if declination < 0.0 {
            Hemisphere::South
        } else {
            Hemisphere::Equator
        }
    }
}

/// Round half towards positive infinity
pub fn round_half_up(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor + 0.5).floor() / factor
}

/// Format degrees with two decimals, e.g. -12.3456 -> "-12.35°"
pub fn format_degrees(value: f64) -> String {
    format!("{:.2}°", round_half_up(value, 2))
}

#[derive(Debug, Clone, Serialize)]
pub struct DeclinationResult {
    pub body: String,
    pub declination_deg: f64,
    pub declination_text: String,
    pub hemisphere: Hemisphere,
}

impl DeclinationResult {
    pub fn new(body: CelestialBody, declination: f64) -> Self {
        Self {
            body: body.german_name().to_string(),
            declination_deg: round_half_up(declination, 6),
            declination_text: format_degrees(declination),
            hemisphere: Hemisphere::from_declination(declination),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DeclinationMeta {
    pub date: String,
    pub ut: String,
    pub tjd: f64,
    pub note: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeclinationResponse {
    pub ok: bool,
    pub meta: DeclinationMeta,
    pub data: Vec<DeclinationResult>,
}

/// Julian day and per-body results for one date
#[derive(Debug, Clone)]
pub struct Declinations {
    pub julian_day: f64,
    pub results: Vec<DeclinationResult>,
}

impl Declinations {
    pub fn into_response(self, date: String) -> DeclinationResponse {
        DeclinationResponse {
            ok: true,
            meta: DeclinationMeta {
                date,
                ut: UT_LABEL.to_string(),
                tjd: self.julian_day,
                note: NOTE.to_string(),
            },
            data: self.results,
        }
    }
}

/// Calculate declinations for every cataloged body at UT 00:00
///
/// Fails as a whole if any single body fails.
pub fn compute_declinations(
    ephemeris: &dyn Ephemeris,
    date: &DateInput,
) -> Result<Declinations, EphemerisError> {
    let julian_day = ephemeris.julian_day(date.year, date.month, date.day, UT_HOUR);

    let results = CelestialBody::all()
        .iter()
        .map(|&body| {
            let position = ephemeris.equatorial_position(julian_day, body)?;
            Ok(DeclinationResult::new(body, position.declination))
        })
        .collect::<Result<Vec<_>, EphemerisError>>()?;

    Ok(Declinations {
        julian_day,
        results,
    })
}
