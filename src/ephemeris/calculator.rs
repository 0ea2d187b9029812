//! Swiss Ephemeris wrapper for equatorial positions
//!
//! This module provides safe Rust wrappers around the libswisseph-sys FFI bindings.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, Once};

use thiserror::Error;

use crate::models::CelestialBody;

// Swiss Ephemeris constants
const SE_GREG_CAL: i32 = 1;
const SEFLG_SWIEPH: i32 = 2; // Use Swiss Ephemeris
const SEFLG_EQUATORIAL: i32 = 2048; // Right ascension / declination instead of ecliptic

static INIT: Once = Once::new();

// J2000.0, used to check the catalog at startup
const CHECK_JULIAN_DAY: f64 = 2451545.0;

// The C library keeps its state in globals
static SWE_LOCK: Mutex<()> = Mutex::new(());

fn lock_swe() -> MutexGuard<'static, ()> {
    SWE_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Debug, Error)]
pub enum EphemerisError {
    #[error("Invalid ephemeris path: {0}")]
    InvalidPath(String),
    #[error("Swiss Ephemeris error for {body}: {message}")]
    Calculation { body: &'static str, message: String },
    #[error("Swiss Ephemeris returned a non-finite declination for {0}")]
    NonFinite(&'static str),
    #[error(
        "Swiss Ephemeris cannot compute {body} ({message}); \
         point --ephe-path or SE_EPHE_PATH at a directory containing {file}"
    )]
    MissingData {
        body: &'static str,
        file: &'static str,
        message: String,
    },
}

/// Initialize Swiss Ephemeris (call once at startup)
///
/// Without a path the library looks in its default location and falls back to
/// the Moshier analytical ephemeris for the Sun, Moon and planets. Chiron has
/// no analytical fallback and needs `seas_18.se1` in the ephemeris path;
/// `SwissEphemeris::new` checks for it.
pub fn init_ephemeris(ephe_path: Option<&Path>) -> Result<(), EphemerisError> {
    let c_path = ephe_path
        .map(|path| {
            let s = path
                .to_str()
                .ok_or_else(|| EphemerisError::InvalidPath(path.display().to_string()))?;
            CString::new(s).map_err(|_| EphemerisError::InvalidPath(s.to_string()))
        })
        .transpose()?;

    INIT.call_once(|| {
        let _guard = lock_swe();
        match &c_path {
            Some(path) => {
                tracing::info!(path = %path.to_string_lossy(), "Using Swiss Ephemeris data files");
                // swe_set_ephe_path copies the string into its own buffer
                unsafe { libswisseph_sys::swe_set_ephe_path(path.as_ptr() as *mut c_char) }
            }
            None => {
                tracing::info!("No ephemeris path configured, using library defaults");
                unsafe { libswisseph_sys::swe_set_ephe_path(std::ptr::null_mut()) }
            }
        }
    });

    Ok(())
}

/// Equatorial coordinates of a body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquatorialPosition {
    /// Right ascension in degrees (0-360)
    pub right_ascension: f64,
    /// Declination in degrees, positive north of the celestial equator
    pub declination: f64,
    /// Geocentric distance in AU
    pub distance: f64,
}

/// Convert a Gregorian calendar date and UT hour to Julian Day
///
/// Day values past the end of the month are normalized by the library.
pub fn date_to_julian_day(year: i32, month: i32, day: i32, hour: f64) -> f64 {
    let _guard = lock_swe();
    unsafe { libswisseph_sys::swe_julday(year, month, day, hour, SE_GREG_CAL) }
}

/// Calculate the equatorial position of a body at a given Julian Day (UT)
pub fn calc_equatorial_position(
    julian_day: f64,
    body: CelestialBody,
) -> Result<EquatorialPosition, EphemerisError> {
    let mut xx: [f64; 6] = [0.0; 6];
    let mut serr: [c_char; 256] = [0; 256];

    let iflg = SEFLG_SWIEPH | SEFLG_EQUATORIAL;

    let ret = {
        let _guard = lock_swe();
        unsafe {
            libswisseph_sys::swe_calc_ut(
                julian_day,
                body.swe_id(),
                iflg,
                xx.as_mut_ptr(),
                serr.as_mut_ptr(),
            )
        }
    };

    let message = unsafe { CStr::from_ptr(serr.as_ptr()) }
        .to_string_lossy()
        .trim()
        .to_string();

    if ret < 0 {
        return Err(EphemerisError::Calculation {
            body: body.key(),
            message,
        });
    }

    if !message.is_empty() {
        // typically the fallback notice when no .se1 files are found
        tracing::debug!(body = body.key(), %message, "Swiss Ephemeris warning");
    }

    if !xx[1].is_finite() {
        return Err(EphemerisError::NonFinite(body.key()));
    }

    Ok(EquatorialPosition {
        right_ascension: xx[0],
        declination: xx[1],
        distance: xx[2],
    })
}

/// Source of Julian days and equatorial positions
pub trait Ephemeris: Send + Sync {
    fn julian_day(&self, year: i32, month: i32, day: i32, hour: f64) -> f64;

    fn equatorial_position(
        &self,
        julian_day: f64,
        body: CelestialBody,
    ) -> Result<EquatorialPosition, EphemerisError>;
}

/// Ephemeris backed by the native Swiss Ephemeris library
#[derive(Debug, Clone, Copy)]
pub struct SwissEphemeris {
    _private: (),
}

impl SwissEphemeris {
    /// Initialize the library and make sure every cataloged body can be computed
    pub fn new(ephe_path: Option<&Path>) -> Result<Self, EphemerisError> {
        init_ephemeris(ephe_path)?;
        let ephemeris = Self { _private: () };
        ephemeris.check_catalog()?;
        Ok(ephemeris)
    }

    fn check_catalog(&self) -> Result<(), EphemerisError> {
        for &body in CelestialBody::all() {
            match calc_equatorial_position(CHECK_JULIAN_DAY, body) {
                Ok(_) => {}
                Err(EphemerisError::Calculation { body: key, message }) => {
                    return Err(match body.data_file() {
                        Some(file) => EphemerisError::MissingData {
                            body: key,
                            file,
                            message,
                        },
                        None => EphemerisError::Calculation { body: key, message },
                    });
                }
                Err(e) => return Err(e),
            }
        }
        tracing::info!(bodies = CelestialBody::all().len(), "Ephemeris catalog available");
        Ok(())
    }
}

impl Ephemeris for SwissEphemeris {
    fn julian_day(&self, year: i32, month: i32, day: i32, hour: f64) -> f64 {
        date_to_julian_day(year, month, day, hour)
    }

    fn equatorial_position(
        &self,
        julian_day: f64,
        body: CelestialBody,
    ) -> Result<EquatorialPosition, EphemerisError> {
        calc_equatorial_position(julian_day, body)
    }
}
