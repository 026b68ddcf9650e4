//! # Calendar ↔ ephemeris time conversion
//!
//! This module maps a calendar reference instant plus relative second offsets
//! onto the continuous ephemeris time axis (TDB-like seconds past J2000) used
//! by every other pipeline stage, and back into the UTC calendar strings
//! shown in the mission catalog.
//!
//! A [`TimeConverter`] is constructed from the collaborator-supplied NAIF
//! leap-second kernel. The kernel text is parsed (its `DELTET/DELTA_AT`
//! assignment must be present and well formed) before any conversion is
//! allowed; a missing or malformed kernel surfaces as
//! [`CosmoforgeError::TimeSystem`]. The UTC↔TDB arithmetic itself is done by
//! [hifitime](https://docs.rs/hifitime), whose bundled IERS table matches any
//! current NAIF leap-second kernel.
//!
//! ## Guarantees
//!
//! - `to_ephemeris_times` output length equals the offset input length.
//! - The output is strictly increasing iff the input offsets are; the
//!   converter never re-sorts. Monotonicity violations are detected by the
//!   pipeline before kernel writing.
//! - Catalog timestamps and dates are derived from `epoch0 + offset`
//!   directly, never by inverting an ephemeris time, so a midnight reference
//!   instant renders as midnight of the same calendar day.

use camino::Utf8Path;
use hifitime::{Duration, Epoch, TimeScale};
use nom::{
    bytes::complete::{tag, take_until, take_while1},
    character::complete::multispace0,
    multi::many1,
    number::complete::double,
    IResult,
};

use crate::constants::EphemerisSeconds;
use crate::cosmoforge_errors::CosmoforgeError;

/// A calendar reference instant, the `t = 0` of one trajectory.
///
/// Fields mirror the six components of the raw input records. The `second`
/// component may carry a fractional part; all other components are integral.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalendarEpoch {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: f64,
}

impl CalendarEpoch {
    /// Build the hifitime UTC epoch, failing on out-of-range calendar fields.
    fn to_epoch(self) -> Result<Epoch, CosmoforgeError> {
        if !(0.0..60.0).contains(&self.second) {
            return Err(CosmoforgeError::TimeSystem(format!(
                "calendar second {} out of range [0, 60)",
                self.second
            )));
        }
        let whole = self.second.trunc() as u8;
        let nanos = ((self.second - self.second.trunc()) * 1e9).round() as u32;
        Epoch::maybe_from_gregorian(
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            whole,
            nanos,
            TimeScale::UTC,
        )
        .map_err(|e| {
            CosmoforgeError::TimeSystem(format!(
                "calendar fields {:?} out of range: {e}",
                (
                    self.year,
                    self.month,
                    self.day,
                    self.hour,
                    self.minute,
                    self.second
                )
            ))
        })
    }
}

/// Leap-second entries extracted from a NAIF leap-second kernel.
///
/// Each entry is a `(ΔAT seconds, effective date)` pair of the
/// `DELTET/DELTA_AT` assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct LeapSecondTable {
    pub entries: Vec<(f64, String)>,
}

impl LeapSecondTable {
    /// Parse the `DELTET/DELTA_AT` block of a leap-second kernel text.
    ///
    /// Arguments
    /// -----------------
    /// * `input`: Full kernel text.
    ///
    /// Return
    /// ----------
    /// * An [`IResult`] carrying the remaining input and the parsed table.
    pub fn parse(input: &str) -> IResult<&str, Self> {
        let (input, _) = take_until("DELTET/DELTA_AT")(input)?;
        let (input, _) = tag("DELTET/DELTA_AT")(input)?;
        let (input, _) = take_until("(")(input)?;
        let (input, _) = tag("(")(input)?;
        let (input, raw) = take_until(")")(input)?;
        let (_, pairs) = many1(Self::parse_entry)(raw)?;
        let entries = pairs
            .into_iter()
            .map(|(dt, date)| (dt, date.to_string()))
            .collect();
        Ok((input, LeapSecondTable { entries }))
    }

    /// Parse one `ΔAT, @DATE` pair inside the assignment block.
    fn parse_entry(input: &str) -> IResult<&str, (f64, &str)> {
        let (input, _) = multispace0(input)?;
        let (input, dt) = double(input)?;
        let (input, _) = multispace0(input)?;
        let (input, _) = tag(",")(input)?;
        let (input, _) = multispace0(input)?;
        let (input, _) = tag("@")(input)?;
        let (input, date) =
            take_while1(|c: char| c.is_ascii_alphanumeric() || c == '-')(input)?;
        Ok((input, (dt, date)))
    }
}

/// Converter between calendar instants and the continuous ephemeris axis.
///
/// Holds the parsed leap-second table of the run; constructing one proves the
/// collaborator-supplied kernel is present and well formed.
#[derive(Debug, Clone)]
pub struct TimeConverter {
    table: LeapSecondTable,
}

impl TimeConverter {
    /// Load and parse the leap-second kernel at `lsk_path`.
    ///
    /// Arguments
    /// -----------------
    /// * `lsk_path`: Location of the NAIF leap-second kernel (`*.tls`).
    ///
    /// Return
    /// ----------
    /// * A ready converter, or [`CosmoforgeError::TimeSystem`] if the file is
    ///   missing, unreadable, or carries no `DELTET/DELTA_AT` block.
    pub fn new(lsk_path: &Utf8Path) -> Result<Self, CosmoforgeError> {
        let text = std::fs::read_to_string(lsk_path).map_err(|e| {
            CosmoforgeError::TimeSystem(format!(
                "leap-second kernel `{lsk_path}` is unavailable: {e}"
            ))
        })?;
        let (_, table) = LeapSecondTable::parse(&text).map_err(|_| {
            CosmoforgeError::TimeSystem(format!(
                "`{lsk_path}` is not a leap-second kernel (no DELTET/DELTA_AT block)"
            ))
        })?;
        Ok(TimeConverter { table })
    }

    /// Number of leap-second entries in the loaded table.
    pub fn leap_second_count(&self) -> usize {
        self.table.entries.len()
    }

    /// Convert a calendar reference instant to ephemeris seconds past J2000.
    pub fn epoch_to_et(&self, epoch0: &CalendarEpoch) -> Result<EphemerisSeconds, CosmoforgeError> {
        Ok(epoch0.to_epoch()?.to_et_seconds())
    }

    /// Map `epoch0` plus relative offsets onto the ephemeris time axis.
    ///
    /// The output has exactly one entry per offset and preserves the input
    /// ordering; strictly increasing offsets yield strictly increasing
    /// ephemeris times.
    ///
    /// Arguments
    /// -----------------
    /// * `epoch0`: Calendar reference instant of the trajectory.
    /// * `offsets`: Seconds relative to `epoch0`, one per sample.
    ///
    /// Return
    /// ----------
    /// * Ephemeris times, or [`CosmoforgeError::TimeSystem`] on out-of-range
    ///   calendar fields.
    pub fn to_ephemeris_times(
        &self,
        epoch0: &CalendarEpoch,
        offsets: &[f64],
    ) -> Result<Vec<EphemerisSeconds>, CosmoforgeError> {
        let et0 = self.epoch_to_et(epoch0)?;
        Ok(offsets.iter().map(|dt| et0 + dt).collect())
    }

    /// UTC instant of a calendar reference epoch.
    pub fn utc_epoch(&self, epoch0: &CalendarEpoch) -> Result<Epoch, CosmoforgeError> {
        epoch0.to_epoch()
    }

    /// UTC instant `offset` seconds after the calendar reference epoch.
    ///
    /// Catalog timestamps are derived this way, never by inverting an
    /// ephemeris time: the ET inversion is only millisecond-accurate, which
    /// is enough to push a midnight instant onto the previous calendar day.
    pub fn epoch_at_offset(
        &self,
        epoch0: &CalendarEpoch,
        offset: f64,
    ) -> Result<Epoch, CosmoforgeError> {
        Ok(epoch0.to_epoch()? + Duration::from_seconds(offset))
    }

    /// Catalog timestamp format `yyyy-mm-dd HH:MM:SS.sss UTC`, rounded to
    /// the nearest millisecond.
    pub fn to_calendar_string(&self, epoch: Epoch) -> String {
        let (year, month, day, hour, minute, second, nanos) = epoch
            .round(Duration::from_milliseconds(1.0))
            .to_gregorian_utc();
        format!(
            "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}.{:03} UTC",
            nanos / 1_000_000
        )
    }

    /// Calendar date components `(year, month, day)` of an instant, used for
    /// the coarse catalog duration label.
    pub fn to_gregorian_date(&self, epoch: Epoch) -> (i32, u8, u8) {
        let (year, month, day, ..) = epoch
            .round(Duration::from_milliseconds(1.0))
            .to_gregorian_utc();
        (year, month, day)
    }
}
