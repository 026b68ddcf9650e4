//! # SPK segment summaries and the summary/name records
//!
//! A segment summary describes one data segment: its ephemeris time span,
//! the `(target, center, frame)` identifier triple, the SPK data type, and
//! the 1-based word addresses of the segment data. With `ND = 2` and
//! `NI = 6` a summary occupies five double-precision words (the six integers
//! are packed pairwise into three words).
//!
//! The summary record (record `fward`) starts with three control doubles
//! (next record, previous record, summary count); the name record follows it
//! and holds one 40-byte segment label per summary.

use std::fmt;

use hifitime::Epoch;
use nom::{
    bytes::complete::take,
    number::complete::{le_f64, le_i32},
    IResult,
};

use crate::constants::{DAF_RECORD_SIZE, EphemerisSeconds, MAX_SEGMENT_LABEL_BYTES, NaifId};

/// One SPK segment summary.
#[derive(Debug, PartialEq, Clone)]
pub struct Summary {
    /// Ephemeris time of the first covered instant.
    pub start_et: EphemerisSeconds,
    /// Ephemeris time of the last covered instant.
    pub stop_et: EphemerisSeconds,
    /// Body the segment describes (negative for spacecraft).
    pub target: NaifId,
    /// Body the states are expressed relative to.
    pub center: NaifId,
    /// NAIF frame code of the inertial frame.
    pub frame_id: NaifId,
    /// SPK data type (9 for this writer).
    pub data_type: i32,
    /// First word address of the segment data, 1-based.
    pub initial_addr: i32,
    /// Last word address of the segment data, 1-based.
    pub final_addr: i32,
}

impl Summary {
    /// Encode the summary into its five-word on-disk form.
    pub fn encode(&self) -> [u8; 40] {
        let mut bytes = [0u8; 40];
        bytes[0..8].copy_from_slice(&self.start_et.to_le_bytes());
        bytes[8..16].copy_from_slice(&self.stop_et.to_le_bytes());
        bytes[16..20].copy_from_slice(&self.target.to_le_bytes());
        bytes[20..24].copy_from_slice(&self.center.to_le_bytes());
        bytes[24..28].copy_from_slice(&self.frame_id.to_le_bytes());
        bytes[28..32].copy_from_slice(&self.data_type.to_le_bytes());
        bytes[32..36].copy_from_slice(&self.initial_addr.to_le_bytes());
        bytes[36..40].copy_from_slice(&self.final_addr.to_le_bytes());
        bytes
    }

    pub fn parse(input: &[u8]) -> IResult<&[u8], Self> {
        let (input, start_et) = le_f64(input)?;
        let (input, stop_et) = le_f64(input)?;
        let (input, target) = le_i32(input)?;
        let (input, center) = le_i32(input)?;
        let (input, frame_id) = le_i32(input)?;
        let (input, data_type) = le_i32(input)?;
        let (input, initial_addr) = le_i32(input)?;
        let (input, final_addr) = le_i32(input)?;
        Ok((
            input,
            Summary {
                start_et,
                stop_et,
                target,
                center,
                frame_id,
                data_type,
                initial_addr,
                final_addr,
            },
        ))
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let start = Epoch::from_et_seconds(self.start_et);
        let stop = Epoch::from_et_seconds(self.stop_et);
        let fields = [
            ("coverage", format!("{start} .. {stop}")),
            ("target", self.target.to_string()),
            ("center", self.center.to_string()),
            ("frame", self.frame_id.to_string()),
            ("data type", self.data_type.to_string()),
            (
                "addresses",
                format!("{}..{}", self.initial_addr, self.final_addr),
            ),
        ];
        let label_width = fields.iter().map(|(k, _)| k.len()).max().unwrap_or(10);
        for (label, value) in fields {
            writeln!(f, "{label:<label_width$} : {value}")?;
        }
        Ok(())
    }
}

/// Encode the summary record of a single-segment kernel: three control
/// doubles (no next, no previous, one summary) followed by the summary.
pub fn encode_summary_record(summary: &Summary) -> [u8; DAF_RECORD_SIZE] {
    let mut record = [0u8; DAF_RECORD_SIZE];
    record[0..8].copy_from_slice(&0.0_f64.to_le_bytes());
    record[8..16].copy_from_slice(&0.0_f64.to_le_bytes());
    record[16..24].copy_from_slice(&1.0_f64.to_le_bytes());
    record[24..64].copy_from_slice(&summary.encode());
    record
}

/// Parse a summary record: returns the summary count and the first summary.
pub fn parse_summary_record(input: &[u8]) -> IResult<&[u8], (f64, Summary)> {
    let (input, _next) = le_f64(input)?;
    let (input, _prev) = le_f64(input)?;
    let (input, nsum) = le_f64(input)?;
    let (input, summary) = Summary::parse(input)?;
    Ok((input, (nsum, summary)))
}

/// Encode the name record holding one space-padded segment label.
pub fn encode_name_record(label: &str) -> [u8; DAF_RECORD_SIZE] {
    let mut record = [0u8; DAF_RECORD_SIZE];
    record[0..MAX_SEGMENT_LABEL_BYTES].fill(b' ');
    record[0..label.len()].copy_from_slice(label.as_bytes());
    record
}

/// Parse the first segment label out of a name record.
pub fn parse_name_record(input: &[u8]) -> IResult<&[u8], String> {
    let (input, label) = take(MAX_SEGMENT_LABEL_BYTES)(input)?;
    Ok((input, String::from_utf8_lossy(label).trim_end().to_string()))
}
