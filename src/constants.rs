//! # Constants and type definitions for cosmoforge
//!
//! This module centralizes the **unit type aliases**, the **DAF/SPK layout
//! constants**, and the **deterministic output naming** used throughout the
//! crate.
//!
//! ## Overview
//!
//! - Time and distance type aliases shared by the pipeline stages
//! - Structural constants of the DAF container (record size, summary layout)
//! - SPK segment constants (data type, interpolation degree, directory stride)
//! - Per-index kernel file naming

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Distance in kilometers
pub type Kilometer = f64;
/// Velocity in kilometers per second
pub type KilometerPerSecond = f64;
/// Ephemeris time, TDB-like seconds past J2000 (the SPK time axis)
pub type EphemerisSeconds = f64;
/// NAIF integer body identifier (negative for spacecraft)
pub type NaifId = i32;

// -------------------------------------------------------------------------------------------------
// Time constants
// -------------------------------------------------------------------------------------------------

/// Tolerance used when comparing ephemeris times read back from a kernel
pub const ET_TOLERANCE: f64 = 1e-6;

// -------------------------------------------------------------------------------------------------
// DAF container layout
// -------------------------------------------------------------------------------------------------

/// Size of one DAF physical record in bytes
pub const DAF_RECORD_SIZE: usize = 1024;

/// Number of double-precision words per DAF record
pub const DAF_WORDS_PER_RECORD: usize = 128;

/// Number of double-precision components per SPK segment summary (ND)
pub const DAF_ND: i32 = 2;

/// Number of integer components per SPK segment summary (NI)
pub const DAF_NI: i32 = 6;

/// DAF identification word of an SPK kernel
pub const DAF_SPK_IDWORD: &str = "DAF/SPK";

/// Binary platform tag written into the file record
pub const DAF_BINARY_FORMAT: &str = "LTL-IEEE";

/// NAIF FTP transfer-integrity sentinel (28 bytes, fixed content)
pub const DAF_FTP_SENTINEL: &[u8; 28] = b"FTPSTR:\r:\n:\r\n:\r\x00:\x81:\x10\xce:ENDFTP";

/// Maximum byte length of a segment label, `8 * (ND + (NI + 1) / 2)`
pub const MAX_SEGMENT_LABEL_BYTES: usize = 40;

// -------------------------------------------------------------------------------------------------
// SPK segment constants
// -------------------------------------------------------------------------------------------------

/// SPK data type 9: Lagrange interpolation over unequally spaced epochs
pub const SPK_TYPE_LAGRANGE_UNEQUAL: i32 = 9;

/// Interpolation degree written into every segment (piecewise linear states)
pub const INTERPOLATION_DEGREE: usize = 1;

/// One directory epoch is stored for every `EPOCH_DIRECTORY_INTERVAL` epochs
pub const EPOCH_DIRECTORY_INTERVAL: usize = 100;

/// Minimum number of samples required for state interpolation
pub const MIN_TRAJECTORY_SAMPLES: usize = 2;

// -------------------------------------------------------------------------------------------------
// Output naming
// -------------------------------------------------------------------------------------------------

/// File extension of a binary SPK kernel
pub const KERNEL_EXTENSION: &str = "bsp";

/// Deterministic kernel file name for the satellite at `index` in the batch.
///
/// Concurrent writers rely on this scheme for distinct filenames; no other
/// locking is used around the shared output directory.
pub fn kernel_filename(index: usize) -> String {
    format!("sat{index}_traj.{KERNEL_EXTENSION}")
}
