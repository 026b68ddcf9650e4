//! # Type 9 segment data layout
//!
//! An SPK type 9 segment stores discrete states for Lagrange interpolation
//! over unequally spaced epochs. The on-disk word layout is:
//!
//! ```text
//! state 1 .. state N        (6 words each: x, y, z, vx, vy, vz)
//! epoch 1 .. epoch N
//! epoch directory           (every 100th epoch, N / 100 entries)
//! polynomial degree         (1 word)
//! number of states          (1 word)
//! ```
//!
//! This writer always uses degree 1 (piecewise-linear state interpolation),
//! chosen for small files over smoothness; the layout is nevertheless the
//! standard type 9 form any SPICE reader understands.

use nom::{multi::count, number::complete::le_f64, IResult};

use crate::constants::{EphemerisSeconds, EPOCH_DIRECTORY_INTERVAL, INTERPOLATION_DEGREE};
use crate::trajectories::TrajectorySample;

/// Decoded type 9 segment data.
#[derive(Debug, Clone, PartialEq)]
pub struct Type9Segment {
    /// One six-component state per epoch.
    pub states: Vec<[f64; 6]>,
    /// Strictly increasing ephemeris times, one per state.
    pub epochs: Vec<EphemerisSeconds>,
    /// Interpolation degree stored in the trailer.
    pub degree: usize,
}

impl Type9Segment {
    /// Assemble the segment data from a sample and its ephemeris times.
    pub fn from_sample(sample: &TrajectorySample, ets: &[EphemerisSeconds]) -> Self {
        let states = sample
            .positions
            .iter()
            .zip(&sample.velocities)
            .map(|(p, v)| [p.x, p.y, p.z, v.x, v.y, v.z])
            .collect();
        Type9Segment {
            states,
            epochs: ets.to_vec(),
            degree: INTERPOLATION_DEGREE,
        }
    }

    /// Number of directory epochs for `n` states.
    fn directory_len(n: usize) -> usize {
        n / EPOCH_DIRECTORY_INTERVAL
    }

    /// Total segment size in double-precision words.
    pub fn word_count(&self) -> usize {
        let n = self.epochs.len();
        6 * n + n + Self::directory_len(n) + 2
    }

    /// Append the segment's on-disk form to `buf`.
    pub fn encode(&self, buf: &mut Vec<u8>) {
        for state in &self.states {
            for component in state {
                buf.extend_from_slice(&component.to_le_bytes());
            }
        }
        for epoch in &self.epochs {
            buf.extend_from_slice(&epoch.to_le_bytes());
        }
        for directory_epoch in self
            .epochs
            .iter()
            .skip(EPOCH_DIRECTORY_INTERVAL - 1)
            .step_by(EPOCH_DIRECTORY_INTERVAL)
        {
            buf.extend_from_slice(&directory_epoch.to_le_bytes());
        }
        buf.extend_from_slice(&(self.degree as f64).to_le_bytes());
        buf.extend_from_slice(&(self.epochs.len() as f64).to_le_bytes());
    }

    /// Decode a segment from the raw data words between the summary's
    /// initial and final addresses.
    ///
    /// The trailer is read first to learn the state count, then the body is
    /// parsed; a size mismatch between trailer and data area fails.
    pub fn decode(data: &[u8]) -> Result<Self, String> {
        if data.len() < 16 || data.len() % 8 != 0 {
            return Err(format!("segment data area of {} bytes is malformed", data.len()));
        }
        let trailer = &data[data.len() - 16..];
        let degree = f64::from_le_bytes(trailer[0..8].try_into().unwrap()) as usize;
        let n = f64::from_le_bytes(trailer[8..16].try_into().unwrap()) as usize;

        let expected_words = 6 * n + n + Self::directory_len(n) + 2;
        if data.len() != expected_words * 8 {
            return Err(format!(
                "trailer declares {n} states ({expected_words} words), data area holds {} words",
                data.len() / 8
            ));
        }

        let (rest, segment) = Self::parse_body(data, n, degree)
            .map_err(|_| "unable to decode segment body".to_string())?;
        debug_assert_eq!(rest.len(), 16);
        Ok(segment)
    }

    fn parse_body(input: &[u8], n: usize, degree: usize) -> IResult<&[u8], Type9Segment> {
        let (input, flat_states) = count(le_f64, 6 * n)(input)?;
        let (input, epochs) = count(le_f64, n)(input)?;
        let (input, _directory) = count(le_f64, Self::directory_len(n))(input)?;
        let states = flat_states
            .chunks_exact(6)
            .map(|c| [c[0], c[1], c[2], c[3], c[4], c[5]])
            .collect();
        Ok((
            input,
            Type9Segment {
                states,
                epochs,
                degree,
            },
        ))
    }
}
