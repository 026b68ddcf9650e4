//! # Binary SPK kernel writing and read-back verification
//!
//! This module turns one satellite's `(ephemeris time, position, velocity)`
//! series into a single-segment DAF/SPK kernel file and immediately proves
//! the written artifact self-consistent by reading it back.
//!
//! ## File layout
//!
//! 1. **File record** — [`daf_header::DafHeader`], structural metadata.
//! 2. **Summary record** — one [`summary_record::Summary`] keyed by
//!    `(target, center, frame)` and spanning the covered ephemeris interval.
//! 3. **Name record** — the 40-byte segment label.
//! 4. **Element records** — the type 9 data of [`segment::Type9Segment`],
//!    zero-padded to the record boundary.
//!
//! ## State machine
//!
//! Every writer walks `Empty → Opened → Written → Verified → Closed`; any
//! error moves it to `Failed`, which removes the partial file so a catalog
//! can never reference a half-written kernel. Files are never overwritten in
//! place: creation fails if the target already exists, and a writer that
//! never created its file removes nothing on failure.
//!
//! ## Verification pass
//!
//! [`SpkKernel::open`] reparses the header, summary, label, and segment data
//! with the same decoders external tooling would use, and
//! [`SpkWriter::verify`] compares coverage (within [`ET_TOLERANCE`]),
//! identifiers, data type, degree, and epoch count against the inputs. A
//! mismatch is a [`CosmoforgeError::Verification`]: it indicates an encoding
//! defect, is never retried, and aborts the run.

pub mod daf_header;
pub mod segment;
pub mod summary_record;

use std::fs::OpenOptions;
use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use log::debug;

use crate::constants::{
    DAF_ND, DAF_NI, DAF_RECORD_SIZE, DAF_SPK_IDWORD, DAF_WORDS_PER_RECORD, EphemerisSeconds,
    ET_TOLERANCE, INTERPOLATION_DEGREE, SPK_TYPE_LAGRANGE_UNEQUAL,
};
use crate::cosmoforge_errors::CosmoforgeError;
use crate::naif_ids;
use crate::trajectories::TrajectorySample;

use daf_header::DafHeader;
use segment::Type9Segment;
use summary_record::{
    encode_name_record, encode_summary_record, parse_name_record, parse_summary_record, Summary,
};

/// Lifecycle of one kernel file during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelState {
    Empty,
    Opened,
    Written,
    Verified,
    Closed,
    Failed,
}

/// Result of a successful write-and-verify: the closed kernel on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct KernelHandle {
    pub path: Utf8PathBuf,
    pub summary: Summary,
    pub segment_label: String,
}

/// Writer owning the `Empty → … → Closed` state machine of one kernel file.
#[derive(Debug)]
pub struct SpkWriter {
    path: Utf8PathBuf,
    state: KernelState,
    summary: Option<Summary>,
    segment_label: Option<String>,
}

impl SpkWriter {
    /// Start the lifecycle of the kernel at `path`. The file itself is
    /// created with `create_new` on the first write, so an existing kernel is
    /// never overwritten in place.
    pub fn create(path: &Utf8Path) -> Result<Self, CosmoforgeError> {
        Ok(SpkWriter {
            path: path.to_owned(),
            state: KernelState::Empty,
            summary: None,
            segment_label: None,
        })
    }

    pub fn state(&self) -> KernelState {
        self.state
    }

    /// Encode and write the single type 9 segment.
    ///
    /// Arguments
    /// -----------------
    /// * `sample`: The satellite's validated trajectory.
    /// * `ets`: Strictly increasing ephemeris times, one per state row.
    /// * `frame_id`: NAIF frame code of `sample.reference_frame`.
    ///
    /// Return
    /// ----------
    /// * `Ok(())` with the writer in `Written`, or an I/O error with the
    ///   partial file removed and the writer in `Failed`.
    pub fn write_segment(
        &mut self,
        sample: &TrajectorySample,
        ets: &[EphemerisSeconds],
        frame_id: i32,
    ) -> Result<(), CosmoforgeError> {
        let segment = Type9Segment::from_sample(sample, ets);
        let data_words = segment.word_count();
        let initial_addr = (3 * DAF_WORDS_PER_RECORD + 1) as i32;
        let final_addr = initial_addr + data_words as i32 - 1;

        let summary = Summary {
            start_et: ets[0],
            stop_et: ets[ets.len() - 1],
            target: sample.id,
            center: sample.center_id,
            frame_id,
            data_type: SPK_TYPE_LAGRANGE_UNEQUAL,
            initial_addr,
            final_addr,
        };
        let header = DafHeader::single_segment(
            self.path.file_name().unwrap_or("spk kernel"),
            final_addr + 1,
        );

        let mut buffer = Vec::with_capacity(4 * DAF_RECORD_SIZE + data_words * 8);
        buffer.extend_from_slice(&header.encode());
        buffer.extend_from_slice(&encode_summary_record(&summary));
        buffer.extend_from_slice(&encode_name_record(&sample.segment_label));
        segment.encode(&mut buffer);
        // zero-pad the last element record to the physical boundary
        let remainder = buffer.len() % DAF_RECORD_SIZE;
        if remainder != 0 {
            buffer.resize(buffer.len() + DAF_RECORD_SIZE - remainder, 0);
        }

        match self.write_file(&buffer) {
            Ok(()) => {
                self.state = KernelState::Written;
                self.summary = Some(summary);
                self.segment_label = Some(sample.segment_label.clone());
                debug!(
                    "wrote {} ({} states, {} bytes)",
                    self.path,
                    ets.len(),
                    buffer.len()
                );
                Ok(())
            }
            Err(e) => {
                self.fail();
                Err(CosmoforgeError::Io(e))
            }
        }
    }

    fn write_file(&mut self, buffer: &[u8]) -> Result<(), std::io::Error> {
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(self.path.as_std_path())?;
        self.state = KernelState::Opened;
        file.write_all(buffer)?;
        file.sync_all()
    }

    /// Reopen the written file and compare it against the inputs.
    ///
    /// Return
    /// ----------
    /// * `Ok(())` with the writer in `Verified`, or
    ///   [`CosmoforgeError::Verification`] with the defective file removed.
    pub fn verify(
        &mut self,
        sample: &TrajectorySample,
        ets: &[EphemerisSeconds],
        frame_id: i32,
    ) -> Result<(), CosmoforgeError> {
        debug_assert_eq!(self.state, KernelState::Written);
        let path = self.path.clone();
        let outcome = SpkKernel::open(&path)
            .and_then(|kernel| kernel.check_against(&path, sample, ets, frame_id));
        match outcome {
            Ok(()) => {
                self.state = KernelState::Verified;
                Ok(())
            }
            Err(e) => {
                self.fail();
                Err(e)
            }
        }
    }

    /// Finish the lifecycle, handing back the closed kernel.
    pub fn close(mut self) -> Result<KernelHandle, CosmoforgeError> {
        debug_assert_eq!(self.state, KernelState::Verified);
        self.state = KernelState::Closed;
        Ok(KernelHandle {
            path: self.path.clone(),
            summary: self.summary.take().expect("verified writer holds a summary"),
            segment_label: self
                .segment_label
                .take()
                .expect("verified writer holds a label"),
        })
    }

    /// Failure transition: remove the partial file, release state.
    ///
    /// Only a file this writer actually created is removed. A writer that
    /// never reached `Opened` (the `create_new` open itself failed, e.g.
    /// because the path was already occupied) must leave the existing file
    /// untouched.
    fn fail(&mut self) {
        if matches!(self.state, KernelState::Opened | KernelState::Written) {
            let _ = std::fs::remove_file(self.path.as_std_path());
        }
        self.state = KernelState::Failed;
        self.summary = None;
        self.segment_label = None;
    }
}

/// Write, verify, and close one kernel in a single call.
///
/// Arguments
/// -----------------
/// * `sample`: The satellite's validated trajectory.
/// * `ets`: Ephemeris times aligned with the sample rows.
/// * `path`: Target file location (must not exist).
///
/// Return
/// ----------
/// * The closed [`KernelHandle`], or the first error; on any error no file
///   remains at `path`.
pub fn write_kernel(
    sample: &TrajectorySample,
    ets: &[EphemerisSeconds],
    path: &Utf8Path,
) -> Result<KernelHandle, CosmoforgeError> {
    let frame_id = naif_ids::frame_id(&sample.reference_frame)?;
    let mut writer = SpkWriter::create(path)?;
    writer.write_segment(sample, ets, frame_id)?;
    writer.verify(sample, ets, frame_id)?;
    writer.close()
}

/// A parsed, read-back view of a written kernel.
#[derive(Debug, Clone, PartialEq)]
pub struct SpkKernel {
    pub header: DafHeader,
    pub summary: Summary,
    pub segment_label: String,
    pub segment: Type9Segment,
}

impl SpkKernel {
    /// Open and fully decode a single-segment SPK kernel.
    ///
    /// Arguments
    /// -----------------
    /// * `path`: Location of the kernel file.
    ///
    /// Return
    /// ----------
    /// * The decoded kernel, or [`CosmoforgeError::Verification`] describing
    ///   the first structural defect encountered.
    pub fn open(path: &Utf8Path) -> Result<Self, CosmoforgeError> {
        let bad = |reason: String| CosmoforgeError::Verification {
            path: path.to_string(),
            reason,
        };

        let bytes = std::fs::read(path.as_std_path())?;
        if bytes.len() < 4 * DAF_RECORD_SIZE {
            return Err(bad(format!(
                "file is {} bytes, smaller than the minimal 4-record kernel",
                bytes.len()
            )));
        }

        let (_, header) = DafHeader::parse(&bytes)
            .map_err(|_| bad("unable to decode the DAF file record".to_string()))?;
        if header.idword != DAF_SPK_IDWORD {
            return Err(bad(format!("id word is `{}`, expected `DAF/SPK`", header.idword)));
        }
        if header.nd != DAF_ND || header.ni != DAF_NI {
            return Err(bad(format!(
                "summary layout is ND={} NI={}, expected ND={DAF_ND} NI={DAF_NI}",
                header.nd, header.ni
            )));
        }

        let summary_offset = (header.fward as usize - 1) * DAF_RECORD_SIZE;
        let (_, (nsum, summary)) = parse_summary_record(&bytes[summary_offset..])
            .map_err(|_| bad("unable to decode the summary record".to_string()))?;
        if nsum != 1.0 {
            return Err(bad(format!("kernel holds {nsum} segments, expected exactly 1")));
        }

        let name_offset = summary_offset + DAF_RECORD_SIZE;
        let (_, segment_label) = parse_name_record(&bytes[name_offset..])
            .map_err(|_| bad("unable to decode the name record".to_string()))?;

        let data_start = (summary.initial_addr as usize - 1) * 8;
        let data_end = summary.final_addr as usize * 8;
        if data_end > bytes.len() || data_start >= data_end {
            return Err(bad(format!(
                "segment addresses {}..{} fall outside the file",
                summary.initial_addr, summary.final_addr
            )));
        }
        let segment = Type9Segment::decode(&bytes[data_start..data_end]).map_err(bad)?;

        Ok(SpkKernel {
            header,
            summary,
            segment_label,
            segment,
        })
    }

    /// Compare the decoded kernel against the write inputs.
    fn check_against(
        &self,
        path: &Utf8Path,
        sample: &TrajectorySample,
        ets: &[EphemerisSeconds],
        frame_id: i32,
    ) -> Result<(), CosmoforgeError> {
        let mismatch = |reason: String| CosmoforgeError::Verification {
            path: path.to_string(),
            reason,
        };

        if self.summary.target != sample.id
            || self.summary.center != sample.center_id
            || self.summary.frame_id != frame_id
        {
            return Err(mismatch(format!(
                "stored identifiers (target {}, center {}, frame {}) do not match inputs (target {}, center {}, frame {})",
                self.summary.target,
                self.summary.center,
                self.summary.frame_id,
                sample.id,
                sample.center_id,
                frame_id
            )));
        }
        if self.summary.data_type != SPK_TYPE_LAGRANGE_UNEQUAL {
            return Err(mismatch(format!(
                "stored data type {} is not type {SPK_TYPE_LAGRANGE_UNEQUAL}",
                self.summary.data_type
            )));
        }
        if self.segment_label != sample.segment_label {
            return Err(mismatch(format!(
                "stored segment label `{}` does not match `{}`",
                self.segment_label, sample.segment_label
            )));
        }

        let (start, stop) = (ets[0], ets[ets.len() - 1]);
        if (self.summary.start_et - start).abs() > ET_TOLERANCE
            || (self.summary.stop_et - stop).abs() > ET_TOLERANCE
        {
            return Err(mismatch(format!(
                "stored coverage [{}, {}] does not match [{start}, {stop}]",
                self.summary.start_et, self.summary.stop_et
            )));
        }

        if self.segment.epochs.len() != ets.len() {
            return Err(mismatch(format!(
                "segment holds {} epochs, expected {}",
                self.segment.epochs.len(),
                ets.len()
            )));
        }
        if self.segment.degree != INTERPOLATION_DEGREE {
            return Err(mismatch(format!(
                "stored degree {} is not {INTERPOLATION_DEGREE}",
                self.segment.degree
            )));
        }
        let first = self.segment.epochs[0];
        let last = self.segment.epochs[self.segment.epochs.len() - 1];
        if (first - start).abs() > ET_TOLERANCE || (last - stop).abs() > ET_TOLERANCE {
            return Err(mismatch(format!(
                "segment epochs span [{first}, {last}], summary declares [{start}, {stop}]"
            )));
        }
        Ok(())
    }
}
