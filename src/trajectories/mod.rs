//! # Trajectories: ingestion and validation of discrete state samples
//!
//! High-level facilities to **ingest** and **validate** spacecraft trajectory
//! samples before any expensive binary write. The central types are
//! [`TrajectorySample`], one satellite's time-tagged state series, and
//! [`TrajectoryBatch`], the validated, immutable batch a pipeline run
//! operates on.
//!
//! Modules
//! -----------------
//! * [`schema`](crate::trajectories::schema) – Fixed-schema, field-by-field
//!   checks over loosely structured JSON records, producing typed samples.
//! * [`validate`](crate::trajectories::validate) – Batch-level rules
//!   (sample counts, uniqueness, label length, shared center/frame) and the
//!   time-ordering gate used by the pipeline.
//!
//! Data Model
//! -----------------
//! * `times` are seconds relative to the per-satellite calendar `epoch0` and
//!   MUST be strictly increasing (checked by the pipeline, not here).
//! * `positions` are kilometers, `velocities` kilometers per second, both
//!   row-aligned with `times` in the inertial `reference_frame`.
//! * All samples of one batch share `center_id` and `reference_frame`.
//!
//! Ingestion Sources
//! -----------------
//! * **JSON** — [`TrajectoryBatch::from_json_str`]: raw record array, schema
//!   checked field by field, caller data never mutated.
//! * **In-memory** — [`TrajectoryBatch::from_samples`]: already-typed
//!   samples, still subject to every batch-level rule.

pub mod schema;
pub mod validate;

use nalgebra::Vector3;

use crate::constants::{Kilometer, KilometerPerSecond, NaifId};
use crate::cosmoforge_errors::CosmoforgeError;
use crate::time::CalendarEpoch;

/// One satellite's discrete trajectory: a calendar reference instant plus
/// row-aligned time offsets, positions, and velocities.
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectorySample {
    /// Display name, unique within a mission.
    pub name: String,
    /// NAIF body identifier, negative for spacecraft, unique within a mission.
    pub id: NaifId,
    /// Label of the written SPK segment, at most 40 bytes.
    pub segment_label: String,
    /// Calendar instant of `times[0] == 0`.
    pub epoch0: CalendarEpoch,
    /// Strictly increasing offsets from `epoch0`, in seconds.
    pub times: Vec<f64>,
    /// Position vectors, one per offset.
    pub positions: Vec<Vector3<Kilometer>>,
    /// Velocity vectors, one per offset.
    pub velocities: Vec<Vector3<KilometerPerSecond>>,
    /// Identifier of the body all states are expressed relative to.
    pub center_id: NaifId,
    /// Inertial frame name (e.g. `"J2000"`).
    pub reference_frame: String,
}

impl TrajectorySample {
    /// Number of discrete samples in the series.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

/// A validated, immutable batch of trajectory samples.
///
/// Construction runs every structural and batch-level rule; once built, the
/// batch is never mutated and every sample is safe to hand to the kernel
/// writer and catalog composer.
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryBatch {
    samples: Vec<TrajectorySample>,
}

impl TrajectoryBatch {
    /// Build a batch from a raw JSON array of satellite records.
    ///
    /// Every record is checked against the fixed schema (exact field set,
    /// types, shapes) before the batch-level rules run. The caller's input is
    /// never mutated; the returned batch owns freshly built samples.
    ///
    /// Arguments
    /// -----------------
    /// * `raw`: JSON text holding an array of satellite records.
    ///
    /// Return
    /// ----------
    /// * The validated batch, or the first schema/shape error with satellite
    ///   index and field context.
    pub fn from_json_str(raw: &str) -> Result<Self, CosmoforgeError> {
        let records: Vec<serde_json::Value> =
            serde_json::from_str(raw).map_err(|e| CosmoforgeError::Schema {
                index: 0,
                field: "batch".to_string(),
                reason: format!("input is not a JSON array of records: {e}"),
            })?;
        let samples = records
            .iter()
            .enumerate()
            .map(|(index, record)| schema::sample_from_value(index, record))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_samples(samples)
    }

    /// Build a batch from already-typed samples, applying the batch rules
    /// (per-sample shape, uniqueness, shared center/frame).
    pub fn from_samples(samples: Vec<TrajectorySample>) -> Result<Self, CosmoforgeError> {
        validate::check_batch(&samples)?;
        Ok(TrajectoryBatch { samples })
    }

    pub fn samples(&self) -> &[TrajectorySample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
