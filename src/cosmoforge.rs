//! # Cosmoforge: environment and pipeline façade
//!
//! This module defines the [`Cosmoforge`] struct, the central façade that
//! wires together:
//!
//! 1. **Time reference data** — the collaborator-supplied leap-second kernel,
//!    opened lazily on first use and cached for the lifetime of the context.
//! 2. **Registries** — NAIF body names and frame codes
//!    ([`naif_ids`](crate::naif_ids)), loaded once per process.
//! 3. **The pipeline** — [`build_mission_package`](Cosmoforge::build_mission_package),
//!    the single entry point turning a validated batch into the on-disk
//!    mission package.
//!
//! The design emphasizes *lazy initialization* and *explicit paths*: the
//! leap-second kernel is parsed the first time a conversion is needed, and
//! no component reads or mutates the process working directory — the
//! mission directory manager hands in a writable target path.
//!
//! ## Typical usage
//!
//! ```rust,no_run
//! use camino::Utf8Path;
//! use cosmoforge::catalog::{MissionSpec, SupportKernels};
//! use cosmoforge::{Cosmoforge, TrajectoryBatch};
//!
//! # fn run(raw: &str) -> Result<(), cosmoforge::CosmoforgeError> {
//! let forge = Cosmoforge::new("kernels/lsk/naif0012.tls");
//! let batch = TrajectoryBatch::from_json_str(raw)?;
//! let mission = MissionSpec {
//!     name: "Demo Mission".to_string(),
//!     version: "1.0".to_string(),
//!     support_kernels: SupportKernels::default(),
//! };
//! let package = forge.build_mission_package(&mission, &batch, Utf8Path::new("out/demo"))?;
//! println!("{} kernels written", package.kernel_files.len());
//! # Ok(())
//! # }
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use once_cell::sync::OnceCell;

use crate::catalog::MissionSpec;
use crate::cosmoforge_errors::CosmoforgeError;
use crate::pipeline::{self, MissionPackage};
use crate::time::TimeConverter;
use crate::trajectories::TrajectoryBatch;

/// Shared context of one or more pipeline runs.
#[derive(Debug)]
pub struct Cosmoforge {
    lsk_path: Utf8PathBuf,
    time_converter: OnceCell<TimeConverter>,
}

impl Cosmoforge {
    /// Construct a new context around the collaborator-supplied leap-second
    /// kernel. The kernel is **not** opened yet; it is lazily parsed the
    /// first time [`get_time_converter`](Cosmoforge::get_time_converter) is
    /// called.
    pub fn new(lsk_path: impl Into<Utf8PathBuf>) -> Self {
        Cosmoforge {
            lsk_path: lsk_path.into(),
            time_converter: OnceCell::new(),
        }
    }

    /// Lazily parse and cache the time converter.
    ///
    /// Return
    /// ----------
    /// * The shared converter, or [`CosmoforgeError::TimeSystem`] if the
    ///   leap-second kernel is unavailable or malformed.
    pub fn get_time_converter(&self) -> Result<&TimeConverter, CosmoforgeError> {
        self.time_converter
            .get_or_try_init(|| TimeConverter::new(&self.lsk_path))
    }

    /// File name of the leap-second kernel, listed first in the kernel
    /// manifest of every composed catalog.
    pub fn lsk_filename(&self) -> &str {
        self.lsk_path.file_name().unwrap_or(self.lsk_path.as_str())
    }

    /// Run the staged pipeline for one mission.
    ///
    /// Arguments
    /// -----------------
    /// * `mission`: Mission name, version, and support kernel references.
    /// * `batch`: A validated, immutable trajectory batch.
    /// * `out_dir`: Writable mission directory owned by the caller.
    ///
    /// Return
    /// ----------
    /// * The written [`MissionPackage`], or the first error of the run; see
    ///   the [`pipeline`](crate::pipeline) module for the abort semantics of
    ///   each stage.
    pub fn build_mission_package(
        &self,
        mission: &MissionSpec,
        batch: &TrajectoryBatch,
        out_dir: &Utf8Path,
    ) -> Result<MissionPackage, CosmoforgeError> {
        pipeline::run(self, mission, batch, out_dir)
    }
}
