//! # Staged mission package pipeline
//!
//! Orchestrates one run: structural validation already happened when the
//! [`TrajectoryBatch`](crate::trajectories::TrajectoryBatch) was built, so
//! the stages here are:
//!
//! 1. **Time conversion** — every satellite's offsets are mapped onto the
//!    ephemeris axis and gated for strict monotonicity, before any file is
//!    created.
//! 2. **Frame resolution** — the shared reference frame is resolved once;
//!    an unmapped name fails before any write.
//! 3. **Kernel writing** — one kernel per satellite, written and verified in
//!    parallel; filenames come from the per-index naming scheme so writers
//!    never collide. The first fatal error aborts the run (in-flight sibling
//!    writes may finish; their kernels stay on disk).
//! 4. **Catalog composition** — the join point. Runs only after every kernel
//!    reached `Verified`, over an immutable snapshot of the derived values;
//!    a composition failure leaves the kernels on disk but writes no
//!    catalog document.
//!
//! No stage mutates ambient process state; every path is an explicit
//! parameter.

use camino::{Utf8Path, Utf8PathBuf};
use log::info;
use rayon::prelude::*;

use crate::catalog::{self, MissionSpec, SatTimeRange};
use crate::constants::kernel_filename;
use crate::cosmoforge::Cosmoforge;
use crate::cosmoforge_errors::CosmoforgeError;
use crate::naif_ids;
use crate::spk;
use crate::trajectories::{validate, TrajectoryBatch};

/// Everything one successful run leaves on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct MissionPackage {
    /// Verified kernel files, one per satellite, in batch order.
    pub kernel_files: Vec<Utf8PathBuf>,
    /// Catalog documents plus the session script, manifest first.
    pub catalog_files: Vec<Utf8PathBuf>,
}

/// Run the full pipeline for one mission.
pub(crate) fn run(
    forge: &Cosmoforge,
    mission: &MissionSpec,
    batch: &TrajectoryBatch,
    out_dir: &Utf8Path,
) -> Result<MissionPackage, CosmoforgeError> {
    info!(
        "building mission package `{}` for {} satellites into {out_dir}",
        mission.name,
        batch.len()
    );
    let tc = forge.get_time_converter()?;
    let samples = batch.samples();

    // stage 1: ephemeris times + monotonicity gate, before any file I/O
    let mut ranges = Vec::with_capacity(samples.len());
    let mut et_series = Vec::with_capacity(samples.len());
    for (index, sample) in samples.iter().enumerate() {
        validate::check_monotonic(index, &sample.times)?;
        let ets = tc.to_ephemeris_times(&sample.epoch0, &sample.times)?;
        ranges.push(SatTimeRange {
            start: tc.utc_epoch(&sample.epoch0)?,
            end: tc.epoch_at_offset(&sample.epoch0, sample.times[sample.times.len() - 1])?,
        });
        et_series.push(ets);
    }

    // stage 2: the shared frame must be known before any kernel exists
    naif_ids::frame_id(&samples[0].reference_frame)?;

    // stage 3: parallel kernel writing, joined by the fallible collect
    let handles: Vec<spk::KernelHandle> = (0..samples.len())
        .into_par_iter()
        .map(|index| {
            let path = out_dir.join(kernel_filename(index));
            spk::write_kernel(&samples[index], &et_series[index], &path)
        })
        .collect::<Result<Vec<_>, _>>()?;
    info!("verified {} kernels", handles.len());

    // stage 4: catalog composition over the immutable snapshot
    let kernel_names: Vec<String> = (0..samples.len()).map(kernel_filename).collect();
    let catalog = catalog::compose(
        mission,
        batch,
        &ranges,
        &kernel_names,
        forge.lsk_filename(),
        tc,
    )?;
    let catalog_files = catalog.emit(out_dir)?;

    Ok(MissionPackage {
        kernel_files: handles.into_iter().map(|h| h.path).collect(),
        catalog_files,
    })
}
