//! # Mission catalog composition and emission
//!
//! The join point of the pipeline: once every kernel has been verified, this
//! module derives the mission-wide aggregate values and emits the catalog
//! document set the external viewer loads.
//!
//! Modules
//! -----------------
//! * [`documents`](crate::catalog::documents) – Typed models of the catalog
//!   schema (manifest, spacecraft entries, kernel list).
//! * [`palette`](crate::catalog::palette) – Deterministic per-index coloring.
//! * [`session`](crate::catalog::session) – The scripted viewer session.
//!
//! Derived values
//! -----------------
//! * **Mission start** — minimum of all satellites' `epoch0`, calendar form.
//! * **Per-satellite end** — `epoch0 + times[last]` as a UTC instant.
//! * **Duration label** — coarse calendar delta
//!   `|Δyears|·365 + |Δmonths|·30 + |Δdays|`, at least 1 day; display only.
//! * **Colors** — pure function of batch size and index.
//! * **Center name** — resolved once through the body registry; an unknown
//!   identifier short-circuits composition before any document is written.
//!
//! Composition is all-or-nothing: every document is serialized in memory
//! first, then written, so a resolution failure never leaves a partial
//! catalog behind.

pub mod documents;
pub mod palette;
pub mod session;

use camino::{Utf8Path, Utf8PathBuf};
use hifitime::Epoch;
use log::info;

use crate::cosmoforge_errors::CosmoforgeError;
use crate::naif_ids;
use crate::time::TimeConverter;
use crate::trajectories::TrajectoryBatch;

use documents::{
    LabelStyle, MissionManifest, SpacecraftCatalog, SpacecraftEntry, SpiceKernelManifest,
    TrajectoryDescriptor, TrajectoryPlot,
};
use session::SessionScript;

/// Schema version written into every catalog document.
const CATALOG_VERSION: &str = "1.0";

/// Plot styling shared by every generated entry.
const PLOT_LINE_WIDTH: u32 = 1;
const PLOT_SAMPLE_COUNT: u32 = 1000;
const PLOT_LEAD: &str = "0 d";
const PLOT_FADE: u32 = 1;

/// Caller-side description of one mission run.
#[derive(Debug, Clone, PartialEq)]
pub struct MissionSpec {
    /// Mission display name, also the basis of the document file names.
    pub name: String,
    /// Mission version string shown in the manifest.
    pub version: String,
    /// Collaborator-managed support kernels referenced by the manifest.
    pub support_kernels: SupportKernels,
}

/// File names of the generic support kernels the mission depends on; the
/// collaborator owning the kernel tree locates and loads them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SupportKernels {
    /// Planetary ephemeris kernel, if the mission needs planetary alignment.
    pub planetary_ephemeris: Option<String>,
    /// Planetary orientation/constants kernel.
    pub planetary_constants: Option<String>,
}

/// Immutable per-satellite time snapshot handed to the composer.
///
/// Instants are carried as UTC epochs derived from `epoch0 + offset`, never
/// recovered from the ephemeris axis; the catalog timestamps must land on
/// the same calendar day as the input reference instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SatTimeRange {
    /// The satellite's `epoch0`.
    pub start: Epoch,
    /// The last sample instant (`epoch0 + times[last]`).
    pub end: Epoch,
}

/// The composed mission catalog, ready for emission.
#[derive(Debug, Clone, PartialEq)]
pub struct MissionCatalog {
    pub manifest: MissionManifest,
    pub spacecraft: SpacecraftCatalog,
    pub kernels: SpiceKernelManifest,
    pub session: SessionScript,
    slug: String,
}

impl MissionCatalog {
    pub fn manifest_filename(&self) -> String {
        format!("{}.json", self.slug)
    }

    pub fn spacecraft_filename(&self) -> String {
        format!("spacecraft_{}.json", self.slug)
    }

    pub fn kernels_filename(&self) -> String {
        format!("spice_{}.json", self.slug)
    }

    pub fn session_filename(&self) -> String {
        format!("session_{}.py", self.slug)
    }

    /// Serialize and write the four documents into `out_dir`.
    ///
    /// Return
    /// ----------
    /// * The written file paths, manifest first.
    pub fn emit(&self, out_dir: &Utf8Path) -> Result<Vec<Utf8PathBuf>, CosmoforgeError> {
        // serialize everything before touching the directory
        let rendered = [
            (self.manifest_filename(), serde_json::to_string_pretty(&self.manifest)?),
            (
                self.spacecraft_filename(),
                serde_json::to_string_pretty(&self.spacecraft)?,
            ),
            (self.kernels_filename(), serde_json::to_string_pretty(&self.kernels)?),
            (self.session_filename(), self.session.render()),
        ];

        let mut written = Vec::with_capacity(rendered.len());
        for (filename, text) in rendered {
            let path = out_dir.join(&filename);
            std::fs::write(path.as_std_path(), text)?;
            written.push(path);
        }
        info!("emitted {} catalog documents into {out_dir}", written.len());
        Ok(written)
    }
}

/// Derive the mission catalog from the validated batch.
///
/// Arguments
/// -----------------
/// * `mission`: Mission name, version, and support kernel references.
/// * `batch`: The validated trajectory batch, in input order.
/// * `ranges`: Per-satellite time snapshots, aligned with the batch.
/// * `kernel_filenames`: Verified kernel file names, aligned with the batch.
/// * `lsk_filename`: File name of the leap-second kernel of the run.
/// * `tc`: Time converter used for the catalog timestamp formatting.
///
/// Return
/// ----------
/// * The composed catalog, or [`CosmoforgeError::UnknownBody`] if the shared
///   center identifier cannot be resolved (no placeholder names are ever
///   emitted).
pub fn compose(
    mission: &MissionSpec,
    batch: &TrajectoryBatch,
    ranges: &[SatTimeRange],
    kernel_filenames: &[String],
    lsk_filename: &str,
    tc: &TimeConverter,
) -> Result<MissionCatalog, CosmoforgeError> {
    debug_assert_eq!(batch.len(), ranges.len());
    debug_assert_eq!(batch.len(), kernel_filenames.len());

    let samples = batch.samples();
    let center_name = naif_ids::body_name(samples[0].center_id)?.to_string();
    let colors = palette::sample_palette(samples.len());

    let mut mission_start_epoch = ranges[0].start;
    for range in &ranges[1..] {
        if range.start < mission_start_epoch {
            mission_start_epoch = range.start;
        }
    }
    let mission_start = tc.to_calendar_string(mission_start_epoch);

    let items = samples
        .iter()
        .zip(ranges)
        .zip(&colors)
        .map(|((sample, range), color)| {
            let duration_days =
                coarse_duration_days(tc.to_gregorian_date(range.start), tc.to_gregorian_date(range.end));
            SpacecraftEntry {
                class: "spacecraft".to_string(),
                name: sample.name.clone(),
                start_time: tc.to_calendar_string(range.start),
                end_time: tc.to_calendar_string(range.end),
                center: center_name.clone(),
                trajectory: TrajectoryDescriptor {
                    kind: "Spice".to_string(),
                    target: sample.id.to_string(),
                    center: center_name.clone(),
                    frame: sample.reference_frame.clone(),
                },
                label: LabelStyle { color: *color },
                trajectory_plot: TrajectoryPlot {
                    color: *color,
                    line_width: PLOT_LINE_WIDTH,
                    duration: format!("{duration_days} d"),
                    lead: PLOT_LEAD.to_string(),
                    sample_count: PLOT_SAMPLE_COUNT,
                    fade: PLOT_FADE,
                },
            }
        })
        .collect::<Vec<_>>();

    let slug = mission_slug(&mission.name);
    let mut spice_kernels = vec![lsk_filename.to_string()];
    if let Some(spk) = &mission.support_kernels.planetary_ephemeris {
        spice_kernels.push(spk.clone());
    }
    if let Some(pck) = &mission.support_kernels.planetary_constants {
        spice_kernels.push(pck.clone());
    }
    spice_kernels.extend(kernel_filenames.iter().cloned());

    let satellite_names: Vec<String> = samples.iter().map(|s| s.name.clone()).collect();
    let catalog = MissionCatalog {
        manifest: MissionManifest {
            version: CATALOG_VERSION.to_string(),
            name: mission.name.clone(),
            require: vec![
                format!("spice_{slug}.json"),
                format!("spacecraft_{slug}.json"),
            ],
        },
        spacecraft: SpacecraftCatalog {
            version: CATALOG_VERSION.to_string(),
            name: format!("{} spacecraft", mission.name),
            items,
        },
        kernels: SpiceKernelManifest {
            version: mission.version.clone(),
            name: mission.name.clone(),
            spice_kernels,
        },
        session: SessionScript::build(&mission_start, &satellite_names, &center_name),
        slug,
    };
    Ok(catalog)
}

/// Coarse calendar delta used only for the catalog duration label.
///
/// `|Δyears|·365 + |Δmonths|·30 + |Δdays|`, never below one day.
pub fn coarse_duration_days(start: (i32, u8, u8), end: (i32, u8, u8)) -> i64 {
    let days = (end.0 as i64 - start.0 as i64).abs() * 365
        + (end.1 as i64 - start.1 as i64).abs() * 30
        + (end.2 as i64 - start.2 as i64).abs();
    days.max(1)
}

/// Lowercase file-name slug of the mission name.
fn mission_slug(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}
