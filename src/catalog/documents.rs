//! # Catalog document models
//!
//! Typed models of the structured documents the external viewer consumes.
//! The key names and nesting are a compatibility contract with the viewer's
//! catalog schema, not arbitrary; serde renames pin every field to its
//! on-disk spelling.

use serde::{Deserialize, Serialize};

/// Top-level mission manifest: the catalog files the viewer must load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionManifest {
    pub version: String,
    pub name: String,
    pub require: Vec<String>,
}

/// Kernel manifest: every SPICE kernel the mission needs, support kernels
/// first, then the generated trajectory kernels in batch order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpiceKernelManifest {
    pub version: String,
    pub name: String,
    pub spice_kernels: Vec<String>,
}

/// Spacecraft catalog: one entry per satellite, in batch order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpacecraftCatalog {
    pub version: String,
    pub name: String,
    pub items: Vec<SpacecraftEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpacecraftEntry {
    /// Object class tag; always `"spacecraft"` for generated entries.
    pub class: String,
    pub name: String,
    /// Calendar timestamps, `yyyy-mm-dd HH:MM:SS.sss UTC`.
    pub start_time: String,
    pub end_time: String,
    /// Resolved display name of the shared center body.
    pub center: String,
    pub trajectory: TrajectoryDescriptor,
    pub label: LabelStyle,
    pub trajectory_plot: TrajectoryPlot,
}

/// Kernel-backed trajectory reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryDescriptor {
    /// Always `"Spice"`: states come from the written kernels.
    #[serde(rename = "type")]
    pub kind: String,
    /// Stringified NAIF id of the satellite.
    pub target: String,
    pub center: String,
    /// Inertial frame name shared by the batch.
    pub frame: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelStyle {
    pub color: [f64; 3],
}

/// Plot styling of the trajectory trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrajectoryPlot {
    pub color: [f64; 3],
    pub line_width: u32,
    /// Coarse display label, e.g. `"90 d"`; never used numerically.
    pub duration: String,
    pub lead: String,
    pub sample_count: u32,
    pub fade: u32,
}

#[cfg(test)]
mod documents_test {
    use super::*;

    #[test]
    fn test_spacecraft_entry_field_spelling() {
        let entry = SpacecraftEntry {
            class: "spacecraft".to_string(),
            name: "sat-A".to_string(),
            start_time: "2026-03-01 00:00:00.000 UTC".to_string(),
            end_time: "2026-03-02 00:00:00.000 UTC".to_string(),
            center: "Earth".to_string(),
            trajectory: TrajectoryDescriptor {
                kind: "Spice".to_string(),
                target: "-10001".to_string(),
                center: "Earth".to_string(),
                frame: "J2000".to_string(),
            },
            label: LabelStyle {
                color: [0.267, 0.004, 0.329],
            },
            trajectory_plot: TrajectoryPlot {
                color: [0.267, 0.004, 0.329],
                line_width: 1,
                duration: "1 d".to_string(),
                lead: "0 d".to_string(),
                sample_count: 1000,
                fade: 1,
            },
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["startTime"], "2026-03-01 00:00:00.000 UTC");
        assert_eq!(json["trajectory"]["type"], "Spice");
        assert_eq!(json["trajectoryPlot"]["lineWidth"], 1);
        assert_eq!(json["trajectoryPlot"]["sampleCount"], 1000);
    }

    #[test]
    fn test_kernel_manifest_field_spelling() {
        let manifest = SpiceKernelManifest {
            version: "1.0".to_string(),
            name: "demo".to_string(),
            spice_kernels: vec!["naif0012.tls".to_string(), "sat0_traj.bsp".to_string()],
        };
        let json = serde_json::to_value(&manifest).unwrap();
        assert_eq!(json["spiceKernels"][0], "naif0012.tls");
    }
}
