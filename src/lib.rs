//! # cosmoforge
//!
//! Converts discrete spacecraft trajectory samples into a self-consistent
//! on-disk mission package: one binary SPK ephemeris kernel per spacecraft
//! plus the catalog documents (mission manifest, spacecraft catalog, SPICE
//! kernel manifest) and a scripted session driving an external viewer.
//!
//! The pipeline is staged: structural validation, calendar-to-ephemeris time
//! conversion, parallel kernel writing with read-back verification, and
//! finally catalog composition once every kernel is verified. Every
//! generated kernel and catalog entry agree on body identifiers, time
//! windows, and reference frames by construction.
//!
//! Start at [`Cosmoforge`], the façade that owns the time reference data and
//! exposes [`Cosmoforge::build_mission_package`].

pub mod catalog;
pub mod constants;
pub mod cosmoforge;
pub mod cosmoforge_errors;
pub mod naif_ids;
pub mod pipeline;
pub mod spk;
pub mod time;
pub mod trajectories;

pub use catalog::{MissionSpec, SupportKernels};
pub use cosmoforge::Cosmoforge;
pub use cosmoforge_errors::CosmoforgeError;
pub use pipeline::MissionPackage;
pub use trajectories::{TrajectoryBatch, TrajectorySample};
