use approx::assert_relative_eq;
use camino::Utf8Path;

use cosmoforge::constants::SPK_TYPE_LAGRANGE_UNEQUAL;
use cosmoforge::cosmoforge_errors::CosmoforgeError;
use cosmoforge::spk::{self, SpkKernel, SpkWriter};
use cosmoforge::time::TimeConverter;

mod common;

fn ephemeris_times(sample: &cosmoforge::TrajectorySample, lsk_dir: &Utf8Path) -> Vec<f64> {
    let lsk = common::write_lsk(lsk_dir);
    let tc = TimeConverter::new(&lsk).unwrap();
    tc.to_ephemeris_times(&sample.epoch0, &sample.times).unwrap()
}

#[test]
fn test_write_then_read_back_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let dir = common::utf8_dir(&dir);
    let sample = common::make_sample("sat-A", -10001, (2026, 3, 1, 0, 0, 0.0), 120, 60.0);
    let ets = ephemeris_times(&sample, &dir);

    let path = dir.join("sat0_traj.bsp");
    let handle = spk::write_kernel(&sample, &ets, &path).unwrap();
    assert_eq!(handle.path, path);
    assert_eq!(handle.summary.target, -10001);

    let kernel = SpkKernel::open(&path).unwrap();
    assert_eq!(kernel.summary.target, sample.id);
    assert_eq!(kernel.summary.center, sample.center_id);
    assert_eq!(kernel.summary.frame_id, 1);
    assert_eq!(kernel.summary.data_type, SPK_TYPE_LAGRANGE_UNEQUAL);
    assert_eq!(kernel.segment_label, sample.segment_label);
    assert_eq!(kernel.segment.epochs.len(), sample.times.len());
    assert_relative_eq!(kernel.summary.start_et, ets[0], epsilon = 1e-9);
    assert_relative_eq!(kernel.summary.stop_et, ets[ets.len() - 1], epsilon = 1e-9);
    // state data survives bit-exactly
    assert_eq!(kernel.segment.states[0][0], sample.positions[0].x);
    assert_eq!(kernel.segment.states[7][4], sample.velocities[7].y);
}

#[test]
fn test_no_overwrite_of_existing_kernel() {
    let dir = tempfile::tempdir().unwrap();
    let dir = common::utf8_dir(&dir);
    let sample = common::make_sample("sat-A", -10001, (2026, 3, 1, 0, 0, 0.0), 10, 60.0);
    let ets = ephemeris_times(&sample, &dir);

    let path = dir.join("sat0_traj.bsp");
    spk::write_kernel(&sample, &ets, &path).unwrap();
    let before = std::fs::read(path.as_std_path()).unwrap();

    let err = spk::write_kernel(&sample, &ets, &path).unwrap_err();
    assert!(matches!(err, CosmoforgeError::Io(_)));
    // the existing kernel is untouched by the failed second writer
    assert_eq!(std::fs::read(path.as_std_path()).unwrap(), before);
}

#[test]
fn test_verification_mismatch_removes_file() {
    let dir = tempfile::tempdir().unwrap();
    let dir = common::utf8_dir(&dir);
    let sample = common::make_sample("sat-A", -10001, (2026, 3, 1, 0, 0, 0.0), 10, 60.0);
    let ets = ephemeris_times(&sample, &dir);

    let path = dir.join("sat0_traj.bsp");
    let mut writer = SpkWriter::create(&path).unwrap();
    writer.write_segment(&sample, &ets, 1).unwrap();

    // feed the verifier a shifted time series so the coverage cannot match
    let shifted: Vec<f64> = ets.iter().map(|t| t + 5.0).collect();
    let err = writer.verify(&sample, &shifted, 1).unwrap_err();
    assert!(matches!(err, CosmoforgeError::Verification { .. }));
    assert!(!path.as_std_path().exists());
}

#[test]
fn test_open_rejects_corrupted_kernel() {
    let dir = tempfile::tempdir().unwrap();
    let dir = common::utf8_dir(&dir);
    let sample = common::make_sample("sat-A", -10001, (2026, 3, 1, 0, 0, 0.0), 10, 60.0);
    let ets = ephemeris_times(&sample, &dir);

    let path = dir.join("sat0_traj.bsp");
    spk::write_kernel(&sample, &ets, &path).unwrap();

    // clobber the id word
    let mut bytes = std::fs::read(path.as_std_path()).unwrap();
    bytes[0..8].copy_from_slice(b"GARBAGE ");
    std::fs::write(path.as_std_path(), &bytes).unwrap();

    let err = SpkKernel::open(&path).unwrap_err();
    assert!(matches!(err, CosmoforgeError::Verification { .. }));
}

#[test]
fn test_directory_epochs_for_large_series() {
    let dir = tempfile::tempdir().unwrap();
    let dir = common::utf8_dir(&dir);
    let sample = common::make_sample("sat-A", -10001, (2026, 3, 1, 0, 0, 0.0), 250, 30.0);
    let ets = ephemeris_times(&sample, &dir);

    let path = dir.join("sat0_traj.bsp");
    spk::write_kernel(&sample, &ets, &path).unwrap();
    let kernel = SpkKernel::open(&path).unwrap();
    assert_eq!(kernel.segment.epochs.len(), 250);
    assert_relative_eq!(
        kernel.segment.epochs[249] - kernel.segment.epochs[0],
        249.0 * 30.0,
        epsilon = 1e-6
    );
}
