use cosmoforge::catalog::{self, SatTimeRange};
use cosmoforge::cosmoforge_errors::CosmoforgeError;
use cosmoforge::time::TimeConverter;
use cosmoforge::TrajectoryBatch;

mod common;

fn ranges_for(batch: &TrajectoryBatch, tc: &TimeConverter) -> Vec<SatTimeRange> {
    batch
        .samples()
        .iter()
        .map(|s| SatTimeRange {
            start: tc.utc_epoch(&s.epoch0).unwrap(),
            end: tc
                .epoch_at_offset(&s.epoch0, s.times[s.times.len() - 1])
                .unwrap(),
        })
        .collect()
}

#[test]
fn test_duration_label_for_quarter_year_arc() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = common::utf8_dir(&tmp);
    let tc = TimeConverter::new(&common::write_lsk(&dir)).unwrap();

    // 7 776 000 s = 90 days of offsets starting January 1st
    let mut sample = common::make_sample("sat-A", -10001, (2026, 1, 1, 0, 0, 0.0), 2, 1.0);
    sample.times = vec![0.0, 7_776_000.0];
    let batch = TrajectoryBatch::from_samples(vec![sample]).unwrap();

    let ranges = ranges_for(&batch, &tc);
    let catalog = catalog::compose(
        &common::mission_spec("Quarter"),
        &batch,
        &ranges,
        &["sat0_traj.bsp".to_string()],
        "naif0012.tls",
        &tc,
    )
    .unwrap();
    assert_eq!(catalog.spacecraft.items[0].trajectory_plot.duration, "90 d");
    assert_eq!(
        catalog.spacecraft.items[0].start_time,
        "2026-01-01 00:00:00.000 UTC"
    );
    assert_eq!(
        catalog.spacecraft.items[0].end_time,
        "2026-04-01 00:00:00.000 UTC"
    );
}

#[test]
fn test_duration_label_never_below_one_day() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = common::utf8_dir(&tmp);
    let tc = TimeConverter::new(&common::write_lsk(&dir)).unwrap();

    // a ten-minute arc within a single calendar day
    let batch = TrajectoryBatch::from_samples(vec![common::make_sample(
        "sat-A",
        -10001,
        (2026, 3, 15, 6, 0, 0.0),
        10,
        60.0,
    )])
    .unwrap();

    let ranges = ranges_for(&batch, &tc);
    let catalog = catalog::compose(
        &common::mission_spec("Short"),
        &batch,
        &ranges,
        &["sat0_traj.bsp".to_string()],
        "naif0012.tls",
        &tc,
    )
    .unwrap();
    assert_eq!(catalog.spacecraft.items[0].trajectory_plot.duration, "1 d");
}

#[test]
fn test_unknown_center_aborts_composition() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = common::utf8_dir(&tmp);
    let tc = TimeConverter::new(&common::write_lsk(&dir)).unwrap();

    let mut sample = common::make_sample("sat-A", -10001, (2026, 3, 1, 0, 0, 0.0), 10, 60.0);
    sample.center_id = 123_456;
    let batch = TrajectoryBatch::from_samples(vec![sample]).unwrap();

    let ranges = ranges_for(&batch, &tc);
    let err = catalog::compose(
        &common::mission_spec("Bad Center"),
        &batch,
        &ranges,
        &["sat0_traj.bsp".to_string()],
        "naif0012.tls",
        &tc,
    )
    .unwrap_err();
    assert_eq!(err, CosmoforgeError::UnknownBody(123_456));
}

#[test]
fn test_support_kernels_precede_trajectory_kernels() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = common::utf8_dir(&tmp);
    let tc = TimeConverter::new(&common::write_lsk(&dir)).unwrap();

    let batch = TrajectoryBatch::from_samples(vec![common::make_sample(
        "sat-A",
        -10001,
        (2026, 3, 1, 0, 0, 0.0),
        10,
        60.0,
    )])
    .unwrap();
    let ranges = ranges_for(&batch, &tc);

    let mut spec = common::mission_spec("Supported");
    spec.support_kernels.planetary_ephemeris = Some("de440s.bsp".to_string());
    spec.support_kernels.planetary_constants = Some("pck00011.tpc".to_string());

    let catalog = catalog::compose(
        &spec,
        &batch,
        &ranges,
        &["sat0_traj.bsp".to_string()],
        "naif0012.tls",
        &tc,
    )
    .unwrap();
    assert_eq!(
        catalog.kernels.spice_kernels,
        vec![
            "naif0012.tls".to_string(),
            "de440s.bsp".to_string(),
            "pck00011.tpc".to_string(),
            "sat0_traj.bsp".to_string(),
        ]
    );
}

#[test]
fn test_manifest_chains_to_sibling_documents() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = common::utf8_dir(&tmp);
    let tc = TimeConverter::new(&common::write_lsk(&dir)).unwrap();

    let batch = TrajectoryBatch::from_samples(vec![common::make_sample(
        "sat-A",
        -10001,
        (2026, 3, 1, 0, 0, 0.0),
        10,
        60.0,
    )])
    .unwrap();
    let ranges = ranges_for(&batch, &tc);

    let catalog = catalog::compose(
        &common::mission_spec("LEO Swarm 2026"),
        &batch,
        &ranges,
        &["sat0_traj.bsp".to_string()],
        "naif0012.tls",
        &tc,
    )
    .unwrap();

    assert_eq!(catalog.manifest_filename(), "leo_swarm_2026.json");
    assert_eq!(
        catalog.manifest.require,
        vec![
            "spice_leo_swarm_2026.json".to_string(),
            "spacecraft_leo_swarm_2026.json".to_string(),
        ]
    );
    assert_eq!(catalog.spacecraft_filename(), "spacecraft_leo_swarm_2026.json");
    assert_eq!(catalog.kernels_filename(), "spice_leo_swarm_2026.json");
    assert_eq!(catalog.session_filename(), "session_leo_swarm_2026.py");
}
