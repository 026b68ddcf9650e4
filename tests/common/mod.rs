#![allow(dead_code)]

use camino::{Utf8Path, Utf8PathBuf};
use nalgebra::Vector3;

use cosmoforge::catalog::{MissionSpec, SupportKernels};
use cosmoforge::time::CalendarEpoch;
use cosmoforge::TrajectorySample;

/// Route pipeline log output through the test harness capture. Safe to call
/// from every test; only the first call installs the logger.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Minimal, genuine leap-second kernel text for tests.
pub const LSK_TEXT: &str = r"KPL/LSK

Test leap-second kernel.

\begindata

DELTET/DELTA_T_A       =   32.184
DELTET/K               =    1.657D-3
DELTET/EB              =    1.671D-2
DELTET/M               = (  6.239996D0   1.99096871D-7 )

DELTET/DELTA_AT        = ( 10,   @1972-JAN-1
                           36,   @2015-JUL-1
                           37,   @2017-JAN-1 )

\begintext
";

/// Write the test leap-second kernel into `dir` and return its path.
pub fn write_lsk(dir: &Utf8Path) -> Utf8PathBuf {
    let path = dir.join("naif0012.tls");
    std::fs::write(path.as_std_path(), LSK_TEXT).unwrap();
    path
}

/// Convert a tempdir path into a Utf8 path.
pub fn utf8_dir(dir: &tempfile::TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap()
}

/// A plausible low-orbit trajectory of `n` samples spaced `dt` seconds,
/// starting at `epoch0` = (year, month, day, hour, minute, second).
pub fn make_sample(
    name: &str,
    id: i32,
    epoch0: (i32, u8, u8, u8, u8, f64),
    n: usize,
    dt: f64,
) -> TrajectorySample {
    let radius = 7000.0_f64;
    let speed = 7.5_f64;
    let omega = speed / radius;
    let times: Vec<f64> = (0..n).map(|i| dt * i as f64).collect();
    let positions = times
        .iter()
        .map(|t| {
            Vector3::new(
                radius * (omega * t).cos(),
                radius * (omega * t).sin(),
                0.0,
            )
        })
        .collect();
    let velocities = times
        .iter()
        .map(|t| {
            Vector3::new(
                -speed * (omega * t).sin(),
                speed * (omega * t).cos(),
                0.0,
            )
        })
        .collect();
    TrajectorySample {
        name: name.to_string(),
        id,
        segment_label: format!("{} TRAJECTORY", name.to_uppercase()),
        epoch0: CalendarEpoch {
            year: epoch0.0,
            month: epoch0.1,
            day: epoch0.2,
            hour: epoch0.3,
            minute: epoch0.4,
            second: epoch0.5,
        },
        times,
        positions,
        velocities,
        center_id: 399,
        reference_frame: "J2000".to_string(),
    }
}

/// A mission spec without optional support kernels.
pub fn mission_spec(name: &str) -> MissionSpec {
    MissionSpec {
        name: name.to_string(),
        version: "1.0".to_string(),
        support_kernels: SupportKernels::default(),
    }
}
