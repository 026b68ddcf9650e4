//! # Batch-level validation rules
//!
//! Rules that only make sense across a whole batch, plus the time-ordering
//! gate the pipeline runs right before kernel writing. Everything here is a
//! pure function over immutable samples with no side effects, so validation
//! failures are guaranteed to happen before any directory or file is touched.
//!
//! All samples of one mission must share `center_id` and `reference_frame`:
//! the catalog resolves exactly one center name for the mission, so a mixed
//! batch would silently corrupt the downstream visualization. This is
//! enforced as a hard rule.

use ahash::AHashSet;
use itertools::Itertools;

use crate::constants::{MAX_SEGMENT_LABEL_BYTES, MIN_TRAJECTORY_SAMPLES};
use crate::cosmoforge_errors::CosmoforgeError;
use crate::trajectories::TrajectorySample;

/// Run every batch-level rule over the samples.
///
/// Arguments
/// -----------------
/// * `samples`: The typed samples, in batch order.
///
/// Return
/// ----------
/// * `Ok(())` iff all rules hold; otherwise the first error with satellite
///   index and field context.
pub fn check_batch(samples: &[TrajectorySample]) -> Result<(), CosmoforgeError> {
    if samples.is_empty() {
        return Err(CosmoforgeError::Schema {
            index: 0,
            field: "batch".to_string(),
            reason: "batch holds no satellite records".to_string(),
        });
    }
    let mut names = AHashSet::with_capacity(samples.len());
    let mut ids = AHashSet::with_capacity(samples.len());
    let mut labels = AHashSet::with_capacity(samples.len());

    for (index, sample) in samples.iter().enumerate() {
        if sample.name.is_empty() {
            return Err(CosmoforgeError::Schema {
                index,
                field: "name".to_string(),
                reason: "must be non-empty text".to_string(),
            });
        }
        if sample.len() < MIN_TRAJECTORY_SAMPLES {
            return Err(CosmoforgeError::Shape {
                index,
                field: "times".to_string(),
                reason: format!(
                    "has {} samples, interpolation requires at least {MIN_TRAJECTORY_SAMPLES}",
                    sample.len()
                ),
            });
        }
        for (field, rows) in [
            ("positions", sample.positions.len()),
            ("velocities", sample.velocities.len()),
        ] {
            if rows != sample.len() {
                return Err(CosmoforgeError::Shape {
                    index,
                    field: field.to_string(),
                    reason: format!("has {rows} rows, expected {}", sample.len()),
                });
            }
        }
        if sample.segment_label.len() > MAX_SEGMENT_LABEL_BYTES {
            return Err(CosmoforgeError::Shape {
                index,
                field: "segmentLabel".to_string(),
                reason: format!(
                    "is {} bytes, the kernel name record holds at most {MAX_SEGMENT_LABEL_BYTES}",
                    sample.segment_label.len()
                ),
            });
        }

        if !names.insert(sample.name.as_str()) {
            return Err(CosmoforgeError::Schema {
                index,
                field: "name".to_string(),
                reason: format!("duplicate name `{}`", sample.name),
            });
        }
        if !ids.insert(sample.id) {
            return Err(CosmoforgeError::Schema {
                index,
                field: "id".to_string(),
                reason: format!("duplicate body identifier {}", sample.id),
            });
        }
        if !labels.insert(sample.segment_label.as_str()) {
            return Err(CosmoforgeError::Schema {
                index,
                field: "segmentLabel".to_string(),
                reason: format!("duplicate segment label `{}`", sample.segment_label),
            });
        }

        // shared center body and frame across the whole mission
        if sample.center_id != samples[0].center_id {
            return Err(CosmoforgeError::Schema {
                index,
                field: "centerId".to_string(),
                reason: format!(
                    "is {}, but the batch is centered on {}",
                    sample.center_id, samples[0].center_id
                ),
            });
        }
        if sample.reference_frame != samples[0].reference_frame {
            return Err(CosmoforgeError::Schema {
                index,
                field: "referenceFrame".to_string(),
                reason: format!(
                    "is `{}`, but the batch uses `{}`",
                    sample.reference_frame, samples[0].reference_frame
                ),
            });
        }
    }
    Ok(())
}

/// Fail with [`CosmoforgeError::DataOrder`] unless `times` is strictly
/// increasing. Run by the pipeline before any kernel file is created.
pub fn check_monotonic(index: usize, times: &[f64]) -> Result<(), CosmoforgeError> {
    match times.iter().tuple_windows().position(|(a, b)| b <= a) {
        Some(sample) => Err(CosmoforgeError::DataOrder {
            index,
            sample: sample + 1,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod validate_test {
    use super::*;
    use crate::time::CalendarEpoch;
    use nalgebra::Vector3;

    fn sample(name: &str, id: i32, label: &str) -> TrajectorySample {
        TrajectorySample {
            name: name.to_string(),
            id,
            segment_label: label.to_string(),
            epoch0: CalendarEpoch {
                year: 2026,
                month: 3,
                day: 1,
                hour: 0,
                minute: 0,
                second: 0.0,
            },
            times: vec![0.0, 60.0],
            positions: vec![Vector3::new(7000.0, 0.0, 0.0), Vector3::new(6999.0, 60.0, 0.0)],
            velocities: vec![Vector3::new(0.0, 7.5, 0.0), Vector3::new(-0.06, 7.5, 0.0)],
            center_id: 399,
            reference_frame: "J2000".to_string(),
        }
    }

    #[test]
    fn test_empty_batch() {
        let err = check_batch(&[]).unwrap_err();
        assert!(matches!(err, CosmoforgeError::Schema { ref field, .. } if field == "batch"));
    }

    #[test]
    fn test_valid_batch() {
        let batch = vec![sample("a", -1, "SEG A"), sample("b", -2, "SEG B")];
        assert!(check_batch(&batch).is_ok());
    }

    #[test]
    fn test_too_few_samples() {
        let mut bad = sample("a", -1, "SEG A");
        bad.times.truncate(1);
        bad.positions.truncate(1);
        bad.velocities.truncate(1);
        let err = check_batch(&[bad]).unwrap_err();
        assert!(matches!(err, CosmoforgeError::Shape { index: 0, ref field, .. } if field == "times"));
    }

    #[test]
    fn test_duplicate_id() {
        let batch = vec![sample("a", -1, "SEG A"), sample("b", -1, "SEG B")];
        let err = check_batch(&batch).unwrap_err();
        assert!(matches!(err, CosmoforgeError::Schema { index: 1, ref field, .. } if field == "id"));
    }

    #[test]
    fn test_segment_label_too_long() {
        let long = "X".repeat(MAX_SEGMENT_LABEL_BYTES + 1);
        let err = check_batch(&[sample("a", -1, &long)]).unwrap_err();
        assert!(
            matches!(err, CosmoforgeError::Shape { ref field, .. } if field == "segmentLabel")
        );
    }

    #[test]
    fn test_mixed_center() {
        let mut other = sample("b", -2, "SEG B");
        other.center_id = 301;
        let err = check_batch(&[sample("a", -1, "SEG A"), other]).unwrap_err();
        assert!(
            matches!(err, CosmoforgeError::Schema { index: 1, ref field, .. } if field == "centerId")
        );
    }

    #[test]
    fn test_mixed_frame() {
        let mut other = sample("b", -2, "SEG B");
        other.reference_frame = "ECLIPJ2000".to_string();
        let err = check_batch(&[sample("a", -1, "SEG A"), other]).unwrap_err();
        assert!(
            matches!(err, CosmoforgeError::Schema { ref field, .. } if field == "referenceFrame")
        );
    }

    #[test]
    fn test_monotonic_ok() {
        assert!(check_monotonic(0, &[0.0, 1.0, 2.0]).is_ok());
    }

    #[test]
    fn test_monotonic_violation() {
        let err = check_monotonic(2, &[0.0, 60.0, 60.0, 120.0]).unwrap_err();
        assert_eq!(err, CosmoforgeError::DataOrder { index: 2, sample: 2 });
    }
}
