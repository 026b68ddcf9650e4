//! # Fixed-schema validation of raw satellite records
//!
//! Field-by-field checks over loosely structured JSON records. Each record
//! must carry **exactly** the declared field set; extra and missing fields
//! both fail with a tagged [`CosmoforgeError::Schema`], and dimension
//! problems fail with [`CosmoforgeError::Shape`], always referencing the
//! offending satellite index and field.
//!
//! Checks run in a fixed order per record: required-field set, text fields,
//! integral identifiers, `times` as a 1-D series, `positions`/`velocities`
//! as N×3 rows, `referenceFrame` text, and `epoch0` with exactly six
//! components. Time monotonicity is deliberately **not** checked here; the
//! pipeline gates it right before kernel writing.

use nalgebra::Vector3;
use serde_json::Value;

use crate::cosmoforge_errors::CosmoforgeError;
use crate::time::CalendarEpoch;
use crate::trajectories::TrajectorySample;

/// The exact field set of one satellite record.
pub const REQUIRED_FIELDS: [&str; 9] = [
    "name",
    "id",
    "segmentLabel",
    "epoch0",
    "times",
    "positions",
    "velocities",
    "centerId",
    "referenceFrame",
];

fn schema_error(index: usize, field: &str, reason: impl Into<String>) -> CosmoforgeError {
    CosmoforgeError::Schema {
        index,
        field: field.to_string(),
        reason: reason.into(),
    }
}

fn shape_error(index: usize, field: &str, reason: impl Into<String>) -> CosmoforgeError {
    CosmoforgeError::Shape {
        index,
        field: field.to_string(),
        reason: reason.into(),
    }
}

/// Build one typed [`TrajectorySample`] from a raw JSON record.
///
/// Arguments
/// -----------------
/// * `index`: Position of the record in the batch, used for error context.
/// * `record`: The raw JSON value, which must be an object.
///
/// Return
/// ----------
/// * The typed, freshly owned sample (caller data untouched), or the first
///   schema/shape error encountered in check order.
pub fn sample_from_value(
    index: usize,
    record: &Value,
) -> Result<TrajectorySample, CosmoforgeError> {
    let map = record
        .as_object()
        .ok_or_else(|| schema_error(index, "record", "satellite record must be a JSON object"))?;

    // (1) exact required-field set
    for field in REQUIRED_FIELDS {
        if !map.contains_key(field) {
            return Err(schema_error(index, field, "missing required field"));
        }
    }
    for key in map.keys() {
        if !REQUIRED_FIELDS.contains(&key.as_str()) {
            return Err(schema_error(index, key, "unexpected field"));
        }
    }

    // (2) text identifiers
    let name = require_text(index, map, "name")?;
    if name.is_empty() {
        return Err(schema_error(index, "name", "must be non-empty text"));
    }
    let segment_label = require_text(index, map, "segmentLabel")?;

    // (3) integral identifiers
    let id = require_integer(index, map, "id")?;
    let center_id = require_integer(index, map, "centerId")?;

    // (4) times as a one-dimensional numeric series
    let times = require_series(index, map, "times")?;
    let n = times.len();

    // (5) positions and velocities as N×3 rows
    let positions = require_rows(index, map, "positions", n)?;
    let velocities = require_rows(index, map, "velocities", n)?;

    // (6) reference frame text
    let reference_frame = require_text(index, map, "referenceFrame")?;

    // (7) epoch0 with exactly six components
    let epoch0 = require_epoch(index, map)?;

    Ok(TrajectorySample {
        name,
        id,
        segment_label,
        epoch0,
        times,
        positions,
        velocities,
        center_id,
        reference_frame,
    })
}

fn require_text(
    index: usize,
    map: &serde_json::Map<String, Value>,
    field: &str,
) -> Result<String, CosmoforgeError> {
    map[field]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| schema_error(index, field, "must be text"))
}

fn require_integer(
    index: usize,
    map: &serde_json::Map<String, Value>,
    field: &str,
) -> Result<i32, CosmoforgeError> {
    let value = map[field]
        .as_i64()
        .ok_or_else(|| schema_error(index, field, "must be an integer"))?;
    i32::try_from(value)
        .map_err(|_| schema_error(index, field, format!("{value} exceeds the identifier range")))
}

fn require_number(index: usize, field: &str, value: &Value) -> Result<f64, CosmoforgeError> {
    value
        .as_f64()
        .ok_or_else(|| schema_error(index, field, "must contain only numbers"))
}

fn require_series(
    index: usize,
    map: &serde_json::Map<String, Value>,
    field: &str,
) -> Result<Vec<f64>, CosmoforgeError> {
    let rows = map[field]
        .as_array()
        .ok_or_else(|| shape_error(index, field, "must be a one-dimensional sequence"))?;
    rows.iter()
        .map(|v| {
            if v.is_array() {
                Err(shape_error(index, field, "must be one-dimensional"))
            } else {
                require_number(index, field, v)
            }
        })
        .collect()
}

fn require_rows(
    index: usize,
    map: &serde_json::Map<String, Value>,
    field: &str,
    expected_rows: usize,
) -> Result<Vec<Vector3<f64>>, CosmoforgeError> {
    let rows = map[field]
        .as_array()
        .ok_or_else(|| shape_error(index, field, "must be an N×3 sequence"))?;
    if rows.len() != expected_rows {
        return Err(shape_error(
            index,
            field,
            format!("has {} rows, expected {expected_rows}", rows.len()),
        ));
    }
    rows.iter()
        .map(|row| {
            let triple = row
                .as_array()
                .filter(|r| r.len() == 3)
                .ok_or_else(|| shape_error(index, field, "rows must hold exactly 3 components"))?;
            Ok(Vector3::new(
                require_number(index, field, &triple[0])?,
                require_number(index, field, &triple[1])?,
                require_number(index, field, &triple[2])?,
            ))
        })
        .collect()
}

fn require_epoch(
    index: usize,
    map: &serde_json::Map<String, Value>,
) -> Result<CalendarEpoch, CosmoforgeError> {
    let parts = map["epoch0"]
        .as_array()
        .ok_or_else(|| shape_error(index, "epoch0", "must be a sequence of 6 components"))?;
    if parts.len() != 6 {
        return Err(shape_error(
            index,
            "epoch0",
            format!("has {} components, expected 6", parts.len()),
        ));
    }
    let numbers = parts
        .iter()
        .map(|v| require_number(index, "epoch0", v))
        .collect::<Result<Vec<_>, _>>()?;
    for (component, value) in ["year", "month", "day", "hour", "minute"]
        .iter()
        .zip(&numbers)
    {
        if value.fract() != 0.0 {
            return Err(schema_error(
                index,
                "epoch0",
                format!("{component} component must be integral, got {value}"),
            ));
        }
    }
    Ok(CalendarEpoch {
        year: numbers[0] as i32,
        month: numbers[1] as u8,
        day: numbers[2] as u8,
        hour: numbers[3] as u8,
        minute: numbers[4] as u8,
        second: numbers[5],
    })
}

#[cfg(test)]
mod schema_test {
    use super::*;
    use serde_json::json;

    fn valid_record() -> Value {
        json!({
            "name": "sat-A",
            "id": -10001,
            "segmentLabel": "SAT-A TRAJECTORY",
            "epoch0": [2026, 3, 1, 0, 0, 0.0],
            "times": [0.0, 60.0, 120.0],
            "positions": [[7000.0, 0.0, 0.0], [6999.0, 60.0, 0.0], [6996.0, 120.0, 0.0]],
            "velocities": [[0.0, 7.5, 0.0], [-0.06, 7.5, 0.0], [-0.12, 7.5, 0.0]],
            "centerId": 399,
            "referenceFrame": "J2000"
        })
    }

    #[test]
    fn test_valid_record() {
        let sample = sample_from_value(0, &valid_record()).unwrap();
        assert_eq!(sample.name, "sat-A");
        assert_eq!(sample.id, -10001);
        assert_eq!(sample.len(), 3);
        assert_eq!(sample.positions[0].x, 7000.0);
        assert_eq!(sample.epoch0.year, 2026);
        assert_eq!(sample.center_id, 399);
    }

    #[test]
    fn test_missing_field() {
        let mut record = valid_record();
        record.as_object_mut().unwrap().remove("times");
        let err = sample_from_value(3, &record).unwrap_err();
        assert_eq!(
            err,
            CosmoforgeError::Schema {
                index: 3,
                field: "times".to_string(),
                reason: "missing required field".to_string(),
            }
        );
    }

    #[test]
    fn test_unexpected_field() {
        let mut record = valid_record();
        record
            .as_object_mut()
            .unwrap()
            .insert("color".to_string(), json!("red"));
        let err = sample_from_value(0, &record).unwrap_err();
        assert!(matches!(err, CosmoforgeError::Schema { ref field, .. } if field == "color"));
    }

    #[test]
    fn test_epoch0_wrong_length() {
        let mut record = valid_record();
        record.as_object_mut().unwrap()["epoch0"] = json!([2026, 3, 1, 0, 0]);
        let err = sample_from_value(1, &record).unwrap_err();
        assert!(
            matches!(err, CosmoforgeError::Shape { index: 1, ref field, .. } if field == "epoch0")
        );
    }

    #[test]
    fn test_positions_row_width() {
        let mut record = valid_record();
        record.as_object_mut().unwrap()["positions"] =
            json!([[7000.0, 0.0], [6999.0, 60.0], [6996.0, 120.0]]);
        let err = sample_from_value(0, &record).unwrap_err();
        assert!(matches!(err, CosmoforgeError::Shape { ref field, .. } if field == "positions"));
    }

    #[test]
    fn test_velocities_row_count() {
        let mut record = valid_record();
        record.as_object_mut().unwrap()["velocities"] = json!([[0.0, 7.5, 0.0]]);
        let err = sample_from_value(0, &record).unwrap_err();
        assert!(matches!(err, CosmoforgeError::Shape { ref field, .. } if field == "velocities"));
    }

    #[test]
    fn test_times_must_be_one_dimensional() {
        let mut record = valid_record();
        record.as_object_mut().unwrap()["times"] = json!([[0.0], [60.0], [120.0]]);
        let err = sample_from_value(0, &record).unwrap_err();
        assert!(matches!(err, CosmoforgeError::Shape { ref field, .. } if field == "times"));
    }

    #[test]
    fn test_id_must_be_integral() {
        let mut record = valid_record();
        record.as_object_mut().unwrap()["id"] = json!(-10001.5);
        let err = sample_from_value(0, &record).unwrap_err();
        assert!(matches!(err, CosmoforgeError::Schema { ref field, .. } if field == "id"));
    }
}
