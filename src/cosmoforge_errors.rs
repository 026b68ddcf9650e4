use thiserror::Error;

/// Error taxonomy of the mission package pipeline.
///
/// Every failure carries the satellite index and the field or stage that
/// triggered it, so the caller can fix the offending input record. Schema and
/// shape errors are raised before any file I/O; kernel errors abort the run
/// after cleaning up the partially written file; catalog errors abort after
/// kernels are on disk (kernels are inert until referenced by a catalog).
#[derive(Error, Debug)]
pub enum CosmoforgeError {
    #[error("schema error for satellite {index}, field `{field}`: {reason}")]
    Schema {
        index: usize,
        field: String,
        reason: String,
    },

    #[error("shape error for satellite {index}, field `{field}`: {reason}")]
    Shape {
        index: usize,
        field: String,
        reason: String,
    },

    #[error("time system error: {0}")]
    TimeSystem(String),

    #[error("non-monotonic time series for satellite {index}: offsets must be strictly increasing (first violation at sample {sample})")]
    DataOrder { index: usize, sample: usize },

    #[error("unable to perform file operation: {0}")]
    Io(#[from] std::io::Error),

    #[error("kernel verification failed for `{path}`: {reason}")]
    Verification { path: String, reason: String },

    #[error("unknown body identifier: {0}")]
    UnknownBody(i32),

    #[error("unknown reference frame: {0}")]
    UnknownFrame(String),

    #[error("catalog serialization error: {0}")]
    CatalogSerialization(#[from] serde_json::Error),
}

impl PartialEq for CosmoforgeError {
    fn eq(&self, other: &Self) -> bool {
        use CosmoforgeError::*;
        match (self, other) {
            (
                Schema {
                    index: i1,
                    field: f1,
                    reason: r1,
                },
                Schema {
                    index: i2,
                    field: f2,
                    reason: r2,
                },
            ) => i1 == i2 && f1 == f2 && r1 == r2,
            (
                Shape {
                    index: i1,
                    field: f1,
                    reason: r1,
                },
                Shape {
                    index: i2,
                    field: f2,
                    reason: r2,
                },
            ) => i1 == i2 && f1 == f2 && r1 == r2,
            (TimeSystem(a), TimeSystem(b)) => a == b,
            (
                DataOrder {
                    index: i1,
                    sample: s1,
                },
                DataOrder {
                    index: i2,
                    sample: s2,
                },
            ) => i1 == i2 && s1 == s2,
            (
                Verification {
                    path: p1,
                    reason: r1,
                },
                Verification {
                    path: p2,
                    reason: r2,
                },
            ) => p1 == p2 && r1 == r2,
            (UnknownBody(a), UnknownBody(b)) => a == b,
            (UnknownFrame(a), UnknownFrame(b)) => a == b,

            // Wrapped foreign errors are compared by variant only
            (Io(_), Io(_)) => true,
            (CatalogSerialization(_), CatalogSerialization(_)) => true,

            _ => false,
        }
    }
}
