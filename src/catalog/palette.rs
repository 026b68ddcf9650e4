//! # Deterministic trajectory coloring
//!
//! Index-ordered sampling of the viridis colormap, a perceptually uniform
//! palette. The assignment is a pure function of the satellite count and
//! index: re-running the composer on the same batch order reproduces the
//! same colors, which keeps regenerated mission packages diff-stable.

/// Viridis anchor colors, evenly spaced over `[0, 1]`.
const VIRIDIS_ANCHORS: [[u8; 3]; 20] = [
    [0x44, 0x01, 0x54],
    [0x48, 0x15, 0x67],
    [0x48, 0x26, 0x77],
    [0x45, 0x37, 0x81],
    [0x40, 0x47, 0x88],
    [0x39, 0x56, 0x8c],
    [0x33, 0x63, 0x8d],
    [0x2d, 0x70, 0x8e],
    [0x28, 0x7d, 0x8e],
    [0x23, 0x8a, 0x8d],
    [0x1f, 0x96, 0x8b],
    [0x20, 0xa3, 0x87],
    [0x29, 0xaf, 0x7f],
    [0x3c, 0xbb, 0x75],
    [0x55, 0xc6, 0x67],
    [0x73, 0xd0, 0x55],
    [0x95, 0xd8, 0x40],
    [0xb8, 0xde, 0x29],
    [0xdc, 0xe3, 0x19],
    [0xfd, 0xe7, 0x25],
];

/// Normalized RGB color at palette position `t ∈ [0, 1]`, linearly
/// interpolated between anchors and rounded to three decimals.
fn color_at(t: f64) -> [f64; 3] {
    let t = t.clamp(0.0, 1.0);
    let scaled = t * (VIRIDIS_ANCHORS.len() - 1) as f64;
    let lower = scaled.floor() as usize;
    let upper = scaled.ceil() as usize;
    let frac = scaled - lower as f64;

    let mut color = [0.0; 3];
    for (channel, slot) in color.iter_mut().enumerate() {
        let a = VIRIDIS_ANCHORS[lower][channel] as f64 / 255.0;
        let b = VIRIDIS_ANCHORS[upper][channel] as f64 / 255.0;
        let value = a + (b - a) * frac;
        *slot = (value * 1000.0).round() / 1000.0;
    }
    color
}

/// Sample the palette for `count` satellites, one color per batch index.
///
/// Arguments
/// -----------------
/// * `count`: Number of satellites in the mission.
///
/// Return
/// ----------
/// * `count` RGB triples in `[0, 1]`, evenly spread over the palette; a
///   single satellite gets the palette start.
pub fn sample_palette(count: usize) -> Vec<[f64; 3]> {
    (0..count)
        .map(|index| {
            let t = if count <= 1 {
                0.0
            } else {
                index as f64 / (count - 1) as f64
            };
            color_at(t)
        })
        .collect()
}
