//! # NAIF identifier registries
//!
//! Lookup tables mapping **NAIF integer body identifiers** to canonical
//! display names and **inertial frame names** to the NAIF frame codes stored
//! in SPK segment summaries.
//!
//! The body registry covers the solar system barycenters, the planet and
//! satellite mass centers that a mission catalog can plausibly be centered
//! on. Spacecraft carry negative identifiers and are never looked up here:
//! the catalog refers to them through their stringified integer id.
//!
//! Both lookups are loaded once per process and are safe for concurrent
//! reads.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::constants::NaifId;
use crate::cosmoforge_errors::CosmoforgeError;

static BODY_NAMES: Lazy<HashMap<NaifId, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (0, "Solar System Barycenter"),
        (1, "Mercury Barycenter"),
        (2, "Venus Barycenter"),
        (3, "Earth-Moon Barycenter"),
        (4, "Mars Barycenter"),
        (5, "Jupiter Barycenter"),
        (6, "Saturn Barycenter"),
        (7, "Uranus Barycenter"),
        (8, "Neptune Barycenter"),
        (9, "Pluto Barycenter"),
        (10, "Sun"),
        (199, "Mercury"),
        (299, "Venus"),
        (301, "Moon"),
        (399, "Earth"),
        (401, "Phobos"),
        (402, "Deimos"),
        (499, "Mars"),
        (501, "Io"),
        (502, "Europa"),
        (503, "Ganymede"),
        (504, "Callisto"),
        (599, "Jupiter"),
        (601, "Mimas"),
        (602, "Enceladus"),
        (606, "Titan"),
        (699, "Saturn"),
        (799, "Uranus"),
        (801, "Triton"),
        (899, "Neptune"),
        (901, "Charon"),
        (999, "Pluto"),
    ])
});

static FRAME_IDS: Lazy<HashMap<&'static str, NaifId>> = Lazy::new(|| {
    HashMap::from([
        ("J2000", 1),
        ("B1950", 2),
        ("FK4", 3),
        ("GALACTIC", 13),
        ("ECLIPJ2000", 17),
        ("ECLIPB1950", 18),
    ])
});

/// Resolve a NAIF body identifier into its canonical display name.
///
/// Arguments
/// -----------------
/// * `id`: NAIF integer identifier of the center body.
///
/// Return
/// ----------
/// * The canonical name, or [`CosmoforgeError::UnknownBody`] if the
///   identifier is not in the registry.
pub fn body_name(id: NaifId) -> Result<&'static str, CosmoforgeError> {
    BODY_NAMES
        .get(&id)
        .copied()
        .ok_or(CosmoforgeError::UnknownBody(id))
}

/// Resolve an inertial reference frame name into its NAIF frame code.
///
/// Arguments
/// -----------------
/// * `name`: Frame name as carried by the trajectory samples (e.g. `"J2000"`).
///
/// Return
/// ----------
/// * The NAIF frame code stored in segment summaries, or
///   [`CosmoforgeError::UnknownFrame`] for an unmapped name.
pub fn frame_id(name: &str) -> Result<NaifId, CosmoforgeError> {
    FRAME_IDS
        .get(name)
        .copied()
        .ok_or_else(|| CosmoforgeError::UnknownFrame(name.to_string()))
}
