//! Name-based classification of solar systems.
//!
//! The route service only knows about known space (high, low and null sec).
//! Wormhole systems use a procedural `J` + six digit designation, with a
//! couple of named exceptions, so the class can be derived from the display
//! name alone without consulting any reference table.

use std::fmt;

use serde::Serialize;

/// Wormhole systems whose names do not follow the `J######` scheme.
const NAMED_WORMHOLE_SYSTEMS: &[&str] = &["Thera", "J1226-0"];

const DESIGNATION_DIGITS: usize = 6;

/// Broad class of a solar system as far as routing is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationClass {
    /// Reachable through the stargate network.
    KnownSpace,
    /// Wormhole space; the route service cannot path through it.
    Wormhole,
}

impl fmt::Display for LocationClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            LocationClass::KnownSpace => "known_space",
            LocationClass::Wormhole => "wormhole",
        };
        f.write_str(value)
    }
}

/// Classify a system by its display name.
pub fn classify(name: &str) -> LocationClass {
    let name = name.trim();
    if NAMED_WORMHOLE_SYSTEMS.contains(&name) || is_wormhole_designation(name) {
        LocationClass::Wormhole
    } else {
        LocationClass::KnownSpace
    }
}

/// Returns `true` when the named system cannot be routed through.
pub fn is_excluded_class(name: &str) -> bool {
    classify(name) == LocationClass::Wormhole
}

fn is_wormhole_designation(name: &str) -> bool {
    match name.strip_prefix('J') {
        Some(digits) => {
            digits.len() == DESIGNATION_DIGITS && digits.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}
