//! Fast deterministic validation against bundled graphs with known extension counts.

use crate::brute::BruteForceCounter;
use crate::counter::ExtensionCounter;
use crate::graph::{FixedWidthGraph, WideGraph};
use crate::matrix::parse_arc_matrix;

/// Bundled arc matrices and their linear-extension counts.
const KNOWN_GRAPHS: [(&str, &str, u128); 6] = [
    ("diamond.txt", include_str!("../fixtures/diamond.txt"), 2),
    ("chain5.txt", include_str!("../fixtures/chain5.txt"), 1),
    ("antichain5.txt", include_str!("../fixtures/antichain5.txt"), 120),
    ("incremental6.txt", include_str!("../fixtures/incremental6.txt"), 20),
    ("fan5.txt", include_str!("../fixtures/fan5.txt"), 4),
    ("split5.txt", include_str!("../fixtures/split5.txt"), 20),
];

// ============================================================================
// Public API
// ============================================================================

/// Checks every bundled graph with the brute-force counter, and with the dynamic counter
/// on both graph representations.
///
/// # Errors
/// Returns an error message naming the first graph whose count is wrong.
pub fn validate_known_graphs() -> Result<(), String> {
    let mut counter = ExtensionCounter::new();
    let mut brute = BruteForceCounter::new();
    for (name, text, expected) in KNOWN_GRAPHS {
        validate_case(&mut counter, &mut brute, text, name, expected)?;
    }
    Ok(())
}

/// Validates one arc matrix against an expected extension count.
///
/// # Errors
/// Returns an error message if parsing fails or any counter disagrees.
pub fn validate_count(text: &str, name: &str, expected: u128) -> Result<(), String> {
    validate_case(
        &mut ExtensionCounter::new(),
        &mut BruteForceCounter::new(),
        text,
        name,
        expected,
    )
}

// ============================================================================
// Internal
// ============================================================================

fn validate_case(
    counter: &mut ExtensionCounter,
    brute: &mut BruteForceCounter,
    text: &str,
    name: &str,
    expected: u128,
) -> Result<(), String> {
    let matrix = parse_arc_matrix(text).map_err(|e| format!("{name}: {e}"))?;
    let fixed = FixedWidthGraph::from_model(&matrix).map_err(|e| format!("{name}: {e}"))?;
    let wide = WideGraph::from_model(&matrix).map_err(|e| format!("{name}: {e}"))?;

    let exact = brute
        .count_extensions(&fixed)
        .map_err(|e| format!("{name}: {e}"))?;
    if exact != expected {
        return Err(format!("{name}: brute force found {exact} extensions, expected {expected}"));
    }

    for (label, got) in [
        ("fixed-width", counter.count_perms(&fixed)),
        ("wide", counter.count_perms(&wide)),
    ] {
        let got = got.map_err(|e| format!("{name}: {e}"))?;
        if got != expected as f64 {
            return Err(format!(
                "{name}: dynamic counter ({label}) found {got} extensions, expected {expected}"
            ));
        }
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
