//! Ability modifiers.

use dmscreen_core::character::{Ability, AbilityScores};

/// Derives the modifier for a raw ability score: `floor((score - 10) / 2)`.
///
/// Uses floor division, so scores below 10 round away from zero
/// (9 gives -1, 3 gives -4).
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn modifier(score: i32) -> i32 {
    // Widened so the subtraction cannot overflow; the halved result always
    // fits back into i32.
    (i64::from(score) - 10).div_euclid(2) as i32
}

/// Formats a modifier with an explicit `+` for zero and positive values.
#[must_use]
pub fn format_modifier(modifier: i32) -> String {
    if modifier >= 0 {
        format!("+{modifier}")
    } else {
        modifier.to_string()
    }
}

/// Formatted modifier for a raw score, e.g. `"+3"` for 16.
#[must_use]
pub fn display_modifier(score: i32) -> String {
    format_modifier(modifier(score))
}

/// Labelled, formatted modifiers for all six abilities in sheet order,
/// e.g. `("STR", "+2")`.
#[must_use]
pub fn modifier_row(scores: &AbilityScores) -> Vec<(&'static str, String)> {
    Ability::ALL
        .iter()
        .map(|ability| (ability.abbreviation(), display_modifier(scores.score(*ability))))
        .collect()
}
