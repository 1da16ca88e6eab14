//! Critical damage bounds.

/// Inclusive `(min, max)` range for critical damage on top of `damage`.
///
/// Player targets take at most half the final damage as critical damage;
/// anything else may take the full amount.
pub fn critical_bounds(damage: u32, target_is_player: bool) -> (u32, u32) {
    let max = if target_is_player { damage / 2 } else { damage };
    (max / 10, max)
}
