//! Miss chance for bolt impacts.

use crate::config::CombatConfig;
use crate::state::ActorState;

/// Relative difficulty of `target_level` as seen from `viewer_level`.
///
/// Positive when the target out-levels the viewer. One con step spans a tenth
/// of the viewer's level, rounded up, so gaps matter less at high levels.
pub fn con_level(viewer_level: u8, target_level: u8) -> f64 {
    let step = ((u32::from(viewer_level) + 9) / 10).max(1);
    (f64::from(target_level) - f64::from(viewer_level)) / f64::from(step)
}

/// Miss chance in percent for `caster` hitting `target`.
///
/// # Formula
///
/// ```text
/// miss  = 20 (player caster) | 25 (otherwise)
/// miss += trunc(5 × con(caster, target))   if either side is not a player
/// miss += target's style defense bonus     if its last attack was a styled hit
/// ```
///
/// The result is not clamped; the roll saturates outside `0..=100`.
pub fn miss_chance(config: &CombatConfig, caster: &ActorState, target: &ActorState) -> i32 {
    let mut miss = if caster.is_player() {
        config.player_base_miss
    } else {
        config.npc_base_miss
    };

    if !caster.is_player() || !target.is_player() {
        miss += (5.0 * con_level(caster.level, target.level)) as i32;
    }

    if let Some(last) = target.last_attack {
        miss += last.defense_bonus();
    }

    miss
}
