/// Combat tunables handed to a region when it is created.
///
/// Values are plain data; nothing reads them from process-wide state.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Distance units a bolt covers per 100 ticks.
    pub bolt_speed: u32,
    /// Radius around the target within which players see the cast animation.
    pub visibility_radius: u32,
    /// Ticks the target's cast-interrupt timer runs after an impact or a miss.
    pub spell_interrupt_duration: u64,
    /// Endurance percent an engaging blocker spends per assisted block.
    pub engage_endurance_cost: u32,
    /// Ticks after being attacked during which an actor cannot be engaged.
    pub engage_attack_delay: u64,
    /// Block chance floor while an engage commitment is honored.
    pub engage_block_floor: f64,
    /// Base miss chance when a player casts.
    pub player_base_miss: i32,
    /// Base miss chance when a non-player casts.
    pub npc_base_miss: i32,
    /// Share of bolt damage that is magical and skips armor mitigation.
    pub magical_fraction: f64,
    /// Final damage never exceeds this multiple of the spell's base damage.
    pub damage_cap_multiplier: u32,
    /// Ceiling on armor absorption.
    pub max_absorb: f64,
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_ACTIVE_EFFECTS: usize = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_BOLT_SPEED: u32 = 85;
    pub const DEFAULT_VISIBILITY_RADIUS: u32 = 3600;
    pub const DEFAULT_SPELL_INTERRUPT_DURATION: u64 = 4500;
    pub const DEFAULT_ENGAGE_ENDURANCE_COST: u32 = 15;
    pub const DEFAULT_ENGAGE_ATTACK_DELAY: u64 = 10_000;
    pub const DEFAULT_MAX_ABSORB: f64 = 0.85;

    pub fn new() -> Self {
        Self {
            bolt_speed: Self::DEFAULT_BOLT_SPEED,
            visibility_radius: Self::DEFAULT_VISIBILITY_RADIUS,
            spell_interrupt_duration: Self::DEFAULT_SPELL_INTERRUPT_DURATION,
            engage_endurance_cost: Self::DEFAULT_ENGAGE_ENDURANCE_COST,
            engage_attack_delay: Self::DEFAULT_ENGAGE_ATTACK_DELAY,
            engage_block_floor: 85.0,
            player_base_miss: 20,
            npc_base_miss: 25,
            magical_fraction: 0.5,
            damage_cap_multiplier: 3,
            max_absorb: Self::DEFAULT_MAX_ABSORB,
        }
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
