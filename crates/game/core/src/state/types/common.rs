use std::fmt;

/// Unique identifier for any actor tracked by a region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifier of a spatial partition that owns its own tick progression.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegionId(pub u16);

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "region-{}", self.0)
    }
}

/// World position in region units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0, z: 0 };

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance truncated to whole units.
    pub fn distance(&self, other: &Position) -> u32 {
        let dx = (other.x as i64 - self.x as i64) as f64;
        let dy = (other.y as i64 - self.y as i64) as f64;
        let dz = (other.z as i64 - self.z as i64) as f64;
        (dx * dx + dy * dy + dz * dz).sqrt() as u32
    }
}

/// Facing direction, 4096 units per full turn. 0 faces south (+y), values grow clockwise
/// when viewed from above.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Heading(pub u16);

impl Heading {
    pub const FULL_TURN: u16 = 4096;

    /// Heading a viewer at `from` needs to face `to`.
    pub fn towards(from: &Position, to: &Position) -> Self {
        let dx = (to.x as i64 - from.x as i64) as f64;
        let dy = (to.y as i64 - from.y as i64) as f64;
        let angle = (-dx).atan2(dy); // radians, 0 = +y
        let units = angle * f64::from(Self::FULL_TURN) / core::f64::consts::TAU;
        Self(units.rem_euclid(f64::from(Self::FULL_TURN)) as u16 % Self::FULL_TURN)
    }

    /// Returns true when `to` lies inside the `arc_degrees` wide cone centered on this
    /// heading as seen from `from`.
    pub fn is_in_front(&self, from: &Position, to: &Position, arc_degrees: u16) -> bool {
        if from.x == to.x && from.y == to.y {
            return true;
        }
        let wanted = Self::towards(from, to).0 as i32;
        let full = Self::FULL_TURN as i32;
        let mut diff = (wanted - self.0 as i32).rem_euclid(full);
        if diff > full / 2 {
            diff = full - diff;
        }
        let half_arc = arc_degrees as i32 * full / 360 / 2;
        diff <= half_arc
    }
}

/// Region time in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Self = Self(0);

    pub fn new(value: u64) -> Self {
        Self(value)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0.saturating_add(rhs))
    }
}

impl std::ops::Sub<u64> for Tick {
    type Output = Tick;
    fn sub(self, rhs: u64) -> Tick {
        Tick(self.0.saturating_sub(rhs))
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Integer resource meter (health, power, endurance) tracked per actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub current: u32,
    pub maximum: u32,
}

impl ResourceMeter {
    pub fn new(current: u32, maximum: u32) -> Self {
        Self {
            current: current.min(maximum),
            maximum,
        }
    }

    pub fn full(maximum: u32) -> Self {
        Self::new(maximum, maximum)
    }

    /// Current value as a whole percentage of the maximum (0 when maximum is 0).
    pub fn percent(&self) -> u32 {
        if self.maximum == 0 {
            return 0;
        }
        (self.current as u64 * 100 / self.maximum as u64) as u32
    }

    /// Removes `amount`, never dropping below zero. Returns the amount actually removed.
    pub fn spend(&mut self, amount: u32) -> u32 {
        let spent = amount.min(self.current);
        self.current -= spent;
        spent
    }

    /// Removes `percent` of the maximum.
    pub fn spend_percent(&mut self, percent: u32) -> u32 {
        let amount = (self.maximum as u64 * percent as u64 / 100) as u32;
        self.spend(amount)
    }

    pub fn is_empty(&self) -> bool {
        self.current == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_truncates() {
        let a = Position::new(0, 0, 0);
        let b = Position::new(3, 4, 0);
        assert_eq!(a.distance(&b), 5);
        assert_eq!(a.distance(&Position::new(1, 1, 1)), 1);
    }

    #[test]
    fn heading_front_arc() {
        let me = Position::ORIGIN;
        let south = Position::new(0, 100, 0);
        let north = Position::new(0, -100, 0);
        let facing_south = Heading(0);

        assert!(facing_south.is_in_front(&me, &south, 180));
        assert!(!facing_south.is_in_front(&me, &north, 180));
        assert_eq!(Heading::towards(&me, &south), Heading(0));
        assert!(Heading::towards(&me, &north).is_in_front(&me, &north, 180));
    }

    #[test]
    fn meter_percent_spending() {
        let mut endurance = ResourceMeter::full(200);
        assert_eq!(endurance.percent(), 100);
        assert_eq!(endurance.spend_percent(15), 30);
        assert_eq!(endurance.current, 170);
        assert_eq!(endurance.percent(), 85);
        assert_eq!(endurance.spend(500), 170);
        assert!(endurance.is_empty());
    }
}
