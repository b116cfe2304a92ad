//! Fixed-point vertical kinematics
//!
//! Position and speed are 8.8 fixed-point values: the high byte addresses an
//! LED, the low byte is the sub-pixel remainder used for blending.

/// Speed divisor applied when a droplet rebounds off the floor
pub(crate) const BOUNCE_DAMPING: i16 = 4;

/// Position and velocity of a moving droplet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Motion {
    /// Offset from the emission end, always within `[0, floor]`
    pub(crate) position: u16,
    /// Signed velocity, negative while rising after a bounce
    pub(crate) speed: i16,
}

impl Motion {
    /// Advance by one tick under `gravity`
    ///
    /// Returns `true` when the droplet passed `floor` during this tick. The
    /// overshoot is mirrored back above the floor.
    pub(crate) fn advance(&mut self, gravity: i16, floor: u16) -> bool {
        let next = i32::from(self.position) + i32::from(self.speed);
        self.speed = self.speed.saturating_add(gravity);

        let floor = i32::from(floor);
        let hit_floor = next > floor;
        let next = if hit_floor { 2 * floor - next } else { next };
        self.position = clamp_position(next, floor);

        hit_floor
    }

    /// Invert and dampen the speed after a floor impact
    pub(crate) fn rebound(&mut self) {
        self.speed = self.speed.saturating_neg() / BOUNCE_DAMPING;
    }

    /// LED index and sub-pixel remainder of the position
    pub(crate) const fn cell(self) -> (u8, u8) {
        let [index, fraction] = self.position.to_be_bytes();
        (index, fraction)
    }
}

fn clamp_position(value: i32, floor: i32) -> u16 {
    u16::try_from(value.clamp(0, floor)).unwrap_or(0)
}
