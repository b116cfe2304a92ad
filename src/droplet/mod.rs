//! Single falling water droplet
//!
//! A droplet swells at the emission end of the strip, falls with constant
//! acceleration, bounces once off the far end while leaving a faint residue
//! there, and disappears on the second impact.

mod motion;

use motion::Motion;

use crate::color::{Rgb, add_clipped_to, scale_color};
use crate::math8::complement8;

/// Default color retention on floor impact (out of 256)
pub const DEFAULT_COLLISION_SCALING: u16 = 40;

/// A swelling droplet starts to fall once its blue channel minus the swell
/// level drops to this value
const SWELL_THRESHOLD: i32 = 10;

/// Observable lifecycle state of a droplet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropletState {
    /// Slot is free and draws nothing
    #[default]
    Inactive,
    /// Brightness ramps up at the emission end
    Swelling,
    /// Accelerating towards the floor
    Falling,
    /// Rebounded once, leaving a residue on the floor
    Bouncing,
}

/// Internal state with per-state data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Phase {
    #[default]
    Inactive,
    Swelling {
        level: u16,
    },
    Falling(Motion),
    Bouncing(Motion),
}

/// Falling water droplet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Droplet {
    color: Rgb,
    gravity: u8,
    collision_scaling: u16,
    phase: Phase,
}

impl Default for Droplet {
    fn default() -> Self {
        Self::inactive()
    }
}

impl Droplet {
    /// Create a swelling droplet
    pub const fn new(color: Rgb, gravity: u8) -> Self {
        Self {
            color,
            gravity,
            collision_scaling: DEFAULT_COLLISION_SCALING,
            phase: Phase::Swelling { level: 0 },
        }
    }

    /// Create an inactive droplet, used to fill free pool slots
    pub const fn inactive() -> Self {
        Self {
            color: Rgb { r: 0, g: 0, b: 0 },
            gravity: 0,
            collision_scaling: DEFAULT_COLLISION_SCALING,
            phase: Phase::Inactive,
        }
    }

    /// Set how much of the color survives the floor impact (256 = no loss)
    #[must_use]
    pub const fn with_collision_scaling(mut self, scaling: u16) -> Self {
        self.collision_scaling = scaling;
        self
    }

    pub const fn state(&self) -> DropletState {
        match self.phase {
            Phase::Inactive => DropletState::Inactive,
            Phase::Swelling { .. } => DropletState::Swelling,
            Phase::Falling(_) => DropletState::Falling,
            Phase::Bouncing(_) => DropletState::Bouncing,
        }
    }

    pub const fn is_active(&self) -> bool {
        !matches!(self.phase, Phase::Inactive)
    }

    pub const fn color(&self) -> Rgb {
        self.color
    }

    pub const fn gravity(&self) -> u8 {
        self.gravity
    }

    /// Swell level while swelling, 8.8 fixed-point offset while moving
    pub const fn position(&self) -> u16 {
        match self.phase {
            Phase::Inactive => 0,
            Phase::Swelling { level } => level,
            Phase::Falling(motion) | Phase::Bouncing(motion) => motion.position,
        }
    }

    /// 8.8 fixed-point speed, zero unless moving
    pub const fn speed(&self) -> i16 {
        match self.phase {
            Phase::Falling(motion) | Phase::Bouncing(motion) => motion.speed,
            Phase::Inactive | Phase::Swelling { .. } => 0,
        }
    }

    /// Advance the lifecycle by one tick
    ///
    /// `max_pos` is the index of the floor LED (strip length minus one).
    pub fn step(&mut self, max_pos: u8) {
        let floor = u16::from(max_pos) << 8;
        let gravity = i16::from(self.gravity);

        self.phase = match self.phase {
            Phase::Inactive => Phase::Inactive,
            Phase::Swelling { level } => {
                let level = level.saturating_add(1);
                if self.is_swollen(level) {
                    Phase::Falling(Motion::default())
                } else {
                    Phase::Swelling { level }
                }
            }
            Phase::Falling(mut motion) => {
                if motion.advance(gravity, floor) {
                    motion.rebound();
                    self.color = scale_color(self.color, self.collision_scaling);
                    Phase::Bouncing(motion)
                } else {
                    Phase::Falling(motion)
                }
            }
            Phase::Bouncing(mut motion) => {
                if motion.advance(gravity, floor) {
                    // Second impact
                    Phase::Inactive
                } else {
                    Phase::Bouncing(motion)
                }
            }
        };
    }

    /// Draw the droplet additively onto the strip
    ///
    /// The light of a moving droplet is smeared between the two LEDs around its
    /// position: the closer the droplet is to an LED, the brighter that LED.
    pub fn draw(&self, leds: &mut [Rgb], max_pos: u8, reverse: bool) {
        match self.phase {
            Phase::Inactive => {}
            Phase::Swelling { level } => {
                let first = if reverse { max_pos } else { 0 };
                add_at(leds, first, scale_color(self.color, level));
            }
            Phase::Falling(motion) | Phase::Bouncing(motion) => {
                let (index, fraction) = motion.cell();
                let (pos, next, last) = if reverse {
                    let pos = max_pos.saturating_sub(index);
                    (pos, pos.wrapping_sub(1), 0)
                } else {
                    (index, index.wrapping_add(1), max_pos)
                };

                add_at(leds, pos, scale_color(self.color, complement8(fraction)));
                if fraction != 0 {
                    add_at(leds, next, scale_color(self.color, u16::from(fraction)));
                }

                if matches!(self.phase, Phase::Bouncing(_)) {
                    add_at(leds, last, self.color);
                }
            }
        }
    }

    /// Step and draw in one go
    ///
    /// The floor is derived from the strip length. Strips longer than 255 LEDs
    /// only use their first 255 cells; an empty strip leaves the droplet as is.
    pub fn render(&mut self, leds: &mut [Rgb], reverse: bool) {
        let count = u8::try_from(leds.len()).unwrap_or(u8::MAX);
        let Some(max_pos) = count.checked_sub(1) else {
            return;
        };
        let leds = &mut leds[..usize::from(count)];

        self.step(max_pos);
        self.draw(leds, max_pos, reverse);
    }

    /// Less blue droplets swell for a shorter time
    fn is_swollen(&self, level: u16) -> bool {
        let blue = i32::from(self.color.b);
        blue <= SWELL_THRESHOLD || blue - i32::from(level) <= SWELL_THRESHOLD
    }
}

fn add_at(leds: &mut [Rgb], index: u8, color: Rgb) {
    if let Some(led) = leds.get_mut(usize::from(index)) {
        add_clipped_to(led, color);
    }
}
