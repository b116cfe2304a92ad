//! Droplet pool configuration

use core::fmt;

use heapless::Vec;

use crate::{color::Rgb, droplet::DEFAULT_COLLISION_SCALING, hex_palette};

/// Default number of droplets animating at the same time
pub const DEFAULT_POOL_CAPACITY: usize = 4;

/// Default gravity added to the droplet speed every tick
pub const DEFAULT_GRAVITY: u8 = 5;

/// Minimum number of frames between two spawns
pub const DEFAULT_PAUSE_BASE: u16 = 100;

/// Random extra frames added to the spawn pause (exclusive upper bound)
pub const DEFAULT_PAUSE_JITTER: u16 = 80;

/// Frames to wait before the very first spawn
pub const DEFAULT_INITIAL_PAUSE: u16 = 1;

/// Upper bound of the collision scaling factor (256 = no color loss)
pub const MAX_COLLISION_SCALING: u16 = 256;

/// Maximum number of colors in a palette
pub const MAX_PALETTE_COLORS: usize = 16;

/// Colors the droplets cycle through, in spawn order
#[allow(clippy::unreadable_literal)]
pub const DEFAULT_PALETTE: [Rgb; 5] = hex_palette![
    0xFFFF00, // Yellow
    0xFF00FF, // Purple
    0x808080, // Gray
    0xFFFFFF, // White
    0x0000FF  // Blue
];

/// Ordered spawn colors
pub type Palette = Vec<Rgb, MAX_PALETTE_COLORS>;

const _: () = assert!(DEFAULT_PALETTE.len() <= MAX_PALETTE_COLORS);

/// Configuration rejected at construction time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The pool has no droplet slots
    ZeroCapacity,
    /// Gravity is zero, droplets would never reach the floor
    ZeroGravity,
    /// The palette has no colors
    EmptyPalette,
    /// The palette has more than [`MAX_PALETTE_COLORS`] colors
    PaletteTooLarge,
    /// Collision scaling above [`MAX_COLLISION_SCALING`]
    InvalidCollisionScaling,
    /// The strip has more LEDs than an 8-bit position can address
    StripTooLong,
    /// The strip has no LEDs to render into
    EmptyStrip,
    /// Rendering bounds are empty or exceed the strip
    BoundsOutOfRange,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroCapacity => write!(f, "droplet pool capacity must be non-zero"),
            Self::ZeroGravity => write!(f, "gravity must be non-zero"),
            Self::EmptyPalette => write!(f, "palette must have at least one color"),
            Self::PaletteTooLarge => {
                write!(f, "palette exceeds {} colors", MAX_PALETTE_COLORS)
            }
            Self::InvalidCollisionScaling => {
                write!(f, "collision scaling must not exceed {}", MAX_COLLISION_SCALING)
            }
            Self::StripTooLong => write!(f, "strip must not exceed 255 LEDs"),
            Self::EmptyStrip => write!(f, "strip must have at least one LED"),
            Self::BoundsOutOfRange => {
                write!(f, "rendering bounds must be non-empty and inside the strip")
            }
        }
    }
}

/// Configuration for the droplet pool
#[derive(Debug, Clone)]
pub struct DropletPoolConfig {
    /// Acceleration added to the speed every tick (8.8 fixed point)
    pub gravity: u8,
    /// Color retained on floor impact, out of 256
    pub collision_scaling: u16,
    /// Minimum frames between spawns
    pub pause_base: u16,
    /// Random extra frames, `0` disables jitter
    pub pause_jitter: u16,
    /// Frames to wait before the first spawn
    pub initial_pause: u16,
    /// Spawn colors, cycled in order
    pub palette: Palette,
}

impl Default for DropletPoolConfig {
    fn default() -> Self {
        // Fits, asserted at compile time next to `Palette`
        let palette = Palette::from_slice(&DEFAULT_PALETTE).unwrap_or_default();

        Self {
            gravity: DEFAULT_GRAVITY,
            collision_scaling: DEFAULT_COLLISION_SCALING,
            pause_base: DEFAULT_PAUSE_BASE,
            pause_jitter: DEFAULT_PAUSE_JITTER,
            initial_pause: DEFAULT_INITIAL_PAUSE,
            palette,
        }
    }
}

impl DropletPoolConfig {
    /// Default configuration with a custom palette
    pub fn with_palette(colors: &[Rgb]) -> Result<Self, ConfigError> {
        if colors.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        let palette = Palette::from_slice(colors).map_err(|()| ConfigError::PaletteTooLarge)?;

        Ok(Self {
            palette,
            ..Self::default()
        })
    }

    /// Check the configuration for a pool of `capacity` droplets
    pub fn validate(&self, capacity: usize) -> Result<(), ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.gravity == 0 {
            return Err(ConfigError::ZeroGravity);
        }
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        if self.collision_scaling > MAX_COLLISION_SCALING {
            return Err(ConfigError::InvalidCollisionScaling);
        }
        Ok(())
    }
}
