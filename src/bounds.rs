use crate::{Rgb, config::ConfigError};

/// Bounds of the rendering area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderingBounds {
    pub start: u8,
    pub end: u8,
}

impl RenderingBounds {
    /// Bounds covering a whole strip of `count` LEDs
    pub const fn full(count: u8) -> Self {
        Self {
            start: 0,
            end: count,
        }
    }

    /// Get the number of LEDs in the rendering area
    pub const fn count(self) -> u8 {
        self.end.saturating_sub(self.start)
    }

    /// Check that the area is non-empty and fits a strip of `len` LEDs
    pub const fn validate(self, len: usize) -> Result<(), ConfigError> {
        if self.start >= self.end || self.end as usize > len {
            return Err(ConfigError::BoundsOutOfRange);
        }
        Ok(())
    }
}

/// Get a slice of the LEDs within the bounds
///
/// Bounds reaching past the slice are cut at its end.
pub(crate) fn bounded(leds: &mut [Rgb], bounds: RenderingBounds) -> &mut [Rgb] {
    let end = usize::from(bounds.end).min(leds.len());
    let start = usize::from(bounds.start).min(end);
    &mut leds[start..end]
}
