//! Frame scheduling and timing utilities.
//!
//! Provides portable frame pacing without async/await or platform-specific timers.
//! The caller is responsible for sleeping/waiting between frames.

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::bounds::{RenderingBounds, bounded};
use crate::config::ConfigError;
use crate::jitter::JitterSource;
use crate::pool::DropletPool;
use crate::LedStrip;

/// Default target frame rate (90 FPS).
pub const DEFAULT_FPS: u32 = 90;

/// Default frame duration based on target FPS.
pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_millis(1000 / DEFAULT_FPS as u64);

/// Longest strip an 8-bit droplet position can address.
pub const MAX_STRIP_LEN: usize = u8::MAX as usize;

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (may be zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Portable frame scheduler that drives a droplet pool on a strip.
///
/// This scheduler:
/// - Tracks frame timing with drift correction
/// - Lets the pool rebuild the strip buffer and pushes it to the hardware
/// - Returns timing info so the caller can sleep appropriately
///
/// # Usage
///
/// ```ignore
/// let pool = DropletPool::<_, 4>::new(&DropletPoolConfig::default(), XorShift32::new(seed))?;
/// let mut scheduler = FrameScheduler::new(pool, strip)?;
///
/// loop {
///     let now = get_current_time_ms();
///     let result = scheduler.tick(Instant::from_millis(now));
///
///     // Platform-specific sleep
///     sleep_ms(result.sleep_duration.as_millis() as u64);
/// }
/// ```
pub struct FrameScheduler<S: LedStrip, J: JitterSource, const N: usize> {
    strip: S,
    pool: DropletPool<J, N>,
    bounds: Option<RenderingBounds>,
    reverse: bool,
    next_frame: Instant,
    frame_duration: Duration,
}

impl<S: LedStrip, J: JitterSource, const N: usize> FrameScheduler<S, J, N> {
    /// Create a new frame scheduler.
    ///
    /// Uses `DEFAULT_FRAME_DURATION` (90 FPS) for frame timing.
    pub fn new(pool: DropletPool<J, N>, strip: S) -> Result<Self, ConfigError> {
        Self::with_frame_duration(pool, strip, DEFAULT_FRAME_DURATION)
    }

    /// Create a new frame scheduler with custom frame duration.
    ///
    /// Fails if the strip is empty or longer than [`MAX_STRIP_LEN`].
    pub fn with_frame_duration(
        pool: DropletPool<J, N>,
        mut strip: S,
        frame_duration: Duration,
    ) -> Result<Self, ConfigError> {
        let len = strip.pixels_mut().len();
        if len == 0 {
            #[cfg(feature = "esp32-log")]
            println!("[FrameScheduler] strip has no LEDs");
            return Err(ConfigError::EmptyStrip);
        }
        if len > MAX_STRIP_LEN {
            #[cfg(feature = "esp32-log")]
            println!("[FrameScheduler] strip has more than {} LEDs", MAX_STRIP_LEN);
            return Err(ConfigError::StripTooLong);
        }

        Ok(Self {
            strip,
            pool,
            bounds: None,
            reverse: false,
            next_frame: Instant::from_millis(0),
            frame_duration,
        })
    }

    /// Restrict rendering to a part of the strip.
    ///
    /// LEDs outside the bounds are left untouched.
    pub fn with_bounds(mut self, bounds: RenderingBounds) -> Result<Self, ConfigError> {
        bounds.validate(self.strip.pixels_mut().len())?;
        self.bounds = Some(bounds);
        Ok(self)
    }

    /// Set whether droplets fall towards the start of the strip.
    pub fn set_reverse(&mut self, reverse: bool) {
        self.reverse = reverse;
    }

    pub const fn reverse(&self) -> bool {
        self.reverse
    }

    /// Process one frame and return timing information.
    ///
    /// This method:
    /// 1. Applies drift correction if we've fallen too far behind
    /// 2. Animates the droplet pool into the strip buffer
    /// 3. Pushes the buffer to the hardware
    /// 4. Returns the deadline for the next frame
    ///
    /// The caller is responsible for waiting until `next_deadline` before
    /// calling `tick` again.
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        // Drift correction: if we've fallen too far behind, reset to now
        // This prevents catch-up bursts after long stalls
        let max_drift_ms = self.frame_duration.as_millis() * 2;
        if now.as_millis() > self.next_frame.as_millis() + max_drift_ms {
            #[cfg(feature = "esp32-log")]
            println!(
                "[FrameScheduler.tick] behind by {}ms, resetting",
                now.as_millis() - self.next_frame.as_millis()
            );
            self.next_frame = now;
        }

        // Render and output
        let pixels = self.strip.pixels_mut();
        let frame = match self.bounds {
            Some(bounds) => bounded(pixels, bounds),
            None => pixels,
        };
        self.pool.animate(frame, self.reverse);
        self.strip.show();

        // Calculate next frame deadline
        self.next_frame += self.frame_duration;

        // Calculate sleep duration (may be zero if we're behind)
        let sleep_duration = if self.next_frame.as_millis() > now.as_millis() {
            Duration::from_millis(self.next_frame.as_millis() - now.as_millis())
        } else {
            Duration::from_millis(0)
        };

        FrameResult {
            next_deadline: self.next_frame,
            sleep_duration,
        }
    }

    /// Get a reference to the droplet pool.
    pub fn pool(&self) -> &DropletPool<J, N> {
        &self.pool
    }

    /// Get a mutable reference to the droplet pool.
    pub fn pool_mut(&mut self) -> &mut DropletPool<J, N> {
        &mut self.pool
    }

    /// Get a reference to the strip driver.
    pub fn strip(&self) -> &S {
        &self.strip
    }

    /// Get a mutable reference to the strip driver.
    pub fn strip_mut(&mut self) -> &mut S {
        &mut self.strip
    }
}
