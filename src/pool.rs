//! Fixed-capacity droplet pool
//!
//! Droplets live in an array and are reused in place: spawning overwrites a
//! free slot, a droplet despawns by switching itself to the inactive state.
//! Slots are handed out round-robin and spawns are paced by a countdown with
//! random jitter.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::color::{BLACK, Rgb};
use crate::config::{ConfigError, DEFAULT_POOL_CAPACITY, DropletPoolConfig, Palette};
use crate::droplet::Droplet;
use crate::jitter::JitterSource;

/// Pool of droplets sharing one strip
#[derive(Debug)]
pub struct DropletPool<J, const N: usize = DEFAULT_POOL_CAPACITY> {
    droplets: [Droplet; N],
    jitter: J,

    // Spawn parameters
    gravity: u8,
    collision_scaling: u16,
    pause_base: u16,
    pause_jitter: u16,
    initial_pause: u16,
    palette: Palette,

    // Spawn state
    /// Slot of the next droplet to spawn
    current_droplet: usize,
    /// Frames left before the next spawn attempt
    droplet_pause: u16,
    /// Palette index of the next spawn color
    color_cursor: usize,
}

impl<J: JitterSource, const N: usize> DropletPool<J, N> {
    /// Create a pool with all slots inactive
    pub fn new(config: &DropletPoolConfig, jitter: J) -> Result<Self, ConfigError> {
        if let Err(err) = config.validate(N) {
            #[cfg(feature = "esp32-log")]
            println!("[DropletPool.new] rejected configuration: {}", err);
            return Err(err);
        }

        Ok(Self {
            droplets: [Droplet::inactive(); N],
            jitter,
            gravity: config.gravity,
            collision_scaling: config.collision_scaling,
            pause_base: config.pause_base,
            pause_jitter: config.pause_jitter,
            initial_pause: config.initial_pause,
            palette: config.palette.clone(),
            current_droplet: 0,
            droplet_pause: config.initial_pause,
            color_cursor: 0,
        })
    }

    /// Render one frame
    ///
    /// Spawns a droplet when pacing allows, clears `leds` and composites every
    /// droplet into it. `reverse` makes droplets fall towards index 0.
    pub fn animate(&mut self, leds: &mut [Rgb], reverse: bool) {
        self.pace();

        leds.fill(BLACK);
        for droplet in &mut self.droplets {
            droplet.render(leds, reverse);
        }
    }

    /// Deactivate all droplets and restart pacing from the initial pause
    pub fn reset(&mut self) {
        #[cfg(feature = "esp32-log")]
        println!("[DropletPool.reset] clearing {} droplets", self.active_count());

        self.droplets = [Droplet::inactive(); N];
        self.current_droplet = 0;
        self.droplet_pause = self.initial_pause;
        self.color_cursor = 0;
    }

    pub fn droplets(&self) -> &[Droplet] {
        &self.droplets
    }

    /// Slot the next spawn will use
    pub const fn current_slot(&self) -> usize {
        self.current_droplet
    }

    /// Frames left before the next spawn attempt
    pub const fn pause(&self) -> u16 {
        self.droplet_pause
    }

    pub fn active_count(&self) -> usize {
        self.droplets.iter().filter(|d| d.is_active()).count()
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Count down the pause or spawn into the current slot if it is free
    fn pace(&mut self) {
        if self.droplet_pause > 0 {
            self.droplet_pause -= 1;
            return;
        }

        let slot = self.current_droplet;
        if self.droplets[slot].is_active() {
            return;
        }

        let color = self.next_color();
        #[cfg(feature = "esp32-log")]
        println!("[DropletPool.pace] spawning droplet {} with color {:?}", slot, color);

        self.droplets[slot] =
            Droplet::new(color, self.gravity).with_collision_scaling(self.collision_scaling);
        self.current_droplet = if slot + 1 >= N { 0 } else { slot + 1 };
        self.droplet_pause = self.next_pause();
    }

    fn next_color(&mut self) -> Rgb {
        let color = self.palette.get(self.color_cursor).copied().unwrap_or(BLACK);
        self.color_cursor = (self.color_cursor + 1) % self.palette.len().max(1);
        color
    }

    fn next_pause(&mut self) -> u16 {
        if self.pause_jitter == 0 {
            return self.pause_base;
        }
        let jitter = self.jitter.next_jitter() % self.pause_jitter;
        self.pause_base.saturating_add(jitter)
    }
}
