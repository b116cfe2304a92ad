#![no_std]

pub mod bounds;
pub mod color;
pub mod config;
pub mod droplet;
pub mod frame_scheduler;
pub mod jitter;
pub mod math8;
pub mod pool;

pub use bounds::RenderingBounds;
pub use config::{ConfigError, DropletPoolConfig, Palette};
pub use droplet::{Droplet, DropletState};
pub use frame_scheduler::{FrameResult, FrameScheduler};
pub use jitter::{CycleJitter, JitterSource, XorShift32};
pub use pool::DropletPool;

pub use color::Rgb;
pub use embassy_time::{Duration, Instant};

/// Abstract LED strip driver
///
/// Implement this trait to support different hardware platforms.
/// The strip owns the pixel buffer; the frame scheduler fills it and then
/// asks the strip to transmit it.
pub trait LedStrip {
    /// Mutable access to the pixel buffer, one cell per LED
    fn pixels_mut(&mut self) -> &mut [Rgb];

    /// Push the pixel buffer to the hardware
    fn show(&mut self);
}
