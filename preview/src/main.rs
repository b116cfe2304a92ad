//! Desktop preview app for myrtio-droplets
//!
//! Renders the droplet animation on a simulated LED strip with interactive
//! controls. Frames are produced by the same `FrameScheduler` used on hardware.

use std::time::{Instant as StdInstant, SystemTime, UNIX_EPOCH};

use eframe::egui::{self};
use myrtio_droplets::{
    DropletPool, DropletPoolConfig, FrameScheduler, Instant, LedStrip, Rgb, XorShift32,
    color::BLACK,
};

/// Droplets animating at the same time
const POOL_CAPACITY: usize = 4;

/// Longest strip the droplet engine supports
const MAX_LEDS: usize = 255;

/// Default number of LEDs in the simulated strip
const DEFAULT_LED_COUNT: usize = 60;

/// Size of each LED rectangle in pixels
const LED_SIZE: f32 = 12.0;

/// Gap between LEDs
const LED_GAP: f32 = 2.0;

type PreviewScheduler = FrameScheduler<PreviewStrip, XorShift32, POOL_CAPACITY>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    /// Render as a 1D strip, wrapped to available window width
    Strip,
    /// Render as a single vertical line, droplets fall down the window
    Column,
}

/// In-memory strip standing in for the hardware driver
struct PreviewStrip {
    pixels: Vec<Rgb>,
    frames: u64,
}

impl LedStrip for PreviewStrip {
    fn pixels_mut(&mut self) -> &mut [Rgb] {
        &mut self.pixels
    }

    fn show(&mut self) {
        self.frames += 1;
    }
}

fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 600.0])
            .with_title("Droplets Preview"),
        ..Default::default()
    };

    eframe::run_native(
        "myrtio-droplets-preview",
        options,
        Box::new(|_cc| Ok(Box::new(PreviewApp::new()))),
    )
}

struct PreviewApp {
    /// Scheduler driving the pool on the simulated strip
    scheduler: PreviewScheduler,

    /// Synthetic time in milliseconds
    t_ms: u64,
    /// Deadline of the next frame in synthetic time
    next_frame_ms: u64,
    /// Wall-clock reference for delta time
    last_frame: StdInstant,
    /// Whether animation is playing
    playing: bool,
    /// Time scale multiplier (1.0 = realtime)
    time_scale: f32,

    // Pool settings, changing one rebuilds the scheduler
    /// Gravity added to the droplet speed every frame
    gravity: u8,
    /// Color kept on floor impact, out of 256
    collision_scaling: u16,
    /// Number of LEDs to display
    led_count: usize,

    /// Droplets fall towards the first LED
    reverse: bool,
    /// LED pixel size for display
    led_size: f32,
    /// Preview layout
    layout: Layout,
}

impl PreviewApp {
    fn new() -> Self {
        let defaults = DropletPoolConfig::default();
        let scheduler =
            build_scheduler(&defaults, DEFAULT_LED_COUNT).expect("default configuration is valid");

        Self {
            scheduler,
            t_ms: 0,
            next_frame_ms: 0,
            last_frame: StdInstant::now(),
            playing: true,
            time_scale: 1.0,
            gravity: defaults.gravity,
            collision_scaling: defaults.collision_scaling,
            led_count: DEFAULT_LED_COUNT,
            reverse: false,
            led_size: LED_SIZE,
            layout: Layout::Column,
        }
    }

    /// Rebuild the scheduler after a pool or strip setting changed
    fn rebuild(&mut self) {
        let config = DropletPoolConfig {
            gravity: self.gravity,
            collision_scaling: self.collision_scaling,
            ..DropletPoolConfig::default()
        };
        match build_scheduler(&config, self.led_count) {
            Ok(mut scheduler) => {
                scheduler.set_reverse(self.reverse);
                self.scheduler = scheduler;
                self.next_frame_ms = self.t_ms;
            }
            Err(err) => eprintln!("cannot apply settings: {err}"),
        }
    }

    /// Reset time and all droplets
    fn reset(&mut self) {
        self.t_ms = 0;
        self.next_frame_ms = 0;
        self.last_frame = StdInstant::now();
        self.scheduler.pool_mut().reset();
    }

    /// Toggle playing state
    fn toggle_playing(&mut self) {
        self.playing = !self.playing;
    }

    /// Update synthetic time based on wall clock and time scale
    fn update_time(&mut self) {
        let now = StdInstant::now();
        let delta = now.duration_since(self.last_frame);
        self.last_frame = now;

        if self.playing {
            let delta_ms_f64 =
                delta.as_secs_f64() * 1000.0 * f64::from(self.time_scale);
            let delta_ms_f64 = if delta_ms_f64.is_finite() {
                #[allow(clippy::cast_precision_loss)]
                delta_ms_f64.clamp(0.0, u64::MAX as f64)
            } else {
                0.0
            };
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let delta_ms = delta_ms_f64 as u64;
            self.t_ms = self.t_ms.wrapping_add(delta_ms);
        }
    }

    /// Render a frame once its deadline has passed
    fn update_frame(&mut self) {
        if !self.playing || self.t_ms < self.next_frame_ms {
            return;
        }
        let result = self.scheduler.tick(Instant::from_millis(self.t_ms));
        self.next_frame_ms = result.next_deadline.as_millis();
    }
}

fn build_scheduler(
    config: &DropletPoolConfig,
    led_count: usize,
) -> Result<PreviewScheduler, myrtio_droplets::ConfigError> {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.subsec_nanos())
        .unwrap_or_default();
    let pool = DropletPool::new(config, XorShift32::new(seed))?;
    let strip = PreviewStrip {
        pixels: vec![BLACK; led_count],
        frames: 0,
    };
    FrameScheduler::new(pool, strip)
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_time();
        self.update_frame();

        // Request continuous repaint for animation
        ctx.request_repaint();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                // <PlaybackControls>
                ui.vertical(|ui| {
                    ui.horizontal(|ui| {
                        if ui.button("⏮ Reset").clicked() {
                            self.reset();
                        }
                        if ui
                            .button(if self.playing {
                                "⏸ Pause"
                            } else {
                                "▶ Play"
                            })
                            .clicked()
                        {
                            self.toggle_playing();
                        }
                    });

                    ui.add_space(4.0);

                    ui.horizontal(|ui| {
                        let secs = self.t_ms / 1000;
                        let ms = self.t_ms % 1000;
                        ui.label(format!("Time: {secs}.{ms:03}s"));
                        ui.add_space(8.0);
                        ui.label(format!("Frames: {}", self.scheduler.strip().frames));
                    });

                    ui.add_space(4.0);

                    ui.horizontal(|ui| {
                        ui.label("Speed:");
                        ui.add(
                            egui::Slider::new(&mut self.time_scale, 0.1..=5.0)
                                .logarithmic(true),
                        );
                    });
                });
                // </PlaybackControls>
                ui.add_space(16.0);
                // <LayoutControls>
                ui.vertical(|ui| {
                    ui.horizontal(|ui| {
                        ui.label("Size: ");
                        ui.add(egui::Slider::new(&mut self.led_size, 4.0..=32.0));
                    });

                    ui.add_space(4.0);

                    ui.horizontal(|ui| {
                        ui.label("Layout:");
                        ui.selectable_value(&mut self.layout, Layout::Strip, "strip");
                        ui.selectable_value(&mut self.layout, Layout::Column, "column");
                    });

                    ui.add_space(4.0);

                    ui.horizontal(|ui| {
                        ui.label("LEDs:");
                        let old_led_count = self.led_count;
                        ui.add(egui::Slider::new(&mut self.led_count, 1usize..=MAX_LEDS));
                        if self.led_count != old_led_count {
                            self.rebuild();
                        }
                    });
                });
                // </LayoutControls>
            });

            ui.add_space(16.0);

            // <DropletControls>
            ui.horizontal(|ui| {
                ui.label("Gravity:");
                let old_gravity = self.gravity;
                ui.add(egui::DragValue::new(&mut self.gravity).range(1u8..=40u8));
                if self.gravity != old_gravity {
                    self.rebuild();
                }

                ui.add_space(8.0);

                ui.label("Collision:");
                let old_scaling = self.collision_scaling;
                ui.add(egui::Slider::new(&mut self.collision_scaling, 0u16..=256u16));
                if self.collision_scaling != old_scaling {
                    self.rebuild();
                }

                ui.add_space(8.0);

                if ui.checkbox(&mut self.reverse, "Reverse").changed() {
                    self.scheduler.set_reverse(self.reverse);
                }

                ui.add_space(8.0);

                ui.label(format!(
                    "Active: {}/{}",
                    self.scheduler.pool().active_count(),
                    self.scheduler.pool().capacity()
                ));
            });
            // </DropletControls>

            ui.add_space(16.0);

            // === LED Display ===
            let frame = &self.scheduler.strip().pixels;
            let available_width = ui.available_width();
            let led_pitch = self.led_size + LED_GAP;

            match self.layout {
                Layout::Strip => {
                    #[allow(
                        clippy::cast_possible_truncation,
                        clippy::cast_sign_loss
                    )]
                    let leds_per_row =
                        (available_width / led_pitch).floor().max(1.0) as usize;
                    let rows = frame.len().div_ceil(leds_per_row);
                    #[allow(clippy::cast_precision_loss)]
                    let height = rows as f32 * led_pitch;

                    let (response, painter) = ui.allocate_painter(
                        egui::vec2(available_width, height),
                        egui::Sense::hover(),
                    );
                    let origin = response.rect.min;

                    #[allow(clippy::cast_precision_loss)]
                    for (i, pixel) in frame.iter().enumerate() {
                        let row = i / leds_per_row;
                        let col = i % leds_per_row;
                        let x = origin.x + col as f32 * led_pitch;
                        let y = origin.y + row as f32 * led_pitch;

                        let rect = egui::Rect::from_min_size(
                            egui::pos2(x, y),
                            egui::vec2(self.led_size, self.led_size),
                        );
                        let color = egui::Color32::from_rgb(pixel.r, pixel.g, pixel.b);
                        painter.rect_filled(rect, 3.0, color);
                    }
                }
                Layout::Column => {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        #[allow(clippy::cast_precision_loss)]
                        let height = frame.len() as f32 * led_pitch;

                        let (response, painter) = ui.allocate_painter(
                            egui::vec2(led_pitch, height),
                            egui::Sense::hover(),
                        );
                        let origin = response.rect.min;

                        #[allow(clippy::cast_precision_loss)]
                        for (i, pixel) in frame.iter().enumerate() {
                            let y = origin.y + i as f32 * led_pitch;
                            let rect = egui::Rect::from_min_size(
                                egui::pos2(origin.x, y),
                                egui::vec2(self.led_size, self.led_size),
                            );
                            let color =
                                egui::Color32::from_rgb(pixel.r, pixel.g, pixel.b);
                            painter.rect_filled(rect, 2.0, color);
                        }
                    });
                }
            }
        });
    }
}
