mod utils;

use smart_leds::RGB8;

pub use utils::{add_clipped_to, rgb_from_u32, scale_color};

pub type Rgb = RGB8;

/// Fully dark pixel
pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// Create a palette from a list of hex colors (0xRRGGBB format)
#[macro_export]
macro_rules! hex_palette {
    ($($color:expr),* $(,)?) => {
        [
            $($crate::color::rgb_from_u32($color)),*
        ]
    };
}
