use crate::{
    color::Rgb,
    math8::{mult8, qadd8},
};

/// Scale an RGB value up or down
///
/// # Arguments
/// * `color` - Color to scale
/// * `amplitude` - 8.8 fixed-point factor, `256` keeps the color unchanged,
///   lower values dim it and higher values brighten it (saturating)
#[inline]
pub const fn scale_color(color: Rgb, amplitude: u16) -> Rgb {
    Rgb {
        r: mult8(color.r, amplitude),
        g: mult8(color.g, amplitude),
        b: mult8(color.b, amplitude),
    }
}

/// Add `color` onto `target`, clipping every channel at 255
#[inline]
pub fn add_clipped_to(target: &mut Rgb, color: Rgb) {
    target.r = qadd8(target.r, color.r);
    target.g = qadd8(target.g, color.g);
    target.b = qadd8(target.b, color.b);
}

/// Create an RGB color from a u32 value (0xRRGGBB format)
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}
