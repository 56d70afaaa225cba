/// An RGB(A) color with sRGB-encoded components in `[0, 1]`.
///
/// Light and material colors are authored as hex literals (`0xff0000`), so
/// the type mirrors that: construction from hex, round-tripping through the
/// 8-bit triples used by color pickers, and conversion to linear space only
/// at GPU upload time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);

    /// Builds an opaque color from a `0xRRGGBB` literal.
    ///
    /// Bits above the low 24 are ignored, so `0xe1ff` is `#00e1ff`.
    pub const fn from_hex(hex: u32) -> Self {
        Self::from_srgb_u8([
            ((hex >> 16) & 0xff) as u8,
            ((hex >> 8) & 0xff) as u8,
            (hex & 0xff) as u8,
        ])
    }

    pub const fn from_srgb_u8(rgb: [u8; 3]) -> Self {
        Self::rgb(
            rgb[0] as f32 / 255.0,
            rgb[1] as f32 / 255.0,
            rgb[2] as f32 / 255.0,
        )
    }

    pub fn to_srgb_u8(self) -> [u8; 3] {
        let quantize = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [quantize(self.r), quantize(self.g), quantize(self.b)]
    }

    pub fn to_hex(self) -> u32 {
        let [r, g, b] = self.to_srgb_u8();
        (r as u32) << 16 | (g as u32) << 8 | b as u32
    }

    /// Linear-space RGB for shading; alpha is passed through.
    pub fn to_linear(self) -> [f32; 4] {
        [
            srgb_to_linear(self.r),
            srgb_to_linear(self.g),
            srgb_to_linear(self.b),
            self.a,
        ]
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
