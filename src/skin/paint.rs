use crate::game::Position;

/// Backend-neutral colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    /// From a `0xRRGGBB` literal
    pub const fn hex(value: u32) -> Rgb {
        Rgb((value >> 16) as u8, (value >> 8) as u8, value as u8)
    }

    /// Linear blend towards `other`; `t = 0` is self, `t = 1` is other
    pub fn mix(&self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let channel = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb(
            channel(self.0, other.0),
            channel(self.1, other.1),
            channel(self.2, other.2),
        )
    }

    /// From hue in degrees and saturation/lightness in `0..=1`
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Rgb {
        let hue = hue.rem_euclid(360.0);
        let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
        let x = chroma * (1.0 - ((hue / 60.0) % 2.0 - 1.0).abs());
        let m = lightness - chroma / 2.0;

        let (r, g, b) = match hue as u32 / 60 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        let to_u8 = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Rgb(to_u8(r), to_u8(g), to_u8(b))
    }
}

/// How snake segments are coloured for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellFill {
    /// One colour for the head, another for the rest
    HeadBody { head: Rgb, body: Rgb },
    /// Left-to-right blend across the board
    Gradient { from: Rgb, to: Rgb, width: usize },
    /// Diagonal stripes fixed to the board
    Stripes { light: Rgb, dark: Rgb },
    /// Hue walks along the body and shifts with `hue_base`
    Rainbow { hue_base: u16 },
}

/// Hue step between consecutive rainbow segments
pub const RAINBOW_SEGMENT_HUE: u16 = 20;

/// Hue shift applied on every tick while the rainbow skin is active
pub const RAINBOW_TICK_HUE: u16 = 6;

impl CellFill {
    /// Colour for segment `index` (0 is the head) sitting on `pos`
    pub fn paint(&self, index: usize, pos: Position) -> Rgb {
        match *self {
            CellFill::HeadBody { head, body } => {
                if index == 0 {
                    head
                } else {
                    body
                }
            }
            CellFill::Gradient { from, to, width } => {
                let span = width.saturating_sub(1).max(1) as f32;
                from.mix(to, pos.x.max(0) as f32 / span)
            }
            CellFill::Stripes { light, dark } => {
                if (pos.x + pos.y).rem_euclid(2) == 0 {
                    light
                } else {
                    dark
                }
            }
            CellFill::Rainbow { hue_base } => {
                let step = (index % 360) as u32 * RAINBOW_SEGMENT_HUE as u32;
                let hue = (hue_base as u32 + step) % 360;
                Rgb::from_hsl(hue as f32, 0.9, 0.55)
            }
        }
    }
}

/// Advance a rainbow hue by one tick
pub fn next_hue(hue_base: u16) -> u16 {
    (hue_base + RAINBOW_TICK_HUE) % 360
}
