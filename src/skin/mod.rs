//! Cosmetic variants for the snake and the board colours.
//!
//! A [`Skin`] never affects gameplay. At render time it is turned into a
//! [`CellFill`], which maps a segment index and cell to a colour and knows
//! nothing about the terminal.

pub mod paint;

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::game::ParseNameError;
pub use paint::{CellFill, Rgb};

/// Registered skins, in menu order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Skin {
    #[default]
    Classic,
    Neon,
    Lava,
    Ice,
    Zebra,
    Rainbow,
    Glass,
}

impl Skin {
    pub const ALL: [Skin; 7] = [
        Skin::Classic,
        Skin::Neon,
        Skin::Lava,
        Skin::Ice,
        Skin::Zebra,
        Skin::Rainbow,
        Skin::Glass,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Skin::Classic => "classic",
            Skin::Neon => "neon",
            Skin::Lava => "lava",
            Skin::Ice => "ice",
            Skin::Zebra => "zebra",
            Skin::Rainbow => "rainbow",
            Skin::Glass => "glass",
        }
    }

    /// Look a skin up by name, falling back to the default for anything
    /// missing or unknown
    pub fn resolve(name: Option<&str>) -> Skin {
        match name {
            Some(name) => name.parse().unwrap_or_else(|_| {
                debug!(name, "unknown skin, using default");
                Skin::default()
            }),
            None => Skin::default(),
        }
    }

    /// The skin after this one in menu order, wrapping around
    pub fn next(&self) -> Skin {
        let index = Skin::ALL.iter().position(|s| s == self).unwrap_or(0);
        Skin::ALL[(index + 1) % Skin::ALL.len()]
    }

    /// Whether the colours shift on every tick
    pub fn is_animated(&self) -> bool {
        matches!(self, Skin::Rainbow)
    }

    /// Resolve the fill strategy for one frame
    pub fn fill(&self, theme: Theme, grid_width: usize, hue_base: u16) -> CellFill {
        let background = theme.palette().background;
        match self {
            Skin::Classic => {
                let palette = theme.palette();
                CellFill::HeadBody {
                    head: palette.snake_head,
                    body: palette.snake_body,
                }
            }
            Skin::Neon => CellFill::HeadBody {
                head: Rgb::hex(0x00fff2),
                body: Rgb::hex(0x00ff88),
            },
            Skin::Lava => CellFill::Gradient {
                from: Rgb::hex(0xff8c00),
                to: Rgb::hex(0xff0033),
                width: grid_width,
            },
            Skin::Ice => CellFill::Gradient {
                from: Rgb::hex(0xa8e6ff),
                to: Rgb::hex(0xe0f7ff),
                width: grid_width,
            },
            Skin::Zebra => CellFill::Stripes {
                light: background.mix(Rgb::WHITE, 0.5),
                dark: background.mix(Rgb::WHITE, 0.15),
            },
            Skin::Rainbow => CellFill::Rainbow { hue_base },
            // 75% opaque white over the board
            Skin::Glass => CellFill::HeadBody {
                head: background.mix(Rgb::WHITE, 0.95 * 0.75),
                body: background.mix(Rgb::WHITE, 0.65 * 0.75),
            },
        }
    }
}

impl fmt::Display for Skin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Skin {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Skin::ALL
            .into_iter()
            .find(|skin| skin.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseNameError {
                kind: "skin",
                name: s.to_string(),
            })
    }
}

/// Light or dark board
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// Colours that depend on the theme rather than the skin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb,
    pub empty_cell: Rgb,
    pub food: Rgb,
    pub snake_head: Rgb,
    pub snake_body: Rgb,
    pub text: Rgb,
    pub accent: Rgb,
}

impl Theme {
    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn palette(&self) -> Palette {
        match self {
            Theme::Dark => Palette {
                background: Rgb::hex(0x0f172a),
                empty_cell: Rgb::hex(0x334155),
                food: Rgb::hex(0xef4444),
                snake_head: Rgb::hex(0x4ade80),
                snake_body: Rgb::hex(0x22c55e),
                text: Rgb::hex(0xe2e8f0),
                accent: Rgb::hex(0xfacc15),
            },
            Theme::Light => Palette {
                background: Rgb::hex(0xf8fafc),
                empty_cell: Rgb::hex(0xcbd5e1),
                food: Rgb::hex(0xdc2626),
                snake_head: Rgb::hex(0x15803d),
                snake_body: Rgb::hex(0x16a34a),
                text: Rgb::hex(0x0f172a),
                accent: Rgb::hex(0xb45309),
            },
        }
    }
}
