//! Colour themes for the board.
//!
//! Themes are plain configuration values handed to the renderer; nothing
//! here touches global state.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// An RGB colour.
pub type Rgb = (u8, u8, u8);

/// Colours used to draw one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Cell background.
    pub background: Rgb,
    /// Grid lines.
    pub grid: Rgb,
    /// X marks.
    pub x: Rgb,
    /// O marks.
    pub o: Rgb,
    /// Status and labels.
    pub text: Rgb,
    /// Winning line highlight.
    pub win: Rgb,
}

/// Named colour theme.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    /// Teal and amber on slate.
    #[default]
    Default,
    /// Coral and amber on plum.
    Sunset,
    /// Sage and gold on pine.
    Forest,
    /// Red and blue on light grey.
    Classic,
}

impl Theme {
    /// Colours for this theme.
    pub fn palette(self) -> Palette {
        match self {
            Theme::Default => Palette {
                background: (0x1a, 0x2a, 0x33),
                grid: (0x10, 0x21, 0x2a),
                x: (0x31, 0xc3, 0xbd),
                o: (0xf2, 0xb1, 0x37),
                text: (0xa8, 0xbe, 0xc9),
                win: (0xf2, 0xb1, 0x37),
            },
            Theme::Sunset => Palette {
                background: (0x2c, 0x21, 0x38),
                grid: (0x1e, 0x15, 0x26),
                x: (0xf8, 0x8c, 0x7f),
                o: (0xf2, 0xb1, 0x37),
                text: (0xd8, 0xc7, 0xe3),
                win: (0xf8, 0x8c, 0x7f),
            },
            Theme::Forest => Palette {
                background: (0x2a, 0x3d, 0x33),
                grid: (0x1d, 0x2a, 0x23),
                x: (0xa1, 0xc1, 0x81),
                o: (0xfc, 0xca, 0x46),
                text: (0xe0, 0xe0, 0xd6),
                win: (0xa1, 0xc1, 0x81),
            },
            Theme::Classic => Palette {
                background: (0xea, 0xea, 0xea),
                grid: (0xd4, 0xd4, 0xd4),
                x: (0xe5, 0x39, 0x35),
                o: (0x1e, 0x88, 0xe5),
                text: (0x33, 0x33, 0x33),
                win: (0xe5, 0x39, 0x35),
            },
        }
    }

    /// The theme after this one, wrapping around.
    #[instrument]
    pub fn next(self) -> Self {
        use strum::IntoEnumIterator;
        let all: Vec<Theme> = Theme::iter().collect();
        let index = all.iter().position(|t| *t == self).unwrap_or(0);
        all[(index + 1) % all.len()]
    }
}
