//! Accessibility modes and the palette pair each one selects.

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::palettes::{self, ty::PaletteData};
use crate::{ColorRange, Error, IndexClass, Palette, RGBColor, Result};

/// Color vision the NDVI renderings are adapted to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash,
         Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PaletteMode {
    /// Normal color vision.
    #[default]
    Normal,
    /// Green-weak (green cones missing).
    Deuteranopia,
    /// Red-weak (red cones missing).
    Protanopia,
    /// Blue-yellow confusion.
    Tritanopia,
    /// No color vision; palettes rely on lightness only.
    Achromatopsia,
}

impl PaletteMode {
    pub const ALL: [PaletteMode; 5] = [
        Self::Normal, Self::Deuteranopia, Self::Protanopia,
        Self::Tritanopia, Self::Achromatopsia];

    /// Canonical name, also accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Deuteranopia => "Deuteranopia",
            Self::Protanopia => "Protanopia",
            Self::Tritanopia => "Tritanopia",
            Self::Achromatopsia => "Achromatopsia",
        }
    }

    fn data(self) -> (&'static PaletteData, &'static PaletteData) {
        use palettes::*;
        match self {
            Self::Normal => (NORMAL_CONTINUOUS.deref(), NORMAL_CLASSIFIED.deref()),
            Self::Deuteranopia => (DEUTERANOPIA_CONTINUOUS.deref(),
                                   DEUTERANOPIA_CLASSIFIED.deref()),
            Self::Protanopia => (PROTANOPIA_CONTINUOUS.deref(),
                                 PROTANOPIA_CLASSIFIED.deref()),
            Self::Tritanopia => (TRITANOPIA_CONTINUOUS.deref(),
                                 TRITANOPIA_CLASSIFIED.deref()),
            Self::Achromatopsia => (ACHROMATOPSIA_CONTINUOUS.deref(),
                                    ACHROMATOPSIA_CLASSIFIED.deref()),
        }
    }

    /// Return the continuous (6 colors) and classified (7 colors)
    /// palettes of this mode.
    ///
    /// ```
    /// use rgb::RGB8;
    /// use ndvi_palette::PaletteMode;
    /// let pair = PaletteMode::Normal.palettes::<RGB8>();
    /// assert_eq!(pair.continuous.len(), 6);
    /// assert_eq!(pair.classified.hex()[0], "#a50026");
    /// ```
    pub fn palettes<Color: RGBColor>(self) -> PalettePair<Color> {
        let (continuous, classified) = self.data();
        PalettePair { mode: self,
                      continuous: Palette::new(continuous),
                      classified: Palette::new(classified) }
    }
}

impl fmt::Display for PaletteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PaletteMode {
    type Err = Error;

    /// Parse a mode name, ignoring case and surrounding blanks.
    /// "Acromatopsia", the spelling of the viewer's selection box, is
    /// an alias of [`PaletteMode::Achromatopsia`].  Any other string
    /// is an error, never a silent fallback to `Normal`.
    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        let mode = Self::ALL.into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(name))
            .or_else(|| name.eq_ignore_ascii_case("Acromatopsia")
                     .then_some(Self::Achromatopsia));
        match mode {
            Some(m) => {
                debug!(mode = %m, "palette mode selected");
                Ok(m)
            }
            None => Err(Error::UnknownPaletteMode(s.to_string())),
        }
    }
}

impl TryFrom<String> for PaletteMode {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> { s.parse() }
}

impl From<PaletteMode> for String {
    fn from(m: PaletteMode) -> String { m.name().to_string() }
}


/// The two palettes used to render an NDVI map.
#[derive(Clone, Copy)]
pub struct PalettePair<Color> {
    pub mode: PaletteMode,
    /// Raw index, 6 colors stretched over \[0, 1\].
    pub continuous: Palette<Color>,
    /// Classified index, one color per [`IndexClass`].
    pub classified: Palette<Color>,
}

impl<Color: RGBColor> PalettePair<Color> {
    /// Color of `class` in the classified rendering.
    pub fn class_color(&self, class: IndexClass) -> Color {
        Color::from_rgba(self.classified.palette.rgb[class.index()])
    }

    /// Color of the raw index `value` in the continuous rendering.
    /// Values outside \[0, 1\] get the color of the nearest end.
    pub fn index_color(&self, value: f64) -> Color {
        self.continuous.gradient().rgb(value)
    }
}
