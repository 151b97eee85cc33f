pub(crate) use rgb::RGBA;

/// Colors of one NDVI rendering, ordered from low to high index.
pub(crate) struct PaletteData {
    pub(crate) rgb: Vec<RGBA<f64>>, // Invariant: 6 (continuous) or 7 (classified)
    pub(crate) typ: PaletteType,
    pub(crate) blind: Trivalent,
}

/// Type of Palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaletteType {
    /// Sequential color scheme, used for the raw index.  Colors
    /// progress monotonically in lightness from low to high values.
    Seq,
    /// Divergent color scheme, used for the classified index.  Bare
    /// ground and dense vegetation sit at the two contrasting ends.
    Div,
}

/// Trivalent logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trivalent {
    Yes,
    Maybe,
    No,
}
