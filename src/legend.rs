//! HTML legends of the raw and classified NDVI layers.

use std::fmt::{self, Write};
use crate::{IndexClass, PalettePair, RGBColor};

/// Style of the legend boxes (classes `ndvilegend` and
/// `reclassifiedndvi`).
pub const LEGEND_CSS: &str = "\
.ndvilegend, .reclassifiedndvi {
    transition: 0.2s ease-in-out;
    border-radius: 5px;
    box-shadow: 0 0 5px rgba(0, 0, 0, 0.2);
    background: rgba(0, 0, 0, 0.05);
}
.ndvilegend:hover, .reclassifiedndvi:hover {
    transition: 0.3s ease-in-out;
    box-shadow: 0 0 5px rgba(0, 0, 0, 0.8);
    background: rgba(0, 0, 0, 0.12);
    cursor: pointer;
}
";

/// Write the legend of the raw index: a vertical gradient through the
/// continuous palette with the ends of the index range.
pub fn write_continuous_legend<Color: RGBColor>(
    fh: &mut impl Write, pair: &PalettePair<Color>) -> fmt::Result {
    writeln!(fh, "<div class=\"ndvilegend\">\n  <h5>Raw NDVI</h5>")?;
    writeln!(fh, "  <div style=\"display: flex; flex-direction: row; \
                  align-items: flex-start; gap: 1rem; width: 100%;\">")?;
    writeln!(fh, "    <div style=\"width: 30px; height: 200px; \
                  background: linear-gradient({});\"></div>",
             pair.continuous.hex().join(","))?;
    writeln!(fh, "    <div style=\"display: flex; flex-direction: column; \
                  justify-content: space-between; height: 200px;\">\n      \
                  <span>-1</span>\n      \
                  <span style=\"align-self: flex-end;\">1</span>\n    \
                  </div>")?;
    writeln!(fh, "  </div>\n</div>")
}

/// Write the legend of the classified index: one colored square and
/// label per class.
pub fn write_classified_legend<Color: RGBColor>(
    fh: &mut impl Write, pair: &PalettePair<Color>) -> fmt::Result {
    writeln!(fh, "<div class=\"reclassifiedndvi\">\n  <h5>NDVI Classes</h5>")?;
    writeln!(fh, "  <ul style=\"list-style-type: none; padding: 0;\">")?;
    for class in IndexClass::ALL {
        writeln!(fh, "    <li style=\"margin: 0.2em 0px; padding: 0;\">\
                      <span style=\"color: {};\">&#9632;</span> {}.</li>",
                 pair.class_color(class).to_hex(), class.label())?;
    }
    writeln!(fh, "  </ul>\n</div>")
}

/// [`write_continuous_legend`] to a string.
pub fn continuous_legend<Color: RGBColor>(pair: &PalettePair<Color>) -> String {
    let mut s = String::new();
    // Writing to a `String` does not fail.
    let _ = write_continuous_legend(&mut s, pair);
    s
}

/// [`write_classified_legend`] to a string.
pub fn classified_legend<Color: RGBColor>(pair: &PalettePair<Color>) -> String {
    let mut s = String::new();
    let _ = write_classified_legend(&mut s, pair);
    s
}
