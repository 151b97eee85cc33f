// Writes `legend.html`: for every palette mode, the palettes with their
// grayscale rendering, the legends and a sample classified transect.
//
//     RUST_LOG=debug cargo run --example legend [MODE]

use std::{env,
          io::{BufWriter, Write},
          fs::File,
          error::Error};
use ndvi_palette::{classify_masked, legend, ColorRange, PaletteMode,
                   PalettePair, RGBColor};
use rgb::RGB8;
use tracing_subscriber::EnvFilter;

type Err = Box<dyn Error>;

fn table_of_colors(fh: &mut impl Write, colors: &[RGB8],
                   width: u32, comment: &str) -> Result<(), Err> {
    writeln!(fh, "<table style=\"border: 0px;  border-spacing: 0px\"><tr>")?;
    for &c in colors {
        writeln!(fh, "  <td style=\"width: {width}px; height: 30px; \
                      background-color: {}\"></td>", c.to_hex())?;
    }
    writeln!(fh, "<td rowspan=\"2\" style=\"padding-left: 7px\">\
                  {comment}</td></tr><tr>")?;
    for &c in colors {
        writeln!(fh, "  <td style=\"width: {width}px; height: 12px; \
                      background-color: {}\"></td>", c.to_gray().to_hex())?;
    }
    writeln!(fh, "</tr></table><br/>")?;
    Ok(())
}

fn mode_section(fh: &mut impl Write, pair: &PalettePair<RGB8>)
                -> Result<(), Err> {
    writeln!(fh, "<h3>{}</h3>", pair.mode)?;
    table_of_colors(fh, &pair.continuous.colors(), 40, "raw NDVI")?;
    let g = pair.continuous.gradient();
    let n = 150;
    let interpolated: Vec<_> = (0 .. n).map(|i| g.rgb(i as f64 / (n - 1) as f64))
        .collect();
    table_of_colors(fh, &interpolated, 1, "raw NDVI (interpolated)")?;
    table_of_colors(fh, &pair.classified.colors(), 40, "NDVI classes")?;

    // Transect from water to dense vegetation.
    let transect: Vec<f64> = (0 .. n).map(|i| -0.2 + 1.2 * i as f64 / (n - 1) as f64)
        .collect();
    let classes: Vec<RGB8> = classify_masked(&transect)?.into_iter()
        .map(|c| c.map_or(RGB8::new(255, 255, 255), |c| pair.class_color(c)))
        .collect();
    table_of_colors(fh, &classes, 1, "classified transect −0.2 … 1")?;

    writeln!(fh, "<div style=\"display: flex; gap: 2rem\">")?;
    legend::write_continuous_legend(&mut FmtAdapter(&mut *fh), pair)?;
    legend::write_classified_legend(&mut FmtAdapter(&mut *fh), pair)?;
    writeln!(fh, "</div>")?;
    Ok(())
}

/// Lets the `fmt::Write` legend writers target an `io::Write`.
struct FmtAdapter<'a, W: Write>(&'a mut W);

impl<W: Write> std::fmt::Write for FmtAdapter<'_, W> {
    fn write_str(&mut self, s: &str) -> std::fmt::Result {
        self.0.write_all(s.as_bytes()).map_err(|_| std::fmt::Error)
    }
}


fn main() -> Result<(), Err> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let modes = match env::args().nth(1) {
        Some(m) => vec![m.parse::<PaletteMode>()?],
        None => PaletteMode::ALL.to_vec(),
    };
    let mut fh = BufWriter::new(File::create("legend.html")?);
    writeln!(fh, "<html>\n\
                  <head>\n\
                  <title>NDVI palettes</title>\n\
                  <style>\n{}</style>\n\
                  </head>\n\
                  <body>", legend::LEGEND_CSS)?;
    for mode in modes {
        mode_section(&mut fh, &mode.palettes())?;
    }
    writeln!(fh, "</body>\n\
                  </html>")?;
    Ok(())
}
