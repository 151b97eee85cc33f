//! NDVI classification and colour-blind friendly palettes.
//!
//! - [`classify`]: bucket a vegetation index into 7 [`IndexClass`]es.
//! - [`PaletteMode`]: pick the continuous (6 colors) and classified
//!   (7 colors) palettes for a given color vision deficiency.
//!
//! Around this core, [`aoi`], [`query`], [`layers`], [`legend`] and
//! [`summary`] describe what the NDVI viewer hands to the remote
//! imagery service and to the map renderer, as plain values.
//!
//! ```
//! use rgb::RGB8;
//! use ndvi_palette::{classify, PaletteMode, RGBColor};
//! let mode: PaletteMode = "Tritanopia".parse()?;
//! let pair = mode.palettes::<RGB8>();
//! let class = classify(0.52)?;
//! assert_eq!(class.value(), 5);
//! assert_eq!(pair.class_color(class).to_hex(), "#87bede");
//! # Ok::<(), ndvi_palette::Error>(())
//! ```

use std::f64::consts::PI;
use std::marker::PhantomData;
use rgb::{RGBA, RGB8, RGBA8};

mod error;
mod palettes;
pub mod classify;
pub mod mode;
pub mod aoi;
pub mod query;
pub mod layers;
pub mod legend;
pub mod summary;

use palettes::ty::PaletteData;
pub use palettes::ty::{PaletteType, Trivalent};
pub use error::{Error, Result};
pub use classify::{classify, classify_all, classify_masked, IndexClass};
pub use mode::{PaletteMode, PalettePair};

/// A “continuous” range of colors parametrized by reals in \[0, 1\].
pub trait ColorRange<Color> {
    /// Returns the color corresponding to `t` ∈ \[0., 1.\].
    fn rgb(&self, t: f64) -> Color;
}

/// Specifies the methods a RGB color encoding must provide.
pub trait RGBColor: Sized {
    /// Return the red, green, blue and alpha components of the color
    /// (in \[0, 255\]).
    fn to_rgba(&self) -> RGBA<f64>;

    /// Create a color from its RGBA components (in \[0, 255\]).
    fn from_rgba(rgba: RGBA<f64>) -> Self;

    /// Return a gradient from color `c0` to color `c1`.
    ///
    /// # Example
    ///
    /// ```
    /// use rgb::RGB8;
    /// use ndvi_palette::{RGBColor, ColorRange};
    /// let bare = RGB8::new(165, 0, 38);
    /// let dense = RGB8::new(0, 104, 55);
    /// let grad = bare.gradient(&dense);
    /// assert_eq!(grad.rgb(0.), bare);
    /// ```
    fn gradient(&self, c1: &Self) -> Gradient<Self> {
        let lch0 = Lch::from_rgb(Self::to_rgba(self));
        let lch1 = Lch::from_rgb(Self::to_rgba(c1));
        let h0 = lch0.h;
        let h1 = lch1.h;
        let dh = {
            if h1 > h0 && h1 - h0 > PI { h1 - (h0 + TWO_PI) }
            else if h1 < h0 && h0 - h1 > PI { h1 + TWO_PI - h0 }
            else { h1 - h0 } };
        Gradient { c0: lch0,
                   dc: Lch { l: lch1.l - lch0.l, c: lch1.c - lch0.c,
                             h: dh, a: lch1.a - lch0.a },
                   color: PhantomData }
    }

    /// The raw and classified NDVI palettes for `mode`.
    #[inline]
    fn ndvi_palettes(mode: PaletteMode) -> PalettePair<Self> {
        mode.palettes()
    }

    /// Convert the color to grayscale.
    fn to_gray(&self) -> Self {
        let RGBA{ r, g, b, a } = Self::to_rgba(self);
        let x = 0.299 * r + 0.587 * g + 0.114 * b;
        Self::from_rgba(RGBA{ r: x, g: x, b: x, a })
    }

    /// CSS notation `#rrggbb` of the color (alpha is dropped).
    fn to_hex(&self) -> String {
        let RGBA{ r, g, b, .. } = Self::to_rgba(self);
        let byte = |x: f64| x.round().clamp(0., 255.) as u8;
        format!("#{:02x}{:02x}{:02x}", byte(r), byte(g), byte(b))
    }

    /// Parse a color written `#rrggbb` (either case).
    ///
    /// ```
    /// use rgb::RGB8;
    /// use ndvi_palette::RGBColor;
    /// assert_eq!(RGB8::from_hex("#41AB5D")?, RGB8::new(65, 171, 93));
    /// assert!(RGB8::from_hex("41ab5d").is_err());
    /// # Ok::<(), ndvi_palette::Error>(())
    /// ```
    fn from_hex(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidColor(s.to_string());
        let digits = s.strip_prefix('#').ok_or_else(invalid)?;
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i .. i + 2], 16)
                .map(f64::from)
                .map_err(|_| invalid())
        };
        Ok(Self::from_rgba(RGBA{ r: channel(0)?, g: channel(2)?,
                                 b: channel(4)?, a: 255. }))
    }
}

impl RGBColor for RGBA<f64> {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> { *self }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self { c }
}

impl RGBColor for RGB8 {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> {
        RGBA{ r: self.r as f64, g: self.g as f64, b: self.b as f64, a: 255. }
    }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self {
        RGB8 { r: c.r.round() as u8,  g: c.g.round() as u8,  b: c.b.round() as u8 }
    }
}

impl RGBColor for RGBA8 {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> {
        RGBA{ r: self.r as f64, g: self.g as f64, b: self.b as f64,
              a: self.a as f64 }
    }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self {
        RGBA8 { r: c.r.round() as u8,  g: c.g.round() as u8,
                b: c.b.round() as u8, a: c.a.round() as u8 }
    }
}

/// The type for colors in the CIE L*C*h*_ab color space with a D50
/// reference white point and an alpha component.
#[derive(Clone, Copy)]
struct Lch {
    /// The lightness in the range 0. to 100.
    l: f64,
    /// The chroma, in the range 0. to 181.02, but less in practice.
    c: f64,
    /// The hue in radians in the range 0. to 2π.
    h: f64,
    /// Alpha component
    a: f64,
}

const EPS0: f64 = 6. / 29.;
const EPS: f64 = EPS0 * EPS0 * EPS0 ;
const TWO_PI: f64 = 2. * PI;

impl Lch {
    // Components are in [0, 255]; they are normalized before the
    // conversion and scaled back in `to_rgb`.
    fn from_rgb(c: RGBA<f64>) -> Lch {
        const C0: f64 = 1. / 3.;
        const C1: f64 = 841. / 108.;
        const C2: f64 = 4. / 29.;
        let (r, g, b) = (c.r / 255., c.g / 255., c.b / 255.);
        let xr = 0.4522795 * r + 0.3993744 * g + 0.1483460 * b;
        let yr = 0.2225105 * r + 0.7168863 * g + 0.0606032 * b;
        let zr = 0.0168820 * r + 0.1176865 * g + 0.8654315 * b;
        let f = |v: f64| if v > EPS { v.powf(C0) } else { C1 * v + C2 };
        let (fx, fy, fz) = (f(xr), f(yr), f(zr));
        let l = 116. * fy - 16.;
        let a = 500. * (fx - fy);
        let b = 200. * (fy - fz);
        let h = { let h = b.atan2(a);
                  if h < 0. { h + TWO_PI } else { h } };
        Lch { l, c: a.hypot(b), h, a: c.a }
    }

    fn to_rgb(self) -> RGBA<f64> {
        const C0: f64 = 108. / 841.;
        const C1: f64 = 4. / 29.;
        let a = self.c * self.h.cos();
        let b =  self.c * self.h.sin();
        let fy = (self.l + 16.) / 116.;
        let fx = a / 500. + fy;
        let fz = fy - b / 200.;
        let f = |v: f64| if v > EPS0 { v * v * v } else { C0 * (v - C1) };
        let (fx1, fy1, fz1) = (f(fx), f(fy), f(fz));
        let r = 3.0215932  * fx1 - 1.6168777 * fy1 - 0.4047152 * fz1;
        let g = -0.9437222 * fx1 + 1.9161365 * fy1 + 0.0275856 * fz1;
        let b = 0.0693906  * fx1 - 0.2290271 * fy1 + 1.1596365 * fz1;
        let scale = |v: f64| (255. * v).clamp(0., 255.);
        RGBA { r: scale(r), g: scale(g), b: scale(b), a: self.a }
    }
}


/// Gradient between two colors.
///
/// Created by [`RGBColor::gradient`].  See the [`ColorRange`] trait
/// for methods.
pub struct Gradient<Color> {
    c0: Lch, // first color
    dc: Lch, // last - first color
    color: PhantomData<Color>,
}

impl<Color> Gradient<Color>
where Color: RGBColor {
    /// Returns the color corresponding to `t` ∈ \[0., 1.\] but does
    /// not check the later condition.
    #[inline]
    fn rgb_unchecked(&self, t: f64) -> Color {
        let lch = Lch { l: self.c0.l + t * self.dc.l,
              c: self.c0.c + t * self.dc.c,
              h: self.c0.h + t * self.dc.h,
              a: self.c0.a + t * self.dc.a };
        Color::from_rgba(lch.to_rgb())
    }
}

impl<Color> ColorRange<Color> for Gradient<Color>
where Color: RGBColor {
    /// Returns the color corresponding to `t` ∈ \[0., 1.\], where
    /// `t == 0.` returns the first color provided in the gradient and
    /// `t == 1.` the second.
    fn rgb(&self, t: f64) -> Color { self.rgb_unchecked(t.clamp(0., 1.)) }
}


/// An ordered list of colors used to render the raw or the
/// classified index.
#[derive(Clone, Copy)]
pub struct Palette<Color> {
    palette: &'static PaletteData,
    color: PhantomData<Color>,
}

impl<Color: RGBColor> Palette<Color> {
    fn new(palette: &'static PaletteData) -> Self {
        Self { palette, color: PhantomData }
    }
}

impl<Color> Palette<Color>
where Color: RGBColor {
    /// Returns the number of colors in the palette: 6 for the raw
    /// index, 7 for the classified one.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.palette.rgb.len() }

    /// Says whether the palette is `Seq`uential or `Div`ergent.
    pub fn typ(&self) -> PaletteType { self.palette.typ }

    /// Says whether the palette is colorblind safe.
    pub fn blind(&self) -> Trivalent { self.palette.blind }

    /// Returns the `i`-th color (from low to high index), if any.
    pub fn get(&self, i: usize) -> Option<Color> {
        self.palette.rgb.get(i).map(|&c| Color::from_rgba(c))
    }

    /// Returns the RGB colors of the palette.
    pub fn colors(&self) -> Vec<Color> {
        self.palette.rgb.iter().map(|&c| Color::from_rgba(c)).collect()
    }

    /// Returns the colors as `#rrggbb` strings, as expected by map
    /// visualization parameters.
    pub fn hex(&self) -> Vec<String> {
        self.palette.rgb.iter().map(|c| c.to_hex()).collect()
    }

    /// Returns a gradient constructed from the palette.
    pub fn gradient(&self) -> PaletteGradient<Color> {
        PaletteGradient {
            gradients: self.palette.rgb.windows(2)
                .map(|c| { let c0 = Color::from_rgba(c[0]);
                           let c1 = Color::from_rgba(c[1]);
                           c0.gradient(&c1) })
                .collect() }
    }
}

/// A gradient based on a [`Palette`].
pub struct PaletteGradient<Color> {
    gradients: Vec<Gradient<Color>>,
}

impl<Color> ColorRange<Color> for PaletteGradient<Color>
where Color: RGBColor {
    fn rgb(&self, t: f64) -> Color {
        let n = self.gradients.len();
        let tn = t.clamp(0., 1.) * n as f64;
        let i = tn.trunc() as usize;
        if i < n { self.gradients[i].rgb_unchecked(tn.fract()) }
        else { self.gradients[n-1].rgb_unchecked(1.) }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip_of_palette_colors() {
        for mode in PaletteMode::ALL {
            let pair = mode.palettes::<RGB8>();
            for hex in pair.continuous.hex().iter().chain(&pair.classified.hex()) {
                assert_eq!(&RGB8::from_hex(hex).unwrap().to_hex(), hex);
            }
        }
    }

    #[test]
    fn malformed_hex_is_rejected() {
        for s in ["", "#", "#12345", "#1234567", "#gg0000", "ff0000", "#+f0000"] {
            assert!(matches!(RGB8::from_hex(s), Err(Error::InvalidColor(_))),
                    "{s:?} accepted");
        }
    }

    #[test]
    fn gradient_hits_its_end_points() {
        let c0 = RGB8::new(165, 0, 38);
        let c1 = RGB8::new(0, 104, 55);
        let g = c0.gradient(&c1);
        assert_eq!(g.rgb(0.), c0);
        assert_eq!(g.rgb(1.), c1);
        // Out of range parameters are clamped.
        assert_eq!(g.rgb(-3.), c0);
        assert_eq!(g.rgb(7.), c1);
    }

    #[test]
    fn palette_gradient_passes_through_every_color() {
        let p = PaletteMode::Normal.palettes::<RGB8>().continuous;
        let g = p.gradient();
        let n = (p.len() - 1) as f64;
        for (i, c) in p.colors().into_iter().enumerate() {
            assert_eq!(g.rgb(i as f64 / n), c, "stop {i}");
        }
    }

    #[test]
    fn upload_to_map_and_legend() {
        let upload = r#"{"type": "FeatureCollection", "features": [
            {"type": "Feature", "properties": {}, "geometry": {"type": "Polygon",
             "coordinates": [[[5, 36], [6, 36], [6, 37], [5, 37], [5, 36]]]}}]}"#;
        let aoi = aoi::AreaOfInterest::from_uploads([upload]).unwrap();
        let config = query::AnalysisConfig::from_json(
            r#"{"initial_date": "2023-04-01", "updated_date": "2023-06-01",
                "palette_mode": "Acromatopsia"}"#).unwrap();
        assert_eq!(config.queries(&aoi).unwrap().len(), 2);

        let pair = config.palette_mode.palettes::<RGB8>();
        let mut view = layers::MapView::framed(&aoi);
        layers::plan_layers(&mut view, &config, &pair);
        assert_eq!(view.center, aoi::LonLat::new(5.5, 36.5));
        assert_eq!(view.layers.len(), 6);

        let classes = classify_masked(&[-0.1, 0.2, 0.9]).unwrap();
        let colors: Vec<_> = classes.iter().flatten()
            .map(|&c| pair.class_color(c).to_hex()).collect();
        assert_eq!(colors, ["#338796", "#290058"]);
        assert!(legend::classified_legend(&pair).contains("#338796"));
    }

    #[test]
    fn gray_has_equal_channels() {
        let c = RGB8::new(35, 132, 67).to_gray();
        assert_eq!(c.r, c.g);
        assert_eq!(c.g, c.b);
    }
}
