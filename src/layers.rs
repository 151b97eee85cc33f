//! Map layers of an NDVI analysis.
//!
//! A [`MapView`] is a serializable description of what the map
//! renderer should display: its initial framing, base maps and the
//! overlays computed by the imagery service, each with its
//! visualization parameters.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;
use crate::aoi::{AreaOfInterest, LonLat};
use crate::query::AnalysisConfig;
use crate::{PalettePair, RGBColor};

pub const ATTRIBUTION: &str =
    "Map data &copy; <a href=\"https://earthengine.google.com/\">Google Earth Engine</a>";
pub const BASEMAPS: [&str; 2] = ["Open Street Map", "Dark Basemap"];
/// Center of the map when no area was uploaded.
pub const DEFAULT_CENTER: LonLat = LonLat { lon: 10.85, lat: 36.45 };
pub const DEFAULT_ZOOM: u8 = 4;
pub const AOI_ZOOM: u8 = 12;

/// Visualization parameters of an image layer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VisParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bands: Option<[&'static str; 3]>,
    pub min: f64,
    pub max: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gamma: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub palette: Option<Vec<String>>,
}

impl VisParams {
    /// Natural colors from the red, green and blue bands of the
    /// rescaled reflectance.
    pub fn true_color() -> Self {
        VisParams { bands: Some(["B4", "B3", "B2"]), min: 0., max: 1.,
                    gamma: Some(1.), palette: None }
    }

    /// Raw index stretched over \[0, 1\] with the continuous palette.
    pub fn raw_index<Color: RGBColor>(pair: &PalettePair<Color>) -> Self {
        VisParams { bands: None, min: 0., max: 1., gamma: None,
                    palette: Some(pair.continuous.hex()) }
    }

    /// Classes 1 to 7, one classified palette color each.
    pub fn classified<Color: RGBColor>(pair: &PalettePair<Color>) -> Self {
        VisParams { bands: None, min: 1., max: 7., gamma: None,
                    palette: Some(pair.classified.hex()) }
    }
}

/// Image computed by the imagery service for a layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    /// The median composite itself.
    TrueColor,
    /// NDVI of the composite, negative values masked.
    RawIndex,
    /// Classes of the masked NDVI.
    ClassifiedIndex,
}

/// Reference to an image: which query (see
/// [`AnalysisConfig::queries`]) and which product of it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct LayerSource {
    pub query: usize,
    pub kind: LayerKind,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MapLayer {
    pub name: String,
    pub source: LayerSource,
    pub vis: VisParams,
    pub attribution: &'static str,
    pub overlay: bool,
    pub control: bool,
}

/// The interactive map: framing, base maps and overlays (drawn in
/// order, last on top).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MapView {
    pub center: LonLat,
    pub zoom: u8,
    pub basemaps: Vec<&'static str>,
    pub layers: Vec<MapLayer>,
    pub layer_control_collapsed: bool,
}

impl MapView {
    /// Empty map centered on the area of interest, or on a default
    /// regional view when no area was uploaded.
    pub fn framed(aoi: &AreaOfInterest) -> Self {
        let (center, zoom) = match aoi.centroid() {
            Some(c) => (c, AOI_ZOOM),
            None => (DEFAULT_CENTER, DEFAULT_ZOOM),
        };
        MapView { center, zoom, basemaps: BASEMAPS.to_vec(),
                  layers: Vec::new(), layer_control_collapsed: true }
    }
}

/// Append an overlay to `view` and return it.
pub fn add_layer(view: &mut MapView, source: LayerSource, vis: VisParams,
                 name: impl Into<String>) -> &MapLayer {
    let layer = MapLayer { name: name.into(), source, vis,
                           attribution: ATTRIBUTION,
                           overlay: true, control: true };
    debug!(name = %layer.name, ?source, "layer added");
    view.layers.push(layer);
    &view.layers[view.layers.len() - 1]
}

fn kind_name(kind: LayerKind) -> &'static str {
    match kind {
        LayerKind::TrueColor => "Satellite Imagery",
        LayerKind::RawIndex => "Raw NDVI",
        LayerKind::ClassifiedIndex => "Reclassified NDVI",
    }
}

/// Add the overlays of an analysis to `view`.
///
/// For a single date: imagery, raw NDVI and classified NDVI.  When
/// two dates are compared, each kind of layer is added for the
/// initial then the updated date, names suffixed by the date.
pub fn plan_layers<Color: RGBColor>(view: &mut MapView, config: &AnalysisConfig,
                                    pair: &PalettePair<Color>) {
    let vis = |kind: LayerKind| match kind {
        LayerKind::TrueColor => VisParams::true_color(),
        LayerKind::RawIndex => VisParams::raw_index(pair),
        LayerKind::ClassifiedIndex => VisParams::classified(pair),
    };
    let kinds = [LayerKind::TrueColor, LayerKind::RawIndex,
                 LayerKind::ClassifiedIndex];
    if config.is_comparison() {
        let dates: [(&str, NaiveDate); 2] = [("Initial", config.initial_date),
                                             ("Updated", config.updated_date)];
        for kind in kinds {
            for (query, (when, date)) in dates.iter().enumerate() {
                let name = format!("{when} {}: {date}", kind_name(kind));
                add_layer(view, LayerSource { query, kind }, vis(kind), name);
            }
        }
    } else {
        for kind in kinds {
            add_layer(view, LayerSource { query: 0, kind }, vis(kind),
                      kind_name(kind));
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use rgb::RGB8;
    use crate::aoi::Polygon;
    use crate::PaletteMode;

    fn config(initial: (i32, u32, u32), updated: (i32, u32, u32)) -> AnalysisConfig {
        let day = |(y, m, d): (i32, u32, u32)| NaiveDate::from_ymd_opt(y, m, d).unwrap();
        AnalysisConfig { initial_date: day(initial), updated_date: day(updated),
                         ..AnalysisConfig::for_today(day(updated)) }
    }

    #[test]
    fn framing() {
        let view = MapView::framed(&AreaOfInterest::default());
        assert_eq!((view.center, view.zoom), (DEFAULT_CENTER, 4));
        let square = Polygon { rings: vec![vec![
            LonLat::new(1., 1.), LonLat::new(3., 1.),
            LonLat::new(3., 3.), LonLat::new(1., 3.)]] };
        let view = MapView::framed(&AreaOfInterest::new(vec![square]));
        assert_eq!((view.center, view.zoom), (LonLat::new(2., 2.), 12));
        assert_eq!(view.basemaps, BASEMAPS);
    }

    #[test]
    fn single_date_layers() {
        let pair = PaletteMode::Normal.palettes::<RGB8>();
        let mut view = MapView::framed(&AreaOfInterest::default());
        plan_layers(&mut view, &config((2023, 7, 1), (2023, 7, 1)), &pair);
        let names: Vec<_> = view.layers.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["Satellite Imagery", "Raw NDVI", "Reclassified NDVI"]);
        assert!(view.layers.iter().all(|l| l.source.query == 0));
        assert_eq!(view.layers[2].vis.palette.as_ref().unwrap().len(), 7);
        assert_eq!(view.layers[2].vis.min, 1.);
    }

    #[test]
    fn comparison_layers() {
        let pair = PaletteMode::Deuteranopia.palettes::<RGB8>();
        let mut view = MapView::framed(&AreaOfInterest::default());
        plan_layers(&mut view, &config((2023, 5, 1), (2023, 7, 1)), &pair);
        assert_eq!(view.layers.len(), 6);
        assert_eq!(view.layers[0].name, "Initial Satellite Imagery: 2023-05-01");
        assert_eq!(view.layers[1].name, "Updated Satellite Imagery: 2023-07-01");
        assert_eq!(view.layers[5].name, "Updated Reclassified NDVI: 2023-07-01");
        assert_eq!(view.layers[3].source,
                   LayerSource { query: 1, kind: LayerKind::RawIndex });
        assert_eq!(view.layers[3].vis.palette.as_ref().unwrap()[0], "#fffaa1");
    }

    #[test]
    fn vis_params_json() {
        let v = serde_json::to_value(VisParams::true_color()).unwrap();
        assert_eq!(v, serde_json::json!({"bands": ["B4", "B3", "B2"],
                                         "min": 0.0, "max": 1.0, "gamma": 1.0}));
    }

    #[test]
    fn add_layer_returns_it() {
        let mut view = MapView::framed(&AreaOfInterest::default());
        let source = LayerSource { query: 0, kind: LayerKind::TrueColor };
        let l = add_layer(&mut view, source, VisParams::true_color(), "x");
        assert_eq!(l.name, "x");
        assert!(l.overlay && l.control);
        assert_eq!(view.layers.len(), 1);
    }
}
