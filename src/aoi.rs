//! Area of interest read from uploaded GeoJSON files.
//!
//! The area is opaque to the classification: it is only forwarded to
//! the imagery service (see [`crate::query`]) and used to frame the
//! initial map view through its [`centroid`](AreaOfInterest::centroid).

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};
use crate::Result;

/// Point used as the area when no polygon was uploaded.
pub const FALLBACK_POINT: LonLat = LonLat { lon: 27.98, lat: 36.13 };

/// Geographic position in degrees (WGS 84).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl LonLat {
    pub fn new(lon: f64, lat: f64) -> Self { LonLat { lon, lat } }
}

/// A polygon: the exterior ring followed by its holes.  Rings are
/// stored as given; the closing position may or may not repeat the
/// first one.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    pub rings: Vec<Vec<LonLat>>,
}

/// Polygons of all uploaded files.  Empty means that nothing usable
/// was uploaded and the area is [`FALLBACK_POINT`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AreaOfInterest {
    polygons: Vec<Polygon>,
}

// GeoJSON positions may carry an altitude, which is ignored.
type Position = Vec<f64>;

#[derive(Deserialize)]
#[serde(tag = "type", content = "coordinates")]
enum Geometry {
    Polygon(Vec<Vec<Position>>),
    MultiPolygon(Vec<Vec<Vec<Position>>>),
}

fn ring(positions: Vec<Position>) -> Result<Vec<LonLat>> {
    positions.into_iter()
        .map(|p| match p[..] {
            [lon, lat, ..] => Ok(LonLat { lon, lat }),
            _ => Err(<serde_json::Error as serde::de::Error>::custom(
                format!("position with {} coordinate(s)", p.len()))),
        })
        .collect::<std::result::Result<_, serde_json::Error>>()
        .map_err(Into::into)
}

fn polygon(rings: Vec<Vec<Position>>) -> Result<Polygon> {
    Ok(Polygon { rings: rings.into_iter().map(ring).collect::<Result<_>>()? })
}

/// Geometries listed by a GeoJSON object: the geometries of its
/// `features`, or else its `geometries`.
fn geometries(upload: &Value) -> Option<Vec<&Value>> {
    if let Some(features) = upload.get("features").and_then(Value::as_array) {
        Some(features.iter().filter_map(|f| f.get("geometry")).collect())
    } else {
        upload.get("geometries").and_then(Value::as_array)
            .map(|g| g.iter().collect())
    }
}

impl AreaOfInterest {
    pub fn new(polygons: Vec<Polygon>) -> Self { AreaOfInterest { polygons } }

    /// Read the polygons of the uploaded GeoJSON documents.
    ///
    /// Polygons come from `features[*].geometry` or, when there are
    /// no features, from `geometries[*]`.  Documents with neither
    /// list and geometries other than `Polygon` and `MultiPolygon` are
    /// skipped.
    ///
    /// # Errors
    /// An upload that is not JSON, or a polygon with malformed
    /// coordinates.
    ///
    /// ```
    /// use ndvi_palette::aoi::{AreaOfInterest, LonLat};
    /// let square = br#"{"type": "FeatureCollection", "features": [
    ///   {"type": "Feature", "properties": {}, "geometry": {"type": "Polygon",
    ///    "coordinates": [[[0, 0], [2, 0], [2, 2], [0, 2], [0, 0]]]}}]}"#;
    /// let aoi = AreaOfInterest::from_uploads([&square[..]])?;
    /// assert_eq!(aoi.centroid(), Some(LonLat::new(1., 1.)));
    /// # Ok::<(), ndvi_palette::Error>(())
    /// ```
    pub fn from_uploads<I, B>(uploads: I) -> Result<Self>
    where I: IntoIterator<Item = B>, B: AsRef<[u8]> {
        let mut polygons = Vec::new();
        for (n, upload) in uploads.into_iter().enumerate() {
            let doc: Value = serde_json::from_slice(upload.as_ref())?;
            let Some(geoms) = geometries(&doc) else {
                warn!(upload = n, "no features nor geometries, skipped");
                continue;
            };
            for geom in geoms {
                if geom.get("coordinates").is_none() { continue }
                let kind = geom.get("type").and_then(Value::as_str);
                if !matches!(kind, Some("Polygon" | "MultiPolygon")) {
                    debug!(upload = n, kind, "geometry skipped");
                    continue;
                }
                match Geometry::deserialize(geom)? {
                    Geometry::Polygon(rings) => polygons.push(polygon(rings)?),
                    Geometry::MultiPolygon(parts) => {
                        for rings in parts { polygons.push(polygon(rings)?) }
                    }
                }
            }
        }
        if polygons.is_empty() {
            warn!("no polygon uploaded, using fallback point");
        } else {
            debug!(polygons = polygons.len(), "area of interest read");
        }
        Ok(AreaOfInterest { polygons })
    }

    pub fn polygons(&self) -> &[Polygon] { &self.polygons }

    /// Whether no polygon was uploaded (the area is then the
    /// [`FALLBACK_POINT`]).
    pub fn is_fallback(&self) -> bool { self.polygons.is_empty() }

    /// Area-weighted centroid of all polygons, holes excluded.
    /// `None` for the fallback point, in which case the map keeps its
    /// default framing.
    pub fn centroid(&self) -> Option<LonLat> {
        if self.polygons.is_empty() { return None }
        let (mut area, mut mx, mut my) = (0., 0., 0.);
        for p in &self.polygons {
            for (i, r) in p.rings.iter().enumerate() {
                let (a, cx, cy) = ring_moments(r);
                // Exterior ring adds, holes subtract, whatever the
                // orientation of the rings.
                let w = if i == 0 { a.abs() } else { -a.abs() };
                if a != 0. {
                    area += w;
                    mx += w * cx;
                    my += w * cy;
                }
            }
        }
        if area.abs() > f64::EPSILON {
            return Some(LonLat { lon: mx / area, lat: my / area });
        }
        // Degenerate geometry: mean of the vertices.
        let vertices: Vec<&LonLat> = self.polygons.iter()
            .flat_map(|p| p.rings.iter().flatten())
            .collect();
        if vertices.is_empty() { return None }
        let n = vertices.len() as f64;
        Some(LonLat { lon: vertices.iter().map(|v| v.lon).sum::<f64>() / n,
                      lat: vertices.iter().map(|v| v.lat).sum::<f64>() / n })
    }

    /// GeoJSON geometry sent to the imagery service: a `MultiPolygon`
    /// of all polygons, or the fallback `Point`.
    pub fn to_geojson(&self) -> Value {
        if self.polygons.is_empty() {
            return json!({ "type": "Point",
                           "coordinates": [FALLBACK_POINT.lon, FALLBACK_POINT.lat] });
        }
        let coordinates: Vec<Vec<Vec<[f64; 2]>>> = self.polygons.iter()
            .map(|p| p.rings.iter()
                 .map(|r| r.iter().map(|v| [v.lon, v.lat]).collect())
                 .collect())
            .collect();
        json!({ "type": "MultiPolygon", "coordinates": coordinates })
    }
}

/// Signed area and centroid of a ring (shoelace formula).  The
/// centroid is meaningless when the area is 0.
fn ring_moments(r: &[LonLat]) -> (f64, f64, f64) {
    let n = r.len();
    if n < 3 { return (0., 0., 0.) }
    let (mut a, mut cx, mut cy) = (0., 0., 0.);
    for i in 0 .. n {
        let p = r[i];
        let q = r[(i + 1) % n];
        let cross = p.lon * q.lat - q.lon * p.lat;
        a += cross;
        cx += (p.lon + q.lon) * cross;
        cy += (p.lat + q.lat) * cross;
    }
    a /= 2.;
    if a == 0. { return (0., 0., 0.) }
    (a, cx / (6. * a), cy / (6. * a))
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn feature_collection(geometry: &str) -> String {
        format!(r#"{{"type": "FeatureCollection", "features": [
                    {{"type": "Feature", "properties": {{}},
                      "geometry": {geometry}}}]}}"#)
    }

    const SQUARE: &str = r#"{"type": "Polygon",
        "coordinates": [[[10, 20], [12, 20], [12, 22], [10, 22], [10, 20]]]}"#;

    #[test]
    fn polygon_feature() {
        let aoi = AreaOfInterest::from_uploads([feature_collection(SQUARE)]).unwrap();
        assert_eq!(aoi.polygons().len(), 1);
        assert!(!aoi.is_fallback());
        assert_eq!(aoi.centroid(), Some(LonLat::new(11., 21.)));
    }

    #[test]
    fn geometry_collection() {
        let doc = format!(r#"{{"type": "GeometryCollection",
                               "geometries": [{SQUARE}]}}"#);
        let aoi = AreaOfInterest::from_uploads([doc]).unwrap();
        assert_eq!(aoi.polygons().len(), 1);
    }

    #[test]
    fn multipolygon_and_several_files() {
        let multi = r#"{"type": "MultiPolygon", "coordinates": [
            [[[0, 0], [1, 0], [1, 1], [0, 1]]],
            [[[3, 0], [4, 0], [4, 1], [3, 1]]]]}"#;
        let aoi = AreaOfInterest::from_uploads(
            [feature_collection(multi), feature_collection(SQUARE)]).unwrap();
        assert_eq!(aoi.polygons().len(), 3);
        // Areas 1, 1 and 4.
        let c = aoi.centroid().unwrap();
        assert!((c.lon - (0.5 + 3.5 + 4. * 11.) / 6.).abs() < 1e-12);
        assert!((c.lat - (0.5 + 0.5 + 4. * 21.) / 6.).abs() < 1e-12);
    }

    #[test]
    fn hole_moves_centroid() {
        // 4x4 square with a 2x2 hole in its right half, reversed orientation.
        let doc = feature_collection(r#"{"type": "Polygon", "coordinates": [
            [[0, 0], [4, 0], [4, 4], [0, 4], [0, 0]],
            [[2, 1], [2, 3], [4, 3], [4, 1], [2, 1]]]}"#);
        let c = AreaOfInterest::from_uploads([doc]).unwrap().centroid().unwrap();
        // (16 * 2 - 4 * 3) / 12
        assert!((c.lon - 20. / 12.).abs() < 1e-12);
        assert!((c.lat - 2.).abs() < 1e-12);
    }

    #[test]
    fn altitude_is_ignored() {
        let doc = feature_collection(r#"{"type": "Polygon", "coordinates": [
            [[0, 0, 5], [2, 0, 5], [2, 2, 5], [0, 2, 5]]]}"#);
        let aoi = AreaOfInterest::from_uploads([doc]).unwrap();
        assert_eq!(aoi.centroid(), Some(LonLat::new(1., 1.)));
    }

    #[test]
    fn other_geometries_are_skipped() {
        let point = feature_collection(r#"{"type": "Point", "coordinates": [1, 2]}"#);
        let no_list = r#"{"type": "Feature", "geometry": null}"#.to_string();
        let aoi = AreaOfInterest::from_uploads([point, no_list]).unwrap();
        assert!(aoi.is_fallback());
        assert_eq!(aoi.centroid(), None);
        assert_eq!(aoi.to_geojson(),
                   json!({"type": "Point", "coordinates": [27.98, 36.13]}));
    }

    #[test]
    fn no_upload_is_fallback() {
        let aoi = AreaOfInterest::from_uploads(Vec::<Vec<u8>>::new()).unwrap();
        assert!(aoi.is_fallback());
    }

    #[test]
    fn invalid_uploads_are_errors() {
        let r = AreaOfInterest::from_uploads(["{not json"]);
        assert!(matches!(r, Err(Error::Json(_))));
        let short = feature_collection(r#"{"type": "Polygon", "coordinates": [[[0], [1, 1], [1, 0]]]}"#);
        assert!(AreaOfInterest::from_uploads([short]).is_err());
    }

    #[test]
    fn degenerate_polygon_uses_vertex_mean() {
        let aoi = AreaOfInterest::new(vec![Polygon { rings: vec![vec![
            LonLat::new(0., 0.), LonLat::new(2., 2.), LonLat::new(4., 4.)]] }]);
        assert_eq!(aoi.centroid(), Some(LonLat::new(2., 2.)));
    }

    #[test]
    fn geojson_output() {
        let aoi = AreaOfInterest::from_uploads([feature_collection(SQUARE)]).unwrap();
        let g = aoi.to_geojson();
        assert_eq!(g["type"], "MultiPolygon");
        assert_eq!(g["coordinates"][0][0][1], json!([12., 20.]));
    }
}
