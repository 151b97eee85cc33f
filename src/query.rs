//! Requests handed to the remote imagery service.
//!
//! The service builds a median composite of the Sentinel-2 surface
//! reflectance images of an [`AreaOfInterest`] over a short window of
//! days, keeping only images whose cloudy pixel percentage is below a
//! threshold, and computes the NDVI of the composite.  This module only
//! describes such requests; it performs no I/O.

use chrono::{Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use crate::aoi::AreaOfInterest;
use crate::{Error, PaletteMode, Result};

pub const COLLECTION: &str = "COPERNICUS/S2_SR";
pub const CLOUD_PROPERTY: &str = "CLOUDY_PIXEL_PERCENTAGE";
/// Surface reflectance is stored as integers scaled by this factor.
pub const REFLECTANCE_SCALE: f64 = 10_000.;
pub const NIR_BAND: &str = "B8";
pub const RED_BAND: &str = "B4";
/// Number of days of imagery gathered up to the selected date.
pub const DEFAULT_WINDOW_DAYS: u32 = 7;
/// Days between today and the default date, so that fresh imagery is
/// likely to be available.
pub const DEFAULT_DELAY_DAYS: u64 = 2;

/// Days `[start, end]` whose images are merged into a composite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// Window of `days` days ending at `end`.
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use ndvi_palette::query::DateWindow;
    /// let end = NaiveDate::from_ymd_opt(2023, 3, 2).unwrap();
    /// let w = DateWindow::ending(end, 7)?;
    /// assert_eq!(w.to_strings(), ("2023-02-23".to_string(), "2023-03-02".to_string()));
    /// # Ok::<(), ndvi_palette::Error>(())
    /// ```
    pub fn ending(end: NaiveDate, days: u32) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidParameter {
            name: "window_days", value: days.to_string(),
            reason: reason.to_string() };
        if days == 0 {
            return Err(invalid("must be at least 1"));
        }
        let start = end.checked_sub_days(Days::new(days.into()))
            .ok_or_else(|| invalid("window starts before the supported date range"))?;
        Ok(DateWindow { start, end })
    }

    /// Start and end formatted `YYYY-MM-DD`.
    pub fn to_strings(&self) -> (String, String) {
        (self.start.format("%Y-%m-%d").to_string(),
         self.end.format("%Y-%m-%d").to_string())
    }
}

/// Maximum percentage of cloudy pixels of the images kept: 5 to 100,
/// by steps of 5.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord,
         Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct CloudThreshold(u8);

impl CloudThreshold {
    pub fn new(percent: u8) -> Result<Self> {
        if (5 ..= 100).contains(&percent) && percent % 5 == 0 {
            Ok(CloudThreshold(percent))
        } else {
            Err(Error::InvalidParameter {
                name: "cloud_threshold", value: percent.to_string(),
                reason: "expected a multiple of 5 in 5..=100".to_string() })
        }
    }

    pub fn percent(self) -> u8 { self.0 }
}

impl Default for CloudThreshold {
    fn default() -> Self { CloudThreshold(85) }
}

impl TryFrom<u8> for CloudThreshold {
    type Error = Error;

    fn try_from(percent: u8) -> Result<Self> { CloudThreshold::new(percent) }
}

impl From<CloudThreshold> for u8 {
    fn from(c: CloudThreshold) -> u8 { c.0 }
}

/// A median composite request and the band maths applied to it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ImageryQuery {
    pub collection: &'static str,
    pub cloud_property: &'static str,
    pub cloud_threshold: CloudThreshold,
    pub window: DateWindow,
    /// GeoJSON geometry the images are filtered by and clipped to.
    pub aoi: Value,
    pub reflectance_scale: f64,
    pub nir_band: &'static str,
    pub red_band: &'static str,
}

impl ImageryQuery {
    pub fn new(aoi: &AreaOfInterest, window: DateWindow,
               cloud_threshold: CloudThreshold) -> Self {
        ImageryQuery {
            collection: COLLECTION,
            cloud_property: CLOUD_PROPERTY,
            cloud_threshold,
            window,
            aoi: aoi.to_geojson(),
            reflectance_scale: REFLECTANCE_SCALE,
            nir_band: NIR_BAND,
            red_band: RED_BAND,
        }
    }
}

/// User choices for one analysis.  Missing fields take their default:
/// both dates two days before today, 85% cloud threshold, a 7 days
/// window and normal color vision.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    pub initial_date: NaiveDate,
    pub updated_date: NaiveDate,
    pub cloud_threshold: CloudThreshold,
    pub window_days: u32,
    pub palette_mode: PaletteMode,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig::for_today(Local::now().date_naive())
    }
}

impl AnalysisConfig {
    /// Default configuration when the current day is `today`.
    pub fn for_today(today: NaiveDate) -> Self {
        let date = today.checked_sub_days(Days::new(DEFAULT_DELAY_DAYS))
            .unwrap_or(today);
        AnalysisConfig {
            initial_date: date,
            updated_date: date,
            cloud_threshold: CloudThreshold::default(),
            window_days: DEFAULT_WINDOW_DAYS,
            palette_mode: PaletteMode::Normal,
        }
    }

    /// Read a configuration from JSON, e.g.
    /// `{"updated_date": "2023-08-01", "palette_mode": "Protanopia"}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: AnalysisConfig = serde_json::from_str(json)?;
        // Reject unusable windows early.
        DateWindow::ending(config.initial_date, config.window_days)?;
        DateWindow::ending(config.updated_date, config.window_days)?;
        debug!(?config, "analysis configuration read");
        Ok(config)
    }

    /// Whether two different dates are compared.
    pub fn is_comparison(&self) -> bool {
        self.initial_date != self.updated_date
    }

    /// One query per distinct date: the initial one first.
    pub fn queries(&self, aoi: &AreaOfInterest) -> Result<Vec<ImageryQuery>> {
        let dates = if self.is_comparison() {
            vec![self.initial_date, self.updated_date]
        } else {
            vec![self.updated_date]
        };
        dates.into_iter()
            .map(|d| {
                let window = DateWindow::ending(d, self.window_days)?;
                Ok(ImageryQuery::new(aoi, window, self.cloud_threshold))
            })
            .collect()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn window_spans_given_days() {
        let w = DateWindow::ending(date(2024, 1, 3), 7).unwrap();
        assert_eq!(w.start, date(2023, 12, 27));
        assert_eq!(w.end, date(2024, 1, 3));
        assert!(DateWindow::ending(date(2024, 1, 3), 0).is_err());
    }

    #[test]
    fn cloud_threshold_steps() {
        assert_eq!(CloudThreshold::default().percent(), 85);
        assert!(CloudThreshold::new(5).is_ok());
        assert!(CloudThreshold::new(100).is_ok());
        for p in [0, 7, 105, 255] {
            assert!(CloudThreshold::new(p).is_err(), "{p}");
        }
    }

    #[test]
    fn defaults_from_today() {
        let c = AnalysisConfig::for_today(date(2024, 3, 1));
        assert_eq!(c.initial_date, date(2024, 2, 28));
        assert_eq!(c.updated_date, c.initial_date);
        assert!(!c.is_comparison());
        assert_eq!(c.window_days, 7);
    }

    #[test]
    fn config_from_json() {
        let c = AnalysisConfig::from_json(r#"{
            "initial_date": "2023-06-01", "updated_date": "2023-08-01",
            "cloud_threshold": 40, "palette_mode": "Tritanopia" }"#).unwrap();
        assert!(c.is_comparison());
        assert_eq!(c.cloud_threshold.percent(), 40);
        assert_eq!(c.palette_mode, PaletteMode::Tritanopia);
        assert_eq!(c.window_days, DEFAULT_WINDOW_DAYS);
    }

    #[test]
    fn invalid_configs() {
        for json in [r#"{"cloud_threshold": 42}"#,
                     r#"{"palette_mode": "Sepia"}"#,
                     r#"{"window_days": 0}"#,
                     r#"{"updated_date": "yesterday"}"#,
                     r#"{"colour": "red"}"#] {
            assert!(AnalysisConfig::from_json(json).is_err(), "{json}");
        }
    }

    #[test]
    fn one_query_per_date() {
        let aoi = AreaOfInterest::default();
        let mut c = AnalysisConfig::for_today(date(2023, 9, 10));
        let q = c.queries(&aoi).unwrap();
        assert_eq!(q.len(), 1);
        assert_eq!(q[0].window.end, date(2023, 9, 8));
        c.initial_date = date(2023, 5, 10);
        let q = c.queries(&aoi).unwrap();
        assert_eq!(q.len(), 2);
        assert_eq!(q[0].window.end, date(2023, 5, 10));
        assert_eq!(q[1].window.start, date(2023, 9, 1));
    }

    #[test]
    fn query_json() {
        let q = ImageryQuery::new(&AreaOfInterest::default(),
                                  DateWindow::ending(date(2023, 3, 2), 7).unwrap(),
                                  CloudThreshold::new(20).unwrap());
        let v = serde_json::to_value(&q).unwrap();
        assert_eq!(v["collection"], "COPERNICUS/S2_SR");
        assert_eq!(v["cloud_threshold"], 20);
        assert_eq!(v["window"]["start"], "2023-02-23");
        assert_eq!(v["aoi"]["type"], "Point");
        assert_eq!(v["nir_band"], "B8");
    }
}
