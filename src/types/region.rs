use geo::{BoundingRect, Centroid, MultiPolygon, Point, Rect};

/// A named boundary polygon loaded from the geographic source.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionPolygon {
    pub region_name: String,
    pub geometry: MultiPolygon<f64>, // Empty for null shapes
}

impl RegionPolygon {
    pub fn new(region_name: impl Into<String>, geometry: MultiPolygon<f64>) -> Self {
        Self { region_name: region_name.into(), geometry }
    }
}

/// A polygon with the aggregate fields of its matching state, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedRecord {
    pub region_name: String,
    pub geometry: MultiPolygon<f64>,
    pub mean_drought_percentage: Option<f64>,
    pub dominant_crop_type: Option<String>,
}

impl CombinedRecord {
    /// True when a summary was joined onto this polygon.
    pub fn is_matched(&self) -> bool { self.mean_drought_percentage.is_some() }

    /// Label anchor for annotations, `None` for empty geometry.
    pub fn centroid(&self) -> Option<Point<f64>> { self.geometry.centroid() }

    pub fn bounds(&self) -> Option<Rect<f64>> { self.geometry.bounding_rect() }

    /// Percentage annotation with two decimals, omitted when unmatched.
    pub fn percentage_label(&self) -> Option<String> {
        self.mean_drought_percentage.map(|value| format!("{value:.2}%"))
    }
}

#[cfg(test)]
mod tests {
    use geo::{polygon, MultiPolygon};

    use super::CombinedRecord;

    fn square() -> MultiPolygon<f64> {
        MultiPolygon(vec![polygon![(x: 0.0, y: 0.0), (x: 2.0, y: 0.0), (x: 2.0, y: 2.0), (x: 0.0, y: 2.0)]])
    }

    #[test]
    fn label_has_two_decimals() {
        let record = CombinedRecord {
            region_name: "Kerala".into(),
            geometry: square(),
            mean_drought_percentage: Some(33.3333),
            dominant_crop_type: Some("Rice".into()),
        };
        assert_eq!(record.percentage_label().as_deref(), Some("33.33%"));
        assert!(record.is_matched());
    }

    #[test]
    fn unmatched_has_no_label() {
        let record = CombinedRecord {
            region_name: "Goa".into(),
            geometry: square(),
            mean_drought_percentage: None,
            dominant_crop_type: None,
        };
        assert_eq!(record.percentage_label(), None);
        assert!(!record.is_matched());
    }

    #[test]
    fn centroid_of_square() {
        let record = CombinedRecord {
            region_name: "Goa".into(),
            geometry: square(),
            mean_drought_percentage: None,
            dominant_crop_type: None,
        };
        let c = record.centroid().unwrap();
        assert!((c.x() - 1.0).abs() < 1e-12 && (c.y() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn empty_geometry_has_no_centroid() {
        let record = CombinedRecord {
            region_name: "Nowhere".into(),
            geometry: MultiPolygon(vec![]),
            mean_drought_percentage: Some(1.0),
            dominant_crop_type: None,
        };
        assert!(record.centroid().is_none());
        assert!(record.bounds().is_none());
    }
}
