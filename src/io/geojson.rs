//! GeoJSON export of combined records.

use std::{fs::File, io::{BufWriter, Write}, path::Path};

use anyhow::{Context, Result};
use geo::MultiPolygon;
use serde_json::{json, Map, Value};

use crate::{io::csv::SUMMARY_HEADERS, types::CombinedRecord};

/// Property holding the region name, matching the boundary dataset's field.
pub(crate) const NAME_PROPERTY: &str = "st_nm";

/// Export combined records as a GeoJSON FeatureCollection, one feature per record.
/// Unmatched regions carry `null` aggregate properties.
pub(crate) fn to_geojson(records: &[CombinedRecord]) -> Value {
    let features = records.iter().enumerate()
        .map(|(i, record)| {
            let mut properties = Map::new();
            properties.insert(NAME_PROPERTY.to_string(), json!(record.region_name));
            properties.insert(SUMMARY_HEADERS[1].to_string(), json!(record.mean_drought_percentage));
            properties.insert(SUMMARY_HEADERS[2].to_string(), json!(record.dominant_crop_type));

            json!({
                "type": "Feature",
                "id": i,
                "geometry": multipolygon_to_geojson(&record.geometry),
                "properties": properties,
            })
        })
        .collect::<Vec<_>>();

    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

/// Write the FeatureCollection to `path`.
pub(crate) fn write_geojson(records: &[CombinedRecord], path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("[io::geojson] Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, &to_geojson(records))
        .with_context(|| format!("[io::geojson] Failed to write GeoJSON to {:?}", path))?;
    writer.flush()
        .with_context(|| format!("[io::geojson] Failed to flush {}", path.display()))
}

/// Convert a MultiPolygon to a GeoJSON geometry; empty shapes become `null`.
fn multipolygon_to_geojson(mp: &MultiPolygon<f64>) -> Value {
    if mp.0.is_empty() { return Value::Null }

    let polygons = mp.0.iter()
        .map(|polygon| {
            std::iter::once(polygon.exterior())
                .chain(polygon.interiors())
                .map(|ring| ring.coords().map(|c| [c.x, c.y]).collect::<Vec<_>>())
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    json!({
        "type": "MultiPolygon",
        "coordinates": polygons,
    })
}
