//! Shapefile reading for boundary polygons.

use std::path::{Path, PathBuf};

use geo::{Coord, LineString, MultiPolygon, Polygon};
use shapefile::{self as shp, dbase::{FieldValue, Record}, Reader, Shape};
use tracing::debug;
use walkdir::WalkDir;

use crate::{error::{DroughtError, DroughtResult}, types::RegionPolygon};

/// Default attribute naming each region in Indian state boundary datasets.
pub(crate) const DEFAULT_NAME_FIELD: &str = "st_nm";

/// Resolve `path` to a single `.shp` file. A directory must contain exactly one.
pub(crate) fn locate_shapefile(path: &Path) -> DroughtResult<PathBuf> {
    if path.is_file() {
        return Ok(path.to_path_buf());
    }
    if !path.is_dir() {
        return Err(DroughtError::geo_source(path, "no such file or directory"));
    }

    let mut found = WalkDir::new(path)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.into_path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("shp")))
        .collect::<Vec<_>>();
    found.sort();

    match found.len() {
        0 => Err(DroughtError::geo_source(path, "directory contains no .shp file")),
        1 => Ok(found.remove(0)),
        n => Err(DroughtError::geo_source(path, format!("directory contains {n} .shp files; expected one"))),
    }
}

/// Reads every region from the boundary dataset at `path` (a `.shp` or its directory).
/// Regions keep file order; null shapes become empty geometries.
pub(crate) fn read_polygons(path: &Path, name_field: &str) -> DroughtResult<Vec<RegionPolygon>> {
    let shp_path = locate_shapefile(path)?;
    let geo_err = |message: String| DroughtError::geo_source(&shp_path, message);

    let mut reader = Reader::from_path(&shp_path)
        .map_err(|e| geo_err(format!("[io::shp] failed to open shapefile: {e}")))?;

    let mut regions = Vec::with_capacity(reader.shape_count().unwrap_or(0));
    for (i, result) in reader.iter_shapes_and_records().enumerate() {
        let (shape, record) = result
            .map_err(|e| geo_err(format!("[io::shp] error reading shape+record {i}: {e}")))?;
        let name = region_name(&record, name_field).map_err(|msg| geo_err(format!("record {i}: {msg}")))?;
        let geometry = shape_to_multipolygon(shape).map_err(|msg| geo_err(format!("record {i} ({name}): {msg}")))?;
        regions.push(RegionPolygon::new(name, geometry));
    }

    debug!("[io::shp] read {} regions from {}", regions.len(), shp_path.display());
    Ok(regions)
}

/// Get the trimmed value of a character field from a Record.
fn region_name(record: &Record, field: &str) -> Result<String, String> {
    match record.get(field) {
        Some(FieldValue::Character(Some(s))) => Ok(s.trim().to_string()),
        Some(FieldValue::Memo(s)) => Ok(s.trim().to_string()),
        Some(FieldValue::Character(None)) => Err(format!("field {field:?} is null")),
        Some(other) => Err(format!("field {field:?} is not text: {other:?}")),
        None => {
            let available = record.clone().into_iter().map(|(name, _)| name).collect::<Vec<_>>();
            Err(format!("missing field {field:?}; available fields: {}", available.join(", ")))
        }
    }
}

/// Convert a polygon-like shape to geo::MultiPolygon<f64>.
fn shape_to_multipolygon(shape: Shape) -> Result<MultiPolygon<f64>, String> {
    match shape {
        Shape::NullShape => Ok(MultiPolygon(vec![])),
        Shape::Polygon(p) => Ok(rings_to_multipolygon(p.rings(), |pt| Coord { x: pt.x, y: pt.y })),
        Shape::PolygonM(p) => Ok(rings_to_multipolygon(p.rings(), |pt| Coord { x: pt.x, y: pt.y })),
        Shape::PolygonZ(p) => Ok(rings_to_multipolygon(p.rings(), |pt| Coord { x: pt.x, y: pt.y })),
        other => Err(format!("unsupported shape type {:?}", other.shapetype())),
    }
}

/// Group rings into polygons: each outer ring takes the inner rings that follow it
/// (Shapefile stores rings in this order).
fn rings_to_multipolygon<P>(rings: &[shp::PolygonRing<P>], xy: impl Fn(&P) -> Coord<f64>) -> MultiPolygon<f64> {
    /// Ensure first and last are the same for geo::LineString coords
    fn closed(mut coords: Vec<Coord<f64>>) -> LineString<f64> {
        if let (Some(&first), Some(&last)) = (coords.first(), coords.last()) {
            if first != last { coords.push(first) }
        }
        LineString(coords)
    }

    let mut polys: Vec<Polygon<f64>> = Vec::new();
    let mut exterior: Option<LineString<f64>> = None;
    let mut holes: Vec<LineString<f64>> = Vec::new();

    for ring in rings {
        let ls = closed(ring.points().iter().map(&xy).collect());
        match ring {
            shp::PolygonRing::Outer(_) => {
                if let Some(ext) = exterior.take() {
                    polys.push(Polygon::new(ext, std::mem::take(&mut holes)));
                }
                exterior = Some(ls);
            }
            // A hole with no preceding exterior is kept as its own polygon.
            shp::PolygonRing::Inner(_) if exterior.is_none() => polys.push(Polygon::new(ls, vec![])),
            shp::PolygonRing::Inner(_) => holes.push(ls),
        }
    }
    if let Some(ext) = exterior {
        polys.push(Polygon::new(ext, holes));
    }

    MultiPolygon(polys)
}
