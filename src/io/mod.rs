//! IO module for format-specific reading and writing operations.
//!
//! # Format Modules
//!
//! - `csv` - observation input and the summary table output
//! - `shp` - Shapefile boundary input
//! - `geojson` - combined record export
//! - `svg` - choropleth map and pie chart rendering

pub(crate) mod csv;
pub(crate) mod geojson;
pub(crate) mod shp;
pub(crate) mod svg;
