//! SVG rendering of the choropleth map and the pie chart.

mod choropleth;
mod color;
mod geometry;
mod pie;
mod writer;

pub(crate) use choropleth::*;
pub(crate) use color::*;
pub(crate) use geometry::*;
pub(crate) use pie::*;
pub(crate) use writer::*;
