//! Projection and path building for SVG output.

use geo::{Coord, CoordsIter, LineString, MultiPolygon, Rect};

/// Projection function: lon/lat -> SVG coords (x,y)
pub(crate) type Projection = dyn Fn(&Coord<f64>) -> (f64, f64);

/// Union of optional bounding rectangles.
pub(crate) fn union_bounds(rects: impl IntoIterator<Item = Option<Rect<f64>>>) -> Option<Rect<f64>> {
    rects.into_iter()
        .flatten()
        .reduce(|a, b| Rect::new(
            Coord { x: a.min().x.min(b.min().x), y: a.min().y.min(b.min().y) },
            Coord { x: a.max().x.max(b.max().x), y: a.max().y.max(b.max().y) },
        ))
}

/// Fit `bounds` into a canvas `width` pixels wide with `margin` on every side and
/// `top` extra pixels above. Returns the projection and the canvas height.
pub(crate) fn fit_projection(bounds: Rect<f64>, width: f64, margin: f64, top: f64) -> (Box<Projection>, f64) {
    // Degenerate extents (a single point or a line) still get a finite scale.
    let extent = bounds.width().max(bounds.height()).max(f64::EPSILON);
    let span_x = if bounds.width() > 0.0 { bounds.width() } else { extent };
    let scale = (width - 2.0 * margin) / span_x;
    let height = bounds.height() * scale + 2.0 * margin + top;

    // --- Map lon/lat -> SVG coords (preserve aspect, Y down) ---
    let project = move |coord: &Coord<f64>| -> (f64, f64) {
        let x = margin + (coord.x - bounds.min().x) * scale;
        let y = top + margin + (bounds.max().y - coord.y) * scale; // invert vertically
        (x, y)
    };

    (Box::new(project), height)
}

/// Build a compact SVG path string for a MultiPolygon (exteriors + holes).
pub(crate) fn multipolygon_to_path(shape: &MultiPolygon<f64>, project: &Projection) -> String {
    let mut out = String::new();

    for polygon in &shape.0 {
        out.push_str(&ring_to_path(polygon.exterior(), project));
        for interior in polygon.interiors() {
            out.push_str(&ring_to_path(interior, project));
        }
    }

    out
}

/// Build a compact SVG path string for a LineString (ring).
fn ring_to_path(ring: &LineString<f64>, project: &Projection) -> String {
    let mut out = String::new();

    let mut coords = ring.coords_iter()
        .map(|coord| project(&coord));
    if let Some((x, y)) = coords.next() {
        out.push_str(&format!(" M{x:.3},{y:.3}"));
        for (x, y) in coords {
            out.push_str(&format!(" L{x:.3},{y:.3}"));
        }
        out.push('Z');
    }

    out
}
