//! Ear-clipping triangulation for filled polygons.
//!
//! Output is a list of index triples into the caller's vertex list, so the
//! renderer can draw a fan without copying vertices. A closed ring whose last
//! vertex repeats the first is triangulated over the distinct vertices only.

#[cfg(test)]
#[path = "triangulate_test.rs"]
mod triangulate_test;

use crate::geom::Vec2;

/// Three indices into the triangulated vertex list.
pub type Triangle = [usize; 3];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TriangulateError {
    /// Fewer than three distinct vertices.
    #[error("triangulation needs at least 3 vertices, got {count}")]
    TooFewVertices { count: usize },
}

/// Triangulate a simple polygon by ear clipping.
///
/// Always yields `m - 2` triangles for `m` distinct vertices. When no valid
/// ear exists (self-intersecting or fully collinear input) the next vertex is
/// clipped anyway so the loop terminates.
///
/// # Errors
///
/// Returns [`TriangulateError::TooFewVertices`] for fewer than three distinct vertices.
pub fn triangulate(vertices: &[Vec2]) -> Result<Vec<Triangle>, TriangulateError> {
    let count = distinct_len(vertices);
    if count < 3 {
        return Err(TriangulateError::TooFewVertices { count });
    }

    let mut ring: Vec<usize> = (0..count).collect();
    if signed_area(vertices, &ring) < 0.0 {
        ring.reverse();
    }

    let mut triangles = Vec::with_capacity(count - 2);
    let mut cursor = 0;
    let mut misses = 0;

    while ring.len() > 3 {
        let len = ring.len();
        let prev = ring[(cursor + len - 1) % len];
        let curr = ring[cursor % len];
        let next = ring[(cursor + 1) % len];

        if misses >= len || is_ear(vertices, &ring, prev, curr, next) {
            triangles.push([prev, curr, next]);
            ring.remove(cursor % len);
            cursor %= ring.len();
            misses = 0;
        } else {
            cursor = (cursor + 1) % len;
            misses += 1;
        }
    }
    triangles.push([ring[0], ring[1], ring[2]]);

    Ok(triangles)
}

/// Vertex count ignoring an explicit closing duplicate of the first vertex.
fn distinct_len(vertices: &[Vec2]) -> usize {
    match (vertices.first(), vertices.last()) {
        (Some(first), Some(last)) if vertices.len() > 1 && first == last => vertices.len() - 1,
        _ => vertices.len(),
    }
}

/// Twice the signed area; positive for counter-clockwise rings.
fn signed_area(vertices: &[Vec2], ring: &[usize]) -> f64 {
    ring.iter()
        .zip(ring.iter().cycle().skip(1))
        .map(|(&a, &b)| vertices[a].cross(vertices[b]))
        .sum()
}

fn is_ear(vertices: &[Vec2], ring: &[usize], prev: usize, curr: usize, next: usize) -> bool {
    let a = vertices[prev];
    let b = vertices[curr];
    let c = vertices[next];
    if (b - a).cross(c - b) <= 0.0 {
        return false;
    }
    ring.iter()
        .filter(|&&i| i != prev && i != curr && i != next)
        .all(|&i| !contains(a, b, c, vertices[i]))
}

/// Whether `p` lies inside or on the counter-clockwise triangle `abc`.
fn contains(a: Vec2, b: Vec2, c: Vec2, p: Vec2) -> bool {
    (b - a).cross(p - a) >= 0.0 && (c - b).cross(p - b) >= 0.0 && (a - c).cross(p - c) >= 0.0
}
