// Copyright 2025 the Brushwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection polygon with the containment and overlap tests the quadtree
//! query needs.
//!
//! The polygon is a plain vertex list in float pixel space. Point containment
//! uses the even-odd crossing rule; the rectangle tests are exact so that the
//! query's pruning never produces a false negative and its fast-accept never
//! produces a false positive.

use alloc::vec::Vec;

use kurbo::{Point, Rect, Vec2};

/// A closed polygon given by its vertex list.
///
/// Vertices are pixel-space points; the closing edge from the last vertex
/// back to the first is implicit. Polygons with fewer than three vertices
/// contain nothing and overlap nothing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    points: Vec<Point>,
    /// Cached vertex bounds; queries consult this once per visited node.
    bounds: Rect,
}

impl Polygon {
    /// Create a polygon from a vertex list.
    pub fn new(points: Vec<Point>) -> Self {
        let bounds = vertex_bounds(&points);
        Self { points, bounds }
    }

    /// The vertex list.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the polygon has no vertices.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Translate every vertex by `delta`.
    pub fn translate(&mut self, delta: Vec2) {
        for p in &mut self.points {
            *p += delta;
        }
        self.bounds = self.bounds + delta;
    }

    /// The axis-aligned bounding box of the vertices.
    ///
    /// Returns [`Rect::ZERO`] for an empty polygon.
    pub fn bounding_box(&self) -> Rect {
        self.bounds
    }

    /// Whether `p` is inside the polygon, by the even-odd crossing rule.
    pub fn contains(&self, p: Point) -> bool {
        let n = self.points.len();
        if n < 3 {
            return false;
        }
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[j];
            // Half-open vertical range so a vertex is counted by one edge only.
            if (a.y > p.y) != (b.y > p.y) {
                let x_cross = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
                if p.x < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    /// Whether the polygon's shape overlaps `rect` at all.
    ///
    /// This never returns `false` for an actual overlap, so it is safe to
    /// prune subtrees with it.
    pub fn intersects_rect(&self, rect: Rect) -> bool {
        if self.points.len() < 3 {
            return false;
        }
        let bb = self.bounding_box();
        if bb.x1 < rect.x0 || bb.x0 > rect.x1 || bb.y1 < rect.y0 || bb.y0 > rect.y1 {
            return false;
        }
        if self.points.iter().any(|p| rect_contains(rect, *p)) {
            return true;
        }
        if corners(rect).iter().any(|c| self.contains(*c)) {
            return true;
        }
        self.any_edge_crosses(rect)
    }

    /// Whether the polygon fully contains `rect`.
    ///
    /// Exact up to boundary contact: a rectangle touched or crossed by a
    /// polygon edge is reported as not contained, which makes callers fall
    /// back to per-point tests rather than over-accepting.
    pub fn contains_rect(&self, rect: Rect) -> bool {
        if self.points.len() < 3 {
            return false;
        }
        corners(rect).iter().all(|c| self.contains(*c)) && !self.any_edge_crosses(rect)
    }

    /// Whether any polygon edge meets any edge of `rect`.
    fn any_edge_crosses(&self, rect: Rect) -> bool {
        let c = corners(rect);
        let rect_edges = [(c[0], c[1]), (c[1], c[2]), (c[2], c[3]), (c[3], c[0])];
        let n = self.points.len();
        let mut j = n - 1;
        for i in 0..n {
            let (a, b) = (self.points[j], self.points[i]);
            if rect_edges
                .iter()
                .any(|&(c0, c1)| segments_meet(a, b, c0, c1))
            {
                return true;
            }
            j = i;
        }
        false
    }
}

impl FromIterator<Point> for Polygon {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Bounds of a vertex list; [`Rect::ZERO`] when empty.
fn vertex_bounds(points: &[Point]) -> Rect {
    let Some(first) = points.first() else {
        return Rect::ZERO;
    };
    let mut bb = Rect::new(first.x, first.y, first.x, first.y);
    for p in &points[1..] {
        bb.x0 = bb.x0.min(p.x);
        bb.y0 = bb.y0.min(p.y);
        bb.x1 = bb.x1.max(p.x);
        bb.y1 = bb.y1.max(p.y);
    }
    bb
}

/// Corner points of a rectangle, clockwise from the top-left.
fn corners(r: Rect) -> [Point; 4] {
    [
        Point::new(r.x0, r.y0),
        Point::new(r.x1, r.y0),
        Point::new(r.x1, r.y1),
        Point::new(r.x0, r.y1),
    ]
}

/// Inclusive-boundary point-in-rect test.
fn rect_contains(r: Rect, p: Point) -> bool {
    p.x >= r.x0 && p.x <= r.x1 && p.y >= r.y0 && p.y <= r.y1
}

/// Signed area of the triangle `(a, b, c)`; sign gives orientation.
fn orient(a: Point, b: Point, c: Point) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Whether the collinear point `c` lies within the closed span of `a`-`b`.
fn on_segment(a: Point, b: Point, c: Point) -> bool {
    c.x >= a.x.min(b.x) && c.x <= a.x.max(b.x) && c.y >= a.y.min(b.y) && c.y <= a.y.max(b.y)
}

/// Whether segments `a`-`b` and `c`-`d` intersect, touching included.
fn segments_meet(a: Point, b: Point, c: Point, d: Point) -> bool {
    let d1 = orient(c, d, a);
    let d2 = orient(c, d, b);
    let d3 = orient(a, b, c);
    let d4 = orient(a, b, d);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    (d1 == 0.0 && on_segment(c, d, a))
        || (d2 == 0.0 && on_segment(c, d, b))
        || (d3 == 0.0 && on_segment(a, b, c))
        || (d4 == 0.0 && on_segment(a, b, d))
}
