//! Planar polygon primitives over longitude/latitude rings.
//!
//! All functions tolerate slightly malformed upstream boundary data: rings are
//! built through [`ring_from_coords`], which silently drops non-finite
//! coordinates instead of erroring, so rendering never aborts on a bad vertex.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

pub type Unit = euclid::UnknownUnit;

/// A longitude/latitude pair (x = lon, y = lat).
pub type Point = euclid::Point2D<f64, Unit>;
pub type Bounds = euclid::Box2D<f64, Unit>;

/// A linear ring. The closing vertex is implicit (last edge wraps to index 0).
pub type Ring = Vec<Point>;

/// Rings of one polygon: index 0 is the outer ring, the rest are holes.
pub type Polygon = Vec<Ring>;

pub fn point(x: f64, y: f64) -> Point {
    euclid::point2(x, y)
}

/// Builds a ring from raw positions, skipping non-finite coordinates.
///
/// Positions may carry extra dimensions (altitude); only the first two are
/// used. Returns `None` when fewer than 3 usable vertices survive.
pub fn ring_from_coords<'a, I>(coords: I) -> Option<Ring>
where
    I: IntoIterator<Item = &'a [f64]>,
{
    let mut ring = Ring::new();
    for pos in coords {
        let (Some(&x), Some(&y)) = (pos.first(), pos.get(1)) else {
            continue;
        };
        if !x.is_finite() || !y.is_finite() {
            continue;
        }
        ring.push(point(x, y));
    }
    // Drop an explicit closing vertex so edge iteration does not double it.
    if ring.len() >= 2 && ring.first() == ring.last() {
        ring.pop();
    }
    if ring.len() >= 3 { Some(ring) } else { None }
}

/// Shoelace signed area. Positive for counter-clockwise winding in a
/// y-up coordinate system; near-zero for degenerate rings.
pub fn ring_signed_area(ring: &[Point]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let a = ring[j];
        let b = ring[i];
        sum += a.x * b.y - b.x * a.y;
        j = i;
    }
    sum / 2.0
}

pub fn ring_bbox(ring: &[Point]) -> Option<Bounds> {
    let first = *ring.first()?;
    let mut bounds = Bounds::new(first, first);
    for p in &ring[1..] {
        bounds.min.x = bounds.min.x.min(p.x);
        bounds.min.y = bounds.min.y.min(p.y);
        bounds.max.x = bounds.max.x.max(p.x);
        bounds.max.y = bounds.max.y.max(p.y);
    }
    Some(bounds)
}

/// Ray-casting parity test.
///
/// Near-horizontal edges get an epsilon denominator instead of being skipped;
/// skipping them produces systematic false negatives along latitude-aligned
/// boundary segments, which are common in administrative data.
pub fn point_in_ring(p: Point, ring: &[Point]) -> bool {
    if ring.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let a = ring[i];
        let b = ring[j];
        if (a.y > p.y) != (b.y > p.y) {
            let mut dy = b.y - a.y;
            if dy.abs() < f64::EPSILON {
                dy = f64::EPSILON;
            }
            if p.x < (b.x - a.x) * (p.y - a.y) / dy + a.x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Inside the outer ring and inside none of the holes.
pub fn point_in_polygon(p: Point, polygon: &[Ring]) -> bool {
    let Some(outer) = polygon.first() else {
        return false;
    };
    if !point_in_ring(p, outer) {
        return false;
    }
    !polygon[1..].iter().any(|hole| point_in_ring(p, hole))
}

/// True when the point lies inside any polygon of a multipolygon.
pub fn point_in_polygons(p: Point, polygons: &[Polygon]) -> bool {
    polygons.iter().any(|poly| point_in_polygon(p, poly))
}

/// Shoelace-weighted centroid.
///
/// The centroid formula divides by the signed area, so for a near-zero-area
/// ring it falls back to the bounding-box center.
pub fn ring_centroid(ring: &[Point]) -> Option<Point> {
    let bbox = ring_bbox(ring)?;
    let area = ring_signed_area(ring);
    if area.abs() < 1e-12 {
        return Some(bbox.center());
    }
    let mut cx = 0.0;
    let mut cy = 0.0;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let a = ring[j];
        let b = ring[i];
        let cross = a.x * b.y - b.x * a.y;
        cx += (a.x + b.x) * cross;
        cy += (a.y + b.y) * cross;
        j = i;
    }
    let factor = 1.0 / (6.0 * area);
    Some(point(cx * factor, cy * factor))
}

fn dist_point_segment(p: Point, a: Point, b: Point) -> f64 {
    let mut x = a.x;
    let mut y = a.y;
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq > 0.0 {
        let t = ((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq;
        if t >= 1.0 {
            x = b.x;
            y = b.y;
        } else if t > 0.0 {
            x += dx * t;
            y += dy * t;
        }
    }
    ((p.x - x) * (p.x - x) + (p.y - y) * (p.y - y)).sqrt()
}

/// Signed distance from a point to the ring boundary: positive inside,
/// negative outside, magnitude = distance to the nearest edge.
pub fn signed_boundary_distance(p: Point, ring: &[Point]) -> f64 {
    let mut min_dist = f64::INFINITY;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        min_dist = min_dist.min(dist_point_segment(p, ring[i], ring[j]));
        j = i;
    }
    if point_in_ring(p, ring) {
        min_dist
    } else {
        -min_dist
    }
}

struct Cell {
    center: Point,
    half: f64,
    dist: f64,
}

impl Cell {
    fn new(center: Point, half: f64, ring: &[Point]) -> Self {
        Self {
            center,
            half,
            dist: signed_boundary_distance(center, ring),
        }
    }

    /// Upper bound on the distance any point inside the cell can reach.
    fn potential(&self) -> f64 {
        self.dist + self.half * std::f64::consts::SQRT_2
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.potential() == other.potential()
    }
}
impl Eq for Cell {}
impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Cell {
    fn cmp(&self, other: &Self) -> Ordering {
        self.potential().total_cmp(&other.potential())
    }
}

/// Grid-refinement "pole of inaccessibility" search.
///
/// Returns the point inside the ring maximizing distance to the nearest
/// boundary edge, within `precision`. For elongated or concave shapes the
/// plain centroid can fall outside the ring entirely; this anchor cannot.
pub fn visual_center(ring: &[Point], precision: f64) -> Option<Point> {
    let bbox = ring_bbox(ring)?;
    let size = bbox.size();
    let cell_size = size.width.min(size.height);
    if cell_size <= 0.0 {
        return Some(bbox.center());
    }
    let precision = if precision > 0.0 {
        precision
    } else {
        cell_size / 1000.0
    };

    // Seed with the centroid and the bbox center so trivial shapes converge
    // immediately.
    let mut best = Cell::new(ring_centroid(ring)?, 0.0, ring);
    let bbox_cell = Cell::new(bbox.center(), 0.0, ring);
    if bbox_cell.dist > best.dist {
        best = bbox_cell;
    }

    let mut queue: BinaryHeap<Cell> = BinaryHeap::new();
    let half = cell_size / 2.0;
    let mut x = bbox.min.x;
    while x < bbox.max.x {
        let mut y = bbox.min.y;
        while y < bbox.max.y {
            queue.push(Cell::new(point(x + half, y + half), half, ring));
            y += cell_size;
        }
        x += cell_size;
    }

    while let Some(cell) = queue.pop() {
        if cell.dist > best.dist {
            best = Cell {
                center: cell.center,
                half: 0.0,
                dist: cell.dist,
            };
        }
        // No point inside this cell can beat the current best by more than
        // `precision`; discard instead of subdividing.
        if cell.potential() - best.dist <= precision {
            continue;
        }
        let h = cell.half / 2.0;
        for (sx, sy) in [(-1.0, -1.0), (1.0, -1.0), (-1.0, 1.0), (1.0, 1.0)] {
            let center = point(cell.center.x + sx * h, cell.center.y + sy * h);
            queue.push(Cell::new(center, h, ring));
        }
    }

    Some(best.center)
}

/// The outer ring with the largest absolute area across all polygons.
///
/// Used as the representative ring for label anchoring and area thresholds on
/// multipolygon features (mainland vs. outlying islands).
pub fn primary_outer_ring(polygons: &[Polygon]) -> Option<&Ring> {
    polygons
        .iter()
        .filter_map(|poly| poly.first())
        .max_by(|a, b| {
            ring_signed_area(a)
                .abs()
                .total_cmp(&ring_signed_area(b).abs())
        })
}

/// Bounding box over every ring of every polygon.
pub fn polygons_bbox(polygons: &[Polygon]) -> Option<Bounds> {
    let mut bounds: Option<Bounds> = None;
    for poly in polygons {
        for ring in poly {
            let Some(rb) = ring_bbox(ring) else { continue };
            bounds = Some(match bounds {
                Some(b) => b.union(&rb),
                None => rb,
            });
        }
    }
    bounds
}
