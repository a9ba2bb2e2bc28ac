use crate::geom::*;

fn square() -> Ring {
    vec![
        point(0.0, 0.0),
        point(4.0, 0.0),
        point(4.0, 4.0),
        point(0.0, 4.0),
    ]
}

/// U-shaped concave ring opening upward.
fn concave() -> Ring {
    vec![
        point(0.0, 0.0),
        point(6.0, 0.0),
        point(6.0, 4.0),
        point(4.0, 4.0),
        point(4.0, 1.0),
        point(2.0, 1.0),
        point(2.0, 4.0),
        point(0.0, 4.0),
    ]
}

/// Independent reference point-in-polygon (winding number), used to
/// cross-check the ray-casting implementation.
fn winding_number_inside(p: Point, ring: &[Point]) -> bool {
    let mut winding = 0i32;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let a = ring[j];
        let b = ring[i];
        let cross = (b.x - a.x) * (p.y - a.y) - (p.x - a.x) * (b.y - a.y);
        if a.y <= p.y {
            if b.y > p.y && cross > 0.0 {
                winding += 1;
            }
        } else if b.y <= p.y && cross < 0.0 {
            winding -= 1;
        }
        j = i;
    }
    winding != 0
}

/// Deterministic LCG so the sampled points are reproducible.
struct Lcg(u64);

impl Lcg {
    fn next_unit(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        ((self.0 >> 11) as f64) / ((1u64 << 53) as f64)
    }
}

#[test]
fn signed_area_square_ccw() {
    assert_eq!(ring_signed_area(&square()), 16.0);
}

#[test]
fn signed_area_flips_with_winding() {
    let mut ring = square();
    ring.reverse();
    assert_eq!(ring_signed_area(&ring), -16.0);
}

#[test]
fn degenerate_ring_has_zero_area() {
    let ring = vec![point(1.0, 1.0), point(2.0, 2.0), point(3.0, 3.0)];
    assert!(ring_signed_area(&ring).abs() < 1e-9);
}

#[test]
fn ring_from_coords_skips_non_finite() {
    let coords: Vec<Vec<f64>> = vec![
        vec![0.0, 0.0],
        vec![f64::NAN, 1.0],
        vec![4.0, 0.0],
        vec![4.0, f64::INFINITY],
        vec![4.0, 4.0],
        vec![0.0, 4.0],
        vec![0.0, 0.0], // explicit closing vertex must not be doubled
    ];
    let ring = ring_from_coords(coords.iter().map(Vec::as_slice)).unwrap();
    assert_eq!(ring.len(), 4);
    assert_eq!(ring, square());
}

#[test]
fn ring_from_coords_rejects_degenerate_input() {
    let coords: Vec<Vec<f64>> = vec![vec![0.0, 0.0], vec![1.0, f64::NAN], vec![1.0, 1.0]];
    assert!(ring_from_coords(coords.iter().map(Vec::as_slice)).is_none());
}

#[test]
fn point_in_ring_agrees_with_reference_on_random_samples() {
    for ring in [square(), concave()] {
        let bbox = ring_bbox(&ring).unwrap();
        let mut rng = Lcg(0x9E3779B97F4A7C15);
        let mut checked = 0usize;
        while checked < 1500 {
            let x = bbox.min.x - 1.0 + rng.next_unit() * (bbox.width() + 2.0);
            let y = bbox.min.y - 1.0 + rng.next_unit() * (bbox.height() + 2.0);
            let p = point(x, y);
            // Skip points sitting on the boundary; both implementations are
            // allowed to disagree there.
            if signed_boundary_distance(p, &ring).abs() < 1e-9 {
                continue;
            }
            assert_eq!(
                point_in_ring(p, &ring),
                winding_number_inside(p, &ring),
                "disagreement at ({x}, {y})"
            );
            checked += 1;
        }
    }
}

#[test]
fn point_in_ring_handles_horizontal_edges() {
    // Points vertically aligned with latitude-parallel edges must not be
    // systematically rejected.
    let ring = square();
    assert!(point_in_ring(point(2.0, 2.0), &ring));
    assert!(point_in_ring(point(2.0, 0.5), &ring));
    assert!(!point_in_ring(point(2.0, -0.5), &ring));
    assert!(!point_in_ring(point(5.0, 2.0), &ring));
}

#[test]
fn point_in_polygon_respects_holes() {
    let outer = square();
    let hole = vec![
        point(1.0, 1.0),
        point(3.0, 1.0),
        point(3.0, 3.0),
        point(1.0, 3.0),
    ];
    let polygon = vec![outer, hole];
    assert!(point_in_polygon(point(0.5, 0.5), &polygon));
    assert!(!point_in_polygon(point(2.0, 2.0), &polygon));
    assert!(!point_in_polygon(point(5.0, 5.0), &polygon));
}

#[test]
fn centroid_of_square_is_exact_center() {
    let c = ring_centroid(&square()).unwrap();
    assert_eq!((c.x, c.y), (2.0, 2.0));
}

#[test]
fn centroid_of_degenerate_ring_falls_back_to_bbox_center() {
    let ring = vec![point(1.0, 1.0), point(3.0, 3.0), point(5.0, 5.0)];
    let c = ring_centroid(&ring).unwrap();
    assert_eq!((c.x, c.y), (3.0, 3.0));
}

#[test]
fn visual_center_of_regular_polygon_is_near_true_center() {
    let n = 24;
    let ring: Ring = (0..n)
        .map(|i| {
            let a = (i as f64) / (n as f64) * std::f64::consts::TAU;
            point(10.0 + 3.0 * a.cos(), -5.0 + 3.0 * a.sin())
        })
        .collect();
    let vc = visual_center(&ring, 0.001).unwrap();
    assert!((vc.x - 10.0).abs() < 0.05, "x = {}", vc.x);
    assert!((vc.y + 5.0).abs() < 0.05, "y = {}", vc.y);
}

#[test]
fn visual_center_of_concave_ring_lies_inside() {
    let ring = concave();
    let vc = visual_center(&ring, 0.01).unwrap();
    assert!(point_in_ring(vc, &ring));
    // The plain centroid of this U-shape sits in the notch, outside the ring;
    // the visual center must not.
    assert!(signed_boundary_distance(vc, &ring) > 0.4);
}

#[test]
fn primary_outer_ring_picks_largest() {
    let small = vec![vec![
        point(10.0, 10.0),
        point(11.0, 10.0),
        point(11.0, 11.0),
        point(10.0, 11.0),
    ]];
    let big = vec![square()];
    let polygons = vec![small, big];
    let primary = primary_outer_ring(&polygons).unwrap();
    assert_eq!(ring_signed_area(primary), 16.0);
}
