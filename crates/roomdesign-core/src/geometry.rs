//! Segment geometry used for hit-testing.

use kurbo::Point;

/// Euclidean distance from `point` to the closest point on the segment `a`-`b`.
///
/// The projection onto the segment's line is clamped to `[0, 1]`, so points
/// beyond an endpoint measure to that endpoint. A degenerate segment measures
/// to `a`.
pub fn distance_to_segment(point: Point, a: Point, b: Point) -> f64 {
    point.distance(closest_point_on_segment(point, a, b))
}

/// Closest point on the segment `a`-`b` to `point`.
pub fn closest_point_on_segment(point: Point, a: Point, b: Point) -> Point {
    let ab = b - a;
    let len_sq = ab.hypot2();
    if len_sq == 0.0 {
        return a;
    }
    let t = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

/// Point at parameter `t` along `a`-`b` (not clamped).
pub fn point_along(a: Point, b: Point, t: f64) -> Point {
    a.lerp(b, t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_on_segment_has_zero_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(100.0, 50.0);
        for t in [0.0, 0.25, 0.5, 1.0] {
            let p = point_along(a, b, t);
            assert!(distance_to_segment(p, a, b) < 1e-9);
        }
    }

    #[test]
    fn test_perpendicular_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(100.0, 0.0);
        assert!((distance_to_segment(Point::new(40.0, 7.0), a, b) - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_beyond_endpoint_clamps() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(100.0, 0.0);
        let p = Point::new(130.0, 40.0);
        assert!((distance_to_segment(p, a, b) - p.distance(b)).abs() < 1e-9);
        assert!((distance_to_segment(p, a, b) - 50.0).abs() < 1e-9);

        let before = Point::new(-3.0, -4.0);
        assert!((distance_to_segment(before, a, b) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_segment() {
        let a = Point::new(10.0, 10.0);
        assert!((distance_to_segment(Point::new(13.0, 14.0), a, a) - 5.0).abs() < 1e-9);
    }
}
