//! Geometry module - exact grid rotation and free-angle hitbox rotation
//!
//! Grid rotation works on integer offsets and never touches floating point,
//! since its results index board cells. Hitbox rotation is a separate
//! rigid-body utility for rectangles turned by an arbitrary angle.

use serde::{Deserialize, Serialize};

use crate::types::Rotation;

/// Offset of a single cell relative to the piece pivot
pub type CellOffset = (i8, i8);

/// Rotate a relative offset about the origin by a quarter-turn multiple.
///
/// With rows growing downward, 90° is a clockwise turn on screen:
/// (dx, dy) -> (-dy, dx).
#[inline]
pub fn rotate_offset((dx, dy): CellOffset, rotation: Rotation) -> CellOffset {
    match rotation {
        Rotation::Deg0 => (dx, dy),
        Rotation::Deg90 => (-dy, dx),
        Rotation::Deg180 => (-dx, -dy),
        Rotation::Deg270 => (dy, -dx),
    }
}

/// A point in continuous 2D space (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Offset of length `distance` in direction `angle_degrees`.
pub fn length_dir(distance: f64, angle_degrees: f64) -> Point {
    let radians = angle_degrees.to_radians();
    Point::new(radians.cos() * distance, radians.sin() * distance)
}

/// Distance from a rectangle's center to any of its corners.
pub fn half_diagonal(width: f64, height: f64) -> f64 {
    ((width / 2.0).powi(2) + (height / 2.0).powi(2)).sqrt()
}

/// Angle (degrees) between the horizontal axis and the center-to-corner line.
pub fn corner_base_angle(width: f64, height: f64) -> f64 {
    (height / width).atan().to_degrees()
}

/// Corners of a `width` x `height` rectangle centered on `center` and turned
/// by `angle_degrees`.
///
/// Corner order is top-left, top-right, bottom-right, bottom-left (as seen at
/// angle 0).
pub fn rotate_rect_hitbox(center: Point, width: f64, height: f64, angle_degrees: f64) -> [Point; 4] {
    let dist = half_diagonal(width, height);
    let base = corner_base_angle(width, height);

    let corner_angles = [180.0 + base, 360.0 - base, base, 180.0 - base];
    corner_angles.map(|corner| {
        let offset = length_dir(dist, corner + angle_degrees);
        Point::new(center.x + offset.x, center.y + offset.y)
    })
}

/// Recover the center of a rotated hitbox from its first (top-left) corner,
/// rounded to the nearest integer coordinate.
pub fn hitbox_center(top_left: Point, width: f64, height: f64, angle_degrees: f64) -> (i64, i64) {
    let offset = length_dir(
        half_diagonal(width, height),
        corner_base_angle(width, height) + angle_degrees,
    );
    (
        (top_left.x + offset.x).round() as i64,
        (top_left.y + offset.y).round() as i64,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_close(a: Point, b: Point) {
        assert!(
            (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS,
            "{:?} != {:?}",
            a,
            b
        );
    }

    #[test]
    fn test_rotate_offset_quarter_turns() {
        assert_eq!(rotate_offset((1, 2), Rotation::Deg0), (1, 2));
        assert_eq!(rotate_offset((1, 2), Rotation::Deg90), (-2, 1));
        assert_eq!(rotate_offset((1, 2), Rotation::Deg180), (-1, -2));
        assert_eq!(rotate_offset((1, 2), Rotation::Deg270), (2, -1));
    }

    #[test]
    fn test_rotate_offset_four_times_is_identity() {
        for offset in [(0, 0), (1, 0), (0, -2), (-1, -1), (3, 1)] {
            let mut o = offset;
            for _ in 0..4 {
                o = rotate_offset(o, Rotation::Deg90);
            }
            assert_eq!(o, offset);
        }
    }

    #[test]
    fn test_unrotated_hitbox_is_axis_aligned() {
        let corners = rotate_rect_hitbox(Point::new(10.0, 20.0), 4.0, 2.0, 0.0);
        assert_close(corners[0], Point::new(8.0, 19.0));
        assert_close(corners[1], Point::new(12.0, 19.0));
        assert_close(corners[2], Point::new(12.0, 21.0));
        assert_close(corners[3], Point::new(8.0, 21.0));
    }

    #[test]
    fn test_square_hitbox_quarter_turn_permutes_corners() {
        let center = Point::new(0.0, 0.0);
        let base = rotate_rect_hitbox(center, 2.0, 2.0, 0.0);
        let turned = rotate_rect_hitbox(center, 2.0, 2.0, 90.0);
        // Each corner moves to where the next one clockwise used to be.
        assert_close(turned[0], base[1]);
        assert_close(turned[1], base[2]);
        assert_close(turned[2], base[3]);
        assert_close(turned[3], base[0]);
    }

    #[test]
    fn test_hitbox_corners_stay_on_circle() {
        let center = Point::new(3.0, -4.0);
        let dist = half_diagonal(6.0, 3.0);
        for corner in rotate_rect_hitbox(center, 6.0, 3.0, 37.5) {
            let d = ((corner.x - center.x).powi(2) + (corner.y - center.y).powi(2)).sqrt();
            assert!((d - dist).abs() < EPS);
        }
    }

    #[test]
    fn test_hitbox_center_recovers_center() {
        let center = Point::new(50.0, 80.0);
        for angle in [0.0, 15.0, 90.0, 200.0] {
            let corners = rotate_rect_hitbox(center, 30.0, 10.0, angle);
            assert_eq!(hitbox_center(corners[0], 30.0, 10.0, angle), (50, 80));
        }
    }

    #[test]
    fn test_length_dir() {
        assert_close(length_dir(2.0, 0.0), Point::new(2.0, 0.0));
        assert_close(length_dir(2.0, 90.0), Point::new(0.0, 2.0));
        assert!((corner_base_angle(1.0, 1.0) - 45.0).abs() < EPS);
    }
}
