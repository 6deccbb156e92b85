use super::*;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

#[test]
fn distance_is_euclidean_and_symmetric() {
    let a = Point2D::new(1.0, 2.0);
    let b = Point2D::new(4.0, 6.0);
    assert_eq!(distance(a, b), 5.0);
    assert_eq!(distance(b, a), 5.0);
    assert_eq!(distance(a, a), 0.0);
}

#[test]
fn right_angle_at_third_vertex() {
    let angle = interior_angle(
        Point2D::new(3.0, 0.0),
        Point2D::new(0.0, 3.0),
        Point2D::ORIGIN,
    )
    .expect("angle");
    assert!((angle - FRAC_PI_2).abs() < 1e-12);
}

#[test]
fn diagonal_ray_gives_quarter_pi() {
    let angle = interior_angle(
        Point2D::new(5.0, 5.0),
        Point2D::new(0.0, 10.0),
        Point2D::ORIGIN,
    )
    .expect("angle");
    assert!((angle - FRAC_PI_4).abs() < 1e-12);
}

#[test]
fn collinear_opposite_rays_give_pi_without_nan() {
    let angle = interior_angle(
        Point2D::new(0.0, 7.0),
        Point2D::new(0.0, -150.0),
        Point2D::ORIGIN,
    )
    .expect("angle");
    assert!((angle - PI).abs() < 1e-9);
}

#[test]
fn coincident_first_and_second_points_give_zero() {
    let p = Point2D::new(0.0, -150.0);
    let angle = interior_angle(p, p, Point2D::ORIGIN).expect("angle");
    assert_eq!(angle, 0.0);
}

#[test]
fn vertex_coinciding_with_a_point_is_degenerate() {
    let c = Point2D::new(2.0, 2.0);
    assert_eq!(
        interior_angle(c, Point2D::new(0.0, 9.0), c),
        Err(GeometryError::DegenerateTriangle)
    );
    assert_eq!(
        interior_angle(Point2D::new(0.0, 9.0), c, c),
        Err(GeometryError::DegenerateTriangle)
    );
}
