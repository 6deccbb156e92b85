use super::*;
use std::f64::consts::PI;

#[test]
fn direction_vector_wraps_angle_into_one_turn() {
    let v = DirectionVector::new(TAU + PI / 2.0, 0.5);
    assert!((v.angle() - PI / 2.0).abs() < 1e-12);

    let negative = DirectionVector::new(-PI / 2.0, 0.5);
    assert!((negative.angle() - 3.0 * PI / 2.0).abs() < 1e-12);

    assert_eq!(DirectionVector::new(TAU, 1.0).angle(), 0.0);
    assert_eq!(DirectionVector::new(-1e-20, 1.0).angle(), 0.0);
}

#[test]
fn direction_vector_clamps_magnitude() {
    assert_eq!(DirectionVector::new(0.0, 1.4).magnitude(), 1.0);
    assert_eq!(DirectionVector::new(0.0, -0.2).magnitude(), 0.0);
    assert_eq!(DirectionVector::new(0.0, f64::NAN).magnitude(), 0.0);
    assert_eq!(DirectionVector::new(f64::INFINITY, 0.3).angle(), 0.0);
}

#[test]
fn stop_vector_is_zero() {
    assert_eq!(DirectionVector::STOP.magnitude(), 0.0);
    assert_eq!(DirectionVector::STOP, DirectionVector::new(0.0, 0.0));
}

#[test]
fn deserializing_reapplies_invariants() {
    let v: DirectionVector =
        serde_json::from_str(r#"{"angle":-3.141592653589793,"magnitude":3.0}"#).expect("parse");
    assert!((v.angle() - PI).abs() < 1e-12);
    assert_eq!(v.magnitude(), 1.0);
}

#[test]
fn rotation_matrix_projects_third_column() {
    let matrix = RotationMatrix([[0.9, 0.0, 0.3], [0.0, 0.8, -0.4], [0.1, 0.2, 0.7]]);
    assert_eq!(matrix.tilt(), Point2D::new(0.3, 0.4));
    let level = RotationMatrix([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
    assert_eq!(level.tilt(), Point2D::new(0.0, -0.0));
}

#[test]
fn palette_has_six_wells() {
    assert_eq!(COLOR_WELLS.len(), 6);
    assert!(color_well(5).is_some());
    assert!(color_well(6).is_none());
    assert_eq!(color_well(3).expect("crimson").to_rgb8(), [192, 0, 68]);
}

#[test]
fn rgb8_clamps_channels() {
    let color = Color {
        red: 1.5,
        green: -0.2,
        blue: 0.5,
        alpha: 1.0,
    };
    assert_eq!(color.to_rgb8(), [255, 0, 128]);
}
