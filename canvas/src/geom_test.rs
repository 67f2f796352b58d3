#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx(a: Vec2, b: Vec2) -> bool {
    (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON
}

#[test]
fn new_and_default() {
    let v = Vec2::new(3.0, 4.0);
    assert_eq!(v.x, 3.0);
    assert_eq!(v.y, 4.0);
    assert_eq!(Vec2::default(), Vec2::ZERO);
}

#[test]
fn distance_three_four_five() {
    let a = Vec2::new(1.0, 1.0);
    let b = Vec2::new(4.0, 5.0);
    assert_eq!(a.dst2(b), 25.0);
    assert_eq!(a.dst(b), 5.0);
    assert_eq!(Vec2::new(3.0, 4.0).len(), 5.0);
}

#[test]
fn arithmetic_operators() {
    let a = Vec2::new(1.0, 2.0);
    let b = Vec2::new(0.5, -1.0);
    assert_eq!(a + b, Vec2::new(1.5, 1.0));
    assert_eq!(a - b, Vec2::new(0.5, 3.0));
    assert_eq!(a * 2.0, Vec2::new(2.0, 4.0));
    assert_eq!(-a, Vec2::new(-1.0, -2.0));

    let mut c = a;
    c += b;
    assert_eq!(c, a + b);
}

#[test]
fn rotate_clockwise_quarter_turn() {
    let v = Vec2::new(1.0, 0.0).rotate_cw_deg(90.0);
    assert!(approx(v, Vec2::new(0.0, -1.0)), "got {v:?}");
}

#[test]
fn rotate_full_turn_is_identity() {
    let v = Vec2::new(2.5, -1.25);
    assert!(approx(v.rotate_cw_deg(360.0), v));
    assert!(approx(v.rotate_cw_deg(0.0), v));
}

#[test]
fn rotation_preserves_length() {
    let v = Vec2::new(3.0, 4.0);
    for deg in [15.0, 45.0, 133.0, 270.0] {
        assert!((v.rotate_cw_deg(deg).len() - 5.0).abs() < EPSILON);
    }
}

#[test]
fn snap_rounds_to_tenths() {
    let v = Vec2::new(0.14, -0.26).snap(10.0);
    assert_eq!(v, Vec2::new(0.1, -0.3));
}

#[test]
fn cross_sign_follows_orientation() {
    let x = Vec2::new(1.0, 0.0);
    let y = Vec2::new(0.0, 1.0);
    assert!(x.cross(y) > 0.0);
    assert!(y.cross(x) < 0.0);
}
