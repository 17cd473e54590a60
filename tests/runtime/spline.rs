use super::helpers::*;

use bevy::prelude::*;
use bevy_pyre::spline::{LinearSpline, lerp_colour};

fn flame_alpha() -> LinearSpline<f32> {
    let mut spline = LinearSpline::scalar();
    spline.add_point(0.0, 0.0);
    spline.add_point(0.1, 1.0);
    spline.add_point(0.5, 1.0);
    spline.add_point(1.0, 0.0);
    spline
}

#[test]
#[should_panic(expected = "no control points")]
fn empty_spline_panics() {
    let spline = LinearSpline::scalar();
    spline.get(0.5);
}

#[test]
fn single_point_is_constant() {
    let mut spline = LinearSpline::scalar();
    spline.add_point(0.3, 4.0);

    for t in [-1.0, 0.0, 0.3, 0.9, 5.0] {
        assert_eq!(spline.get(t), 4.0, "t = {t}");
    }
}

#[test]
fn before_first_point_returns_first_value() {
    let mut spline = LinearSpline::scalar();
    spline.add_point(0.25, 2.0);
    spline.add_point(1.0, 6.0);

    assert_eq!(spline.get(0.25), 2.0);
    assert_eq!(spline.get(0.1), 2.0);
    assert_eq!(spline.get(-3.0), 2.0);
}

#[test]
fn past_last_point_returns_last_value() {
    let spline = flame_alpha();

    assert_eq!(spline.get(1.0), 0.0);
    assert_eq!(spline.get(1.5), 0.0);
    assert_eq!(spline.get(100.0), 0.0);
}

#[test]
fn interpolates_between_neighbours() {
    let spline = flame_alpha();

    assert_approx(spline.get(0.05), 0.5, "rising edge");
    assert_approx(spline.get(0.3), 1.0, "plateau");
    assert_approx(spline.get(0.75), 0.5, "falling edge");
}

#[test]
fn continuous_at_interior_points() {
    let mut size = LinearSpline::scalar();
    size.add_point(0.0, 1.0);
    size.add_point(0.25, 7.0);
    size.add_point(0.5, 2.5);
    size.add_point(1.0, 0.0);

    for (knot, value) in [(0.25, 7.0), (0.5, 2.5)] {
        let eps = 1e-4;
        assert_approx(size.get(knot), value, "at knot");
        assert!(
            (size.get(knot - eps) - value).abs() < 0.01,
            "left of {knot} should approach {value}"
        );
        assert!(
            (size.get(knot + eps) - value).abs() < 0.01,
            "right of {knot} should approach {value}"
        );
    }
}

#[test]
fn repeated_t_makes_a_step() {
    let mut spline = LinearSpline::scalar();
    spline.add_point(0.0, 0.0);
    spline.add_point(0.5, 0.0);
    spline.add_point(0.5, 1.0);
    spline.add_point(1.0, 1.0);

    assert_approx(spline.get(0.49), 0.0, "before the step");
    assert_eq!(spline.get(0.5), 1.0);
    assert_approx(spline.get(0.75), 1.0, "after the step");
}

#[test]
fn points_keep_insertion_order() {
    let mut spline = LinearSpline::scalar();
    spline.add_point(1.0, 10.0);
    spline.add_point(0.0, 20.0);

    assert_eq!(spline.len(), 2);
    assert_eq!(spline.points()[0], (1.0, 10.0));
    assert_eq!(spline.points()[1], (0.0, 20.0));
}

#[test]
fn colour_spline_blends_every_channel() {
    let mut colour = LinearSpline::colour();
    colour.add_point(0.0, Srgba::new(1.0, 0.0, 0.2, 1.0));
    colour.add_point(1.0, Srgba::new(0.0, 1.0, 0.2, 0.0));

    let mid = colour.get(0.5);
    assert_approx(mid.red, 0.5, "red");
    assert_approx(mid.green, 0.5, "green");
    assert_approx(mid.blue, 0.2, "blue");
    assert_approx(mid.alpha, 0.5, "alpha");
}

#[test]
fn custom_lerp_is_used() {
    fn nearest(t: f32, a: &i32, b: &i32) -> i32 {
        if t < 0.5 { *a } else { *b }
    }

    let spline = LinearSpline::from_points(nearest, [(0.0, 1), (1.0, 9)]);

    assert_eq!(spline.get(0.25), 1);
    assert_eq!(spline.get(0.75), 9);
}

#[test]
fn lerp_colour_endpoints_are_exact() {
    let a = Srgba::new(0.1, 0.2, 0.3, 0.4);
    let b = Srgba::new(0.9, 0.8, 0.7, 0.6);

    assert_eq!(lerp_colour(0.0, &a, &b), a);
    assert_approx(lerp_colour(1.0, &a, &b).red, 0.9, "red at 1");
}
