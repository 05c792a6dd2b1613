//! Closed-form output-set integrals checked against brute-force quadrature.
//!
//! Shapes are drawn at random (seeded) with a rising first ramp, a falling
//! second ramp, and a plateau of non-negative width, then integrated with a
//! fine midpoint rule over their support.

use fuzzy_pilot::defuzz::{
    centroid, integrate_linear, integrate_linear_with_y, OutputShape, NO_TURN_SHAPE,
    TURN_LEFT_SHAPE, TURN_RIGHT_SHAPE,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SAMPLES: usize = 400_000;

/// Membership of `shape` clipped at `height`, evaluated pointwise.
fn membership(shape: &OutputShape, height: f64, x: f64) -> f64 {
    let up = shape.rise.slope * x + shape.rise.intercept;
    let down = shape.fall.slope * x + shape.fall.intercept;
    up.min(down).min(height).max(0.0)
}

/// Support of the shape: rising zero crossing to falling zero crossing.
fn support(shape: &OutputShape) -> (f64, f64) {
    (
        -shape.rise.intercept / shape.rise.slope,
        -shape.fall.intercept / shape.fall.slope,
    )
}

/// Midpoint-rule `(area, moment)` of the clipped shape.
fn quadrature(shape: &OutputShape, height: f64) -> (f64, f64) {
    let (lo, hi) = support(shape);
    let dx = (hi - lo) / SAMPLES as f64;
    let mut area = 0.0;
    let mut moment = 0.0;
    for i in 0..SAMPLES {
        let x = lo + (i as f64 + 0.5) * dx;
        let mu = membership(shape, height, x);
        area += mu * dx;
        moment += x * mu * dx;
    }
    (area, moment)
}

fn rel_close(exact: f64, numeric: f64) -> bool {
    (exact - numeric).abs() <= 1e-6 * exact.abs().max(numeric.abs()).max(1e-2)
}

/// Random shape with `f1a > 0`, `f2a < 0` and the plateau ordered `p1 <= p2`.
fn random_shape(rng: &mut StdRng) -> (OutputShape, f64) {
    let height = rng.gen_range(0.05..1.5);
    let f1a = rng.gen_range(0.5..4.0);
    let f1b = rng.gen_range(-3.0..1.0);
    let f2a = rng.gen_range(-4.0..-0.5);
    let p1 = (height - f1b) / f1a;
    let p2 = p1 + rng.gen_range(0.0..1.5);
    let f2b = height - f2a * p2;
    (OutputShape::new(f1a, f1b, f2a, f2b), height)
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn test_random_shapes_match_quadrature() {
    let mut rng = StdRng::seed_from_u64(0x00f0_221e);
    for case in 0..40 {
        let (shape, height) = random_shape(&mut rng);
        let (area, moment) = quadrature(&shape, height);
        let exact_area = shape.area(height);
        let exact_moment = shape.moment(height);
        assert!(
            rel_close(exact_area, area),
            "case {}: {:?} h={} area {} vs {}",
            case,
            shape,
            height,
            exact_area,
            area
        );
        assert!(
            rel_close(exact_moment, moment),
            "case {}: {:?} h={} moment {} vs {}",
            case,
            shape,
            height,
            exact_moment,
            moment
        );
    }
}

#[test]
fn test_fixed_output_sets_match_quadrature() {
    let mut rng = StdRng::seed_from_u64(7);
    for shape in [TURN_LEFT_SHAPE, NO_TURN_SHAPE, TURN_RIGHT_SHAPE] {
        for _ in 0..5 {
            // At or below the apex the plateau is well ordered.
            let height = rng.gen_range(0.05..1.0);
            let (area, moment) = quadrature(&shape, height);
            assert!(rel_close(shape.area(height), area), "{:?} h={}", shape, height);
            assert!(rel_close(shape.moment(height), moment), "{:?} h={}", shape, height);
        }
    }
}

#[test]
fn test_centroid_matches_quadrature_of_the_union() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..10 {
        let l: f64 = rng.gen_range(0.0..1.0);
        let n: f64 = rng.gen_range(0.0..1.0);
        let r: f64 = rng.gen_range(0.0..1.0);
        let mut area = 0.0;
        let mut moment = 0.0;
        for (shape, h) in [(TURN_LEFT_SHAPE, l), (NO_TURN_SHAPE, n), (TURN_RIGHT_SHAPE, r)] {
            let (a, m) = quadrature(&shape, h);
            area += a;
            moment += m;
        }
        let c = centroid(l, n, r);
        assert!(rel_close(c, moment / area), "({}, {}, {}) -> {} vs {}", l, n, r, c, moment / area);
        assert!((0.0..=2.0).contains(&c));
    }
}

#[test]
fn test_degenerate_inputs_integrate_to_zero() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..100 {
        let a: f64 = rng.gen_range(-10.0..10.0);
        let b: f64 = rng.gen_range(-10.0..10.0);
        let lo: f64 = rng.gen_range(0.0..5.0);
        let hi = lo - rng.gen_range(0.001..5.0);
        assert_eq!(integrate_linear(a, b, lo, hi), 0.0);
        assert_eq!(integrate_linear_with_y(0.0, b, rng.gen_range(0.0..3.0)), 0.0);
    }
}
