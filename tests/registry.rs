//! Public contract of the algorithm registry: identifiers in, curves (or
//! explicit absence) out.

use approx::{assert_abs_diff_eq, assert_relative_eq};

use sketchfit::domain::{Family, FitId, Point};
use sketchfit::error::FitError;
use sketchfit::fit::{CATALOG, fit, lookup};
use sketchfit::models::{Curve, LinearPiece, Piecewise, Segment};

fn pts(xy: &[(f64, f64)]) -> Vec<Point> {
    xy.iter().copied().map(Point::from).collect()
}

fn wavy(n: usize) -> Vec<Point> {
    (0..n)
        .map(|i| {
            let x = i as f64 * 0.7 - 2.0;
            Point::new(x, (1.3 * x).sin() + 0.1 * x * x)
        })
        .collect()
}

#[test]
fn catalog_lists_every_identifier_once() {
    let names: Vec<String> = CATALOG.iter().map(|id| id.to_string()).collect();
    assert_eq!(names.len(), 12);
    assert_eq!(names[0], "regression+1");
    assert_eq!(names[9], "regression+10");
    assert_eq!(&names[10..], ["spline+1", "spline+3"]);
    for name in &names {
        assert_eq!(lookup(name).unwrap().to_string(), *name);
    }
}

#[test]
fn regression_presence_depends_on_point_count() {
    for d in 1..=10usize {
        let id = lookup(&format!("regression+{d}")).unwrap();
        assert!(id.fit(&wavy(d + 1)).unwrap().is_some(), "degree {d} with {} points", d + 1);
        assert!(id.fit(&wavy(d)).unwrap().is_none(), "degree {d} with {d} points");
    }
}

#[test]
fn linear_regression_reproduces_the_line_through_two_points() {
    let curve = fit("regression+1", &pts(&[(1.0, 3.0), (3.0, 7.0)])).unwrap().unwrap();
    let Curve::Polynomial(poly) = &curve else {
        panic!("expected a polynomial");
    };
    // Highest power first: 2x + 1.
    let mono = poly.monomial_coefficients();
    assert_relative_eq!(mono[0], 2.0, epsilon = 1e-9);
    assert_relative_eq!(mono[1], 1.0, epsilon = 1e-9);
    assert_relative_eq!(curve.evaluate(10.0), 21.0, epsilon = 1e-9);
}

#[test]
fn full_degree_regression_interpolates() {
    let points = wavy(6);
    let curve = fit("regression+5", &points).unwrap().unwrap();
    for p in &points {
        assert_relative_eq!(curve.evaluate(p.x), p.y, epsilon = 1e-9, max_relative = 1e-9);
    }
}

fn sine_knots(xs: impl Iterator<Item = f64>) -> Vec<Point> {
    xs.map(|x| Point::new(x, x.sin())).collect()
}

#[test]
fn regression_far_from_the_origin_hits_every_knot() {
    for (lo, hi) in [(5.0, 15.0), (-20.0, -10.0), (0.0, 10.0)] {
        for d in 1..=10usize {
            // d + 1 evenly spaced knots spanning [lo, hi].
            let step = (hi - lo) / d as f64;
            let points = sine_knots((0..=d).map(|i| lo + step * i as f64));
            let id = lookup(&format!("regression+{d}")).unwrap();
            let curve = id
                .fit(&points)
                .unwrap()
                .unwrap_or_else(|| panic!("degree {d} on [{lo}, {hi}] should be present"));
            for p in &points {
                assert_relative_eq!(curve.evaluate(p.x), p.y, epsilon = 1e-9, max_relative = 1e-9);
            }
        }
    }
}

#[test]
fn offset_least_squares_fit_is_present() {
    // Eleven unit-spaced abscissae starting at 5, 8 and 10, all ten degrees.
    for lo in [5.0, 8.0, 10.0] {
        let points = sine_knots((0..11).map(|i| lo + i as f64));
        for d in 1..=10usize {
            let id = lookup(&format!("regression+{d}")).unwrap();
            assert!(id.fit(&points).unwrap().is_some(), "degree {d} from x={lo}");
        }
    }
}

#[test]
fn quadratic_through_three_points() {
    let curve = fit("regression+2", &pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)])).unwrap().unwrap();
    assert_abs_diff_eq!(curve.evaluate(0.0), 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(curve.evaluate(1.0), 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(curve.evaluate(2.0), 0.0, epsilon = 1e-9);
}

#[test]
fn cubic_spline_interpolates_knots_and_is_natural() {
    let points = pts(&[(-1.0, 2.0), (0.0, 0.5), (1.5, 1.0), (2.0, -1.0), (4.0, 0.0)]);
    let curve = fit("spline+3", &points).unwrap().unwrap();
    let Curve::PiecewiseCubic(spline) = &curve else {
        panic!("expected a cubic spline");
    };

    let (last, rest) = points.split_last().unwrap();
    for p in rest {
        assert_relative_eq!(curve.evaluate(p.x), p.y, epsilon = 1e-12);
    }
    // The composed function is zero at the right-most knot...
    assert_eq!(curve.evaluate(last.x), 0.0);
    // ...but the last piece itself reaches it.
    let last_piece = spline.segment(spline.pieces().len() - 1).unwrap();
    assert_relative_eq!(last_piece.eval(last.x), last.y, epsilon = 1e-9);

    let second_diff = |piece: &dyn Fn(f64) -> f64, x: f64| {
        let h = 1e-3;
        (piece(x + h) - 2.0 * piece(x) + piece(x - h)) / (h * h)
    };
    let first = spline.segment(0).unwrap();
    assert_abs_diff_eq!(second_diff(&|x| first.eval(x), points[0].x), 0.0, epsilon = 1e-5);
    assert_abs_diff_eq!(second_diff(&|x| last_piece.eval(x), last.x), 0.0, epsilon = 1e-5);
}

#[test]
fn composer_is_zero_outside_its_domain() {
    let g = Piecewise::new(
        vec![0.0, 1.0, 2.0],
        vec![LinearPiece { a: 1.0, b: 0.0 }, LinearPiece { a: 2.0, b: 0.0 }],
    )
    .unwrap();
    assert_eq!(g.evaluate(-1.0), 0.0);
    assert_eq!(g.evaluate(0.0), 1.0);
    assert_eq!(g.evaluate(1.0), 2.0);
    assert_eq!(g.evaluate(2.0), 0.0);
}

#[test]
fn linear_spline_tolerates_duplicate_x() {
    let curve = fit("spline+1", &pts(&[(0.0, 0.0), (1.0, 1.0), (1.0, 2.0), (2.0, 0.0)]))
        .unwrap()
        .unwrap();
    let Curve::PiecewiseLinear(spline) = &curve else {
        panic!("expected a linear spline");
    };
    assert!(spline.segment(1).unwrap().eval(1.0).is_nan());
    assert_relative_eq!(curve.evaluate(0.5), 0.5);
    assert_relative_eq!(curve.evaluate(1.5), 1.0);
}

#[test]
fn single_point_spline_is_absent() {
    assert_eq!(fit("spline+3", &pts(&[(3.0, 3.0)])).unwrap(), None);
    assert_eq!(fit("spline+1", &pts(&[(3.0, 3.0)])).unwrap(), None);
}

#[test]
fn unknown_identifiers_are_errors() {
    for id in [
        "regression+11",
        "regression+0",
        "spline+2",
        "lowess+1",
        "",
        "regression++3",
        "REGRESSION+03",
        " spline + 1 ",
        "Spline+003",
        "regression+010",
    ] {
        assert!(matches!(lookup(id), Err(FitError::UnknownAlgorithm { .. })), "{id}");
        assert!(fit(id, &wavy(5)).is_err());
    }
}

#[test]
fn fits_are_deterministic() {
    let points = wavy(9);
    for &id in CATALOG {
        assert_eq!(id.fit(&points).unwrap(), id.fit(&points).unwrap(), "{id}");
    }
}

#[test]
fn family_decides_clipping() {
    let points = wavy(5);
    for &id in CATALOG.iter().take(4).chain(&CATALOG[10..]) {
        let curve = id.fit(&points).unwrap().unwrap();
        assert_eq!(curve.family(), id.family());
        match id.family() {
            Family::Regression => assert_eq!(curve.clip_domain(), None),
            Family::Spline => assert_eq!(curve.clip_domain(), Some((points[0].x, points[4].x))),
        }
    }
    assert_eq!(FitId::CubicSpline.family(), Family::Spline);
}
