use super::*;
use euclid::approxeq::ApproxEq;
use test_case::test_case;

fn new_assert<S, T, SP: Into<Point2D<f64, S>>, TP: Into<Point2D<f64, T>>>(
    m: Transform2D<f64, S, T>,
) -> impl Fn(SP, TP) {
    move |p, exp| {
        let exp = exp.into();
        let p = m.transform_point(p.into());
        assert!(
            p.approx_eq_eps(&exp, &(0.0001, 0.0001).into()),
            "exp != actual: {:?} != {:?}",
            &exp,
            p
        );
    }
}

fn assert_identity(m: &AffineMatrix) {
    assert!(
        m.approx_eq_eps(&AffineMatrix::identity(), &1e-9),
        "not identity: {:?}",
        m
    );
}

#[test]
fn test_user_to_page() {
    // no unit scale, flip y
    let f = new_assert(user_to_page(600.0, 1.0));
    f((0.0, 0.0), (0.0, 600.0));
    f((10.0, 20.0), (10.0, 600.0 - 20.0));

    // mm to point
    let k = 72.0 / 25.4;
    let f = new_assert(user_to_page(297.0, k));
    f((0.0, 0.0), (0.0, 297.0 * k));
    f((10.0, 20.0), (10.0 * k, (297.0 - 20.0) * k));
    f((0.0, 297.0), (0.0, 0.0));
}

#[test]
fn test_translation() {
    let m = translation(10.0, 20.0, 2.0);
    assert_eq!(m, AffineMatrix::new(1.0, 0.0, 0.0, 1.0, 20.0, -40.0));
    let f = new_assert(m);
    f((1.0, 1.0), (21.0, -39.0));
}

#[test_case(2.0, 3.0, (0.0, 0.0))]
#[test_case(0.5, 0.5, (100.0, 200.0))]
#[test_case(-1.0, 1.0, (30.0, 40.0); "mirror")]
#[test_case(1.0, -2.5, (-7.0, 12.0); "negative center")]
fn scale_keeps_center(sx: f64, sy: f64, center: (f64, f64)) {
    let m = scale_about(sx, sy, center.into());
    let f = new_assert(m);
    f(center, center);
    f(
        (center.0 + 1.0, center.1 + 1.0),
        (center.0 + sx, center.1 + sy),
    );
}

#[test_case(0.0, (0.0, 0.0))]
#[test_case(0.0, (123.0, 456.0))]
#[test_case(360.0, (10.0, 10.0); "full turn")]
fn rotate_zero_is_identity(degree: f64, center: (f64, f64)) {
    assert_identity(&rotation_about(Angle::degrees(degree), center.into()));
}

#[test_case(30.0)]
#[test_case(90.0)]
#[test_case(180.0)]
#[test_case(-45.0)]
fn rotate_back_is_identity(degree: f64) {
    let center = PagePoint::new(50.0, 70.0);
    let forward = rotation_about(Angle::degrees(degree), center);
    let backward = rotation_about(Angle::degrees(-degree), center);
    assert_identity(&compose([&forward, &backward]));
    assert_identity(&forward.then(&backward));
}

#[test]
fn rotate_counter_clockwise() {
    let f = new_assert(rotation_about(Angle::degrees(90.0), PagePoint::new(10.0, 10.0)));
    f((10.0, 10.0), (10.0, 10.0));
    f((20.0, 10.0), (10.0, 20.0));
    f((10.0, 20.0), (0.0, 10.0));
}

#[test]
fn skew_keeps_center() {
    let center = PagePoint::new(40.0, 60.0);
    let m = skew_about(Angle::degrees(30.0), Angle::degrees(-20.0), center);
    assert_eq!(m.m11, 1.0);
    assert_eq!(m.m22, 1.0);
    let f = new_assert(m);
    f((40.0, 60.0), (40.0, 60.0));
    // x moves by tan(ax) per unit of y
    f(
        (40.0, 61.0),
        (40.0 + 30f64.to_radians().tan(), 61.0),
    );
}

#[test]
fn double_mirror_is_identity() {
    let m = scale_about(-1.0, 1.0, PagePoint::new(25.0, 0.0));
    assert_identity(&compose([&m, &m]));
}

#[test]
fn compose_in_stream_order() {
    let t = translation(10.0, 0.0, 1.0);
    let s = scale_about(2.0, 2.0, PagePoint::origin());
    // `t cm` then `s cm`: a point is scaled first, then translated
    let f = new_assert(compose([&t, &s]));
    f((1.0, 1.0), (12.0, 2.0));
    assert_identity(&compose(std::iter::empty()));
}
