use std::f64::consts::TAU;

use crate::geom::{
    BandConfig, MobiusSurface, Point3, Surface, Tolerance, band_angle, band_offset, band_unit,
    circle_point, mobius_point,
};

const PARAMS: [f64; 7] = [-1.3, -0.25, 0.0, 0.125, 0.5, 0.77, 3.4];

#[test]
fn band_vanishes_at_zero_width() {
    let tol = Tolerance::new(1e-12);
    for &u in &PARAMS {
        for &v in &[0.0, 0.3, 1.0, 2.5] {
            assert!(tol.approx_eq_point3(mobius_point(u, v, 0.0), circle_point(u)));
        }
    }
}

#[test]
fn circle_is_unit_and_flat() {
    let tol = Tolerance::new(1e-12);
    assert!(tol.approx_eq_point3(circle_point(0.0), Point3::new(1.0, 0.0, 0.0)));
    assert!(tol.approx_eq_point3(circle_point(0.25), Point3::new(0.0, 1.0, 0.0)));
    for &u in &PARAMS {
        let p = circle_point(u);
        assert!(tol.approx_eq_f64(p.to_vec3().length(), 1.0));
        assert_eq!(p.z, 0.0);
    }
}

#[test]
fn opposite_edges_differ_by_twice_the_band_direction() {
    let tol = Tolerance::new(1e-12);
    let b = 0.7;
    for &u in &PARAMS {
        let w = band_angle(u);
        let across = mobius_point(u, 1.0, b) - mobius_point(u, 0.0, b);
        assert!(tol.approx_eq_vec3(across, 2.0 * b * band_unit(w)));
        assert!(tol.approx_eq_f64(band_unit(w).length(), 1.0));
    }
}

#[test]
fn band_offset_interpolates_between_opposed_vectors() {
    let tol = Tolerance::new(1e-12);
    let w = 0.9;
    assert!(tol.approx_eq_vec3(band_offset(w, 1.0), band_unit(w)));
    assert!(tol.approx_eq_vec3(band_offset(w, 0.0), -band_unit(w)));
    assert!(tol.approx_eq_f64(band_offset(w, 0.5).length(), 0.0));
}

#[test]
fn band_angle_is_half_of_quarter_shifted_turn() {
    let tol = Tolerance::new(1e-12);
    assert!(tol.approx_eq_f64(band_angle(0.0), TAU / 8.0));
    assert!(tol.approx_eq_f64(band_angle(1.0) - band_angle(0.0), TAU / 2.0));
}

#[test]
fn one_turn_swaps_edges_and_two_turns_repeat() {
    let tol = Tolerance::new(1e-9);
    let b = 0.5;
    for &u in &PARAMS {
        for &v in &[0.0, 0.2, 0.5, 1.0] {
            let p = mobius_point(u, v, b);
            assert!(tol.approx_eq_point3(mobius_point(u + 1.0, 1.0 - v, b), p));
            assert!(tol.approx_eq_point3(mobius_point(u + 2.0, v, b), p));
        }
        // The center line closes after a single turn.
        assert!(tol.approx_eq_point3(mobius_point(u + 1.0, 0.5, b), mobius_point(u, 0.5, b)));
    }
}

#[test]
fn surface_trait_matches_free_function() {
    let surface = MobiusSurface::new(BandConfig::new(0.35));
    for &u in &PARAMS {
        assert_eq!(surface.point_at(u, 0.4), mobius_point(u, 0.4, 0.35));
    }
}

#[test]
fn normals_are_unit_length_on_a_wide_band() {
    let surface = MobiusSurface::new(BandConfig::new(0.5));
    let n = surface.normal_at(0.3, 0.6).expect("regular point");
    assert!(Tolerance::new(1e-9).approx_eq_f64(n.length(), 1.0));
    assert!(MobiusSurface::new(BandConfig::new(0.0)).normal_at(0.3, 0.6).is_none());
}

#[test]
fn band_size_from_image_dimensions() {
    assert_eq!(BandConfig::from_image_size(100, 50, 0.0).band_size(), 0.5);
    assert_eq!(BandConfig::from_image_size(50, 100, -0.5).band_size(), 1.5);
    // Negative widths are accepted, not clamped.
    assert_eq!(BandConfig::from_image_size(4, 2, -1.0).band_size(), -0.5);
}
