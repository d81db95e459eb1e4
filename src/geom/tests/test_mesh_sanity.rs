use crate::geom::{
    BBox, BandConfig, MobiusSurface, Point3, SampleGrid, SurfaceGrid, SurfaceMesh, Tolerance,
    triangulate_grid,
};

fn strip(samples: usize) -> (MobiusSurface, SampleGrid, SurfaceGrid) {
    let surface = MobiusSurface::new(BandConfig::new(0.5));
    let grid = SampleGrid::new(0.0, samples);
    let coords = SurfaceGrid::evaluate(&surface, &grid);
    (surface, grid, coords)
}

#[test]
fn evaluated_coordinates_match_grid_shape() {
    let (surface, grid, coords) = strip(6);
    assert_eq!(coords.shape(), (6, 6));
    assert!(coords.x.same_shape(grid.u()));
    assert!(coords.z.same_shape(grid.v()));

    let (u, v) = grid.param(3, 2);
    let expected = crate::geom::Surface::point_at(&surface, u, v);
    assert_eq!(coords.point(3, 2), expected);
}

#[test]
fn strip_bounds_cover_circle_plus_band() {
    let (_, _, coords) = strip(41);
    let bounds = coords.bbox().expect("non-empty grid");
    // The core circle has radius 1 and the band reaches 0.5 to each side.
    assert!(bounds.max.x <= 1.0 + 1e-12);
    assert!(bounds.max.y <= 1.5 + 1e-12);
    assert!(bounds.max.z <= 0.5 + 1e-12);
    assert!(bounds.max_range() > 2.0);
}

#[test]
fn bbox_max_range_picks_the_largest_axis() {
    let bounds = BBox::from_points([
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(3.0, -1.0, 0.5),
        Point3::new(1.0, 1.0, -0.5),
    ])
    .unwrap();
    assert_eq!(bounds.max_range(), 3.0);
    assert!(Tolerance::DEFAULT.approx_eq_point3(bounds.center(), Point3::new(1.5, 0.0, 0.0)));
    assert!(BBox::from_points(std::iter::empty()).is_none());
}

#[test]
fn triangulated_grid_has_two_triangles_per_cell() {
    let indices = triangulate_grid(3, 4);
    assert_eq!(indices.len(), 2 * 3 * 6);
    assert_eq!(&indices[..6], &[0, 1, 4, 4, 1, 5]);
    assert!(triangulate_grid(1, 4).is_empty());
}

#[test]
fn surface_mesh_validates_and_exports_obj() {
    let (surface, grid, coords) = strip(4);
    let mesh = SurfaceMesh::from_grid(&surface, &grid, &coords);
    mesh.validate().expect("mesh validate");
    assert_eq!(mesh.vertex_count(), 16);
    assert_eq!(mesh.triangle_count(), 18);
    assert_eq!(mesh.uvs[5], [1.0 / 3.0, 1.0 / 3.0]);

    let mut out = Vec::new();
    mesh.write_obj(&mut out, "strip").unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("o strip"));
    assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), 16);
    assert_eq!(text.lines().filter(|l| l.starts_with("f ")).count(), 18);
    assert!(text.contains("f 1/1/1 2/2/2 5/5/5"));
}

#[test]
fn invalid_mesh_is_not_exported() {
    let mesh = SurfaceMesh {
        positions: vec![[0.0, 0.0, 0.0]],
        uvs: vec![[0.0, 0.0]],
        normals: vec![[0.0, 0.0, 1.0]],
        indices: vec![0, 0, 3],
    };
    assert!(mesh.validate().is_err());
    assert!(mesh.write_obj(&mut Vec::new(), "bad").is_err());
}
