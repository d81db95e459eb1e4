mod test_mesh_sanity;
mod test_mobius_surface;
