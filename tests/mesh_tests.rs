// Host-side tests for the procedural unit meshes.

use card_core::mesh::*;
use card_core::MeshKind;
use glam::Vec3;

#[test]
fn every_mesh_is_well_formed() {
    for kind in MeshKind::ALL {
        let mesh = unit_mesh(kind);
        assert!(!mesh.vertices.is_empty(), "{:?}", kind);
        assert_eq!(mesh.indices.len() % 3, 0, "{:?}", kind);
        let n = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < n), "{:?}", kind);
        for v in &mesh.vertices {
            let len = Vec3::from(v.normal).length();
            assert!((len - 1.0).abs() < 1e-4, "{:?} normal {:?}", kind, v.normal);
            assert!(v.uv.iter().all(|c| (0.0..=1.0).contains(c)));
        }
    }
}

#[test]
fn meshes_are_centered_on_the_origin() {
    for kind in MeshKind::ALL {
        let mesh = unit_mesh(kind);
        let (mut lo, mut hi) = (Vec3::splat(f32::MAX), Vec3::splat(f32::MIN));
        for v in &mesh.vertices {
            lo = lo.min(Vec3::from(v.position));
            hi = hi.max(Vec3::from(v.position));
        }
        assert!((lo + hi).abs().max_element() < 1e-4, "{:?}", kind);
        assert!(hi.max_element() <= 1.0 + 1e-5, "{:?}", kind);
    }
    let cube = unit_box();
    assert!(cube
        .vertices
        .iter()
        .all(|v| Vec3::from(v.position).abs().max_element() <= 0.5 + 1e-6));
}

#[test]
fn box_and_plane_triangle_counts() {
    assert_eq!(unit_box().triangle_count(), 12);
    assert_eq!(unit_plane().triangle_count(), 2);
}

#[test]
fn segment_counts_drive_cylinder_detail() {
    let coarse = unit_cylinder(8);
    let fine = unit_cylinder(32);
    assert!(fine.triangle_count() > coarse.triangle_count());
    assert!(unit_sphere(4, 6).triangle_count() < unit_sphere(16, 24).triangle_count());
}
