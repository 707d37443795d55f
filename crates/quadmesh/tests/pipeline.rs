//! End-to-end: OBJ text in, subdivided buffers out.

use approx::assert_relative_eq;
use quadmesh::{
    read_obj_from_str, subdivide, write_obj_to_string, Config, ImportOptions, NormalRule, Point3,
    Scene, SubdivideParams, Vec3,
};

const CUBE_OBJ: &str = "\
# unit cube
o cube
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
v 0 0 1
v 1 0 1
v 1 1 1
v 0 1 1
vt 0 0
f 1 4 3 2
f 5 6 7 8
f 1 2 6 5
f 4 8 7 3
f 1 5 8 4
f 2 3 7 6
";

/// 3x3 grid: the four interior vertices are regular.
fn grid_obj() -> String {
    let mut text = String::new();
    for y in 0..4 {
        for x in 0..4 {
            text.push_str(&format!("v {x} {y} 0\n"));
        }
    }
    for y in 0..3 {
        for x in 0..3 {
            let i = y * 4 + x + 1;
            text.push_str(&format!("f {} {} {} {}\n", i, i + 1, i + 5, i + 4));
        }
    }
    text
}

fn sequential() -> SubdivideParams {
    SubdivideParams::default().with_parallel(false)
}

#[test]
fn test_import_to_buffers() {
    let mesh = read_obj_from_str(CUBE_OBJ, &ImportOptions::default()).unwrap();
    let stats = mesh.stats();
    assert_eq!((stats.vertices, stats.edges, stats.faces), (8, 12, 6));
    assert!(stats.is_closed());
    assert_eq!(stats.euler_characteristic(), 2);

    let buffers = mesh.buffers();
    assert_eq!(buffers.positions.len(), 4 * 3 * mesh.num_faces());
    assert_eq!(buffers.normals.len(), buffers.positions.len());
    // bottom face points down
    assert_eq!(&buffers.normals[0..3], &[0.0, 0.0, -1.0]);
}

#[test]
fn test_cube_subdivision_counts() {
    let cube = read_obj_from_str(CUBE_OBJ, &ImportOptions::default()).unwrap();
    let once = subdivide(&cube, &sequential()).unwrap();
    assert_eq!(
        (once.num_vertices(), once.num_edges(), once.num_faces()),
        (26, 48, 24)
    );
    let twice = subdivide(&once, &sequential()).unwrap();
    assert_eq!(
        (twice.num_vertices(), twice.num_edges(), twice.num_faces()),
        (98, 192, 96)
    );
    twice.validate().unwrap();
    assert!(twice.stats().is_closed());
}

#[test]
fn test_grid_interior_vertex_moves() {
    let mesh = read_obj_from_str(&grid_obj(), &ImportOptions::default()).unwrap();
    assert_eq!(mesh.stats().extraordinary_vertices, 12);

    let refined = subdivide(&mesh, &sequential()).unwrap();
    // Flat grid stays flat and regular points land on the lattice.
    for v in refined.vertices() {
        assert_relative_eq!(v.position().z, 0.0);
    }
    assert!(refined.find_vertex(&Point3::new(1.0, 1.0, 0.0)).is_some());
    assert!(refined.find_vertex(&Point3::new(1.5, 1.5, 0.0)).is_some());
    assert_eq!(refined.num_faces(), 36);
}

#[test]
fn test_scene_from_config() {
    let config = Config::from_toml_str(
        "[import]\nunitize = true\n[subdivide]\nlevel = 2\nnormal_rule = \"renormalized\"\n",
    )
    .unwrap();
    assert_eq!(config.subdivide.params().normal_rule, NormalRule::Renormalized);

    let mesh = read_obj_from_str(CUBE_OBJ, &config.import).unwrap();
    let (lo, hi) = mesh.bounds().unwrap();
    assert_relative_eq!(lo, Point3::new(-0.5, -0.5, -0.5));
    assert_relative_eq!(hi, Point3::new(0.5, 0.5, 0.5));

    let mut scene = Scene::new(mesh, config.subdivide.params().with_parallel(false));
    let refined = scene.set_level(config.subdivide.level).unwrap();
    assert_eq!(refined.num_faces(), 96);
    for face in refined.faces() {
        for n in face.normals() {
            assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-12);
        }
    }
    assert_eq!(scene.buffers().num_quads(), 96);
}

#[test]
fn test_subdivided_obj_round_trip() {
    let cube = read_obj_from_str(CUBE_OBJ, &ImportOptions::default()).unwrap();
    let refined = subdivide(&cube, &sequential()).unwrap();
    let text = write_obj_to_string(&refined).unwrap();
    let back = read_obj_from_str(&text, &ImportOptions::default()).unwrap();
    assert_eq!(back.stats(), refined.stats());
    assert_eq!(back.buffers(), refined.buffers());
}

#[test]
fn test_flat_normals_ignore_file_normals() {
    let text = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nvn 1 0 0\nf 1//1 2//1 3//1 4//1\n";
    let options = ImportOptions {
        use_file_normals: false,
        ..ImportOptions::default()
    };
    let mesh = read_obj_from_str(text, &options).unwrap();
    for n in mesh.faces()[0].normals() {
        assert_relative_eq!(*n, Vec3::new(0.0, 0.0, 1.0));
    }
}
