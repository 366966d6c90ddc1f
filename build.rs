//! Build script for figure geometry validation
//!
//! This script runs at compile time and validates the static block tables
//! so a typo in a vertex or index list fails the build instead of rendering
//! a broken figure.

// Include the shared geometry tables
#[path = "src/mesh_data.rs"]
mod mesh_data;

use mesh_data::{MeshData, ALL_MESHES, BLOCK_FACE_COUNT, BLOCK_VERTEX_COUNT};

/// Squared length of the cross product of two triangle edges
fn doubled_area_sq(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> f32 {
    let u = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
    let v = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
    let cross = [
        u[1] * v[2] - u[2] * v[1],
        u[2] * v[0] - u[0] * v[2],
        u[0] * v[1] - u[1] * v[0],
    ];
    cross[0] * cross[0] + cross[1] * cross[1] + cross[2] * cross[2]
}

/// Validate a single mesh table
fn validate_mesh(mesh: &MeshData) -> Vec<String> {
    let mut errors = Vec::new();

    if mesh.indices.len() != BLOCK_FACE_COUNT * 6 {
        errors.push(format!(
            "  expected {} indices, got {}",
            BLOCK_FACE_COUNT * 6,
            mesh.indices.len()
        ));
    }

    for (t, tri) in mesh.indices.chunks(3).enumerate() {
        if let Some(&bad) = tri.iter().find(|&&i| i as usize >= BLOCK_VERTEX_COUNT) {
            errors.push(format!(
                "  triangle {} references vertex {} (only {} vertices)",
                t, bad, BLOCK_VERTEX_COUNT
            ));
            continue;
        }

        let [a, b, c] = [
            mesh.positions[tri[0] as usize],
            mesh.positions[tri[1] as usize],
            mesh.positions[tri[2] as usize],
        ];
        if doubled_area_sq(a, b, c) < 1e-8 {
            errors.push(format!("  triangle {} is degenerate", t));
        }
    }

    for (i, color) in mesh.colors.iter().enumerate() {
        if color.iter().any(|c| !(0.0..=1.0).contains(c)) {
            errors.push(format!("  vertex {} colour out of range: {:?}", i, color));
        }
    }

    errors
}

fn main() {
    // Rerun if the shared tables change
    println!("cargo:rerun-if-changed=src/mesh_data.rs");

    let mut has_errors = false;

    for (name, mesh) in ALL_MESHES.iter() {
        let errors = validate_mesh(mesh);
        if errors.is_empty() {
            continue;
        }
        println!(
            "cargo:warning=VALIDATION ERROR: mesh '{}':\n{}",
            name,
            errors.join("\n")
        );
        has_errors = true;
    }

    if has_errors {
        panic!("Geometry validation failed! Fix the block tables in src/mesh_data.rs.");
    }
}
