//! Static geometry tables for the figure's blocks.
//!
//! This module is included by both the build script and the runtime geometry
//! store, so it must stay free of crate-local imports.

// The build script only reads part of the tables
#![allow(dead_code)]

/// Vertices per block: four per face, six faces
pub const BLOCK_VERTEX_COUNT: usize = 24;

/// Indices per block: two triangles per face
pub const BLOCK_INDEX_COUNT: usize = 36;

/// Number of faces on a block
pub const BLOCK_FACE_COUNT: usize = 6;

/// Opaque front/back faces, slightly translucent alpha on the rest.
/// Blending is disabled, so the alpha only reaches the framebuffer.
pub const SIDE_ALPHA: f32 = 0.8;

/// CPU-side copy of one block mesh
#[derive(Debug, Clone, Copy)]
pub struct MeshData {
    pub positions: [[f32; 3]; BLOCK_VERTEX_COUNT],
    pub colors: [[f32; 4]; BLOCK_VERTEX_COUNT],
    pub indices: [u16; BLOCK_INDEX_COUNT],
}

#[rustfmt::skip]
pub const BLOCK_INDICES: [u16; BLOCK_INDEX_COUNT] = [
    0, 1, 2,      0, 2, 3,    // front
    4, 5, 6,      4, 6, 7,    // back
    8, 9, 10,     8, 10, 11,  // top
    12, 13, 14,   12, 14, 15, // bottom
    16, 17, 18,   16, 18, 19, // right
    20, 21, 22,   20, 22, 23, // left
];

/// Box spanning `left..right` on X, `bottom..top` on Y and -1..1 on Z.
///
/// `floor` is the Y of the bottom face. For the torso and limbs it sits above
/// `bottom`, so those blocks are open underneath; the figure was authored
/// that way and the tables keep it.
#[rustfmt::skip]
pub const fn block_positions(
    left: f32,
    right: f32,
    bottom: f32,
    top: f32,
    floor: f32,
) -> [[f32; 3]; BLOCK_VERTEX_COUNT] {
    [
        // front
        [left, bottom, 1.0], [right, bottom, 1.0], [right, top, 1.0], [left, top, 1.0],
        // back
        [left, bottom, -1.0], [left, top, -1.0], [right, top, -1.0], [right, bottom, -1.0],
        // top
        [left, top, -1.0], [left, top, 1.0], [right, top, 1.0], [right, top, -1.0],
        // bottom
        [left, floor, -1.0], [right, floor, -1.0], [right, floor, 1.0], [left, floor, 1.0],
        // right
        [right, bottom, -1.0], [right, top, -1.0], [right, top, 1.0], [right, bottom, 1.0],
        // left
        [left, bottom, -1.0], [left, bottom, 1.0], [left, top, 1.0], [left, top, -1.0],
    ]
}

/// Per-vertex colours for a block of a single hue
pub const fn face_colors(rgb: [f32; 3]) -> [[f32; 4]; BLOCK_VERTEX_COUNT] {
    let mut colors = [[0.0; 4]; BLOCK_VERTEX_COUNT];
    let mut i = 0;
    while i < BLOCK_VERTEX_COUNT {
        // front and back faces are the first eight vertices
        let alpha = if i < 8 { 1.0 } else { SIDE_ALPHA };
        colors[i] = [rgb[0], rgb[1], rgb[2], alpha];
        i += 1;
    }
    colors
}

pub const HEAD: MeshData = MeshData {
    positions: block_positions(-2.0, 1.0, -2.0, 1.0, -2.0),
    colors: face_colors([0.8, 0.0, 0.0]),
    indices: BLOCK_INDICES,
};

pub const TORSO: MeshData = MeshData {
    positions: block_positions(-2.0, 1.0, -3.0, 1.0, -1.0),
    colors: face_colors([0.0, 0.8, 0.0]),
    indices: BLOCK_INDICES,
};

pub const ARM: MeshData = MeshData {
    positions: block_positions(-0.5, 1.0, -3.0, 1.0, -1.0),
    colors: face_colors([0.0, 0.0, 0.8]),
    indices: BLOCK_INDICES,
};

pub const FOOT: MeshData = MeshData {
    positions: block_positions(-0.5, 1.0, -3.0, 1.0, -1.0),
    colors: face_colors([0.8, 0.8, 0.0]),
    indices: BLOCK_INDICES,
};

/// Every table, named, for validation
pub const ALL_MESHES: [(&str, MeshData); 4] = [
    ("head", HEAD),
    ("torso", TORSO),
    ("arm", ARM),
    ("foot", FOOT),
];
