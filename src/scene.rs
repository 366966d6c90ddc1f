//! Figure layout and per-frame draw sequencing.
//!
//! ## Key Concepts
//!
//! - **BodyPart**: one draw per part, in `FIGURE_LAYOUT` order
//! - **MeshKind**: the geometry a part binds; arms and feet share theirs
//! - **Cascading offsets**: each part's offset is applied to the frame left
//!   behind by the previous part and is never undone within a frame
//! - **DrawSink**: the seam between composition and the graphics backend

use glam::{Mat4, Vec3};

use crate::camera::{projection_matrix, CameraPose};
use crate::constants::{
    HEAD_OFFSET, LEFT_ARM_OFFSET, LEFT_FOOT_OFFSET, RIGHT_ARM_OFFSET, RIGHT_FOOT_OFFSET,
};
use crate::error::ViewerError;
use crate::math::deg_to_rad;
use crate::matrix_stack::MatrixStack;
use crate::mesh_data::{self, MeshData};

/// Geometry shared between parts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MeshKind {
    Torso = 0,
    Head = 1,
    Arm = 2,
    Foot = 3,
}

impl MeshKind {
    pub const COUNT: usize = 4;

    pub const ALL: [MeshKind; Self::COUNT] =
        [MeshKind::Torso, MeshKind::Head, MeshKind::Arm, MeshKind::Foot];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// CPU tables this mesh is uploaded from
    pub const fn data(self) -> &'static MeshData {
        match self {
            MeshKind::Torso => &mesh_data::TORSO,
            MeshKind::Head => &mesh_data::HEAD,
            MeshKind::Arm => &mesh_data::ARM,
            MeshKind::Foot => &mesh_data::FOOT,
        }
    }
}

/// Unique identifier for each drawn part, in draw order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BodyPart {
    Torso = 0,
    Head = 1,
    LeftArm = 2,
    RightArm = 3,
    RightFoot = 4,
    LeftFoot = 5,
}

impl BodyPart {
    pub const COUNT: usize = 6;

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn mesh(self) -> MeshKind {
        match self {
            BodyPart::Torso => MeshKind::Torso,
            BodyPart::Head => MeshKind::Head,
            BodyPart::LeftArm | BodyPart::RightArm => MeshKind::Arm,
            BodyPart::RightFoot | BodyPart::LeftFoot => MeshKind::Foot,
        }
    }
}

/// Static placement of one part
#[derive(Debug, Clone, Copy)]
pub struct PartDef {
    pub part: BodyPart,
    /// Applied to the running frame before the part is pushed
    pub offset: Vec3,
    /// Whether the joint angle spins this part
    pub spins: bool,
}

/// The figure, in draw order.
pub const FIGURE_LAYOUT: [PartDef; BodyPart::COUNT] = [
    // Torso sits at the figure origin
    PartDef {
        part: BodyPart::Torso,
        offset: Vec3::ZERO,
        spins: true,
    },
    PartDef {
        part: BodyPart::Head,
        offset: HEAD_OFFSET,
        spins: true,
    },
    // Limbs carry on from the head frame
    PartDef {
        part: BodyPart::LeftArm,
        offset: LEFT_ARM_OFFSET,
        spins: false,
    },
    PartDef {
        part: BodyPart::RightArm,
        offset: RIGHT_ARM_OFFSET,
        spins: false,
    },
    PartDef {
        part: BodyPart::RightFoot,
        offset: RIGHT_FOOT_OFFSET,
        spins: false,
    },
    PartDef {
        part: BodyPart::LeftFoot,
        offset: LEFT_FOOT_OFFSET,
        spins: false,
    },
];

/// Receives the composed frame
pub trait DrawSink {
    /// Called once per frame before any draw
    fn set_projection(&mut self, projection: Mat4);

    /// Indexed triangle draw of `part`'s mesh with the given model-view
    fn draw(&mut self, part: BodyPart, model_view: Mat4);
}

/// One recorded draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub part: BodyPart,
    pub mesh: MeshKind,
    pub model_view: Mat4,
}

impl Default for DrawCall {
    fn default() -> Self {
        Self {
            part: BodyPart::Torso,
            mesh: MeshKind::Torso,
            model_view: Mat4::IDENTITY,
        }
    }
}

/// Fixed-capacity draw list, refilled every frame without allocating
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawList {
    pub projection: Mat4,
    calls: [DrawCall; BodyPart::COUNT],
    len: usize,
}

impl Default for DrawList {
    fn default() -> Self {
        Self {
            projection: Mat4::IDENTITY,
            calls: [DrawCall::default(); BodyPart::COUNT],
            len: 0,
        }
    }
}

impl DrawList {
    pub fn clear(&mut self) {
        self.len = 0;
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl DrawSink for DrawList {
    fn set_projection(&mut self, projection: Mat4) {
        self.projection = projection;
    }

    fn draw(&mut self, part: BodyPart, model_view: Mat4) {
        if self.len == self.calls.len() {
            log::warn!("Draw list full, dropping {:?}", part);
            return;
        }
        self.calls[self.len] = DrawCall {
            part,
            mesh: part.mesh(),
            model_view,
        };
        self.len += 1;
    }
}

/// Compose the figure for one frame and hand every part to `sink`.
///
/// The stack is reset first, so a frame never inherits frames from the last.
pub fn compose_and_draw<S: DrawSink>(
    camera: &CameraPose,
    joint_angle: f64,
    aspect: f32,
    stack: &mut MatrixStack,
    sink: &mut S,
) -> Result<(), ViewerError> {
    sink.set_projection(projection_matrix(aspect));

    stack.reset();
    stack.load(camera.view_matrix());

    let spin = deg_to_rad(joint_angle) as f32;
    for def in FIGURE_LAYOUT.iter() {
        if def.offset != Vec3::ZERO {
            stack.translate(def.offset);
        }

        stack.push();
        if def.spins {
            stack.rotate_y(spin);
        }
        sink.draw(def.part, stack.current());
        stack.pop()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    fn compose(camera: &CameraPose, joint_angle: f64) -> DrawList {
        let mut stack = MatrixStack::new();
        let mut list = DrawList::default();
        compose_and_draw(camera, joint_angle, 1.5, &mut stack, &mut list).unwrap();
        list
    }

    fn origin_of(call: &DrawCall) -> Vec3 {
        call.model_view.transform_point3(Vec3::ZERO)
    }

    #[test]
    fn test_six_draws_in_fixed_order() {
        let list = compose(&CameraPose::default(), 0.0);

        let parts: Vec<BodyPart> = list.calls().iter().map(|c| c.part).collect();
        assert_eq!(
            parts,
            vec![
                BodyPart::Torso,
                BodyPart::Head,
                BodyPart::LeftArm,
                BodyPart::RightArm,
                BodyPart::RightFoot,
                BodyPart::LeftFoot,
            ]
        );

        let meshes: Vec<MeshKind> = list.calls().iter().map(|c| c.mesh).collect();
        assert_eq!(
            meshes,
            vec![
                MeshKind::Torso,
                MeshKind::Head,
                MeshKind::Arm,
                MeshKind::Arm,
                MeshKind::Foot,
                MeshKind::Foot,
            ]
        );
    }

    #[test]
    fn test_repeated_composition_is_identical() {
        let camera = CameraPose::new(12.5, -230.0, DVec3::new(3.0, 0.4, 9.0));
        let first = compose(&camera, -37.0);
        let second = compose(&camera, -37.0);
        assert_eq!(first, second);
    }

    #[test]
    fn test_offsets_cascade_from_previous_part() {
        let list = compose(&CameraPose::default(), 0.0);
        // Camera at (0, 0.4, 20) looking down -Z
        let expected = [
            Vec3::new(0.0, -0.4, -20.0),
            Vec3::new(0.0, 2.6, -20.0),
            Vec3::new(1.5, -0.4, -20.0),
            Vec3::new(-3.0, -0.4, -20.0),
            Vec3::new(0.0, -4.4, -20.0),
            Vec3::new(-1.5, -4.4, -20.0),
        ];
        for (call, want) in list.calls().iter().zip(expected) {
            let got = origin_of(call);
            assert!(got.abs_diff_eq(want, 1e-5), "{:?}: {:?} != {:?}", call.part, got, want);
        }
    }

    #[test]
    fn test_joint_angle_spins_torso_and_head_only() {
        let still = compose(&CameraPose::default(), 0.0);
        let spun = compose(&CameraPose::default(), -90.0);

        for (a, b) in still.calls().iter().zip(spun.calls()) {
            let same = a.model_view.abs_diff_eq(b.model_view, 1e-5);
            match a.part {
                BodyPart::Torso | BodyPart::Head => assert!(!same, "{:?} should spin", a.part),
                _ => assert!(same, "{:?} should not spin", a.part),
            }
            // Spinning is about the part's own origin
            assert!(origin_of(a).abs_diff_eq(origin_of(b), 1e-5));
        }
    }

    #[test]
    fn test_stack_is_balanced_after_frame() {
        let mut stack = MatrixStack::new();
        let mut list = DrawList::default();
        compose_and_draw(&CameraPose::default(), 10.0, 1.0, &mut stack, &mut list).unwrap();
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn test_projection_handed_to_sink() {
        let list = compose(&CameraPose::default(), 0.0);
        assert_eq!(list.projection, projection_matrix(1.5));
    }

    #[test]
    fn test_draw_list_drops_overflow() {
        let mut list = DrawList::default();
        for _ in 0..BodyPart::COUNT + 2 {
            list.draw(BodyPart::Head, Mat4::IDENTITY);
        }
        assert_eq!(list.len(), BodyPart::COUNT);

        list.clear();
        assert!(list.is_empty());
    }

    #[test]
    fn test_layout_order_matches_part_index() {
        for (i, def) in FIGURE_LAYOUT.iter().enumerate() {
            assert_eq!(def.part.index(), i);
        }
        for kind in MeshKind::ALL {
            assert_eq!(MeshKind::ALL[kind.index()], kind);
            assert_eq!(kind.data().indices.len(), crate::mesh_data::BLOCK_INDEX_COUNT);
        }
    }
}
