use {
    crate::{
        bones::BoneSegment,
        joints::JointStyle,
        scene::{Global3, Local3},
        util::look_rotation,
    },
    hecs::{Entity, World},
    nalgebra as na,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Sphere {
        radius: f32,
    },
    /// Box with rounded edges. Long axis is local `Z`.
    Box {
        size: na::Vector3<f32>,
        corner_radius: f32,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub color: [f32; 4],
    pub roughness: f32,
    pub metallic: bool,
}

impl Material {
    pub fn color(color: [f32; 4]) -> Self {
        Material {
            color,
            roughness: 0.5,
            metallic: false,
        }
    }

    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness;
        self
    }

    pub fn metallic(mut self) -> Self {
        self.metallic = true;
        self
    }
}

/// Visual primitive handed over to the renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Primitive {
    pub shape: Shape,
    pub material: Material,
}

/// Marks joint marker entity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JointMarker {
    pub name: &'static str,
}

/// Marks bone entity and keeps its latest geometry.
#[derive(Clone, Debug, PartialEq)]
pub struct BoneMarker {
    pub name: String,
    pub segment: BoneSegment,
}

pub const BONE_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Spawns sphere marker for a joint under `parent`.
pub fn spawn_joint(
    world: &mut World,
    parent: Entity,
    name: &'static str,
    style: JointStyle,
    pose: na::Isometry3<f32>,
) -> Entity {
    let material = Material::color(style.color.rgba()).with_roughness(0.8);

    world.spawn((
        Primitive {
            shape: Shape::Sphere {
                radius: style.radius,
            },
            material,
        },
        JointMarker { name },
        Local3::from_iso(parent, pose),
        Global3::identity(),
    ))
}

/// Spawns box spanning the bone segment under `parent`.
///
/// Box is centered between endpoints
/// and its long axis points toward `segment.to`.
pub fn spawn_bone(
    world: &mut World,
    parent: Entity,
    name: String,
    segment: BoneSegment,
    diameter: f32,
) -> Entity {
    let center = segment.center();
    let rotation = look_rotation(&center, &segment.to)
        .unwrap_or_else(na::UnitQuaternion::identity);

    let material = Material::color(BONE_COLOR).with_roughness(0.5).metallic();

    world.spawn((
        Primitive {
            shape: Shape::Box {
                size: na::Vector3::new(diameter, diameter, segment.length()),
                corner_radius: diameter / 2.0,
            },
            material,
        },
        BoneMarker { name, segment },
        Local3::from_iso(
            parent,
            na::Isometry3::from_parts(na::Translation3::from(center), rotation),
        ),
        Global3::identity(),
    ))
}
