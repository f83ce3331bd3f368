use {
    crate::{
        anchor::{AnchorId, BodyAnchor},
        bones::{bones, BoneSegment},
        joints::{JointStyle, BASE_JOINT_RADIUS, JOINT_NAMES},
        primitive::{spawn_bone, spawn_joint, BoneMarker},
        scene::{Global3, Local3},
        util::look_rotation,
    },
    hecs::{Entity, World},
    nalgebra as na,
    std::collections::HashMap,
};

/// Marker sizes of the skeleton overlay.
#[derive(Clone, Copy, Debug, PartialEq, serde::Deserialize)]
pub struct SkeletonStyle {
    #[serde(default = "default_joint_radius")]
    pub joint_radius: f32,

    #[serde(default = "default_bone_diameter")]
    pub bone_diameter: f32,
}

impl Default for SkeletonStyle {
    fn default() -> Self {
        SkeletonStyle {
            joint_radius: default_joint_radius(),
            bone_diameter: default_bone_diameter(),
        }
    }
}

fn default_joint_radius() -> f32 {
    BASE_JOINT_RADIUS
}

fn default_bone_diameter() -> f32 {
    0.04
}

/// Visual skeleton of one tracked body.
///
/// Owns a scene node parented to the world anchor,
/// a sphere per joint and a box per bone, all children of that node.
/// Can only be built from a body anchor.
#[derive(Debug)]
pub struct BodySkeleton {
    entity: Entity,
    parent: Entity,
    joints: HashMap<&'static str, Entity>,
    bones: HashMap<String, Entity>,
    body: AnchorId,
}

impl BodySkeleton {
    /// Spawns skeleton for the body under `parent` node.
    ///
    /// All joints are created. Bones with unresolved endpoints are omitted
    /// and will not be created by later updates.
    pub fn new(
        anchor: &BodyAnchor,
        parent: Entity,
        style: &SkeletonStyle,
        world: &mut World,
    ) -> Self {
        let entity = world.spawn((Local3::identity(parent), Global3::identity()));

        let mut joints = HashMap::with_capacity(JOINT_NAMES.len());
        for &name in JOINT_NAMES.iter() {
            let joint_style =
                JointStyle::for_joint_with_base(name, style.joint_radius);
            let pose = anchor
                .joint_pose(name)
                .unwrap_or_else(na::Isometry3::identity);

            let joint = spawn_joint(world, entity, name, joint_style, pose);
            joints.insert(name, joint);
        }

        let mut bone_entities = HashMap::new();
        for bone in bones() {
            let segment = match bone.resolve(anchor) {
                Some(segment) => segment,
                None => {
                    tracing::debug!("Bone '{}' is not resolved and skipped", bone.name());
                    continue;
                }
            };

            let name = bone.name();
            let bone_entity = spawn_bone(
                world,
                entity,
                name.clone(),
                segment,
                style.bone_diameter,
            );
            bone_entities.insert(name, bone_entity);
        }

        tracing::info!(
            "Body skeleton created for {:?} with {} joints and {} bones",
            anchor.id,
            joints.len(),
            bone_entities.len(),
        );

        BodySkeleton {
            entity,
            parent,
            joints,
            bones: bone_entities,
            body: anchor.id,
        }
    }

    /// Moves joints and bones to the pose of the anchor.
    ///
    /// Joints and bones whose transforms are unresolved keep previous pose.
    pub fn update(&mut self, anchor: &BodyAnchor, world: &World) {
        let mut skipped = 0;

        for &name in JOINT_NAMES.iter() {
            let joint = match self.joints.get(name) {
                Some(joint) => *joint,
                None => continue,
            };

            let pose = match anchor.joint_pose(name) {
                Some(pose) => pose,
                None => {
                    skipped += 1;
                    continue;
                }
            };

            if let Ok(mut local) = world.get_mut::<Local3>(joint) {
                local.iso = pose;
            }
        }

        for bone in bones() {
            let name = bone.name();
            let entity = match self.bones.get(&name) {
                Some(entity) => *entity,
                None => continue,
            };

            let segment = match bone.resolve(anchor) {
                Some(segment) => segment,
                None => {
                    skipped += 1;
                    continue;
                }
            };

            let center = segment.center();
            if let Ok(mut local) = world.get_mut::<Local3>(entity) {
                local.iso.translation = na::Translation3::from(center);
                if let Some(rotation) = look_rotation(&center, &segment.to) {
                    local.iso.rotation = rotation;
                }
            }

            if let Ok(mut marker) = world.get_mut::<BoneMarker>(entity) {
                marker.segment = segment;
            }
        }

        if self.body != anchor.id {
            tracing::debug!(
                "Body skeleton switched from {:?} to {:?}",
                self.body,
                anchor.id
            );
            self.body = anchor.id;
        }

        tracing::trace!("Body skeleton updated, {} entries unresolved", skipped);
    }

    /// Skeleton node entity.
    pub fn entity(&self) -> Entity {
        self.entity
    }

    /// Node the skeleton is attached to.
    pub fn parent(&self) -> Entity {
        self.parent
    }

    /// Body last applied to this skeleton.
    pub fn body(&self) -> AnchorId {
        self.body
    }

    pub fn joint(&self, name: &str) -> Option<Entity> {
        self.joints.get(name).copied()
    }

    pub fn bone(&self, name: &str) -> Option<Entity> {
        self.bones.get(name).copied()
    }

    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }

    pub fn bone_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.bones.keys().map(String::as_str)
    }

    /// Current joint pose relative to skeleton node.
    pub fn joint_pose(&self, world: &World, name: &str) -> Option<na::Isometry3<f32>> {
        let joint = self.joint(name)?;
        let local = world.get::<Local3>(joint).ok()?;
        Some(local.iso)
    }

    /// Current bone pose relative to skeleton node.
    pub fn bone_pose(&self, world: &World, name: &str) -> Option<na::Isometry3<f32>> {
        let bone = self.bone(name)?;
        let local = world.get::<Local3>(bone).ok()?;
        Some(local.iso)
    }

    /// Geometry of the bone as of its last resolved frame.
    pub fn bone_segment(&self, world: &World, name: &str) -> Option<BoneSegment> {
        let bone = self.bone(name)?;
        let marker = world.get::<BoneMarker>(bone).ok()?;
        Some(marker.segment)
    }

    /// Removes skeleton node and all its primitives from the world.
    pub fn despawn(self, world: &mut World) {
        for (_, entity) in self.joints.into_iter() {
            let _ = world.despawn(entity);
        }
        for (_, entity) in self.bones.into_iter() {
            let _ = world.despawn(entity);
        }
        let _ = world.despawn(self.entity);
    }
}
