//! Skeletal overlay for body-tracking anchors.
//!
//! Body anchors submitted to [`Engine`] are turned into a persistent
//! skeleton of joint spheres and bone boxes living in an ECS [`hecs::World`],
//! parented under a fixed world anchor node.

pub mod anchor;
pub mod bones;
pub mod config;
pub mod engine;
pub mod joints;
pub mod primitive;
pub mod scene;
pub mod session;
pub mod skeleton;
pub mod util;

pub use self::{
    anchor::{Anchor, AnchorId, BodyAnchor},
    bones::{Bone, BoneSegment},
    config::{Config, ConfigError},
    engine::{Engine, System, SystemContext},
    joints::{ColorClass, JointStyle, JOINT_NAMES},
    primitive::{BoneMarker, JointMarker, Material, Primitive, Shape},
    scene::{Global3, Local3, WorldAnchor},
    session::TrackingSession,
    skeleton::{BodySkeleton, SkeletonStyle},
};
