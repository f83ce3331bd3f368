use {crate::util::decompose_transform3, nalgebra as na, std::collections::HashMap};

/// Stable identifier the tracking subsystem assigns to an anchor.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct AnchorId(pub u64);

/// One frame of a detected body's pose.
///
/// `transform` places the body root in world space.
/// Joint transforms are expressed relative to that root.
/// A joint missing from the lookup is unresolved for this frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BodyAnchor {
    pub id: AnchorId,
    pub transform: na::Matrix4<f32>,
    #[serde(default)]
    pub joints: HashMap<String, na::Matrix4<f32>>,
}

impl BodyAnchor {
    pub fn new(id: AnchorId, transform: na::Matrix4<f32>) -> Self {
        BodyAnchor {
            id,
            transform,
            joints: HashMap::new(),
        }
    }

    pub fn from_translation(id: AnchorId, tr: na::Vector3<f32>) -> Self {
        Self::new(id, na::Matrix4::new_translation(&tr))
    }

    pub fn with_joint(
        mut self,
        name: impl Into<String>,
        transform: na::Matrix4<f32>,
    ) -> Self {
        self.joints.insert(name.into(), transform);
        self
    }

    pub fn with_joint_translation(
        self,
        name: impl Into<String>,
        tr: na::Vector3<f32>,
    ) -> Self {
        self.with_joint(name, na::Matrix4::new_translation(&tr))
    }

    /// Transform of the named joint relative to the body root.
    pub fn model_transform(&self, name: &str) -> Option<&na::Matrix4<f32>> {
        self.joints.get(name)
    }

    /// Translation part of the root transform.
    pub fn root_position(&self) -> na::Vector3<f32> {
        self.transform.column(3).xyz()
    }

    /// World position of the named joint.
    ///
    /// Only the root translation is applied, root rotation is not.
    pub fn joint_position(&self, name: &str) -> Option<na::Vector3<f32>> {
        let local = self.model_transform(name)?;
        Some(local.column(3).xyz() + self.root_position())
    }

    /// Position and orientation of the named joint in the skeleton frame.
    pub fn joint_pose(&self, name: &str) -> Option<na::Isometry3<f32>> {
        let local = self.model_transform(name)?;
        let (iso, _) = decompose_transform3(local);
        Some(na::Isometry3::from_parts(
            na::Translation3::from(iso.translation.vector + self.root_position()),
            iso.rotation,
        ))
    }
}

/// Anchor update delivered by the tracking subsystem.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Anchor {
    Body(BodyAnchor),

    /// Any other anchor kind (planes, images, faces).
    /// Carried so that callers may forward raw batches.
    Other {
        id: AnchorId,
        transform: na::Matrix4<f32>,
    },
}

impl Anchor {
    pub fn id(&self) -> AnchorId {
        match self {
            Anchor::Body(body) => body.id,
            Anchor::Other { id, .. } => *id,
        }
    }

    pub fn as_body(&self) -> Option<&BodyAnchor> {
        match self {
            Anchor::Body(body) => Some(body),
            Anchor::Other { .. } => None,
        }
    }
}

impl From<BodyAnchor> for Anchor {
    fn from(body: BodyAnchor) -> Self {
        Anchor::Body(body)
    }
}
