use {
    crate::{
        anchor::{Anchor, AnchorId, BodyAnchor},
        skeleton::{BodySkeleton, SkeletonStyle},
    },
    hecs::{Entity, World},
};

/// Keeps the skeleton of the tracked body in sync with anchor updates.
///
/// Tracks at most one body. Anchors of any other body
/// are applied to the same skeleton.
pub struct TrackingSession {
    anchor_node: Entity,
    style: SkeletonStyle,
    skeleton: Option<BodySkeleton>,
}

impl TrackingSession {
    /// Creates session that attaches skeleton to `anchor_node`.
    pub fn new(anchor_node: Entity, style: SkeletonStyle) -> Self {
        TrackingSession {
            anchor_node,
            style,
            skeleton: None,
        }
    }

    pub fn anchor_node(&self) -> Entity {
        self.anchor_node
    }

    pub fn skeleton(&self) -> Option<&BodySkeleton> {
        self.skeleton.as_ref()
    }

    /// Identifier of the body last applied to the skeleton.
    pub fn tracked_body(&self) -> Option<AnchorId> {
        self.skeleton.as_ref().map(BodySkeleton::body)
    }

    /// Handles batch of updated anchors.
    /// Non-body anchors are ignored.
    pub fn did_update(&mut self, world: &mut World, anchors: &[Anchor]) {
        for body in anchors.iter().filter_map(Anchor::as_body) {
            self.apply(world, body);
        }
    }

    /// Creates skeleton on first body anchor, updates it afterwards.
    pub fn apply(&mut self, world: &mut World, body: &BodyAnchor) {
        match &mut self.skeleton {
            Some(skeleton) => skeleton.update(body, world),
            None => {
                tracing::info!("Body {:?} detected", body.id);
                let skeleton =
                    BodySkeleton::new(body, self.anchor_node, &self.style, world);
                self.skeleton = Some(skeleton);
            }
        }
    }

    /// Drops the skeleton.
    /// Next body anchor creates a new one.
    pub fn reset(&mut self, world: &mut World) {
        if let Some(skeleton) = self.skeleton.take() {
            tracing::info!("Body {:?} skeleton removed", skeleton.body());
            skeleton.despawn(world);
        }
    }
}
