use {crate::anchor::BodyAnchor, nalgebra as na};

/// Connection between two named joints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Bone {
    pub from: &'static str,
    pub to: &'static str,
}

impl Bone {
    pub const fn new(from: &'static str, to: &'static str) -> Self {
        Bone { from, to }
    }

    /// Unique bone name, `"<from>-<to>"`.
    pub fn name(&self) -> String {
        format!("{}-{}", self.from, self.to)
    }

    pub fn touches(&self, joint: &str) -> bool {
        self.from == joint || self.to == joint
    }

    /// Resolves both endpoints against the anchor.
    /// Returns `None` if either joint transform is unavailable.
    pub fn resolve(&self, anchor: &BodyAnchor) -> Option<BoneSegment> {
        let from = anchor.joint_position(self.from)?;
        let to = anchor.joint_position(self.to)?;
        Some(BoneSegment::new(from, to))
    }
}

macro_rules! finger {
    ($side:literal, $finger:literal) => {
        [
            Bone::new(
                concat!($side, "_hand_joint"),
                concat!($side, "_hand", $finger, "Start_joint"),
            ),
            Bone::new(
                concat!($side, "_hand", $finger, "Start_joint"),
                concat!($side, "_hand", $finger, "_1_joint"),
            ),
            Bone::new(
                concat!($side, "_hand", $finger, "_1_joint"),
                concat!($side, "_hand", $finger, "_2_joint"),
            ),
            Bone::new(
                concat!($side, "_hand", $finger, "_2_joint"),
                concat!($side, "_hand", $finger, "_3_joint"),
            ),
            Bone::new(
                concat!($side, "_hand", $finger, "_3_joint"),
                concat!($side, "_hand", $finger, "End_joint"),
            ),
        ]
    };
}

macro_rules! thumb {
    ($side:literal) => {
        [
            Bone::new(
                concat!($side, "_hand_joint"),
                concat!($side, "_handThumbStart_joint"),
            ),
            Bone::new(
                concat!($side, "_handThumbStart_joint"),
                concat!($side, "_handThumb_1_joint"),
            ),
            Bone::new(
                concat!($side, "_handThumb_1_joint"),
                concat!($side, "_handThumb_2_joint"),
            ),
            Bone::new(
                concat!($side, "_handThumb_2_joint"),
                concat!($side, "_handThumbEnd_joint"),
            ),
        ]
    };
}

const BODY: [Bone; 27] = [
    // Arms
    Bone::new("left_shoulder_1_joint", "left_arm_joint"),
    Bone::new("left_arm_joint", "left_forearm_joint"),
    Bone::new("left_forearm_joint", "left_hand_joint"),
    Bone::new("right_shoulder_1_joint", "right_arm_joint"),
    Bone::new("right_arm_joint", "right_forearm_joint"),
    Bone::new("right_forearm_joint", "right_hand_joint"),
    // Torso
    Bone::new("spine_7_joint", "left_shoulder_1_joint"),
    Bone::new("spine_7_joint", "right_shoulder_1_joint"),
    Bone::new("neck_1_joint", "spine_7_joint"),
    Bone::new("neck_1_joint", "head_joint"),
    Bone::new("spine_7_joint", "spine_6_joint"),
    Bone::new("spine_6_joint", "spine_5_joint"),
    Bone::new("spine_5_joint", "spine_4_joint"),
    Bone::new("spine_4_joint", "spine_3_joint"),
    Bone::new("spine_3_joint", "spine_2_joint"),
    Bone::new("spine_2_joint", "spine_1_joint"),
    Bone::new("spine_1_joint", "hips_joint"),
    // Legs
    Bone::new("hips_joint", "left_upLeg_joint"),
    Bone::new("left_upLeg_joint", "left_leg_joint"),
    Bone::new("left_leg_joint", "left_foot_joint"),
    Bone::new("left_foot_joint", "left_toes_joint"),
    Bone::new("left_toes_joint", "left_toesEnd_joint"),
    Bone::new("hips_joint", "right_upLeg_joint"),
    Bone::new("right_upLeg_joint", "right_leg_joint"),
    Bone::new("right_leg_joint", "right_foot_joint"),
    Bone::new("right_foot_joint", "right_toes_joint"),
    Bone::new("right_toes_joint", "right_toesEnd_joint"),
];

const LEFT_HAND: [[Bone; 5]; 4] = [
    finger!("left", "Index"),
    finger!("left", "Mid"),
    finger!("left", "Ring"),
    finger!("left", "Pinky"),
];

const RIGHT_HAND: [[Bone; 5]; 4] = [
    finger!("right", "Index"),
    finger!("right", "Mid"),
    finger!("right", "Ring"),
    finger!("right", "Pinky"),
];

const LEFT_THUMB: [Bone; 4] = thumb!("left");
const RIGHT_THUMB: [Bone; 4] = thumb!("right");

/// Iterates over all bones of the body skeleton.
pub fn bones() -> impl Iterator<Item = &'static Bone> + Clone {
    BODY.iter()
        .chain(LEFT_HAND.iter().flatten())
        .chain(LEFT_THUMB.iter())
        .chain(RIGHT_HAND.iter().flatten())
        .chain(RIGHT_THUMB.iter())
}

/// Bone geometry in the skeleton frame for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoneSegment {
    pub from: na::Vector3<f32>,
    pub to: na::Vector3<f32>,
}

impl BoneSegment {
    pub fn new(from: na::Vector3<f32>, to: na::Vector3<f32>) -> Self {
        BoneSegment { from, to }
    }

    pub fn center(&self) -> na::Vector3<f32> {
        (self.from + self.to) * 0.5
    }

    pub fn length(&self) -> f32 {
        (self.to - self.from).norm()
    }
}
