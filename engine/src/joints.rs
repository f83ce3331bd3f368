//! Body joint taxonomy and per-joint marker styling.

/// Default joint marker radius.
pub const BASE_JOINT_RADIUS: f32 = 0.05;

/// Names of all joints reported by the body tracker, in tracker order.
pub const JOINT_NAMES: [&str; 91] = [
    "root",
    "hips_joint",
    "left_upLeg_joint",
    "left_leg_joint",
    "left_foot_joint",
    "left_toes_joint",
    "left_toesEnd_joint",
    "right_upLeg_joint",
    "right_leg_joint",
    "right_foot_joint",
    "right_toes_joint",
    "right_toesEnd_joint",
    "spine_1_joint",
    "spine_2_joint",
    "spine_3_joint",
    "spine_4_joint",
    "spine_5_joint",
    "spine_6_joint",
    "spine_7_joint",
    "left_shoulder_1_joint",
    "left_arm_joint",
    "left_forearm_joint",
    "left_hand_joint",
    "left_handIndexStart_joint",
    "left_handIndex_1_joint",
    "left_handIndex_2_joint",
    "left_handIndex_3_joint",
    "left_handIndexEnd_joint",
    "left_handMidStart_joint",
    "left_handMid_1_joint",
    "left_handMid_2_joint",
    "left_handMid_3_joint",
    "left_handMidEnd_joint",
    "left_handPinkyStart_joint",
    "left_handPinky_1_joint",
    "left_handPinky_2_joint",
    "left_handPinky_3_joint",
    "left_handPinkyEnd_joint",
    "left_handRingStart_joint",
    "left_handRing_1_joint",
    "left_handRing_2_joint",
    "left_handRing_3_joint",
    "left_handRingEnd_joint",
    "left_handThumbStart_joint",
    "left_handThumb_1_joint",
    "left_handThumb_2_joint",
    "left_handThumbEnd_joint",
    "neck_1_joint",
    "neck_2_joint",
    "neck_3_joint",
    "neck_4_joint",
    "head_joint",
    "jaw_joint",
    "chin_joint",
    "left_eye_joint",
    "left_eyeLowerLid_joint",
    "left_eyeUpperLid_joint",
    "left_eyeball_joint",
    "nose_joint",
    "right_eye_joint",
    "right_eyeLowerLid_joint",
    "right_eyeUpperLid_joint",
    "right_eyeball_joint",
    "right_shoulder_1_joint",
    "right_arm_joint",
    "right_forearm_joint",
    "right_hand_joint",
    "right_handIndexStart_joint",
    "right_handIndex_1_joint",
    "right_handIndex_2_joint",
    "right_handIndex_3_joint",
    "right_handIndexEnd_joint",
    "right_handMidStart_joint",
    "right_handMid_1_joint",
    "right_handMid_2_joint",
    "right_handMid_3_joint",
    "right_handMidEnd_joint",
    "right_handPinkyStart_joint",
    "right_handPinky_1_joint",
    "right_handPinky_2_joint",
    "right_handPinky_3_joint",
    "right_handPinkyEnd_joint",
    "right_handRingStart_joint",
    "right_handRing_1_joint",
    "right_handRing_2_joint",
    "right_handRing_3_joint",
    "right_handRingEnd_joint",
    "right_handThumbStart_joint",
    "right_handThumb_1_joint",
    "right_handThumb_2_joint",
    "right_handThumbEnd_joint",
];

const HALF_SIZE_JOINTS: [&str; 7] = [
    "neck_1_joint",
    "neck_2_joint",
    "neck_3_joint",
    "neck_4_joint",
    "head_joint",
    "left_shoulder_1_joint",
    "right_shoulder_1_joint",
];

const FACE_JOINTS: [&str; 11] = [
    "jaw_joint",
    "chin_joint",
    "left_eye_joint",
    "left_eyeLowerLid_joint",
    "left_eyeUpperLid_joint",
    "left_eyeball_joint",
    "nose_joint",
    "right_eye_joint",
    "right_eyeLowerLid_joint",
    "right_eyeUpperLid_joint",
    "right_eyeball_joint",
];

/// Whether joint pose comes from the sensor directly
/// or follows the closest tracked parent.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum ColorClass {
    Tracked,
    Inferred,
}

impl ColorClass {
    /// Linear RGBA color of markers in this class.
    pub fn rgba(&self) -> [f32; 4] {
        match self {
            ColorClass::Tracked => [0.0, 1.0, 0.0, 1.0],
            ColorClass::Inferred => [1.0, 1.0, 0.0, 1.0],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JointStyle {
    pub radius: f32,
    pub color: ColorClass,
}

impl JointStyle {
    /// Style for named joint with default base radius.
    pub fn for_joint(name: &str) -> Self {
        Self::for_joint_with_base(name, BASE_JOINT_RADIUS)
    }

    /// Style for named joint.
    /// First matching rule wins, unknown names get `base` radius.
    pub fn for_joint_with_base(name: &str, base: f32) -> Self {
        let (factor, color) = if HALF_SIZE_JOINTS.contains(&name) {
            (0.5, ColorClass::Tracked)
        } else if FACE_JOINTS.contains(&name) {
            (0.2, ColorClass::Inferred)
        } else if name.starts_with("spine_") {
            (0.75, ColorClass::Tracked)
        } else if name == "left_hand_joint" || name == "right_hand_joint" {
            (1.0, ColorClass::Tracked)
        } else if name.starts_with("left_hand") || name.starts_with("right_hand")
        {
            (0.25, ColorClass::Inferred)
        } else if name.starts_with("left_toes") || name.starts_with("right_toes")
        {
            (0.5, ColorClass::Inferred)
        } else {
            (1.0, ColorClass::Tracked)
        };

        JointStyle {
            radius: base * factor,
            color,
        }
    }
}

#[cfg(test)]
mod tests {
    use {super::*, std::collections::HashSet};

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn joint_names_are_unique() {
        let set: HashSet<_> = JOINT_NAMES.iter().collect();
        assert_eq!(set.len(), JOINT_NAMES.len());
    }

    #[test]
    fn styling_is_stable() {
        for name in JOINT_NAMES.iter() {
            let first = JointStyle::for_joint(name);
            let second = JointStyle::for_joint(name);
            assert_eq!(first, second);
            assert!(first.radius > 0.0, "{}", name);
        }
    }

    #[test]
    fn styling_rules() {
        let cases = [
            ("head_joint", 0.025, ColorClass::Tracked),
            ("neck_3_joint", 0.025, ColorClass::Tracked),
            ("right_shoulder_1_joint", 0.025, ColorClass::Tracked),
            ("jaw_joint", 0.01, ColorClass::Inferred),
            ("left_eyeball_joint", 0.01, ColorClass::Inferred),
            ("spine_4_joint", 0.0375, ColorClass::Tracked),
            ("left_hand_joint", 0.05, ColorClass::Tracked),
            ("right_hand_joint", 0.05, ColorClass::Tracked),
            ("left_handIndex_2_joint", 0.0125, ColorClass::Inferred),
            ("right_handThumbEnd_joint", 0.0125, ColorClass::Inferred),
            ("left_toes_joint", 0.025, ColorClass::Inferred),
            ("right_toesEnd_joint", 0.025, ColorClass::Inferred),
            ("hips_joint", 0.05, ColorClass::Tracked),
            ("left_forearm_joint", 0.05, ColorClass::Tracked),
        ];

        for &(name, radius, color) in &cases {
            let style = JointStyle::for_joint(name);
            assert!(approx(style.radius, radius), "{}: {}", name, style.radius);
            assert_eq!(style.color, color, "{}", name);
        }
    }

    #[test]
    fn unknown_names_fall_back_to_default() {
        for name in &["", "tail_joint", "spine", "left_handle"] {
            let style = JointStyle::for_joint(name);
            // "left_handle" still starts with "left_hand".
            if name.starts_with("left_hand") {
                assert_eq!(style.color, ColorClass::Inferred);
            } else {
                assert!(approx(style.radius, BASE_JOINT_RADIUS));
                assert_eq!(style.color, ColorClass::Tracked);
            }
        }
    }

    #[test]
    fn custom_base_scales_radius() {
        let style = JointStyle::for_joint_with_base("head_joint", 0.1);
        assert!(approx(style.radius, 0.05));
    }

    #[test]
    fn catalog_follows_tracker_order() {
        assert_eq!(JOINT_NAMES[0], "root");
        assert_eq!(JOINT_NAMES[1], "hips_joint");
        assert_eq!(JOINT_NAMES[51], "head_joint");
    }
}
