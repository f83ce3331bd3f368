use {
    bodytrack::{AnchorId, BodyAnchor, JOINT_NAMES},
    nalgebra as na,
};

/// Procedurally animated body standing in T-pose.
pub struct SyntheticBody {
    id: AnchorId,
    root: na::Vector3<f32>,
}

impl SyntheticBody {
    pub fn new(id: AnchorId, root: na::Vector3<f32>) -> Self {
        SyntheticBody { id, root }
    }

    /// Body pose at time `t` in seconds.
    ///
    /// Body sways sideways and turns head.
    /// Left hand drops out of tracking for a moment every few seconds.
    pub fn frame(&self, t: f32) -> BodyAnchor {
        let sway = na::Vector3::new(
            0.3 * t.sin(),
            0.02 * (2.0 * t).sin(),
            0.0,
        );
        let mut anchor =
            BodyAnchor::from_translation(self.id, self.root + sway);

        let hand_occluded = t % 4.0 > 3.5;
        let head_yaw = na::UnitQuaternion::from_axis_angle(
            &na::Vector3::y_axis(),
            0.4 * (0.5 * t).sin(),
        );

        for &name in JOINT_NAMES.iter() {
            if hand_occluded && name.starts_with("left_hand") {
                continue;
            }

            let offset = t_pose_offset(name);
            let rotation = if name == "head_joint" {
                head_yaw
            } else {
                na::UnitQuaternion::identity()
            };

            let iso = na::Isometry3::from_parts(
                na::Translation3::from(offset),
                rotation,
            );
            anchor = anchor.with_joint(name, iso.to_homogeneous());
        }

        anchor
    }
}

/// Joint offset from hips in a T-pose.
fn t_pose_offset(name: &str) -> na::Vector3<f32> {
    let (side, base) = if let Some(base) = name.strip_prefix("left_") {
        (1.0, base)
    } else if let Some(base) = name.strip_prefix("right_") {
        (-1.0, base)
    } else {
        (1.0, name)
    };

    let [x, y, z] = match base {
        "upLeg_joint" => [0.1, -0.05, 0.0],
        "leg_joint" => [0.1, -0.5, 0.0],
        "foot_joint" => [0.1, -0.9, 0.0],
        "toes_joint" => [0.1, -0.95, 0.1],
        "toesEnd_joint" => [0.1, -0.95, 0.18],
        "shoulder_1_joint" => [0.08, 0.45, 0.0],
        "arm_joint" => [0.18, 0.45, 0.0],
        "forearm_joint" => [0.45, 0.45, 0.0],
        "hand_joint" => [0.7, 0.45, 0.0],
        "eye_joint" => [0.03, 0.68, 0.08],
        "eyeLowerLid_joint" => [0.03, 0.67, 0.09],
        "eyeUpperLid_joint" => [0.03, 0.69, 0.09],
        "eyeball_joint" => [0.03, 0.68, 0.07],
        "neck_1_joint" => [0.0, 0.47, 0.0],
        "neck_2_joint" => [0.0, 0.5, 0.0],
        "neck_3_joint" => [0.0, 0.53, 0.0],
        "neck_4_joint" => [0.0, 0.56, 0.0],
        "head_joint" => [0.0, 0.6, 0.0],
        "jaw_joint" => [0.0, 0.58, 0.05],
        "chin_joint" => [0.0, 0.55, 0.08],
        "nose_joint" => [0.0, 0.65, 0.1],
        _ => {
            if let Some(index) = spine_index(base) {
                [0.0, 0.06 * index as f32, 0.0]
            } else if let Some([x, y, z]) = finger_offset(base) {
                [0.7 + x, 0.45 + y, z]
            } else {
                // root and hips
                [0.0, 0.0, 0.0]
            }
        }
    };

    na::Vector3::new(x * side, y, z)
}

fn spine_index(base: &str) -> Option<u32> {
    base.strip_prefix("spine_")?
        .strip_suffix("_joint")?
        .parse()
        .ok()
}

/// Finger joint offset from the hand.
fn finger_offset(base: &str) -> Option<[f32; 3]> {
    let rest = base.strip_prefix("hand")?.strip_suffix("_joint")?;

    let fingers: [(&str, f32); 4] =
        [("Index", 0.03), ("Mid", 0.01), ("Ring", -0.01), ("Pinky", -0.03)];

    if let Some(segment) = rest.strip_prefix("Thumb") {
        let step = segment_step(segment)?;
        let t = step as f32;
        return Some([0.02 * (t + 1.0), -0.01, 0.04 + 0.01 * t]);
    }

    for &(finger, z) in &fingers {
        if let Some(segment) = rest.strip_prefix(finger) {
            let step = segment_step(segment)?;
            return Some([0.03 + 0.025 * step as f32, 0.0, z]);
        }
    }

    None
}

fn segment_step(segment: &str) -> Option<u32> {
    match segment {
        "Start" => Some(0),
        "_1" => Some(1),
        "_2" => Some(2),
        "_3" => Some(3),
        "End" => Some(4),
        _ => None,
    }
}
