use nalgebra as na;

/// Splits homogeneous transform into isometry and per-axis scale.
///
/// Translation is taken from the last column,
/// rotation from the upper 3x3 block with scale divided out.
pub fn decompose_transform3(
    m: &na::Matrix4<f32>,
) -> (na::Isometry3<f32>, na::Vector3<f32>) {
    let m = *m;
    let t: na::Vector3<f32> = m.column(3).xyz();

    let mut r = m.remove_column(3).remove_row(3);
    let mut s = na::Vector3::new(
        r.column(0).norm(),
        r.column(1).norm(),
        r.column(2).norm(),
    );

    if s.iter().any(|c| *c <= f32::EPSILON) {
        // Degenerate basis. Keep translation only.
        return (
            na::Isometry3::from_parts(
                na::Translation3::from(t),
                na::UnitQuaternion::identity(),
            ),
            s,
        );
    }

    let sign = r.determinant().signum();
    s *= sign;
    r *= sign;

    r *= na::Matrix3::from_diagonal(&s.map(|c| 1.0 / c));

    let r = na::Rotation3::from_matrix(&r);
    let r = na::UnitQuaternion::from_rotation_matrix(&r);

    let iso = na::Isometry3::from_parts(na::Translation3::from(t), r);
    (iso, s)
}

/// Rotation that points local `-Z` axis from `from` toward `at`,
/// keeping local `+Y` as close to world up as possible.
///
/// Returns `None` when both points coincide.
pub fn look_rotation(
    from: &na::Vector3<f32>,
    at: &na::Vector3<f32>,
) -> Option<na::UnitQuaternion<f32>> {
    let dir = at - from;
    let len = dir.norm();
    if len <= f32::EPSILON {
        return None;
    }

    let dir = dir / len;
    let up = if dir.y.abs() > 1.0 - 1e-4 {
        // Looking straight up or down. World up is degenerate.
        na::Vector3::z()
    } else {
        na::Vector3::y()
    };

    Some(na::UnitQuaternion::face_towards(&-dir, &up))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decompose_extracts_translation_and_rotation() {
        let rotation =
            na::UnitQuaternion::from_axis_angle(&na::Vector3::z_axis(), 0.7);
        let iso = na::Isometry3::from_parts(
            na::Translation3::new(1.0, 2.0, 3.0),
            rotation,
        );

        let (decomposed, scale) = decompose_transform3(&iso.to_homogeneous());
        assert!((decomposed.translation.vector - iso.translation.vector).norm() < 1e-6);
        assert!(decomposed.rotation.angle_to(&rotation) < 1e-3);
        assert!((scale - na::Vector3::new(1.0, 1.0, 1.0)).norm() < 1e-5);
    }

    #[test]
    fn decompose_strips_scale() {
        let m = na::Matrix4::new_translation(&na::Vector3::new(0.0, 1.0, 0.0))
            * na::Matrix4::new_nonuniform_scaling(&na::Vector3::new(2.0, 3.0, 4.0));

        let (iso, scale) = decompose_transform3(&m);
        assert!(iso.rotation.angle() < 1e-3);
        assert!((scale - na::Vector3::new(2.0, 3.0, 4.0)).norm() < 1e-5);
    }

    #[test]
    fn look_rotation_points_forward_axis_at_target() {
        let from = na::Vector3::new(0.0, 0.0, 0.0);
        for at in &[
            na::Vector3::new(1.0, 0.0, 0.0),
            na::Vector3::new(0.0, 0.0, 2.0),
            na::Vector3::new(0.0, 3.0, 0.0),
            na::Vector3::new(0.0, -1.0, 0.0),
            na::Vector3::new(1.0, 1.0, -1.0),
        ] {
            let rotation = look_rotation(&from, at).unwrap();
            let forward = rotation * -na::Vector3::z();
            assert!((forward - at.normalize()).norm() < 1e-4, "{:?}", at);
        }
    }

    #[test]
    fn look_rotation_of_coincident_points_is_none() {
        let p = na::Vector3::new(1.0, 1.0, 1.0);
        assert!(look_rotation(&p, &p).is_none());
    }
}
