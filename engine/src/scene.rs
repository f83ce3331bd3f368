use {
    crate::engine::{System, SystemContext},
    ahash::AHashSet,
    bumpalo::collections::Vec as BVec,
    hecs::{Entity, EntityRef, World},
    nalgebra as na,
};

/// Transform relative to parent node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Local3 {
    pub parent: Entity,
    pub iso: na::Isometry3<f32>,
    pub scale: na::Vector3<f32>,
}

impl Local3 {
    pub fn identity(parent: Entity) -> Self {
        Local3 {
            parent,
            iso: na::Isometry3::identity(),
            scale: na::Vector3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn from_iso(parent: Entity, iso: na::Isometry3<f32>) -> Self {
        Local3 {
            parent,
            iso,
            scale: na::Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

/// World-space transform.
/// Root nodes carry only this component.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Global3 {
    pub iso: na::Isometry3<f32>,
    pub skew: na::Matrix3<f32>,
}

impl Global3 {
    pub fn identity() -> Self {
        Global3 {
            iso: na::Isometry3::identity(),
            skew: na::Matrix3::identity(),
        }
    }

    pub fn from_iso(iso: na::Isometry3<f32>) -> Self {
        Global3 {
            iso,
            skew: na::Matrix3::identity(),
        }
    }

    pub fn append_iso_scale(
        &self,
        iso: &na::Isometry3<f32>,
        scale: &na::Vector3<f32>,
    ) -> Self {
        let total = self.to_homogeneous()
            * iso.to_homogeneous()
            * na::Matrix4::new_nonuniform_scaling(scale);
        let rotation = self.iso.rotation * iso.rotation;
        let inv_rotation = rotation.inverse().to_rotation_matrix();
        let translation = total.column(3).xyz();
        let rotskew = total.remove_column(3).remove_row(3);
        let skew = inv_rotation * rotskew;

        Global3 {
            iso: na::Isometry3 {
                translation: na::Translation3 {
                    vector: translation,
                },
                rotation,
            },
            skew,
        }
    }

    pub fn append_local(&self, local: &Local3) -> Self {
        self.append_iso_scale(&local.iso, &local.scale)
    }

    pub fn to_homogeneous(&self) -> na::Matrix4<f32> {
        self.iso.to_homogeneous() * self.skew.to_homogeneous()
    }

    pub fn position(&self) -> na::Vector3<f32> {
        self.iso.translation.vector
    }
}

/// Marks fixed world anchor node that body skeletons attach to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorldAnchor;

/// Propagates `Local3` down the hierarchy into `Global3`.
pub struct SceneSystem;

impl System for SceneSystem {
    fn name(&self) -> &str {
        "Scene"
    }

    fn run(&mut self, ctx: SystemContext<'_>) {
        let mut updated = AHashSet::new();
        let mut despawn = BVec::new_in(ctx.bump);

        {
            let world = &*ctx.world;
            for (entity, local) in
                world.query::<&Local3>().with::<Global3>().iter()
            {
                if updated.contains(&entity) {
                    continue;
                }

                let entity_ref = match world.entity(entity) {
                    Ok(entity_ref) => entity_ref,
                    Err(hecs::NoSuchEntity) => continue,
                };

                update_global(
                    entity,
                    entity_ref,
                    local,
                    world,
                    &mut updated,
                    &mut despawn,
                );
            }
        }

        // Despawn entities whose parents are despawned.
        for entity in despawn {
            let _ = ctx.world.despawn(entity);
        }
    }
}

fn update_global<'a>(
    entity: Entity,
    entity_ref: EntityRef<'a>,
    local: &Local3,
    world: &'a World,
    updated: &mut AHashSet<Entity>,
    despawn: &mut BVec<'_, Entity>,
) -> Option<hecs::RefMut<'a, Global3>> {
    updated.insert(entity);

    let parent_ref = match world.entity(local.parent) {
        Ok(parent_ref) => parent_ref,
        Err(hecs::NoSuchEntity) => {
            despawn.push(entity);
            return None;
        }
    };

    let parent_global = match parent_ref.get::<Local3>() {
        None => match parent_ref.get_mut::<Global3>() {
            // Parent is root node.
            Some(parent_global) => parent_global,
            None => {
                tracing::warn!(
                    "Entity's ({:?}) parent is not in scene and shall be despawned",
                    entity
                );
                despawn.push(entity);
                return None;
            }
        },
        Some(parent_local) => {
            let parent_local = *parent_local;
            let parent_global = if updated.contains(&local.parent) {
                // Parent visited earlier this frame, possibly orphaned.
                if despawn.contains(&local.parent) {
                    None
                } else {
                    parent_ref.get_mut::<Global3>()
                }
            } else {
                update_global(
                    local.parent,
                    parent_ref,
                    &parent_local,
                    world,
                    updated,
                    despawn,
                )
            };

            match parent_global {
                Some(parent_global) => parent_global,
                None => {
                    despawn.push(entity);
                    return None;
                }
            }
        }
    };

    let global = parent_global.append_local(local);
    drop(parent_global);

    let mut global_ref = entity_ref.get_mut::<Global3>()?;
    *global_ref = global;
    Some(global_ref)
}

#[cfg(test)]
mod tests {
    use {super::*, bumpalo::Bump};

    fn run_scene(world: &mut World) {
        let bump = Bump::new();
        SceneSystem.run(SystemContext {
            world,
            bump: &bump,
            frame: 0,
        });
    }

    #[test]
    fn globals_follow_parent_chain() {
        let mut world = World::new();
        let root = world.spawn((
            Global3::from_iso(na::Isometry3::translation(1.0, 0.0, 0.0)),
            WorldAnchor,
        ));
        let middle = world.spawn((
            Local3::from_iso(root, na::Isometry3::translation(0.0, 1.0, 0.0)),
            Global3::identity(),
        ));
        let leaf = world.spawn((
            Local3::from_iso(middle, na::Isometry3::translation(0.0, 0.0, 1.0)),
            Global3::identity(),
        ));

        run_scene(&mut world);

        let leaf_global = *world.get::<Global3>(leaf).unwrap();
        assert!((leaf_global.position() - na::Vector3::new(1.0, 1.0, 1.0)).norm() < 1e-6);
    }

    #[test]
    fn parent_rotation_applies_to_children() {
        let mut world = World::new();
        let root = world.spawn((Global3::from_iso(na::Isometry3::from_parts(
            na::Translation3::new(0.0, 0.0, 0.0),
            na::UnitQuaternion::from_axis_angle(
                &na::Vector3::y_axis(),
                std::f32::consts::FRAC_PI_2,
            ),
        )),));
        let child = world.spawn((
            Local3::from_iso(root, na::Isometry3::translation(1.0, 0.0, 0.0)),
            Global3::identity(),
        ));

        run_scene(&mut world);

        let global = *world.get::<Global3>(child).unwrap();
        assert!((global.position() - na::Vector3::new(0.0, 0.0, -1.0)).norm() < 1e-5);
    }

    #[test]
    fn orphans_are_despawned() {
        let mut world = World::new();
        let root = world.spawn((Global3::identity(),));
        let child = world.spawn((Local3::identity(root), Global3::identity()));

        world.despawn(root).unwrap();
        run_scene(&mut world);

        assert!(world.entity(child).is_err());
    }

    #[test]
    fn whole_orphaned_chain_is_despawned_in_one_frame() {
        let mut world = World::new();
        let root = world.spawn((Global3::identity(),));
        let a = world.spawn((Local3::identity(root), Global3::identity()));
        let b = world.spawn((Local3::identity(a), Global3::identity()));
        let c = world.spawn((Local3::identity(b), Global3::identity()));

        world.despawn(root).unwrap();
        run_scene(&mut world);

        assert!(world.entity(a).is_err());
        assert!(world.entity(b).is_err());
        assert!(world.entity(c).is_err());
    }

    #[test]
    fn child_visited_before_orphaned_parent_is_despawned() {
        let mut world = World::new();
        let root = world.spawn((Global3::identity(),));
        let child = world.spawn((Local3::identity(root), Global3::identity()));
        let parent = world.spawn((Local3::identity(root), Global3::identity()));

        // Child is iterated first and reaches its parent through recursion.
        world.get_mut::<Local3>(child).unwrap().parent = parent;
        world.despawn(root).unwrap();

        run_scene(&mut world);

        assert!(world.entity(parent).is_err());
        assert!(world.entity(child).is_err());
    }

    #[test]
    fn nodes_without_root_are_despawned() {
        let mut world = World::new();
        let detached = world.spawn((WorldAnchor,));
        let child = world.spawn((Local3::identity(detached), Global3::identity()));

        run_scene(&mut world);

        assert!(world.entity(child).is_err());
        assert!(world.entity(detached).is_ok());
    }
}
