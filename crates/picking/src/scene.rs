//! Pick scene: one ball proxy per selectable body, ray queries against them.

use engine_core::Vec3;
use rapier3d::prelude::*;

/// Result of a pick ray query.
#[derive(Debug, Clone, Copy)]
pub struct PickHit {
    /// Index of the body that was hit (the id passed at insertion).
    pub body: u32,
    /// Distance along the ray to the hit point.
    pub distance: f32,
    /// World position of the hit.
    pub point: Vec3,
}

/// Collider set holding one ball per selectable body.
///
/// Proxies are parentless fixed colliders; `sync` moves and resizes them and
/// `refresh` rebuilds the query acceleration structure afterwards.
pub struct PickScene {
    rigid_body_set: RigidBodySet,
    collider_set: ColliderSet,
    query_pipeline: QueryPipeline,
    handles: Vec<ColliderHandle>,
}

impl Default for PickScene {
    fn default() -> Self {
        Self::new()
    }
}

impl PickScene {
    pub fn new() -> Self {
        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            query_pipeline: QueryPipeline::new(),
            handles: Vec::new(),
        }
    }

    /// Add a ball proxy. The returned index is the `body` id reported by
    /// `pick`; insertion order defines it.
    pub fn insert_ball(&mut self, center: Vec3, radius: f32) -> u32 {
        let collider = ColliderBuilder::ball(radius)
            .translation(vector![center.x, center.y, center.z])
            .build();
        let handle = self.collider_set.insert(collider);
        self.handles.push(handle);
        (self.handles.len() - 1) as u32
    }

    /// Move and resize a proxy (selection scaling changes the radius).
    pub fn sync(&mut self, body: u32, center: Vec3, radius: f32) {
        if let Some(handle) = self.handles.get(body as usize) {
            if let Some(collider) = self.collider_set.get_mut(*handle) {
                collider.set_translation(vector![center.x, center.y, center.z]);
                collider.set_shape(SharedShape::ball(radius));
            }
        }
    }

    /// Rebuild the query structure after `sync` calls.
    pub fn refresh(&mut self) {
        self.query_pipeline.update(&self.collider_set);
    }

    /// Cast a ray and return the first proxy hit.
    pub fn pick(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<PickHit> {
        let ray = Ray::new(
            point![origin.x, origin.y, origin.z],
            vector![direction.x, direction.y, direction.z],
        );

        let filter = QueryFilter::default();

        self.query_pipeline
            .cast_ray(
                &self.rigid_body_set,
                &self.collider_set,
                &ray,
                max_distance,
                true,
                filter,
            )
            .and_then(|(handle, toi)| {
                let body = self.handles.iter().position(|h| *h == handle)?;
                let point = ray.point_at(toi);
                Some(PickHit {
                    body: body as u32,
                    distance: toi,
                    point: Vec3::new(point.x, point.y, point.z),
                })
            })
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene_with_row() -> PickScene {
        let mut scene = PickScene::new();
        // Three balls along +X at 10, 20, 30 with radius 1
        for i in 1..=3 {
            scene.insert_ball(Vec3::new(i as f32 * 10.0, 0.0, 0.0), 1.0);
        }
        scene.refresh();
        scene
    }

    #[test]
    fn pick_returns_nearest_body() {
        let scene = scene_with_row();
        let hit = scene
            .pick(Vec3::ZERO, Vec3::X, 100.0)
            .expect("ray along +X must hit");
        assert_eq!(hit.body, 0);
        assert!((hit.distance - 9.0).abs() < 1e-3);
    }

    #[test]
    fn pick_misses_empty_sky() {
        let scene = scene_with_row();
        assert!(scene.pick(Vec3::ZERO, Vec3::Y, 100.0).is_none());
    }

    #[test]
    fn sync_moves_proxy() {
        let mut scene = scene_with_row();
        // Move body 1 out of the ray's path and body 2 closer
        scene.sync(1, Vec3::new(20.0, 50.0, 0.0), 1.0);
        scene.sync(0, Vec3::new(10.0, 50.0, 0.0), 1.0);
        scene.refresh();
        let hit = scene
            .pick(Vec3::ZERO, Vec3::X, 100.0)
            .expect("remaining ball must be hit");
        assert_eq!(hit.body, 2);
    }

    #[test]
    fn sync_resizes_proxy() {
        let mut scene = PickScene::new();
        scene.insert_ball(Vec3::new(10.0, 3.0, 0.0), 1.0);
        scene.refresh();
        // Ray along +X passes 3 units above the center: radius 1 misses
        assert!(scene.pick(Vec3::ZERO, Vec3::X, 100.0).is_none());
        // Grown proxy (selection scale) catches the same ray
        scene.sync(0, Vec3::new(10.0, 3.0, 0.0), 4.0);
        scene.refresh();
        assert!(scene.pick(Vec3::ZERO, Vec3::X, 100.0).is_some());
    }
}
