use crate::{
    CameraEvent, Dirty, EquirectImage, Lights, Material, MeshData, OrbitCamera, Raster, Transform,
};

use serde::{Deserialize, Serialize};

/// # Dirty Flags
///
/// For pragmatic reasons, the scene structure maintains dirty flags relative to
/// a particular device instance's internal state. As a consequence care must be
/// taken when using the same scene instance on multiple devices simultaneously.
#[derive(Debug, Deserialize, Serialize)]
pub struct Scene {
    pub camera: Dirty<OrbitCamera>,
    pub raster: Dirty<Raster>,
    pub material: Dirty<Material>,
    pub lights: Dirty<Lights>,
    pub geometry: Dirty<MeshData>,
    pub instance: Dirty<Transform>,
    pub environment_map: Dirty<Option<EquirectImage>>,

    #[serde(skip)]
    camera_input: Vec<CameraEvent>,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            camera: Dirty::new(OrbitCamera::default()),
            raster: Dirty::new(Raster::default()),
            material: Dirty::new(Material::default()),
            lights: Dirty::new(Lights::default()),
            geometry: Dirty::new(MeshData::uv_sphere(64, 64)),
            instance: Dirty::new(Transform::default()),
            environment_map: Dirty::new(None),
            camera_input: vec![],
        }
    }
}

impl Scene {
    /// Marks the entire contents of this scene as dirty.
    ///
    /// This method will force a complete device update the next time the
    /// device is updated using this scene, and should be used sparingly.
    pub fn dirty_all_fields(&mut self) {
        Dirty::dirty(&mut self.camera);
        Dirty::dirty(&mut self.raster);
        Dirty::dirty(&mut self.material);
        Dirty::dirty(&mut self.lights);
        Dirty::dirty(&mut self.geometry);
        Dirty::dirty(&mut self.instance);
        Dirty::dirty(&mut self.environment_map);
    }

    /// Patches this scene to be equal to another scene.
    ///
    /// Scene contents which are identical between the two scenes will not be
    /// modified, so the method will avoid dirtying as many fields as it can.
    pub fn patch_from_other(&mut self, other: Self) {
        if self.camera != other.camera {
            self.camera = other.camera;
        }

        if self.raster != other.raster {
            self.raster = other.raster;
        }

        if self.material != other.material {
            self.material = other.material;
        }

        if self.lights != other.lights {
            self.lights = other.lights;
        }

        if self.geometry != other.geometry {
            self.geometry = other.geometry;
        }

        if self.instance != other.instance {
            self.instance = other.instance;
        }

        if self.environment_map != other.environment_map {
            self.environment_map = other.environment_map;
        }
    }

    /// Queues a camera manipulation event for the next device update.
    ///
    /// Events accumulate in order and are folded into the camera state when a
    /// device processes the scene, so rapid input between frames is never
    /// dropped.
    pub fn queue_camera_event(&mut self, event: CameraEvent) {
        self.camera_input.push(event);
    }

    /// Applies all queued camera events to the camera state.
    pub fn drain_camera_input(&mut self) {
        if self.camera_input.is_empty() {
            return;
        }

        let events: Vec<CameraEvent> = self.camera_input.drain(..).collect();

        Dirty::modify(&mut self.camera, |camera| {
            for event in events {
                camera.apply(event);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queued_events_dirty_the_camera_only_when_it_changes() {
        let mut scene = Scene::default();

        Dirty::clean(&mut scene.camera, |_| Ok::<(), ()>(())).unwrap();

        scene.queue_camera_event(CameraEvent::Rotate {
            azimuth: 0.0,
            elevation: 0.0,
        });
        scene.drain_camera_input();

        let unchanged = Dirty::clean(&mut scene.camera, |_| Ok::<(), ()>(())).unwrap();
        assert!(!unchanged);

        scene.queue_camera_event(CameraEvent::Zoom { amount: 1.0 });
        scene.drain_camera_input();

        let changed = Dirty::clean(&mut scene.camera, |_| Ok::<(), ()>(())).unwrap();
        assert!(changed);
        assert!((scene.camera.radius - 8.0).abs() < 1e-6);
    }

    #[test]
    fn patch_preserves_clean_flags_on_identical_fields() {
        let mut scene = Scene::default();

        Dirty::clean(&mut scene.material, |_| Ok::<(), ()>(())).unwrap();

        let mut other = Scene::default();
        other.material.roughness = 0.8;

        scene.patch_from_other(other);

        let changed = Dirty::clean(&mut scene.material, |_| Ok::<(), ()>(())).unwrap();
        assert!(changed);

        let mut scene = Scene::default();
        Dirty::clean(&mut scene.material, |_| Ok::<(), ()>(())).unwrap();

        scene.patch_from_other(Scene::default());

        let changed = Dirty::clean(&mut scene.material, |_| Ok::<(), ()>(())).unwrap();
        assert!(!changed);
    }
}
