//! Loaded scene models and their animation mixers.
//!
//! Loads happen outside the frame loop. Each finished load (success or
//! failure) is posted on the registry's completion channel; the loop drains it
//! without blocking once per frame. Failures are logged and counted, never
//! propagated.

use crate::error::ResourceLoadError;
use fnv::FnvHashMap;
use glam::Vec3;
use smallvec::SmallVec;
use std::sync::mpsc::{channel, Receiver, Sender};

/// Where a model sits in the world. The core only carries it through; hosts
/// that draw the models read it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub position: Vec3,
    pub scale: f32,
    pub rotation_y: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ModelRequest {
    pub name: String,
    pub path: String,
    pub placement: Placement,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AnimationClip {
    pub name: String,
    pub duration: f32,
}

#[derive(Clone, Debug)]
pub struct LoadedModel {
    pub request: ModelRequest,
    pub byte_len: usize,
    pub clips: SmallVec<[AnimationClip; 2]>,
}

impl LoadedModel {
    /// Read the clip list out of a fetched `.glb` / `.gltf` payload.
    pub fn from_bytes(request: ModelRequest, bytes: &[u8]) -> LoadResult {
        let clips = crate::gltf::animation_clips(bytes)
            .map_err(|reason| ResourceLoadError::new(request.path.clone(), reason))?;
        Ok(Self {
            request,
            byte_len: bytes.len(),
            clips,
        })
    }
}

pub type LoadResult = Result<LoadedModel, ResourceLoadError>;
pub type ModelSender = Sender<LoadResult>;

/// Something that can fetch a model and report back on the completion channel.
pub trait ModelLoader {
    fn load(&self, request: ModelRequest, done: ModelSender);
}

/// One clip playing on loop.
#[derive(Clone, Debug)]
pub struct ClipAction {
    pub clip: AnimationClip,
    pub time: f32,
}

impl ClipAction {
    fn update(&mut self, delta: f32) {
        if self.clip.duration > 0.0 {
            self.time = (self.time + delta).rem_euclid(self.clip.duration);
        }
    }
}

/// Plays every clip of one model.
#[derive(Clone, Debug, Default)]
pub struct AnimationMixer {
    actions: SmallVec<[ClipAction; 2]>,
}

impl AnimationMixer {
    pub fn for_clips(clips: &[AnimationClip]) -> Self {
        Self {
            actions: clips
                .iter()
                .cloned()
                .map(|clip| ClipAction { clip, time: 0.0 })
                .collect(),
        }
    }

    pub fn update(&mut self, delta: f32) {
        for action in &mut self.actions {
            action.update(delta);
        }
    }

    pub fn actions(&self) -> &[ClipAction] {
        &self.actions
    }
}

pub type ModelId = u32;

pub struct ModelRegistry {
    models: FnvHashMap<ModelId, LoadedModel>,
    mixers: FnvHashMap<ModelId, AnimationMixer>,
    inbox: Receiver<LoadResult>,
    outbox: Sender<LoadResult>,
    next_id: ModelId,
    failures: usize,
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("models", &self.models.len())
            .field("mixers", &self.mixers.len())
            .field("failures", &self.failures)
            .finish()
    }
}

impl ModelRegistry {
    pub fn new() -> Self {
        let (outbox, inbox) = channel();
        Self {
            models: FnvHashMap::default(),
            mixers: FnvHashMap::default(),
            inbox,
            outbox,
            next_id: 0,
            failures: 0,
        }
    }

    /// Completion channel handed to loaders.
    pub fn sender(&self) -> ModelSender {
        self.outbox.clone()
    }

    /// Install every finished load. Returns how many models were added.
    pub fn drain_completed(&mut self) -> usize {
        let mut added = 0;
        while let Ok(result) = self.inbox.try_recv() {
            match result {
                Ok(model) => {
                    self.install(model);
                    added += 1;
                }
                Err(e) => {
                    self.failures += 1;
                    log::error!("[models] {e}");
                }
            }
        }
        added
    }

    pub fn install(&mut self, model: LoadedModel) -> ModelId {
        let id = self.next_id;
        self.next_id += 1;
        log::info!(
            "[models] '{}' ready ({} bytes, {} clips)",
            model.request.name,
            model.byte_len,
            model.clips.len()
        );
        if !model.clips.is_empty() {
            self.mixers.insert(id, AnimationMixer::for_clips(&model.clips));
        }
        self.models.insert(id, model);
        id
    }

    pub fn update_animations(&mut self, delta: f32) {
        for mixer in self.mixers.values_mut() {
            mixer.update(delta);
        }
    }

    pub fn get(&self, id: ModelId) -> Option<&LoadedModel> {
        self.models.get(&id)
    }

    pub fn mixer(&self, id: ModelId) -> Option<&AnimationMixer> {
        self.mixers.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ModelId, &LoadedModel)> {
        self.models.iter().map(|(id, m)| (*id, m))
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn mixer_count(&self) -> usize {
        self.mixers.len()
    }

    pub fn failures(&self) -> usize {
        self.failures
    }
}

/// The models placed in the trashcan world.
pub fn default_model_requests() -> Vec<ModelRequest> {
    let mut requests = vec![
        ModelRequest {
            name: "burger".into(),
            path: "/images/models/burger_lowpoly.glb".into(),
            placement: Placement {
                position: Vec3::new(100.0, -100.0, 3.0),
                scale: 200.0,
                rotation_y: 0.0,
            },
        },
        ModelRequest {
            name: "trash".into(),
            path: "/images/models/trash__garbage_002_3d_scan.glb".into(),
            placement: Placement {
                position: Vec3::new(-100.0, -10.0, 4.0),
                scale: 650.0,
                rotation_y: 0.0,
            },
        },
    ];
    requests.extend(fly_requests(3, 30.0));
    requests
}

/// Flies spaced around a circle; each faces along its own angle.
pub fn fly_requests(count: usize, radius: f32) -> Vec<ModelRequest> {
    let step = 5.0 * std::f32::consts::PI / count.max(1) as f32;
    (0..count)
        .map(|i| {
            let angle = i as f32 * step;
            ModelRequest {
                name: format!("fly-{i}"),
                path: "/images/models/fly/scene.gltf".into(),
                placement: Placement {
                    position: Vec3::new(100.0, -13.0, radius * angle.sin()),
                    scale: 6.0,
                    rotation_y: angle,
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(name: &str, clips: &[(&str, f32)]) -> LoadedModel {
        LoadedModel {
            request: ModelRequest {
                name: name.into(),
                path: format!("/{name}.glb"),
                placement: Placement {
                    position: Vec3::ZERO,
                    scale: 1.0,
                    rotation_y: 0.0,
                },
            },
            byte_len: 64,
            clips: clips
                .iter()
                .map(|(n, d)| AnimationClip {
                    name: (*n).into(),
                    duration: *d,
                })
                .collect(),
        }
    }

    #[test]
    fn drain_installs_successes_and_counts_failures() {
        let mut reg = ModelRegistry::new();
        let tx = reg.sender();
        tx.send(Ok(model("burger", &[]))).unwrap();
        tx.send(Err(ResourceLoadError::new("/trash.glb", "404"))).unwrap();
        tx.send(Ok(model("fly", &[("flap", 1.0)]))).unwrap();
        assert_eq!(reg.drain_completed(), 2);
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.mixer_count(), 1);
        assert_eq!(reg.failures(), 1);
        assert_eq!(reg.drain_completed(), 0);
    }

    #[test]
    fn clip_time_loops_over_duration() {
        let mut mixer = AnimationMixer::for_clips(&[AnimationClip {
            name: "flap".into(),
            duration: 1.0,
        }]);
        mixer.update(0.75);
        mixer.update(0.5);
        assert!((mixer.actions()[0].time - 0.25).abs() < 1e-6);
    }

    #[test]
    fn empty_registry_updates_without_mixers() {
        let mut reg = ModelRegistry::new();
        reg.update_animations(0.016);
        assert!(reg.is_empty());
    }

    #[test]
    fn malformed_payload_reports_its_path() {
        let req = default_model_requests().remove(0);
        let err = LoadedModel::from_bytes(req, b"not json").unwrap_err();
        assert_eq!(err.path, "/images/models/burger_lowpoly.glb");
    }

    #[test]
    fn default_scene_requests_three_flies() {
        let reqs = default_model_requests();
        assert_eq!(reqs.len(), 5);
        assert_eq!(reqs.iter().filter(|r| r.name.starts_with("fly")).count(), 3);
    }
}
