//! The single per-frame scheduler.
//!
//! `SceneLoop::frame` runs one iteration in a fixed order: clock, galaxy wave,
//! surface drivers, model mixers, dust, then render. The host calls it once per
//! display refresh and schedules the next call only while it returns
//! [`LoopControl::Continue`].
//!
//! Tuning happens through `&mut self` methods, so an edit can only ever land
//! between two frames, never in the middle of one.

use crate::clock::{Clock, FrameTime, MasterClock};
use crate::error::SceneResult;
use crate::models::{ModelLoader, ModelRequest};
use crate::params::{GalaxyParam, GalaxyParameters};
use crate::scene::{Scene, SceneConfig};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Consumes the scene once all per-frame writes are done.
pub trait SceneRenderer {
    fn render(&mut self, scene: &Scene, time: FrameTime) -> anyhow::Result<()>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

pub struct SceneLoop<C: Clock = MasterClock> {
    scene: Scene,
    clock: C,
    rng: StdRng,
    state: LoopState,
    cancel_requested: bool,
    frames: u64,
    phase_step: f32,
    draft: GalaxyParameters,
}

impl<C: Clock> SceneLoop<C> {
    pub fn new(config: SceneConfig, clock: C) -> SceneResult<Self> {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let scene = Scene::build(&config, &mut rng)?;
        Ok(Self {
            scene,
            clock,
            rng,
            state: LoopState::Idle,
            cancel_requested: false,
            frames: 0,
            phase_step: config.phase_step,
            draft: config.galaxy,
        })
    }

    pub fn start(&mut self) {
        if self.state == LoopState::Running {
            return;
        }
        self.clock.reset();
        self.cancel_requested = false;
        self.state = LoopState::Running;
        log::info!("[loop] running");
    }

    /// Ask the loop to stop; takes effect before the next iteration.
    pub fn stop(&mut self) {
        if self.state == LoopState::Running {
            self.cancel_requested = true;
        }
    }

    #[inline]
    pub fn state(&self) -> LoopState {
        self.state
    }

    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Run one iteration. Returns whether the host should schedule another.
    pub fn frame<R: SceneRenderer + ?Sized>(&mut self, renderer: &mut R) -> LoopControl {
        if self.cancel_requested {
            self.cancel_requested = false;
            self.state = LoopState::Idle;
            log::info!("[loop] stopped after {} frames", self.frames);
            return LoopControl::Stop;
        }
        if self.state != LoopState::Running {
            return LoopControl::Stop;
        }

        let time = self.clock.tick();
        let scene = &mut self.scene;

        scene.galaxy.advance_phase(self.phase_step);
        scene.galaxy.apply_wave(time.elapsed);

        let light = scene.light.position;
        scene.flag.advance(time.delta, light);
        scene.water.sync(time.elapsed, light);

        scene.models.drain_completed();
        scene.models.update_animations(time.delta);

        scene.dust.tick();

        match renderer.render(scene, time) {
            Ok(()) => scene.mark_uploaded(),
            Err(e) => log::error!("render error: {:?}", e),
        }
        self.frames += 1;
        LoopControl::Continue
    }

    #[inline]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[inline]
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Kick off asynchronous loads; results arrive on the registry channel.
    pub fn load_models<L: ModelLoader + ?Sized>(&self, loader: &L, requests: Vec<ModelRequest>) {
        for request in requests {
            loader.load(request, self.scene.models.sender());
        }
    }

    // ---------------- Tuning panel contract ----------------

    /// Parameters being edited; only applied by `commit_galaxy_edit`.
    #[inline]
    pub fn galaxy_draft(&self) -> &GalaxyParameters {
        &self.draft
    }

    pub fn set_galaxy_param(&mut self, param: GalaxyParam, value: f32) {
        self.draft.set(param, value);
    }

    pub fn set_galaxy_colors(&mut self, inside: Vec3, outside: Vec3) {
        self.draft.inside_color = inside;
        self.draft.outside_color = outside;
    }

    /// Regenerate the galaxy from the draft. Call once the user lets go of a
    /// control, not on every intermediate value.
    pub fn commit_galaxy_edit(&mut self) -> SceneResult<()> {
        let draft = self.draft.clone();
        if let Err(e) = self.scene.galaxy.regenerate(&draft, &mut self.rng) {
            log::warn!("[galaxy] edit rejected: {e}");
            return Err(e);
        }
        Ok(())
    }

    pub fn set_flag_frequencies(&mut self, freq_x: f32, freq_y: f32) {
        self.scene.flag.set_frequencies(freq_x, freq_y);
    }

    pub fn set_light_position(&mut self, position: Vec3) {
        self.scene.light.position = position;
    }

    pub fn set_light_intensity(&mut self, intensity: f32) {
        self.scene.light.intensity = intensity.max(0.0);
    }

    pub fn set_water_color(&mut self, color: Vec3) {
        self.scene.water.set_water_color(color);
    }
}
