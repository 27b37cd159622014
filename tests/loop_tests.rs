// Host-side tests for the frame loop and the tuning contract.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use trashworld_core::{
    FrameTime, GalaxyGeometry, GalaxyParam, GalaxyParameters, LoadedModel, LoopControl,
    LoopState, ManualClock, ModelLoader, ModelRequest, ModelSender, Placement,
    ResourceLoadError, Scene, SceneConfig, SceneLoop, SceneRenderer,
};

const STEP: f32 = 1.0 / 60.0;

fn small_config() -> SceneConfig {
    SceneConfig {
        galaxy: GalaxyParameters {
            count: 300,
            ..GalaxyParameters::default()
        },
        dust_count: 50,
        ..SceneConfig::default()
    }
}

fn running_loop() -> SceneLoop<ManualClock> {
    let mut l = SceneLoop::new(small_config(), ManualClock::new(STEP)).unwrap();
    l.start();
    l
}

/// Captures what the renderer saw on each call.
#[derive(Default)]
struct Recorder {
    seen: Vec<Seen>,
    fail: bool,
}

struct Seen {
    time: FrameTime,
    galaxy_dirty: bool,
    dust_dirty: bool,
    flag_time: f64,
    water_time: f64,
    galaxy_y0: f32,
}

impl SceneRenderer for Recorder {
    fn render(&mut self, scene: &Scene, time: FrameTime) -> anyhow::Result<()> {
        let geo = scene.galaxy.geometry().unwrap();
        self.seen.push(Seen {
            time,
            galaxy_dirty: geo.buffer().is_dirty(),
            dust_dirty: scene.dust.buffer().is_dirty(),
            flag_time: scene.flag.uniforms().time,
            water_time: scene.water.uniforms().time,
            galaxy_y0: geo.buffer().positions()[0].y,
        });
        if self.fail {
            anyhow::bail!("device lost");
        }
        Ok(())
    }
}

#[test]
fn idle_loop_does_nothing() {
    let mut l = SceneLoop::new(small_config(), ManualClock::new(STEP)).unwrap();
    let mut r = Recorder::default();
    assert_eq!(l.state(), LoopState::Idle);
    assert_eq!(l.frame(&mut r), LoopControl::Stop);
    assert!(r.seen.is_empty());
    assert_eq!(l.frame_count(), 0);
}

#[test]
fn every_update_lands_before_render() {
    let mut l = running_loop();
    let mut r = Recorder::default();
    for _ in 0..3 {
        assert_eq!(l.frame(&mut r), LoopControl::Continue);
    }
    assert_eq!(r.seen.len(), 3);
    let last = &r.seen[2];
    assert!(last.galaxy_dirty && last.dust_dirty);
    assert!((last.time.elapsed - 3.0 * STEP as f64).abs() < 1e-9);
    assert_eq!(last.water_time, last.time.elapsed);

    // The galaxy the renderer saw was waved at this frame's elapsed time.
    let mut reference = SceneLoop::new(small_config(), ManualClock::new(STEP)).unwrap();
    reference
        .scene_mut()
        .galaxy
        .apply_wave(last.time.elapsed);
    let y0 = reference.scene().galaxy.geometry().unwrap().buffer().positions()[0].y;
    assert_eq!(last.galaxy_y0, y0);
}

#[test]
fn dirty_flags_clear_after_a_successful_render() {
    let mut l = running_loop();
    l.frame(&mut Recorder::default());
    assert!(!l.scene().dust.buffer().is_dirty());
    assert!(!l.scene().galaxy.geometry().unwrap().buffer().is_dirty());
}

#[test]
fn failed_render_is_logged_and_loop_continues() {
    let mut l = running_loop();
    let mut r = Recorder {
        fail: true,
        ..Recorder::default()
    };
    assert_eq!(l.frame(&mut r), LoopControl::Continue);
    assert_eq!(l.frame(&mut r), LoopControl::Continue);
    assert_eq!(l.frame_count(), 2);
    assert!(l.scene().dust.buffer().is_dirty());
}

#[test]
fn flag_time_advances_once_per_frame() {
    let mut l = running_loop();
    let mut r = Recorder::default();
    l.frame(&mut r);
    l.frame(&mut r);
    let speed = l.scene().flag.speed() as f64;
    let per_frame = (STEP * speed as f32) as f64;
    assert!((r.seen[0].flag_time - per_frame).abs() < 1e-6);
    assert!((r.seen[1].flag_time - 2.0 * per_frame).abs() < 1e-6);
}

#[test]
fn stop_takes_effect_before_the_next_iteration() {
    let mut l = running_loop();
    let mut r = Recorder::default();
    l.frame(&mut r);
    l.stop();
    assert_eq!(l.frame(&mut r), LoopControl::Stop);
    assert_eq!(l.state(), LoopState::Idle);
    assert_eq!(r.seen.len(), 1);

    l.start();
    assert_eq!(l.frame(&mut r), LoopControl::Continue);
    assert!((r.seen[1].time.elapsed - STEP as f64).abs() < 1e-9);
}

#[test]
fn rejected_edit_keeps_the_current_galaxy() {
    let mut l = running_loop();
    let before = l.scene().galaxy.geometry().unwrap().buffer().clone();
    l.set_galaxy_param(GalaxyParam::Branches, 1.0);
    assert!(l.commit_galaxy_edit().is_err());
    assert_eq!(l.scene().galaxy.generation(), 1);
    assert_eq!(l.scene().galaxy.geometry().unwrap().buffer(), &before);
    assert_eq!(l.galaxy_draft().branches, 1);

    l.set_galaxy_param(GalaxyParam::Branches, 4.0);
    l.set_galaxy_param(GalaxyParam::Count, 120.0);
    l.commit_galaxy_edit().unwrap();
    assert_eq!(l.scene().galaxy.generation(), 2);
    assert_eq!(l.scene().galaxy.len(), 120);
}

#[test]
fn draft_edits_do_not_touch_the_live_field_until_commit() {
    let mut l = running_loop();
    l.set_galaxy_param(GalaxyParam::Count, 500.0);
    l.set_galaxy_colors(Vec3::X, Vec3::Y);
    assert_eq!(l.scene().galaxy.len(), 300);
    assert_eq!(l.scene().galaxy.generation(), 1);
}

#[test]
fn light_edits_reach_the_surface_drivers_next_frame() {
    let mut l = running_loop();
    let p = Vec3::new(-3.0, 12.0, 1.0);
    l.set_light_position(p);
    l.set_light_intensity(-2.0);
    l.frame(&mut Recorder::default());
    assert_eq!(l.scene().flag.uniforms().light_position, p);
    assert_eq!(l.scene().water.uniforms().light_position, p);
    assert_eq!(l.scene().light.intensity, 0.0);
}

#[test]
fn failed_model_load_is_counted_and_frames_go_on() {
    let mut l = running_loop();
    let tx = l.scene().models.sender();
    tx.send(Err(ResourceLoadError::new("/images/models/missing.glb", "HTTP 404")))
        .unwrap();
    assert_eq!(l.frame(&mut Recorder::default()), LoopControl::Continue);
    assert_eq!(l.scene().models.failures(), 1);
    assert!(l.scene().models.is_empty());
}

#[test]
fn each_frame_advances_the_phase_and_commit_twists_by_it() {
    let mut l = running_loop();
    let mut r = Recorder::default();
    let step = small_config().phase_step as f64;
    for n in 1..=5 {
        l.frame(&mut r);
        assert!((l.scene().galaxy.phase() - n as f64 * step).abs() < 1e-9);
    }

    l.set_galaxy_param(GalaxyParam::Count, 80.0);
    l.commit_galaxy_edit().unwrap();

    // Replay the loop's RNG: scene build first, then the regeneration.
    let config = small_config();
    let mut rng = StdRng::seed_from_u64(config.seed);
    Scene::build(&config, &mut rng).unwrap();
    let expected =
        GalaxyGeometry::build(l.galaxy_draft(), l.scene().galaxy.phase(), &mut rng).unwrap();
    let live = l.scene().galaxy.geometry().unwrap();
    assert_eq!(live.original_positions(), expected.original_positions());
}

/// Answers every request at once with a glTF holding a single 10 s clip.
struct InstantLoader;

const ONE_CLIP: &str = r#"{
    "asset": {"version": "2.0"},
    "accessors": [{"count": 2, "max": [10.0], "min": [0.0]}],
    "animations": [{"name": "idle", "samplers": [{"input": 0}], "channels": []}]
}"#;

impl ModelLoader for InstantLoader {
    fn load(&self, request: ModelRequest, done: ModelSender) {
        _ = done.send(LoadedModel::from_bytes(request, ONE_CLIP.as_bytes()));
    }
}

#[test]
fn loaded_clips_advance_by_frame_delta() {
    let mut l = running_loop();
    let request = ModelRequest {
        name: "trashcan".into(),
        path: "/images/models/trashcan.glb".into(),
        placement: Placement {
            position: Vec3::ZERO,
            scale: 1.0,
            rotation_y: 0.0,
        },
    };
    l.load_models(&InstantLoader, vec![request]);

    let mut r = Recorder::default();
    l.frame(&mut r);
    l.frame(&mut r);
    let (id, model) = l.scene().models.iter().next().unwrap();
    assert_eq!(model.clips.len(), 1);
    let actions = l.scene().models.mixer(id).unwrap().actions();
    assert_eq!(actions.len(), 1);
    // drained on frame 1 then advanced on both frames
    let delta_sum = r.seen[0].time.delta + r.seen[1].time.delta;
    assert!((actions[0].time - delta_sum).abs() < 1e-6);
}

#[test]
fn world_position_survives_regeneration() {
    let mut l = running_loop();
    let moved = Vec3::new(12.0, -4.0, 30.0);
    l.scene_mut().galaxy.set_world_position(moved);
    l.set_galaxy_param(GalaxyParam::Branches, 5.0);
    l.commit_galaxy_edit().unwrap();
    l.frame(&mut Recorder::default());
    assert_eq!(l.scene().galaxy.generation(), 2);
    assert_eq!(l.scene().galaxy.world_position(), moved);
}
