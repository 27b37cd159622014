use crate::render;
use std::cell::RefCell;
use std::rc::Rc;
use trashworld_core::{FrameTime, LoopControl, Scene, SceneLoop, SceneRenderer};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type SharedLoop = Rc<RefCell<SceneLoop>>;

/// Renders nothing; stands in until WebGPU is available so the scene keeps
/// animating (and panel edits keep applying) on browsers without it.
struct Headless;

impl SceneRenderer for Headless {
    fn render(&mut self, _scene: &Scene, _time: FrameTime) -> anyhow::Result<()> {
        Ok(())
    }
}

pub struct FrameContext<'a> {
    pub scene_loop: SharedLoop,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState<'a>>,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) -> LoopControl {
        let mut scene_loop = self.scene_loop.borrow_mut();
        match &mut self.gpu {
            Some(g) => {
                g.resize_if_needed(self.canvas.width(), self.canvas.height());
                scene_loop.frame(g)
            }
            None => scene_loop.frame(&mut Headless),
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

/// Drive `frame` from requestAnimationFrame until the loop asks to stop.
pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    frame_ctx.borrow().scene_loop.borrow_mut().start();

    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if frame_ctx_tick.borrow_mut().frame() == LoopControl::Continue {
            request_frame(&tick_clone);
        }
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
