#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;
use std::rc::Rc;
use trashworld_core::{default_model_requests, MasterClock, SceneConfig, SceneLoop};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod controls;
mod dom;
mod frame;
mod loader;
mod panel;
mod render;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("trashworld-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id(constants::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::CANVAS_ID))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    dom::wire_canvas_resize(&canvas);

    let scene_loop = SceneLoop::new(SceneConfig::default(), MasterClock::new())
        .map_err(|e| anyhow::anyhow!("scene setup failed: {e}"))?;
    let scene_loop: frame::SharedLoop = Rc::new(RefCell::new(scene_loop));

    scene_loop
        .borrow()
        .load_models(&loader::FetchModelLoader, default_model_requests());
    panel::wire_panel(&document, &scene_loop);

    // Without WebGPU the loop still runs headless.
    let gpu = frame::init_gpu(&canvas).await;

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        scene_loop,
        canvas,
        gpu,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
