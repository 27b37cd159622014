use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// Keep the canvas backing store at CSS size times devicePixelRatio.
pub fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

/// Every `<input>` carrying `attr`, paired with the attribute's value.
pub fn inputs_with_attr(
    document: &web::Document,
    attr: &str,
) -> Vec<(String, web::HtmlInputElement)> {
    let Ok(nodes) = document.query_selector_all(&format!("input[{attr}]")) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|n| n.dyn_into::<web::HtmlInputElement>().ok())
        .filter_map(|el| el.get_attribute(attr).map(|key| (key, el)))
        .collect()
}

pub fn add_input_listener(
    el: &web::HtmlInputElement,
    event: &str,
    mut handler: impl FnMut(&web::HtmlInputElement) + 'static,
) {
    let target = el.clone();
    let closure = Closure::wrap(Box::new(move || handler(&target)) as Box<dyn FnMut()>);
    _ = el.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}
