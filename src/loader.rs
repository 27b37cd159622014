use trashworld_core::{
    LoadResult, LoadedModel, ModelLoader, ModelRequest, ModelSender, ResourceLoadError,
};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Fetches model files over HTTP; each finished fetch lands on the registry
/// channel and is picked up by the next frame.
pub struct FetchModelLoader;

impl ModelLoader for FetchModelLoader {
    fn load(&self, request: ModelRequest, done: ModelSender) {
        spawn_local(async move {
            let result = fetch_model(request).await;
            // Receiver only goes away with the scene.
            _ = done.send(result);
        });
    }
}

async fn fetch_model(request: ModelRequest) -> LoadResult {
    let fail = |reason: String| ResourceLoadError::new(request.path.clone(), reason);
    let bytes = fetch_bytes(&request.path).await.map_err(fail)?;
    LoadedModel::from_bytes(request, &bytes)
}

async fn fetch_bytes(url: &str) -> Result<Vec<u8>, String> {
    let window = web::window().ok_or("no window")?;
    let response: web::Response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| format!("fetch failed: {:?}", e))?
        .dyn_into()
        .map_err(|_| "invalid response".to_string())?;
    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }
    let buffer_promise = response
        .array_buffer()
        .map_err(|e| format!("array_buffer: {:?}", e))?;
    let buffer = JsFuture::from(buffer_promise)
        .await
        .map_err(|e| format!("array_buffer: {:?}", e))?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}
