use crate::constants::{CANVAS_MAX_SIDE, HIDDEN_CLASS};
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Look up an element by id and cast it to `T`.
pub fn by_id<T: JsCast>(document: &web::Document, id: &str) -> anyhow::Result<T> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", id))?
        .dyn_into::<T>()
        .map_err(|e| anyhow::anyhow!(format!("#{} has wrong type: {:?}", id, e)))
}

pub fn set_hidden(el: &web::Element, hidden: bool) {
    let cl = el.class_list();
    if hidden {
        _ = cl.add_1(HIDDEN_CLASS);
    } else {
        _ = cl.remove_1(HIDDEN_CLASS);
    }
}

pub fn set_text(document: &web::Document, id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

/// Create a canvas filling `container`.
pub fn create_stage_canvas(
    document: &web::Document,
    container: &web::Element,
) -> anyhow::Result<web::HtmlCanvasElement> {
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    _ = canvas.set_attribute("style", "width:100%;height:100%;display:block;touch-action:none");
    container
        .append_child(&canvas)
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    sync_canvas_backing_size(&canvas);
    Ok(canvas)
}

/// Match the canvas backing store to its CSS size times devicePixelRatio.
/// Returns the new size.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> (u32, u32) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = ((rect.width() * dpr) as u32).clamp(1, CANVAS_MAX_SIDE);
        let h_px = ((rect.height() * dpr) as u32).clamp(1, CANVAS_MAX_SIDE);
        canvas.set_width(w_px);
        canvas.set_height(h_px);
    }
    (canvas.width(), canvas.height())
}

pub fn aspect_of(canvas: &web::HtmlCanvasElement) -> f32 {
    canvas.width().max(1) as f32 / canvas.height().max(1) as f32
}

/// Read a file as a `data:` URL.
pub async fn read_data_url(file: &web::File) -> anyhow::Result<String> {
    let reader = web::FileReader::new().map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    let done = js_sys::Promise::new(&mut |resolve, reject| {
        reader.set_onload(Some(&resolve));
        reader.set_onerror(Some(&reject));
    });
    reader
        .read_as_data_url(file)
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    wasm_bindgen_futures::JsFuture::from(done)
        .await
        .map_err(|_| anyhow::anyhow!("could not read {}", file.name()))?;
    reader
        .result()
        .ok()
        .and_then(|v| v.as_string())
        .ok_or_else(|| anyhow::anyhow!("{} produced no data", file.name()))
}

/// Files currently selected in an `<input type="file">`.
pub fn selected_files(input: &web::HtmlInputElement) -> Vec<web::File> {
    let Some(list) = input.files() else {
        return Vec::new();
    };
    (0..list.length()).filter_map(|i| list.get(i)).collect()
}
