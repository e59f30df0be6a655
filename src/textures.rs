use crate::constants::PHOTO_TEXTURE_MAX_SIDE;
use crate::stage::CakeLoop;
use card_core::{Bitmap, LabelRasterizer, LabelSpec, PhotoRequest};
use std::cell::RefCell;
use std::rc::Weak;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

fn scratch_canvas(
    document: &web::Document,
    width: u32,
    height: u32,
) -> Option<(web::HtmlCanvasElement, web::CanvasRenderingContext2d)> {
    let canvas: web::HtmlCanvasElement = document.create_element("canvas").ok()?.dyn_into().ok()?;
    canvas.set_width(width.max(1));
    canvas.set_height(height.max(1));
    let ctx = canvas
        .get_context("2d")
        .ok()
        .flatten()?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .ok()?;
    Some((canvas, ctx))
}

fn read_pixels(ctx: &web::CanvasRenderingContext2d, width: u32, height: u32) -> Option<Bitmap> {
    let data = ctx
        .get_image_data(0.0, 0.0, width as f64, height as f64)
        .ok()?;
    Some(Bitmap {
        width,
        height,
        pixels: data.data().0,
    })
}

/// Draws label text with the 2D canvas API.
pub struct CanvasLabelRasterizer {
    document: web::Document,
}

impl CanvasLabelRasterizer {
    pub fn new(document: &web::Document) -> Self {
        Self {
            document: document.clone(),
        }
    }
}

impl LabelRasterizer for CanvasLabelRasterizer {
    fn rasterize(&mut self, spec: &LabelSpec) -> Option<Bitmap> {
        let (_canvas, ctx) = scratch_canvas(&self.document, spec.width, spec.height)?;
        let (w, h) = (spec.width.max(1) as f64, spec.height.max(1) as f64);
        ctx.set_fill_style_str(&spec.background.css());
        ctx.fill_rect(0.0, 0.0, w, h);
        ctx.set_fill_style_str(&spec.foreground.css());
        ctx.set_font(&spec.font);
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        _ = ctx.fill_text(&spec.text, w / 2.0, h / 2.0);
        read_pixels(&ctx, spec.width.max(1), spec.height.max(1))
    }
}

async fn load_image(source: &str) -> anyhow::Result<web::HtmlImageElement> {
    let img = web::HtmlImageElement::new().map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    let loaded = js_sys::Promise::new(&mut |resolve, reject| {
        img.set_onload(Some(&resolve));
        img.set_onerror(Some(&reject));
    });
    img.set_src(source);
    let result = JsFuture::from(loaded).await;
    img.set_onload(None);
    img.set_onerror(None);
    result.map_err(|_| anyhow::anyhow!("image failed to decode"))?;
    Ok(img)
}

async fn decode_photo(document: &web::Document, source: &str) -> anyhow::Result<Bitmap> {
    let img = load_image(source).await?;
    let (nw, nh) = (img.natural_width().max(1), img.natural_height().max(1));
    let scale = (PHOTO_TEXTURE_MAX_SIDE as f32 / nw.max(nh) as f32).min(1.0);
    let w = ((nw as f32 * scale) as u32).max(1);
    let h = ((nh as f32 * scale) as u32).max(1);
    let (_canvas, ctx) =
        scratch_canvas(document, w, h).ok_or_else(|| anyhow::anyhow!("no 2D context"))?;
    ctx.draw_image_with_html_image_element_and_dw_and_dh(&img, 0.0, 0.0, w as f64, h as f64)
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    read_pixels(&ctx, w, h).ok_or_else(|| anyhow::anyhow!("getImageData failed"))
}

/// Decode a photo and attach its pane, unless the scene moved on meanwhile.
pub async fn load_photo(document: web::Document, request: PhotoRequest, shared: Weak<RefCell<CakeLoop>>) {
    let decoded = decode_photo(&document, &request.source).await;
    let key = request.key;
    request.token.run(|| {
        let Some(shared) = shared.upgrade() else {
            return;
        };
        let mut lp = shared.borrow_mut();
        match decoded {
            Ok(bitmap) => {
                if lp.sink_mut().upload_texture(key, &bitmap) {
                    lp.scene_mut().attach_photo(key);
                } else {
                    lp.scene_mut().photo_failed(key);
                }
            }
            Err(e) => {
                log::debug!("[photos] {:?} left blank: {}", key, e);
                lp.scene_mut().photo_failed(key);
            }
        }
    });
}
