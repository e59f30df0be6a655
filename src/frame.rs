use card_core::{CancelHandle, FrameClock, TickFn};
use card_render::SceneRenderer;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

pub async fn init_renderer(
    canvas: &web::HtmlCanvasElement,
) -> anyhow::Result<SceneRenderer<'static>> {
    SceneRenderer::new(
        wgpu::SurfaceTarget::Canvas(canvas.clone()),
        canvas.width(),
        canvas.height(),
    )
    .await
}

/// `requestAnimationFrame` clock. Ticks receive the time since `start`.
#[derive(Default)]
pub struct RafClock;

impl FrameClock for RafClock {
    fn start(&mut self, mut tick: TickFn) -> CancelHandle {
        let handle = CancelHandle::new();
        let slot: FrameSlot = Rc::new(RefCell::new(None));
        let slot_tick = slot.clone();
        let cancel = handle.clone();
        let started = Instant::now();
        *slot.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            if !cancel.is_cancelled() {
                tick(started.elapsed());
            }
            // the tick itself may have cancelled
            if cancel.is_cancelled() {
                release(&slot_tick);
            } else {
                request_frame(&slot_tick);
            }
        }) as Box<dyn FnMut()>));
        request_frame(&slot);
        handle
    }
}

fn request_frame(slot: &FrameSlot) {
    if let (Some(w), Some(cb)) = (web::window(), slot.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

/// Drop the frame closure once it has returned; it can't drop itself while running.
fn release(slot: &FrameSlot) {
    let slot = slot.clone();
    spawn_local(async move {
        slot.borrow_mut().take();
    });
}
