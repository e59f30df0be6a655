use super::ListenerGuard;
use crate::dom;
use crate::input;
use crate::stage::CakeLoop;
use card_core::{Animated, AnimationLoop};
use card_render::SceneRenderer;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Drag to orbit, wheel to zoom. Listeners are scoped to the canvas.
pub fn wire_orbit_handlers(
    canvas: &web::HtmlCanvasElement,
    shared: &Rc<RefCell<CakeLoop>>,
) -> Vec<ListenerGuard> {
    let mut guards = Vec::with_capacity(5);

    let (c, s) = (canvas.clone(), shared.clone());
    guards.push(ListenerGuard::listen(
        canvas,
        "pointerdown",
        move |ev: web::PointerEvent| {
            let pos = input::pointer_canvas_px(&ev, &c);
            s.borrow_mut().scene_mut().pointer_down(pos);
            _ = c.set_pointer_capture(ev.pointer_id());
            ev.prevent_default();
        },
    ));

    let (c, s) = (canvas.clone(), shared.clone());
    guards.push(ListenerGuard::listen(
        canvas,
        "pointermove",
        move |ev: web::PointerEvent| {
            let pos = input::pointer_canvas_px(&ev, &c);
            s.borrow_mut().scene_mut().pointer_move(pos);
        },
    ));

    for kind in ["pointerup", "pointercancel"] {
        let s = shared.clone();
        guards.push(ListenerGuard::listen(canvas, kind, move |_: web::PointerEvent| {
            s.borrow_mut().scene_mut().pointer_up();
        }));
    }

    let s = shared.clone();
    guards.push(ListenerGuard::listen(canvas, "wheel", move |ev: web::WheelEvent| {
        s.borrow_mut().scene_mut().wheel(input::wheel_delta_px(&ev));
        ev.prevent_default();
    }));

    guards
}

/// Keep the canvas backing store, the surface and the camera aspect in step
/// with the window size.
pub fn wire_resize<S>(
    canvas: &web::HtmlCanvasElement,
    shared: &Rc<RefCell<AnimationLoop<S, SceneRenderer<'static>>>>,
    set_aspect: fn(&mut S, f32),
) -> Option<ListenerGuard>
where
    S: Animated + 'static,
{
    let window = web::window()?;
    let (c, s) = (canvas.clone(), shared.clone());
    Some(ListenerGuard::listen(&window, "resize", move |_: web::Event| {
        let (w, h) = dom::sync_canvas_backing_size(&c);
        let mut lp = s.borrow_mut();
        lp.sink_mut().resize(w, h);
        set_aspect(lp.scene_mut(), dom::aspect_of(&c));
    }))
}
