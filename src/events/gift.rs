use super::ListenerGuard;
use crate::input;
use crate::stage::GiftLoop;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

fn hits_gift(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement, shared: &Rc<RefCell<GiftLoop>>) -> bool {
    let pos = input::pointer_canvas_px(ev, canvas);
    let lp = shared.borrow();
    let gift = lp.scene();
    let (origin, dir) = gift.camera().screen_ray(
        pos.x,
        pos.y,
        canvas.width().max(1) as f32,
        canvas.height().max(1) as f32,
    );
    gift.pick(origin, dir)
}

/// Hover highlights the box; a click anywhere on the canvas calls `on_open`.
pub fn wire_gift_handlers(
    canvas: &web::HtmlCanvasElement,
    shared: &Rc<RefCell<GiftLoop>>,
    mut on_open: impl FnMut() + 'static,
) -> Vec<ListenerGuard> {
    let mut guards = Vec::with_capacity(3);

    let (c, s) = (canvas.clone(), shared.clone());
    guards.push(ListenerGuard::listen(
        canvas,
        "pointermove",
        move |ev: web::PointerEvent| {
            let hovered = hits_gift(&ev, &c, &s);
            s.borrow_mut().scene_mut().set_hovered(hovered);
            _ = c
                .style()
                .set_property("cursor", if hovered { "pointer" } else { "default" });
        },
    ));

    let (c, s) = (canvas.clone(), shared.clone());
    guards.push(ListenerGuard::listen(
        canvas,
        "pointerleave",
        move |_: web::PointerEvent| {
            s.borrow_mut().scene_mut().set_hovered(false);
            _ = c.style().set_property("cursor", "default");
        },
    ));

    guards.push(ListenerGuard::listen(canvas, "click", move |_: web::MouseEvent| {
        on_open();
    }));

    guards
}
