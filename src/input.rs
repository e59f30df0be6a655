use glam::Vec2;
use web_sys as web;

/// Pointer position in canvas backing-store pixels.
#[inline]
pub fn pointer_canvas_px(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    let w = rect.width().max(1.0) as f32;
    let h = rect.height().max(1.0) as f32;
    let sx = (x_css / w) * canvas.width() as f32;
    let sy = (y_css / h) * canvas.height() as f32;
    Vec2::new(sx, sy)
}

/// Wheel delta in pixels regardless of the event's delta mode.
#[inline]
pub fn wheel_delta_px(ev: &web::WheelEvent) -> f32 {
    const LINE_PX: f64 = 16.0;
    const PAGE_PX: f64 = 800.0;
    let dy = ev.delta_y();
    let px = match ev.delta_mode() {
        web::WheelEvent::DOM_DELTA_LINE => dy * LINE_PX,
        web::WheelEvent::DOM_DELTA_PAGE => dy * PAGE_PX,
        _ => dy,
    };
    px as f32
}
