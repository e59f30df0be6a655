use crate::constants::{TOAST_DURATION_MS, TOAST_ID};
use crate::dom;
use card_core::{Toast, ToastLevel};
use std::cell::Cell;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

thread_local! {
    static SHOWN: Cell<u32> = const { Cell::new(0) };
}

/// Show `toast` for a few seconds. A newer toast replaces an older one.
pub fn show(document: &web::Document, toast: &Toast) {
    let Some(el) = document.get_element_by_id(TOAST_ID) else {
        log::warn!("[toast] no #{}: {}", TOAST_ID, toast.message);
        return;
    };
    el.set_text_content(Some(&toast.message));
    el.set_class_name(match toast.level {
        ToastLevel::Success => "toast success",
        ToastLevel::Error => "toast error",
    });
    let seq = SHOWN.with(|s| {
        s.set(s.get().wrapping_add(1));
        s.get()
    });
    let hide = Closure::once_into_js(move || {
        if SHOWN.with(|s| s.get()) == seq {
            dom::set_hidden(&el, true);
        }
    });
    if let Some(w) = web::window() {
        _ = w.set_timeout_with_callback_and_timeout_and_arguments_0(
            hide.unchecked_ref(),
            TOAST_DURATION_MS,
        );
    }
}
