use crate::constants::{GIFT_OPEN_ID, GIFT_SUBTITLE_ID, GIFT_TITLE_ID};
use crate::dom;
use crate::events::ListenerGuard;
use card_core::{GIFT_OPEN_LABEL, GIFT_SUBTITLE};
use web_sys as web;

/// Fill the overlay above the gift and route its button to `on_open`.
pub fn wire(document: &web::Document, display_name: &str, on_open: impl Fn() + 'static) -> anyhow::Result<()> {
    dom::set_text(document, GIFT_TITLE_ID, display_name);
    dom::set_text(document, GIFT_SUBTITLE_ID, GIFT_SUBTITLE);

    let button: web::Element = dom::by_id(document, GIFT_OPEN_ID)?;
    button.set_text_content(Some(GIFT_OPEN_LABEL));
    ListenerGuard::listen(&button, "click", move |ev: web::MouseEvent| {
        // the canvas underneath would open it a second time
        ev.stop_propagation();
        on_open();
    })
    .forever();
    Ok(())
}

pub fn hide_prompt(document: &web::Document) {
    if let Some(button) = document.get_element_by_id(GIFT_OPEN_ID) {
        dom::set_hidden(&button, true);
    }
}
