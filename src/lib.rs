#![cfg(target_arch = "wasm32")]
use crate::constants::*;
use crate::frame::RafClock;
use crate::stage::{CakeStage, GiftStage};
use card_core::{CancelHandle, CardFlow, FrameClock};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod stage;
mod textures;
mod ui;

struct App {
    document: web::Document,
    flow: CardFlow,
    gift: Option<GiftStage>,
    cake: Option<CakeStage>,
    /// Drives `flow` between the gift click and the reveal.
    reveal_clock: Option<CancelHandle>,
    display_name: String,
    photos: Vec<String>,
}

type SharedApp = Rc<RefCell<App>>;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("card-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

fn display_name(document: &web::Document) -> String {
    document
        .body()
        .and_then(|b| b.get_attribute(DISPLAY_NAME_ATTR))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    ui::message::render(&document)?;
    let app: SharedApp = Rc::new(RefCell::new(App {
        document: document.clone(),
        flow: CardFlow::new(),
        gift: None,
        cake: None,
        reveal_clock: None,
        display_name: display_name(&document),
        photos: Vec::new(),
    }));

    let app_gallery = app.clone();
    ui::gallery::wire(&document, move |sources| photos_changed(&app_gallery, sources))?;
    ui::music::wire(&document)?;

    let name = app.borrow().display_name.clone();
    let app_button = app.clone();
    ui::landing::wire(&document, &name, move || open_gift(&app_button))?;

    let container: web::Element = dom::by_id(&document, GIFT_CONTAINER_ID)?;
    let app_open = app.clone();
    match stage::mount_gift(&document, &container, move || open_gift(&app_open)).await {
        Ok(gift) => app.borrow_mut().gift = Some(gift),
        Err(e) => {
            log::error!("gift scene unavailable: {:?}", e);
            reveal(app).await;
        }
    }
    Ok(())
}

fn open_gift(app: &SharedApp) {
    let mut a = app.borrow_mut();
    // the reveal clock starts at zero as well
    if !a.flow.open_gift(Duration::ZERO) {
        return;
    }
    ui::landing::hide_prompt(&a.document);
    if let Some(gift) = &a.gift {
        gift.shared().borrow_mut().scene_mut().open();
    }
    let app_tick = app.clone();
    let handle = RafClock.start(Box::new(move |now| {
        if app_tick.borrow_mut().flow.tick(now) {
            spawn_local(reveal(app_tick.clone()));
        }
    }));
    a.reveal_clock = Some(handle);
}

/// Swap the gift for the card content and the cake scene.
async fn reveal(app: SharedApp) {
    let (document, name, photos) = {
        let mut a = app.borrow_mut();
        if let Some(clock) = a.reveal_clock.take() {
            clock.cancel();
        }
        a.gift = None;
        (a.document.clone(), a.display_name.clone(), a.photos.clone())
    };
    if let Some(el) = document.get_element_by_id(GIFT_CONTAINER_ID) {
        dom::set_hidden(&el, true);
    }
    if let Some(el) = document.get_element_by_id(CONTENT_ID) {
        dom::set_hidden(&el, false);
    }
    let container: web::Element = match dom::by_id(&document, CAKE_CONTAINER_ID) {
        Ok(c) => c,
        Err(e) => {
            log::error!("{:?}", e);
            return;
        }
    };
    match stage::mount_cake(&document, &container, &name, &photos).await {
        Ok(cake) => app.borrow_mut().cake = Some(cake),
        Err(e) => log::error!("cake scene unavailable: {:?}", e),
    }
}

fn photos_changed(app: &SharedApp, sources: Vec<String>) {
    let mut a = app.borrow_mut();
    a.photos = sources;
    if let Some(cake) = &a.cake {
        cake.set_photos(&a.document, &a.photos);
    }
}
