//! Mounted scenes. A stage owns its canvas, renderer, frame clock and
//! listeners; dropping it tears all of them down.

use crate::dom;
use crate::events::{self, ListenerGuard};
use crate::frame::{self, RafClock};
use crate::textures::{self, CanvasLabelRasterizer};
use card_core::{
    start_shared, AnimationLoop, CakeScene, CakeSceneConfig, CancelHandle, GiftBox, GiftBoxConfig,
    TableScatter,
};
use card_render::SceneRenderer;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

pub type GiftLoop = AnimationLoop<GiftBox, SceneRenderer<'static>>;
pub type CakeLoop = AnimationLoop<CakeScene, SceneRenderer<'static>>;

pub struct Stage<L> {
    shared: Rc<RefCell<L>>,
    canvas: web::HtmlCanvasElement,
    cancel: CancelHandle,
    listeners: Vec<ListenerGuard>,
    name: &'static str,
}

pub type GiftStage = Stage<GiftLoop>;
pub type CakeStage = Stage<CakeLoop>;

impl<L> Stage<L> {
    pub fn shared(&self) -> &Rc<RefCell<L>> {
        &self.shared
    }
}

impl<L> Drop for Stage<L> {
    fn drop(&mut self) {
        self.cancel.cancel();
        self.listeners.clear();
        self.canvas.remove();
        log::info!("[stage] {} torn down", self.name);
    }
}

/// Mount the gift box into `container`. `on_open` runs when the box is clicked.
pub async fn mount_gift(
    document: &web::Document,
    container: &web::Element,
    on_open: impl FnMut() + 'static,
) -> anyhow::Result<GiftStage> {
    let canvas = dom::create_stage_canvas(document, container)?;
    let renderer = frame::init_renderer(&canvas).await?;
    let mut gift = GiftBox::new(GiftBoxConfig::default(), &mut SmallRng::from_entropy());
    gift.set_aspect(dom::aspect_of(&canvas));
    let shared = Rc::new(RefCell::new(AnimationLoop::new(gift, renderer)));

    let mut listeners = events::wire_gift_handlers(&canvas, &shared, on_open);
    listeners.extend(events::wire_resize(&canvas, &shared, GiftBox::set_aspect));
    let cancel = start_shared(&shared, &mut RafClock);
    log::info!("[stage] gift mounted");
    Ok(Stage {
        shared,
        canvas,
        cancel,
        listeners,
        name: "gift",
    })
}

/// Mount the cake scene into `container` and start loading `photos`.
pub async fn mount_cake(
    document: &web::Document,
    container: &web::Element,
    display_name: &str,
    photos: &[String],
) -> anyhow::Result<CakeStage> {
    let canvas = dom::create_stage_canvas(document, container)?;
    let mut renderer = frame::init_renderer(&canvas).await?;
    let mut scene = CakeScene::new(
        &CakeSceneConfig::default(),
        display_name,
        &mut SmallRng::from_entropy(),
    );
    scene.set_aspect(dom::aspect_of(&canvas));
    renderer.instantiate(scene.description(), &mut CanvasLabelRasterizer::new(document));
    let shared = Rc::new(RefCell::new(AnimationLoop::new(scene, renderer)));

    let mut listeners = events::wire_orbit_handlers(&canvas, &shared);
    listeners.extend(events::wire_resize(&canvas, &shared, CakeScene::set_aspect));
    let cancel = start_shared(&shared, &mut RafClock);
    let stage = Stage {
        shared,
        canvas,
        cancel,
        listeners,
        name: "cake",
    };
    stage.set_photos(document, photos);
    log::info!("[stage] cake mounted for {:?}", display_name);
    Ok(stage)
}

impl CakeStage {
    /// Replace the photo frames. Decodes still in flight for the previous set
    /// are dropped when they finish.
    pub fn set_photos(&self, document: &web::Document, sources: &[String]) {
        let requests = {
            let mut lp = self.shared.borrow_mut();
            let requests = lp
                .scene_mut()
                .set_photos(sources, &mut TableScatter::new(SmallRng::from_entropy()));
            let generation = lp.scene().photos().generation();
            lp.sink_mut().retain_photo_generation(generation);
            requests
        };
        for request in requests {
            spawn_local(textures::load_photo(
                document.clone(),
                request,
                Rc::downgrade(&self.shared),
            ));
        }
    }
}
