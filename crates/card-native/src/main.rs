use card_core::{
    start_shared, AnimationLoop, Bitmap, CakeScene, CakeSceneConfig, CancelHandle, CardFlow,
    GiftBox, GiftBoxConfig, LabelRasterizer, LabelSpec, SteppedClock,
};
use card_render::SceneRenderer;
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;
use winit::{
    dpi::PhysicalSize,
    event::*,
    event_loop::EventLoop,
    window::{Window, WindowBuilder},
};

const DISPLAY_NAME: &str = "Happy Birthday";
const LINE_PX: f32 = 16.0; // wheel pixels per scrolled line

type GiftLoop = AnimationLoop<GiftBox, SceneRenderer<'static>>;
type CakeLoop = AnimationLoop<CakeScene, SceneRenderer<'static>>;

/// No text shaping natively: labels keep their background color only.
struct PlainLabels;

impl LabelRasterizer for PlainLabels {
    fn rasterize(&mut self, spec: &LabelSpec) -> Option<Bitmap> {
        let [r, g, b] = spec.background.to_array().map(|c| (c * 255.0).round() as u8);
        let px = (spec.width * spec.height) as usize;
        log::debug!("[native] label {:?} drawn without text", spec.text);
        Some(Bitmap {
            width: spec.width,
            height: spec.height,
            pixels: [r, g, b, 255].repeat(px),
        })
    }
}

enum Stage {
    Gift {
        shared: Rc<RefCell<GiftLoop>>,
        cancel: CancelHandle,
    },
    Cake {
        shared: Rc<RefCell<CakeLoop>>,
        _cancel: CancelHandle,
    },
}

struct Viewer {
    window: Arc<Window>,
    clock: SteppedClock,
    started: Instant,
    flow: CardFlow,
    stage: Option<Stage>,
    cursor: Vec2,
}

impl Viewer {
    fn new(window: Arc<Window>, renderer: SceneRenderer<'static>) -> Self {
        let mut clock = SteppedClock::display_rate();
        let mut gift = GiftBox::new(GiftBoxConfig::default(), &mut SmallRng::from_entropy());
        gift.set_aspect(aspect(window.inner_size()));
        let shared = Rc::new(RefCell::new(AnimationLoop::new(gift, renderer)));
        let cancel = start_shared(&shared, &mut clock);
        log::info!("[native] gift mounted");
        Self {
            window,
            clock,
            started: Instant::now(),
            flow: CardFlow::new(),
            stage: Some(Stage::Gift { shared, cancel }),
            cursor: Vec2::ZERO,
        }
    }

    fn frame(&mut self) {
        let now = self.started.elapsed();
        self.clock.tick_at(now);
        if self.flow.tick(now) {
            self.reveal();
        }
    }

    /// Replace the gift with the cake, reusing the renderer.
    fn reveal(&mut self) {
        let Some(Stage::Gift { shared, cancel }) = self.stage.take() else {
            return;
        };
        cancel.cancel();
        self.clock.prune();
        let Ok(cell) = Rc::try_unwrap(shared) else {
            log::error!("[native] gift scene still in use");
            return;
        };
        let (_, mut renderer) = cell.into_inner().into_parts();
        let mut scene = CakeScene::new(
            &CakeSceneConfig::default(),
            DISPLAY_NAME,
            &mut SmallRng::from_entropy(),
        );
        scene.set_aspect(aspect(self.window.inner_size()));
        renderer.instantiate(scene.description(), &mut PlainLabels);
        let shared = Rc::new(RefCell::new(AnimationLoop::new(scene, renderer)));
        let cancel = start_shared(&shared, &mut self.clock);
        self.stage = Some(Stage::Cake {
            shared,
            _cancel: cancel,
        });
        log::info!("[native] cake mounted");
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        match &self.stage {
            Some(Stage::Gift { shared, .. }) => {
                let mut lp = shared.borrow_mut();
                lp.sink_mut().resize(size.width, size.height);
                lp.scene_mut().set_aspect(aspect(size));
            }
            Some(Stage::Cake { shared, .. }) => {
                let mut lp = shared.borrow_mut();
                lp.sink_mut().resize(size.width, size.height);
                lp.scene_mut().set_aspect(aspect(size));
            }
            None => {}
        }
    }

    fn gift_hit(&self, gift: &GiftBox) -> bool {
        let size = self.window.inner_size();
        let (origin, dir) = gift.camera().screen_ray(
            self.cursor.x,
            self.cursor.y,
            size.width.max(1) as f32,
            size.height.max(1) as f32,
        );
        gift.pick(origin, dir)
    }

    fn cursor_moved(&mut self, at: Vec2) {
        self.cursor = at;
        match &self.stage {
            Some(Stage::Gift { shared, .. }) => {
                let hovered = self.gift_hit(shared.borrow().scene());
                shared.borrow_mut().scene_mut().set_hovered(hovered);
            }
            Some(Stage::Cake { shared, .. }) => shared.borrow_mut().scene_mut().pointer_move(at),
            None => {}
        }
    }

    fn mouse_button(&mut self, state: ElementState) {
        match (&self.stage, state) {
            (Some(Stage::Gift { shared, .. }), ElementState::Pressed) => {
                let hit = self.gift_hit(shared.borrow().scene());
                if hit && self.flow.open_gift(self.started.elapsed()) {
                    shared.borrow_mut().scene_mut().open();
                }
            }
            (Some(Stage::Cake { shared, .. }), ElementState::Pressed) => {
                shared.borrow_mut().scene_mut().pointer_down(self.cursor)
            }
            (Some(Stage::Cake { shared, .. }), ElementState::Released) => {
                shared.borrow_mut().scene_mut().pointer_up()
            }
            _ => {}
        }
    }

    fn wheel(&mut self, delta: MouseScrollDelta) {
        // positive moves the camera away, as on the web
        let dy = match delta {
            MouseScrollDelta::LineDelta(_, y) => -y * LINE_PX,
            MouseScrollDelta::PixelDelta(p) => -p.y as f32,
        };
        if let Some(Stage::Cake { shared, .. }) = &self.stage {
            shared.borrow_mut().scene_mut().wheel(dy);
        }
    }
}

fn aspect(size: PhysicalSize<u32>) -> f32 {
    size.width.max(1) as f32 / size.height.max(1) as f32
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Happy Birthday")
            .build(&event_loop)?,
    );
    let size = window.inner_size();
    let renderer = pollster::block_on(SceneRenderer::new(
        window.clone(),
        size.width,
        size.height,
    ))?;
    let mut viewer = Viewer::new(window, renderer);

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::Resized(size) => viewer.resize(size),
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::CursorMoved { position, .. } => {
                viewer.cursor_moved(Vec2::new(position.x as f32, position.y as f32))
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => viewer.mouse_button(state),
            WindowEvent::MouseWheel { delta, .. } => viewer.wheel(delta),
            _ => {}
        },
        Event::AboutToWait => {
            viewer.frame();
            viewer.window.request_redraw();
        }
        _ => {}
    })?;
    Ok(())
}
