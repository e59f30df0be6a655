use crate::constants::{GALLERY_ID, GALLERY_INPUT_ID, PREVIEW_ID};
use crate::dom;
use crate::events::ListenerGuard;
use crate::ui::toast;
use card_core::{removal_toast, MediaItem, MediaKind, MediaLibrary, Toast};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

type OnChange = Rc<dyn Fn(Vec<String>)>;

struct Gallery {
    document: web::Document,
    library: MediaLibrary,
    /// Listeners on the current tiles; replaced on every render.
    tiles: Vec<ListenerGuard>,
    on_change: OnChange,
}

type SharedGallery = Rc<RefCell<Gallery>>;

/// Wire the upload input. `on_change` receives the image sources whenever
/// the set of images changes.
pub fn wire(document: &web::Document, on_change: impl Fn(Vec<String>) + 'static) -> anyhow::Result<()> {
    let input: web::HtmlInputElement = dom::by_id(document, GALLERY_INPUT_ID)?;
    let shared: SharedGallery = Rc::new(RefCell::new(Gallery {
        document: document.clone(),
        library: MediaLibrary::new(),
        tiles: Vec::new(),
        on_change: Rc::new(on_change),
    }));

    if let Some(preview) = document.get_element_by_id(PREVIEW_ID) {
        let s = shared.clone();
        ListenerGuard::listen(&preview, "click", move |_: web::MouseEvent| {
            s.borrow_mut().library.select(None);
            defer_render(&s, false);
        })
        .forever();
    }

    let input_change = input.clone();
    ListenerGuard::listen(&input, "change", move |_: web::Event| {
        for file in dom::selected_files(&input_change) {
            add_file(&shared, file);
        }
        input_change.set_value("");
    })
    .forever();
    Ok(())
}

fn add_file(shared: &SharedGallery, file: web::File) {
    let document = shared.borrow().document.clone();
    if let Err(e) = MediaKind::classify(&file.type_()) {
        toast::show(&document, &Toast::from(e));
        return;
    }
    let shared = shared.clone();
    spawn_local(async move {
        match dom::read_data_url(&file).await {
            Ok(url) => {
                shared.borrow_mut().library.push(url);
                render(&shared);
                notify(&shared);
                toast::show(&document, &Toast::success(format!("Added {}", file.name())));
            }
            Err(e) => {
                log::warn!("[gallery] {}", e);
                toast::show(&document, &Toast::error(e.to_string()));
            }
        }
    });
}

fn notify(shared: &SharedGallery) {
    let (sources, on_change) = {
        let g = shared.borrow();
        (g.library.image_sources(), g.on_change.clone())
    };
    on_change(sources);
}

fn media_element(document: &web::Document, item: &MediaItem, preview: bool) -> Option<web::Element> {
    let el = match item.kind {
        MediaKind::Image => document.create_element("img").ok()?,
        MediaKind::Video => {
            let v = document.create_element("video").ok()?;
            _ = v.set_attribute(if preview { "controls" } else { "muted" }, "");
            v
        }
    };
    _ = el.set_attribute("src", &item.source);
    Some(el)
}

/// Rebuild the tile grid and the preview from the library.
fn render(shared: &SharedGallery) {
    let mut g = shared.borrow_mut();
    g.tiles.clear();
    let document = g.document.clone();
    let Some(grid) = document.get_element_by_id(GALLERY_ID) else {
        return;
    };
    grid.set_text_content(None);

    let mut tiles = Vec::with_capacity(g.library.len() * 2);
    for (index, item) in g.library.items().iter().enumerate() {
        let Ok(tile) = document.create_element("div") else {
            continue;
        };
        tile.set_class_name("tile");
        if let Some(media) = media_element(&document, item, false) {
            _ = tile.append_child(&media);
        }
        let s = shared.clone();
        tiles.push(ListenerGuard::listen(&tile, "click", move |_: web::MouseEvent| {
            s.borrow_mut().library.select(Some(index));
            defer_render(&s, false);
        }));
        if let Ok(remove) = document.create_element("button") {
            remove.set_class_name("remove");
            remove.set_text_content(Some("×"));
            let s = shared.clone();
            tiles.push(ListenerGuard::listen(&remove, "click", move |ev: web::MouseEvent| {
                ev.stop_propagation();
                let (document, removed) = {
                    let mut g = s.borrow_mut();
                    (g.document.clone(), g.library.remove(index))
                };
                toast::show(&document, &removal_toast(&removed));
                match removed {
                    Ok(_) => defer_render(&s, true),
                    Err(e) => log::warn!("[gallery] {}", e),
                }
            }));
            _ = tile.append_child(&remove);
        }
        _ = grid.append_child(&tile);
    }
    g.tiles = tiles;
    render_preview(&document, g.library.selected());
}

/// Tile handlers can't rebuild the tiles they belong to while running.
fn defer_render(shared: &SharedGallery, changed: bool) {
    let shared = shared.clone();
    spawn_local(async move {
        render(&shared);
        if changed {
            notify(&shared);
        }
    });
}

fn render_preview(document: &web::Document, selected: Option<&MediaItem>) {
    let Some(preview) = document.get_element_by_id(PREVIEW_ID) else {
        return;
    };
    preview.set_text_content(None);
    match selected.and_then(|item| media_element(document, item, true)) {
        Some(media) => {
            _ = preview.append_child(&media);
            dom::set_hidden(&preview, false);
        }
        None => dom::set_hidden(&preview, true),
    }
}
