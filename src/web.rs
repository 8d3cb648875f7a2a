use crate::config::{GalleryConfig, Ui};
use crate::error::{GalleryError, Result};
use crate::gallery::{Gallery, NavLink, RenderPort};
use crate::keybinds::Binding;
use crate::{listing, logging};
use gloo_events::{EventListener, EventListenerOptions};
use gloo_net::http::Request;
use std::cell::RefCell;
use std::rc::Rc;
use url::Url;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, History, HtmlAnchorElement, HtmlElement, HtmlImageElement,
    HtmlVideoElement, KeyboardEvent, Location, Window,
};

/// Inline `<script type="application/toml">` holding configuration overrides.
const CONFIG_ELEMENT_ID: &str = "gallery-config";

impl From<GalleryError> for JsValue {
    fn from(err: GalleryError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

fn js_err(value: JsValue) -> GalleryError {
    GalleryError::Dom(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

struct Elements {
    first: HtmlAnchorElement,
    prev: HtmlAnchorElement,
    next: HtmlAnchorElement,
    last: HtmlAnchorElement,
    image: HtmlImageElement,
    video: HtmlVideoElement,
}

impl Elements {
    fn find(document: &Document, ui: &Ui) -> Result<Self> {
        Ok(Self {
            first: must_find(document, &ui.first_link, "anchor")?,
            prev: must_find(document, &ui.prev_link, "anchor")?,
            next: must_find(document, &ui.next_link, "anchor")?,
            last: must_find(document, &ui.last_link, "anchor")?,
            image: must_find(document, &ui.image, "image")?,
            video: must_find(document, &ui.video, "video")?,
        })
    }

    fn link(&self, link: NavLink) -> &HtmlAnchorElement {
        match link {
            NavLink::First => &self.first,
            NavLink::Prev => &self.prev,
            NavLink::Next => &self.next,
            NavLink::Last => &self.last,
        }
    }
}

fn must_find<T: JsCast>(document: &Document, id: &str, expected: &'static str) -> Result<T> {
    let el: Element = document
        .get_element_by_id(id)
        .ok_or_else(|| GalleryError::MissingElement(id.to_string()))?;
    el.dyn_into::<T>().map_err(|_| GalleryError::WrongElementKind {
        id: id.to_string(),
        expected,
    })
}

fn show(el: &HtmlElement) -> Result<()> {
    el.style().set_property("display", "block").map_err(js_err)
}

fn hide(el: &HtmlElement) -> Result<()> {
    el.style().set_property("display", "none").map_err(js_err)
}

struct DomPort {
    document: Document,
    history: History,
    location: Location,
    elements: Rc<Elements>,
}

impl RenderPort for DomPort {
    fn show_image(&mut self, path: &str) -> Result<()> {
        self.elements.image.set_src(path);
        hide(&self.elements.video)?;
        show(&self.elements.image)
    }

    fn show_video(&mut self, path: &str) -> Result<()> {
        self.elements.video.set_src(path);
        hide(&self.elements.image)?;
        show(&self.elements.video)
    }

    fn set_link(&mut self, link: NavLink, target: Option<&str>) -> Result<()> {
        let anchor = self.elements.link(link);
        match target {
            Some(name) => anchor.set_href(&format!("#{}", name)),
            None if anchor.has_attribute("href") => {
                anchor.remove_attribute("href").map_err(js_err)?
            }
            None => {}
        }
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        self.document.set_title(title);
        Ok(())
    }

    fn set_hash(&mut self, name: &str) -> Result<()> {
        let pathname = self.location.pathname().map_err(js_err)?;
        self.history
            .replace_state_with_url(
                &JsValue::NULL,
                &self.document.title(),
                Some(&format!("{}#{}", pathname, name)),
            )
            .map_err(js_err)
    }
}

/// Reports failures in the console and, when present, the status element.
#[derive(Clone)]
struct StatusLine {
    document: Document,
    id: String,
}

impl StatusLine {
    fn report(&self, err: &GalleryError) {
        log::error!("{}", err);
        if let Some(el) = self.document.get_element_by_id(&self.id) {
            el.set_text_content(Some(&err.to_string()));
        }
    }
}

type Shared = Rc<RefCell<Gallery>>;

#[wasm_bindgen(start)]
pub fn start() -> std::result::Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| GalleryError::Dom("no window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| GalleryError::Dom("no document".into()))?;

    let inline = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content());
    let parsed = inline.as_deref().map(GalleryConfig::from_toml).transpose();
    let config = match &parsed {
        Ok(config) => config.clone().unwrap_or_default(),
        Err(_) => GalleryConfig::default(),
    };

    let host = window.location().host().unwrap_or_default();
    logging::init(&config.logging, &host);
    if let Err(e) = parsed {
        log::warn!("Failed to parse config: {}", e);
    }

    let status = StatusLine {
        document: document.clone(),
        id: config.ui.status.clone(),
    };
    let elements = match Elements::find(&document, &config.ui) {
        Ok(elements) => elements,
        Err(e) => {
            status.report(&e);
            return Err(e.into());
        }
    };

    wasm_bindgen_futures::spawn_local(async move {
        if let Err(e) = run(window, document, config, elements, status.clone()).await {
            status.report(&e);
        }
    });
    Ok(())
}

async fn run(
    window: Window,
    document: Document,
    config: GalleryConfig,
    elements: Elements,
    status: StatusLine,
) -> Result<()> {
    let location = window.location();
    let page_url = Url::parse(&location.href().map_err(js_err)?)?;
    let listing_url = page_url.join(&config.listing.path)?;

    let html = fetch_listing(&listing_url).await?;
    let assets = listing::parse_listing(&listing_url, &html, config.listing.strip_segments)?;
    let hash = location.hash().map_err(js_err)?;

    let elements = Rc::new(elements);
    let port = DomPort {
        document: document.clone(),
        history: window.history().map_err(js_err)?,
        location: location.clone(),
        elements: Rc::clone(&elements),
    };
    let gallery: Shared = Rc::new(RefCell::new(Gallery::new(
        assets,
        &hash,
        port,
        &config.ui.title_format,
    )?));
    log::debug!("loaded {} assets", gallery.borrow().len());

    on_click(&elements.first, &gallery, &status, true, Gallery::first);
    on_click(&elements.last, &gallery, &status, true, Gallery::last);
    on_click(&elements.prev, &gallery, &status, true, Gallery::previous);
    on_click(&elements.next, &gallery, &status, true, Gallery::next);
    on_click(&elements.image, &gallery, &status, false, Gallery::next);
    on_click(&elements.video, &gallery, &status, false, Gallery::next);

    listen_for_keys(&document, &gallery, &status, Binding::from_config(&config.keybindings));
    listen_for_hash(&window, location, &gallery, &status);
    Ok(())
}

async fn fetch_listing(url: &Url) -> Result<String> {
    let response = Request::get(url.as_str())
        .send()
        .await
        .map_err(|e| GalleryError::Fetch(e.to_string()))?;
    if !response.ok() {
        return Err(GalleryError::Fetch(format!(
            "{} returned {}",
            url,
            response.status()
        )));
    }
    response
        .text()
        .await
        .map_err(|e| GalleryError::Fetch(e.to_string()))
}

/// Link clicks skip the browser's own hash navigation so that browsing never
/// pushes history entries.
fn on_click(
    target: &HtmlElement,
    gallery: &Shared,
    status: &StatusLine,
    prevent_default: bool,
    op: fn(&mut Gallery) -> Result<bool>,
) {
    let gallery = Rc::clone(gallery);
    let status = status.clone();
    let options = if prevent_default {
        EventListenerOptions::enable_prevent_default()
    } else {
        EventListenerOptions::default()
    };
    EventListener::new_with_options(target, "click", options, move |event| {
        if prevent_default {
            event.prevent_default();
        }
        if let Err(e) = op(&mut gallery.borrow_mut()) {
            status.report(&e);
        }
    })
    .forget();
}

fn listen_for_keys(document: &Document, gallery: &Shared, status: &StatusLine, bindings: Vec<Binding>) {
    let gallery = Rc::clone(gallery);
    let status = status.clone();
    EventListener::new(document, "keydown", move |event| {
        let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        if let Some(action) = Binding::resolve(&event.key(), &bindings) {
            if let Err(e) = gallery.borrow_mut().apply(action) {
                status.report(&e);
            }
        }
    })
    .forget();
}

/// Follows hand-edited fragments. The gallery's own updates use
/// `replaceState`, which does not fire `hashchange`.
fn listen_for_hash(window: &Window, location: Location, gallery: &Shared, status: &StatusLine) {
    let gallery = Rc::clone(gallery);
    let status = status.clone();
    EventListener::new(window, "hashchange", move |_| {
        let Ok(hash) = location.hash() else {
            return;
        };
        let name = hash.strip_prefix('#').unwrap_or(&hash);
        if let Err(e) = gallery.borrow_mut().select(name) {
            status.report(&e);
        }
    })
    .forget();
}
