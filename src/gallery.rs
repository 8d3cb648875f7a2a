use crate::error::{GalleryError, Result};
use crate::index::{BoundedIndex, Reaction};
use crate::keybinds::Action;
use crate::media::{self, MediaKind};
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavLink {
    First,
    Prev,
    Next,
    Last,
}

/// Everything the gallery needs from the page it is drawn on.
pub trait RenderPort {
    fn show_image(&mut self, path: &str) -> Result<()>;
    fn show_video(&mut self, path: &str) -> Result<()>;
    /// `None` clears the link so it no longer points anywhere.
    fn set_link(&mut self, link: NavLink, target: Option<&str>) -> Result<()>;
    fn set_title(&mut self, title: &str) -> Result<()>;
    /// Replaces the URL fragment without adding a history entry.
    fn set_hash(&mut self, name: &str) -> Result<()>;
}

/// The loaded asset sequence and the current position in it.
pub struct Gallery {
    assets: Rc<[String]>,
    index: BoundedIndex<Reaction>,
}

impl Gallery {
    /// Starts at the asset whose base name equals `hash`, or at the first one,
    /// and renders it.
    pub fn new<P>(assets: Vec<String>, hash: &str, mut port: P, title_format: &str) -> Result<Self>
    where
        P: RenderPort + 'static,
    {
        if assets.is_empty() {
            return Err(GalleryError::EmptyGallery);
        }
        let assets: Rc<[String]> = assets.into();
        let max = assets.len() - 1;
        let initial = initial_index(&assets, hash);

        port.set_link(NavLink::First, Some(media::base_name(&assets[0])))?;
        port.set_link(NavLink::Last, Some(media::base_name(&assets[max])))?;

        let view = Rc::clone(&assets);
        let title_format = title_format.to_string();
        let react: Reaction = Box::new(move |i| render(&view, i, &mut port, &title_format));
        let index = BoundedIndex::new(0, max, initial, react)?;

        Ok(Self { assets, index })
    }

    pub fn set(&mut self, index: usize) -> Result<bool> {
        self.index.set(index)
    }

    pub fn next(&mut self) -> Result<bool> {
        self.index.increment()
    }

    pub fn previous(&mut self) -> Result<bool> {
        self.index.decrement()
    }

    pub fn first(&mut self) -> Result<bool> {
        self.index.set(self.index.min())
    }

    pub fn last(&mut self) -> Result<bool> {
        self.index.set(self.index.max())
    }

    pub fn apply(&mut self, action: Action) -> Result<bool> {
        log::debug!("action={:?} index={}", action, self.index.value());
        match action {
            Action::Next => self.next(),
            Action::Previous => self.previous(),
            Action::First => self.first(),
            Action::Last => self.last(),
        }
    }

    /// Jumps to the asset named `name`; unknown names are ignored.
    pub fn select(&mut self, name: &str) -> Result<bool> {
        match position_of(&self.assets, name) {
            Some(i) => self.set(i),
            None => Ok(false),
        }
    }

    pub fn current_index(&self) -> usize {
        self.index.value()
    }

    pub fn current_path(&self) -> &str {
        &self.assets[self.index.value()]
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn assets(&self) -> &[String] {
        &self.assets
    }
}

fn position_of(assets: &[String], name: &str) -> Option<usize> {
    assets.iter().position(|path| media::base_name(path) == name)
}

/// Position matching the URL fragment, or 0 when nothing matches.
pub fn initial_index(assets: &[String], hash: &str) -> usize {
    let name = hash.strip_prefix('#').unwrap_or(hash);
    position_of(assets, name).unwrap_or(0)
}

fn render<P: RenderPort>(assets: &[String], index: usize, port: &mut P, title_format: &str) -> Result<()> {
    let path = &assets[index];
    log::debug!("href={}", path);

    match media::display_kind(path)? {
        MediaKind::Image => port.show_image(path)?,
        MediaKind::Video => port.show_video(path)?,
    }

    let prev = index
        .checked_sub(1)
        .and_then(|i| assets.get(i))
        .map(|p| media::base_name(p));
    let next = assets.get(index + 1).map(|p| media::base_name(p));
    port.set_link(NavLink::Prev, prev)?;
    port.set_link(NavLink::Next, next)?;

    let name = media::base_name(path);
    port.set_title(&format_title(title_format, path, index, assets.len()))?;
    port.set_hash(name)
}

/// Expands `%n` (base name), `%p` (path), `%i` (1-based position), `%t`
/// (total) and `%%`.
pub fn format_title(format: &str, path: &str, index: usize, total: usize) -> String {
    let mut out = String::with_capacity(format.len() + path.len());
    let mut chars = format.chars();
    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push_str(media::base_name(path)),
            Some('p') => out.push_str(path),
            Some('i') => out.push_str(&(index + 1).to_string()),
            Some('t') => out.push_str(&total.to_string()),
            Some('%') => out.push('%'),
            Some(other) => {
                out.push('%');
                out.push(other);
            }
            None => out.push('%'),
        }
    }
    out
}
