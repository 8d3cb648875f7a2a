//! Directory listing parsing.
//!
//! The listing is a server-generated HTML index page. Its links are resolved
//! against the listing URL and reduced to gallery-relative asset paths.

use crate::error::{GalleryError, Result};
use crate::media;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use url::Url;

/// Parses `html` fetched from `listing_url` into the ordered gallery sequence.
pub fn parse_listing(listing_url: &Url, html: &str, strip: usize) -> Result<Vec<String>> {
    let hrefs = extract_hrefs(html)?;
    let assets = build_sequence(listing_url, &hrefs, strip);
    log::debug!("links={:?} hrefs={:?}", hrefs, assets);
    Ok(assets)
}

/// Returns the `href`s of the first top-level element that contains any links.
///
/// The first line of the document (the doctype) is dropped before parsing.
/// Top-level elements are the children of `<head>` followed by the children
/// of `<body>`.
pub fn extract_hrefs(html: &str) -> Result<Vec<String>> {
    let body = html.split_once('\n').map(|(_, rest)| rest).unwrap_or("");
    let dom = parse_document(RcDom::default(), Default::default()).one(body.trim());

    top_level_elements(&dom.document)
        .iter()
        .map(|el| {
            let mut hrefs = Vec::new();
            for child in el.children.borrow().iter() {
                collect_hrefs(child, &mut hrefs);
            }
            hrefs
        })
        .find(|hrefs| !hrefs.is_empty())
        .ok_or(GalleryError::NoAnchors)
}

fn top_level_elements(document: &Handle) -> Vec<Handle> {
    let mut elements = Vec::new();
    for html in document.children.borrow().iter() {
        if !is_element(html, "html") {
            continue;
        }
        for section in html.children.borrow().iter() {
            if is_element(section, "head") || is_element(section, "body") {
                elements.extend(
                    section
                        .children
                        .borrow()
                        .iter()
                        .filter(|child| matches!(child.data, NodeData::Element { .. }))
                        .cloned(),
                );
            }
        }
    }
    elements
}

fn is_element(handle: &Handle, tag: &str) -> bool {
    match &handle.data {
        NodeData::Element { name, .. } => name.local.as_ref() == tag,
        _ => false,
    }
}

fn collect_hrefs(handle: &Handle, hrefs: &mut Vec<String>) {
    if let NodeData::Element { name, attrs, .. } = &handle.data {
        if name.local.as_ref() == "a" {
            if let Some(href) = attrs
                .borrow()
                .iter()
                .find(|a| a.name.local.as_ref() == "href")
            {
                hrefs.push(href.value.to_string());
            }
        }
    }
    for child in handle.children.borrow().iter() {
        collect_hrefs(child, hrefs);
    }
}

/// Resolves each link, strips the leading URL segments and keeps media only.
pub fn build_sequence<S: AsRef<str>>(listing_url: &Url, hrefs: &[S], strip: usize) -> Vec<String> {
    hrefs
        .iter()
        .filter_map(|href| {
            let href = href.as_ref();
            match listing_url.join(href) {
                Ok(resolved) => Some(strip_segments(resolved.as_str(), strip)),
                Err(e) => {
                    log::warn!("Skipping link '{}': {}", href, e);
                    None
                }
            }
        })
        .filter(|path| media::is_media(path))
        .collect()
}

/// Drops the first `n` `/`-separated segments of `url`.
///
/// With `n = 4`, `https://host/zeke/img/a.png` becomes `img/a.png`.
pub fn strip_segments(url: &str, n: usize) -> String {
    url.split('/').skip(n).collect::<Vec<_>>().join("/")
}
