//! Pages as plain HTML strings, and the container contract the renderers
//! write through.
//!
//! Lookups and rewrites go through an HTML tokenizer, so markup inside
//! comments or `<script>` text is never mistaken for an element. Bytes
//! outside the rewritten elements are written back as they were.

use std::borrow::Cow;

use lazy_static::lazy_static;
use lol_html::{
    html_content::{ContentType, Element},
    rewrite_str, ElementContentHandlers, HandlerResult, RewriteStrSettings, Selector,
};

lazy_static! {
    /// Any element carrying an id
    static ref id_selector: Selector = "[id]".parse().unwrap();
}

/// Anything renderers can write markup into.
pub trait Document {
    /// Whether an element with this id exists and can hold content
    fn has_container(&self, id: &str) -> bool;

    /// Replace the content of the element with this id. Returns false (and
    /// changes nothing) when there is no such element.
    fn set_container_html(&mut self, id: &str, html: &str) -> bool;
}

/// Selector and handler pairs for one pass over a page
pub type Handlers<'s, 'h> = Vec<(Cow<'s, Selector>, ElementContentHandlers<'h>)>;

/// An HTML page held in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlPage {
    html: String,
}

impl HtmlPage {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn into_html(self) -> String {
        self.html
    }

    fn rewritten(&self, handlers: Handlers<'_, '_>) -> Result<String, String> {
        rewrite_str(
            &self.html,
            RewriteStrSettings {
                element_content_handlers: handlers,
                ..RewriteStrSettings::default()
            },
        )
        .map_err(|e| format!("Failed to rewrite page: {}", e))
    }

    /// Run `handlers` over the page and keep the result. On error the page
    /// is left as it was.
    pub fn rewrite(&mut self, handlers: Handlers<'_, '_>) -> Result<(), String> {
        self.html = self.rewritten(handlers)?;
        Ok(())
    }
}

impl Document for HtmlPage {
    fn has_container(&self, id: &str) -> bool {
        // Only the first element with the id counts
        let mut container = None;
        let scanned = self.rewritten(vec![(
            Cow::Borrowed(&*id_selector),
            ElementContentHandlers::default().element(|el| {
                if container.is_none() && el.get_attribute("id").as_deref() == Some(id) {
                    container = Some(el.can_have_content());
                }
                Ok(())
            }),
        )]);
        scanned.is_ok() && container.unwrap_or(false)
    }

    fn set_container_html(&mut self, id: &str, html: &str) -> bool {
        let mut seen = false;
        let mut replaced = false;
        let rewritten = self.rewritten(vec![(
            Cow::Borrowed(&*id_selector),
            ElementContentHandlers::default().element(|el| {
                if !seen && el.get_attribute("id").as_deref() == Some(id) {
                    seen = true;
                    if el.can_have_content() {
                        el.set_inner_content(html, ContentType::Html);
                        replaced = true;
                    }
                }
                Ok(())
            }),
        )]);

        match rewritten {
            Ok(page) if replaced => {
                self.html = page;
                true
            }
            _ => false,
        }
    }
}

/// Handlers for every element matching a CSS selector, for callers outside
/// this module
pub fn on_elements<'h, F>(selector: &str, handler: F) -> Result<Handlers<'static, 'h>, String>
where
    F: FnMut(&mut Element) -> HandlerResult + 'h,
{
    let selector: Selector = selector
        .parse()
        .map_err(|e| format!("Bad selector {}: {}", selector, e))?;
    Ok(vec![(
        Cow::Owned(selector),
        ElementContentHandlers::default().element(handler),
    )])
}
