//! Keyboard navigation for horizontally scrolling carousels.
//!
//! The navigation itself is plain state: which item is current, and which
//! item a key press should scroll to. The page pass makes every carousel
//! container reachable by keyboard and announces how to use it.

use colored::Colorize;

use crate::document::{on_elements, HtmlPage};

const CONTAINER_CLASS: &str = "carousel-container";
const CONTAINER_LABEL: &str = "Scrollable carousel - use arrow keys to navigate";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` name
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            "Home" => Key::Home,
            "End" => Key::End,
            _ => Key::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
    pub shift: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carousel {
    len: usize,
    current: usize,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self { len, current: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Handle a key press. Returns the item to scroll to when the key was
    /// consumed; `None` means the key should keep its default behavior.
    /// Shift is allowed, every other modifier makes the carousel ignore
    /// the key.
    pub fn handle_key(&mut self, key: Key, modifiers: Modifiers) -> Option<usize> {
        if modifiers.ctrl || modifiers.alt || modifiers.meta {
            return None;
        }

        let target = match key {
            Key::ArrowLeft => self.current.checked_sub(1),
            Key::ArrowRight => Some(self.current + 1),
            Key::Home => Some(0),
            Key::End => self.len.checked_sub(1),
            Key::Other => return None,
        };

        // The key is consumed even at the edges, it just goes nowhere
        Some(self.scroll_to(target.unwrap_or(self.current)))
    }

    /// Move to `index` if it is a valid item, and return the current item.
    pub fn scroll_to(&mut self, index: usize) -> usize {
        if index < self.len {
            self.current = index;
        }
        self.current
    }

    /// After a scroll, the current item is the one whose center is nearest
    /// to the container's center. The first one wins a tie.
    pub fn update_current_index(&mut self, container_center: f64, item_centers: &[f64]) {
        let mut closest = 0;
        let mut closest_distance = f64::INFINITY;
        for (index, center) in item_centers.iter().enumerate() {
            let distance = (container_center - center).abs();
            if distance < closest_distance {
                closest_distance = distance;
                closest = index;
            }
        }
        self.current = closest;
    }
}

/// Make every carousel container focusable and labelled, keeping any
/// `tabindex` or `aria-label` the page already sets. Returns how many
/// containers were found.
pub fn prepare_carousels(page: &mut HtmlPage) -> usize {
    let mut found = 0;
    let result = on_elements(&format!(".{CONTAINER_CLASS}"), |el| {
        found += 1;
        if !el.has_attribute("tabindex") {
            el.set_attribute("tabindex", "0")?;
        }
        if !el.has_attribute("aria-label") {
            el.set_attribute("aria-label", CONTAINER_LABEL)?;
        }
        Ok(())
    })
    .and_then(|handlers| page.rewrite(handlers));

    match result {
        Ok(()) => found,
        Err(e) => {
            eprintln!("{} {}", "Could not prepare carousels:".red(), e);
            0
        }
    }
}
