//! One renderer per view. Every renderer:
//!
//! 1. does nothing if the page has no container with the given id,
//! 2. fetches what it needs, showing an empty state if that fails,
//! 3. selects and orders the records for the view,
//! 4. shows an empty state if nothing is left, otherwise writes one
//!    fragment per record into the container.
//!
//! Renderers never fail: every path ends in markup or a no-op.

pub mod committee;
pub mod events;
pub mod members;
pub mod news;

use std::fmt::Display;

use colored::Colorize;

use crate::{document::Document, format::empty_state};

/// Shown whenever a dataset could not be loaded
const TRY_AGAIN: &str = "Please try again later.";

/// What a renderer ended up doing with its container
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The page has no such container
    MissingContainer,
    /// A dataset could not be fetched or parsed
    LoadFailed,
    /// The data loaded but nothing qualified
    Empty,
    /// This many records were rendered
    Rendered(usize),
}

impl Display for RenderOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            RenderOutcome::MissingContainer => "no container on this page".white().to_string(),
            RenderOutcome::LoadFailed => "could not load data".red().to_string(),
            RenderOutcome::Empty => "nothing to show".yellow().to_string(),
            RenderOutcome::Rendered(count) => {
                format!("{} {}", "rendered".green(), count.to_string().white())
            }
        };
        write!(f, "{msg}")
    }
}

fn show_load_failure(doc: &mut dyn Document, container_id: &str, title: &str) -> RenderOutcome {
    doc.set_container_html(container_id, &empty_state(title, TRY_AGAIN));
    RenderOutcome::LoadFailed
}

fn show_empty(
    doc: &mut dyn Document,
    container_id: &str,
    title: &str,
    message: &str,
) -> RenderOutcome {
    doc.set_container_html(container_id, &empty_state(title, message));
    RenderOutcome::Empty
}

fn show_rendered(
    doc: &mut dyn Document,
    container_id: &str,
    html: &str,
    count: usize,
) -> RenderOutcome {
    doc.set_container_html(container_id, html);
    RenderOutcome::Rendered(count)
}
