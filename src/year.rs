use colored::Colorize;
use lol_html::html_content::ContentType;

use crate::document::{on_elements, HtmlPage};

/// Write `year` into every element marked with `data-year`, typically the
/// footer copyright. Returns how many marked elements were found.
pub fn update_year(page: &mut HtmlPage, year: i32) -> usize {
    let text = year.to_string();
    let mut updated = 0;
    let result = on_elements("[data-year]", |el| {
        if el.can_have_content() {
            el.set_inner_content(&text, ContentType::Text);
            updated += 1;
        }
        Ok(())
    })
    .and_then(|handlers| page.rewrite(handlers));

    match result {
        Ok(()) => updated,
        Err(e) => {
            eprintln!("{} {}", "Could not update the year:".red(), e);
            0
        }
    }
}
