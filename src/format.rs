//! Small pure helpers shared by the renderers.

use chrono::NaiveDate;

use crate::{MEMBER_IMAGE_PATH, MEMBER_PLACEHOLDER};

/// Turn an ISO date (`2025-01-05`, optionally followed by a time) into a
/// long US-English date such as "January 5, 2025". Anything that does not
/// parse comes back unchanged.
pub fn format_date(iso: &str) -> String {
    let day = iso.get(..10).unwrap_or(iso);
    match NaiveDate::parse_from_str(day, "%Y-%m-%d") {
        Ok(date) => date.format("%B %-d, %Y").to_string(),
        Err(_) => iso.to_string(),
    }
}

/// Make text safe to interpolate into markup, attribute values included.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// The placeholder block shown when there is nothing to list.
pub fn empty_state(title: &str, message: &str) -> String {
    format!(
        r#"
    <div class="empty-state">
      <div class="empty-state-icon">🎯</div>
      <h3 class="empty-state-title">{}</h3>
      <p class="empty-state-message">{}</p>
    </div>
  "#,
        escape_html(title),
        escape_html(message)
    )
}

/// Source and alt text for a member photo
pub fn member_image(image: Option<&str>, display_name: &str) -> (String, String) {
    match image.filter(|image| !image.is_empty()) {
        Some(image) => {
            // Subdirectories stay subdirectories
            let encoded: Vec<_> = image.split('/').map(urlencoding::encode).collect();
            (
                format!("{MEMBER_IMAGE_PATH}{}", encoded.join("/")),
                display_name.to_string(),
            )
        }
        None => (
            MEMBER_PLACEHOLDER.to_string(),
            "Member placeholder".to_string(),
        ),
    }
}
