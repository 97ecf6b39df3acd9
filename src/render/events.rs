use crate::{
    document::Document,
    fetch::fetch_data,
    format::{escape_html, format_date},
    Bootstrap, Event,
};

use super::{show_empty, show_load_failure, show_rendered, RenderOutcome};

/// How many upcoming events the landing page shows
pub const MAX_UPCOMING: usize = 3;

/// Events on or after `today` that are not cancelled, soonest first.
pub fn select_upcoming(events: Vec<Event>, today: &str) -> Vec<Event> {
    let mut upcoming: Vec<Event> = events
        .into_iter()
        .filter(|event| event.date.as_str() >= today && !event.cancelled)
        .collect();
    upcoming.sort_by(|a, b| a.date.cmp(&b.date));
    upcoming.truncate(MAX_UPCOMING);
    upcoming
}

pub fn event_card(event: &Event) -> String {
    let time = match (&event.start_time, &event.end_time) {
        (Some(start), Some(end)) => format!(
            r#"<div class="event-time">⏰ {} - {}</div>"#,
            escape_html(start),
            escape_html(end)
        ),
        (Some(start), None) => {
            format!(r#"<div class="event-time">⏰ {}</div>"#, escape_html(start))
        }
        (None, _) => String::new(),
    };
    let description = event
        .description
        .as_deref()
        .filter(|d| !d.is_empty())
        .map(|d| format!(r#"<p class="card-content">{}</p>"#, escape_html(d)))
        .unwrap_or_default();
    let badge = event
        .kind
        .as_deref()
        .filter(|k| !k.is_empty())
        .map(|k| format!(r#"<span class="badge">{}</span>"#, escape_html(k)))
        .unwrap_or_default();

    format!(
        r#"
    <div class="event-card">
      <div class="event-date">{}</div>
      <h3 class="event-title">{}</h3>
      {time}
      <div class="event-location">📍 {}</div>
      {description}
      {badge}
    </div>
  "#,
        escape_html(&format_date(&event.date)),
        escape_html(&event.title),
        escape_html(&event.location),
    )
}

/// Render the next few events into `container_id`
pub fn render_upcoming_events(
    bootstrap: &Bootstrap,
    doc: &mut dyn Document,
    container_id: &str,
) -> RenderOutcome {
    if !doc.has_container(container_id) {
        return RenderOutcome::MissingContainer;
    }

    let events: Vec<Event> = match fetch_data(bootstrap.source(), "events.json") {
        Ok(events) => events,
        Err(_) => return show_load_failure(doc, container_id, "Unable to load events"),
    };

    let upcoming = select_upcoming(events, &bootstrap.today_iso());
    if upcoming.is_empty() {
        return show_empty(
            doc,
            container_id,
            "No upcoming events",
            "Check back soon for new events!",
        );
    }

    let html: String = upcoming.iter().map(event_card).collect();
    show_rendered(doc, container_id, &html, upcoming.len())
}
