use crate::{
    document::Document,
    fetch::fetch_data,
    format::{escape_html, format_date},
    Bootstrap, NewsArticle,
};

use super::{show_empty, show_load_failure, show_rendered, RenderOutcome};

pub const MAX_LATEST: usize = 3;

/// The newest articles first
pub fn select_latest(mut articles: Vec<NewsArticle>) -> Vec<NewsArticle> {
    articles.sort_by(|a, b| b.date.cmp(&a.date));
    articles.truncate(MAX_LATEST);
    articles
}

pub fn news_teaser(article: &NewsArticle) -> String {
    let author = article
        .author
        .as_deref()
        .filter(|a| !a.is_empty())
        .map(|a| format!(" • {}", escape_html(a)))
        .unwrap_or_default();
    let summary = article
        .summary
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(|s| format!(r#"<p class="news-summary">{}</p>"#, escape_html(s)))
        .unwrap_or_default();
    let tags = if article.tags.is_empty() {
        String::new()
    } else {
        let badges = article
            .tags
            .iter()
            .map(|tag| {
                format!(r#"<span class="badge badge-outline">{}</span>"#, escape_html(tag))
            })
            .collect::<Vec<_>>()
            .join(" ");
        format!("<div>{badges}</div>")
    };

    format!(
        r#"
    <div class="news-teaser">
      <div class="news-meta">{}{author}</div>
      <h3 class="news-title">{}</h3>
      {summary}
      {tags}
    </div>
  "#,
        escape_html(&format_date(&article.date)),
        escape_html(&article.title),
    )
}

pub fn render_latest_news(
    bootstrap: &Bootstrap,
    doc: &mut dyn Document,
    container_id: &str,
) -> RenderOutcome {
    if !doc.has_container(container_id) {
        return RenderOutcome::MissingContainer;
    }

    let articles: Vec<NewsArticle> = match fetch_data(bootstrap.source(), "news.json") {
        Ok(articles) => articles,
        Err(_) => return show_load_failure(doc, container_id, "Unable to load news"),
    };

    let latest = select_latest(articles);
    if latest.is_empty() {
        return show_empty(
            doc,
            container_id,
            "No news available",
            "Stay tuned for updates!",
        );
    }

    let html: String = latest.iter().map(news_teaser).collect();
    show_rendered(doc, container_id, &html, latest.len())
}
