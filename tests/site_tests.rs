use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clubsite::config::parse_configuration;
use clubsite::fetch::DirSource;
use clubsite::page::{default_bindings, run, Output};
use clubsite::Bootstrap;
use scraper::{Html, Selector};

const EVENTS: &str = r#"[
    {"date":"2026-10-01","title":"Past Open","location":"Clubhouse"},
    {"date":"2026-11-20","title":"Winter Cup","location":"Hall","startTime":"19:00","endTime":"22:00"},
    {"date":"2026-10-30","title":"Called Off","location":"Hall","cancelled":true},
    {"date":"2099-01-01","title":"Gala","location":"Hall","cancelled":false},
    {"date":"2026-10-25","title":"League Night","location":"Pub & Grill","type":"league"},
    {"date":"2027-03-01","title":"Spring Open","location":"Hall"}
]"#;

const NEWS: &str = r#"[
    {"date":"2026-01-10","title":"New Boards","tags":["club"]},
    {"date":"2026-09-02","title":"League Results","author":"Kim","summary":"We won <again>"}
]"#;

const MEMBERS: &str = r#"[
    {"id":"m1","displayName":"Ann","membershipCategory":"active","image":"ann.jpg","committeeRoleId":"chair"},
    {"id":"m2","displayName":"Bob","membershipCategory":"passive"},
    {"id":"m3","displayName":"Cy","active":true}
]"#;

const TEAMS: &str = r#"[
    {"id":"edarts","members":["m1","m2"]},
    {"id":"steeldarts","members":[]}
]"#;

const ROLES: &str = r#"[
    {"id":"treasurer","title":"Treasurer","order":2},
    {"id":"chair","title":"Chair","description":"Leads the club","order":1}
]"#;

const FOOTER: &str = r#"<footer>&copy; <span data-year>2020</span></footer>"#;

/// A throwaway site directory, removed when dropped
struct ScratchSite {
    root: PathBuf,
}

impl ScratchSite {
    fn new(name: &str) -> Self {
        let root = std::env::temp_dir().join(format!("clubsite-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&root);
        fs::create_dir_all(root.join("data")).unwrap();
        Self { root }
    }

    fn write(&self, path: &str, content: &str) {
        let path = self.root.join(path);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn read(&self, path: &str) -> String {
        fs::read_to_string(self.root.join(path)).unwrap()
    }

    fn path(&self) -> &Path {
        &self.root
    }

    fn bootstrap(&self) -> Bootstrap {
        Bootstrap::new(
            Box::new(DirSource::new(&self.root)),
            NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
        )
    }

    fn with_all_data(self) -> Self {
        self.write("data/events.json", EVENTS);
        self.write("data/news.json", NEWS);
        self.write("data/members.json", MEMBERS);
        self.write("data/teams.json", TEAMS);
        self.write("data/committee-roles.json", ROLES);
        self
    }

    fn with_all_pages(self) -> Self {
        let pages = [
            ("index.html", r#"<div id="upcoming-events"></div><div id="latest-news"></div>"#),
            ("edarts.html", r#"<div id="edarts-roster"></div>"#),
            ("steeldarts.html", r#"<div id="steeldarts-roster"></div>"#),
            ("active-members.html", r#"<div id="active-members"></div>"#),
            ("passive-members.html", r#"<div id="passive-members"></div>"#),
            ("committee.html", r#"<div id="committee-roles"></div>"#),
        ];
        for (file, body) in pages {
            self.write(file, &format!("<html><body>{body}{FOOTER}</body></html>"));
        }
        self
    }
}

impl Drop for ScratchSite {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}

/// How many elements of a rendered page match a CSS selector
fn count(html: &str, selector: &str) -> usize {
    let document = Html::parse_document(html);
    let selector = Selector::parse(selector).unwrap();
    document.select(&selector).count()
}

fn position(html: &str, needle: &str) -> usize {
    html.find(needle)
        .unwrap_or_else(|| panic!("{needle} not found in {html}"))
}

#[test]
fn test_full_site_render() {
    let site = ScratchSite::new("full").with_all_data().with_all_pages();
    site.write(
        "about/history.html",
        r#"<div class="carousel-container"></div><span data-year>1999</span>"#,
    );

    run(
        &site.bootstrap(),
        &default_bindings(),
        site.path(),
        None,
        Output::InPlace,
    )
    .unwrap();

    // Landing: three upcoming events, soonest first, cancelled and past ones gone
    let index = site.read("index.html");
    assert_eq!(count(&index, "#upcoming-events .event-card"), 3);
    assert_eq!(count(&index, "#latest-news .news-teaser"), 2);
    assert!(position(&index, "League Night") < position(&index, "Winter Cup"));
    assert!(position(&index, "Winter Cup") < position(&index, "Spring Open"));
    assert!(!index.contains("Past Open"));
    assert!(!index.contains("Called Off"));
    assert!(!index.contains("Gala"));
    assert!(index.contains("Pub &amp; Grill"));
    assert!(index.contains("⏰ 19:00 - 22:00"));
    assert!(position(&index, "League Results") < position(&index, "New Boards"));
    assert!(index.contains("We won &lt;again&gt;"));
    assert!(index.contains("<span data-year>2026</span>"));

    // Rosters
    let edarts = site.read("edarts.html");
    assert_eq!(count(&edarts, "#edarts-roster .grid-3 .member-card"), 2);
    assert!(edarts.contains(r#"<div class="member-name">Ann</div>"#));
    assert!(edarts.contains(r#"<div class="member-name">Bob</div>"#));
    assert!(!edarts.contains("Cy"));
    assert!(site.read("steeldarts.html").contains("No team members yet"));

    // Member lists
    let active = site.read("active-members.html");
    assert!(active.contains("Ann") && active.contains("Cy") && !active.contains("Bob"));
    let passive = site.read("passive-members.html");
    assert!(passive.contains("Bob") && !passive.contains("Ann"));

    // Committee
    let committee = site.read("committee.html");
    assert!(position(&committee, ">Chair<") < position(&committee, ">Treasurer<"));
    assert!(committee.contains("Leads the club"));
    assert_eq!(committee.matches("Position currently vacant").count(), 1);

    // Pages without bindings still get the site-wide passes
    let history = site.read("about/history.html");
    assert_eq!(count(&history, r#".carousel-container[tabindex="0"][aria-label]"#), 1);
    assert!(history.contains("<span data-year>2026</span>"));
}

#[test]
fn test_single_event_scenario() {
    let site = ScratchSite::new("gala").with_all_pages();
    site.write(
        "data/events.json",
        r#"[{"date":"2099-01-01","title":"Gala","location":"Hall","cancelled":false}]"#,
    );
    site.write("data/news.json", "[]");

    run(
        &site.bootstrap(),
        &default_bindings(),
        site.path(),
        Some("index.html"),
        Output::InPlace,
    )
    .unwrap();

    let index = site.read("index.html");
    assert_eq!(count(&index, "#upcoming-events .event-card"), 1);
    assert!(index.contains(r#"<h3 class="event-title">Gala</h3>"#));
    assert!(index.contains("No news available"));
    // Only the requested page is touched
    assert!(site.read("edarts.html").contains(r#"<div id="edarts-roster"></div>"#));
}

#[test]
fn test_missing_members_file() {
    let site = ScratchSite::new("no-members").with_all_pages();

    run(
        &site.bootstrap(),
        &default_bindings(),
        site.path(),
        Some("active-members.html"),
        Output::InPlace,
    )
    .unwrap();

    assert!(site.read("active-members.html").contains("Unable to load members"));
}

#[test]
fn test_commented_markup_is_not_a_container() {
    let site = ScratchSite::new("comments").with_all_data();
    site.write(
        "index.html",
        r#"<!-- <div id="upcoming-events">draft</div> -->
<div id="upcoming-events"><!-- cards go here: <div class="event-card"> --></div>
<div id="latest-news"></div>"#,
    );

    run(
        &site.bootstrap(),
        &default_bindings(),
        site.path(),
        Some("index.html"),
        Output::InPlace,
    )
    .unwrap();

    let index = site.read("index.html");
    assert!(index.starts_with(r#"<!-- <div id="upcoming-events">draft</div> -->"#));
    assert_eq!(count(&index, "#upcoming-events .event-card"), 3);
}

#[test]
fn test_rendering_twice_is_stable() {
    let site = ScratchSite::new("twice").with_all_data().with_all_pages();
    let bootstrap = site.bootstrap();
    let bindings = default_bindings();

    run(&bootstrap, &bindings, site.path(), None, Output::InPlace).unwrap();
    let first = site.read("committee.html");
    run(&bootstrap, &bindings, site.path(), None, Output::InPlace).unwrap();
    assert_eq!(site.read("committee.html"), first);
}

#[test]
fn test_configured_bindings() {
    let site = ScratchSite::new("configured").with_all_data();
    site.write(
        "club.html",
        r#"<section id="roster"></section><section id="board"></section>"#,
    );
    let config = parse_configuration(
        r#"
        [[pages]]
        file = "club.html"
        sections = [
          { view = "team-roster", team = "edarts", container = "roster" },
          { view = "committee", container = "board" },
          { view = "latest-news", container = "not-on-this-page" },
        ]
        "#,
    )
    .unwrap();

    run(
        &site.bootstrap(),
        &config.pages,
        site.path(),
        None,
        Output::InPlace,
    )
    .unwrap();

    let club = site.read("club.html");
    assert!(club.contains("grid grid-3"));
    assert!(club.contains(">Treasurer<"));
    assert!(!club.contains("news-teaser"));
}

#[test]
fn test_unknown_page() {
    let site = ScratchSite::new("unknown").with_all_pages();
    let result = run(
        &site.bootstrap(),
        &default_bindings(),
        site.path(),
        Some("gallery.html"),
        Output::InPlace,
    );
    assert_eq!(result.unwrap_err(), "No page binding for gallery.html");
}

#[test]
fn test_full_run_skips_missing_page() {
    let site = ScratchSite::new("partial").with_all_data().with_all_pages();
    fs::remove_file(site.path().join("steeldarts.html")).unwrap();

    run(
        &site.bootstrap(),
        &default_bindings(),
        site.path(),
        None,
        Output::InPlace,
    )
    .unwrap();

    assert!(!site.path().join("steeldarts.html").exists());
    // Pages bound after the missing one are still rendered
    assert!(site.read("committee.html").contains(">Treasurer<"));
    assert!(site.read("passive-members.html").contains("Bob"));
}

#[test]
fn test_missing_page_file() {
    let site = ScratchSite::new("missing-page").with_all_data();
    let result = run(
        &site.bootstrap(),
        &default_bindings(),
        site.path(),
        Some("committee.html"),
        Output::InPlace,
    );
    assert!(result.unwrap_err().starts_with("Failed to read page"));
}
