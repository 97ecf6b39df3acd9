//! Page initialization: which renderers run on which page, and into which
//! containers. This is the explicit counterpart of each page loading its
//! own init script.

use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use colored::Colorize;
use serde::Deserialize;
use walkdir::WalkDir;

use crate::{
    carousel::prepare_carousels,
    document::{Document, HtmlPage},
    render::{
        committee::render_committee,
        events::render_upcoming_events,
        members::{render_active_members, render_passive_members, render_team_roster},
        news::render_latest_news,
        RenderOutcome,
    },
    year::update_year,
    Bootstrap,
};

/// One renderer bound to one container
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(tag = "view", rename_all = "kebab-case")]
pub enum Section {
    UpcomingEvents { container: String },
    LatestNews { container: String },
    TeamRoster { team: String, container: String },
    ActiveMembers { container: String },
    PassiveMembers { container: String },
    Committee { container: String },
}

impl Section {
    pub fn container(&self) -> &str {
        match self {
            Section::UpcomingEvents { container }
            | Section::LatestNews { container }
            | Section::TeamRoster { container, .. }
            | Section::ActiveMembers { container }
            | Section::PassiveMembers { container }
            | Section::Committee { container } => container,
        }
    }

    pub fn render(&self, bootstrap: &Bootstrap, page: &mut dyn Document) -> RenderOutcome {
        match self {
            Section::UpcomingEvents { container } => {
                render_upcoming_events(bootstrap, page, container)
            }
            Section::LatestNews { container } => render_latest_news(bootstrap, page, container),
            Section::TeamRoster { team, container } => {
                render_team_roster(bootstrap, page, team, container)
            }
            Section::ActiveMembers { container } => {
                render_active_members(bootstrap, page, container)
            }
            Section::PassiveMembers { container } => {
                render_passive_members(bootstrap, page, container)
            }
            Section::Committee { container } => render_committee(bootstrap, page, container),
        }
    }
}

/// A page file and the sections rendered into it, in order
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PageBinding {
    pub file: String,
    #[serde(default)]
    pub sections: Vec<Section>,
}

fn roster(team: &str, container: &str) -> Section {
    Section::TeamRoster {
        team: team.to_string(),
        container: container.to_string(),
    }
}

fn binding(file: &str, sections: Vec<Section>) -> PageBinding {
    PageBinding {
        file: file.to_string(),
        sections,
    }
}

/// The club site's pages
pub fn default_bindings() -> Vec<PageBinding> {
    vec![
        binding(
            "index.html",
            vec![
                Section::UpcomingEvents {
                    container: "upcoming-events".to_string(),
                },
                Section::LatestNews {
                    container: "latest-news".to_string(),
                },
            ],
        ),
        binding("edarts.html", vec![roster("edarts", "edarts-roster")]),
        binding(
            "steeldarts.html",
            vec![roster("steeldarts", "steeldarts-roster")],
        ),
        binding(
            "active-members.html",
            vec![Section::ActiveMembers {
                container: "active-members".to_string(),
            }],
        ),
        binding(
            "passive-members.html",
            vec![Section::PassiveMembers {
                container: "passive-members".to_string(),
            }],
        ),
        binding(
            "committee.html",
            vec![Section::Committee {
                container: "committee-roles".to_string(),
            }],
        ),
    ]
}

/// Run every section of `binding` against `page`, then the year and
/// carousel passes every page gets.
pub fn init_page(
    bootstrap: &Bootstrap,
    binding: &PageBinding,
    page: &mut HtmlPage,
) -> Vec<(String, RenderOutcome)> {
    let mut outcomes = Vec::with_capacity(binding.sections.len());
    for section in &binding.sections {
        let outcome = section.render(bootstrap, &mut *page);
        outcomes.push((section.container().to_string(), outcome));
    }
    decorate_page(bootstrap, page);
    outcomes
}

/// The site-wide utilities: footer year and carousel accessibility
pub fn decorate_page(bootstrap: &Bootstrap, page: &mut HtmlPage) {
    update_year(page, bootstrap.year());
    prepare_carousels(page);
}

/// Where rendered pages go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    /// Overwrite the page files
    InPlace,
    /// Print the pages instead of writing them
    DryRun,
}

fn read_page(path: &Path) -> Result<HtmlPage, String> {
    fs::read_to_string(path)
        .map(HtmlPage::new)
        .map_err(|e| format!("Failed to read page {}: {}", path.display(), e))
}

fn write_page(path: &Path, page: HtmlPage, output: Output) -> Result<(), String> {
    match output {
        Output::InPlace => fs::write(path, page.into_html())
            .map_err(|e| format!("Failed to write page {}: {}", path.display(), e)),
        Output::DryRun => {
            println!("{} {}", "==>".green(), path.display().to_string().white());
            println!("{}", page.html());
            Ok(())
        }
    }
}

/// HTML files under `pages_dir`, relative to it
pub fn discover_pages(pages_dir: &Path) -> Result<Vec<PathBuf>, String> {
    let mut pages = Vec::new();
    for entry in WalkDir::new(pages_dir).sort_by_file_name() {
        let entry = entry.map_err(|e| format!("Failed to list {}: {}", pages_dir.display(), e))?;
        let path = entry.path();
        if path.is_file() && path.extension().map(|ext| ext == "html").unwrap_or(false) {
            if let Ok(relative) = path.strip_prefix(pages_dir) {
                pages.push(relative.to_path_buf());
            }
        }
    }
    Ok(pages)
}

/// Render the bound pages found in `pages_dir`. With `only` set, just that
/// page file is touched and it must exist; otherwise bound pages the site
/// lacks are skipped and every other HTML page also gets the year and
/// carousel passes.
pub fn run(
    bootstrap: &Bootstrap,
    bindings: &[PageBinding],
    pages_dir: &Path,
    only: Option<&str>,
    output: Output,
) -> Result<(), String> {
    let selected: Vec<&PageBinding> = bindings
        .iter()
        .filter(|binding| only.map(|file| binding.file == file).unwrap_or(true))
        .collect();
    if let Some(file) = only {
        if selected.is_empty() {
            return Err(format!("No page binding for {file}"));
        }
    }

    for binding in &selected {
        let path = pages_dir.join(&binding.file);
        if only.is_none() && !path.is_file() {
            println!(
                "{} {}",
                "This site has no page".yellow(),
                binding.file.white()
            );
            continue;
        }
        println!(
            "{} {}",
            "I'm going to render".yellow(),
            binding.file.white()
        );

        let mut page = read_page(&path)?;
        for (container, outcome) in init_page(bootstrap, binding, &mut page) {
            println!("  #{}: {}", container.white(), outcome);
        }
        write_page(&path, page, output)?;
    }

    if only.is_some() {
        return Ok(());
    }

    let bound: HashSet<PathBuf> = selected
        .iter()
        .map(|binding| PathBuf::from(&binding.file))
        .collect();
    let others: Vec<PathBuf> = discover_pages(pages_dir)?
        .into_iter()
        .filter(|page| !bound.contains(page))
        .collect();
    if !others.is_empty() {
        println!(
            "{} {} {}",
            "Updating year and carousels on".yellow(),
            others.len().to_string().white(),
            "more pages".yellow()
        );
    }
    for relative in others {
        let path = pages_dir.join(&relative);
        let mut page = read_page(&path)?;
        decorate_page(bootstrap, &mut page);
        write_page(&path, page, output)?;
    }

    println!("{}", "Done!".green());
    Ok(())
}
