use chrono::{Datelike, NaiveDate, Utc};
use colored::Colorize;
use serde::Deserialize;

pub mod carousel;
pub mod config;
pub mod document;
pub mod fetch;
pub mod format;
pub mod page;
pub mod render;
pub mod year;

use config::Configuration;
use fetch::{DataSource, DirSource, HttpSource};

/// Prefix of every JSON resource, relative to the site root
pub const DATA_PATH: &str = "data/";
/// Where member photos live, relative to the site root
pub const MEMBER_IMAGE_PATH: &str = "images/members/";
/// Shown for members without a photo
pub const MEMBER_PLACEHOLDER: &str = "images/placeholders/member-placeholder.svg";

/// Read an explicit `null` the same way as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + serde::Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Records that can be looked up by their `id` field.
pub trait SiteIndex {
    fn index(&self) -> &str;
}

/// Return the first record whose index matches `key`.
pub fn find_by_index<'a, T: SiteIndex>(items: &'a [T], key: &str) -> Option<&'a T> {
    items.iter().find(|item| item.index() == key)
}

#[derive(Debug, Clone, Default, serde::Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Event {
    #[serde(deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub location: String,
    pub description: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub cancelled: bool,
}

#[derive(Debug, Clone, Default, serde::Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct NewsArticle {
    #[serde(deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    pub summary: Option<String>,
    pub author: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Copy, serde::Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MembershipCategory {
    Active,
    Passive,
    /// Anything the site does not know about yet
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, serde::Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Member {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub display_name: String,
    pub image: Option<String>,
    pub role: Option<String>,
    pub membership_category: Option<MembershipCategory>,
    /// Legacy flag that predates `membershipCategory`
    #[serde(deserialize_with = "null_as_default")]
    pub active: bool,
    pub committee_role_id: Option<String>,
}

impl Member {
    /// Active members are either categorized as such or carry the legacy
    /// `active` flag.
    pub fn is_active(&self) -> bool {
        self.membership_category == Some(MembershipCategory::Active) || self.active
    }

    pub fn is_passive(&self) -> bool {
        self.membership_category == Some(MembershipCategory::Passive)
    }
}

impl SiteIndex for Member {
    fn index(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Default, serde::Deserialize, PartialEq)]
#[serde(default)]
pub struct Team {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    /// Member ids
    #[serde(deserialize_with = "null_as_default")]
    pub members: Vec<String>,
}

impl SiteIndex for Team {
    fn index(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Default, serde::Deserialize, PartialEq)]
#[serde(default)]
pub struct CommitteeRole {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    pub description: Option<String>,
    pub order: Option<f64>,
}

impl SiteIndex for CommitteeRole {
    fn index(&self) -> &str {
        &self.id
    }
}

/// Everything a renderer needs from the outside world: where the data comes
/// from and what day it is.
pub struct Bootstrap {
    source: Box<dyn DataSource>,
    today: NaiveDate,
}

impl Bootstrap {
    pub fn new(source: Box<dyn DataSource>, today: NaiveDate) -> Self {
        Self { source, today }
    }

    /// Build the data source described by the configuration. `today`
    /// defaults to the current UTC date.
    pub fn from_configuration(
        configuration: &Configuration,
        today: Option<NaiveDate>,
    ) -> Result<Self, String> {
        println!("{}", "I'm checking where the site data lives...".yellow());

        let source: Box<dyn DataSource> = match (&configuration.base_url, &configuration.site_dir) {
            (Some(base_url), _) => Box::new(HttpSource::new(base_url)),
            (None, Some(site_dir)) => Box::new(DirSource::new(site_dir)),
            (None, None) => {
                return Err("No data source configured: set base_url or site_dir".to_string());
            }
        };
        println!("{} {}", "I have data source:".green(), source.describe().white());

        let today = today.unwrap_or_else(|| Utc::now().date_naive());
        println!("{} {}", "Rendering as of:".green(), today.to_string().white());

        Ok(Self::new(source, today))
    }

    pub fn source(&self) -> &dyn DataSource {
        self.source.as_ref()
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Today as an ISO date, comparable with the dates found in the data
    pub fn today_iso(&self) -> String {
        self.today.format("%Y-%m-%d").to_string()
    }

    pub fn year(&self) -> i32 {
        self.today.year()
    }
}
