use std::{fs::File, io::Read, path::PathBuf};

use serde::Deserialize;

use crate::page::{default_bindings, PageBinding};

/// Looked for in the current directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "clubsite.toml";

#[derive(Debug, Deserialize, PartialEq)]
pub struct Configuration {
    /// Fetch data from the deployed site
    pub base_url: Option<String>,
    /// Fetch data from a local build of the site
    pub site_dir: Option<String>,
    /// Where the HTML pages to render live. Defaults to `site_dir`.
    pub pages_dir: Option<String>,
    #[serde(default = "default_bindings")]
    pub pages: Vec<PageBinding>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            base_url: None,
            site_dir: None,
            pages_dir: None,
            pages: default_bindings(),
        }
    }
}

/// Values from the command line. Each one wins over the file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub site_dir: Option<String>,
    pub pages_dir: Option<String>,
}

impl Configuration {
    /// Apply command line values. A data source given on the command line
    /// replaces whichever one the file sets; pages keep being read from the
    /// file's site directory unless a pages directory is given.
    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(base_url) = overrides.base_url {
            if self.pages_dir.is_none() {
                self.pages_dir = self.site_dir.take();
            }
            self.site_dir = None;
            self.base_url = Some(base_url);
        }
        if let Some(site_dir) = overrides.site_dir {
            self.base_url = None;
            self.site_dir = Some(site_dir);
        }
        if let Some(pages_dir) = overrides.pages_dir {
            self.pages_dir = Some(pages_dir);
        }
    }

    pub fn pages_dir(&self) -> Result<PathBuf, String> {
        self.pages_dir
            .as_ref()
            .or(self.site_dir.as_ref())
            .map(PathBuf::from)
            .ok_or_else(|| "No pages directory configured: set pages_dir or site_dir".to_string())
    }
}

pub fn parse_configuration(content: &str) -> Result<Configuration, String> {
    toml::from_str(content).map_err(|e| format!("Failed to parse config file: {}", e))
}

/// Get the configuration for clubsite.
/// If a path is given, that file must exist and parse.
/// Otherwise `clubsite.toml` in the current directory is used if present,
/// and the built-in page table with no data source if it is not.
pub fn get_configuration(path: Option<String>) -> Result<Configuration, String> {
    let path = match path {
        Some(path) => path,
        None => {
            if !std::path::Path::new(DEFAULT_CONFIG_FILE).exists() {
                return Ok(Configuration::default());
            }
            DEFAULT_CONFIG_FILE.to_string()
        }
    };

    let mut file = File::open(&path).map_err(|e| format!("Failed to open config file: {}", e))?;
    let mut buf = String::new();
    file.read_to_string(&mut buf)
        .map_err(|e| format!("Failed to read config file: {}", e))?;
    parse_configuration(&buf)
}
