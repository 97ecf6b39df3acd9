use std::{fs, path::PathBuf, thread};

use colored::Colorize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::DATA_PATH;

const USER_AGENT: &str = "clubsite renderer";

/// Why a resource could not be turned into data
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("HTTP error! status: {0}")]
    Status(u16),
    #[error("could not read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Somewhere the site's static files can be read from.
pub trait DataSource: Send + Sync {
    /// Human readable location, for progress output
    fn describe(&self) -> String;

    /// Return the body of the file at `path`, relative to the site root
    fn get(&self, path: &str) -> Result<String, FetchError>;
}

/// The deployed site, over HTTP
pub struct HttpSource {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl DataSource for HttpSource {
    fn describe(&self) -> String {
        self.base_url.clone()
    }

    fn get(&self, path: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(format!("{}/{}", self.base_url, path))
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/json")
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        Ok(response.text()?)
    }
}

/// A local build of the site
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl DataSource for DirSource {
    fn describe(&self) -> String {
        self.root.display().to_string()
    }

    fn get(&self, path: &str) -> Result<String, FetchError> {
        Ok(fs::read_to_string(self.root.join(path))?)
    }
}

/// Fetch `data/<name>` and parse it. Failures are reported on stderr and
/// handed back to the caller, never retried.
pub fn fetch_data<T>(source: &dyn DataSource, name: &str) -> Result<T, FetchError>
where
    T: DeserializeOwned,
{
    let path = format!("{DATA_PATH}{name}");
    let result = source
        .get(&path)
        .and_then(|content| serde_json::from_str::<T>(&content).map_err(FetchError::from));

    if let Err(e) = &result {
        eprintln!(
            "{} {}: {}",
            "Error fetching data from".red(),
            path.white(),
            e.to_string().red()
        );
    }

    result
}

/// Fetch two resources at the same time and wait for both.
pub fn fetch_pair<A, B>(
    source: &dyn DataSource,
    first: &str,
    second: &str,
) -> (Result<A, FetchError>, Result<B, FetchError>)
where
    A: DeserializeOwned + Send,
    B: DeserializeOwned + Send,
{
    thread::scope(|scope| {
        let a = scope.spawn(|| fetch_data::<A>(source, first));
        let b = fetch_data::<B>(source, second);
        let a = a
            .join()
            .unwrap_or_else(|panic| std::panic::resume_unwind(panic));
        (a, b)
    })
}
