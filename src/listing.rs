//! # Repository Listing
//!
//! Fetches the set of repositories to mirror from the hosting service's REST
//! API and validates it before anything touches the disk.
//!
//! The listing is exposed through the `RepositoryLister` trait so the build
//! can run against a canned listing in tests. `GitHubLister` is the real
//! implementation: one blocking GET per page of
//! `{api_url}/users/{account}/repos`, following `Link: rel="next"` headers
//! until the last page. Any non-2xx response aborts the listing; there is no
//! retry.

use crate::config::SiteConfig;
use crate::error::{Error, Result};
use log::{debug, info};
use regex::Regex;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, LINK};
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::OnceLock;
use url::Url;

/// One repository as reported by the listing API.
///
/// Only the fields the build needs are kept; everything else in the API
/// response is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepositoryDescriptor {
    /// Directory and URL segment for the repository.
    pub name: String,
    /// Address passed to `git clone`.
    pub clone_url: String,
    /// Free text; the API reports `null` for repositories without one.
    #[serde(default)]
    pub description: Option<String>,
}

impl RepositoryDescriptor {
    pub fn new(name: &str, clone_url: &str, description: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            clone_url: clone_url.to_string(),
            description: description.map(str::to_string),
        }
    }

    /// Description text, empty when the repository has none.
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }
}

/// Trait for listing an account's repositories - allows mocking in tests
pub trait RepositoryLister: Send + Sync {
    /// Returns the account's repositories in the order the service reports
    /// them. An account without repositories yields an empty list.
    fn list(&self, account: &str) -> Result<Vec<RepositoryDescriptor>>;
}

/// Lists repositories through the GitHub REST API.
pub struct GitHubLister {
    client: Client,
    api_url: String,
    per_page: u32,
    token: Option<String>,
}

impl GitHubLister {
    /// Builds a lister from the API settings in `config`.
    pub fn new(config: &SiteConfig, token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(config.http_timeout())
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            per_page: config.per_page,
            token,
        })
    }

    fn fetch_page(&self, url: &str) -> Result<(Vec<RepositoryDescriptor>, Option<String>)> {
        debug!("GET {}", url);

        let mut request = self
            .client
            .get(url)
            .header(ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        let response = request.send().map_err(|e| Error::Network {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let next = response
            .headers()
            .get(LINK)
            .and_then(|value| value.to_str().ok())
            .and_then(next_page_link);

        let body = response.text().map_err(|e| Error::Network {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        let page: Vec<RepositoryDescriptor> = serde_json::from_str(&body)?;

        Ok((page, next))
    }
}

impl RepositoryLister for GitHubLister {
    fn list(&self, account: &str) -> Result<Vec<RepositoryDescriptor>> {
        let mut next = Some(listing_url(&self.api_url, account, self.per_page)?);
        let mut repositories = Vec::new();
        let mut fetched = HashSet::new();

        while let Some(url) = next {
            if !fetched.insert(url.clone()) {
                return Err(Error::Network {
                    url,
                    message: "pagination loop: next page was already fetched".to_string(),
                });
            }
            let (page, next_url) = self.fetch_page(&url)?;
            repositories.extend(page);
            next = next_url;
        }

        info!(
            "Listed {} repositories for {}",
            repositories.len(),
            account
        );
        Ok(repositories)
    }
}

/// Builds the first-page URL of an account's repository listing.
pub fn listing_url(api_url: &str, account: &str, per_page: u32) -> Result<String> {
    let mut url = Url::parse(api_url)?;
    url.path_segments_mut()
        .map_err(|_| Error::Config {
            message: format!("api_url cannot be used as a base URL: {}", api_url),
            hint: None,
        })?
        .pop_if_empty()
        .extend(["users", account, "repos"]);
    url.query_pairs_mut()
        .append_pair("per_page", &per_page.to_string());
    Ok(url.into())
}

/// Extracts the `rel="next"` target from an RFC 8288 `Link` header.
pub fn next_page_link(header: &str) -> Option<String> {
    header.split(',').find_map(|entry| {
        let mut parts = entry.split(';');
        let target = parts.next()?.trim();
        let is_next = parts.any(|param| {
            let param = param.trim();
            param == "rel=\"next\"" || param == "rel=next"
        });
        if !is_next {
            return None;
        }
        target
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
            .map(str::to_string)
    })
}

fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9._-]+$").expect("valid regex literal"))
}

/// Checks that `name` can be used as a single path component.
pub fn validate_name(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        Some("name is empty")
    } else if name == "." || name == ".." {
        Some("name refers to a relative directory")
    } else if !name_pattern().is_match(name) {
        Some("only ASCII letters, digits, '.', '-' and '_' are allowed")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(Error::InvalidRepositoryName {
            name: name.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

/// Rejects listings whose names are unsafe or collide.
pub fn validate(repositories: &[RepositoryDescriptor]) -> Result<()> {
    let mut seen = HashSet::new();
    for repo in repositories {
        validate_name(&repo.name)?;
        if !seen.insert(repo.name.as_str()) {
            return Err(Error::DuplicateRepository {
                name: repo.name.clone(),
            });
        }
    }
    Ok(())
}
