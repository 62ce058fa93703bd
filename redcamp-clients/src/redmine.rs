//! Redmine project enumeration.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use redcamp_core::config::RedmineConfig;
use redcamp_core::{Service, SourceProject, UpstreamError};
use redcamp_sync::ProjectSource;

use crate::http;

/// Largest page Redmine serves. Only this one page is read, and a listing
/// that does not fit in it is refused.
const PAGE_LIMIT: u32 = 100;

#[derive(Debug, Deserialize)]
struct ProjectsPage {
    projects: Vec<SourceProject>,
    #[serde(default)]
    total_count: Option<u64>,
}

/// Reads projects from `GET <url>/projects.json`.
pub struct RedmineClient {
    agent: ureq::Agent,
    base_url: String,
    api_key: SecretString,
}

impl RedmineClient {
    pub fn new(config: RedmineConfig, agent: ureq::Agent) -> Self {
        Self {
            agent,
            base_url: config.url,
            api_key: config.api_key,
        }
    }

    fn projects_url(&self) -> String {
        format!("{}/projects.json", self.base_url)
    }
}

impl ProjectSource for RedmineClient {
    fn list_active_projects(&self) -> Result<Vec<SourceProject>, UpstreamError> {
        let request = self
            .agent
            .get(&self.projects_url())
            .set("Accept", "application/json")
            .set("X-Redmine-API-Key", self.api_key.expose_secret())
            .query("limit", &PAGE_LIMIT.to_string());
        let body = http::send(Service::Redmine, request, None)?;
        let page: ProjectsPage = http::decode(Service::Redmine, &body)?;

        // The archive pass needs the complete project set.
        let listed = page.projects.len();
        if let Some(total) = page.total_count.filter(|&t| t > listed as u64) {
            return Err(http::malformed(
                Service::Redmine,
                format!("incomplete project listing: {listed} of {total} projects returned"),
            ));
        }

        let active: Vec<SourceProject> = page
            .projects
            .into_iter()
            .filter(SourceProject::is_active)
            .collect();
        tracing::debug!("{} of {listed} Redmine projects are active", active.len());
        Ok(active)
    }
}
