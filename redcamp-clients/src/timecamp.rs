//! TimeCamp task enumeration and mutation over `/tasks`.

use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Value};

use redcamp_core::config::TimeCampConfig;
use redcamp_core::{ExternalTaskId, ProjectId, Service, TargetTask, TaskId, UpstreamError};
use redcamp_sync::TaskTarget;

use crate::http;
use crate::listing::TaskListing;

/// Talks to `<url>/tasks` with a bearer token.
pub struct TimeCampClient {
    agent: ureq::Agent,
    base_url: String,
    api_token: SecretString,
    parent_task_id: TaskId,
}

impl TimeCampClient {
    pub fn new(config: TimeCampConfig, agent: ureq::Agent) -> Self {
        Self {
            agent,
            base_url: config.url,
            api_token: config.api_token,
            parent_task_id: config.parent_task_id,
        }
    }

    fn request(&self, method: &str) -> ureq::Request {
        self.agent
            .request(method, &format!("{}/tasks", self.base_url))
            .set("Accept", "application/json")
            .set(
                "Authorization",
                &format!("Bearer {}", self.api_token.expose_secret()),
            )
    }

    fn send(&self, method: &str, body: Option<Value>) -> Result<Value, UpstreamError> {
        let raw = http::send(Service::TimeCamp, self.request(method), body)?;
        http::decode(Service::TimeCamp, &raw)
    }
}

impl TaskTarget for TimeCampClient {
    fn list_tasks(&self) -> Result<Vec<TargetTask>, UpstreamError> {
        let value = self.send("GET", None)?;
        match TaskListing::decode(value).and_then(TaskListing::into_tasks) {
            Ok(tasks) => Ok(tasks),
            Err(malformed) => {
                tracing::warn!("{malformed}; continuing with no TimeCamp tasks");
                Ok(Vec::new())
            }
        }
    }

    fn create_task(
        &self,
        name: &str,
        project_id: ProjectId,
    ) -> Result<Option<TargetTask>, UpstreamError> {
        let external_task_id = ExternalTaskId::for_project(project_id);
        let value = self.send(
            "POST",
            Some(json!({
                "name": name,
                "parent_id": self.parent_task_id,
                "external_task_id": external_task_id,
            })),
        )?;
        // The task exists once TimeCamp answers 2xx, whatever the body says.
        let tasks = match TaskListing::decode(value).and_then(TaskListing::into_tasks) {
            Ok(tasks) => tasks,
            Err(malformed) => {
                tracing::warn!("create answer for {external_task_id} ignored: {malformed}");
                Vec::new()
            }
        };

        // Prefer the entry carrying our key; the answer may echo siblings.
        let position = tasks
            .iter()
            .position(|t| t.external_task_id.as_ref() == Some(&external_task_id))
            .unwrap_or(0);
        let created = tasks.into_iter().nth(position);
        if created.is_none() {
            tracing::warn!("TimeCamp did not return the new task for {external_task_id}");
        }
        Ok(created)
    }

    fn archive_task(&self, task_id: &TaskId) -> Result<TargetTask, UpstreamError> {
        let value = self.send(
            "PUT",
            Some(json!({
                "task_id": task_id,
                "archived": 1,
            })),
        )?;
        let answered = TaskListing::decode(value)
            .and_then(TaskListing::into_tasks)
            .unwrap_or_default()
            .into_iter()
            .find(|t| t.task_id == *task_id);

        // The update answer does not always echo the task.
        Ok(answered.unwrap_or_else(|| TargetTask {
            task_id: task_id.clone(),
            name: String::new(),
            external_task_id: None,
            archived: true,
        }))
    }
}
