//! Decoding of TimeCamp task payloads.
//!
//! `GET /tasks` usually answers with an object keyed by task id, sometimes
//! with a plain array; mutations may answer with a single task object.
//! Each shape is an explicit variant, and anything else is
//! [`TaskListing::Unrecognized`].

use serde_json::{Map, Value};

use redcamp_core::{MalformedResponse, TargetTask};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskListing {
    /// `{"<task_id>": {task}, ...}` — values in key order.
    Keyed(Vec<TargetTask>),
    /// `[{task}, ...]`
    List(Vec<TargetTask>),
    /// `{task}` — a lone task object.
    Single(TargetTask),
    /// A JSON scalar or `null`.
    Unrecognized { kind: &'static str },
}

impl TaskListing {
    /// Classify and decode a JSON payload.
    ///
    /// Entries of a keyed or list payload that are not tasks are skipped
    /// with a warning. Fails only when a lone task object does not decode.
    pub fn decode(value: Value) -> Result<Self, MalformedResponse> {
        match value {
            Value::Array(items) => Ok(TaskListing::List(decode_all(items))),
            Value::Object(map) if map.contains_key("task_id") => {
                decode_one(Value::Object(map)).map(TaskListing::Single)
            }
            Value::Object(map) => Ok(TaskListing::Keyed(decode_keyed(map))),
            Value::Null => Ok(TaskListing::Unrecognized { kind: "null" }),
            Value::Bool(_) => Ok(TaskListing::Unrecognized { kind: "boolean" }),
            Value::Number(_) => Ok(TaskListing::Unrecognized { kind: "number" }),
            Value::String(_) => Ok(TaskListing::Unrecognized { kind: "string" }),
        }
    }

    /// Flatten into tasks; an unrecognised shape is an error.
    pub fn into_tasks(self) -> Result<Vec<TargetTask>, MalformedResponse> {
        match self {
            TaskListing::Keyed(tasks) | TaskListing::List(tasks) => Ok(tasks),
            TaskListing::Single(task) => Ok(vec![task]),
            TaskListing::Unrecognized { kind } => Err(MalformedResponse {
                detail: format!("expected an object or an array of tasks, got {kind}"),
            }),
        }
    }
}

fn decode_keyed(map: Map<String, Value>) -> Vec<TargetTask> {
    map.into_iter()
        .filter_map(|(key, value)| skip_bad_entry(&format!("'{key}'"), value))
        .collect()
}

fn decode_all(items: Vec<Value>) -> Vec<TargetTask> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(idx, value)| skip_bad_entry(&idx.to_string(), value))
        .collect()
}

/// One undecodable entry must not hide the rest of the listing.
fn skip_bad_entry(label: &str, value: Value) -> Option<TargetTask> {
    match decode_one(value) {
        Ok(task) => Some(task),
        Err(e) => {
            tracing::warn!("skipping TimeCamp task entry {label}: {}", e.detail);
            None
        }
    }
}

fn decode_one(value: Value) -> Result<TargetTask, MalformedResponse> {
    serde_json::from_value(value).map_err(|e| MalformedResponse {
        detail: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use redcamp_core::{ExternalTaskId, TaskId};
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[test]
    fn keyed_object_is_flattened() {
        let listing = TaskListing::decode(json!({
            "10": {"task_id": "10", "name": "A", "external_task_id": "redmine_1", "archived": "0"},
            "11": {"task_id": "11", "name": "B", "external_task_id": null, "archived": "1"}
        }))
        .expect("decode");
        let tasks = match listing {
            TaskListing::Keyed(tasks) => tasks,
            other => panic!("expected keyed listing, got {other:?}"),
        };
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].task_id, TaskId::from("10"));
        assert_eq!(
            tasks[0].external_task_id,
            Some(ExternalTaskId::from("redmine_1"))
        );
        assert!(tasks[1].archived);
    }

    #[test]
    fn plain_array_is_accepted() {
        let listing = TaskListing::decode(json!([
            {"task_id": 10, "name": "A", "external_task_id": "redmine_1", "archived": false}
        ]))
        .expect("decode");
        assert!(matches!(&listing, TaskListing::List(tasks) if tasks.len() == 1));
    }

    #[test]
    fn lone_task_object_is_single() {
        let listing =
            TaskListing::decode(json!({"task_id": 99, "name": "new"})).expect("decode");
        let tasks = listing.into_tasks().expect("tasks");
        assert_eq!(tasks[0].task_id, TaskId::from(99u64));
    }

    #[test]
    fn empty_object_and_array_are_empty_listings() {
        for value in [json!({}), json!([])] {
            let tasks = TaskListing::decode(value)
                .expect("decode")
                .into_tasks()
                .expect("tasks");
            assert!(tasks.is_empty());
        }
    }

    #[rstest]
    #[case(json!(42), "number")]
    #[case(json!("tasks"), "string")]
    #[case(json!(true), "boolean")]
    #[case(json!(null), "null")]
    fn scalars_are_unrecognized(#[case] value: Value, #[case] kind: &'static str) {
        let listing = TaskListing::decode(value).expect("decode");
        assert_eq!(listing, TaskListing::Unrecognized { kind });
        let err = listing.into_tasks().expect_err("unrecognized");
        assert!(err.detail.contains(kind));
    }

    #[test]
    fn undecodable_entry_is_skipped_and_the_rest_kept() {
        let listing = TaskListing::decode(json!({
            "10": {"task_id": "10", "name": "A", "external_task_id": "redmine_1", "archived": "0"},
            "20": {"task_id": "20", "name": null},
            "30": "not a task",
            "40": {"task_id": 40, "name": "B", "external_task_id": "redmine_2"}
        }))
        .expect("decode");
        let tasks = listing.into_tasks().expect("tasks");
        let ids: Vec<TaskId> = tasks.into_iter().map(|t| t.task_id).collect();
        assert_eq!(ids, vec![TaskId::from("10"), TaskId::from(40u64)]);
    }

    #[test]
    fn undecodable_array_item_is_skipped() {
        let listing = TaskListing::decode(json!([
            {"name": "no id"},
            {"task_id": 7, "name": "ok"}
        ]))
        .expect("decode");
        assert!(matches!(&listing, TaskListing::List(tasks) if tasks.len() == 1));
    }

    #[test]
    fn bad_lone_task_is_malformed() {
        let err = TaskListing::decode(json!({"task_id": {"nested": true}})).expect_err("fails");
        assert!(!err.detail.is_empty());
    }
}
