//! Typed GitHub webhook payloads and the publication envelope

use serde::{Deserialize, Serialize};

/// Event kinds registered for parsing. Anything else GitHub can send
/// stays unparsed and is dropped by the handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Push,
    Repository,
}

impl EventKind {
    /// Maps an `X-GitHub-Event` header value onto a registered kind.
    pub fn from_header(value: &str) -> Option<Self> {
        match value {
            "push" => Some(EventKind::Push),
            "repository" => Some(EventKind::Repository),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Push => "push",
            EventKind::Repository => "repository",
        }
    }
}

/// A parsed webhook delivery, one case per registered event kind.
#[derive(Debug, Clone, PartialEq)]
pub enum WebhookEvent {
    Push(PushPayload),
    Repository(RepositoryPayload),
}

impl WebhookEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            WebhookEvent::Push(_) => EventKind::Push,
            WebhookEvent::Repository(_) => EventKind::Repository,
        }
    }
}

/// Push webhook payload in GitHub's native field layout.
///
/// Only `ref` is mandatory; GitHub sends far more than this, and serde
/// ignores whatever is not modeled here. Optional fields are skipped
/// on serialization so a payload republishes with the same shape it
/// arrived in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushPayload {
    #[serde(rename = "ref")]
    pub git_ref: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
    #[serde(default)]
    pub commits: Vec<Commit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head_commit: Option<Commit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<Repository>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pusher: Option<Pusher>,
}

/// A single commit entry from a push payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<CommitAuthor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitAuthor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// Repository metadata as it appears inside webhook payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_branch: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pusher {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Repository webhook payload (created, deleted, renamed, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryPayload {
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<Repository>,
}

/// The publication unit placed on the pub/sub channel: a push payload
/// under a single top-level `payload` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushEvent {
    pub payload: PushPayload,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn minimal_push_payload_round_trips_through_envelope() {
        let body = r#"{"ref":"refs/heads/main","commits":[{"id":"abc123"}]}"#;
        let payload: PushPayload = serde_json::from_str(body).unwrap();

        let event = PushEvent {
            payload: payload.clone(),
        };
        let wire = serde_json::to_value(&event).unwrap();
        assert_eq!(
            wire,
            json!({"payload": {"ref": "refs/heads/main", "commits": [{"id": "abc123"}]}})
        );

        let decoded: PushEvent = serde_json::from_value(wire).unwrap();
        assert_eq!(decoded.payload, payload);
    }

    #[test]
    fn full_push_payload_fields_survive_republishing() {
        let body = json!({
            "ref": "refs/heads/release",
            "before": "0000000000000000000000000000000000000000",
            "after": "59b20b8d5c6ff8d09518454d4dd8b7a430fdd337",
            "commits": [{
                "id": "59b20b8d5c6ff8d09518454d4dd8b7a430fdd337",
                "message": "Fix all the bugs",
                "timestamp": "2024-03-02T23:59:59+11:00",
                "url": "https://github.com/octocat/Hello-World/commit/59b20b8d",
                "author": {"name": "Monalisa Octocat", "email": "mona@github.com", "username": "octocat"}
            }],
            "repository": {
                "id": 1296269,
                "name": "Hello-World",
                "full_name": "octocat/Hello-World",
                "html_url": "https://github.com/octocat/Hello-World",
                "default_branch": "main"
            },
            "pusher": {"name": "octocat", "email": "mona@github.com"}
        });

        let payload: PushPayload = serde_json::from_value(body.clone()).unwrap();
        assert_eq!(payload.git_ref, "refs/heads/release");
        assert_eq!(payload.commits.len(), 1);
        assert_eq!(payload.repository.as_ref().unwrap().name, "Hello-World");
        assert_eq!(payload.pusher.as_ref().unwrap().name, "octocat");

        let republished = serde_json::to_value(PushEvent { payload }).unwrap();
        assert_eq!(republished["payload"], body);
    }

    #[test]
    fn unmodeled_fields_are_ignored_on_decode() {
        let body = json!({
            "ref": "refs/heads/main",
            "commits": [],
            "forced": false,
            "compare": "https://github.com/octocat/Hello-World/compare/abc...def"
        });
        let payload: PushPayload = serde_json::from_value(body).unwrap();
        assert!(payload.commits.is_empty());
    }

    #[test]
    fn event_kind_registry_is_closed() {
        assert_eq!(EventKind::from_header("push"), Some(EventKind::Push));
        assert_eq!(
            EventKind::from_header("repository"),
            Some(EventKind::Repository)
        );
        assert_eq!(EventKind::from_header("issues"), None);
        assert_eq!(EventKind::from_header("Push"), None);
    }

    #[test]
    fn repository_payload_decodes_action() {
        let body = r#"{"action":"created","repository":{"name":"new-repo"}}"#;
        let payload: RepositoryPayload = serde_json::from_str(body).unwrap();
        assert_eq!(payload.action, "created");
        assert_eq!(payload.repository.unwrap().name, "new-repo");
    }
}
