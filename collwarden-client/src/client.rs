use std::collections::BTreeSet;
use std::time::Duration;

use serde::de::DeserializeOwned;

use collwarden_core::{
    Collection, CollectionId, CollectionSource, Config, RemoteError, RosterSource, UserId,
};

use crate::wire::{Envelope, UserRecord};

/// Path segment between the configured base URL and every endpoint.
pub const API_PREFIX: &str = "/api/v1";

/// Longest slice of a response body carried into logs and errors.
const BODY_SNIPPET_CHARS: usize = 200;

/// HTTP client for the bookmark service.
///
/// Calls are blocking and bounded by the configured request timeout. No call
/// is retried here; the next reconciliation cycle is the retry.
#[derive(Debug, Clone)]
pub struct LinkwardenClient {
    agent: ureq::Agent,
    api_base: String,
    bearer: String,
}

impl LinkwardenClient {
    pub fn new(config: &Config) -> Self {
        Self::with_settings(&config.base_url, &config.token, config.request_timeout)
    }

    pub fn with_settings(base_url: &str, token: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            agent,
            api_base: format!("{}{API_PREFIX}", base_url.trim_end_matches('/')),
            bearer: format!("Bearer {}", token.trim()),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.api_base)
    }

    fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        collection: Option<CollectionId>,
    ) -> Result<T, RemoteError> {
        let op = format!("GET {path}");
        let response = self
            .agent
            .get(&self.url(path))
            .set("Authorization", &self.bearer)
            .set("Content-Type", "application/json")
            .call()
            .map_err(|err| map_error(&op, err, collection))?;

        let status = response.status();
        let body = response.into_string().map_err(|err| RemoteError::Unavailable {
            op: op.clone(),
            detail: format!("failed to read body: {err}"),
        })?;
        tracing::debug!(op = %op, status, body = %snippet(&body), "remote response");

        serde_json::from_str::<Envelope<T>>(&body)
            .map(|envelope| envelope.response)
            .map_err(|err| RemoteError::Protocol {
                op,
                detail: format!("{err}; body: {}", snippet(&body)),
            })
    }
}

impl RosterSource for LinkwardenClient {
    fn list_user_ids(&self) -> Result<BTreeSet<UserId>, RemoteError> {
        let users: Vec<UserRecord> = self.get("/users", None)?;
        Ok(users.into_iter().map(|user| user.id).collect())
    }
}

impl CollectionSource for LinkwardenClient {
    fn list_collections(&self) -> Result<Vec<Collection>, RemoteError> {
        self.get("/collections", None)
    }

    fn get_collection(&self, id: CollectionId) -> Result<Collection, RemoteError> {
        self.get(&format!("/collections/{id}"), Some(id))
    }

    fn replace_collection(&self, collection: &Collection) -> Result<(), RemoteError> {
        let path = format!("/collections/{}", collection.id);
        let op = format!("PUT {path}");
        let response = self
            .agent
            .put(&self.url(&path))
            .set("Authorization", &self.bearer)
            .set("Content-Type", "application/json")
            .send_json(collection)
            .map_err(|err| map_error(&op, err, Some(collection.id)))?;
        tracing::debug!(op = %op, status = response.status(), "remote response");
        Ok(())
    }
}

/// Translate a ureq failure into the remote error taxonomy.
///
/// 404 becomes `NotFound` only for single-collection calls; on list endpoints
/// it means the service itself is misrouted and is reported as `Rejected`.
fn map_error(op: &str, err: ureq::Error, collection: Option<CollectionId>) -> RemoteError {
    match (err, collection) {
        (ureq::Error::Status(404, _), Some(collection)) => RemoteError::NotFound {
            op: op.to_string(),
            collection,
        },
        (ureq::Error::Status(status, response), _) => {
            let body = response.into_string().unwrap_or_default();
            tracing::warn!(op = %op, status, body = %snippet(&body), "remote returned error status");
            if status >= 500 {
                RemoteError::Unavailable {
                    op: op.to_string(),
                    detail: format!("HTTP {status}: {}", snippet(&body)),
                }
            } else {
                RemoteError::Rejected {
                    op: op.to_string(),
                    status,
                    body: snippet(&body).to_string(),
                }
            }
        }
        (ureq::Error::Transport(transport), _) => RemoteError::Unavailable {
            op: op.to_string(),
            detail: transport.to_string(),
        },
    }
}

fn snippet(body: &str) -> &str {
    match body.char_indices().nth(BODY_SNIPPET_CHARS) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
