//! Backend endpoint table.
//!
//! Every call goes through `Endpoint::call`, which sends the request and
//! applies the endpoint's acceptable status set.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::ClientError;
use crate::records::{CollectionKey, Resource};
use crate::translator::{translate, AcceptableStatus, RequestInfo};
use crate::transport::{Method, Transport, TransportRequest, TransportResponse};

/// One backend operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub method: Method,
    pub path: String,
    pub acceptable: AcceptableStatus,
    /// What the call does, used in error messages ("getting all jobs").
    pub action: String,
}

impl Endpoint {
    fn new(method: Method, path: impl Into<String>, acceptable: AcceptableStatus, action: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            acceptable,
            action: action.into(),
        }
    }

    pub fn health() -> Self {
        Self::new(Method::Get, "/v1/health", AcceptableStatus::OK_ONLY, "checking the API health")
    }

    pub fn geckodrivers() -> Self {
        Self::new(
            Method::Get,
            "/v1/system/get_geckodrivers",
            AcceptableStatus::OK_ONLY,
            "getting the geckodriver instances addresses",
        )
    }

    pub fn all_jobs() -> Self {
        Self::new(Method::Get, "/v1/jobs/get_all", AcceptableStatus::OK_ONLY, "getting all jobs")
    }

    pub fn delete_all_jobs() -> Self {
        Self::new(
            Method::Delete,
            "/v1/jobs/delete_all",
            AcceptableStatus::OK_ONLY,
            "deleting all jobs",
        )
    }

    pub fn list(key: CollectionKey) -> Self {
        Self::new(
            Method::Get,
            key.path(),
            AcceptableStatus::TRACKER,
            format!("getting {}", key),
        )
    }

    pub fn add(resource: Resource) -> Self {
        Self::tracker_write(resource, "add", "adding")
    }

    pub fn add_manually(resource: Resource) -> Self {
        Self::new(
            Method::Post,
            resource.tracker_path(&format!("add_{}_manually", resource.singular())),
            AcceptableStatus::TRACKER,
            format!("manually adding {} to the {}", resource.singular(), resource.tracker()),
        )
    }

    pub fn update(resource: Resource) -> Self {
        Self::tracker_write(resource, "update", "updating")
    }

    pub fn delete(resource: Resource) -> Self {
        Self::tracker_write(resource, "delete", "deleting")
    }

    pub fn get_single(resource: Resource) -> Self {
        Self::tracker_write(resource, "get", "getting")
    }

    /// Secondary integration writing to notion databases.
    pub fn notion_add(resource: Resource) -> Self {
        Self::new(
            Method::Post,
            format!(
                "/v1/notion/{}/add_{}",
                resource.tracker(),
                resource.singular()
            ),
            AcceptableStatus::OK_ONLY,
            format!("adding {} to the notion {}", resource.singular(), resource.tracker()),
        )
    }

    fn tracker_write(resource: Resource, verb: &str, gerund: &str) -> Self {
        Self::new(
            Method::Post,
            resource.tracker_path(&format!("{}_{}", verb, resource.singular())),
            AcceptableStatus::TRACKER,
            format!("{} {} in the {}", gerund, resource.singular(), resource.tracker()),
        )
    }

    /// Send the request and classify the response.
    pub async fn call(
        &self,
        transport: &dyn Transport,
        body: Option<Value>,
    ) -> Result<TransportResponse, ClientError> {
        let request = TransportRequest {
            method: self.method,
            path: self.path.clone(),
            body,
        };
        let response = transport.send(request).await?;
        debug!("{} {} -> {}", self.method, self.path, response.status);

        let info = RequestInfo::new(
            format!("error while {}", self.action),
            transport.url_for(&self.path),
            self.method,
        );
        Ok(translate(response, self.acceptable, &info)?)
    }

    /// Decode a JSON response body.
    pub fn decode<T: DeserializeOwned>(
        &self,
        transport: &dyn Transport,
        response: &TransportResponse,
    ) -> Result<T, ClientError> {
        response.json().map_err(|e| ClientError::Decode {
            url: transport.url_for(&self.path),
            message: e.to_string(),
        })
    }
}

/// Take `key` out of a JSON object body, treating absence and `null` alike.
pub(crate) fn take_field(body: Value, key: &str) -> Option<Value> {
    match body {
        Value::Object(mut map) => match map.remove(key) {
            Some(Value::Null) | None => None,
            Some(value) => Some(value),
        },
        _ => None,
    }
}
