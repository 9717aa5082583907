//! Remote Collection Client
//!
//! One async call per operation against a REST resource. No retries here;
//! the caller decides what to do with an error.

use super::error::ApiError;
use super::record::DraftForm;
use crate::shared::api_utils::{path_segment, ApiConfig};
use async_trait::async_trait;
use futures::future::{self, Either};
use gloo_net::http::{Request, RequestBuilder, Response};
use gloo_timers::future::TimeoutFuture;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::future::Future;
use std::marker::PhantomData;

/// Record type served by a collection
pub type RecordOf<C> = <<C as RemoteCollection>::Draft as DraftForm>::Record;

#[async_trait(?Send)]
pub trait RemoteCollection {
    type Draft: DraftForm;

    async fn list(&self) -> Result<Vec<RecordOf<Self>>, ApiError>;

    /// Returns the created record with its backend-assigned id
    async fn create(&self, draft: &Self::Draft) -> Result<RecordOf<Self>, ApiError>;

    async fn update(&self, id: &str, draft: &Self::Draft) -> Result<(), ApiError>;

    async fn delete(&self, id: &str) -> Result<(), ApiError>;

    async fn set_active(&self, id: &str, active: bool) -> Result<(), ApiError>;
}

/// HTTP verb used by the resource's edit endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMethod {
    Put,
    Patch,
}

/// REST resource served under `/api/{path}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceEndpoint {
    pub path: &'static str,
    pub edit_method: EditMethod,
}

impl ResourceEndpoint {
    pub const fn new(path: &'static str) -> Self {
        Self {
            path,
            edit_method: EditMethod::Put,
        }
    }

    pub const fn with_edit_method(self, edit_method: EditMethod) -> Self {
        Self { edit_method, ..self }
    }

    pub fn list_path(&self) -> String {
        format!("/api/{}", self.path)
    }

    pub fn add_path(&self) -> String {
        format!("/api/{}/add", self.path)
    }

    pub fn edit_path(&self, id: &str) -> String {
        format!("/api/{}/edit/{}", self.path, path_segment(id))
    }

    pub fn item_path(&self, id: &str) -> String {
        format!("/api/{}/{}", self.path, path_segment(id))
    }

    pub fn toggle_path(&self, id: &str, active: bool) -> String {
        let action = if active { "activate" } else { "deactivate" };
        format!("/api/{}/{}/{}", self.path, path_segment(id), action)
    }
}

/// `RemoteCollection` over the browser fetch API
pub struct HttpCollection<D> {
    endpoint: ResourceEndpoint,
    config: ApiConfig,
    _draft: PhantomData<fn() -> D>,
}

impl<D> Clone for HttpCollection<D> {
    fn clone(&self) -> Self {
        Self {
            endpoint: self.endpoint,
            config: self.config.clone(),
            _draft: PhantomData,
        }
    }
}

impl<D: DraftForm> HttpCollection<D> {
    pub fn new(endpoint: ResourceEndpoint, config: ApiConfig) -> Self {
        Self {
            endpoint,
            config,
            _draft: PhantomData,
        }
    }

    pub fn endpoint(&self) -> ResourceEndpoint {
        self.endpoint
    }

    async fn send(&self, label: &str, request: RequestBuilder) -> Result<Response, ApiError> {
        let request = request
            .build()
            .map_err(|e| ApiError::Unknown(format!("Failed to build request: {}", e)))?;
        self.dispatch(label, request).await
    }

    async fn send_json(
        &self,
        label: &str,
        request: RequestBuilder,
        body: &D,
    ) -> Result<Response, ApiError> {
        let request = request
            .json(body)
            .map_err(|e| ApiError::Unknown(format!("Failed to serialize request: {}", e)))?;
        self.dispatch(label, request).await
    }

    async fn dispatch(&self, label: &str, request: Request) -> Result<Response, ApiError> {
        log::debug!("{} {}", label, self.endpoint.path);
        with_timeout(self.config.request_timeout_ms, async move {
            let response = request
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;
            ensure_success(response).await
        })
        .await
    }
}

#[async_trait(?Send)]
impl<D: DraftForm> RemoteCollection for HttpCollection<D>
where
    D::Record: DeserializeOwned,
{
    type Draft = D;

    async fn list(&self) -> Result<Vec<D::Record>, ApiError> {
        let url = self.config.url(&self.endpoint.list_path());
        let response = self.send("GET", Request::get(&url)).await?;
        let body = read_json(response).await?;
        decode_list(body)
    }

    async fn create(&self, draft: &D) -> Result<D::Record, ApiError> {
        let url = self.config.url(&self.endpoint.add_path());
        let response = self.send_json("POST", Request::post(&url), draft).await?;
        let body = read_json(response).await?;
        decode_created(body, draft)
    }

    async fn update(&self, id: &str, draft: &D) -> Result<(), ApiError> {
        let url = self.config.url(&self.endpoint.edit_path(id));
        let request = match self.endpoint.edit_method {
            EditMethod::Put => Request::put(&url),
            EditMethod::Patch => Request::patch(&url),
        };
        self.send_json("EDIT", request, draft).await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let url = self.config.url(&self.endpoint.item_path(id));
        self.send("DELETE", Request::delete(&url)).await?;
        Ok(())
    }

    async fn set_active(&self, id: &str, active: bool) -> Result<(), ApiError> {
        let url = self.config.url(&self.endpoint.toggle_path(id, active));
        self.send("PATCH", Request::patch(&url)).await?;
        Ok(())
    }
}

/// Read-only fetch used for the catalog picker resources
pub async fn fetch_all<T: DeserializeOwned>(
    config: &ApiConfig,
    path: &str,
) -> Result<Vec<T>, ApiError> {
    let url = config.url(&format!("/api/{}", path));
    log::debug!("GET {}", path);
    let body = with_timeout(config.request_timeout_ms, async move {
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let response = ensure_success(response).await?;
        read_json(response).await
    })
    .await?;
    decode_list(body)
}

async fn with_timeout<T, F>(ms: u32, fut: F) -> Result<T, ApiError>
where
    F: Future<Output = Result<T, ApiError>>,
{
    match future::select(Box::pin(fut), Box::pin(TimeoutFuture::new(ms))).await {
        Either::Left((result, _)) => result,
        Either::Right(_) => Err(ApiError::Network(format!(
            "request timed out after {} ms",
            ms
        ))),
    }
}

async fn ensure_success(response: Response) -> Result<Response, ApiError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let err = ApiError::from_status(status, &body);
    log::warn!("{} {} -> {}", response.url(), status, err);
    Err(err)
}

/// Empty bodies decode as `null`
async fn read_json(response: Response) -> Result<Value, ApiError> {
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Unknown(format!("Failed to read response: {}", e)))?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&text)
        .map_err(|e| ApiError::Unknown(format!("Failed to parse response: {}", e)))
}

/// Accepts a bare array or an envelope `{ "data": [...] }`
pub(crate) fn decode_list<T: DeserializeOwned>(body: Value) -> Result<Vec<T>, ApiError> {
    let items = match body {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => items,
            _ => return Err(ApiError::Unknown("Response is not a list".to_string())),
        },
        _ => return Err(ApiError::Unknown("Response is not a list".to_string())),
    };
    items
        .into_iter()
        .map(|item| {
            serde_json::from_value(item)
                .map_err(|e| ApiError::Unknown(format!("Failed to parse record: {}", e)))
        })
        .collect()
}

/// Full record when the backend echoes one, else the draft plus the assigned id
pub(crate) fn decode_created<D: DraftForm>(body: Value, draft: &D) -> Result<D::Record, ApiError>
where
    D::Record: DeserializeOwned,
{
    let body = match body {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    };

    if let Ok(record) = serde_json::from_value::<D::Record>(body.clone()) {
        return Ok(record);
    }

    let id = match &body {
        Value::String(id) => Some(id.clone()),
        Value::Object(map) => map
            .get("id")
            .or_else(|| map.get("_id"))
            .and_then(|v| v.as_str())
            .map(str::to_string),
        _ => None,
    };

    match id.filter(|id| !id.trim().is_empty()) {
        Some(id) => Ok(draft.clone().into_record(id, true)),
        None => Err(ApiError::Unknown(
            "Create response did not contain an id".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_referrer::aggregate::{Referrer, ReferrerDto};
    use serde_json::json;

    fn draft() -> ReferrerDto {
        ReferrerDto {
            name: "Dr. New".into(),
            contact: "555-0100".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_decode_list_accepts_array_and_envelope() {
        let plain: Vec<Referrer> =
            decode_list(json!([{ "_id": "1", "name": "Dr. A" }, { "id": "2", "name": "Dr. B" }]))
                .unwrap();
        assert_eq!(plain.len(), 2);
        assert_eq!(plain[0].id, "1");
        assert_eq!(plain[1].id, "2");

        let wrapped: Vec<Referrer> =
            decode_list(json!({ "data": [{ "_id": "3", "name": "Dr. C" }] })).unwrap();
        assert_eq!(wrapped[0].name, "Dr. C");
    }

    #[test]
    fn test_decode_list_rejects_other_shapes() {
        let not_a_list = decode_list::<Referrer>(json!({ "message": "ok" }));
        assert!(matches!(not_a_list, Err(ApiError::Unknown(_))));

        let bad_record = decode_list::<Referrer>(json!([{ "_id": "1" }]));
        assert!(matches!(bad_record, Err(ApiError::Unknown(_))));
    }

    #[test]
    fn test_decode_created_prefers_echoed_record() {
        let created = decode_created(
            json!({ "_id": "r9", "name": "Dr. Echo", "isActive": false }),
            &draft(),
        )
        .unwrap();
        assert_eq!(created.id, "r9");
        assert_eq!(created.name, "Dr. Echo");
        assert!(!created.is_active);
    }

    #[test]
    fn test_decode_created_rebuilds_from_id_only() {
        let from_object = decode_created(json!({ "_id": "r10" }), &draft()).unwrap();
        assert_eq!(from_object.id, "r10");
        assert_eq!(from_object.name, "Dr. New");
        assert!(from_object.is_active);

        let from_envelope = decode_created(json!({ "data": { "id": "r11" } }), &draft()).unwrap();
        assert_eq!(from_envelope.id, "r11");

        let from_string = decode_created(json!("r12"), &draft()).unwrap();
        assert_eq!(from_string.contact, "555-0100");
    }

    #[test]
    fn test_decode_created_without_id_is_unknown() {
        let missing = decode_created(json!({ "ok": true }), &draft());
        assert!(matches!(missing, Err(ApiError::Unknown(_))));

        let empty = decode_created(Value::Null, &draft());
        assert!(matches!(empty, Err(ApiError::Unknown(_))));
    }
}
