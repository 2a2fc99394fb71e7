use std::fmt;
use std::time::Duration;

use inventory_core::{Item, ItemId, NormalizedItem};
use inventory_logging::{inventory_debug, inventory_trace, inventory_warn, STORE_TARGET};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::{EngineError, StoreAction, StoreError, StoreOutcome, StoreRequest};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

#[derive(Debug, Clone)]
pub struct StoreSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// One operation per backend action. Every call is single-shot: no retries,
/// failures are returned to the caller as they happen.
#[async_trait::async_trait]
pub trait ItemStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Item>, StoreError>;
    async fn get(&self, item_id: ItemId) -> Result<Item, StoreError>;
    async fn create(&self, payload: &NormalizedItem) -> Result<Item, StoreError>;
    async fn update(&self, item_id: ItemId, payload: &NormalizedItem) -> Result<Item, StoreError>;
    async fn delete(&self, item_id: ItemId) -> Result<(), StoreError>;
}

impl StoreRequest {
    /// Runs the request against `store` and wraps the result for the UI.
    pub async fn execute(self, store: &dyn ItemStore) -> StoreOutcome {
        match self {
            StoreRequest::List => StoreOutcome::Listed(store.list().await),
            StoreRequest::Get { item_id } => StoreOutcome::Fetched {
                item_id,
                result: store.get(item_id).await,
            },
            StoreRequest::Create { payload } => StoreOutcome::Saved(store.create(&payload).await),
            StoreRequest::Update { item_id, payload } => {
                StoreOutcome::Saved(store.update(item_id, &payload).await)
            }
            StoreRequest::Delete { item_id } => StoreOutcome::Deleted(store.delete(item_id).await),
        }
    }
}

/// `ItemStore` over the REST API at `{base_url}/api/items`.
#[derive(Debug, Clone)]
pub struct ReqwestItemStore {
    client: reqwest::Client,
    base: Url,
}

impl ReqwestItemStore {
    pub fn new(settings: StoreSettings) -> Result<Self, EngineError> {
        let invalid = |reason: String| EngineError::InvalidBaseUrl {
            url: settings.base_url.clone(),
            reason,
        };
        let base = Url::parse(&settings.base_url).map_err(|err| invalid(err.to_string()))?;
        if !matches!(base.scheme(), "http" | "https") || base.cannot_be_a_base() {
            return Err(invalid("expected an http or https url".to_string()));
        }

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| EngineError::Client(err.to_string()))?;

        Ok(Self { client, base })
    }

    fn endpoint(&self, item_id: Option<ItemId>) -> Url {
        let mut url = self.base.clone();
        // `new` rejected cannot-be-a-base urls, so segments are always available.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["api", "items"]);
            if let Some(item_id) = item_id {
                segments.push(&item_id.to_string());
            }
        }
        url
    }

    fn request(&self, action: StoreAction, item_id: Option<ItemId>) -> RequestBuilder {
        let url = self.endpoint(item_id);
        inventory_debug!(target: STORE_TARGET, "{} {}", action.method(), url);
        let method = match action {
            StoreAction::List | StoreAction::Get => Method::GET,
            StoreAction::Create => Method::POST,
            StoreAction::Update => Method::PUT,
            StoreAction::Delete => Method::DELETE,
        };
        self.client.request(method, url)
    }

    /// Sends the request; any non-success status becomes a typed error.
    async fn send(&self, action: StoreAction, request: RequestBuilder) -> Result<Response, StoreError> {
        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        inventory_trace!(target: STORE_TARGET, "{} answered {}", action.method(), status);
        if status.is_success() {
            return Ok(response);
        }
        let body = failure_body(action, status.as_u16(), response.bytes().await);
        let err = normalize_failure(action, status.as_u16(), &body);
        inventory_warn!(
            target: STORE_TARGET,
            "{} failed with status {}: {}",
            action.method(),
            status.as_u16(),
            err
        );
        Err(err)
    }
}

#[async_trait::async_trait]
impl ItemStore for ReqwestItemStore {
    async fn list(&self) -> Result<Vec<Item>, StoreError> {
        let request = self.request(StoreAction::List, None);
        read_json(self.send(StoreAction::List, request).await?).await
    }

    async fn get(&self, item_id: ItemId) -> Result<Item, StoreError> {
        let request = self.request(StoreAction::Get, Some(item_id));
        read_json(self.send(StoreAction::Get, request).await?).await
    }

    async fn create(&self, payload: &NormalizedItem) -> Result<Item, StoreError> {
        let request = self.request(StoreAction::Create, None).json(payload);
        read_json(self.send(StoreAction::Create, request).await?).await
    }

    async fn update(&self, item_id: ItemId, payload: &NormalizedItem) -> Result<Item, StoreError> {
        let request = self.request(StoreAction::Update, Some(item_id)).json(payload);
        read_json(self.send(StoreAction::Update, request).await?).await
    }

    async fn delete(&self, item_id: ItemId) -> Result<(), StoreError> {
        let request = self.request(StoreAction::Delete, Some(item_id));
        // The body, if any, is only a confirmation message.
        self.send(StoreAction::Delete, request).await.map(drop)
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, StoreError> {
    let status = response.status().as_u16();
    let body = response.bytes().await.map_err(map_reqwest_error)?;
    serde_json::from_slice(&body).map_err(|err| StoreError::Server {
        status,
        message: format!("invalid response body: {err}"),
    })
}

/// Body of a failed response, or empty when it cannot be read; the status
/// alone then decides the message.
fn failure_body<B: Default, E: fmt::Display>(
    action: StoreAction,
    status: u16,
    read: Result<B, E>,
) -> B {
    read.unwrap_or_else(|err| {
        inventory_debug!(
            target: STORE_TARGET,
            "{} error body unreadable (status {}): {}",
            action.method(),
            status,
            err
        );
        B::default()
    })
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

/// Translates a non-success response into a `StoreError`.
///
/// The message is the body's `error` field, else its `message` field, else
/// `HTTP error, status=<code>`. A 404 on an item URL is `NotFound`; 400 and
/// 422 on a create or update are `ValidationRejected`.
pub fn normalize_failure(action: StoreAction, status: u16, body: &[u8]) -> StoreError {
    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.error.or(body.message))
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| format!("HTTP error, status={status}"));

    match status {
        404 if action.addresses_item() => StoreError::NotFound(message),
        400 | 422 if action.sends_payload() => StoreError::ValidationRejected { status, message },
        _ => StoreError::Server { status, message },
    }
}

fn map_reqwest_error(err: reqwest::Error) -> StoreError {
    inventory_warn!(target: STORE_TARGET, "request failed: {}", err);
    if err.is_timeout() {
        return StoreError::Network(format!("request timed out: {err}"));
    }
    StoreError::Network(err.to_string())
}
