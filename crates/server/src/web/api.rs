use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header::CONTENT_TYPE},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tower::ServiceExt;

#[derive(Debug, Error)]
pub enum ApiFailure {
    /// The API answered with a non-success status
    #[error("request rejected with {status}")]
    Rejected {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("request could not be sent: {0}")]
    Transport(String),

    #[error("unreadable response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiFailure {
    /// The `error` text from the response body, if the API sent one
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

/// The JSON API as seen by the pages
#[async_trait]
pub trait ResourceApi: Send + Sync {
    async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> Result<Value, ApiFailure>;
}

/// Fetches a list endpoint and decodes every element
pub async fn fetch_list<T>(api: &dyn ResourceApi, uri: &str) -> Result<Vec<T>, ApiFailure>
where
    T: DeserializeOwned,
{
    let value = api.send(Method::GET, uri, None).await?;
    Ok(serde_json::from_value(value)?)
}

/// Dispatches requests straight into the API router without a network hop
#[derive(Clone)]
pub struct InProcessApi {
    router: Router,
}

impl InProcessApi {
    pub fn new(router: Router) -> Self {
        Self { router }
    }
}

#[async_trait]
impl ResourceApi for InProcessApi {
    async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> Result<Value, ApiFailure> {
        let builder = Request::builder().method(method.clone()).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&json)?)),
            None => builder.body(Body::empty()),
        }
        .map_err(|err| ApiFailure::Transport(err.to_string()))?;

        let response = match self.router.clone().oneshot(request).await {
            Ok(response) => response,
            Err(never) => match never {},
        };

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|err| ApiFailure::Transport(err.to_string()))?;

        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };

        if status.is_success() {
            return Ok(value);
        }

        log::debug!("{method} {uri} answered {status}");
        Err(ApiFailure::Rejected {
            status,
            message: value
                .get("error")
                .and_then(Value::as_str)
                .map(str::to_string),
        })
    }
}
