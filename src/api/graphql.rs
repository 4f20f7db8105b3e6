//! GraphQL collaborator: operations, the response envelope and a reqwest transport.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;

const BODY_PREVIEW_LIMIT: usize = 256;

/// A named GraphQL document without variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub name: &'static str,
    pub document: &'static str,
}

pub const GET_ME: Operation = Operation {
    name: "GetMe",
    document: "query GetMe { me { name } }",
};

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlRequest {
    pub query: &'static str,
    pub operation_name: &'static str,
    pub variables: serde_json::Map<String, serde_json::Value>,
}

impl From<&Operation> for GraphqlRequest {
    fn from(operation: &Operation) -> Self {
        Self {
            query: operation.document,
            operation_name: operation.name,
            variables: serde_json::Map::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GraphqlResponse {
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub errors: Vec<GraphqlErrorEntry>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GraphqlErrorEntry {
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum GraphqlError {
    #[error("request to GraphQL endpoint failed: {0}")]
    Transport(String),
    #[error("GraphQL endpoint answered {0}")]
    Status(String),
    #[error("invalid GraphQL payload: {0}")]
    Decode(String),
    #[error("{0}")]
    Response(String),
    #[error("response contained no data")]
    MissingData,
}

/// Sends one request to the GraphQL service and returns its raw envelope.
#[async_trait]
pub trait GraphqlTransport: Send + Sync {
    async fn send(&self, request: &GraphqlRequest) -> Result<GraphqlResponse, GraphqlError>;
}

/// Cloneable handle on the collaborator, shared through Leptos context.
#[derive(Clone)]
pub struct GraphqlClient {
    transport: Arc<dyn GraphqlTransport>,
}

impl GraphqlClient {
    pub fn new(transport: impl GraphqlTransport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    /// Runs `operation` and decodes its `data` into `T`.
    ///
    /// Any entry in `errors` fails the query, even when partial data came back.
    pub async fn query<T: DeserializeOwned>(&self, operation: &Operation) -> Result<T, GraphqlError> {
        let response = self.transport.send(&GraphqlRequest::from(operation)).await?;
        if !response.errors.is_empty() {
            let messages: Vec<&str> = response.errors.iter().map(|e| e.message.as_str()).collect();
            return Err(GraphqlError::Response(messages.join("; ")));
        }
        let data = response.data.ok_or(GraphqlError::MissingData)?;
        serde_json::from_value(data).map_err(|e| GraphqlError::Decode(e.to_string()))
    }
}

/// JSON-over-HTTP transport posting to a single endpoint.
pub struct HttpTransport {
    client: Client,
    endpoint: Url,
}

impl HttpTransport {
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl GraphqlTransport for HttpTransport {
    async fn send(&self, request: &GraphqlRequest) -> Result<GraphqlResponse, GraphqlError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| GraphqlError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| GraphqlError::Transport(e.to_string()))?;
        if !status.is_success() {
            return Err(status_error(status, body.as_ref()));
        }

        serde_json::from_slice(body.as_ref()).map_err(|e| GraphqlError::Decode(e.to_string()))
    }
}

fn status_error(status: StatusCode, body: &[u8]) -> GraphqlError {
    let preview: String = String::from_utf8_lossy(body)
        .trim()
        .chars()
        .take(BODY_PREVIEW_LIMIT)
        .collect();
    if preview.is_empty() {
        GraphqlError::Status(format!("status {}", status.as_u16()))
    } else {
        GraphqlError::Status(format!("status {}: {}", status.as_u16(), preview))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::MeData;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Canned collaborator that counts how often it is asked.
    pub(crate) struct StubTransport {
        reply: Result<GraphqlResponse, String>,
        pub(crate) calls: Arc<AtomicUsize>,
    }

    impl StubTransport {
        pub(crate) fn user(name: &str) -> Self {
            Self::replying(GraphqlResponse {
                data: Some(serde_json::json!({ "me": { "name": name } })),
                errors: Vec::new(),
            })
        }

        pub(crate) fn replying(response: GraphqlResponse) -> Self {
            Self {
                reply: Ok(response),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        pub(crate) fn failing(message: &str) -> Self {
            Self {
                reply: Err(message.to_string()),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    #[async_trait]
    impl GraphqlTransport for StubTransport {
        async fn send(&self, request: &GraphqlRequest) -> Result<GraphqlResponse, GraphqlError> {
            assert_eq!(request.operation_name, GET_ME.name);
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.clone().map_err(GraphqlError::Transport)
        }
    }

    #[tokio::test]
    async fn decodes_data_into_the_response_type() {
        let client = GraphqlClient::new(StubTransport::user("Alice"));
        let data: MeData = client.query(&GET_ME).await.unwrap();
        assert_eq!(data.me.unwrap().name, "Alice");
    }

    #[tokio::test]
    async fn error_entries_fail_the_query() {
        let client = GraphqlClient::new(StubTransport::replying(GraphqlResponse {
            data: Some(serde_json::json!({ "me": null })),
            errors: vec![
                GraphqlErrorEntry {
                    message: "User is not authenticated.".to_string(),
                },
                GraphqlErrorEntry {
                    message: "second".to_string(),
                },
            ],
        }));
        let err = client.query::<MeData>(&GET_ME).await.unwrap_err();
        assert_eq!(err.to_string(), "User is not authenticated.; second");
    }

    #[tokio::test]
    async fn missing_data_is_an_error() {
        let client = GraphqlClient::new(StubTransport::replying(GraphqlResponse::default()));
        let err = client.query::<MeData>(&GET_ME).await.unwrap_err();
        assert!(matches!(err, GraphqlError::MissingData));
    }

    #[tokio::test]
    async fn malformed_data_is_a_decode_error() {
        let client = GraphqlClient::new(StubTransport::replying(GraphqlResponse {
            data: Some(serde_json::json!({ "me": { "name": 42 } })),
            errors: Vec::new(),
        }));
        let err = client.query::<MeData>(&GET_ME).await.unwrap_err();
        assert!(matches!(err, GraphqlError::Decode(_)));
    }

    #[test]
    fn request_body_uses_graphql_field_names() {
        let body = serde_json::to_value(GraphqlRequest::from(&GET_ME)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "query": "query GetMe { me { name } }",
                "operationName": "GetMe",
                "variables": {},
            })
        );
    }

    #[test]
    fn envelope_without_errors_field_parses() {
        let response: GraphqlResponse =
            serde_json::from_str(r#"{"data":{"me":{"name":"Bob"}}}"#).unwrap();
        assert!(response.errors.is_empty());
        assert!(response.data.is_some());
    }

    #[test]
    fn status_error_includes_a_trimmed_body_preview() {
        let err = status_error(StatusCode::BAD_GATEWAY, b"  upstream down \n");
        assert_eq!(err.to_string(), "GraphQL endpoint answered status 502: upstream down");
        let err = status_error(StatusCode::NOT_FOUND, b"");
        assert_eq!(err.to_string(), "GraphQL endpoint answered status 404");
    }
}
