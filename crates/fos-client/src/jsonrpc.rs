//! FortiManager JSON-RPC client.
//!
//! Every call is a POST of
//!
//! ```text
//! {"id": N, "method": "get" | "update" | "delete",
//!  "params": [{"url": "/pm/config/device/<dev>/vdom/<vdom>/<path>", "data": {...}}]}
//! ```
//!
//! to `<base>/jsonrpc`, answered by
//!
//! ```text
//! {"id": N, "result": [{"status": {"code": 0, "message": "OK"}, "url": "...", "data": {...}}]}
//! ```
//!
//! Only transport failures are retried, immediately and without backoff,
//! up to the configured number of attempts.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, instrument, warn};

use crate::client::ObjectClient;
use crate::config::ClientConfig;
use crate::context::{ContextParams, ObjectPath};
use crate::error::{ClientError, ClientResult};
use crate::WireObject;

/// JSON-RPC method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpcMethod {
    Get,
    Update,
    Delete,
}

impl RpcMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RpcMethod::Get => "get",
            RpcMethod::Update => "update",
            RpcMethod::Delete => "delete",
        }
    }
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Vec<RpcResult>,
}

#[derive(Debug, Deserialize)]
struct RpcResult {
    status: RpcStatus,
    #[serde(default)]
    data: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RpcStatus {
    code: i64,
    #[serde(default)]
    message: String,
}

/// Builds the request body of one call.
pub fn build_request(id: u64, method: RpcMethod, url: &str, data: Option<&WireObject>) -> Value {
    let mut params = json!({ "url": url });
    if let Some(data) = data {
        params["data"] = Value::Object(data.clone());
    }
    json!({
        "id": id,
        "method": method.as_str(),
        "params": [params],
    })
}

/// Parses a response body, returning the `data` of the first result.
pub fn parse_response(url: &str, body: &str) -> ClientResult<Option<Value>> {
    let response: RpcResponse = serde_json::from_str(body)?;
    let result = response
        .result
        .into_iter()
        .next()
        .ok_or_else(|| ClientError::InvalidResponse(format!("no result for {}", url)))?;

    if result.status.code != 0 {
        return Err(ClientError::status(
            result.status.code,
            result.status.message,
            url,
        ));
    }

    Ok(result.data.filter(|data| !data.is_null()))
}

/// Interprets the `data` of a get response.
///
/// A result without data carries no object and reads as absent.
fn object_from_data(url: &str, data: Option<Value>) -> ClientResult<Option<WireObject>> {
    match data {
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(other) => Err(ClientError::InvalidResponse(format!(
            "expected an object for {}, got {}",
            url, other
        ))),
        None => Ok(None),
    }
}

/// [`ObjectClient`] speaking FortiManager JSON-RPC over HTTPS.
pub struct JsonRpcClient {
    http: reqwest::Client,
    endpoint: String,
    token: String,
    retries: AtomicU32,
    next_id: AtomicU64,
}

impl JsonRpcClient {
    /// Builds a client from validated configuration.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(config.insecure)
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint(),
            token: config.token.clone().unwrap_or_default(),
            retries: AtomicU32::new(config.retries),
            next_id: AtomicU64::new(1),
        })
    }

    /// Returns the JSON-RPC endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn call(
        &self,
        method: RpcMethod,
        url: &str,
        data: Option<&WireObject>,
    ) -> ClientResult<Option<Value>> {
        let attempts = self.retries().max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            let id = self.next_id.fetch_add(1, Ordering::Relaxed);
            let body = build_request(id, method, url, data);

            match self.send(&body, url).await {
                Err(e) if e.is_transport() && attempt < attempts => {
                    warn!(method = method.as_str(), url, attempt, error = %e, "Retrying call");
                }
                result => return result,
            }
        }
    }

    async fn send(&self, body: &Value, url: &str) -> ClientResult<Option<Value>> {
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let text = response.text().await?;
        parse_response(url, &text)
    }
}

#[async_trait]
impl ObjectClient for JsonRpcClient {
    #[instrument(skip(self, ctx), fields(ctx = %ctx))]
    async fn read_object(
        &self,
        path: &ObjectPath,
        id: &str,
        ctx: &ContextParams,
    ) -> ClientResult<Option<WireObject>> {
        let url = ctx.url_for(path);
        match self.call(RpcMethod::Get, &url, None).await {
            Ok(data) => object_from_data(&url, data),
            Err(e) if e.is_not_found() => {
                debug!(url = %url, "Object does not exist");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    #[instrument(skip(self, payload, ctx), fields(ctx = %ctx, fields = payload.len()))]
    async fn update_object(
        &self,
        path: &ObjectPath,
        payload: &WireObject,
        id: &str,
        ctx: &ContextParams,
    ) -> ClientResult<()> {
        let url = ctx.url_for(path);
        self.call(RpcMethod::Update, &url, Some(payload)).await?;
        Ok(())
    }

    #[instrument(skip(self, ctx), fields(ctx = %ctx))]
    async fn delete_object(
        &self,
        path: &ObjectPath,
        id: &str,
        ctx: &ContextParams,
    ) -> ClientResult<()> {
        let url = ctx.url_for(path);
        self.call(RpcMethod::Delete, &url, None).await?;
        Ok(())
    }

    fn set_retries(&self, retries: u32) {
        self.retries.store(retries, Ordering::Relaxed);
    }

    fn retries(&self) -> u32 {
        self.retries.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const URL: &str = "/pm/config/device/fgt/vdom/root/router/bgp";

    #[test]
    fn test_build_get_request() {
        assert_eq!(
            build_request(7, RpcMethod::Get, URL, None),
            json!({"id": 7, "method": "get", "params": [{"url": URL}]})
        );
    }

    #[test]
    fn test_build_update_request() {
        let mut data = WireObject::new();
        data.insert("as".to_string(), json!(65000));
        assert_eq!(
            build_request(8, RpcMethod::Update, URL, Some(&data)),
            json!({"id": 8, "method": "update", "params": [{"url": URL, "data": {"as": 65000}}]})
        );
    }

    #[test]
    fn test_parse_ok_response() {
        let body = json!({
            "id": 1,
            "result": [{"status": {"code": 0, "message": "OK"}, "url": URL, "data": {"as": 65000}}]
        })
        .to_string();
        assert_eq!(parse_response(URL, &body).unwrap(), Some(json!({"as": 65000})));

        let body = json!({"id": 2, "result": [{"status": {"code": 0, "message": "OK"}, "url": URL}]})
            .to_string();
        assert_eq!(parse_response(URL, &body).unwrap(), None);
    }

    #[test]
    fn test_parse_error_status() {
        let body = json!({
            "id": 1,
            "result": [{"status": {"code": -3, "message": "Object does not exist"}, "url": URL}]
        })
        .to_string();
        let err = parse_response(URL, &body).unwrap_err();
        assert!(err.is_not_found());

        let body = json!({
            "id": 1,
            "result": [{"status": {"code": -11, "message": "No permission for the resource"}}]
        })
        .to_string();
        let err = parse_response(URL, &body).unwrap_err();
        assert!(matches!(err, ClientError::Status { code: -11, .. }));
    }

    #[test]
    fn test_parse_malformed_response() {
        assert!(matches!(
            parse_response(URL, "not json"),
            Err(ClientError::Decode(_))
        ));
        assert!(matches!(
            parse_response(URL, r#"{"id": 1, "result": []}"#),
            Err(ClientError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_client_retries() {
        let client = JsonRpcClient::new(&ClientConfig::new("https://fmg.example.net", "tok")).unwrap();
        assert_eq!(client.endpoint(), "https://fmg.example.net/jsonrpc");
        assert_eq!(client.retries(), 1);
        client.set_retries(3);
        assert_eq!(client.retries(), 3);
    }

    #[test]
    fn test_client_rejects_bad_config() {
        assert!(JsonRpcClient::new(&ClientConfig::new("ftp://fmg", "tok")).is_err());
    }

    #[test]
    fn test_get_without_data_is_absent() {
        let body = json!({
            "id": 3,
            "result": [{"status": {"code": 0, "message": "OK"}, "url": URL}]
        })
        .to_string();
        let data = parse_response(URL, &body).unwrap();
        assert_eq!(object_from_data(URL, data).unwrap(), None);
        assert_eq!(object_from_data(URL, None).unwrap(), None);
    }

    #[test]
    fn test_get_data_shapes() {
        let object = object_from_data(URL, Some(json!({"as": 65000}))).unwrap().unwrap();
        assert_eq!(object.get("as"), Some(&json!(65000)));

        let err = object_from_data(URL, Some(json!([1, 2]))).unwrap_err();
        assert!(matches!(err, ClientError::InvalidResponse(_)));
        assert!(!err.is_not_found());
    }
}
