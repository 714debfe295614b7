//! Object client trait.

use async_trait::async_trait;

use crate::context::{ContextParams, ObjectPath};
use crate::error::ClientResult;
use crate::WireObject;

/// Retry count the resources pin on their client.
pub const DEFAULT_RETRIES: u32 = 1;

/// Client for reading and writing configuration objects on a managed device.
///
/// Every call is one round-trip; the wire protocol behind it belongs to
/// the implementation.
///
/// # Lifecycle
///
/// 1. Construction: the client is built from its configuration
/// 2. Each resource operation pins the retry count with `set_retries()`
/// 3. The resource issues exactly one read, update or delete per step
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; a client may be shared between
/// resources behind an `Arc`.
#[async_trait]
pub trait ObjectClient: Send + Sync {
    /// Reads an object.
    ///
    /// Returns `Ok(None)` when the device reports that the object does not
    /// exist.
    async fn read_object(
        &self,
        path: &ObjectPath,
        id: &str,
        ctx: &ContextParams,
    ) -> ClientResult<Option<WireObject>>;

    /// Replaces the fields present in `payload` on an object.
    async fn update_object(
        &self,
        path: &ObjectPath,
        payload: &WireObject,
        id: &str,
        ctx: &ContextParams,
    ) -> ClientResult<()>;

    /// Deletes an object.
    async fn delete_object(&self, path: &ObjectPath, id: &str, ctx: &ContextParams)
        -> ClientResult<()>;

    /// Sets how many attempts a call may make.
    fn set_retries(&self, _retries: u32) {
        // Default: fixed
    }

    /// Returns how many attempts a call may make.
    fn retries(&self) -> u32 {
        DEFAULT_RETRIES
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct TestClient {
        stored: Mutex<Option<WireObject>>,
    }

    #[async_trait]
    impl ObjectClient for TestClient {
        async fn read_object(
            &self,
            _path: &ObjectPath,
            _id: &str,
            _ctx: &ContextParams,
        ) -> ClientResult<Option<WireObject>> {
            Ok(self.stored.lock().unwrap().clone())
        }

        async fn update_object(
            &self,
            _path: &ObjectPath,
            payload: &WireObject,
            _id: &str,
            _ctx: &ContextParams,
        ) -> ClientResult<()> {
            *self.stored.lock().unwrap() = Some(payload.clone());
            Ok(())
        }

        async fn delete_object(
            &self,
            _path: &ObjectPath,
            _id: &str,
            _ctx: &ContextParams,
        ) -> ClientResult<()> {
            *self.stored.lock().unwrap() = None;
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_object_client_trait() {
        let client = TestClient {
            stored: Mutex::new(None),
        };
        let path = ObjectPath("router/bgp");
        let ctx = ContextParams::new("fgt", "root");

        assert_eq!(client.read_object(&path, "RouterBgp", &ctx).await.unwrap(), None);

        let mut payload = WireObject::new();
        payload.insert("as".to_string(), serde_json::json!(65000));
        client
            .update_object(&path, &payload, "RouterBgp", &ctx)
            .await
            .unwrap();
        assert_eq!(
            client.read_object(&path, "RouterBgp", &ctx).await.unwrap(),
            Some(payload)
        );

        client.delete_object(&path, "RouterBgp", &ctx).await.unwrap();
        assert_eq!(client.read_object(&path, "RouterBgp", &ctx).await.unwrap(), None);
        assert_eq!(client.retries(), DEFAULT_RETRIES);
    }
}
