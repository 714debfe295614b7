//! In-memory object client.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use fos_client::{
    ClientError, ClientResult, ContextParams, ObjectClient, ObjectPath, WireObject,
    DEFAULT_RETRIES, STATUS_OBJECT_NOT_FOUND,
};
use tracing::debug;

/// One call received by a [`MockClient`].
#[derive(Debug, Clone, PartialEq)]
pub enum ClientCall {
    Read { url: String },
    Update { url: String, payload: WireObject },
    Delete { url: String },
}

impl ClientCall {
    /// JSON-RPC method name of the call.
    pub fn method(&self) -> &'static str {
        match self {
            ClientCall::Read { .. } => "get",
            ClientCall::Update { .. } => "update",
            ClientCall::Delete { .. } => "delete",
        }
    }

    pub fn url(&self) -> &str {
        match self {
            ClientCall::Read { url } | ClientCall::Update { url, .. } | ClientCall::Delete { url } => {
                url
            }
        }
    }

    /// Update payload, if this is an update.
    pub fn payload(&self) -> Option<&WireObject> {
        match self {
            ClientCall::Update { payload, .. } => Some(payload),
            _ => None,
        }
    }
}

/// [`ObjectClient`] backed by a single stored object.
///
/// Updates merge the payload's top-level keys into the stored object, the
/// way the device applies a partial update. Errors queued with
/// [`fail_next`](MockClient::fail_next) are returned by the following calls
/// in order, before they touch the stored object.
#[derive(Debug, Default)]
pub struct MockClient {
    stored: Mutex<Option<WireObject>>,
    calls: Mutex<Vec<ClientCall>>,
    failures: Mutex<VecDeque<ClientError>>,
    retries: AtomicU32,
    retry_settings: Mutex<Vec<u32>>,
}

impl MockClient {
    /// Creates a client with no stored object.
    pub fn new() -> Self {
        Self {
            retries: AtomicU32::new(DEFAULT_RETRIES),
            ..Default::default()
        }
    }

    /// Creates a client that already holds `object`.
    pub fn with_object(object: WireObject) -> Self {
        let client = Self::new();
        client.set_stored(Some(object));
        client
    }

    /// Replaces the stored object.
    pub fn set_stored(&self, object: Option<WireObject>) {
        *lock(&self.stored) = object;
    }

    /// Returns a copy of the stored object.
    pub fn stored(&self) -> Option<WireObject> {
        lock(&self.stored).clone()
    }

    /// Queues an error for the next call.
    pub fn fail_next(&self, error: ClientError) {
        lock(&self.failures).push_back(error);
    }

    /// Returns all calls received so far.
    pub fn calls(&self) -> Vec<ClientCall> {
        lock(&self.calls).clone()
    }

    /// Forgets recorded calls.
    pub fn clear_calls(&self) {
        lock(&self.calls).clear();
    }

    /// Payload of the most recent update.
    pub fn last_payload(&self) -> Option<WireObject> {
        lock(&self.calls)
            .iter()
            .rev()
            .find_map(|call| call.payload().cloned())
    }

    /// Every value passed to `set_retries`, in order.
    pub fn retry_settings(&self) -> Vec<u32> {
        lock(&self.retry_settings).clone()
    }

    fn record(&self, call: ClientCall) -> ClientResult<()> {
        debug!(method = call.method(), url = call.url(), "Mock call");
        lock(&self.calls).push(call);
        match lock(&self.failures).pop_front() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl ObjectClient for MockClient {
    async fn read_object(
        &self,
        path: &ObjectPath,
        _id: &str,
        ctx: &ContextParams,
    ) -> ClientResult<Option<WireObject>> {
        self.record(ClientCall::Read {
            url: ctx.url_for(path),
        })?;
        Ok(self.stored())
    }

    async fn update_object(
        &self,
        path: &ObjectPath,
        payload: &WireObject,
        _id: &str,
        ctx: &ContextParams,
    ) -> ClientResult<()> {
        self.record(ClientCall::Update {
            url: ctx.url_for(path),
            payload: payload.clone(),
        })?;

        let mut stored = lock(&self.stored);
        let object = stored.get_or_insert_with(WireObject::new);
        for (key, value) in payload {
            object.insert(key.clone(), value.clone());
        }
        Ok(())
    }

    async fn delete_object(
        &self,
        path: &ObjectPath,
        _id: &str,
        ctx: &ContextParams,
    ) -> ClientResult<()> {
        let url = ctx.url_for(path);
        self.record(ClientCall::Delete { url: url.clone() })?;

        if lock(&self.stored).take().is_none() {
            return Err(ClientError::status(
                STATUS_OBJECT_NOT_FOUND,
                "Object does not exist",
                url,
            ));
        }
        Ok(())
    }

    fn set_retries(&self, retries: u32) {
        lock(&self.retry_settings).push(retries);
        self.retries.store(retries, Ordering::Relaxed);
    }

    fn retries(&self) -> u32 {
        self.retries.load(Ordering::Relaxed)
    }
}
