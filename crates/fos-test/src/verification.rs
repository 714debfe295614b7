//! Verification helpers for testing configuration resources
//!
//! Provides assertion helpers over the calls a [`MockClient`](crate::MockClient)
//! received.

use serde_json::Value;
use thiserror::Error;

use crate::ClientCall;

/// Verification error types
#[derive(Error, Debug)]
pub enum VerificationError {
    #[error("Expected a '{method}' call, got {calls:?}")]
    CallNotFound { method: String, calls: Vec<String> },

    #[error("Unexpected '{method}' call")]
    UnexpectedCall { method: String },

    #[error("Expected {expected} calls, found {actual}")]
    CallCountMismatch { expected: usize, actual: usize },

    #[error("Expected key '{key}' not found in payload")]
    KeyNotFound { key: String },

    #[error("Key '{key}' should be absent from payload")]
    UnexpectedKey { key: String },

    #[error("Value mismatch for '{key}': expected {expected}, got {actual}")]
    ValueMismatch {
        key: String,
        expected: Value,
        actual: Value,
    },
}

/// Result type for verification operations
pub type VerifyResult<T> = Result<T, VerificationError>;

/// Call verifier
pub struct CallVerifier {
    calls: Vec<ClientCall>,
}

impl CallVerifier {
    pub fn new(calls: Vec<ClientCall>) -> Self {
        Self { calls }
    }

    fn methods(&self) -> Vec<String> {
        self.calls.iter().map(|c| c.method().to_string()).collect()
    }

    /// Verify that a call with the given method was made
    pub fn assert_called(&self, method: &str) -> VerifyResult<()> {
        if self.calls.iter().any(|c| c.method() == method) {
            Ok(())
        } else {
            Err(VerificationError::CallNotFound {
                method: method.to_string(),
                calls: self.methods(),
            })
        }
    }

    /// Verify that no call with the given method was made
    pub fn assert_not_called(&self, method: &str) -> VerifyResult<()> {
        if self.calls.iter().any(|c| c.method() == method) {
            Err(VerificationError::UnexpectedCall {
                method: method.to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Verify the exact method sequence
    pub fn assert_sequence(&self, expected: &[&str]) -> VerifyResult<()> {
        let actual = self.methods();
        if actual.len() != expected.len() {
            return Err(VerificationError::CallCountMismatch {
                expected: expected.len(),
                actual: actual.len(),
            });
        }
        for (method, call) in expected.iter().zip(&actual) {
            if call != method {
                return Err(VerificationError::CallNotFound {
                    method: method.to_string(),
                    calls: actual.clone(),
                });
            }
        }
        Ok(())
    }

    /// Verify the number of calls made
    pub fn assert_call_count(&self, expected: usize) -> VerifyResult<()> {
        let actual = self.calls.len();
        if actual != expected {
            Err(VerificationError::CallCountMismatch { expected, actual })
        } else {
            Ok(())
        }
    }

    fn last_payload(&self) -> VerifyResult<&serde_json::Map<String, Value>> {
        self.calls
            .iter()
            .rev()
            .find_map(ClientCall::payload)
            .ok_or_else(|| VerificationError::CallNotFound {
                method: "update".to_string(),
                calls: self.methods(),
            })
    }

    /// Verify a key of the last update payload
    pub fn assert_payload_field(&self, key: &str, expected: &Value) -> VerifyResult<()> {
        match self.last_payload()?.get(key) {
            None => Err(VerificationError::KeyNotFound {
                key: key.to_string(),
            }),
            Some(actual) if actual == expected => Ok(()),
            Some(actual) => Err(VerificationError::ValueMismatch {
                key: key.to_string(),
                expected: expected.clone(),
                actual: actual.clone(),
            }),
        }
    }

    /// Verify that the last update payload does not carry a key
    pub fn assert_payload_lacks(&self, key: &str) -> VerifyResult<()> {
        if self.last_payload()?.contains_key(key) {
            Err(VerificationError::UnexpectedKey {
                key: key.to_string(),
            })
        } else {
            Ok(())
        }
    }

    pub fn calls(&self) -> &[ClientCall] {
        &self.calls
    }
}
