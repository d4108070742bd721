//! Body collection and decoding

use crate::error::FrameworkError;
use bytes::Bytes;
use http_body_util::{BodyExt, LengthLimitError, Limited};
use hyper::body::Incoming;
use serde::de::DeserializeOwned;

/// Collect the full body, rejecting anything larger than `limit` bytes
pub async fn collect_body(body: Incoming, limit: usize) -> Result<Bytes, FrameworkError> {
    Limited::new(body, limit)
        .collect()
        .await
        .map(|collected| collected.to_bytes())
        .map_err(|e| {
            if e.downcast_ref::<LengthLimitError>().is_some() {
                FrameworkError::PayloadTooLarge { limit }
            } else {
                FrameworkError::bad_request(format!("Failed to read request body: {}", e))
            }
        })
}

pub fn parse_json<T: DeserializeOwned>(bytes: &Bytes) -> Result<T, FrameworkError> {
    serde_json::from_slice(bytes)
        .map_err(|e| FrameworkError::bad_request(format!("Failed to parse JSON body: {}", e)))
}

pub fn parse_form<T: DeserializeOwned>(bytes: &Bytes) -> Result<T, FrameworkError> {
    serde_urlencoded::from_bytes(bytes)
        .map_err(|e| FrameworkError::bad_request(format!("Failed to parse form body: {}", e)))
}
