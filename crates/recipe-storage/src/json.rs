//! JSON documents stored as S3 objects.

use aws_sdk_s3::Client;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::StorageError;
use crate::objects;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Load a JSON document. Returns the deserialized value and its ETag.
///
/// A body that fails to decode is reported as `InvalidRecord` for `key`.
pub async fn load_json<T: DeserializeOwned>(
    client: &Client,
    bucket: &str,
    key: &str,
) -> Result<(T, String), StorageError> {
    let output = objects::get_object(client, bucket, key).await?;
    let value: T =
        serde_json::from_slice(&output.body).map_err(|e| StorageError::InvalidRecord {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
    let etag = output.etag.unwrap_or_default();
    Ok((value, etag))
}

/// Save a JSON document with ETag optimistic locking.
pub async fn save_json_if_match<T: Serialize>(
    client: &Client,
    bucket: &str,
    key: &str,
    value: &T,
    expected_etag: &str,
) -> Result<String, StorageError> {
    let body = serde_json::to_vec(value)?;
    objects::put_object_if_match(
        client,
        bucket,
        key,
        body,
        Some(JSON_CONTENT_TYPE),
        expected_etag,
    )
    .await
}

/// Save a JSON document only if nothing is stored under `key` yet.
pub async fn save_json_if_absent<T: Serialize>(
    client: &Client,
    bucket: &str,
    key: &str,
    value: &T,
) -> Result<String, StorageError> {
    let body = serde_json::to_vec(value)?;
    objects::put_object_if_absent(client, bucket, key, body, Some(JSON_CONTENT_TYPE)).await
}
