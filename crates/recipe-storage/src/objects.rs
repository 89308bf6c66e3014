//! Thin wrappers around the S3 object API.

use aws_sdk_s3::error::ProvideErrorMetadata;
use aws_sdk_s3::Client;
use aws_smithy_types::byte_stream::ByteStream;

use crate::error::StorageError;

/// Result of a GET operation, including the body and ETag.
pub struct GetObjectOutput {
    pub body: Vec<u8>,
    pub etag: Option<String>,
}

/// Get an object from S3.
pub async fn get_object(
    client: &Client,
    bucket: &str,
    key: &str,
) -> Result<GetObjectOutput, StorageError> {
    let resp = client
        .get_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .map_err(|e| {
            let err = e.into_service_error();
            if err.is_no_such_key() {
                StorageError::NotFound {
                    key: key.to_string(),
                }
            } else {
                StorageError::GetObject(err.to_string())
            }
        })?;

    let etag = resp.e_tag().map(|s| s.to_string());
    let body = resp
        .body
        .collect()
        .await
        .map_err(|e| StorageError::GetObject(e.to_string()))?
        .into_bytes()
        .to_vec();

    Ok(GetObjectOutput { body, etag })
}

/// Put an object only if its current ETag is `expected_etag`.
///
/// Fails with `PreconditionFailed` when another writer got there first and
/// with `NotFound` when the object no longer exists.
pub async fn put_object_if_match(
    client: &Client,
    bucket: &str,
    key: &str,
    body: Vec<u8>,
    content_type: Option<&str>,
    expected_etag: &str,
) -> Result<String, StorageError> {
    let resp = client
        .put_object()
        .bucket(bucket)
        .key(key)
        .body(ByteStream::from(body))
        .set_content_type(content_type.map(str::to_string))
        .if_match(expected_etag)
        .send()
        .await
        .map_err(|e| {
            let err = e.into_service_error();
            conditional_failure(key, err.code(), err.to_string(), StorageError::PutObject)
        })?;

    Ok(resp.e_tag().unwrap_or_default().to_string())
}

/// Put an object only if no object exists under `key` yet.
///
/// Fails with `PreconditionFailed` when the key is already taken.
pub async fn put_object_if_absent(
    client: &Client,
    bucket: &str,
    key: &str,
    body: Vec<u8>,
    content_type: Option<&str>,
) -> Result<String, StorageError> {
    let resp = client
        .put_object()
        .bucket(bucket)
        .key(key)
        .body(ByteStream::from(body))
        .set_content_type(content_type.map(str::to_string))
        .if_none_match("*")
        .send()
        .await
        .map_err(|e| {
            let err = e.into_service_error();
            conditional_failure(key, err.code(), err.to_string(), StorageError::PutObject)
        })?;

    Ok(resp.e_tag().unwrap_or_default().to_string())
}

/// Classify a failed conditional request.
///
/// S3 answers 412 `PreconditionFailed` on an ETag mismatch (or an existing
/// key under `If-None-Match: *`), 409 `ConditionalRequestConflict` when a
/// concurrent conditional write is in flight, and `NoSuchKey` when the key
/// is gone. Anything else is passed to `other`.
pub fn conditional_failure(
    key: &str,
    code: Option<&str>,
    message: String,
    other: fn(String) -> StorageError,
) -> StorageError {
    let code = code.unwrap_or_default();
    let matches = |name: &str| code == name || message.contains(name);
    if matches("PreconditionFailed") || matches("ConditionalRequestConflict") {
        StorageError::PreconditionFailed {
            key: key.to_string(),
        }
    } else if matches("NoSuchKey") {
        StorageError::NotFound {
            key: key.to_string(),
        }
    } else {
        other(message)
    }
}

/// Delete an object from S3. Deleting a missing key is not an error.
pub async fn delete_object(client: &Client, bucket: &str, key: &str) -> Result<(), StorageError> {
    client
        .delete_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .map_err(|e| StorageError::DeleteObject(e.into_service_error().to_string()))?;

    Ok(())
}

/// Delete an object only if its current ETag is `expected_etag`.
///
/// Fails with `PreconditionFailed` when the object changed since it was read
/// and with `NotFound` when it no longer exists.
pub async fn delete_object_if_match(
    client: &Client,
    bucket: &str,
    key: &str,
    expected_etag: &str,
) -> Result<(), StorageError> {
    client
        .delete_object()
        .bucket(bucket)
        .key(key)
        .if_match(expected_etag)
        .send()
        .await
        .map_err(|e| {
            let err = e.into_service_error();
            conditional_failure(key, err.code(), err.to_string(), StorageError::DeleteObject)
        })?;

    Ok(())
}

/// List object keys under a prefix, following continuation tokens.
pub async fn list_objects(
    client: &Client,
    bucket: &str,
    prefix: &str,
) -> Result<Vec<String>, StorageError> {
    let mut keys = Vec::new();
    let mut continuation_token: Option<String> = None;

    loop {
        let resp = client
            .list_objects_v2()
            .bucket(bucket)
            .prefix(prefix)
            .set_continuation_token(continuation_token.take())
            .send()
            .await
            .map_err(|e| StorageError::ListObjects(e.into_service_error().to_string()))?;

        keys.extend(resp.contents().iter().filter_map(|obj| obj.key()).map(str::to_string));

        if resp.is_truncated() == Some(true) {
            continuation_token = resp.next_continuation_token().map(|s| s.to_string());
        } else {
            break;
        }
    }

    Ok(keys)
}
