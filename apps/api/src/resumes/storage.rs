//! Original upload bytes live in S3 under `resumes/`.

use std::future::Future;

use anyhow::anyhow;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;

const KEY_PREFIX: &str = "resumes";
const FALLBACK_NAME: &str = "resume";

/// Reduces a client-supplied filename to a safe ASCII basename.
/// Path components are dropped, whitespace becomes `_`, and anything outside
/// `[A-Za-z0-9._-]` is removed.
pub fn sanitize_filename(filename: &str) -> String {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    let cleaned: String = base
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();
    let cleaned = cleaned.trim_start_matches(['.', '_']);
    if cleaned.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        cleaned.to_string()
    }
}

/// `{uuid-hex}_{sanitized name}`; unique per upload.
pub fn saved_name(filename: &str) -> String {
    format!("{}_{}", Uuid::new_v4().simple(), sanitize_filename(filename))
}

pub fn object_key(saved_name: &str) -> String {
    format!("{KEY_PREFIX}/{saved_name}")
}

pub async fn put_object(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    key: &str,
    data: Bytes,
    content_type: Option<&str>,
) -> Result<(), AppError> {
    s3.put_object()
        .bucket(bucket)
        .key(key)
        .body(ByteStream::from(data))
        .content_type(content_type.unwrap_or("application/octet-stream"))
        .send()
        .await
        .map_err(|e| AppError::S3(format!("Upload of {key} failed: {e}")))?;

    info!("Stored resume at s3://{bucket}/{key}");
    Ok(())
}

/// `None` when the object does not exist.
pub async fn get_object(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    key: &str,
) -> Result<Option<Bytes>, AppError> {
    let output = match s3.get_object().bucket(bucket).key(key).send().await {
        Ok(output) => output,
        Err(e) if e.as_service_error().is_some_and(|se| se.is_no_such_key()) => {
            return Ok(None);
        }
        Err(e) => return Err(AppError::S3(format!("Download of {key} failed: {e}"))),
    };

    let data = output
        .body
        .collect()
        .await
        .map_err(|e| AppError::Internal(anyhow!("Reading {key} failed: {e}")))?;
    Ok(Some(data.into_bytes()))
}

pub async fn delete_object(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    key: &str,
) -> Result<(), AppError> {
    s3.delete_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .map_err(|e| AppError::S3(format!("Delete of {key} failed: {e}")))?;

    info!("Removed s3://{bucket}/{key}");
    Ok(())
}

/// Passes `result` through, running `cleanup` first when it is an error.
pub async fn cleanup_on_error<T, E, F, Fut>(result: Result<T, E>, cleanup: F) -> Result<T, E>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = ()>,
{
    if result.is_err() {
        cleanup().await;
    }
    result
}
