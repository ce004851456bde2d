//! Request extractors.

use std::convert::Infallible;

use axum::extract::{Form, FromRequest, Multipart, Request};
use axum::http::{HeaderMap, Method, header};

use crate::api::dto::NotifyForm;

const MESSAGE_FIELD: &str = "message";

/// The `message` field of a POSTed form, url-encoded or `multipart/form-data`.
///
/// Never rejects: a request that is not a POST, or whose body cannot be read
/// as a form, carries no message. File parts are skipped, and when the field
/// repeats the last value wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostedMessage(pub Option<String>);

impl<S> FromRequest<S> for PostedMessage
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if *req.method() != Method::POST {
            return Ok(PostedMessage(None));
        }

        let message = if is_multipart(req.headers()) {
            multipart_message(req, state).await
        } else {
            Form::<NotifyForm>::from_request(req, state)
                .await
                .map(|Form(form)| form.message)
                .map_err(|rejection| rejection.to_string())
        };

        match message {
            Ok(message) => Ok(PostedMessage(message)),
            Err(reason) => {
                tracing::debug!(%reason, "No form body, composing default message");
                Ok(PostedMessage(None))
            }
        }
    }
}

fn is_multipart(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim_start().to_ascii_lowercase().starts_with("multipart/form-data"))
}

async fn multipart_message<S>(req: Request, state: &S) -> Result<Option<String>, String>
where
    S: Send + Sync,
{
    let mut multipart = Multipart::from_request(req, state)
        .await
        .map_err(|rejection| rejection.to_string())?;

    let mut message = None;
    while let Some(field) = multipart.next_field().await.map_err(|e| e.to_string())? {
        if field.name() != Some(MESSAGE_FIELD) || field.file_name().is_some() {
            continue;
        }
        message = Some(field.text().await.map_err(|e| e.to_string())?);
    }
    Ok(message)
}
