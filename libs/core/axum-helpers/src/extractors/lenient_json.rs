//! JSON extractor that reads a missing body as the default value.

use axum::{
    body::Bytes,
    extract::{FromRequest, Json, Request, rejection::JsonRejection},
    http::{HeaderMap, header},
};
use serde::de::DeserializeOwned;

/// JSON body extractor that tolerates absent payloads.
///
/// Requests without a JSON content type, or with an empty body, extract as
/// `T::default()`. A JSON body that fails to parse is still rejected with the
/// usual [`JsonRejection`].
///
/// # Example
/// ```ignore
/// use axum::extract::rejection::JsonRejection;
/// use axum_helpers::extractors::LenientJson;
///
/// async fn update(payload: Result<LenientJson<UpdateProduct>, JsonRejection>) {
///     // `{}`, an empty body and a form post all arrive as UpdateProduct::default()
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LenientJson<T>(pub T);

impl<T, S> FromRequest<S> for LenientJson<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = JsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_json(req.headers()) {
            return Ok(Self(T::default()));
        }

        let bytes = Bytes::from_request(req, state).await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(T::default()));
        }

        let Json(value) = Json::<T>::from_bytes(&bytes)?;
        Ok(Self(value))
    }
}

/// `application/json` or any `application/*+json` media type
fn is_json(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}
