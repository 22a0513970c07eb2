// Shared response handling for the JSON service clients.
//
// The exec and balancer services use the same `{message, code}` error
// envelope; the DNS publisher has its own shape and handles it locally.

use serde::de::DeserializeOwned;
use url::Url;

use crate::error::Error;

/// Ensure a base URL ends with a slash so relative joins behave.
pub(crate) fn normalize_base_url(raw: &str) -> Result<Url, Error> {
    let mut url = Url::parse(raw)?;
    let path = url.path().trim_end_matches('/').to_owned();
    url.set_path(&format!("{path}/"));
    Ok(url)
}

const PREVIEW_LIMIT: usize = 200;

/// Leading slice of `body` for error messages, at most `PREVIEW_LIMIT`
/// bytes, never splitting a UTF-8 character.
pub(crate) fn body_preview(body: &str) -> &str {
    let mut end = body.len().min(PREVIEW_LIMIT);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

pub(crate) async fn handle_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let status = resp.status();
    if status.is_success() {
        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            let preview = body_preview(&body);
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    } else {
        Err(parse_error(status, resp).await)
    }
}

pub(crate) async fn handle_empty(resp: reqwest::Response) -> Result<(), Error> {
    let status = resp.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(parse_error(status, resp).await)
    }
}

pub(crate) async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
    let raw = resp.text().await.unwrap_or_default();

    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Error::Authentication {
            message: if raw.is_empty() {
                "token rejected".into()
            } else {
                raw
            },
        };
    }

    if let Ok(err) = serde_json::from_str::<ErrorResponse>(&raw) {
        Error::Api {
            status: status.as_u16(),
            message: err.message.unwrap_or_else(|| status.to_string()),
            code: err.code,
        }
    } else {
        Error::Api {
            status: status.as_u16(),
            message: if raw.is_empty() {
                status.to_string()
            } else {
                raw
            },
            code: None,
        }
    }
}
