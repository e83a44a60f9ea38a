use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Request},
    http::{header, request::Parts, HeaderMap},
};
use serde::{de::DeserializeOwned, Serialize};
use std::convert::Infallible;

use crate::error::ApiError;
use crate::middleware::ApiFailure;

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const XML_CONTENT_TYPE: &str = "application/xml";

/// Representation chosen for a response body
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseFormat {
    #[default]
    Json,
    Xml,
}

impl ResponseFormat {
    /// XML when `Accept-Encoding: text/xml` is sent, or when `Accept` ranks an
    /// XML media type above JSON (q-values honoured, `*/*` counts as JSON)
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let header_str = |name: header::HeaderName| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("")
                .to_ascii_lowercase()
        };

        if header_str(header::ACCEPT_ENCODING).trim() == "text/xml" {
            return ResponseFormat::Xml;
        }

        let (mut xml_q, mut json_q) = (0.0_f32, 0.0_f32);
        for (media, q) in accept_entries(&header_str(header::ACCEPT)) {
            match media {
                "application/xml" | "text/xml" => xml_q = xml_q.max(q),
                "application/json" | "application/*" | "*/*" => json_q = json_q.max(q),
                _ => {}
            }
        }

        if xml_q > 0.0 && xml_q > json_q {
            ResponseFormat::Xml
        } else {
            ResponseFormat::Json
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ResponseFormat::Json => JSON_CONTENT_TYPE,
            ResponseFormat::Xml => XML_CONTENT_TYPE,
        }
    }

    /// Encode a single value; XML uses the value's serde name as root element
    pub fn encode<T: Serialize>(&self, value: &T) -> Result<String, String> {
        match self {
            ResponseFormat::Json => serde_json::to_string(value).map_err(|e| e.to_string()),
            ResponseFormat::Xml => quick_xml::se::to_string(value).map_err(|e| e.to_string()),
        }
    }

    /// Encode a sequence; XML wraps the items in `<root>`
    pub fn encode_list<T: Serialize>(&self, root: &str, items: &[T]) -> Result<String, String> {
        match self {
            ResponseFormat::Json => serde_json::to_string(items).map_err(|e| e.to_string()),
            ResponseFormat::Xml => {
                let mut out = format!("<{}>", root);
                for item in items {
                    out.push_str(&quick_xml::se::to_string(item).map_err(|e| e.to_string())?);
                }
                out.push_str(&format!("</{}>", root));
                Ok(out)
            }
        }
    }
}

/// `(media type, q)` pairs of an Accept header; a malformed q counts as 0
fn accept_entries(accept: &str) -> impl Iterator<Item = (&str, f32)> {
    accept.split(',').filter_map(|entry| {
        let mut parts = entry.split(';').map(str::trim);
        let media = parts.next().filter(|m| !m.is_empty())?;
        let q = parts
            .find_map(|p| p.strip_prefix("q="))
            .map(|v| v.parse::<f32>().unwrap_or(0.0))
            .unwrap_or(1.0);
        Some((media, q))
    })
}

#[async_trait]
impl<S> FromRequestParts<S> for ResponseFormat
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(ResponseFormat::from_headers(&parts.headers))
    }
}

/// Request body decoded as XML when `Content-Type` says so, JSON otherwise.
/// Rejections are rendered in the negotiated response format.
#[derive(Debug)]
pub struct Payload<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiFailure;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let response_format = ResponseFormat::from_headers(req.headers());
        let is_xml = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.to_ascii_lowercase().contains("xml"))
            .unwrap_or(false);

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiFailure::new(response_format, ApiError::bad_request(e.body_text())))?;

        if is_xml {
            let text = std::str::from_utf8(&bytes)
                .map_err(|_| ApiFailure::new(response_format, ApiError::bad_request("Request body is not valid UTF-8")))?;
            quick_xml::de::from_str(text)
                .map(Payload)
                .map_err(|e| ApiFailure::new(response_format, ApiError::bad_request(format!("Invalid XML body: {}", e))))
        } else {
            serde_json::from_slice(&bytes)
                .map(Payload)
                .map_err(|e| ApiFailure::new(response_format, ApiError::invalid_json(format!("Invalid JSON body: {}", e))))
        }
    }
}
