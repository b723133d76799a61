//! HTTP request building.
//!
//! A `RequestBuilder` is a pure description of a request: building one
//! performs no I/O. The multipart body carries its bytes so the form can
//! be (re)materialized at execution time.

use serde::Serialize;
use url::Url;

use crate::error::{Error, ErrorKind, Result};

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl RequestMethod {
    /// Convert to reqwest::Method.
    pub fn to_reqwest(&self) -> reqwest::Method {
        match self {
            RequestMethod::Get => reqwest::Method::GET,
            RequestMethod::Post => reqwest::Method::POST,
            RequestMethod::Put => reqwest::Method::PUT,
            RequestMethod::Patch => reqwest::Method::PATCH,
            RequestMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Builder for HTTP requests against the Backlog API.
#[derive(Debug)]
pub struct RequestBuilder {
    pub(crate) method: RequestMethod,
    pub(crate) url: Url,
    pub(crate) body: Option<RequestBody>,
}

/// Request body content.
#[derive(Debug)]
pub enum RequestBody {
    /// JSON-encoded structured input; sent with `Content-Type: application/json`.
    Json(serde_json::Value),
    /// Single-part multipart form for file upload.
    Multipart {
        /// Form field name of the part.
        field: String,
        /// Filename advertised for the part (base name of the source path).
        file_name: String,
        /// MIME type inferred from the file extension.
        content_type: String,
        /// The file content, read up front.
        bytes: Vec<u8>,
    },
}

impl RequestBuilder {
    /// Create a new request builder for a fully composed URL.
    pub fn new(method: RequestMethod, url: Url) -> Self {
        Self {
            method,
            url,
            body: None,
        }
    }

    /// The request method.
    pub fn method(&self) -> RequestMethod {
        self.method
    }

    /// The fully composed request URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Add a query parameter, keeping any already present.
    pub fn query(mut self, name: &str, value: &str) -> Self {
        self.url.query_pairs_mut().append_pair(name, value);
        self
    }

    /// Set a JSON body.
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        let value = serde_json::to_value(body)?;
        self.body = Some(RequestBody::Json(value));
        Ok(self)
    }

    /// Set a raw JSON body.
    pub fn json_value(mut self, body: serde_json::Value) -> Self {
        self.body = Some(RequestBody::Json(body));
        self
    }

    /// Set a single-part multipart body for file upload.
    pub fn multipart(
        mut self,
        field: impl Into<String>,
        file_name: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        let file_name = file_name.into();
        let content_type = mime_for_file_name(&file_name).to_string();
        self.body = Some(RequestBody::Multipart {
            field: field.into(),
            file_name,
            content_type,
            bytes,
        });
        self
    }
}

impl RequestBody {
    /// Materialize a reqwest multipart form from a `Multipart` body.
    pub(crate) fn to_multipart_form(&self) -> Result<reqwest::multipart::Form> {
        match self {
            RequestBody::Multipart {
                field,
                file_name,
                content_type,
                bytes,
            } => {
                let part = reqwest::multipart::Part::bytes(bytes.clone())
                    .file_name(file_name.clone())
                    .mime_str(content_type)
                    .map_err(|e| {
                        Error::with_source(ErrorKind::Other(format!("invalid MIME type: {e}")), e)
                    })?;
                Ok(reqwest::multipart::Form::new().part(field.clone(), part))
            }
            RequestBody::Json(_) => Err(Error::new(ErrorKind::Other(
                "JSON body is not a multipart form".to_string(),
            ))),
        }
    }
}

/// Infer a MIME type from the extension of a filename.
///
/// Covers the formats Backlog serves for icons and attachments; anything
/// unknown is `application/octet-stream`.
pub(crate) fn mime_for_file_name(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "txt" => "text/plain",
        "csv" => "text/csv",
        "json" => "application/json",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        _ => "application/octet-stream",
    }
}
