//! Per-request options for [`crate::Connection::request`].
//!
//! A request may be sent more than once (after a `401` the connection logs in again and
//! retries), so options are kept as plain data and turned into a fresh
//! [`reqwest::RequestBuilder`] for every attempt.

use std::fmt;

use reqwest::RequestBuilder;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::{Form, Part};
use url::Url;

use crate::errors::{AuthError, Result};

/// Headers, query pairs and body of one logical request.
///
/// ```
/// # use bpt_store::{FormField, RequestOptions};
/// let options = RequestOptions::new()
///     .query("limit", "10")
///     .multipart(vec![FormField::text("groupId", "7")]);
/// ```
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct RequestOptions {
    headers: HeaderMap,
    query: Vec<(String, String)>,
    body: Body,
}

/// Request payload.
#[derive(Debug, Clone, Default)]
pub enum Body {
    /// No body.
    #[default]
    Empty,
    /// JSON document, sent with `Content-Type: application/json`.
    Json(serde_json::Value),
    /// `multipart/form-data` fields, in order.
    Multipart(Vec<FormField>),
}

/// One field of a multipart body.
#[derive(Clone)]
pub enum FormField {
    /// Plain text field.
    Text {
        /// Field name.
        name: String,
        /// Field value.
        value: String,
    },
    /// File field.
    File {
        /// Field name.
        name: String,
        /// File name announced in the part's `Content-Disposition`.
        file_name: String,
        /// Content type of the part.
        mime: String,
        /// File contents.
        contents: Vec<u8>,
    },
}

impl FormField {
    /// A text field.
    pub fn text<N: Into<String>, V: Into<String>>(name: N, value: V) -> FormField {
        FormField::Text {
            name: name.into(),
            value: value.into(),
        }
    }

    /// A file field.
    pub fn file<N, F, M>(name: N, file_name: F, mime: M, contents: Vec<u8>) -> FormField
    where
        N: Into<String>,
        F: Into<String>,
        M: Into<String>,
    {
        FormField::File {
            name: name.into(),
            file_name: file_name.into(),
            mime: mime.into(),
            contents,
        }
    }

    /// Field name.
    pub fn name(&self) -> &str {
        match self {
            FormField::Text { name, .. } | FormField::File { name, .. } => name,
        }
    }
}

impl fmt::Debug for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormField::Text { name, value } => f
                .debug_struct("Text")
                .field("name", name)
                .field("value", value)
                .finish(),
            FormField::File {
                name,
                file_name,
                mime,
                contents,
            } => f
                .debug_struct("File")
                .field("name", name)
                .field("file_name", file_name)
                .field("mime", mime)
                .field("len", &contents.len())
                .finish(),
        }
    }
}

impl RequestOptions {
    /// Empty options: no extra headers, no query, no body.
    pub fn new() -> RequestOptions {
        RequestOptions::default()
    }

    /// Add a header. The connection's `Authorization` header takes precedence over one set here.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Append a query pair.
    pub fn query<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Send a JSON body.
    pub fn json(mut self, value: serde_json::Value) -> Self {
        self.body = Body::Json(value);
        self
    }

    /// Send a multipart body.
    pub fn multipart(mut self, fields: Vec<FormField>) -> Self {
        self.body = Body::Multipart(fields);
        self
    }

    /// Extra headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The body.
    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Append the query pairs to `url`.
    pub(crate) fn extend_query(&self, url: &mut Url) {
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }
    }

    /// Apply these options plus the `Authorization` header to a request under construction.
    pub(crate) fn apply(&self, rb: RequestBuilder, auth_token: &str) -> Result<RequestBuilder> {
        let mut headers = self.headers.clone();
        let mut auth = HeaderValue::from_str(auth_token).map_err(|e| {
            AuthError::MalformedResponse(format!("`authToken` is not a valid header value: {e}"))
        })?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let rb = rb.headers(headers);
        let rb = match &self.body {
            Body::Empty => rb,
            Body::Json(value) => rb.json(value),
            Body::Multipart(fields) => rb.multipart(build_form(fields)?),
        };

        Ok(rb)
    }
}

fn build_form(fields: &[FormField]) -> Result<Form> {
    let mut form = Form::new();
    for field in fields {
        form = match field {
            FormField::Text { name, value } => form.text(name.clone(), value.clone()),
            FormField::File {
                name,
                file_name,
                mime,
                contents,
            } => {
                let part = Part::bytes(contents.clone())
                    .file_name(file_name.clone())
                    .mime_str(mime)?;
                form.part(name.clone(), part)
            }
        };
    }
    Ok(form)
}
