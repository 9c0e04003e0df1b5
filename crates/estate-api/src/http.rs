//! reqwest implementation of [`AdminBackend`](crate::AdminBackend)

use std::time::Duration;

use estate_core::prelude::*;
use estate_core::{Entity, EntityKind, MultipartPayload, DATA_PART};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder};
use serde::{Deserialize, Serialize};
use serde_json::json;
use url::Url;

use crate::auth::AuthContext;
use crate::backend::AdminBackend;
use crate::response::{read_json, string_field, transport_error, ResponseExt};

/// Characters escaped inside a single path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// HTTP method used to update an existing record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateMethod {
    #[default]
    Put,
    Patch,
}

impl UpdateMethod {
    fn method(self) -> Method {
        match self {
            UpdateMethod::Put => Method::PUT,
            UpdateMethod::Patch => Method::PATCH,
        }
    }
}

impl std::fmt::Display for UpdateMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpdateMethod::Put => write!(f, "put"),
            UpdateMethod::Patch => write!(f, "patch"),
        }
    }
}

/// Connection settings for [`HttpBackend`]
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub base_url: String,
    pub update_method: UpdateMethod,
    pub timeout: Duration,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            update_method: UpdateMethod::Put,
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Clone)]
pub struct HttpBackend {
    base: Url,
    client: reqwest::Client,
    auth: AuthContext,
    update_method: UpdateMethod,
}

impl HttpBackend {
    pub fn new(config: BackendConfig, auth: AuthContext) -> Result<Self> {
        let base = parse_base_url(&config.base_url)?;

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        info!("Backend at {}", base);
        Ok(Self {
            base,
            client,
            auth,
            update_method: config.update_method,
        })
    }

    pub fn auth(&self) -> &AuthContext {
        &self.auth
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// URL of `segments` below the base, each segment escaped on its own
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let path = segments
            .iter()
            .map(|s| utf8_percent_encode(s, SEGMENT).to_string())
            .collect::<Vec<_>>()
            .join("/");
        self.base
            .join(&path)
            .map_err(|e| Error::config(format!("Invalid endpoint {:?}: {}", path, e)))
    }

    /// Attach the bearer token when there is one
    fn with_token(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.auth.current_token() {
            Some(token) => builder.header("Authorization", format!("Bearer {}", token)),
            None => builder,
        }
    }

    /// Attach the bearer token, failing without one
    fn authorized(&self, builder: RequestBuilder) -> Result<RequestBuilder> {
        let token = self.auth.current_token().ok_or(Error::NotLoggedIn)?;
        Ok(builder.header("Authorization", format!("Bearer {}", token)))
    }

    /// Send a request and hand back its JSON body, dropping the token on 401
    async fn send(&self, builder: RequestBuilder) -> Result<serde_json::Value> {
        let result = builder.send().await.map_client_error().await;
        match result {
            Ok(response) => read_json(response).await,
            Err(Error::Unauthorized) => {
                if let Err(e) = self.auth.invalidate() {
                    warn!("Failed to clear rejected token: {}", e);
                }
                Err(Error::Unauthorized)
            }
            Err(e) => Err(e),
        }
    }

    async fn submit(
        &self,
        method: Method,
        url: Url,
        kind: EntityKind,
        payload: MultipartPayload,
    ) -> Result<Option<Entity>> {
        debug!(
            "{} {} ({} file parts, {} bytes)",
            method,
            url,
            payload.files.len(),
            payload.upload_bytes()
        );
        let form = to_form(payload)?;
        let request = self.authorized(self.client.request(method, url))?;
        let body = self.send(request.multipart(form)).await?;

        match Entity::parse(kind, body) {
            Ok(entity) if !entity.id().is_empty() => Ok(Some(entity)),
            Ok(_) => Ok(None),
            Err(e) => {
                debug!("Response did not contain a {}: {}", kind.singular(), e);
                Ok(None)
            }
        }
    }
}

impl AdminBackend for HttpBackend {
    #[tracing::instrument(skip(self))]
    async fn list(&self, kind: EntityKind) -> Result<Vec<Entity>> {
        let url = self.endpoint(&[kind.collection()])?;
        let body = self.send(self.with_token(self.client.get(url))).await?;
        Entity::parse_list(kind, body)
    }

    #[tracing::instrument(skip(self))]
    async fn fetch(&self, kind: EntityKind, id: &str) -> Result<Entity> {
        let url = self.endpoint(&[kind.collection(), id])?;
        let body = self.send(self.with_token(self.client.get(url))).await?;
        Entity::parse(kind, body)
    }

    #[tracing::instrument(skip(self, payload))]
    async fn create(&self, kind: EntityKind, payload: MultipartPayload) -> Result<Option<Entity>> {
        let url = self.endpoint(&[kind.collection()])?;
        self.submit(Method::POST, url, kind, payload).await
    }

    #[tracing::instrument(skip(self, payload))]
    async fn update(
        &self,
        kind: EntityKind,
        id: &str,
        payload: MultipartPayload,
    ) -> Result<Option<Entity>> {
        let url = self.endpoint(&[kind.collection(), id])?;
        self.submit(self.update_method.method(), url, kind, payload)
            .await
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, kind: EntityKind, id: &str) -> Result<()> {
        let url = self.endpoint(&[kind.collection(), id])?;
        let request = self.authorized(self.client.delete(url))?;
        self.send(request).await?;
        Ok(())
    }

    #[tracing::instrument(skip(self, password))]
    async fn login(&self, email: &str, password: &str) -> Result<String> {
        let url = self.endpoint(&["auth", "login"])?;
        let request = self
            .client
            .post(url)
            .json(&json!({ "email": email, "password": password }));

        // A 401 here means bad credentials, not an expired session
        let response = match request.send().await.map_client_error().await {
            Err(Error::Unauthorized) => {
                return Err(Error::http(401, "Invalid email or password"));
            }
            other => other?,
        };
        let body = read_json(response).await?;
        string_field(&body, &["token", "accessToken", "access_token"])
            .ok_or_else(|| Error::decode("login response did not contain a token"))
    }

    #[tracing::instrument(skip(self, message))]
    async fn chat(&self, message: &str) -> Result<String> {
        let url = self.endpoint(&["chat"])?;
        let request = self.with_token(self.client.post(url).json(&json!({ "message": message })));
        let body = self.send(request).await?;
        string_field(&body, &["reply", "response", "message", "answer"])
            .ok_or_else(|| Error::decode("chat response did not contain a reply"))
    }
}

/// Base URLs are joined against, so they must end with a slash
fn parse_base_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    };
    let url = Url::parse(&with_slash)
        .map_err(|e| Error::config(format!("Invalid API base URL {:?}: {}", raw, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(Error::config(format!(
            "Unsupported URL scheme {:?} in {:?}",
            other, raw
        ))),
    }
}

/// Convert a payload into a reqwest multipart form
pub fn to_form(payload: MultipartPayload) -> Result<Form> {
    let mut form = Form::new().text(DATA_PART, payload.data_text());
    for file in payload.files {
        let part = Part::bytes(file.upload.bytes.clone())
            .file_name(file.upload.file_name.clone())
            .mime_str(&file.upload.content_type)
            .map_err(transport_error)?;
        form = form.part(file.name, part);
    }
    Ok(form)
}
