use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, LOCATION};
use reqwest::redirect::Policy;
use serde_json::{Map, Value};

use crate::config::Config;
use crate::errors::{DmCloudError, Result};
use crate::media;
use crate::models::{CallDescriptor, Dispatched, Fields, ListOptions};

/// Builder for constructing a [`Client`] with custom configuration.
///
/// # Example
///
/// ```no_run
/// use dmcloud::ClientBuilder;
/// use std::time::Duration;
///
/// # fn example() -> dmcloud::Result<()> {
/// let client = ClientBuilder::new()
///     .api_key("my_api_key")
///     .base_url("https://custom.example.com/api")
///     .timeout(Duration::from_secs(120))
///     .auto_call(false)
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    config: Config,
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Replace every setting at once.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Set the API key, sent as a bearer token.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    /// Override the endpoint (defaults to `https://api.dmcloud.net/api`).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the HTTP request timeout (defaults to 60 seconds).
    pub fn timeout(mut self, d: Duration) -> Self {
        self.config.timeout = d;
        self
    }

    /// Whether [`Client::dispatch`] sends immediately (defaults to `true`).
    pub fn auto_call(mut self, on: bool) -> Self {
        self.config.auto_call = on;
        self
    }

    /// Build the [`Client`].
    ///
    /// If no API key was set, `DMCLOUD_API_KEY` is used when present.
    pub fn build(self) -> Result<Client> {
        let mut config = self.config;
        if config.api_key.is_none() {
            config.api_key = Config::api_key_from_env();
        }
        Client::new(config)
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The DM Cloud API client.
///
/// # Example
///
/// ```no_run
/// use dmcloud::{Client, Config};
///
/// # async fn example() -> dmcloud::Result<()> {
/// let client = Client::new(Config::from_env())?;
/// let link = client.media().download_url("4c922386dede830447000009", "mp4_h264_aac").await?;
/// println!("{link}");
/// # Ok(())
/// # }
/// ```
pub struct Client {
    config: Config,
    http: reqwest::Client,
    /// Never follows redirects; used to read `Location` off download links.
    no_redirect: reqwest::Client,
}

impl Client {
    /// Create a client from an explicit [`Config`].
    ///
    /// For customization, use [`ClientBuilder`] instead.
    pub fn new(mut config: Config) -> Result<Self> {
        config.base_url = config.base_url.trim_end_matches('/').to_string();

        let mut headers = HeaderMap::new();
        if let Some(ref key) = config.api_key {
            let mut value = HeaderValue::from_str(&format!("Bearer {key}"))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        let no_redirect = reqwest::Client::builder()
            .timeout(config.timeout)
            .redirect(Policy::none())
            .build()?;

        Ok(Self {
            config,
            http,
            no_redirect,
        })
    }

    /// The settings this client was built with, `base_url` already trimmed.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The `media.*` operations, each sent immediately.
    pub fn media(&self) -> MediaApi<'_> {
        MediaApi { client: self }
    }

    /// Post a call to the API and return the parsed response.
    ///
    /// # Errors
    ///
    /// - [`DmCloudError::Http`] on network failure.
    /// - [`DmCloudError::Api`] when the body carries an `error` object or the
    ///   status is a non-specific failure.
    /// - [`DmCloudError::Authentication`], [`DmCloudError::PermissionDenied`],
    ///   [`DmCloudError::NotFound`] for 401, 403 and 404.
    pub async fn send(&self, descriptor: &CallDescriptor) -> Result<Value> {
        tracing::debug!(call = %descriptor.call, url = %self.config.base_url, "sending call");

        let response = self
            .http
            .post(&self.config.base_url)
            .json(&descriptor.params)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if status.is_success() {
            let body: Value = serde_json::from_str(&response_text)?;
            if let Some(err) = body.get("error").filter(|e| !e.is_null()) {
                let code = err.get("code").and_then(Value::as_i64);
                let message = err
                    .as_str()
                    .or_else(|| err.get("message").and_then(Value::as_str))
                    .map(str::to_string)
                    .unwrap_or_else(|| err.to_string());
                tracing::warn!(call = %descriptor.call, ?code, %message, "API returned an error");
                return Err(DmCloudError::Api {
                    status_code: status.as_u16(),
                    code,
                    message,
                    body: Some(body),
                });
            }
            return Ok(body);
        }

        let status_code = status.as_u16();
        let parsed_body: Option<Value> = serde_json::from_str(&response_text).ok();

        let message = parsed_body
            .as_ref()
            .and_then(|b| b.get("error"))
            .and_then(|e| e.get("message").or(Some(e)))
            .and_then(|e| e.as_str())
            .unwrap_or(&response_text)
            .to_string();

        tracing::warn!(call = %descriptor.call, status = status_code, %message, "request failed");

        Err(match status_code {
            401 => DmCloudError::Authentication { message },
            403 => DmCloudError::PermissionDenied { message },
            404 => DmCloudError::NotFound { message },
            _ => DmCloudError::Api {
                status_code,
                code: parsed_body
                    .as_ref()
                    .and_then(|b| b.get("error"))
                    .and_then(|e| e.get("code"))
                    .and_then(Value::as_i64),
                message,
                body: parsed_body,
            },
        })
    }

    /// Send the call when `auto_call` is on, otherwise hand it back untouched.
    pub async fn dispatch(&self, descriptor: CallDescriptor) -> Result<Dispatched> {
        if self.config.auto_call {
            let response = self.send(&descriptor).await?;
            Ok(Dispatched::Sent(response))
        } else {
            tracing::debug!(call = %descriptor.call, "auto_call off, deferring");
            Ok(Dispatched::Deferred(descriptor))
        }
    }

    /// GET `url` without following redirects and return its `Location` header.
    async fn resolve_redirect(&self, url: &str) -> Result<String> {
        let response = self.no_redirect.get(url).send().await?;
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        tracing::debug!(%url, status = response.status().as_u16(), ?location, "resolved download link");

        location.ok_or_else(|| DmCloudError::MissingRedirect {
            url: url.to_string(),
        })
    }
}

/// Immediate `media.*` operations. Obtained from [`Client::media`].
///
/// For descriptors without sending, see the [`media`](crate::media) module.
pub struct MediaApi<'a> {
    client: &'a Client,
}

impl MediaApi<'_> {
    /// Create a media object, optionally fetching `url` and transcoding it to `assets_names`.
    ///
    /// The response's `result` holds the new media id.
    pub async fn create(
        &self,
        url: Option<&str>,
        assets_names: &[String],
        meta: &Map<String, Value>,
    ) -> Result<Value> {
        let call = media::create(url, assets_names, meta)?;
        self.client.send(&call).await
    }

    /// Delete a media object with all its assets.
    pub async fn delete(&self, media_id: &str) -> Result<Value> {
        let call = media::delete(media_id)?;
        self.client.send(&call).await
    }

    /// A multi-level structure describing the media, limited to `fields`.
    ///
    /// `None` for `assets_names` queries the `source` asset.
    pub async fn info(
        &self,
        media_id: &str,
        assets_names: Option<&[String]>,
        fields: &Fields,
    ) -> Result<Value> {
        let call = media::info(media_id, assets_names, fields)?;
        self.client.send(&call).await
    }

    /// One page of media info plus pagination data.
    pub async fn list(&self, opts: &ListOptions) -> Result<Value> {
        let call = media::list(opts)?;
        self.client.send(&call).await
    }

    /// The signed download link of `asset_name`, read from
    /// `result.assets.<asset_name>.download_url`.
    pub async fn url(&self, media_id: &str, asset_name: &str) -> Result<String> {
        let call = media::url(media_id, asset_name)?;
        let response = self.client.send(&call).await?;

        response
            .get("result")
            .and_then(|r| r.get("assets"))
            .and_then(|a| a.get(asset_name))
            .and_then(|a| a.get(media::DOWNLOAD_URL_FIELD))
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| DmCloudError::MissingField {
                path: format!("result.assets.{asset_name}.{}", media::DOWNLOAD_URL_FIELD),
            })
    }

    /// The final link on the storage server: [`url`](Self::url) followed by
    /// one redirect.
    pub async fn download_url(&self, media_id: &str, asset_name: &str) -> Result<String> {
        let url = self.url(media_id, asset_name).await?;
        self.client.resolve_redirect(&url).await
    }
}
