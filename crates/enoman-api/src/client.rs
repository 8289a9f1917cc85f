// Async HTTP client for the EnOcean YAML manager add-on.
//
// Every request path is joined onto a base URL discovered from the
// configured address, so the client works unchanged behind a reverse-proxy
// path prefix such as Home Assistant ingress.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;
use crate::types::{
    DeviceRecord, DevicesResponse, ExportResponse, ImportResponse, PathsResponse,
    ProfilesResponse, SuggestResponse,
};

// ── Base path discovery ──────────────────────────────────────────────

/// Resolve the base URL every API path is joined onto.
///
/// Mirrors how a browser derives a document's base: query and fragment are
/// dropped, a trailing document segment (`index.html`) is stripped, and the
/// resulting path always ends in `/`. A proxied deployment such as
/// `https://ha.local/api/hassio_ingress/TOKEN` therefore keeps its prefix.
pub fn resolve_base_url(raw: &str) -> Result<Url, Error> {
    let mut url = Url::parse(raw.trim())?;
    if url.cannot_be_a_base() {
        return Err(Error::InvalidBaseUrl {
            url: raw.to_owned(),
            reason: "URL cannot carry a path".into(),
        });
    }
    url.set_query(None);
    url.set_fragment(None);

    let path = url.path().to_owned();
    if !path.ends_with('/') {
        let (parent, last) = path.rsplit_once('/').unwrap_or(("", path.as_str()));
        let base = if last.contains('.') {
            format!("{parent}/")
        } else {
            format!("{path}/")
        };
        url.set_path(&base);
    }
    Ok(url)
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the add-on's `/api/*` endpoints.
///
/// Stateless apart from the connection pool: it never caches responses.
/// Caching is `enoman-core`'s job.
pub struct ManagerClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ManagerClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a raw address and a transport config.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        let base_url = resolve_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client` (caller manages headers and TLS).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = resolve_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// The discovered base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Join a request path onto the base URL.
    ///
    /// Leading slashes are stripped first so that `/api/devices` resolves
    /// under the base path rather than at the server root.
    pub fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// `{base}api/devices/{key}` with `key` percent-encoded as one segment.
    fn device_url(&self, key: &str) -> Result<Url, Error> {
        let mut url = self.url("api/devices")?;
        url.path_segments_mut()
            .map_err(|()| Error::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: "URL cannot carry a path".into(),
            })?
            .push(key);
        Ok(url)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {url}");
        let resp = self.http.get(url).send().await?;
        Self::handle_response(resp).await
    }

    async fn get_with_params<T: DeserializeOwned>(
        &self,
        url: Url,
        params: &[(&str, &str)],
    ) -> Result<T, Error> {
        debug!("GET {url} params={params:?}");
        let resp = self.http.get(url).query(params).send().await?;
        Self::handle_response(resp).await
    }

    async fn post<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("POST {url}");
        let resp = self.http.post(url).send().await?;
        Self::handle_response(resp).await
    }

    async fn post_json_no_response<B: Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<(), Error> {
        debug!("POST {url}");
        let resp = self.http.post(url).json(body).send().await?;
        Self::handle_empty(resp).await
    }

    async fn delete(&self, url: Url) -> Result<(), Error> {
        debug!("DELETE {url}");
        let resp = self.http.delete(url).send().await?;
        Self::handle_empty(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn handle_empty(resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    /// Keep the body verbatim; an empty body falls back to the status line.
    async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let body = resp.text().await.unwrap_or_default();
        Error::Api {
            status: status.as_u16(),
            body: if body.is_empty() {
                status.to_string()
            } else {
                body
            },
        }
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    // ── Paths ────────────────────────────────────────────────────────

    /// `GET /api/paths`
    pub async fn paths(&self) -> Result<PathsResponse, Error> {
        self.get(self.url("api/paths")?).await
    }

    // ── Devices ──────────────────────────────────────────────────────

    /// `GET /api/devices`
    pub async fn list_devices(&self) -> Result<DevicesResponse, Error> {
        self.get(self.url("api/devices")?).await
    }

    /// `GET /api/devices/{key}`
    pub async fn get_device(&self, key: &str) -> Result<DeviceRecord, Error> {
        self.get(self.device_url(key)?).await
    }

    /// `POST /api/devices` -- the store keys on `id_hex`, so this both
    /// creates and overwrites.
    pub async fn upsert_device(&self, device: &DeviceRecord) -> Result<(), Error> {
        debug!(id_hex = %device.id_hex, "upserting device");
        self.post_json_no_response(self.url("api/devices")?, device)
            .await
    }

    /// `DELETE /api/devices/{key}`
    pub async fn delete_device(&self, key: &str) -> Result<(), Error> {
        debug!(key, "deleting device");
        self.delete(self.device_url(key)?).await
    }

    // ── EEP profiles ─────────────────────────────────────────────────

    /// `GET /api/eep`
    pub async fn list_profiles(&self) -> Result<ProfilesResponse, Error> {
        self.get(self.url("api/eep")?).await
    }

    /// `GET /api/suggest/channels?eep={eep}`
    pub async fn suggest_channels(&self, eep: &str) -> Result<SuggestResponse, Error> {
        self.get_with_params(self.url("api/suggest/channels")?, &[("eep", eep)])
            .await
    }

    // ── Import / export ──────────────────────────────────────────────

    /// `POST /api/export` -- asks the add-on to write both YAML files.
    pub async fn export(&self) -> Result<ExportResponse, Error> {
        self.post(self.url("api/export")?).await
    }

    /// `POST /api/import` -- asks the add-on to rebuild its registry from
    /// both YAML files.
    pub async fn import(&self) -> Result<ImportResponse, Error> {
        self.post(self.url("api/import")?).await
    }
}
