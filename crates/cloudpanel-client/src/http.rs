//! `reqwest` implementation of [`CloudApi`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONTENT_DISPOSITION, COOKIE, HeaderMap, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use cloudpanel_core::config::server::ServerConfig;
use cloudpanel_core::error::AppError;
use cloudpanel_core::types::{FileId, ShareId, UserId};
use cloudpanel_entity::{
    CodeDocument, DocumentSource, FileRecord, ShareOutcomeBody, ShareRecord, StorageInfo,
    UserMatch,
};

use crate::api::{CloudApi, Download, SharedListing, UploadFile, UploadReceipt};
use crate::csrf::{CSRF_HEADER, CsrfStore, extract_meta_token};
use crate::disposition::filename_from_disposition;
use crate::error::{ClientError, ErrorBody};

/// HTTP client for the cloud-storage server.
#[derive(Debug, Clone)]
pub struct HttpCloudApi {
    client: Client,
    base_url: String,
    csrf_page: String,
    csrf: CsrfStore,
}

impl HttpCloudApi {
    /// Build a client from server settings.
    ///
    /// No timeout is applied unless `request_timeout_seconds` is set.
    pub fn new(config: &ServerConfig) -> Result<Self, AppError> {
        Url::parse(&config.base_url).map_err(|e| {
            AppError::configuration(format!("Invalid base URL '{}': {e}", config.base_url))
        })?;

        let mut headers = HeaderMap::new();
        if let Some(cookie) = config.session_cookie.as_deref().filter(|c| !c.is_empty()) {
            let value = HeaderValue::from_str(cookie)
                .map_err(|e| AppError::configuration(format!("Invalid session cookie: {e}")))?;
            headers.insert(COOKIE, value);
        }

        let mut builder = Client::builder().default_headers(headers);
        if let Some(seconds) = config.request_timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let client = builder
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            csrf_page: config.csrf_page.clone(),
            csrf: CsrfStore::new(config.csrf_token.clone()),
        })
    }

    /// The token store used for mutating requests.
    pub fn csrf(&self) -> &CsrfStore {
        &self.csrf
    }

    /// Make sure an anti-forgery token is known, scraping the configured
    /// page when none is. Returns whether a token is available afterwards.
    pub async fn bootstrap_csrf(&self) -> Result<bool, ClientError> {
        if self.csrf.is_set() {
            return Ok(true);
        }

        let page = self.csrf_page.clone();
        let response = self.execute(self.client.get(self.url(&page)?), &page).await?;
        let html = response.text().await?;
        let token = extract_meta_token(&html);
        if token.is_none() {
            warn!(page = %page, "No csrf-token meta tag found");
        }
        self.csrf.set(token);
        Ok(self.csrf.is_set())
    }

    fn url(&self, path: &str) -> Result<Url, ClientError> {
        Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| ClientError::InvalidUrl(format!("{path}: {e}")))
    }

    /// `prefix` followed by one percent-encoded path segment.
    fn url_with_segment(&self, prefix: &str, segment: &str) -> Result<Url, ClientError> {
        let mut url = self.url(prefix)?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(prefix.to_string()))?
            .push(segment);
        Ok(url)
    }

    fn require_csrf(&self) -> Result<String, ClientError> {
        self.csrf.get().ok_or(ClientError::MissingCsrfToken)
    }

    fn with_optional_csrf(&self, request: RequestBuilder) -> RequestBuilder {
        match self.csrf.get() {
            Some(token) => request.header(CSRF_HEADER, token),
            None => request,
        }
    }

    /// Send a request; non-success statuses become [`ClientError::Rejected`].
    async fn execute(&self, request: RequestBuilder, route: &str) -> Result<Response, ClientError> {
        let response = request.send().await.map_err(|e| {
            warn!(route = %route, error = %e, "Request did not complete");
            ClientError::from(e)
        })?;

        let status = response.status();
        if status.is_success() {
            debug!(route = %route, status = status.as_u16(), "Request completed");
            return Ok(response);
        }

        let raw = response.text().await.unwrap_or_default();
        warn!(route = %route, status = status.as_u16(), "Request rejected");
        Err(ClientError::Rejected {
            status: status.as_u16(),
            body: ErrorBody::parse(raw),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, route: &str) -> Result<T, ClientError> {
        let response = self.execute(self.client.get(url), route).await?;
        Ok(response.json::<T>().await?)
    }

    /// Read the optional `message` of a JSON success body.
    async fn message_of(response: Response) -> Result<Option<String>, ClientError> {
        let raw = response.text().await?;
        if raw.trim().is_empty() {
            return Ok(None);
        }
        let body: Value =
            serde_json::from_str(&raw).map_err(|e| ClientError::Decode(e.to_string()))?;
        Ok(body
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string))
    }

    /// Editor endpoints answer 200 with `{success: false, error}` on failure.
    async fn editor_outcome(response: Response, fallback: &str) -> Result<Option<String>, ClientError> {
        let body: Value = response.json().await?;
        if body.get("success").and_then(Value::as_bool) == Some(true) {
            return Ok(body
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string));
        }
        Err(ClientError::Unsuccessful(
            body.get("error")
                .and_then(Value::as_str)
                .unwrap_or(fallback)
                .to_string(),
        ))
    }
}

#[async_trait]
impl CloudApi for HttpCloudApi {
    async fn list_files(&self) -> Result<Vec<FileRecord>, ClientError> {
        let route = "/cloud/files";
        let body: Value = self.get_json(self.url(route)?, route).await?;
        FileRecord::list_from_value(body).map_err(|e| ClientError::Decode(e.message))
    }

    async fn storage_info(&self) -> Result<StorageInfo, ClientError> {
        let route = "/cloud/storage-info";
        self.get_json(self.url(route)?, route).await
    }

    async fn upload(&self, file: UploadFile) -> Result<UploadReceipt, ClientError> {
        let route = "/cloud/upload";
        let size = file.content.len();
        let part = Part::bytes(file.content.to_vec())
            .file_name(file.file_name.clone())
            .mime_str(&file.mime_type)?;
        let form = Form::new().part("file", part);

        let request = self.with_optional_csrf(self.client.post(self.url(route)?).multipart(form));
        let response = self.execute(request, route).await?;
        let receipt: UploadReceipt = response.json().await?;

        info!(file_name = %file.file_name, size, "File uploaded");
        Ok(receipt)
    }

    async fn delete_file(&self, id: FileId) -> Result<(), ClientError> {
        let token = self.require_csrf()?;
        let route = format!("/cloud/files/{id}");
        let request = self
            .client
            .delete(self.url(&route)?)
            .header(CSRF_HEADER, token)
            .json(&json!({}));
        self.execute(request, &route).await?;

        info!(file_id = %id, "File deleted");
        Ok(())
    }

    async fn download_file(&self, id: FileId) -> Result<Download, ClientError> {
        let route = format!("/cloud/files/{id}/download");
        let response = self.execute(self.client.get(self.url(&route)?), &route).await?;

        let filename = filename_from_disposition(
            response
                .headers()
                .get(CONTENT_DISPOSITION)
                .and_then(|v| v.to_str().ok()),
        );
        let content = response.bytes().await?;

        debug!(file_id = %id, filename = %filename, size = content.len(), "File downloaded");
        Ok(Download { filename, content })
    }

    async fn search_users(&self, query: &str) -> Result<Vec<UserMatch>, ClientError> {
        let route = "/cloud/files/search-users";
        let mut url = self.url(route)?;
        url.query_pairs_mut().append_pair("query", query);

        let request = self.with_optional_csrf(self.client.get(url));
        let response = self.execute(request, route).await?;
        Ok(response.json().await?)
    }

    async fn share_file(
        &self,
        id: FileId,
        recipients: &[UserId],
    ) -> Result<ShareOutcomeBody, ClientError> {
        let token = self.require_csrf()?;
        let route = format!("/cloud/files/{id}/share");
        let request = self
            .client
            .post(self.url(&route)?)
            .header(CSRF_HEADER, token)
            .json(&json!({ "recipient_ids": recipients }));
        let response = self.execute(request, &route).await?;
        let body: ShareOutcomeBody = response.json().await?;

        info!(
            file_id = %id,
            recipients = recipients.len(),
            created = body.shared_files.len(),
            "File shared"
        );
        Ok(body)
    }

    async fn list_shared(&self) -> Result<SharedListing, ClientError> {
        let route = "/cloud/files/shared";
        let body: Value = self.get_json(self.url(route)?, route).await?;
        let (records, skipped) =
            ShareRecord::list_from_value(body).map_err(|e| ClientError::Decode(e.message))?;
        Ok(SharedListing { records, skipped })
    }

    async fn accept_share(&self, id: ShareId) -> Result<Option<String>, ClientError> {
        let token = self.require_csrf()?;
        let route = format!("/cloud/files/shared/{id}/accept");
        let request = self
            .client
            .post(self.url(&route)?)
            .header(CSRF_HEADER, token);
        let response = self.execute(request, &route).await?;

        info!(share_id = %id, "Share accepted");
        Self::message_of(response).await
    }

    async fn reject_share(&self, id: ShareId) -> Result<Option<String>, ClientError> {
        let token = self.require_csrf()?;
        let route = format!("/cloud/files/shared/{id}/reject");
        let request = self
            .client
            .post(self.url(&route)?)
            .header(CSRF_HEADER, token);
        let response = self.execute(request, &route).await?;

        info!(share_id = %id, "Share rejected");
        Self::message_of(response).await
    }

    async fn list_documents(&self, source: DocumentSource) -> Result<Vec<String>, ClientError> {
        match source {
            DocumentSource::Cloud => Ok(self
                .list_files()
                .await?
                .into_iter()
                .map(|file| file.filename)
                .collect()),
            DocumentSource::Code => {
                let route = "/cloud/code/list";
                self.get_json(self.url(route)?, route).await
            }
        }
    }

    async fn load_document(
        &self,
        source: DocumentSource,
        filename: &str,
    ) -> Result<CodeDocument, ClientError> {
        let (url, route) = match source {
            DocumentSource::Cloud => {
                let mut url = self.url("/cloud/file/content")?;
                url.query_pairs_mut().append_pair("filename", filename);
                (url, "/cloud/file/content")
            }
            DocumentSource::Code => (
                self.url_with_segment("/cloud/code/load", filename)?,
                "/cloud/code/load",
            ),
        };
        let body: Value = self.get_json(url, route).await?;
        Ok(CodeDocument::from_load_body(filename, &body))
    }

    async fn save_document(
        &self,
        source: DocumentSource,
        document: &CodeDocument,
    ) -> Result<Option<String>, ClientError> {
        let token = self.require_csrf()?;
        let route = match source {
            DocumentSource::Cloud => "/cloud/file/save",
            DocumentSource::Code => "/cloud/code/save",
        };
        let request = self
            .client
            .post(self.url(route)?)
            .header(CSRF_HEADER, token)
            .json(document);
        let response = self.execute(request, route).await?;

        info!(source = %source, filename = %document.filename, "Document saved");
        Self::editor_outcome(response, "Unknown save error").await
    }

    async fn delete_document(
        &self,
        source: DocumentSource,
        filename: &str,
    ) -> Result<Option<String>, ClientError> {
        let token = self.require_csrf()?;
        let prefix = match source {
            DocumentSource::Cloud => "/cloud/file/delete",
            DocumentSource::Code => "/cloud/code/delete",
        };
        let request = self
            .client
            .delete(self.url_with_segment(prefix, filename)?)
            .header(CSRF_HEADER, token);
        let response = self.execute(request, prefix).await?;

        info!(source = %source, filename = %filename, "Document deleted");
        Self::editor_outcome(response, "Unknown delete error").await
    }
}
