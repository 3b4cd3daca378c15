//! Multipart file uploads, used for KYC document submission.

use std::path::Path;
use std::sync::Arc;

use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::client::{HttpClient, Request};
use crate::error::Error;
use crate::response::Envelope;

/// Upload result payload. The shape varies with the file category, so the
/// raw JSON is kept as-is.
#[derive(Debug, Clone, Deserialize)]
pub struct FileUpload(pub serde_json::Value);

#[derive(Debug)]
pub struct FilesApi {
    http: Arc<HttpClient>,
}

impl FilesApi {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Upload a file from disk on behalf of `account_id`.
    pub async fn upload(
        &self,
        path: impl AsRef<Path>,
        account_id: &str,
    ) -> Result<FileUpload, Error> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| Error::validation("path has no file name"))?;
        let contents = tokio::fs::read(path)
            .await
            .map_err(|err| Error::validation(format!("failed to read {}: {err}", path.display())))?;
        self.upload_bytes(file_name, contents, account_id).await
    }

    /// Upload in-memory bytes as a named file.
    pub async fn upload_bytes(
        &self,
        file_name: impl Into<String>,
        contents: Vec<u8>,
        account_id: &str,
    ) -> Result<FileUpload, Error> {
        if account_id.is_empty() {
            return Err(Error::validation("account_id must not be empty"));
        }
        let form = Form::new()
            .part("files", Part::bytes(contents).file_name(file_name.into()))
            .text("accountId", account_id.to_string());
        let request = Request::post("/open-api/v3/files/upload")
            .multipart(form)
            .authenticated();
        let envelope: Envelope<FileUpload> = self.http.execute(request).await?;
        envelope.into_data()
    }

    /// Upload several files in a single form submission.
    pub async fn upload_many(
        &self,
        files: Vec<(String, Vec<u8>)>,
        account_id: &str,
    ) -> Result<FileUpload, Error> {
        if files.is_empty() {
            return Err(Error::validation("at least one file is required"));
        }
        if account_id.is_empty() {
            return Err(Error::validation("account_id must not be empty"));
        }
        let mut form = Form::new();
        for (file_name, contents) in files {
            form = form.part("files", Part::bytes(contents).file_name(file_name));
        }
        form = form.text("accountId", account_id.to_string());
        let request = Request::post("/open-api/v3/files/upload")
            .multipart(form)
            .authenticated();
        let envelope: Envelope<FileUpload> = self.http.execute(request).await?;
        envelope.into_data()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[tokio::test]
    async fn upload_bytes_rejects_empty_account_id() {
        let http = Arc::new(HttpClient::new(&Config::sandbox()).unwrap());
        let api = FilesApi::new(http);
        let err = api
            .upload_bytes("id.png", vec![1, 2, 3], "")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}
