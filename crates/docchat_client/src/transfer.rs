use std::time::Duration;

use reqwest::multipart::{Form, Part};
use serde::Serialize;
use url::Url;

use crate::types::ErrorBody;
use crate::{FailureKind, QueryReply, TransferError, UploadFile, UploadReceipt, UPLOAD_FAILED_TEXT};

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: Url,
    /// Both timeouts default to none: a stalled request stays in flight
    /// until the transport itself gives up, and the caller's placeholder
    /// stays visible that long.
    pub connect_timeout: Option<Duration>,
    pub request_timeout: Option<Duration>,
}

impl ClientSettings {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            connect_timeout: None,
            request_timeout: None,
        }
    }
}

/// The two backend operations, behind a trait so tests and alternative
/// transports can stand in for HTTP.
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    async fn upload_document(&self, file: &UploadFile) -> Result<UploadReceipt, TransferError>;

    async fn submit_query(&self, query: &str) -> Result<QueryReply, TransferError>;
}

#[derive(Serialize)]
struct QueryBody<'a> {
    query: &'a str,
}

#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    upload_url: String,
    query_url: String,
}

impl HttpBackend {
    pub fn new(settings: ClientSettings) -> Result<Self, TransferError> {
        let base = settings.base_url.as_str().trim_end_matches('/').to_string();

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| TransferError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            client,
            upload_url: format!("{base}/upload"),
            query_url: format!("{base}/query"),
        })
    }
}

#[async_trait::async_trait]
impl Backend for HttpBackend {
    /// One multipart POST per invocation, no retry. Sequencing a batch is
    /// the caller's responsibility.
    async fn upload_document(&self, file: &UploadFile) -> Result<UploadReceipt, TransferError> {
        let part = Part::bytes(file.bytes.clone()).file_name(file.name.clone());
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<UploadReceipt>()
                .await
                .map_err(map_reqwest_error);
        }

        // Non-2xx: the error body's `message` is used verbatim when
        // present, else the fixed fallback stands in.
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message);
        match message {
            Some(message) => Err(TransferError::new(
                FailureKind::Backend(status.as_u16()),
                message,
            )),
            None => Err(TransferError::new(
                FailureKind::HttpStatus(status.as_u16()),
                UPLOAD_FAILED_TEXT,
            )),
        }
    }

    async fn submit_query(&self, query: &str) -> Result<QueryReply, TransferError> {
        let response = self
            .client
            .post(&self.query_url)
            .json(&QueryBody { query })
            .send()
            .await
            .map_err(map_reqwest_error)?;

        // Only the 2xx envelope is a structured contract; anything else
        // is treated like a transport failure.
        let status = response.status();
        if !status.is_success() {
            return Err(TransferError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        response.json::<QueryReply>().await.map_err(map_reqwest_error)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> TransferError {
    if err.is_timeout() {
        return TransferError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return TransferError::new(FailureKind::MalformedBody, err.to_string());
    }
    TransferError::new(FailureKind::Network, err.to_string())
}
