use std::time::Duration;

use reqwest::multipart::{Form, Part};
use url::Url;

use crate::{DocumentUpload, FinalizeRequest, ParseResponse, RequestError};

pub const PARSE_PATH: &str = "/parse-document";
pub const FINALIZE_PATH: &str = "/finalize-parsed-fields";

const DEFAULT_BASE_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub base_url: Url,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url"),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[async_trait::async_trait]
pub trait ParseService: Send + Sync {
    /// Submits the document for parsing and returns the extracted fields.
    async fn parse_document(
        &self,
        upload: &DocumentUpload,
        document_type: &str,
    ) -> Result<ParseResponse, RequestError>;

    /// Commits the reviewed field values.
    async fn finalize_fields(&self, request: &FinalizeRequest) -> Result<(), RequestError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestParseService {
    settings: ServiceSettings,
}

impl ReqwestParseService {
    pub fn new(settings: ServiceSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, RequestError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| RequestError::Network(err.to_string()))
    }

    fn endpoint(&self, path: &str) -> Result<Url, RequestError> {
        self.settings
            .base_url
            .join(path)
            .map_err(|err| RequestError::Network(err.to_string()))
    }
}

#[async_trait::async_trait]
impl ParseService for ReqwestParseService {
    async fn parse_document(
        &self,
        upload: &DocumentUpload,
        document_type: &str,
    ) -> Result<ParseResponse, RequestError> {
        let client = self.build_client()?;
        let endpoint = self.endpoint(PARSE_PATH)?;

        let part = Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str(&upload.media_type)
            .map_err(|err| RequestError::Network(err.to_string()))?;
        let form = Form::new()
            .part("file", part)
            .text("document_type", document_type.to_string());

        let response = client
            .post(endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let response = check_status(response).await?;
        response
            .json::<ParseResponse>()
            .await
            .map_err(|err| RequestError::Decode(err.to_string()))
    }

    async fn finalize_fields(&self, request: &FinalizeRequest) -> Result<(), RequestError> {
        let client = self.build_client()?;
        let endpoint = self.endpoint(FINALIZE_PATH)?;

        let response = client
            .post(endpoint)
            .json(request)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        // A 2xx settles the operation; the response body is never interpreted.
        check_status(response).await?;
        Ok(())
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, RequestError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    // Read the body as diagnostic text for the error report.
    let body = response.text().await.unwrap_or_default();
    Err(RequestError::Status {
        status: status.as_u16(),
        body,
    })
}

fn map_reqwest_error(err: reqwest::Error) -> RequestError {
    if err.is_timeout() {
        return RequestError::Timeout;
    }
    RequestError::Network(err.to_string())
}
