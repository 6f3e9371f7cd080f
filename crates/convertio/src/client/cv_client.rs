//! Convertio API client implementation.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use super::{ConvertioConfig, Endpoint};
use crate::request::{
    DeleteCancel, DirectFileUpload, GetResult, GetStatus, ListConversions, NewConversion,
    Parameters, UploadSource,
};
use crate::response::{
    self, DeleteCancelResponse, DirectFileResponse, GetResultResponse, GetStatusResponse,
    ListConversionResponse, NewConversionResponse, SuccessBody,
};
use crate::transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
use crate::{Result, TRACING_TARGET_CLIENT};

/// Content type the service expects on create and list requests.
///
/// The body itself is JSON.
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Content type of direct upload bodies.
const UPLOAD_CONTENT_TYPE: &str = "application/octet-stream";

/// Request body carrying the API key next to the endpoint parameters.
#[derive(Serialize)]
struct Authenticated<'a, P> {
    apikey: &'a str,
    #[serde(flatten)]
    params: &'a P,
}

struct ConvertioClientInner {
    transport: Arc<dyn Transport>,
    config: ConvertioConfig,
    base_url: Url,
}

impl std::fmt::Debug for ConvertioClientInner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConvertioClientInner")
            .field("config", &self.config)
            .field("transport", &self.transport)
            .finish_non_exhaustive()
    }
}

/// Client for the Convertio file conversion API.
///
/// Each operation validates its parameters, performs one HTTP exchange (two
/// for an upload from a URL) and parses the response into a typed record.
/// Nothing is retried. The client holds only immutable state, so clones are
/// cheap and may be used concurrently.
///
/// # Examples
///
/// ```rust,ignore
/// use convertio::request::{GetStatus, NewConversion};
/// use convertio::{ConvertioClient, ConvertioConfig};
///
/// let client = ConvertioClient::new(ConvertioConfig::new("your-api-key"))?;
///
/// let created = client
///     .new_conversion(NewConversion::from_url("https://example.com/scan.png", "pdf"))
///     .await?;
/// let status = client.get_conversion_status(GetStatus::new(created.data.id)).await?;
/// println!("{}: {}%", status.data.step, status.data.step_percent);
/// ```
#[derive(Clone, Debug)]
pub struct ConvertioClient {
    inner: Arc<ConvertioClientInner>,
}

impl ConvertioClient {
    /// Creates a client backed by a reqwest transport.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the API key is empty, the base URL is
    /// invalid or the HTTP client cannot be built.
    ///
    /// [`Error::Config`]: crate::Error::Config
    pub fn new(config: ConvertioConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Self::with_transport(config, transport)
    }

    /// Creates a client sending its requests through `transport`.
    pub fn with_transport(
        config: ConvertioConfig,
        transport: impl Transport + 'static,
    ) -> Result<Self> {
        let base_url = config.validate()?;

        debug!(
            target: TRACING_TARGET_CLIENT,
            base_url = %base_url,
            timeout = ?config.effective_timeout(),
            "Convertio client initialized"
        );

        let inner = ConvertioClientInner {
            transport: Arc::new(transport),
            config,
            base_url,
        };

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Gets the client configuration.
    pub fn config(&self) -> &ConvertioConfig {
        &self.inner.config
    }

    /// Gets the parsed base URL.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Starts a new conversion.
    ///
    /// Returns the id of the new job and the API minutes left on the balance.
    pub async fn new_conversion(&self, params: NewConversion) -> Result<NewConversionResponse> {
        let params = params.checked()?;
        let endpoint = Endpoint::NewConversion;
        let request = self.authenticated_request(&endpoint, &params)?;

        let response = self.dispatch(&endpoint, request, payload(&params)).await?;
        self.parse(&endpoint, &response)
    }

    /// Uploads the input file of a conversion started with the `upload` input method.
    ///
    /// With [`UploadSource::Url`] the file is first downloaded through the
    /// transport, then forwarded as the raw request body.
    pub async fn direct_file_upload(&self, params: DirectFileUpload) -> Result<DirectFileResponse> {
        let params = params.checked()?;
        let endpoint = Endpoint::DirectFileUpload {
            id: &params.id,
            filename: &params.filename,
        };
        let url = endpoint.url(&self.inner.base_url)?;

        let content = match &params.source {
            UploadSource::Bytes(content) => content.clone(),
            UploadSource::Url(source) => {
                debug!(
                    target: TRACING_TARGET_CLIENT,
                    id = %params.id,
                    source = %source,
                    "Fetching upload source"
                );

                self.inner.transport.fetch(source).await.map_err(|e| {
                    warn!(
                        target: TRACING_TARGET_CLIENT,
                        endpoint = endpoint.name(),
                        source = %source,
                        error = %e,
                        "Failed to fetch upload source"
                    );
                    e
                })?
            }
        };

        let summary = serde_json::json!({
            "id": params.id,
            "filename": params.filename,
            "size": content.len(),
        });
        let request = HttpRequest::new(endpoint.method(), url)
            .with_header("Content-Type", UPLOAD_CONTENT_TYPE)
            .with_body(content);

        let response = self
            .dispatch(&endpoint, request, summary.to_string())
            .await?;
        self.parse(&endpoint, &response)
    }

    /// Gets the current step and progress of a conversion.
    pub async fn get_conversion_status(&self, params: GetStatus) -> Result<GetStatusResponse> {
        let params = params.checked()?;
        let endpoint = Endpoint::GetStatus { id: &params.id };
        let request = HttpRequest::new(endpoint.method(), endpoint.url(&self.inner.base_url)?);

        let response = self.dispatch(&endpoint, request, payload(&params)).await?;
        self.parse(&endpoint, &response)
    }

    /// Downloads the converted file.
    ///
    /// The content is decoded from base64 before being returned.
    pub async fn get_result_file(&self, params: GetResult) -> Result<GetResultResponse> {
        let params = params.checked()?;
        let endpoint = Endpoint::GetResult {
            id: &params.id,
            encoding: params.encoding,
        };
        let request = HttpRequest::new(endpoint.method(), endpoint.url(&self.inner.base_url)?);

        let response = self.dispatch(&endpoint, request, payload(&params)).await?;
        let result = response::parse_result_response(response.status, &response.body);
        self.settle(&endpoint, result)
    }

    /// Deletes a finished conversion or cancels a running one.
    pub async fn delete_or_cancel_conversion(
        &self,
        params: DeleteCancel,
    ) -> Result<DeleteCancelResponse> {
        let params = params.checked()?;
        let endpoint = Endpoint::DeleteCancel { id: &params.id };
        let request = HttpRequest::new(endpoint.method(), endpoint.url(&self.inner.base_url)?);

        let response = self.dispatch(&endpoint, request, payload(&params)).await?;
        self.parse(&endpoint, &response)
    }

    /// Lists the latest conversions, optionally filtered by status.
    pub async fn list_conversions(
        &self,
        params: ListConversions,
    ) -> Result<ListConversionResponse> {
        let params = params.checked()?;
        let endpoint = Endpoint::ListConversions;
        let request = self.authenticated_request(&endpoint, &params)?;

        let response = self.dispatch(&endpoint, request, payload(&params)).await?;
        self.parse(&endpoint, &response)
    }

    /// Builds a request whose JSON body carries the API key and `params`.
    fn authenticated_request<P: Serialize>(
        &self,
        endpoint: &Endpoint<'_>,
        params: &P,
    ) -> Result<HttpRequest> {
        let body = serde_json::to_vec(&Authenticated {
            apikey: &self.inner.config.api_key,
            params,
        })?;

        let request = HttpRequest::new(endpoint.method(), endpoint.url(&self.inner.base_url)?)
            .with_header("Content-Type", FORM_CONTENT_TYPE)
            .with_body(body);
        Ok(request)
    }

    /// Sends one request, logging it without the API key.
    async fn dispatch(
        &self,
        endpoint: &Endpoint<'_>,
        request: HttpRequest,
        payload: String,
    ) -> Result<HttpResponse> {
        debug!(
            target: TRACING_TARGET_CLIENT,
            endpoint = endpoint.name(),
            method = %request.method,
            url = %request.url,
            payload = %payload,
            "Sending request"
        );

        let response = self.inner.transport.send(request).await.map_err(|e| {
            warn!(
                target: TRACING_TARGET_CLIENT,
                endpoint = endpoint.name(),
                error = %e,
                "Request failed"
            );
            e
        })?;

        debug!(
            target: TRACING_TARGET_CLIENT,
            endpoint = endpoint.name(),
            status = response.status,
            url = %response.url,
            "Response received"
        );

        Ok(response)
    }

    fn parse<T: SuccessBody>(&self, endpoint: &Endpoint<'_>, response: &HttpResponse) -> Result<T> {
        let result = response::parse_response(response.status, &response.body);
        self.settle(endpoint, result)
    }

    /// Logs a failed outcome and passes the result through.
    fn settle<T>(&self, endpoint: &Endpoint<'_>, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            warn!(
                target: TRACING_TARGET_CLIENT,
                endpoint = endpoint.name(),
                category = e.category(),
                error = %e,
                "Request unsuccessful"
            );
        }
        result
    }
}

/// Serializes parameters for log records.
fn payload<P: Serialize>(params: &P) -> String {
    serde_json::to_string(params).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use serde_json::{Value, json};

    use super::*;
    use crate::Error;
    use crate::error::{SchemaErrorKind, TransportError, TransportErrorKind};
    use crate::mock::MockTransport;
    use crate::request::{OcrOptions, OcrSettings};
    use crate::response::ErrorEnvelope;
    use crate::transport::Method;
    use crate::types::{
        ConversionStep, InputMethod, JobStatus, Language, ResultEncoding, StatusFilter,
    };

    const ID: &str = "9712d01edc82e49c68d58ae6346d2013";

    fn client() -> (ConvertioClient, MockTransport) {
        let transport = MockTransport::new();
        let client =
            ConvertioClient::with_transport(ConvertioConfig::new("test-key"), transport.clone())
                .unwrap();
        (client, transport)
    }

    fn body(request: &HttpRequest) -> Value {
        let bytes = request.body.as_deref().unwrap();
        serde_json::from_slice(bytes).unwrap()
    }

    fn error_body(code: u16, message: &str) -> Value {
        json!({"code": code, "status": "error", "error": message})
    }

    fn assert_service_error(err: Error, code: u16, message: &str) {
        let expected = ErrorEnvelope::new(code, message);
        assert_eq!(err.service_error(), Some(&expected));
    }

    #[test]
    fn test_client_rejects_empty_api_key() {
        let err = ConvertioClient::with_transport(ConvertioConfig::new(""), MockTransport::new())
            .unwrap_err();
        assert_eq!(err.category(), "config");
    }

    #[tokio::test]
    async fn test_new_conversion_success() {
        let (client, transport) = client();
        transport.respond(
            200,
            json!({"code": 200, "status": "ok", "data": {"id": ID, "minutes": 994}}),
        );

        let params = NewConversion::from_url("http://file_url", "png");
        let response = client.new_conversion(params).await.unwrap();
        assert_eq!(response.data.id.as_str(), ID);
        assert_eq!(response.data.minutes, 994);

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.url.as_str(), "http://api.convertio.co/convert");
        assert_eq!(request.header("content-type"), Some(FORM_CONTENT_TYPE));
        assert_eq!(
            body(request),
            json!({
                "apikey": "test-key",
                "input": "url",
                "file": "http://file_url",
                "outputformat": "png"
            })
        );
    }

    #[tokio::test]
    async fn test_new_conversion_with_ocr_options() {
        let (client, transport) = client();
        transport.respond(
            200,
            json!({"code": 200, "status": "ok", "data": {"id": ID, "minutes": 10}}),
        );

        let settings = OcrSettings::new([Language::English, Language::German])
            .with_page_nums("1-3,5");
        let options = OcrOptions::default()
            .with_enabled(true)
            .with_settings(settings);
        let params = NewConversion::base64(b"%PDF-1.4", "scan.pdf", "txt").with_options(options);
        client.new_conversion(params).await.unwrap();

        let sent = body(&transport.requests()[0]);
        assert_eq!(sent["input"], "base64");
        assert_eq!(sent["filename"], "scan.pdf");
        assert_eq!(sent["file"], "JVBERi0xLjQ=");
        assert_eq!(
            sent["options"],
            json!({
                "ocr_enabled": true,
                "ocr_settings": {"page_nums": "1-3,5", "langs": ["eng", "deu"]}
            })
        );
    }

    #[tokio::test]
    async fn test_new_conversion_fail() {
        let (client, transport) = client();
        transport.respond(401, error_body(401, "This API Key is invalid"));

        let err = client
            .new_conversion(NewConversion::from_url("http://file_url", "png"))
            .await
            .unwrap_err();
        assert_service_error(err, 401, "This API Key is invalid");
    }

    #[tokio::test]
    async fn test_invalid_parameters_send_nothing() {
        let (client, transport) = client();

        let params = NewConversion::new("content", "png").with_input(InputMethod::Raw);
        let err = client.new_conversion(params).await.unwrap_err();
        let schema = err.schema_error().unwrap();
        assert_eq!(schema.kind, SchemaErrorKind::Missing);
        assert_eq!(schema.field.as_deref(), Some("filename"));

        let err = client
            .list_conversions(ListConversions::latest(0))
            .await
            .unwrap_err();
        assert!(err.is_schema());

        let err = client
            .get_conversion_status(GetStatus::new(""))
            .await
            .unwrap_err();
        assert!(err.is_schema());

        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_direct_file_upload_from_url() {
        let (client, transport) = client();
        let source = Url::parse("https://files.example.com/test.bmp").unwrap();
        transport.with_source(source.clone(), b"BM-image".as_slice());
        transport.respond(
            200,
            json!({
                "code": 200,
                "status": "ok",
                "data": {"id": ID, "file": "test.bmp", "size": "1025470"}
            }),
        );

        let params = DirectFileUpload::from_url(ID, "test.bmp", source.clone());
        let response = client.direct_file_upload(params).await.unwrap();
        assert_eq!(response.data.file, "test.bmp");
        assert_eq!(response.data.size, 1_025_470);

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].method, Method::GET);
        assert_eq!(requests[0].url, source);

        let upload = &requests[1];
        assert_eq!(upload.method, Method::PUT);
        assert_eq!(
            upload.url.as_str(),
            format!("http://api.convertio.co/convert/{ID}/test.bmp")
        );
        assert_eq!(upload.body, Some(Bytes::from_static(b"BM-image")));
        assert_eq!(upload.header("Content-Type"), Some(UPLOAD_CONTENT_TYPE));
    }

    #[tokio::test]
    async fn test_direct_file_upload_from_bytes() {
        let (client, transport) = client();
        transport.respond(
            200,
            json!({
                "code": 200,
                "status": "ok",
                "data": {"id": ID, "file": "notes.txt", "size": "5"}
            }),
        );

        let params = DirectFileUpload::from_bytes(ID, "notes.txt", b"hello".as_slice());
        client.direct_file_upload(params).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].body, Some(Bytes::from_static(b"hello")));
    }

    #[tokio::test]
    async fn test_direct_file_upload_fail() {
        let (client, transport) = client();
        transport.respond(404, error_body(404, "Conversion not found"));

        let params = DirectFileUpload::from_bytes(ID, "test.bmp", b"BM".as_slice());
        let err = client.direct_file_upload(params).await.unwrap_err();
        assert_service_error(err, 404, "Conversion not found");
    }

    #[tokio::test]
    async fn test_direct_file_upload_source_failure() {
        let (client, transport) = client();
        transport.respond_raw(404, "Not Found");

        let source = Url::parse("https://files.example.com/missing.bmp").unwrap();
        let params = DirectFileUpload::from_url(ID, "missing.bmp", source);
        let err = client.direct_file_upload(params).await.unwrap_err();

        match err {
            Error::Transport(e) => assert_eq!(e.kind, TransportErrorKind::Status),
            other => panic!("expected transport error, got {other:?}"),
        }
        // Nothing was uploaded after the failed fetch.
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_get_conversion_status_success() {
        let (client, transport) = client();
        transport.respond(
            200,
            json!({
                "code": 200,
                "status": "ok",
                "data": {
                    "id": ID,
                    "step": "finish",
                    "step_percent": 100,
                    "minutes": 1,
                    "output": {
                        "url": "https://lisa.convertio.me/d31c0ed50efd097e34c6b23fa555445d/result.png",
                        "size": "36102"
                    }
                }
            }),
        );

        let response = client
            .get_conversion_status(GetStatus::new(ID))
            .await
            .unwrap();
        assert_eq!(response.data.step, ConversionStep::Finish);
        assert!(response.data.step.is_finished());
        assert_eq!(response.data.output.size, 36102);

        let request = &transport.requests()[0];
        assert_eq!(request.method, Method::GET);
        assert_eq!(
            request.url.as_str(),
            format!("http://api.convertio.co/convert/{ID}/status")
        );
        assert!(request.body.is_none());
    }

    #[tokio::test]
    async fn test_get_conversion_status_fail() {
        let (client, transport) = client();
        transport.respond(404, error_body(404, "No convertion found"));

        let err = client
            .get_conversion_status(GetStatus::new(ID))
            .await
            .unwrap_err();
        assert_service_error(err, 404, "No convertion found");
    }

    #[tokio::test]
    async fn test_get_result_file_success() {
        let (client, transport) = client();
        transport.respond(
            200,
            json!({
                "code": 200,
                "status": "ok",
                "data": {"id": ID, "encode": "base64", "content": "X0ZJTEVfQ09OVEVOVF8="}
            }),
        );

        let response = client.get_result_file(GetResult::new(ID)).await.unwrap();
        assert_eq!(response.data.content.as_ref(), b"_FILE_CONTENT_");
        assert_eq!(
            transport.requests()[0].url.as_str(),
            format!("http://api.convertio.co/convert/{ID}/dl/base64")
        );
    }

    #[tokio::test]
    async fn test_get_result_file_default_encoding_path() {
        let (client, transport) = client();
        transport.respond(
            200,
            json!({"code": 200, "status": "ok", "data": {"id": ID, "content": ""}}),
        );

        let params = GetResult::new(ID).with_encoding(ResultEncoding::Default);
        let response = client.get_result_file(params).await.unwrap();
        assert!(response.data.is_empty());
        assert_eq!(
            transport.requests()[0].url.as_str(),
            format!("http://api.convertio.co/convert/{ID}/dl")
        );
    }

    #[tokio::test]
    async fn test_get_result_file_fail() {
        let (client, transport) = client();
        transport.respond(422, error_body(422, "File not ready"));

        let err = client
            .get_result_file(GetResult::new(ID))
            .await
            .unwrap_err();
        assert_service_error(err, 422, "File not ready");
    }

    #[tokio::test]
    async fn test_delete_or_cancel_conversion_success() {
        let (client, transport) = client();
        transport.respond(
            200,
            json!({"code": 200, "status": "ok", "message": "File deleted"}),
        );

        let response = client
            .delete_or_cancel_conversion(DeleteCancel::new(ID))
            .await
            .unwrap();
        assert_eq!(response.message, "File deleted");

        let request = &transport.requests()[0];
        assert_eq!(request.method, Method::DELETE);
        assert_eq!(
            request.url.as_str(),
            format!("http://api.convertio.co/convert/{ID}")
        );
    }

    #[tokio::test]
    async fn test_delete_or_cancel_conversion_fail() {
        let (client, transport) = client();
        transport.respond(404, error_body(404, "No convertion found"));

        let err = client
            .delete_or_cancel_conversion(DeleteCancel::new(ID))
            .await
            .unwrap_err();
        assert_service_error(err, 404, "No convertion found");
    }

    #[tokio::test]
    async fn test_list_conversions_success() {
        let (client, transport) = client();
        transport.respond(
            200,
            json!({
                "code": 200,
                "status": "ok",
                "data": [
                    {
                        "id": "5ad5ea6f719178beff43cca991ed1109",
                        "status": "finished",
                        "minutes": 1,
                        "inputformat": "PNG",
                        "outputformat": "JPEG",
                        "filename": "SCAN_20140710_090651322.png"
                    }
                ]
            }),
        );

        let params = ListConversions::new(StatusFilter::Finished, 1);
        let response = client.list_conversions(params).await.unwrap();
        assert_eq!(response.data.len(), 1);
        assert_eq!(response.data[0].status, JobStatus::Finished);
        assert!(response.data[0].error.is_none());

        let request = &transport.requests()[0];
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.url.as_str(), "http://api.convertio.co/convert/list");
        assert_eq!(request.header("Content-Type"), Some(FORM_CONTENT_TYPE));
        assert_eq!(
            body(request),
            json!({"apikey": "test-key", "status": "finished", "count": 1})
        );
    }

    #[tokio::test]
    async fn test_list_conversions_fail() {
        let (client, transport) = client();
        transport.respond(401, error_body(401, "This API Key is invalid"));

        let err = client
            .list_conversions(ListConversions::latest(4))
            .await
            .unwrap_err();
        assert_service_error(err, 401, "This API Key is invalid");
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let (client, transport) = client();
        transport.fail(TransportError::timeout().with_message("operation timed out"));

        let err = client
            .get_conversion_status(GetStatus::new(ID))
            .await
            .unwrap_err();
        match err {
            Error::Transport(e) => assert!(e.is_timeout()),
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_schema_error() {
        let (client, transport) = client();
        transport.respond_raw(502, "<html>Bad Gateway</html>");

        let err = client
            .delete_or_cancel_conversion(DeleteCancel::new(ID))
            .await
            .unwrap_err();
        assert_eq!(err.schema_error().unwrap().kind, SchemaErrorKind::Malformed);
    }
}
