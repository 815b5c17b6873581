//! The transaction client: endpoint resolution, header assembly, payload
//! dispatch, and response classification.

use std::time::Duration;

use http::header::{self, HeaderMap, HeaderName, HeaderValue};
use mpower::products::{DirectCard, DirectPay, Invoice, InvoiceStatus, Opr, OprCharge};
use mpower::{
    Config, GatewayResponse, Mode, Operation, Payload, TransactionOutcome, TransportFailure,
};
use reqwest::{Client, StatusCode};
use url::Url;

use crate::constants;
use crate::error::{InvalidHeader, TransactionError};

/// HTTP client for the MPower Payments gateway.
///
/// Owns everything a transaction needs: the injected [`Config`], endpoint
/// resolution for the configured [`Mode`], header assembly, payload
/// dispatch, and response classification. Product types stay pure data and
/// delegate here through [`Operation`].
///
/// Each transaction is a single synchronous exchange: one request, one
/// classified outcome. There are no retries and no caching; a timeout
/// exists only when set with [`with_timeout`](Self::with_timeout).
///
/// Cloning is cheap (the underlying connection pool is shared), so callers
/// wanting per-product custom headers can clone one client per product
/// instance.
///
/// # Example
///
/// ```rust,no_run
/// use mpower::products::{Invoice, InvoiceItem};
/// use mpower::{Config, Credentials};
/// use mpower_http::TransactionClient;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), mpower_http::TransactionError> {
/// let config = Config::sandbox(Credentials::new("master", "private", "token"));
/// let client = TransactionClient::new(config);
///
/// let invoice = Invoice::new()
///     .with_item(InvoiceItem::new("VIP ticket", 2, 35.0, 70.0))
///     .with_total_amount(70.0);
/// match client.create_invoice(&invoice).await? {
///     mpower::TransactionOutcome::Success(body) => {
///         println!("checkout token: {:?}", body.field("token"));
///     }
///     outcome => println!("not accepted: {outcome:?}"),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TransactionClient {
    /// Immutable configuration injected at construction.
    config: Config,
    /// Explicit base URL override; `None` resolves from the mode.
    base_url: Option<Url>,
    /// Shared reqwest HTTP client.
    client: Client,
    /// Custom headers sent with every request, winning on collision.
    headers: HeaderMap,
    /// Optional per-request timeout.
    timeout: Option<Duration>,
}

impl TransactionClient {
    /// Creates a client for the given configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            base_url: None,
            client: Client::new(),
            headers: HeaderMap::new(),
            timeout: None,
        }
    }

    /// Returns the configuration this client was built with.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the custom headers attached to every request.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the configured timeout, if any.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Replaces the custom header set.
    ///
    /// Custom headers win over the fixed and credential headers on name
    /// collision.
    #[must_use]
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Sets a per-request timeout. There is none by default.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Overrides the mode-derived base URL.
    ///
    /// Meant for tests and self-hosted gateways; the URL should end with a
    /// trailing slash when it carries a path, so resource joining keeps it.
    #[must_use]
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Adds one custom header, overriding any previous value under the
    /// same name.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHeader`] when the name or value is not valid HTTP
    /// header material; the existing headers are left unchanged.
    pub fn add_header(&mut self, name: &str, value: &str) -> Result<(), InvalidHeader> {
        let name: HeaderName = name.parse()?;
        let value: HeaderValue = value.parse()?;
        self.headers.insert(name, value);
        Ok(())
    }

    /// Resolves the full URL for a gateway resource.
    ///
    /// The base is the sandbox endpoint in [`Mode::Sandbox`] and the live
    /// endpoint otherwise, unless overridden with
    /// [`with_base_url`](Self::with_base_url). Resolved fresh per request.
    ///
    /// # Errors
    ///
    /// Returns [`TransactionError::UrlParse`] if the joined URL is invalid.
    pub fn endpoint(&self, resource: &str) -> Result<Url, TransactionError> {
        let base = match &self.base_url {
            Some(url) => url.clone(),
            None => {
                let base = match self.config.mode {
                    Mode::Sandbox => constants::SANDBOX_ENDPOINT,
                    Mode::Live => constants::LIVE_ENDPOINT,
                };
                Url::parse(base).map_err(|e| TransactionError::UrlParse {
                    context: format!("failed to parse base endpoint `{base}`"),
                    source: e,
                })?
            }
        };
        base.join(resource).map_err(|e| TransactionError::UrlParse {
            context: format!("failed to construct endpoint for `{resource}`"),
            source: e,
        })
    }

    /// Assembles the full header set: fixed headers, then credentials,
    /// then custom headers, later entries winning on collision.
    fn request_headers(&self) -> Result<HeaderMap, InvalidHeader> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            HeaderValue::from_static(constants::USER_AGENT),
        );
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        let credentials = &self.config.credentials;
        for (name, value) in [
            (constants::MASTER_KEY_HEADER, &credentials.master_key),
            (constants::PRIVATE_KEY_HEADER, &credentials.private_key),
            (constants::TOKEN_HEADER, &credentials.token),
        ] {
            let Some(value) = value else { continue };
            let name =
                HeaderName::from_bytes(name.as_bytes()).expect("credential header names are valid");
            headers.insert(name, HeaderValue::from_str(value)?);
        }

        for (name, value) in &self.headers {
            headers.insert(name.clone(), value.clone());
        }
        Ok(headers)
    }

    /// Executes one transaction against the gateway.
    ///
    /// A non-empty `payload` is sent as a POST with the payload
    /// JSON-encoded as the body; an empty one as a GET with the payload
    /// carried as query parameters. The reply is classified into a
    /// [`TransactionOutcome`]: any non-200 status becomes
    /// [`TransactionOutcome::TransportFailure`], and a 200 body is decoded
    /// and split on `response_code`. Single attempt, no retries.
    ///
    /// # Errors
    ///
    /// - [`TransactionError::Transport`] on network-level failure
    /// - [`TransactionError::Decode`] when a 200 body is not a gateway reply
    /// - [`TransactionError::UrlParse`] / [`TransactionError::Header`] when
    ///   the request cannot be assembled
    #[cfg_attr(
        feature = "telemetry",
        tracing::instrument(
            name = "mpower.transaction",
            skip(self, payload),
            fields(otel.status_code)
        )
    )]
    pub async fn process(
        &self,
        resource: &str,
        payload: &Payload,
    ) -> Result<TransactionOutcome, TransactionError> {
        let result = self.dispatch(resource, payload).await;
        record_outcome_on_span(&result);
        result
    }

    /// Validates an operation, builds its payload, and processes it.
    ///
    /// Every product operation funnels through here; outcomes come back
    /// unchanged from [`process`](Self::process).
    ///
    /// # Errors
    ///
    /// Returns [`TransactionError::Validation`] when a mandatory field is
    /// absent, before any request is sent; otherwise the errors of
    /// [`process`](Self::process).
    pub async fn execute<O: Operation>(
        &self,
        operation: &O,
    ) -> Result<TransactionOutcome, TransactionError> {
        operation.validate()?;
        let payload = operation.payload();
        self.process(&operation.resource(), &payload).await
    }

    /// Creates a checkout invoice (`checkout-invoice/create`).
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn create_invoice(
        &self,
        invoice: &Invoice,
    ) -> Result<TransactionOutcome, TransactionError> {
        self.execute(invoice).await
    }

    /// Looks up an invoice's status by checkout token
    /// (`checkout-invoice/confirm/<token>`).
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn confirm_invoice(
        &self,
        token: &str,
    ) -> Result<TransactionOutcome, TransactionError> {
        self.execute(&InvoiceStatus::new(token)).await
    }

    /// Charges a card directly (`direct-card/processcard`).
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn process_card(
        &self,
        card: &DirectCard,
    ) -> Result<TransactionOutcome, TransactionError> {
        self.execute(card).await
    }

    /// Credits an MPower account (`direct-pay/credit-account`).
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn credit_account(
        &self,
        pay: &DirectPay,
    ) -> Result<TransactionOutcome, TransactionError> {
        self.execute(pay).await
    }

    /// Opens an onsite payment request (`opr/create`).
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn create_opr(&self, opr: &Opr) -> Result<TransactionOutcome, TransactionError> {
        self.execute(opr).await
    }

    /// Charges a confirmed onsite payment request (`opr/charge`).
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn charge_opr(
        &self,
        charge: &OprCharge,
    ) -> Result<TransactionOutcome, TransactionError> {
        self.execute(charge).await
    }

    /// Sends the request and classifies the reply.
    async fn dispatch(
        &self,
        resource: &str,
        payload: &Payload,
    ) -> Result<TransactionOutcome, TransactionError> {
        let url = self.endpoint(resource)?;
        let headers = self.request_headers()?;
        let method = if payload.is_empty() { "GET" } else { "POST" };

        let mut request = if payload.is_empty() {
            self.client.get(url).query(payload)
        } else {
            self.client.post(url).json(payload)
        };
        request = request.headers(headers);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TransactionError::Transport {
                context: format!("{method} {resource}"),
                source: e,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response
                .text()
                .await
                .map_err(|e| TransactionError::BodyRead {
                    context: format!("{method} {resource}"),
                    source: e,
                })?;
            return Ok(TransactionOutcome::TransportFailure(TransportFailure {
                status: status.as_u16(),
                body,
            }));
        }

        let decoded: GatewayResponse =
            response
                .json()
                .await
                .map_err(|e| TransactionError::Decode {
                    context: format!("{method} {resource}"),
                    source: e,
                })?;
        Ok(TransactionOutcome::from_response(decoded))
    }
}

/// Records a transaction's result on the current tracing span.
#[cfg(feature = "telemetry")]
fn record_outcome_on_span(result: &Result<TransactionOutcome, TransactionError>) {
    let span = tracing::Span::current();
    match result {
        Ok(outcome) => {
            span.record("otel.status_code", "OK");
            if let TransactionOutcome::TransportFailure(failure) = outcome {
                tracing::event!(
                    tracing::Level::WARN,
                    status = failure.status,
                    "gateway answered with a non-200 status"
                );
            }
        }
        Err(err) => {
            span.record("otel.status_code", "ERROR");
            tracing::event!(tracing::Level::ERROR, error = %err, "transaction failed");
        }
    }
}

/// Records a transaction's result on the current tracing span.
/// Noop if the telemetry feature is off.
#[cfg(not(feature = "telemetry"))]
fn record_outcome_on_span(_result: &Result<TransactionOutcome, TransactionError>) {}

#[cfg(test)]
mod tests {
    use super::*;
    use mpower::products::{InvoiceItem, InvoiceTax};
    use mpower::{Credentials, ValidationError};
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sandbox_config() -> Config {
        Config::sandbox(Credentials::new("master", "private", "token"))
    }

    fn mock_client(server: &MockServer) -> TransactionClient {
        let base = format!("{}/", server.uri()).parse().unwrap();
        TransactionClient::new(sandbox_config()).with_base_url(base)
    }

    fn accepted_body() -> serde_json::Value {
        json!({"response_code": 0, "response_text": "Transaction successful"})
    }

    #[test]
    fn endpoint_prefixes_the_sandbox_base() {
        let client = TransactionClient::new(Config::sandbox(Credentials::default()));
        let url = client.endpoint("charge").unwrap();
        assert_eq!(
            url.as_str(),
            "https://app.mpowerpayments.com/sandbox-api/v1/charge"
        );
    }

    #[test]
    fn endpoint_prefixes_the_live_base() {
        let client = TransactionClient::new(Config::default());
        let url = client.endpoint("checkout-invoice/create").unwrap();
        assert_eq!(
            url.as_str(),
            "https://app.mpowerpayments.com/api/v1/checkout-invoice/create"
        );
    }

    #[tokio::test]
    async fn non_empty_payload_is_posted_as_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/charge"))
            .and(body_partial_json(json!({"amount": 500, "token": "tok_1"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "response_code": 0,
                "transaction_id": "tx_9",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut payload = Payload::new();
        payload.insert("amount".to_owned(), json!(500));
        payload.insert("token".to_owned(), json!("tok_1"));

        let outcome = mock_client(&server).process("charge", &payload).await.unwrap();
        let body = outcome.into_success().expect("charge should be accepted");
        assert_eq!(body.field("transaction_id"), Some(&json!("tx_9")));
    }

    #[tokio::test]
    async fn empty_payload_is_sent_as_get() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/checkout-invoice/confirm/tok_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "response_code": 0,
                "status": "completed",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = mock_client(&server).confirm_invoice("tok_1").await.unwrap();
        let body = outcome.into_success().expect("lookup should succeed");
        assert_eq!(body.field("status"), Some(&json!("completed")));
    }

    #[tokio::test]
    async fn nonzero_response_code_is_a_gateway_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "response_code": 1,
                "response_text": "Insufficient funds",
            })))
            .mount(&server)
            .await;

        let card = DirectCard::new()
            .with_card_name("Alice Mensah")
            .with_card_number("4242424242424242")
            .with_card_cvc("123")
            .with_expiry(9, 2027)
            .with_amount(150.0);
        let outcome = mock_client(&server).process_card(&card).await.unwrap();
        assert_eq!(
            outcome,
            TransactionOutcome::Failure("Insufficient funds".to_owned())
        );
    }

    #[tokio::test]
    async fn non_200_status_is_a_transport_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
            .mount(&server)
            .await;

        let outcome = mock_client(&server)
            .credit_account(&DirectPay::new("077XXXX", 50.0))
            .await
            .unwrap();
        let TransactionOutcome::TransportFailure(failure) = outcome else {
            panic!("expected a transport failure, got {outcome:?}");
        };
        assert_eq!(failure.status, 503);
        assert_eq!(failure.body, "unavailable");
    }

    #[tokio::test]
    async fn undecodable_200_body_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let error = mock_client(&server)
            .credit_account(&DirectPay::new("077XXXX", 50.0))
            .await
            .unwrap_err();
        assert!(matches!(error, TransactionError::Decode { .. }));
    }

    #[tokio::test]
    async fn credential_headers_are_attached() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("MP-Master-Key", "master"))
            .and(header("MP-Private-Key", "private"))
            .and(header("MP-Token", "token"))
            .and(header("Content-Type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(accepted_body()))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = mock_client(&server)
            .credit_account(&DirectPay::new("077XXXX", 50.0))
            .await
            .unwrap();
        assert!(outcome.is_success());
    }

    #[tokio::test]
    async fn absent_credentials_are_omitted_but_the_request_still_goes_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(accepted_body()))
            .expect(1)
            .mount(&server)
            .await;

        let config = Config::sandbox(Credentials {
            master_key: None,
            private_key: Some("private".to_owned()),
            token: Some("token".to_owned()),
        });
        let base = format!("{}/", server.uri()).parse().unwrap();
        let client = TransactionClient::new(config).with_base_url(base);

        let outcome = client
            .credit_account(&DirectPay::new("077XXXX", 50.0))
            .await
            .unwrap();
        assert!(outcome.is_success());
    }

    #[tokio::test]
    async fn custom_headers_override_fixed_ones() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("User-Agent", "integration-suite/1"))
            .and(header("X-Request-Id", "req_42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(accepted_body()))
            .expect(1)
            .mount(&server)
            .await;

        let mut client = mock_client(&server);
        client.add_header("User-Agent", "integration-suite/1").unwrap();
        client.add_header("X-Request-Id", "req_42").unwrap();

        let outcome = client
            .credit_account(&DirectPay::new("077XXXX", 50.0))
            .await
            .unwrap();
        assert!(outcome.is_success());
    }

    #[test]
    fn invalid_header_input_is_rejected_and_leaves_headers_unchanged() {
        let mut client = TransactionClient::new(sandbox_config());
        client.add_header("X-Trace", "ok").unwrap();

        let error = client.add_header("bad name", "value").unwrap_err();
        assert!(matches!(error, InvalidHeader::Name(_)));
        let error = client.add_header("X-Other", "bad\nvalue").unwrap_err();
        assert!(matches!(error, InvalidHeader::Value(_)));

        assert_eq!(client.headers().len(), 1);
    }

    #[tokio::test]
    async fn validation_failure_never_reaches_the_network() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(accepted_body()))
            .expect(0)
            .mount(&server)
            .await;

        let invoice = Invoice::new()
            .with_item(InvoiceItem::new("Ticket", 1, 35.0, 35.0))
            .with_tax(InvoiceTax::new("VAT (15%)", 5.25));
        let error = mock_client(&server).create_invoice(&invoice).await.unwrap_err();
        assert!(matches!(
            error,
            TransactionError::Validation(ValidationError::MissingField("total_amount"))
        ));
    }

    #[tokio::test]
    async fn network_level_failure_is_a_transport_error() {
        let base = "http://127.0.0.1:1/".parse().unwrap();
        let client = TransactionClient::new(sandbox_config()).with_base_url(base);

        let error = client
            .credit_account(&DirectPay::new("077XXXX", 50.0))
            .await
            .unwrap_err();
        assert!(matches!(error, TransactionError::Transport { .. }));
    }

    #[tokio::test]
    async fn opr_flow_hits_create_then_charge() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/opr/create"))
            .and(body_partial_json(json!({
                "opr_data": {"account_alias": "077XXXX"},
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "response_code": 0,
                "token": "opr_tok",
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/opr/charge"))
            .and(body_partial_json(json!({
                "token": "opr_tok",
                "confirm_token": "4321",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(accepted_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = mock_client(&server);
        let opr = Opr::new()
            .with_account_alias("077XXXX")
            .with_total_amount(45.0);
        let created = client.create_opr(&opr).await.unwrap();
        let token = created
            .into_success()
            .and_then(|body| body.field("token").cloned())
            .expect("create should return a token");

        let charge = OprCharge::new(token.as_str().unwrap(), "4321");
        let charged = client.charge_opr(&charge).await.unwrap();
        assert!(charged.is_success());
    }
}
