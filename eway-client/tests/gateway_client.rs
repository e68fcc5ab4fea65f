//! Integration tests for the gateway client against a mock upstream.
//!
//! These tests verify request shape (auth, headers, endpoint, body) and the
//! ordering of failure classification on responses.

use std::str::FromStr;
use std::time::Duration;

use eway_client::{ClientConfig, ClientError, Credentials, GatewayClient, PaymentGateway};
use eway_types::{AccessCodeRequest, Environment, RequestBuilder, RequestMethod};
use rust_decimal::Decimal;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{basic_auth, body_json, body_partial_json, header, method, path},
};

/// Helper to build a client pointed at the mock server.
fn client_for(server: &MockServer) -> GatewayClient {
    let config = ClientConfig::new(Environment::Sandbox).with_base_url(server.uri());
    GatewayClient::with_config(Credentials::new("api-key", "api-password"), config).unwrap()
}

/// Helper to build the request used throughout these tests.
fn sample_request() -> AccessCodeRequest {
    let mut builder = RequestBuilder::new();
    builder
        .customer_title("Dr.")
        .unwrap()
        .customer_first_name("Jane")
        .unwrap()
        .customer_last_name("Doe")
        .unwrap()
        .customer_email("jane@example.com")
        .unwrap()
        .option1("A")
        .unwrap()
        .option2("")
        .unwrap()
        .option3("C")
        .unwrap()
        .payment_total_amount(Decimal::from_str("10.00").unwrap())
        .unwrap()
        .payment_invoice_number("INV1")
        .unwrap()
        .redirect_url("https://shop.example.com/done")
        .unwrap();
    builder.build_access_code_request()
}

fn access_code_body() -> serde_json::Value {
    json!({
        "SharedPaymentUrl": "https://secure-au.sandbox.ewaypayments.com/sharedpage/sharedpayment?AccessCode=F9802j0",
        "AccessCode": "F9802j0",
        "FormActionURL": "https://secure-au.sandbox.ewaypayments.com/AccessCode/F9802j0",
        "Customer": {"Title": "Dr.", "FirstName": "Jane", "LastName": "Doe"},
        "Payment": {"TotalAmount": 1000, "InvoiceNumber": "INV1",
                    "InvoiceDescription": null, "InvoiceReference": null, "CurrencyCode": "AUD"},
        "Errors": null
    })
}

#[tokio::test]
async fn test_create_access_code_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/CreateAccessCodeShared.json"))
        .and(basic_auth("api-key", "api-password"))
        .and(header("Accept", "application/json"))
        .and(body_partial_json(json!({
            "Method": "CreateAccessCodeShared",
            "TransactionType": "Purchase",
            "CustomerReadOnly": true,
            "Options": [{"Value": "A"}, {"Value": ""}, {"Value": "C"}],
            "Payment": {"TotalAmount": 1000}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(access_code_body()))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client_for(&server)
        .create_access_code(&sample_request())
        .await
        .unwrap();

    assert_eq!(resp.access_code, "F9802j0");
    assert!(resp.shared_payment_url.unwrap().ends_with("AccessCode=F9802j0"));
    assert_eq!(resp.payment.unwrap().total_amount.minor(), 1000);
}

#[tokio::test]
async fn test_process_payment_uses_create_access_code_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/CreateAccessCode.json"))
        .and(body_partial_json(json!({"Method": "ProcessPayment"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(access_code_body()))
        .expect(1)
        .mount(&server)
        .await;

    let mut request = sample_request();
    request.method = RequestMethod::ProcessPayment;
    let resp = client_for(&server).create_access_code(&request).await.unwrap();
    assert_eq!(resp.access_code, "F9802j0");
}

#[tokio::test]
async fn test_get_transaction_result_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/GetAccessCodeResult.json"))
        .and(basic_auth("api-key", "api-password"))
        .and(body_json(json!({"AccessCode": "F9802j0"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "AccessCode": "F9802j0",
            "AuthorisationCode": "358216",
            "ResponseCode": "00",
            "ResponseMessage": "A2000",
            "InvoiceNumber": "INV1",
            "InvoiceReference": "",
            "TotalAmount": 1000,
            "TransactionID": 10204030,
            "TransactionStatus": true,
            "TokenCustomerID": null,
            "BeagleScore": 0,
            "Options": [{"Value": "A"}, {"Value": ""}, {"Value": "C"}],
            "Errors": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server)
        .get_transaction_result("F9802j0")
        .await
        .unwrap();

    assert!(result.is_approved());
    assert_eq!(result.transaction_id, Some(10204030));
    assert_eq!(result.total_amount, 1000);
    assert_eq!(result.messages()[0].to_string(), "Transaction Approved");
}

#[tokio::test]
async fn test_unauthorized_is_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .create_access_code(&sample_request())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Auth { status: 401 }), "{err:?}");
}

#[tokio::test]
async fn test_internal_server_error_is_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_transaction_result("abc")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Auth { status: 500 }), "{err:?}");
}

#[tokio::test]
async fn test_other_error_statuses_are_http_errors() {
    for status in [400u16, 404, 502, 503] {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(status).set_body_json(json!({"error": "nope"})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .create_access_code(&sample_request())
            .await
            .unwrap_err();
        match err {
            ClientError::Http { status: got, message } => {
                assert_eq!(got, status);
                assert_eq!(message, "nope");
            }
            other => panic!("expected HTTP error for {status}, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_http_error_with_non_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_string("<html>Forbidden</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .create_access_code(&sample_request())
        .await
        .unwrap_err();
    assert!(
        matches!(&err, ClientError::Http { status: 403, message } if message == "<html>Forbidden</html>"),
        "{err:?}"
    );
}

#[tokio::test]
async fn test_gateway_error_code_is_resolved() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Errors": "V6022"})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .create_access_code(&sample_request())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Api { .. }), "{err:?}");
    assert!(err.to_string().contains("Card Number Required"));
    assert_eq!(err.codes()[0].code(), "V6022");
}

#[tokio::test]
async fn test_unknown_gateway_code_is_marked() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Errors": "Z9999"})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_transaction_result("abc")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Api { .. }), "{err:?}");
    assert!(err.to_string().contains("Unknown response code Z9999"));
    assert!(!err.codes()[0].is_known());
}

#[tokio::test]
async fn test_multiple_gateway_codes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"AccessCode": null, "Errors": "V6021,V6023"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .create_access_code(&sample_request())
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "API error: Cardholder Name Required, CVN Required"
    );
}

#[tokio::test]
async fn test_malformed_success_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .create_access_code(&sample_request())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)), "{err:?}");
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Grab a free port, then close it so nothing is listening.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = ClientConfig::default().with_base_url(format!("http://{addr}"));
    let client = GatewayClient::with_config(Credentials::new("k", "p"), config).unwrap();

    let err = client.get_transaction_result("abc").await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)), "{err:?}");
}

#[tokio::test]
async fn test_timeout_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(access_code_body())
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let config = ClientConfig::default()
        .with_base_url(server.uri())
        .with_timeout(Duration::from_secs(1));
    let client = GatewayClient::with_config(Credentials::new("k", "p"), config).unwrap();

    let err = client.create_access_code(&sample_request()).await.unwrap_err();
    match err {
        ClientError::Transport(e) => assert!(e.is_timeout()),
        other => panic!("expected transport error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_cancel_in_flight_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(access_code_body())
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.cancel();
    });

    let err = client
        .create_access_code_with_cancel(&sample_request(), &cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Cancelled), "{err:?}");
}

#[tokio::test]
async fn test_cancel_does_not_affect_completed_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/GetAccessCodeResult.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"AccessCode": "abc", "TransactionStatus": false})),
        )
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let result = client_for(&server)
        .get_transaction_result_with_cancel("abc", &cancel)
        .await
        .unwrap();
    assert!(!result.is_approved());
}

#[tokio::test]
async fn test_client_usable_through_port_trait() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/CreateAccessCodeShared.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(access_code_body()))
        .mount(&server)
        .await;

    let gateway: Box<dyn PaymentGateway> = Box::new(client_for(&server));
    let resp = gateway.create_access_code(&sample_request()).await.unwrap();
    assert_eq!(resp.access_code, "F9802j0");
}

#[tokio::test]
async fn test_sub_second_timeout_allows_fast_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(access_code_body())
                .set_delay(Duration::from_millis(50)),
        )
        .mount(&server)
        .await;

    let config = ClientConfig::default()
        .with_base_url(server.uri())
        .with_timeout(Duration::from_millis(500));
    let client = GatewayClient::with_config(Credentials::new("k", "p"), config).unwrap();

    let resp = client.create_access_code(&sample_request()).await.unwrap();
    assert_eq!(resp.access_code, "F9802j0");
}
