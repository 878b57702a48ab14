//! Verify every client operation against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results. Comparing parsed JSON (not raw strings) avoids
//! false negatives from field-ordering differences.

use std::cell::RefCell;

use avatax_core::{
    ApiError, AvaTaxClient, BatchModel, ContactModel, FetchOptions, HttpMethod, HttpRequest,
    HttpResponse, Transport, TransportError,
};
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:3000";

/// Replays one simulated response and keeps the request it was given.
struct Replay {
    response: HttpResponse,
    seen: RefCell<Option<HttpRequest>>,
}

impl Transport for Replay {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        *self.seen.borrow_mut() = Some(request);
        Ok(self.response.clone())
    }
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn parse_options(raw: Option<&Value>) -> Option<FetchOptions> {
    let raw = raw?;
    let text = |key: &str| raw.get(key).and_then(Value::as_str).map(str::to_string);
    let count = |key: &str| raw.get(key).and_then(Value::as_u64).unwrap_or(0) as u32;
    Some(FetchOptions {
        filter: text("filter"),
        include: text("include"),
        top: count("top"),
        skip: count("skip"),
        order_by: text("orderBy"),
    })
}

fn simulated_response(sim: &Value) -> HttpResponse {
    let mut response = HttpResponse::new(
        sim["status"].as_u64().unwrap() as u16,
        sim["body"].as_str().unwrap().as_bytes().to_vec(),
    );
    if let Some(headers) = sim.get("headers").and_then(Value::as_array) {
        for pair in headers {
            response = response.with_header(pair[0].as_str().unwrap(), pair[1].as_str().unwrap());
        }
    }
    response
}

fn to_value<T: serde::Serialize>(result: Result<T, ApiError>) -> Result<Value, ApiError> {
    result.map(|value| serde_json::to_value(value).unwrap())
}

/// Run the named operation and render its result as JSON.
fn run(client: &AvaTaxClient<Replay>, case: &Value) -> Result<Value, ApiError> {
    let params: Vec<i32> = case["params"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p.as_i64().unwrap() as i32)
        .collect();
    let options = parse_options(case.get("options"));
    let options = options.as_ref();
    let body = case.get("body").cloned().unwrap_or(Value::Null);

    match case["operation"].as_str().unwrap() {
        "create_batches" => {
            let input: Vec<BatchModel> = serde_json::from_value(body).unwrap();
            to_value(client.create_batches(params[0], &input))
        }
        "delete_batch" => to_value(client.delete_batch(params[0], params[1])),
        "download_batch" => client.download_batch(params[0], params[1], params[2]).map(|file| {
            json!({
                "name": file.name,
                "contentType": file.content_type,
                "data": String::from_utf8(file.data).unwrap(),
            })
        }),
        "get_batch" => to_value(client.get_batch(params[0], params[1])),
        "list_batches_by_company" => to_value(client.list_batches_by_company(params[0], options)),
        "query_batches" => to_value(client.query_batches(options)),
        "create_contacts" => {
            let input: Vec<ContactModel> = serde_json::from_value(body).unwrap();
            to_value(client.create_contacts(params[0], &input))
        }
        "delete_contact" => to_value(client.delete_contact(params[0], params[1])),
        "get_contact" => to_value(client.get_contact(params[0], params[1])),
        "list_contacts_by_company" => to_value(client.list_contacts_by_company(params[0], options)),
        "query_contacts" => to_value(client.query_contacts(options)),
        "update_contact" => {
            let input: ContactModel = serde_json::from_value(body).unwrap();
            to_value(client.update_contact(params[0], params[1], &input))
        }
        "get_subscription" => to_value(client.get_subscription(params[0], params[1])),
        "list_subscriptions_by_account" => {
            to_value(client.list_subscriptions_by_account(params[0], options))
        }
        "query_subscriptions" => to_value(client.query_subscriptions(options)),
        other => panic!("unknown operation: {other}"),
    }
}

fn check_vectors(raw: &str) {
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let client = AvaTaxClient::new(
            BASE_URL,
            Replay {
                response: simulated_response(&case["simulated_response"]),
                seen: RefCell::new(None),
            },
        );

        let result = run(&client, case);

        // Verify build
        let req = client
            .transport()
            .seen
            .borrow_mut()
            .take()
            .unwrap_or_else(|| panic!("{name}: no request sent"));
        let expected_req = &case["expected_request"];
        assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.url, format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()), "{name}: path");

        let expected_query: Vec<(String, String)> = expected_req["query"]
            .as_array()
            .unwrap()
            .iter()
            .map(|pair| {
                let arr = pair.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.query, expected_query, "{name}: query");

        match expected_req.get("body") {
            Some(expected_body) => {
                let req_body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
                assert_eq!(&req_body, expected_body, "{name}: body");
                assert!(
                    req.headers.contains(&("content-type".to_string(), "application/json".to_string())),
                    "{name}: content-type"
                );
            }
            None => assert!(req.body.is_none(), "{name}: body should be None"),
        }

        // Verify parse
        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            match expected_error.as_str().unwrap() {
                "NotFound" => assert!(matches!(err, ApiError::NotFound), "{name}: expected NotFound"),
                "ServiceError" => {
                    assert!(matches!(err, ApiError::ServiceError { .. }), "{name}: expected ServiceError")
                }
                "HttpError" => assert!(matches!(err, ApiError::HttpError { .. }), "{name}: expected HttpError"),
                other => panic!("{name}: unknown expected_error: {other}"),
            }
        } else {
            let value = result.unwrap_or_else(|e| panic!("{name}: {e}"));
            assert_eq!(value, case["expected_result"], "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Batches
// ---------------------------------------------------------------------------

#[test]
fn batch_test_vectors() {
    check_vectors(include_str!("../../test-vectors/batches.json"));
}

// ---------------------------------------------------------------------------
// Contacts
// ---------------------------------------------------------------------------

#[test]
fn contact_test_vectors() {
    check_vectors(include_str!("../../test-vectors/contacts.json"));
}

// ---------------------------------------------------------------------------
// Subscriptions
// ---------------------------------------------------------------------------

#[test]
fn subscription_test_vectors() {
    check_vectors(include_str!("../../test-vectors/subscriptions.json"));
}
