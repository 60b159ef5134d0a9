//! Remote product API: status-code mapping and the HTTP client.
//!
//! Mapping a downstream response into an [`Outcome`] is a pure function of the
//! status code and body, kept apart from the client so it can be tested without
//! a network.

use serde::de::DeserializeOwned;

use prodgate_core::{Outcome, Resource};

pub mod client;

pub use client::HttpProductService;

pub const EMPTY_RESPONSE_MESSAGE: &str = "Empty response from downstream service";
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized access to downstream service";
pub const FORBIDDEN_MESSAGE: &str = "Forbidden access to downstream service";
pub const BAD_REQUEST_MESSAGE: &str = "Bad request to downstream service";

/// Translate a downstream status code and body into an outcome.
///
/// A 2xx body that is present but not a valid `V` is returned as `Err`; the
/// caller treats it like a transport failure.
pub fn map_downstream_response<V>(status: u16, body: &[u8]) -> Result<Outcome<V>, serde_json::Error>
where
    V: DeserializeOwned + Resource,
{
    if (200..300).contains(&status) {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Outcome::failure_with_status(EMPTY_RESPONSE_MESSAGE, 204));
        }
        // `null` deserializes to `None`.
        let value: Option<V> = serde_json::from_slice(body)?;
        return Ok(match value {
            Some(value) => Outcome::success(value),
            None => Outcome::failure_with_status(EMPTY_RESPONSE_MESSAGE, 204),
        });
    }

    Ok(match status {
        404 => Outcome::not_found(V::NAME),
        401 => Outcome::failure_with_status(UNAUTHORIZED_MESSAGE, 401),
        403 => Outcome::failure_with_status(FORBIDDEN_MESSAGE, 403),
        400 => Outcome::failure_with_status(BAD_REQUEST_MESSAGE, 400),
        other => Outcome::failure_with_status(format!("Downstream service error: {other}"), other),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use prodgate_products::Product;

    const WIDGET: &str =
        r#"{"id":"0190f2b4-6c1e-7c3a-9a55-2f4d8e1b7a10","name":"Widget","price":9.99,"stock":5}"#;

    fn map(status: u16, body: &str) -> Outcome<Product> {
        map_downstream_response::<Product>(status, body.as_bytes()).unwrap()
    }

    #[test]
    fn ok_body_becomes_success() {
        let outcome = map(200, WIDGET);
        assert!(outcome.is_success());
        assert_eq!(outcome.status_code(), 200);
        let p = outcome.value().unwrap();
        assert_eq!(p.name, "Widget");
        assert_eq!(p.price, 9.99);
        assert_eq!(p.stock, 5);
    }

    #[test]
    fn created_body_becomes_success() {
        assert!(map(201, WIDGET).is_success());
    }

    #[test]
    fn empty_or_null_body_is_a_204_failure() {
        for body in ["", "  \n", "null"] {
            let outcome = map(200, body);
            assert!(!outcome.is_success());
            assert_eq!(outcome.status_code(), 204);
            assert_eq!(outcome.error_message(), EMPTY_RESPONSE_MESSAGE);
        }
    }

    #[test]
    fn malformed_body_is_an_error() {
        assert!(map_downstream_response::<Product>(200, b"{\"name\":").is_err());
        assert!(map_downstream_response::<Product>(200, b"{\"unexpected\":true}").is_err());
    }

    #[test]
    fn failure_statuses_follow_the_table() {
        let cases: &[(u16, &str)] = &[
            (404, "Product not found"),
            (401, UNAUTHORIZED_MESSAGE),
            (403, FORBIDDEN_MESSAGE),
            (400, BAD_REQUEST_MESSAGE),
            (500, "Downstream service error: 500"),
            (503, "Downstream service error: 503"),
            (409, "Downstream service error: 409"),
        ];
        for &(status, message) in cases {
            // Failure bodies are ignored, even when they look like a product.
            let outcome = map(status, WIDGET);
            assert!(!outcome.is_success(), "status {status}");
            assert_eq!(outcome.status_code(), status);
            assert_eq!(outcome.error_message(), message);
        }
    }

    #[test]
    fn lists_are_named_after_their_element() {
        let outcome = map_downstream_response::<Vec<Product>>(404, b"").unwrap();
        assert_eq!(outcome.error_message(), "Product not found");

        let outcome = map_downstream_response::<Vec<Product>>(200, b"[]").unwrap();
        assert_eq!(outcome.into_value(), Some(vec![]));
    }

    #[test]
    fn mapping_is_deterministic() {
        for status in [200u16, 204, 400, 401, 403, 404, 418, 500, 502] {
            let first = map_downstream_response::<Product>(status, WIDGET.as_bytes()).ok();
            let second = map_downstream_response::<Product>(status, WIDGET.as_bytes()).ok();
            assert_eq!(first, second);
        }
    }
}
