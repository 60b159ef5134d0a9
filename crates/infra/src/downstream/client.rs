use std::time::Duration;

use serde::de::DeserializeOwned;

use prodgate_core::{Outcome, ProductId, Resource};
use prodgate_products::{NewProduct, Product};

use super::map_downstream_response;
use crate::BackendError;

/// What the gateway was trying to do when a downstream call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Get,
    List,
    Create,
}

impl Action {
    fn as_str(self) -> &'static str {
        match self {
            Action::Get => "products.get",
            Action::List => "products.list",
            Action::Create => "products.create",
        }
    }

    /// Generic message returned to callers when the call never produced a
    /// usable response.
    fn failure_message(self) -> &'static str {
        match self {
            Action::Get => "An error occurred while retrieving the product",
            Action::List => "An error occurred while retrieving products",
            Action::Create => "An error occurred while creating the product",
        }
    }
}

/// Product backend that forwards to a remote product API.
///
/// One attempt per call, no retries. Transport and decode failures are logged
/// and turned into a 500 outcome; raw error text never leaves this type.
#[derive(Debug, Clone)]
pub struct HttpProductService {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpProductService {
    /// `base_url` is the downstream root, e.g. `http://products:5000`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, BackendError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(BackendError::Client)?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get_product(&self, id: &ProductId) -> Outcome<Product> {
        let url = format!("{}/api/products/{}", self.base_url, id);
        self.send(self.http_client.get(url), Action::Get).await
    }

    pub async fn list_products(&self) -> Outcome<Vec<Product>> {
        let url = format!("{}/api/products", self.base_url);
        self.send(self.http_client.get(url), Action::List).await
    }

    pub async fn create_product(&self, new: &NewProduct) -> Outcome<Product> {
        let url = format!("{}/api/products", self.base_url);
        self.send(self.http_client.post(url).json(new), Action::Create)
            .await
    }

    async fn send<V>(&self, request: reqwest::RequestBuilder, action: Action) -> Outcome<V>
    where
        V: DeserializeOwned + Resource,
    {
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(action = action.as_str(), error = %e, "downstream request failed");
                return Outcome::failure_with_status(action.failure_message(), 500);
            }
        };

        let status = response.status().as_u16();
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                tracing::error!(action = action.as_str(), status, error = %e, "failed to read downstream body");
                return Outcome::failure_with_status(action.failure_message(), 500);
            }
        };

        match map_downstream_response::<V>(status, &body) {
            Ok(outcome) => {
                if !outcome.is_success() {
                    tracing::warn!(
                        action = action.as_str(),
                        status,
                        error = outcome.error_message(),
                        "downstream returned failure"
                    );
                }
                outcome
            }
            Err(e) => {
                tracing::error!(action = action.as_str(), status, error = %e, "failed to decode downstream body");
                Outcome::failure_with_status(action.failure_message(), 500)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn service(server: &MockServer) -> HttpProductService {
        HttpProductService::new(&server.uri(), Duration::from_secs(5)).unwrap()
    }

    fn widget(id: ProductId) -> serde_json::Value {
        serde_json::json!({"id": id.to_string(), "name": "Widget", "price": 9.99, "stock": 5})
    }

    #[tokio::test]
    async fn get_maps_ok_body() {
        let server = MockServer::start().await;
        let id = ProductId::new();
        Mock::given(method("GET"))
            .and(path(format!("/api/products/{id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(widget(id)))
            .mount(&server)
            .await;

        let outcome = service(&server).get_product(&id).await;
        assert!(outcome.is_success());
        assert_eq!(outcome.status_code(), 200);
        let p = outcome.value().unwrap();
        assert_eq!(p.id, id);
        assert_eq!(p.name, "Widget");
    }

    #[tokio::test]
    async fn get_maps_404_to_product_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let outcome = service(&server).get_product(&ProductId::new()).await;
        assert_eq!(outcome.status_code(), 404);
        assert_eq!(outcome.error_message(), "Product not found");
    }

    #[tokio::test]
    async fn mirrors_downstream_auth_failures() {
        for (status, message) in [
            (401, "Unauthorized access to downstream service"),
            (403, "Forbidden access to downstream service"),
        ] {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(status))
                .mount(&server)
                .await;

            let outcome = service(&server).list_products().await;
            assert_eq!(outcome.status_code(), status);
            assert_eq!(outcome.error_message(), message);
        }
    }

    #[tokio::test]
    async fn other_statuses_are_passed_through() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let outcome = service(&server).list_products().await;
        assert_eq!(outcome.status_code(), 503);
        assert_eq!(outcome.error_message(), "Downstream service error: 503");
    }

    #[tokio::test]
    async fn empty_success_body_is_a_204_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let outcome = service(&server).get_product(&ProductId::new()).await;
        assert_eq!(outcome.status_code(), 204);
        assert_eq!(outcome.error_message(), "Empty response from downstream service");
    }

    #[tokio::test]
    async fn malformed_body_becomes_generic_500() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
            .mount(&server)
            .await;

        let outcome = service(&server).list_products().await;
        assert_eq!(outcome.status_code(), 500);
        assert_eq!(outcome.error_message(), "An error occurred while retrieving products");
    }

    /// Address of a port nothing listens on.
    fn closed_port_uri() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn connection_failure_becomes_generic_500() {
        let svc = HttpProductService::new(&closed_port_uri(), Duration::from_secs(2)).unwrap();

        let outcome = svc.get_product(&ProductId::new()).await;
        assert!(!outcome.is_success());
        assert_eq!(outcome.status_code(), 500);
        assert_eq!(outcome.error_message(), "An error occurred while retrieving the product");
    }

    #[tokio::test]
    async fn create_forwards_payload() {
        let server = MockServer::start().await;
        let new = NewProduct {
            name: "Widget".to_string(),
            description: None,
            price: 29.99,
            stock: 100,
        };
        let id = ProductId::new();
        Mock::given(method("POST"))
            .and(path("/api/products"))
            .and(body_json(serde_json::json!({"name": "Widget", "price": 29.99, "stock": 100})))
            .respond_with(ResponseTemplate::new(201).set_body_json(
                serde_json::json!({"id": id.to_string(), "name": "Widget", "price": 29.99, "stock": 100}),
            ))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = service(&server).create_product(&new).await;
        assert!(outcome.is_success());
        assert_eq!(outcome.value().unwrap().id, id);
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let svc = HttpProductService::new("http://products.local/", Duration::from_secs(1)).unwrap();
        assert_eq!(svc.base_url(), "http://products.local");
    }
}
