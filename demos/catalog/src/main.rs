//! Catalog demo
//!
//! Lists catalog resources of a shop API with signed requests.
//!
//! ```text
//! API_TOKEN=... API_KEY=<hex> API_BASE_URL=https://shop.example.com \
//!     RUST_LOG=debug cargo run -p catalog-demo -- listAttributeAvs
//! ```

// Demo-specific lint allowances
#![allow(missing_docs)]
#![allow(clippy::print_stdout)]

use sigrest::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Operation invoked when none is given on the command line.
const DEFAULT_OPERATION: &str = "listProducts";

// ============================================================================
// Data Types
// ============================================================================

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub reference: String,
    #[serde(default)]
    pub visible: bool,
}

// ============================================================================
// Catalog operations
// ============================================================================

/// Fetch visible products, decoding the body when the call succeeded.
async fn visible_products<C: HttpClient>(client: &ApiClient<C>, limit: u32) -> Result<Vec<Product>> {
    let params = Params::new()
        .query("limit", limit.to_string())
        .bare_query("visible");

    match client.list("products", params).await? {
        Reply::Normalized(result) if result.is_error() => {
            info!(
                status = result.status(),
                error = result.error_message().unwrap_or_default(),
                "listing products failed"
            );
            Ok(Vec::new())
        }
        Reply::Normalized(result) => result.json(),
        Reply::Raw(response) => response.json(),
    }
}

/// Invoke any operation by name and return `(status, body)`.
async fn run_operation<C: HttpClient>(
    client: &ApiClient<C>,
    operation: &str,
) -> Result<(u16, serde_json::Value)> {
    let reply = client.invoke(operation, Args::new()).await?;
    Ok(match reply {
        Reply::Normalized(result) => result.into_parts(),
        Reply::Raw(response) => (response.status(), serde_json::Value::Null),
    })
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ClientConfig::from_env()?;
    info!(base_url = config.base_url(), "catalog client ready");

    let transport = HyperClient::builder().with_logging().build();
    let client = ApiClient::with_transport(transport, config);

    let operation = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_OPERATION.to_string());

    let (status, body) = run_operation(&client, &operation).await?;
    println!("{operation} -> {status}");
    println!("{body:#}");

    let products = visible_products(&client, 10).await?;
    println!("\n{} visible product(s)", products.len());
    for product in &products {
        println!("  #{} {}", product.id, product.reference);
    }

    Ok(())
}

// ============================================================================
// Tests using wiremock
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path, query_param},
    };

    fn client(server: &MockServer) -> ApiClient {
        let config = ClientConfig::new("demo-token", "cafebabe", server.uri()).expect("config");
        ApiClient::new(config)
    }

    #[tokio::test]
    async fn test_visible_products() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/products"))
            .and(query_param("limit", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "reference": "TSHIRT-01", "visible": true},
                {"id": 2, "reference": "MUG-02", "visible": true}
            ])))
            .mount(&server)
            .await;

        let products = visible_products(&client(&server), 10)
            .await
            .expect("products");

        assert_eq!(products.len(), 2);
        let first = products.first().expect("first product");
        assert_eq!(first.reference, "TSHIRT-01");
    }

    #[tokio::test]
    async fn test_visible_products_on_server_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/products"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let products = visible_products(&client(&server), 10)
            .await
            .expect("recovered");

        assert!(products.is_empty());
    }

    #[tokio::test]
    async fn test_run_operation_by_convention() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/attribute-avs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 4}])))
            .mount(&server)
            .await;

        let (status, body) = run_operation(&client(&server), "listAttributeAvs")
            .await
            .expect("operation");

        assert_eq!(status, 200);
        assert_eq!(body, json!([{"id": 4}]));
    }
}
