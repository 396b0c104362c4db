use crate::model::Product;

use http::{Request, Uri};
use http_body_util::BodyExt;
use hyper_rustls::HttpsConnectorBuilder;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use rustls_native_certs;
use std::sync::Arc;

/// The displayed catalog never exceeds this many entries, regardless of how
/// many the endpoint returns. Source ordering is preserved.
pub const CATALOG_LIMIT: usize = 15;

type HttpsClient =
    Client<hyper_rustls::HttpsConnector<hyper_util::client::legacy::connect::HttpConnector>, String>;

#[derive(Clone, Debug)]
pub struct CatalogClient {
    client: HttpsClient,
    endpoint: String,
}

impl CatalogClient {
    pub fn new(endpoint: &str, insecure: bool) -> Result<Self, String> {
        if endpoint.is_empty() {
            return Err("No catalog endpoint configured".to_string());
        }
        // Validate up front so a bad config fails at startup, not mid-fetch.
        let _: Uri = endpoint
            .parse()
            .map_err(|e: http::uri::InvalidUri| e.to_string())?;

        let https_connector = if insecure {
            let tls_config = rustls::ClientConfig::builder()
                .dangerous()
                .with_custom_certificate_verifier(Arc::new(NoVerifier))
                .with_no_client_auth();

            HttpsConnectorBuilder::new()
                .with_tls_config(tls_config)
                .https_or_http()
                .enable_http1()
                .build()
        } else {
            let mut root_store = rustls::RootCertStore::empty();
            let result = rustls_native_certs::load_native_certs();
            root_store.add_parsable_certificates(result.certs);

            if root_store.is_empty() {
                return Err("No valid system certificates found.".to_string());
            }

            let tls_config = rustls::ClientConfig::builder()
                .with_root_certificates(root_store)
                .with_no_client_auth();

            HttpsConnectorBuilder::new()
                .with_tls_config(tls_config)
                .https_or_http()
                .enable_http1()
                .build()
        };

        let client = Client::builder(TokioExecutor::new()).build(https_connector);
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }

    fn request_uri(&self, brand: Option<&str>) -> Result<Uri, String> {
        let url = match brand {
            Some(b) if !b.is_empty() => format!("{}?brand={}", self.endpoint, b),
            _ => self.endpoint.clone(),
        };
        url.parse().map_err(|e: http::uri::InvalidUri| e.to_string())
    }

    /// One GET against the catalog endpoint, optionally filtered by brand.
    ///
    /// Decodes the JSON array and truncates to [`CATALOG_LIMIT`]. Non-2xx
    /// status, malformed payloads and transport errors are all `Err`.
    pub async fn fetch_products(&self, brand: Option<&str>) -> Result<Vec<Product>, String> {
        let uri = self.request_uri(brand)?;
        let req = Request::builder()
            .uri(uri)
            .header(http::header::ACCEPT, "application/json")
            .body(String::new())
            .map_err(|e| e.to_string())?;

        let resp = self
            .client
            .request(req)
            .await
            .map_err(|e| format!("{:?}", e))?;

        if !resp.status().is_success() {
            return Err(format!("HTTP {}", resp.status()));
        }

        let body = resp
            .into_body()
            .collect()
            .await
            .map_err(|e| format!("{:?}", e))?
            .to_bytes();

        let mut products: Vec<Product> =
            serde_json::from_slice(&body).map_err(|e| e.to_string())?;
        products.truncate(CATALOG_LIMIT);
        Ok(products)
    }

    /// Fetch for the catalog screen: every failure collapses to an empty
    /// list. The screen only distinguishes "loading" from "loaded".
    pub async fn load_catalog(&self, brand: Option<&str>) -> Vec<Product> {
        self.fetch_products(brand).await.unwrap_or_default()
    }
}

#[derive(Debug)]
struct NoVerifier;
impl rustls::client::danger::ServerCertVerifier for NoVerifier {
    fn verify_server_cert(
        &self,
        _: &rustls::pki_types::CertificateDer<'_>,
        _: &[rustls::pki_types::CertificateDer<'_>],
        _: &rustls::pki_types::ServerName<'_>,
        _: &[u8],
        _: rustls::pki_types::UnixTime,
    ) -> Result<rustls::client::danger::ServerCertVerified, rustls::Error> {
        Ok(rustls::client::danger::ServerCertVerified::assertion())
    }
    fn verify_tls12_signature(
        &self,
        _: &[u8],
        _: &rustls::pki_types::CertificateDer<'_>,
        _: &rustls::DigitallySignedStruct,
    ) -> Result<rustls::client::danger::HandshakeSignatureValid, rustls::Error> {
        Ok(rustls::client::danger::HandshakeSignatureValid::assertion())
    }
    fn verify_tls13_signature(
        &self,
        _: &[u8],
        _: &rustls::pki_types::CertificateDer<'_>,
        _: &rustls::DigitallySignedStruct,
    ) -> Result<rustls::client::danger::HandshakeSignatureValid, rustls::Error> {
        Ok(rustls::client::danger::HandshakeSignatureValid::assertion())
    }
    fn supported_verify_schemes(&self) -> Vec<rustls::SignatureScheme> {
        use rustls::SignatureScheme::*;
        vec![
            RSA_PKCS1_SHA256,
            RSA_PKCS1_SHA384,
            RSA_PKCS1_SHA512,
            ECDSA_NISTP256_SHA256,
            RSA_PSS_SHA256,
            ED25519,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(server: &mockito::ServerGuard) -> CatalogClient {
        // mockito serves plain http; the connector is https_or_http.
        CatalogClient::new(&format!("{}/products.json", server.url()), true).unwrap()
    }

    fn product_array(count: usize) -> String {
        let items: Vec<serde_json::Value> = (0..count)
            .map(|i| {
                serde_json::json!({
                    "id": i,
                    "name": format!("Product {}", i),
                    "brand": "maybelline",
                    "price": "9.99"
                })
            })
            .collect();
        serde_json::to_string(&items).unwrap()
    }

    #[tokio::test]
    async fn test_truncates_to_catalog_limit() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/products.json")
            .match_query(mockito::Matcher::UrlEncoded(
                "brand".into(),
                "maybelline".into(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(product_array(40))
            .create_async()
            .await;

        let client = test_client(&server);
        let products = client.fetch_products(Some("maybelline")).await.unwrap();
        assert_eq!(products.len(), CATALOG_LIMIT);
        // Source order preserved, first 15 kept.
        assert_eq!(products[0].id, 0);
        assert_eq!(products[14].id, 14);
    }

    #[tokio::test]
    async fn test_short_response_passes_through() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/products.json")
            .with_status(200)
            .with_body(product_array(3))
            .create_async()
            .await;

        let client = test_client(&server);
        let products = client.fetch_products(None).await.unwrap();
        assert_eq!(products.len(), 3);
    }

    #[tokio::test]
    async fn test_empty_array_is_ok() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/products.json")
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let client = test_client(&server);
        let products = client.fetch_products(None).await.unwrap();
        assert!(products.is_empty());
    }

    #[tokio::test]
    async fn test_sparse_records_decode() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/products.json")
            .with_status(200)
            .with_body(r#"[{"id": 1}, {"id": 2, "price": null, "description": null}]"#)
            .create_async()
            .await;

        let client = test_client(&server);
        let products = client.fetch_products(None).await.unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[1].price_label(), "0.00");
    }

    #[tokio::test]
    async fn test_server_error_is_err() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/products.json")
            .with_status(500)
            .create_async()
            .await;

        let client = test_client(&server);
        assert!(client.fetch_products(None).await.is_err());
    }

    #[tokio::test]
    async fn test_malformed_payload_is_err() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/products.json")
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let client = test_client(&server);
        assert!(client.fetch_products(None).await.is_err());
    }

    #[tokio::test]
    async fn test_load_catalog_swallows_failures() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/products.json")
            .with_status(404)
            .create_async()
            .await;

        let client = test_client(&server);
        assert!(client.load_catalog(None).await.is_empty());
    }

    #[tokio::test]
    async fn test_load_catalog_swallows_unreachable_host() {
        // Nothing listens here; the connection itself fails.
        let client = CatalogClient::new("http://127.0.0.1:1/products.json", true).unwrap();
        assert!(client.load_catalog(Some("maybelline")).await.is_empty());
    }
}
