//! HTTP transport for the fixture's REST API.

use std::time::Duration;

use hyper::client::HttpConnector;
use hyper::header::CONTENT_TYPE;
use hyper::{Body, Client, Method, Request, Uri};
use log::debug;
use serde_json::Value;
use strum_macros::{AsRefStr, Display};

use crate::errors::Error;

type Result<T> = std::result::Result<T, Error>;

/// REST resources exposed by the fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display)]
pub(crate) enum Endpoint {
    /// Read-only hardware and firmware identity.
    #[strum(serialize = "/elgato/accessory-info")]
    AccessoryInfo,
    /// Mutable power, brightness and temperature.
    #[strum(serialize = "/elgato/lights")]
    Lights,
}

/// A plain-HTTP client bound to one fixture.
///
/// Every exchange, from connect until the body has been read, is bounded by
/// the configured timeout.
#[derive(Debug, Clone)]
pub(crate) struct HttpTransport {
    client: Client<HttpConnector>,
    target: String,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(address: &str, port: u16, timeout: Duration) -> Result<Self> {
        let host = if address.contains(':') && !address.starts_with('[') {
            format!("[{address}]")
        } else {
            address.to_string()
        };
        let target = format!("{host}:{port}");
        format!("http://{target}/")
            .parse::<Uri>()
            .map_err(|e| Error::invalid_address(address, e))?;

        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(timeout));
        let client = Client::builder().build(connector);

        Ok(HttpTransport {
            client,
            target,
            timeout,
        })
    }

    /// `host:port` this transport talks to.
    pub fn target(&self) -> &str {
        &self.target
    }

    pub async fn send(
        &self,
        method: Method,
        endpoint: Endpoint,
        body: Option<Vec<u8>>,
    ) -> Result<Value> {
        let uri: Uri = format!("http://{}{}", self.target, endpoint)
            .parse()
            .map_err(|e| Error::invalid_address(&self.target, e))?;

        let mut builder = Request::builder().method(method.clone()).uri(uri);
        let body = match body {
            Some(bytes) => {
                builder = builder.header(CONTENT_TYPE, "application/json");
                Body::from(bytes)
            }
            None => Body::empty(),
        };
        let request = builder
            .body(body)
            .map_err(|e| Error::invalid_address(&self.target, e))?;

        let exchange = async {
            let response = self
                .client
                .request(request)
                .await
                .map_err(|e| Error::connection(&self.target, "request", e))?;
            let status = response.status();
            let bytes = hyper::body::to_bytes(response.into_body())
                .await
                .map_err(|e| Error::connection(&self.target, "read body", e))?;
            Ok::<_, Error>((status, bytes))
        };

        let (status, bytes) = tokio::time::timeout(self.timeout, exchange)
            .await
            .map_err(|_| Error::Timeout {
                target: self.target.clone(),
                timeout: self.timeout,
            })??;

        debug!("{method} {endpoint} -> {status}");

        if !status.is_success() {
            return Err(Error::protocol(
                endpoint.as_ref(),
                format!("unexpected status {status}"),
            ));
        }

        serde_json::from_slice(&bytes).map_err(|e| Error::protocol(endpoint.as_ref(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(Endpoint::AccessoryInfo.as_ref(), "/elgato/accessory-info");
        assert_eq!(Endpoint::Lights.to_string(), "/elgato/lights");
    }

    #[tokio::test]
    async fn test_target_formatting() {
        let transport = HttpTransport::new("192.168.1.20", 9123, Duration::from_secs(1)).unwrap();
        assert_eq!(transport.target(), "192.168.1.20:9123");

        let transport = HttpTransport::new("fe80::1", 9123, Duration::from_secs(1)).unwrap();
        assert_eq!(transport.target(), "[fe80::1]:9123");
    }

    #[tokio::test]
    async fn test_invalid_address() {
        let err = HttpTransport::new("not a host", 9123, Duration::from_secs(1)).unwrap_err();
        assert!(err.is_connection());
        assert!(matches!(err, Error::InvalidAddress { .. }));
    }
}
