use std::time::Duration;

use activities::transport::join_url;
use activities::{ClientConfig, HttpRequest, HttpResponse, Method, Transport, TransportError};
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(ms) = config.request_timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.clone(),
        })
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = join_url(&self.base_url, &request.path);
        let method = request.method;

        let mut builder = match method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Delete => self.client.delete(&url),
        };
        if let Some(body) = request.body {
            builder = builder.header(CONTENT_TYPE, "application/json").body(body);
        }

        let resp = builder.send().await.map_err(|e| network(&url, e))?;
        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(|e| network(&url, e))?;

        debug!(method = method.as_str(), %url, status, "response");
        Ok(HttpResponse { status, body })
    }
}

fn network(url: &str, err: reqwest::Error) -> TransportError {
    TransportError::Network(format!("{url}: {err}"))
}
