use activities::transport::join_url;
use activities::{ClientConfig, HttpRequest, HttpResponse, Transport, TransportError};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

/// `window.fetch` transport. With the same-origin config every path stays
/// relative to the page.
pub(super) struct FetchTransport {
    base_url: String,
}

impl FetchTransport {
    pub(super) fn new(config: ClientConfig) -> Self {
        Self {
            base_url: config.base_url,
        }
    }
}

impl Transport for FetchTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let window = web_sys::window().ok_or_else(|| network("no window"))?;

        let init = web_sys::RequestInit::new();
        init.set_method(request.method.as_str());
        if let Some(body) = &request.body {
            let headers = web_sys::Headers::new().map_err(|_| network("Headers::new() threw"))?;
            headers
                .set("Content-Type", "application/json")
                .map_err(|_| network("Headers::set() threw"))?;
            init.set_headers(&headers);
            init.set_body(&JsValue::from_str(body));
        }

        let url = join_url(&self.base_url, &request.path);
        let req = web_sys::Request::new_with_str_and_init(&url, &init).map_err(js_error)?;

        let value = JsFuture::from(window.fetch_with_request(&req))
            .await
            .map_err(js_error)?;
        let resp = value
            .dyn_into::<web_sys::Response>()
            .map_err(|_| network("fetch() returned unexpected type"))?;

        let text = JsFuture::from(resp.text().map_err(js_error)?)
            .await
            .map_err(js_error)?;

        Ok(HttpResponse {
            status: resp.status(),
            body: text.as_string().unwrap_or_default(),
        })
    }
}

fn network(msg: &str) -> TransportError {
    TransportError::Network(msg.to_string())
}

fn js_error(v: JsValue) -> TransportError {
    TransportError::Network(v.as_string().unwrap_or_else(|| format!("{v:?}")))
}
