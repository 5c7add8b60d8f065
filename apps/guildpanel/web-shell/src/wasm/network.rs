use super::*;

    pub(super) fn build_socket_url(socket_path: &str) -> Result<String, ChannelError> {
        let window =
            web_sys::window().ok_or_else(|| ChannelError::Open("window is unavailable".to_string()))?;
        let location = window.location();
        let protocol = location
            .protocol()
            .map_err(|_| ChannelError::Open("browser protocol is unavailable".to_string()))?;
        let host = location
            .host()
            .map_err(|_| ChannelError::Open("browser host is unavailable".to_string()))?;
        Ok(socket_url(&protocol, &host, socket_path))
    }

    pub(super) fn websocket_text(message: WsMessage) -> Result<String, ChannelError> {
        match message {
            WsMessage::Text(text) => Ok(text),
            WsMessage::Bytes(bytes) => String::from_utf8(bytes)
                .map_err(|error| ChannelError::Frame(format!("invalid websocket frame encoding: {error}"))),
        }
    }

    fn network_error(error: gloo_net::Error) -> RequestError {
        RequestError::Network {
            message: error.to_string(),
        }
    }

    /// Alerts the failure once and records it; callers only see the `Err`.
    fn surface<T>(path: &str, result: Result<T, RequestError>) -> Result<T, RequestError> {
        if let Err(error) = &result {
            tracing::warn!(path, status = ?error.status(), %error, "request failed");
            DIAGNOSTICS.with(|state| {
                let mut state = state.borrow_mut();
                state.requests_failed += 1;
                state.last_error = Some(error.to_string());
            });
            alert(&error.notice());
        }
        result
    }

    pub(super) async fn decode_json_response<T: DeserializeOwned>(
        response: Response,
    ) -> Result<T, RequestError> {
        let status = response.status();
        let raw = response.text().await.map_err(network_error)?;
        decode_response(status, &raw)
    }

    async fn send_json_request<T: DeserializeOwned>(request: &ApiRequest) -> Result<T, RequestError> {
        let builder = match request.method {
            HttpMethod::Get => Request::get(&request.path),
            HttpMethod::Post => Request::post(&request.path),
        };
        let response = match &request.body {
            Some(body) => builder
                .json(body)
                .map_err(network_error)?
                .send()
                .await
                .map_err(network_error)?,
            None => builder.send().await.map_err(network_error)?,
        };
        decode_json_response(response).await
    }

    /// One JSON round trip. Transport and status failures are alerted here.
    pub(super) async fn request<T: DeserializeOwned>(request: &ApiRequest) -> Result<T, RequestError> {
        let result = send_json_request(request).await;
        surface(&request.path, result)
    }

    /// Multipart POST; the browser picks the boundary header.
    pub(super) async fn post_form_data(path: &str, data: FormData) -> Result<ApiEnvelope, RequestError> {
        let result = async {
            let response = Request::post(path)
                .body(data)
                .map_err(network_error)?
                .send()
                .await
                .map_err(network_error)?;
            decode_json_response(response).await
        }
        .await;
        surface(path, result)
    }

    pub(super) struct Download {
        pub(super) bytes: Vec<u8>,
        pub(super) disposition: Option<String>,
    }

    pub(super) async fn download(path: &str) -> Result<Download, RequestError> {
        let result = async {
            let response = Request::get(path).send().await.map_err(network_error)?;
            let status = response.status();
            if !response.ok() {
                let raw = response.text().await.unwrap_or_default();
                return Err(status_error(status, &raw));
            }
            let disposition = response.headers().get("content-disposition");
            let bytes = response.binary().await.map_err(network_error)?;
            Ok(Download { bytes, disposition })
        }
        .await;
        surface(path, result)
    }

    /// Hands bytes to the browser as a file download.
    pub(super) fn save_bytes(bytes: &[u8], filename: &str) -> Result<(), String> {
        let document = document()?;
        let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes));
        let blob = web_sys::Blob::new_with_u8_array_sequence(&parts)
            .map_err(|_| "failed to build download blob".to_string())?;
        let url = web_sys::Url::create_object_url_with_blob(&blob)
            .map_err(|_| "failed to create object url".to_string())?;
        let anchor = document
            .create_element("a")
            .map_err(|_| "failed to create download link".to_string())?
            .dyn_into::<web_sys::HtmlAnchorElement>()
            .map_err(|_| "download link is not an anchor".to_string())?;
        anchor.set_href(&url);
        anchor.set_download(filename);
        set_display(&anchor, "none");
        if let Some(body) = document.body() {
            let _ = body.append_child(&anchor);
            anchor.click();
            anchor.remove();
        }
        let _ = web_sys::Url::revoke_object_url(&url);
        Ok(())
    }
