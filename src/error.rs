use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a readable reply.
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("malformed reply: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("missing element #{0}")]
    MissingElement(&'static str),
    /// A browser API returned an exception.
    #[error("browser call failed: {0}")]
    Js(String),
}

#[cfg(feature = "csr")]
impl From<gloo_net::Error> for ClientError {
    fn from(e: gloo_net::Error) -> Self {
        match e {
            gloo_net::Error::SerdeError(e) => ClientError::Decode(e),
            other => ClientError::Transport(other.to_string()),
        }
    }
}

#[cfg(feature = "csr")]
impl From<wasm_bindgen::JsValue> for ClientError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        ClientError::Js(format!("{:?}", value))
    }
}
