use thiserror::Error;

/// Reasons a backdrop could not be mounted or configured.
///
/// None of these reach the page: mounting logs them and gives up quietly.
#[derive(Debug, Error)]
pub enum BackdropError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("canvas `{0}` not found")]
    CanvasNotFound(String),
    #[error("element `{0}` is not a canvas")]
    NotACanvas(String),
    #[error("2d rendering context unavailable")]
    ContextUnavailable,
    #[error("unknown backdrop kind `{0}`")]
    UnknownKind(String),
    #[error("invalid value `{value}` for `{key}`")]
    InvalidSetting { key: String, value: String },
    #[error("javascript error: {0}")]
    Js(String),
}

pub type Result<T> = std::result::Result<T, BackdropError>;

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for BackdropError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Js(format!("{value:?}"))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<BackdropError> for wasm_bindgen::JsValue {
    fn from(err: BackdropError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
