//!
//! Errors produced by the [`webfont_dom`](super) crate
//!
use thiserror::Error;
use wasm_bindgen::JsValue;
use workflow_core::channel::RecvError;
use workflow_core::sendable::Sendable;

/// Errors produced by the [`webfont_dom`](super) crate
#[derive(Error, Debug)]
pub enum Error {
    /// Custom string error
    #[error("{0}")]
    String(String),

    /// Error containing [`wasm_bindgen::JsValue`] value
    #[error("{0:?}")]
    JsValue(Sendable<JsValue>),

    #[error("{0}")]
    RecvError(RecvError),

    /// Stylesheet `error` event fired before `load`
    #[error("stylesheet failed to load: {0}")]
    StylesheetLoad(String),

    /// Script `error` event fired before `load` or a ready-state transition
    #[error("script failed to load: {0}")]
    ScriptLoad(String),

    /// Timeout elapsed before any load signal was observed
    #[error("script load timeout: {0}")]
    ScriptTimeout(String),

    #[error("unable to locate the document head element")]
    MissingHead,

    /// Argument misuse - the supplied variant descriptor does not
    /// match the `[nio][1-9]` form
    #[error("invalid font variant descriptor `{0}`")]
    InvalidVariant(String),
}

unsafe impl Send for Error {}
unsafe impl Sync for Error {}

impl From<String> for Error {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Error {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<JsValue> for Error {
    fn from(v: JsValue) -> Self {
        Self::JsValue(Sendable(v))
    }
}

impl From<RecvError> for Error {
    fn from(err: RecvError) -> Self {
        Self::RecvError(err)
    }
}

impl From<workflow_wasm::timers::Error> for Error {
    fn from(err: workflow_wasm::timers::Error) -> Self {
        Self::String(err.to_string())
    }
}

impl From<Error> for JsValue {
    fn from(err: Error) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
