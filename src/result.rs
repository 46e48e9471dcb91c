//! Result type used by the [`webfont_dom`](super) crate
use wasm_bindgen::JsValue;

pub type JsResult<T> = std::result::Result<T, JsValue>;
pub type Result<T> = std::result::Result<T, crate::error::Error>;
