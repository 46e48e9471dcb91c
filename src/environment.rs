//!
//! Document environment resolution (main window vs framed content window)
//! and one-time browser capability detection.
//!

use crate::result::Result;
use wasm_bindgen::JsValue;
use web_sys::{Document, Window};

/// Return the current browser [`web_sys::Window`]
pub fn window() -> Window {
    web_sys::window().unwrap()
}

/// A document environment - the main browser window paired with the
/// content window resources are loaded into. For framed contexts the
/// content window is the frame; protocol and hostname resolution fall
/// back to the main window where the frame cannot answer (`about:`
/// protocol, empty hostname).
#[derive(Clone)]
pub struct DocumentEnvironment {
    main: Window,
    content: Window,
}

impl DocumentEnvironment {
    pub fn new(main: Window, content: Option<Window>) -> Self {
        let content = content.unwrap_or_else(|| main.clone());
        Self { main, content }
    }

    /// Environment of the current browser window
    pub fn detect() -> Self {
        Self::new(window(), None)
    }

    /// The content window's [`web_sys::Document`]
    pub fn document(&self) -> Document {
        self.content.document().unwrap()
    }

    /// Protocol of the content location (`http:` or `https:`), deferring
    /// to the main window when the framed context reports `about:`
    pub fn protocol(&self) -> Result<String> {
        let protocol = self.content.location().protocol()?;
        if protocol == "about:" {
            Ok(self.main.location().protocol()?)
        } else {
            Ok(protocol)
        }
    }

    /// Hostname of the content location, deferring to the main window
    /// when the framed context reports none
    pub fn hostname(&self) -> Result<String> {
        let hostname = self.content.location().hostname()?;
        if hostname.is_empty() {
            Ok(self.main.location().hostname()?)
        } else {
            Ok(hostname)
        }
    }
}

/// Browser capabilities, detected once at startup and passed explicitly
/// into components that need them.
#[derive(Debug, Clone, Copy)]
pub struct Capabilities {
    /// `FontFace` API is available. Engines carrying it also deliver
    /// `load`/`error` events on `<link rel=stylesheet>` elements, so this
    /// doubles as the native stylesheet eventing signal.
    pub font_face: bool,
}

impl Capabilities {
    pub fn detect() -> Self {
        let font_face = js_sys::Reflect::has(&js_sys::global(), &JsValue::from_str("FontFace"))
            .unwrap_or(false);
        Self { font_face }
    }

    pub fn with_font_face(font_face: bool) -> Self {
        Self { font_face }
    }
}
