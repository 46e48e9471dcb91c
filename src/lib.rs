//!
//! [<img alt="github" src="https://img.shields.io/badge/github-workflow--rs-8da0cb?style=for-the-badge&labelColor=555555&color=8da0cb&logo=github" height="20">](https://github.com/workflow-rs/webfont-dom)
//! [<img alt="crates.io" src="https://img.shields.io/crates/v/webfont-dom.svg?maxAge=2592000&style=for-the-badge&color=fc8d62&logo=rust" height="20">](https://crates.io/crates/webfont-dom)
//! [<img alt="docs.rs" src="https://img.shields.io/badge/docs.rs-webfont--dom-56c2a5?maxAge=2592000&style=for-the-badge&logo=rust" height="20">](https://docs.rs/webfont-dom)
//! <img alt="license" src="https://img.shields.io/crates/l/webfont-dom.svg?maxAge=2592000&color=6ac&style=for-the-badge&logo=opensourceinitiative&logoColor=fff" height="20">
//! <img src="https://img.shields.io/badge/platform- wasm32/browser -informational?style=for-the-badge&color=50a0f0" height="20">
//!
//! DOM resource loading utilities.
//!
//! Provides run-time loading of external stylesheets and scripts as
//! [`<link>`](https://developer.mozilla.org/en-US/docs/Web/HTML/Element/link)
//! and [`<script>`](https://developer.mozilla.org/en-US/docs/Web/HTML/Element/script)
//! elements with single-resolution completion semantics and a timeout
//! fallback for scripts, alongside element class manipulation helpers
//! and web font family/variant normalization. This crate is useful for
//! web font activation flows where stylesheets carrying `@font-face`
//! rules and supporting scripts are loaded on demand.
//!
//! Example:
//!
//! ```rust ignore
//! use webfont_dom::environment::{Capabilities, DocumentEnvironment};
//! use webfont_dom::loader;
//!
//! let env = DocumentEnvironment::detect();
//! let caps = Capabilities::detect();
//! loader::load_stylesheet(&env, &caps, "https://example.org/fonts.css").await?;
//! ```

pub mod element;
pub mod environment;
pub mod error;
pub mod font;
pub mod gate;
pub mod loader;
pub mod result;
