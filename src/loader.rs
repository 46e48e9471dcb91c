//!
//! Asynchronous loading of external stylesheets and scripts into the
//! document, with single-resolution completion semantics and a timeout
//! fallback for scripts.
//!

use crate::element;
use crate::environment::{Capabilities, DocumentEnvironment};
use crate::error::Error;
use crate::result::Result;
use futures::future::join_all;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsValue;
use web_sys::Element;
use workflow_core::channel::{oneshot, Sender};
use workflow_core::task::sleep;
use workflow_core::time::{Duration, Instant};
use workflow_log::*;
use workflow_wasm::callback::*;
use workflow_wasm::timers::set_timeout;

/// Default script load timeout (5000 ms)
pub const DEFAULT_SCRIPT_TIMEOUT: Duration = Duration::from_millis(5_000);

/// One-shot resolution guard shared by all completion signals of a single
/// load request. Whichever signal settles first wins; later signals are
/// discarded.
#[derive(Clone, Default)]
pub(crate) struct Settlement(Arc<AtomicBool>);

impl Settlement {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` for the first caller, `false` for everyone after.
    pub fn settle(&self) -> bool {
        !self.0.swap(true, Ordering::SeqCst)
    }

    pub fn is_settled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

fn deliver(settlement: &Settlement, sender: &Sender<Result<()>>, outcome: Result<()>) {
    if settlement.settle() {
        sender
            .try_send(outcome)
            .expect("loader: unable to post load notification");
    }
}

/// Load an external stylesheet as a `<link rel=stylesheet>` element
/// appended to the document `head` (document element fallback).
///
/// On engines with native `load`/`error` eventing the returned future
/// resolves on the first of those events. Older engines cannot observe
/// stylesheet load state at all; there the future resolves optimistically
/// after yielding once to the event loop. No timeout applies.
pub async fn load_stylesheet(
    env: &DocumentEnvironment,
    caps: &Capabilities,
    url: &str,
) -> Result<()> {
    let doc = env.document();
    let link = element::create_element(
        &doc,
        "link",
        &[("rel", "stylesheet"), ("href", url), ("media", "all")],
        None,
    )?;

    if !caps.font_face {
        element::append_to_section(&doc, "head", &link)?;
        sleep(Duration::from_millis(0)).await;
        return Ok(());
    }

    let settlement = Settlement::new();
    let (sender, receiver) = oneshot();

    let on_load = {
        let settlement = settlement.clone();
        let sender = sender.clone();
        callback!(move |_event: web_sys::Event| {
            deliver(&settlement, &sender, Ok(()));
        })
    };
    let on_error = {
        let settlement = settlement.clone();
        let sender = sender.clone();
        let url = url.to_string();
        callback!(move |_event: web_sys::Event| {
            deliver(&settlement, &sender, Err(Error::StylesheetLoad(url.clone())));
        })
    };

    link.add_event_listener_with_callback("load", on_load.as_ref())?;
    link.add_event_listener_with_callback("error", on_error.as_ref())?;
    element::append_to_section(&doc, "head", &link)?;

    let outcome = receiver.recv().await?;

    // the link element stays in the document; only the listeners go
    link.remove_event_listener_with_callback("load", on_load.as_ref())?;
    link.remove_event_listener_with_callback("error", on_error.as_ref())?;

    outcome
}

/// Load a group of stylesheets concurrently, yielding the first error
/// encountered (all loads run to completion regardless).
pub async fn load_stylesheets(
    env: &DocumentEnvironment,
    caps: &Capabilities,
    urls: &[&str],
) -> Result<()> {
    let futures = urls
        .iter()
        .map(|url| load_stylesheet(env, caps, url))
        .collect::<Vec<_>>();
    for result in join_all(futures).await {
        result?;
    }
    Ok(())
}

cfg_if::cfg_if! {
    if #[cfg(target_arch = "wasm32")] {
        /// Fire-and-forget stylesheet load. Errors are logged rather than
        /// surfaced; the supplied [`Release`](crate::gate::Release) is
        /// released once the load settles either way.
        pub fn load_stylesheet_nowait(
            env: &DocumentEnvironment,
            caps: &Capabilities,
            url: &str,
            release: crate::gate::Release,
        ) {
            let env = env.clone();
            let caps = *caps;
            let url = url.to_string();
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(err) = load_stylesheet(&env, &caps, &url).await {
                    log_error!("{}", err);
                }
                release.release();
            });
        }
    }
}

/// Load an external script with the [default timeout](DEFAULT_SCRIPT_TIMEOUT).
pub async fn load_script(env: &DocumentEnvironment, url: &str) -> Result<Element> {
    load_script_with_timeout(env, url, DEFAULT_SCRIPT_TIMEOUT).await
}

/// Load an external script as a `<script src=url>` element appended to the
/// document `head`, resolving on the first of: `load` event, legacy
/// ready-state transition to `complete`/`loaded`, `error` event, or timeout
/// expiry. Later signals are discarded. On resolution the element's
/// listeners are detached and the element is removed from the document
/// regardless of outcome; the returned element is the detached `<script>`.
///
/// A document without a `head` element yields [`Error::MissingHead`]
/// before any element is created.
pub async fn load_script_with_timeout(
    env: &DocumentEnvironment,
    url: &str,
    timeout: Duration,
) -> Result<Element> {
    let doc = env.document();
    doc.get_elements_by_tag_name("head")
        .item(0)
        .ok_or(Error::MissingHead)?;

    let start = Instant::now();
    let script = element::create_element(&doc, "script", &[("src", url)], None)?;

    let settlement = Settlement::new();
    let (sender, receiver) = oneshot();

    let on_load = {
        let settlement = settlement.clone();
        let sender = sender.clone();
        callback!(move |_event: web_sys::Event| {
            deliver(&settlement, &sender, Ok(()));
        })
    };
    let on_ready_state = {
        let settlement = settlement.clone();
        let sender = sender.clone();
        let script = script.clone();
        callback!(move |_event: web_sys::Event| {
            if ready_state_complete(&script) {
                deliver(&settlement, &sender, Ok(()));
            }
        })
    };
    let on_error = {
        let settlement = settlement.clone();
        let sender = sender.clone();
        let url = url.to_string();
        callback!(move |_event: web_sys::Event| {
            deliver(&settlement, &sender, Err(Error::ScriptLoad(url.clone())));
        })
    };

    script.add_event_listener_with_callback("load", on_load.as_ref())?;
    script.add_event_listener_with_callback("readystatechange", on_ready_state.as_ref())?;
    script.add_event_listener_with_callback("error", on_error.as_ref())?;
    element::append_to_section(&doc, "head", &script)?;

    let on_timeout = {
        let settlement = settlement.clone();
        let sender = sender.clone();
        let url = url.to_string();
        Closure::<dyn FnMut()>::new(move || {
            deliver(&settlement, &sender, Err(Error::ScriptTimeout(url.clone())));
        })
    };
    // dropping the handle on scope exit clears a still-pending timer
    let _timeout_handle = set_timeout(&on_timeout, timeout.as_millis() as u32)?;

    let outcome = receiver.recv().await?;

    script.remove_event_listener_with_callback("load", on_load.as_ref())?;
    script.remove_event_listener_with_callback("readystatechange", on_ready_state.as_ref())?;
    script.remove_event_listener_with_callback("error", on_error.as_ref())?;
    element::remove(&script);

    match outcome {
        Ok(()) => {
            log_info!("loaded script {} in {} msec", url, start.elapsed().as_millis());
            Ok(script)
        }
        Err(err) => {
            log_error!("{}", err);
            Err(err)
        }
    }
}

/// Legacy engines report script progress through the element's
/// `readyState` property instead of `load` events. The property is not
/// part of the standardized element surface, hence the reflective read.
fn ready_state_complete(element: &Element) -> bool {
    let state = js_sys::Reflect::get(element, &JsValue::from_str("readyState"))
        .ok()
        .and_then(|value| value.as_string())
        .unwrap_or_default();
    let regex = regex::Regex::new(r"^(complete|loaded)$").unwrap();
    regex.is_match(&state)
}

#[cfg(not(target_arch = "wasm32"))]
#[cfg(test)]
mod test {
    use super::*;
    use workflow_core::task::spawn;

    #[tokio::test]
    async fn settlement_settles_once() {
        let settlement = Settlement::new();
        assert!(!settlement.is_settled());
        assert!(settlement.settle());
        assert!(settlement.is_settled());
        assert!(!settlement.settle());
        assert!(!settlement.settle());
    }

    #[tokio::test]
    async fn simultaneous_signals_resolve_once() {
        let settlement = Settlement::new();
        let (sender, receiver) = oneshot();

        // `load` followed by a ready-state transition for the same request
        deliver(&settlement, &sender, Ok(()));
        deliver(&settlement, &sender, Ok(()));

        assert!(receiver.recv().await.unwrap().is_ok());
        assert!(receiver.try_recv().is_err());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn load_before_timeout_resolves_success() {
        let settlement = Settlement::new();
        let (sender, receiver) = oneshot();

        {
            let settlement = settlement.clone();
            let sender = sender.clone();
            spawn(async move {
                sleep(Duration::from_millis(10)).await;
                deliver(&settlement, &sender, Ok(()));
            });
        }
        {
            let settlement = settlement.clone();
            let sender = sender.clone();
            spawn(async move {
                sleep(Duration::from_millis(200)).await;
                deliver(
                    &settlement,
                    &sender,
                    Err(Error::ScriptTimeout("test".to_string())),
                );
            });
        }

        assert!(receiver.recv().await.unwrap().is_ok());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn timeout_before_load_resolves_timeout() {
        let settlement = Settlement::new();
        let (sender, receiver) = oneshot();

        {
            let settlement = settlement.clone();
            let sender = sender.clone();
            spawn(async move {
                sleep(Duration::from_millis(10)).await;
                deliver(
                    &settlement,
                    &sender,
                    Err(Error::ScriptTimeout("test".to_string())),
                );
            });
        }
        {
            let settlement = settlement.clone();
            let sender = sender.clone();
            spawn(async move {
                sleep(Duration::from_millis(200)).await;
                deliver(&settlement, &sender, Ok(()));
            });
        }

        let outcome = receiver.recv().await.unwrap();
        assert!(matches!(outcome, Err(Error::ScriptTimeout(_))));

        // allow the late signal to arrive and verify it was discarded
        sleep(Duration::from_millis(300)).await;
        assert!(settlement.is_settled());
        assert!(receiver.try_recv().is_err());
    }
}
