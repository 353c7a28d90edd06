//! WASM entry point for the slide-compare plugin.
//!
//! The JavaScript plugin class forwards its `onload` here with itself and its
//! saved settings. Everything after that (registration, rendering, pointer
//! handling, unload) runs in Rust.

mod host;

pub use host::*;

use std::rc::Rc;

use slide_compare_core::{SlideCompare, SlideCompareOptions};
use wasm_bindgen::prelude::*;

/// Initialize panic hook and console logging.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    use tracing::Level;
    use tracing::subscriber::set_global_default;
    use tracing_subscriber::Registry;
    use tracing_subscriber::layer::SubscriberExt;

    let console_level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let wasm_layer = tracing_wasm::WASMLayer::new(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(console_level)
            .build(),
    );

    // Another plugin may already own the global subscriber.
    let _ = set_global_default(Registry::default().with(wasm_layer));
}

/// Register the comparison block processor on `plugin`.
///
/// # Arguments
/// * `plugin` - The host plugin instance
/// * `settings` - Saved plugin data; `undefined` or `null` means defaults
#[wasm_bindgen]
pub fn onload(plugin: Plugin, settings: JsValue) -> Result<(), JsError> {
    let options = load_options(settings)?;
    tracing::info!(language = %options.language, "slide-compare loaded");
    let mut registry = PluginRegistry::new(plugin);
    Rc::new(SlideCompare::new(options)).onload(&mut registry);
    Ok(())
}

fn load_options(settings: JsValue) -> Result<SlideCompareOptions, JsError> {
    if settings.is_undefined() || settings.is_null() {
        return Ok(SlideCompareOptions::default());
    }
    serde_wasm_bindgen::from_value(settings)
        .map_err(|e| JsError::new(&format!("Invalid settings: {}", e)))
}
