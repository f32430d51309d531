//! Browser front end
//!
//! `mount()` wires the particle background and the page effects into the
//! current document and returns a handle; `Portfolio::destroy()` (or dropping
//! the handle on the JS side with `free()`) tears everything down.

mod background;
mod canvas;
mod dom;
mod page;
mod scheduler;

use tracing::{error, info, warn};
use wasm_bindgen::prelude::*;

use crate::config::FieldConfig;
use background::Background;
use page::PageEffects;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    // Initialize tracing for browser console
    tracing_wasm::set_as_global_default();
}

/// Handle owning the mounted background and page effects
#[wasm_bindgen]
pub struct Portfolio {
    background: Option<Background>,
    page: Option<PageEffects>,
}

#[wasm_bindgen]
impl Portfolio {
    /// Stop the animation loop, cancel timers and detach every listener
    pub fn destroy(&mut self) {
        self.background.take();
        self.page.take();
        info!("Portfolio torn down");
    }

    #[wasm_bindgen(getter, js_name = backgroundRunning)]
    pub fn background_running(&self) -> bool {
        self.background.as_ref().is_some_and(|bg| bg.is_running())
    }
}

/// Mount onto the current document. `config_json` may override any
/// `FieldConfig` field; an invalid config is the only hard error.
#[wasm_bindgen]
pub fn mount(config_json: Option<String>) -> Result<Portfolio, JsValue> {
    let config = match config_json {
        Some(json) => FieldConfig::from_json(&json)?,
        None => FieldConfig::default(),
    };

    // The background is decorative: without it the page still works.
    let background = match Background::mount(&config) {
        Ok(bg) => Some(bg),
        Err(e) => {
            error!(error = %e, "Particle background unavailable");
            None
        }
    };

    let page = match PageEffects::mount(&config.page) {
        Ok(effects) => Some(effects),
        Err(e) => {
            warn!(error = %e, "Page effects unavailable");
            None
        }
    };

    Ok(Portfolio { background, page })
}
