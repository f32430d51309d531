//! DOM helpers: element lookup and event listeners that detach on drop

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, CssStyleDeclaration, Document, Element, Event, EventTarget,
    HtmlElement, Window,
};

use crate::core::Viewport;
use crate::error::{FieldError, Result};

pub fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| FieldError::MissingElement("window".into()))
}

pub fn document() -> Result<Document> {
    window()?
        .document()
        .ok_or_else(|| FieldError::MissingElement("document".into()))
}

/// Current window size in CSS pixels plus the device pixel ratio
pub fn viewport(window: &Window) -> Result<Viewport> {
    let width = window.inner_width()?.as_f64().unwrap_or(0.0);
    let height = window.inner_height()?.as_f64().unwrap_or(0.0);
    Ok(Viewport::new(
        width as f32,
        height as f32,
        window.device_pixel_ratio(),
    ))
}

/// All elements matching `selector`, in document order
pub fn query_all(root: &Document, selector: &str) -> Vec<Element> {
    let Ok(nodes) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn query(root: &Document, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

pub fn style(element: &Element) -> Option<CssStyleDeclaration> {
    element.dyn_ref::<HtmlElement>().map(|e| e.style())
}

/// Set several style properties, ignoring elements without inline style
pub fn set_styles(element: &Element, properties: &[(&str, &str)]) {
    let Some(style) = style(element) else {
        return;
    };
    for (name, value) in properties {
        if let Err(e) = style.set_property(name, value) {
            tracing::debug!(property = *name, error = ?e, "Failed to set style");
        }
    }
}

/// Event listener that is removed from its target when dropped
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new<F>(target: &EventTarget, event: &'static str, handler: F) -> Result<Self>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }

    /// Passive listener for high-frequency events (scroll, mousemove)
    pub fn passive<F>(target: &EventTarget, event: &'static str, handler: F) -> Result<Self>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        let options = AddEventListenerOptions::new();
        options.set_passive(true);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            callback.as_ref().unchecked_ref(),
            &options,
        )?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref())
        {
            tracing::warn!(event = self.event, error = ?e, "Failed to remove listener");
        }
    }
}
