//! Page interactions: typing text, stat counters, nav, smooth scroll, hover
//! tweens, photo tilt, marquee pause and reveal-on-scroll.
//!
//! Each effect is optional: a missing element just skips that effect.

use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, MouseEvent, ScrollBehavior, ScrollToOptions, Window,
};

use super::dom::{document, query, query_all, set_styles, window, Listener};
use super::scheduler::{Recurring, Schedule};
use crate::config::PageConfig;
use crate::core::page::{
    anchor_scroll_top, nav_is_scrolled, tilt_angles, tilt_transform, Reveal, RevealTrigger,
    HOVER_TWEENS, REVEALS,
};
use crate::core::typewriter::{self, Typewriter};
use crate::core::{CounterFrame, StatCounter};
use crate::error::Result;

/// IntersectionObserver that disconnects when dropped
struct Observer {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

impl Observer {
    fn new<F>(options: &IntersectionObserverInit, mut on_visible: F) -> Result<Self>
    where
        F: FnMut(Element) + 'static,
    {
        let callback = Closure::wrap(Box::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    if entry.is_intersecting() {
                        let target = entry.target();
                        observer.unobserve(&target);
                        on_visible(target);
                    }
                }
            },
        )
            as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

        let observer = IntersectionObserver::new_with_options(
            callback.as_ref().unchecked_ref(),
            options,
        )?;
        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    fn observe(&self, element: &Element) {
        self.observer.observe(element);
    }
}

impl Drop for Observer {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Everything the page layer keeps alive. Dropping it undoes all wiring.
#[derive(Default)]
pub struct PageEffects {
    listeners: Vec<Listener>,
    tasks: Vec<Recurring>,
    observers: Vec<Observer>,
    /// Counters started from observer callbacks
    counters: Rc<RefCell<Vec<Recurring>>>,
}

impl PageEffects {
    pub fn mount(config: &PageConfig) -> Result<Self> {
        let window = window()?;
        let document = document()?;
        let mut effects = Self::default();

        effects.mount_nav(&window, &document)?;
        effects.mount_smooth_scroll(&window, &document)?;
        effects.mount_typewriter(&document, config)?;
        effects.mount_counters(&document)?;
        effects.mount_hover_tweens(&document)?;
        effects.mount_marquee(&document)?;
        effects.mount_photo_tilt(&document)?;
        effects.mount_reveals(&window, &document)?;

        info!(
            listeners = effects.listeners.len(),
            observers = effects.observers.len(),
            "Page effects mounted"
        );
        Ok(effects)
    }

    fn mount_nav(&mut self, window: &Window, document: &Document) -> Result<()> {
        if let Some(nav) = query(document, ".nav") {
            let scroll_window = window.clone();
            self.listeners.push(Listener::passive(window, "scroll", move |_| {
                let scrolled = nav_is_scrolled(scroll_window.scroll_y().unwrap_or(0.0));
                let _ = nav.class_list().toggle_with_force("scrolled", scrolled);
            })?);
        }

        let (Some(toggle), Some(menu)) = (
            query(document, ".menu-toggle"),
            query(document, ".mobile-menu"),
        ) else {
            debug!("No mobile menu, skipping toggle");
            return Ok(());
        };

        let (t, m) = (toggle.clone(), menu.clone());
        self.listeners.push(Listener::new(&toggle, "click", move |_| {
            let _ = t.class_list().toggle("active");
            let _ = m.class_list().toggle("active");
        })?);

        for link in query_all(document, ".mobile-menu a") {
            let (t, m) = (toggle.clone(), menu.clone());
            self.listeners.push(Listener::new(&link, "click", move |_| {
                let _ = t.class_list().remove_1("active");
                let _ = m.class_list().remove_1("active");
            })?);
        }
        Ok(())
    }

    fn mount_smooth_scroll(&mut self, window: &Window, document: &Document) -> Result<()> {
        for anchor in query_all(document, "a[href^=\"#\"]") {
            let (w, d, a) = (window.clone(), document.clone(), anchor.clone());
            self.listeners.push(Listener::new(&anchor, "click", move |event: Event| {
                event.prevent_default();
                let Some(href) = a.get_attribute("href") else {
                    return;
                };
                // A bare "#" is not a valid selector
                if href.len() < 2 {
                    return;
                }
                let Some(target) = query(&d, &href) else {
                    return;
                };
                let top = anchor_scroll_top(
                    target.get_bounding_client_rect().top(),
                    w.page_y_offset().unwrap_or(0.0),
                );
                let options = ScrollToOptions::new();
                options.set_top(top);
                options.set_behavior(ScrollBehavior::Smooth);
                w.scroll_to_with_scroll_to_options(&options);
            })?);
        }
        Ok(())
    }

    fn mount_typewriter(&mut self, document: &Document, config: &PageConfig) -> Result<()> {
        let Some(element) = query(document, ".role-text") else {
            return Ok(());
        };
        let Some(mut writer) = Typewriter::new(config.roles.as_slice()) else {
            warn!("No roles to type");
            return Ok(());
        };

        self.tasks.push(Recurring::start(
            "typewriter",
            Schedule::After(typewriter::START_DELAY),
            move || {
                let frame = writer.tick();
                element.set_text_content(Some(&frame.text));
                Schedule::After(frame.delay)
            },
        )?);
        Ok(())
    }

    fn mount_counters(&mut self, document: &Document) -> Result<()> {
        let stats = query_all(document, ".stat-num");
        if stats.is_empty() {
            return Ok(());
        }

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(0.5));

        let counters = self.counters.clone();
        let observer = Observer::new(&options, move |element| {
            let target = element.get_attribute("data-target").unwrap_or_default();
            let Some(mut counter) = StatCounter::parse(&target) else {
                warn!(target = %target, "Stat counter has no numeric data-target");
                return;
            };
            // First value goes up immediately, the rest on animation frames
            let first = counter.tick();
            element.set_text_content(Some(&first.value().to_string()));
            if let CounterFrame::Done(_) = first {
                return;
            }
            let shown = element.clone();
            match Recurring::start("stat-counter", Schedule::Frame, move || {
                let frame = counter.tick();
                shown.set_text_content(Some(&frame.value().to_string()));
                match frame {
                    CounterFrame::Counting(_) => Schedule::Frame,
                    CounterFrame::Done(_) => Schedule::Stop,
                }
            }) {
                Ok(task) => counters.borrow_mut().push(task),
                Err(e) => warn!(error = %e, "Failed to start stat counter"),
            }
        })?;

        for stat in &stats {
            observer.observe(stat);
        }
        self.observers.push(observer);
        Ok(())
    }

    fn mount_hover_tweens(&mut self, document: &Document) -> Result<()> {
        for tween in HOVER_TWEENS {
            for trigger in query_all(document, tween.trigger) {
                let animated = match tween.target {
                    Some(selector) => match trigger.query_selector(selector).ok().flatten() {
                        Some(el) => el,
                        None => continue,
                    },
                    None => trigger.clone(),
                };
                let transition = format!("transform {}s", tween.seconds);
                set_styles(&animated, &[("transition", transition.as_str())]);

                let el = animated.clone();
                let enter = tween.enter;
                self.listeners.push(Listener::new(&trigger, "mouseenter", move |_| {
                    set_styles(&el, &[("transform", enter)]);
                })?);

                let el = animated;
                let leave = tween.leave;
                self.listeners.push(Listener::new(&trigger, "mouseleave", move |_| {
                    set_styles(&el, &[("transform", leave)]);
                })?);
            }
        }
        Ok(())
    }

    fn mount_marquee(&mut self, document: &Document) -> Result<()> {
        let (Some(cell), Some(track)) = (
            query(document, ".cell-tech"),
            query(document, ".tech-track"),
        ) else {
            return Ok(());
        };

        let t = track.clone();
        self.listeners.push(Listener::new(&cell, "mouseenter", move |_| {
            set_styles(&t, &[("animation-play-state", "paused")]);
        })?);
        self.listeners.push(Listener::new(&cell, "mouseleave", move |_| {
            set_styles(&track, &[("animation-play-state", "running")]);
        })?);
        Ok(())
    }

    fn mount_photo_tilt(&mut self, document: &Document) -> Result<()> {
        let Some(cell) = query(document, ".cell-photo") else {
            return Ok(());
        };
        let Some(img) = cell.query_selector("img").ok().flatten() else {
            return Ok(());
        };

        let (c, i) = (cell.clone(), img.clone());
        self.listeners.push(Listener::passive(&cell, "mousemove", move |event| {
            let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let rect = c.get_bounding_client_rect();
            let (rx, ry) = tilt_angles(
                mouse.client_x() as f64 - rect.left(),
                mouse.client_y() as f64 - rect.top(),
                rect.width(),
                rect.height(),
            );
            let transform = tilt_transform(rx, ry);
            set_styles(
                &i,
                &[
                    ("transition", "transform 0.3s"),
                    ("transform", transform.as_str()),
                ],
            );
        })?);

        self.listeners.push(Listener::new(&cell, "mouseleave", move |_| {
            let transform = tilt_transform(0.0, 0.0);
            set_styles(
                &img,
                &[
                    ("transition", "transform 0.5s"),
                    ("transform", transform.as_str()),
                ],
            );
        })?);
        Ok(())
    }

    fn mount_reveals(&mut self, window: &Window, document: &Document) -> Result<()> {
        let viewport_height = window.inner_height()?.as_f64().unwrap_or(0.0);
        for reveal in REVEALS {
            let elements = query_all(document, reveal.selector);
            if elements.is_empty() {
                continue;
            }
            for (index, element) in elements.iter().enumerate() {
                hide(element, reveal, index);
            }

            match reveal.trigger {
                RevealTrigger::OnLoad => {
                    self.tasks.push(show_after_paint(elements)?);
                }
                RevealTrigger::OnScroll { .. } => {
                    let (passed, pending): (Vec<_>, Vec<_>) =
                        elements.into_iter().partition(|element| {
                            reveal.start_passed(
                                element.get_bounding_client_rect().top(),
                                viewport_height,
                            )
                        });
                    if !passed.is_empty() {
                        debug!(
                            selector = reveal.selector,
                            count = passed.len(),
                            "Revealing elements already scrolled past"
                        );
                        self.tasks.push(show_after_paint(passed)?);
                    }
                    if pending.is_empty() {
                        continue;
                    }

                    let options = IntersectionObserverInit::new();
                    if let Some(margin) = reveal.root_margin() {
                        options.set_root_margin(&margin);
                    }
                    let observer = Observer::new(&options, |element| show(&element))?;
                    for element in &pending {
                        observer.observe(element);
                    }
                    self.observers.push(observer);
                }
            }
        }
        Ok(())
    }
}

fn hide(element: &Element, reveal: &Reveal, index: usize) {
    let transform = reveal.hidden_transform();
    let transition = reveal.transition(index);
    set_styles(
        element,
        &[
            ("opacity", "0"),
            ("transform", transform.as_str()),
            ("transition", transition.as_str()),
        ],
    );
}

/// Show elements once their hidden state has been painted, so the
/// transition runs instead of snapping. Waits two frames.
fn show_after_paint(elements: Vec<Element>) -> Result<Recurring> {
    let mut frames_left = 2;
    Recurring::start("reveal", Schedule::Frame, move || {
        frames_left -= 1;
        if frames_left > 0 {
            return Schedule::Frame;
        }
        for element in &elements {
            show(element);
        }
        Schedule::Stop
    })
}

fn show(element: &Element) {
    set_styles(element, &[("opacity", "1"), ("transform", "none")]);
}

impl Drop for PageEffects {
    fn drop(&mut self) {
        let counters = self.counters.borrow().len();
        debug!(
            listeners = self.listeners.len(),
            tasks = self.tasks.len() + counters,
            "Page effects torn down"
        );
    }
}
