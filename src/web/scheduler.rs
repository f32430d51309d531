//! Self-rescheduling browser callbacks with cancellation
//!
//! A `Recurring` task asks the host for the next animation frame or timeout
//! only after its step has returned, so runs never overlap. Dropping the task
//! cancels whatever is pending and releases the callback.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use super::dom::window;
use crate::error::Result;

/// What a step wants next
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Schedule {
    /// Run again before the next paint
    Frame,
    /// Run again after a delay
    After(Duration),
    Stop,
}

#[derive(Clone, Copy, Debug)]
enum Pending {
    Frame(i32),
    Timeout(i32),
}

type CallbackSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

pub struct Recurring {
    name: &'static str,
    slot: CallbackSlot,
    pending: Rc<Cell<Option<Pending>>>,
}

impl Recurring {
    /// Schedule `step` according to `first`, then as each step requests
    pub fn start<F>(name: &'static str, first: Schedule, mut step: F) -> Result<Self>
    where
        F: FnMut() -> Schedule + 'static,
    {
        let slot: CallbackSlot = Rc::new(RefCell::new(None));
        let pending: Rc<Cell<Option<Pending>>> = Rc::new(Cell::new(None));

        let weak_slot: Weak<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::downgrade(&slot);
        let pending_clone = pending.clone();
        let callback = Closure::wrap(Box::new(move || {
            pending_clone.set(None);
            let next = step();
            if next == Schedule::Stop {
                debug!(task = name, "Recurring task finished");
                return;
            }
            let Some(slot) = weak_slot.upgrade() else {
                return;
            };
            let slot = slot.borrow();
            let Some(callback) = slot.as_ref() else {
                return;
            };
            match request(next, callback) {
                Ok(p) => pending_clone.set(p),
                Err(e) => warn!(task = name, error = %e, "Failed to reschedule"),
            }
        }) as Box<dyn FnMut()>);

        let first_pending = request(first, &callback)?;
        pending.set(first_pending);
        *slot.borrow_mut() = Some(callback);

        Ok(Self {
            name,
            slot,
            pending,
        })
    }

    pub fn cancel(&mut self) {
        if let Some(p) = self.pending.take() {
            if let Ok(window) = window() {
                let result = match p {
                    Pending::Frame(id) => window.cancel_animation_frame(id),
                    Pending::Timeout(id) => {
                        window.clear_timeout_with_handle(id);
                        Ok(())
                    }
                };
                if let Err(e) = result {
                    warn!(task = self.name, error = ?e, "Failed to cancel pending run");
                }
            }
        }
        self.slot.borrow_mut().take();
    }
}

impl Drop for Recurring {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn request(next: Schedule, callback: &Closure<dyn FnMut()>) -> Result<Option<Pending>> {
    let function = callback.as_ref().unchecked_ref();
    match next {
        Schedule::Frame => {
            let id = window()?.request_animation_frame(function)?;
            Ok(Some(Pending::Frame(id)))
        }
        Schedule::After(delay) => {
            let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
            let id = window()?
                .set_timeout_with_callback_and_timeout_and_arguments_0(function, millis)?;
            Ok(Some(Pending::Timeout(id)))
        }
        Schedule::Stop => Ok(None),
    }
}
