//! Cancellable requestAnimationFrame loop

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::dom::window;
use super::lifecycle::{CancelToken, Scope};

type FrameClosure = Closure<dyn FnMut(f64)>;

/// Run `tick` once per display refresh until `token` is cancelled or the
/// scope closes.
///
/// The token is checked at the top of every frame and a cancelled loop
/// stops rescheduling. Closing the scope also cancels the pending frame
/// request and drops the closure.
pub fn run<F>(scope: &mut Scope, token: CancelToken, tick: F)
where
    F: FnMut(f64) + 'static,
{
    let Some(win) = window() else {
        log::warn!("No window, animation loop not started");
        return;
    };

    let mut tick = tick;
    let slot: Rc<RefCell<Option<FrameClosure>>> = Rc::new(RefCell::new(None));
    let pending = Rc::new(Cell::new(None::<i32>));

    {
        let slot_inner = slot.clone();
        let pending_inner = pending.clone();
        let token = token.clone();
        let win = win.clone();
        *slot.borrow_mut() = Some(Closure::new(move |time: f64| {
            pending_inner.set(None);
            if token.is_cancelled() {
                return;
            }
            tick(time);
            if let Some(cb) = slot_inner.borrow().as_ref() {
                match win.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    Ok(id) => pending_inner.set(Some(id)),
                    Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
                }
            }
        }));
    }

    if let Some(cb) = slot.borrow().as_ref() {
        match win.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => pending.set(Some(id)),
            Err(e) => {
                log::error!("requestAnimationFrame failed: {:?}", e);
                return;
            }
        }
    }

    scope.cancel_on_close(&token);
    scope.defer(move || {
        if let Some(id) = pending.take() {
            let _ = win.cancel_animation_frame(id);
        }
        slot.borrow_mut().take();
    });
}
