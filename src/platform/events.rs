//! Scoped event subscriptions

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::EventTarget;

use super::lifecycle::Scope;

/// Subscribe `handler` to `event` on `target` until `scope` closes.
///
/// The closure is owned by the release callback, so it lives exactly as
/// long as the subscription.
pub fn listen<E, F>(scope: &mut Scope, target: &EventTarget, event: &'static str, handler: F)
where
    E: JsCast + 'static,
    F: FnMut(E) + 'static,
{
    subscribe(scope, target, event, false, handler);
}

/// Like [`listen`] but in the capture phase, for events that don't bubble
/// (media `error`, `load`).
pub fn listen_capture<E, F>(
    scope: &mut Scope,
    target: &EventTarget,
    event: &'static str,
    handler: F,
) where
    E: JsCast + 'static,
    F: FnMut(E) + 'static,
{
    subscribe(scope, target, event, true, handler);
}

fn subscribe<E, F>(
    scope: &mut Scope,
    target: &EventTarget,
    event: &'static str,
    capture: bool,
    handler: F,
) where
    E: JsCast + 'static,
    F: FnMut(E) + 'static,
{
    let mut handler = handler;
    let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
        if let Ok(event) = event.dyn_into::<E>() {
            handler(event);
        }
    });

    if let Err(e) = target.add_event_listener_with_callback_and_bool(
        event,
        closure.as_ref().unchecked_ref(),
        capture,
    ) {
        log::warn!("Failed to listen for {}: {:?}", event, e);
        return;
    }

    let target = target.clone();
    scope.defer(move || {
        let _ = target.remove_event_listener_with_callback_and_bool(
            event,
            closure.as_ref().unchecked_ref(),
            capture,
        );
        drop(closure);
    });
}
