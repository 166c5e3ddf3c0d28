//! IntersectionObserver wiring for reveal targets

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
};

use super::dom::document;
use super::lifecycle::Scope;
use crate::consts::{REVEAL_CLASS, REVEALED_CLASS};
use crate::engine::{IntersectionEntry, RevealConfig, RevealSet, TargetId};

const ID_ATTR: &str = "data-reveal-id";

/// Ceiling on the ratio this entry's target can reach. `rootBounds` already
/// has the root margin applied.
fn max_ratio(entry: &IntersectionObserverEntry) -> Option<f64> {
    let root = entry.root_bounds()?;
    let height = entry.bounding_client_rect().height();
    (height > 0.0).then(|| (root.height() / height).min(1.0))
}

type ObserverClosure = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// Register every `.scroll-reveal` element with one shared observer.
///
/// Returns the flag set, or None if there is nothing to watch. The
/// observer disconnects when `scope` closes.
pub fn watch(scope: &mut Scope, config: RevealConfig) -> Option<Rc<RefCell<RevealSet>>> {
    let nodes = document()?
        .query_selector_all(&format!(".{REVEAL_CLASS}"))
        .ok()?;

    let set = Rc::new(RefCell::new(RevealSet::new(config)));
    let mut targets: Vec<Element> = Vec::with_capacity(nodes.length() as usize);
    for i in 0..nodes.length() {
        let Some(el) = nodes.get(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        let id = set.borrow_mut().observe();
        let _ = el.set_attribute(ID_ATTR, &id.0.to_string());
        targets.push(el);
    }
    if targets.is_empty() {
        log::debug!("No reveal targets in page");
        return None;
    }

    let callback: ObserverClosure = {
        let set = set.clone();
        let targets = targets.clone();
        Closure::new(move |entries: js_sys::Array, _observer: IntersectionObserver| {
            let batch: Vec<IntersectionEntry> = entries
                .iter()
                .filter_map(|v| v.dyn_into::<IntersectionObserverEntry>().ok())
                .filter_map(|e| {
                    let id = e.target().get_attribute(ID_ATTR)?.parse().ok()?;
                    let entry = IntersectionEntry::new(
                        TargetId(id),
                        e.is_intersecting(),
                        e.intersection_ratio(),
                    );
                    Some(match max_ratio(&e) {
                        Some(max) => entry.with_max_ratio(max),
                        None => entry,
                    })
                })
                .collect();

            for id in set.borrow_mut().on_intersection(&batch) {
                if let Some(el) = targets.get(id.0) {
                    let _ = el.class_list().add_1(REVEALED_CLASS);
                }
            }
        })
    };

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(config.threshold));
    init.set_root_margin(&config.root_margin());
    let observer = match IntersectionObserver::new_with_options(
        callback.as_ref().unchecked_ref(),
        &init,
    ) {
        Ok(o) => o,
        Err(e) => {
            log::warn!("IntersectionObserver unavailable: {:?}", e);
            return None;
        }
    };
    for el in &targets {
        observer.observe(el);
    }
    log::info!("Watching {} reveal targets", targets.len());

    {
        let set = set.clone();
        scope.defer(move || {
            observer.disconnect();
            set.borrow_mut().disconnect();
            drop(callback);
        });
    }
    Some(set)
}
