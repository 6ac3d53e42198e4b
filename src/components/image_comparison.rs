//! Before/after comparison with a draggable divider.

use leptos::ev;
use leptos::html::Div;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::slider::{ContainerGeometry, DividerDrag, PointerKind};

#[component]
pub fn ImageComparison(
    /// Original photo, shown left of the divider
    #[prop(into)]
    before_src: String,
    /// Restored photo, shown right of the divider
    #[prop(into)]
    after_src: String,
) -> impl IntoView {
    let container_ref = NodeRef::<Div>::new();
    let drag = RwSignal::new(DividerDrag::default());
    let (container_width, set_container_width) = signal(0.0_f64);
    let observer_slot = StoredValue::new_local(
        None::<(web_sys::ResizeObserver, Closure<dyn FnMut(js_sys::Array)>)>,
    );

    // Track the container width so the "before" image keeps its full size
    // while the clipping layer narrows.
    Effect::new(move |_| {
        let Some(container) = container_ref.get() else {
            return;
        };
        if observer_slot.with_value(|slot| slot.is_some()) {
            return;
        }

        set_container_width.set(container.get_bounding_client_rect().width());

        let callback = Closure::<dyn FnMut(js_sys::Array)>::new(move |entries: js_sys::Array| {
            for entry in entries.iter() {
                let entry: web_sys::ResizeObserverEntry = entry.unchecked_into();
                let _ = set_container_width.try_set(entry.content_rect().width());
            }
        });

        match web_sys::ResizeObserver::new(callback.as_ref().unchecked_ref()) {
            Ok(observer) => {
                observer.observe(&container);
                observer_slot.set_value(Some((observer, callback)));
            }
            Err(e) => {
                web_sys::console::error_1(&e);
            }
        }
    });

    // Both input adapters end up here; geometry is re-read on every move.
    let move_divider = move |kind: PointerKind, client_x: f64| {
        if !drag.with_untracked(|d| d.is_dragging()) {
            return false;
        }
        let Some(container) = container_ref.get_untracked() else {
            return false;
        };
        let geometry = ContainerGeometry::from_element(&container);
        let mut moved = false;
        drag.update(|d| moved = d.pointer_move(kind, client_x, geometry));
        moved
    };

    let release = move |kind: PointerKind| {
        if drag.with_untracked(|d| d.is_dragging()) {
            drag.update(|d| d.pointer_up(kind));
        }
    };

    let mouse_move = window_event_listener(ev::mousemove, move |ev: web_sys::MouseEvent| {
        if move_divider(PointerKind::Mouse, ev.client_x() as f64) {
            ev.prevent_default();
        }
    });
    let mouse_up = window_event_listener(ev::mouseup, move |_| release(PointerKind::Mouse));
    let touch_end = window_event_listener(ev::touchend, move |_| release(PointerKind::Touch));
    let touch_cancel =
        window_event_listener(ev::touchcancel, move |_| release(PointerKind::Touch));

    on_cleanup(move || {
        mouse_move.remove();
        mouse_up.remove();
        touch_end.remove();
        touch_cancel.remove();
        let _ = observer_slot.try_update_value(|slot| {
            if let Some((observer, _callback)) = slot.take() {
                observer.disconnect();
            }
        });
    });

    let position = move || drag.with(|d| d.position());

    view! {
        <div
            node_ref=container_ref
            class="comparison"
            class:comparison-dragging=move || drag.with(|d| d.is_dragging())
            style="touch-action: none"
            on:touchmove=move |ev: web_sys::TouchEvent| {
                if let Some(touch) = ev.touches().get(0) {
                    if move_divider(PointerKind::Touch, touch.client_x() as f64) {
                        ev.prevent_default();
                    }
                }
            }
        >
            <style>{include_str!("image_comparison.css")}</style>

            <img src=after_src class="comparison-after" alt="Restored" draggable="false" />

            <div class="comparison-before-clip" style:width=move || format!("{}%", position())>
                <img
                    src=before_src
                    class="comparison-before"
                    alt="Original"
                    draggable="false"
                    style:width=move || {
                        let width = container_width.get();
                        if width > 0.0 { format!("{}px", width) } else { "100%".to_string() }
                    }
                />
            </div>

            <div
                class="comparison-handle"
                style:left=move || format!("{}%", position())
                on:mousedown=move |ev: web_sys::MouseEvent| {
                    ev.prevent_default();
                    drag.update(|d| {
                        d.pointer_down(PointerKind::Mouse);
                    });
                }
                on:touchstart=move |_| {
                    drag.update(|d| {
                        d.pointer_down(PointerKind::Touch);
                    });
                }
            >
                <div class="comparison-knob">"<>"</div>
            </div>

            <span class="comparison-label comparison-label-before">"Original"</span>
            <span class="comparison-label comparison-label-after">"Restored"</span>
        </div>
    }
}
