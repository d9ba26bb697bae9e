//! Mouse-driven drag-and-drop for vertical sortable lists.
//!
//! A drag starts only after the pointer moves more than
//! [`DRAG_THRESHOLD_PX`] from the mousedown point, so a plain click on a row
//! never reorders anything. Rows report hover via `on_row_enter`; the global
//! mouseup reports `(from, to)` when both are known and differ.

use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Movement threshold in pixels to start dragging
pub const DRAG_THRESHOLD_PX: i32 = 5;

pub fn exceeds_threshold(start: (i32, i32), current: (i32, i32)) -> bool {
    (current.0 - start.0).abs() > DRAG_THRESHOLD_PX || (current.1 - start.1).abs() > DRAG_THRESHOLD_PX
}

#[derive(Clone, Copy)]
pub struct SortableDnd {
    /// mousedown happened, threshold not yet crossed
    pending: RwSignal<Option<usize>>,
    dragging: RwSignal<Option<usize>>,
    over: RwSignal<Option<usize>>,
    start: RwSignal<(i32, i32)>,
}

impl SortableDnd {
    /// Creates the state and binds window listeners for the lifetime of the
    /// calling component.
    pub fn new(on_drop: Callback<(usize, usize)>) -> Self {
        let dnd = Self {
            pending: RwSignal::new(None),
            dragging: RwSignal::new(None),
            over: RwSignal::new(None),
            start: RwSignal::new((0, 0)),
        };
        dnd.bind(on_drop);
        dnd
    }

    pub fn is_dragging(&self, index: usize) -> bool {
        self.dragging.get() == Some(index)
    }

    pub fn is_drop_target(&self, index: usize) -> bool {
        self.dragging.get().is_some() && self.over.get() == Some(index)
    }

    pub fn is_active(&self) -> bool {
        self.dragging.get().is_some()
    }

    pub fn on_mousedown(&self, index: usize, ev: &ev::MouseEvent) {
        if ev.button() != 0 {
            return;
        }
        if let Some(target) = ev.target() {
            if target.dyn_ref::<web_sys::HtmlInputElement>().is_some()
                || target.dyn_ref::<web_sys::HtmlButtonElement>().is_some()
            {
                return;
            }
        }
        ev.prevent_default();
        self.pending.set(Some(index));
        self.start.set((ev.client_x(), ev.client_y()));
    }

    pub fn on_row_enter(&self, index: usize) {
        if self.dragging.get_untracked().is_some() {
            self.over.set(Some(index));
        }
    }

    fn reset(&self) {
        self.pending.set(None);
        self.dragging.set(None);
        self.over.set(None);
    }

    fn bind(self, on_drop: Callback<(usize, usize)>) {
        let move_handle = window_event_listener(ev::mousemove, move |ev: ev::MouseEvent| {
            let Some(pending) = self.pending.get_untracked() else {
                return;
            };
            if self.dragging.get_untracked().is_some() {
                return;
            }
            if exceeds_threshold(self.start.get_untracked(), (ev.client_x(), ev.client_y())) {
                self.dragging.set(Some(pending));
                self.over.set(Some(pending));
            }
        });

        let up_handle = window_event_listener(ev::mouseup, move |_ev: ev::MouseEvent| {
            let dragged = self.dragging.get_untracked();
            let target = self.over.get_untracked();
            self.reset();
            if let (Some(from), Some(to)) = (dragged, target) {
                if from != to {
                    on_drop.run((from, to));
                }
            }
        });

        on_cleanup(move || {
            move_handle.remove();
            up_handle.remove();
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_movement_is_a_click() {
        assert!(!exceeds_threshold((100, 100), (103, 95)));
        assert!(!exceeds_threshold((100, 100), (105, 105)));
    }

    #[test]
    fn test_movement_past_threshold_starts_drag() {
        assert!(exceeds_threshold((100, 100), (100, 106)));
        assert!(exceeds_threshold((100, 100), (94, 100)));
    }
}
