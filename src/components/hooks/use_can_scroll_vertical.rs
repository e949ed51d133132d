use leptos::prelude::*;

/// Which vertical edges of a scroll container still hide content.
#[derive(Clone, Copy)]
pub struct ScrollEdges {
    pub can_scroll_up: RwSignal<bool>,
    pub can_scroll_down: RwSignal<bool>,
}

impl ScrollEdges {
    /// Re-reads the edges from the element's current geometry.
    pub fn measure(&self, el: &web_sys::Element) {
        let scroll_top = el.scroll_top();
        self.can_scroll_up.set(scroll_top > 0);
        self.can_scroll_down
            .set(scroll_top < el.scroll_height() - el.client_height() - 1);
    }

    /// Handler for the container's `on:scroll`.
    pub fn on_scroll(self) -> impl Fn(web_sys::Event) + Copy {
        move |ev: web_sys::Event| {
            let target = event_target::<web_sys::Element>(&ev);
            self.measure(&target);
        }
    }
}

pub fn use_can_scroll_vertical() -> ScrollEdges {
    ScrollEdges {
        can_scroll_up: RwSignal::new(false),
        can_scroll_down: RwSignal::new(false),
    }
}
