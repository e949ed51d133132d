use leptos::prelude::*;
use tw_merge::*;

/// Hairline divider. `visible` toggles it without shifting the layout, which
/// is what scroll-edge dividers need.
#[component]
pub fn Separator(
    #[prop(into, default = true.into())] visible: Signal<bool>,
    #[prop(into, optional)] class: String,
) -> impl IntoView {
    let merged_class = move || {
        let separator = SeparatorClass {
            visibility: if visible.get() {
                SeparatorVisibility::Shown
            } else {
                SeparatorVisibility::Hidden
            },
        };
        separator.with_class(class.clone())
    };

    view! { <div class=merged_class role="separator" /> }
}

/* ========================================================== */
/*                       🧬 STRUCT 🧬                         */
/* ========================================================== */

#[derive(TwClass, Default)]
#[tw(class = "shrink-0 w-full h-[1px] bg-border")]
pub struct SeparatorClass {
    visibility: SeparatorVisibility,
}

#[derive(TwVariant)]
pub enum SeparatorVisibility {
    #[tw(default, class = "visible")]
    Shown,
    #[tw(class = "invisible")]
    Hidden,
}
