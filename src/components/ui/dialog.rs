use icons::X;
use leptos::context::Provider;
use leptos::prelude::*;
use leptos_ui::clx;
use tw_merge::*;

use crate::components::hooks::use_random::use_random_id_for;

mod components {
    use super::*;
    clx! {DialogBody, div, "flex flex-col gap-4"}
    clx! {DialogHeader, div, "flex flex-col gap-2 text-center sm:text-left"}
    clx! {DialogDescription, p, "text-muted-foreground text-sm"}
    clx! {DialogFooter, footer, "flex flex-col-reverse gap-2 sm:flex-row sm:justify-end"}
}

pub use components::*;

/* ========================================================== */
/*                     ✨ FUNCTIONS ✨                        */
/* ========================================================== */

#[derive(Clone)]
struct DialogContext {
    title_id: String,
}

/// Modal driven by `open`; the owner decides what closing means.
///
/// Backdrop clicks, the corner button and Escape all call `on_close`.
#[component]
pub fn Dialog(
    #[prop(into)] open: Signal<bool>,
    #[prop(into)] on_close: Callback<()>,
    #[prop(optional, into)] class: String,
    #[prop(optional)] hide_close_button: bool,
    children: ChildrenFn,
) -> impl IntoView {
    let title_id = use_random_id_for("dialog");
    let ctx = DialogContext { title_id: title_id.clone() };

    let merged_class = tw_merge!(
        "relative bg-background border rounded-2xl shadow-lg p-6 w-full max-w-[calc(100%-2rem)] sm:max-w-lg max-h-[85vh] overflow-y-auto fixed top-[50%] left-[50%] translate-x-[-50%] translate-y-[-50%] z-100",
        class
    );

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Escape" {
            ev.prevent_default();
            on_close.run(());
        }
    };

    view! {
        <Provider value=ctx>
            <Show when=move || open.get()>
                <div
                    data-name="DialogBackdrop"
                    class="fixed inset-0 z-60 bg-black/50"
                    on:click=move |_| on_close.run(())
                />

                <div
                    data-name="DialogContent"
                    role="dialog"
                    aria-modal="true"
                    aria-labelledby=title_id.clone()
                    class=merged_class.clone()
                    on:keydown=on_keydown
                >
                    <button
                        type="button"
                        class=format!(
                            "absolute top-4 right-4 p-1 rounded-sm focus:ring-2 focus:ring-offset-2 focus:outline-none [&_svg:not([class*='size-'])]:size-4 focus:ring-ring{}",
                            if hide_close_button { " hidden" } else { "" },
                        )
                        aria-label="关闭"
                        on:click=move |_| on_close.run(())
                    >
                        <X />
                    </button>

                    {children()}
                </div>
            </Show>
        </Provider>
    }
}

/// Heading that labels the enclosing [`Dialog`].
#[component]
pub fn DialogTitle(children: Children, #[prop(optional, into)] class: String) -> impl IntoView {
    let ctx = expect_context::<DialogContext>();
    let merged_class = tw_merge!("text-lg leading-none font-semibold", class);

    view! {
        <h3 id=ctx.title_id class=merged_class>
            {children()}
        </h3>
    }
}
