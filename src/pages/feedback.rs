use crate::components::hooks::use_can_scroll_vertical::use_can_scroll_vertical;
use crate::components::ui::{
    Button, ButtonSize, ButtonVariant, Dialog, DialogDescription, DialogFooter, DialogHeader,
    DialogTitle, Separator,
};
use crate::state::AppContext;
use icons::X;
use leptos::html;
use leptos::prelude::*;

const LOG_HINT: &str = "单击下面的日志即可自动全选。请复制并反馈给开发者，或者刷新页面重试：";

#[component]
pub fn ErrorDialog() -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;

    let edges = use_can_scroll_vertical();
    let log_ref: NodeRef<html::Div> = NodeRef::new();

    let open = Signal::derive(move || app_state.error.with(Option::is_some));
    let hide = move || app_state.error.set(None);
    let title = move || {
        app_state
            .error
            .with(|m| m.as_ref().map(|m| m.display_title().to_string()))
            .unwrap_or_default()
    };
    let log = move || app_state.error.with(|m| m.as_ref().and_then(|m| m.content.clone()));
    let has_log = move || app_state.error.with(|m| m.as_ref().is_some_and(|m| m.content.is_some()));

    // Dividers for a freshly mounted log.
    Effect::new(move |_| {
        if let Some(el) = log_ref.get() {
            edges.measure(&el);
        }
    });

    view! {
        <Dialog open=open on_close=move |_: ()| hide() hide_close_button=true>
            <div class="flex flex-col gap-4">
                <DialogHeader>
                    <DialogTitle>{title}</DialogTitle>
                </DialogHeader>

                <Separator visible=edges.can_scroll_up />
                {move || {
                    log().map(|log| {
                        view! {
                            <div
                                node_ref=log_ref
                                class="max-h-[40vh] overflow-y-auto"
                                on:scroll=edges.on_scroll()
                            >
                                <DialogDescription>{LOG_HINT}</DialogDescription>
                                <p class="mt-2 font-mono text-xs whitespace-pre-line break-all select-all">
                                    {log}
                                </p>
                            </div>
                        }
                    })
                }}
                <Separator visible=edges.can_scroll_down />

                <DialogFooter>
                    <Show
                        when=has_log
                        fallback=move || {
                            view! {
                                <Button variant=ButtonVariant::Secondary size=ButtonSize::Sm on:click=move |_| hide()>
                                    "知道了"
                                </Button>
                            }
                        }
                    >
                        <Button variant=ButtonVariant::Ghost size=ButtonSize::Sm on:click=move |_| hide()>
                            "忽略"
                        </Button>
                        {app_state
                            .feedback_url
                            .get_value()
                            .map(|url| {
                                view! {
                                    <a href=url target="_blank" rel="noreferrer">
                                        <Button variant=ButtonVariant::Secondary size=ButtonSize::Sm>
                                            "反馈"
                                        </Button>
                                    </a>
                                }
                            })}
                    </Show>
                </DialogFooter>
            </div>
        </Dialog>
    }
}

/// One message at a time along the bottom edge, with "撤销" while an undo is
/// on offer.
#[component]
pub fn NotificationSnackbar() -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;

    move || {
        app_state.snackbar.get().map(|snackbar| {
            let undo = snackbar.undo.map(|undo| {
                view! {
                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::Sm
                        class="text-amber-400 hover:bg-background/10 hover:text-amber-300"
                        on:click=move |_| app_state.undo_delete(undo.ticket)
                    >
                        "撤销"
                    </Button>
                }
            });

            view! {
                <div class="pointer-events-none fixed inset-x-0 bottom-0 z-70 flex justify-center p-4">
                    <div
                        role="status"
                        aria-live="polite"
                        class="pointer-events-auto flex w-full max-w-xl items-center gap-3 rounded-lg bg-foreground px-4 py-2 text-sm text-background shadow-lg sm:w-auto sm:min-w-96"
                    >
                        <span class="flex-1 py-1">{snackbar.message}</span>
                        {undo}
                        <Button
                            variant=ButtonVariant::Ghost
                            size=ButtonSize::Icon
                            class="text-background hover:bg-background/10 hover:text-background"
                            attr:aria-label="关闭"
                            on:click=move |_| app_state.dismiss_snackbar()
                        >
                            <X />
                        </Button>
                    </div>
                </div>
            }
        })
    }
}
