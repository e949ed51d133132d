use crate::components::ui::{
    Button, ButtonSize, ButtonVariant, Card, CardContent, Dialog, DialogBody, DialogFooter,
    DialogHeader, DialogTitle, Label, Switch, Textarea,
};
use crate::models::{Note, NoteDraft};
use crate::notify::NoteOperation;
use crate::sort::{SortDirection, SortKey};
use crate::state::board::NoteBoard;
use crate::state::AppContext;
use crate::util::format_local_datetime;
use icons::{ArrowDown, ArrowUp, ArrowUpDown, Check, ChevronDown, ChevronUp, Flag, Plus, Trash};
use leptos::prelude::*;

const EMPTY_HINT: &str = "点击右下角的按钮，开始记录您的第一条便签！";

/// The note table, or a hint when there is nothing to show.
#[component]
pub fn NotesPanel() -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;

    // Sorted projection; the cache itself keeps insertion order.
    let notes = Memo::new(move |_| app_state.board.with(NoteBoard::view));
    let heads = Memo::new(move |_| app_state.board.with(|b| b.sort().heads()));
    let is_empty = Memo::new(move |_| app_state.board.with(|b| b.notes().is_empty()));

    view! {
        <main class="mx-auto w-full max-w-4xl px-4 py-4">
            <Show
                when=move || !is_empty.get()
                fallback=|| view! { <p class="py-2 text-sm text-muted-foreground">{EMPTY_HINT}</p> }
            >
                <Card>
                    <CardContent>
                        <table aria-label="包含所有便签的表格" class="w-full table-fixed text-sm">
                            <thead>
                                <tr class="text-muted-foreground">
                                    <th class="px-2 py-2 text-left font-medium">"内容"</th>
                                    {move || {
                                        heads
                                            .get()
                                            .into_iter()
                                            .map(|(key, direction)| view! { <SortHeader sort_key=key direction=direction /> })
                                            .collect_view()
                                    }}
                                    <th class="w-12" />
                                </tr>
                            </thead>
                            <tbody>
                                <For
                                    each=move || notes.get()
                                    key=|note| note.id.clone()
                                    children=move |note| view! { <NoteRow note_id=note.id /> }
                                />
                            </tbody>
                        </table>
                    </CardContent>
                </Card>
            </Show>
        </main>
    }
}

#[component]
fn SortHeader(sort_key: SortKey, direction: Option<SortDirection>) -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;

    let width = match sort_key {
        SortKey::Date => "w-44",
        SortKey::Important => "w-16",
    };
    let icon = match direction {
        Some(SortDirection::Asc) => view! { <ArrowUp class="size-3.5" /> }.into_any(),
        Some(SortDirection::Desc) => view! { <ArrowDown class="size-3.5" /> }.into_any(),
        None => view! { <ArrowUpDown class="size-3.5 opacity-40" /> }.into_any(),
    };

    view! {
        <th
            class=format!("px-2 py-2 text-right font-medium {width}")
            aria-sort=direction.map(SortDirection::aria).unwrap_or("none")
        >
            <button
                type="button"
                class="inline-flex items-center gap-1 hover:cursor-pointer hover:text-foreground"
                class:text-foreground=direction.is_some()
                on:click=move |_| app_state.board.update(|b| b.toggle_sort(sort_key))
            >
                {sort_key.to_string()}
                {icon}
            </button>
        </th>
    }
}

#[component]
fn NoteRow(note_id: String) -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;

    let note_id = StoredValue::new(note_id);
    let note = Memo::new(move |_| {
        app_state
            .board
            .with(|b| note_id.with_value(|id| b.notes().find(id).cloned()))
    });
    let show_details: RwSignal<bool> = RwSignal::new(false);

    let toggle_important = move |_: web_sys::MouseEvent| {
        let Some(current) = note.get_untracked() else {
            return;
        };
        let draft = NoteDraft {
            important: !current.important,
            ..current.draft()
        };
        app_state.update_note(current.id, draft, NoteOperation::Edit, |_| {});
    };

    move || {
        note.get().map(|n| {
            let content = n.content.clone();
            let date = format_local_datetime(&n.date);
            let flag_class = if n.important {
                "text-amber-500 fill-amber-500"
            } else {
                "text-muted-foreground"
            };
            let important = n.important.to_string();
            let details_note = StoredValue::new(n);

            view! {
                <tr class="border-t align-top">
                    <td class="px-2 py-3 whitespace-pre-wrap break-words">{content}</td>
                    <td class="px-2 py-3 text-right whitespace-nowrap text-muted-foreground">
                        {date}
                    </td>
                    <td class="px-2 py-2 text-right">
                        <Button
                            variant=ButtonVariant::Ghost
                            size=ButtonSize::Icon
                            attr:aria-label="重要标记"
                            attr:aria-pressed=important
                            on:click=toggle_important
                        >
                            <Flag class=flag_class />
                        </Button>
                    </td>
                    <td class="px-2 py-2 text-right">
                        <Button
                            variant=ButtonVariant::Ghost
                            size=ButtonSize::Icon
                            attr:aria-label="展开此行"
                            attr:aria-expanded=move || show_details.get().to_string()
                            on:click=move |_| show_details.update(|v| *v = !*v)
                        >
                            {move || {
                                if show_details.get() {
                                    view! { <ChevronUp /> }.into_any()
                                } else {
                                    view! { <ChevronDown /> }.into_any()
                                }
                            }}
                        </Button>
                    </td>
                </tr>
                <Show when=move || show_details.get()>
                    <tr>
                        <td colspan="4" aria-label="编辑便签" class="px-2 pb-3">
                            <NoteDetails
                                note=details_note.get_value()
                                on_close=move |_: ()| show_details.set(false)
                            />
                        </td>
                    </tr>
                </Show>
            }
        })
    }
}

#[component]
fn NoteDetails(note: Note, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;

    let content: RwSignal<String> = RwSignal::new(note.content.clone());
    let saving: RwSignal<bool> = RwSignal::new(false);
    let original = StoredValue::new(note);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }

        let current = original.get_value();
        let new_content = content.get_untracked();
        if new_content == current.content {
            on_close.run(());
            return;
        }

        let draft = NoteDraft {
            content: new_content,
            ..current.draft()
        };
        saving.set(true);
        app_state.update_note(current.id, draft, NoteOperation::Modify, move |ok| {
            // The row may have been rebuilt with the saved note already.
            saving.try_set(false);
            if ok {
                on_close.run(());
            }
        });
    };

    let on_delete = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        on_close.run(());
        app_state.delete_note(original.with_value(|n| n.id.clone()));
    };

    view! {
        <form class="flex flex-col gap-3" on:submit=on_submit>
            <Label html_for=original.with_value(|n| format!("note-content-{}", n.id))>"内容"</Label>
            <Textarea
                id=original.with_value(|n| format!("note-content-{}", n.id))
                rows=3
                bind_value=content
                disabled=saving
            />
            <div class="flex justify-end gap-2">
                <Button variant=ButtonVariant::Ghost size=ButtonSize::Sm on:click=on_delete>
                    "删除"
                    <Trash />
                </Button>
                <Button variant=ButtonVariant::Secondary size=ButtonSize::Sm attr:disabled=move || saving.get()>
                    "保存"
                    <Check />
                </Button>
            </div>
        </form>
    }
}

#[component]
pub fn NoteFormDialog() -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;

    let content: RwSignal<String> = RwSignal::new(String::new());
    let important: RwSignal<bool> = RwSignal::new(false);

    let handle_exit = move || {
        content.set(String::new());
        important.set(false);
        app_state.show_note_form.set(false);
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        app_state.create_note(NoteDraft {
            content: content.get_untracked(),
            important: important.get_untracked(),
        });
        handle_exit();
    };

    view! {
        <Dialog open=app_state.show_note_form on_close=move |_: ()| handle_exit() class="sm:max-w-2xl">
            <form class="flex flex-col gap-4" on:submit=on_submit>
                <DialogHeader>
                    <DialogTitle>"新建一条便签"</DialogTitle>
                </DialogHeader>

                <DialogBody>
                    <div class="flex flex-col gap-1.5">
                        <Label html_for="new-note-content">"内容"</Label>
                        <Textarea
                            id="new-note-content"
                            rows=6
                            bind_value=content
                            required=true
                            autofocus=true
                        />
                    </div>
                    <div class="flex items-center gap-2">
                        <Switch
                            id="new-note-important"
                            checked=important
                            on_toggle=move |v: bool| important.set(v)
                        />
                        <Label html_for="new-note-important">"重要"</Label>
                    </div>
                </DialogBody>

                <DialogFooter>
                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::Sm
                        on:click=move |ev: web_sys::MouseEvent| {
                            ev.prevent_default();
                            handle_exit();
                        }
                    >
                        "取消"
                    </Button>
                    <Button size=ButtonSize::Sm>"新建"</Button>
                </DialogFooter>
            </form>
        </Dialog>
    }
}

/// Floating "new note" button, only offered to a logged-in user.
#[component]
pub fn NewFab() -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;

    view! {
        <Show when=move || app_state.is_logged_in()>
            <div class="fixed right-6 bottom-6 z-50">
                <Button
                    size=ButtonSize::Fab
                    attr:aria-label="新建便签"
                    on:click=move |_| app_state.show_note_form.set(true)
                >
                    <Plus />
                </Button>
            </div>
        </Show>
    }
}
