use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {Card, div, "bg-card text-card-foreground flex flex-col gap-4 rounded-xl border py-4 shadow-sm"}
    clx! {CardContent, div, "px-4"}
}

pub use components::*;
