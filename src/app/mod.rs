use crate::api::EnvConfig;
use crate::pages::{
    ApplicationBar, EditPasswordDialog, ErrorDialog, LoginDialog, NewFab, NoteFormDialog,
    NotesPanel, NotificationSnackbar, RegisterDialog,
};
use crate::state::{AppContext, AppState};
use leptos::prelude::*;

/// Single-screen app: no router, every surface is mounted once and toggled by
/// state.
#[component]
pub(crate) fn App(config: EnvConfig) -> impl IntoView {
    let app_state = AppState::new(&config);
    provide_context(AppContext(app_state));

    // A restored session loads its notes straight away.
    app_state.refresh_notes();

    view! {
        <div class="min-h-screen bg-background text-foreground">
            <ApplicationBar />

            <LoginDialog />
            <EditPasswordDialog />
            <RegisterDialog />
            <ErrorDialog />
            <NoteFormDialog />

            <NotesPanel />

            <NotificationSnackbar />
            <NewFab />
        </div>
    }
}
