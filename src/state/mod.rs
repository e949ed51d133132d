pub(crate) mod actions;
pub(crate) mod board;
pub(crate) mod deletion;

use crate::api::{ApiClient, EnvConfig};
use crate::models::{NoteDraft, User};
use crate::notify::{ErrorMessage, NoteOperation, Snackbar, UndoAction, UNDO_TIMEOUT_MS};
use crate::session::SessionStore;
use crate::state::actions::BoardHost;
use crate::state::board::NoteBoard;
use crate::storage::BrowserStorage;
use crate::util::now_ms;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

/// Top-level application state, shared through context.
///
/// All note mutations go through the workflows in [`actions`]; components only
/// read these signals and call the methods below.
#[derive(Clone, Copy)]
pub(crate) struct AppState {
    pub api_client: RwSignal<ApiClient>,
    pub current_user: RwSignal<Option<User>>,
    pub board: RwSignal<NoteBoard>,

    /// Global feedback surfaces.
    pub error: RwSignal<Option<ErrorMessage>>,
    pub snackbar: RwSignal<Option<Snackbar>>,
    snackbar_timer: StoredValue<Option<i32>>,

    /// Dialog visibility.
    pub show_login: RwSignal<bool>,
    pub show_register: RwSignal<bool>,
    pub show_edit_password: RwSignal<bool>,
    pub show_note_form: RwSignal<bool>,

    pub feedback_url: StoredValue<Option<String>>,
}

fn sessions() -> SessionStore<BrowserStorage> {
    SessionStore::new(BrowserStorage)
}

impl AppState {
    pub fn new(config: &EnvConfig) -> Self {
        let mut api_client = ApiClient::new(config.api_url.clone());
        let stored_user = sessions().restore();
        if let Some(user) = &stored_user {
            api_client.set_token(&user.token);
            tracing::info!(user = %user.email, "session restored");
        }

        Self {
            api_client: RwSignal::new(api_client),
            current_user: RwSignal::new(stored_user),
            board: RwSignal::new(NoteBoard::default()),
            error: RwSignal::new(None),
            snackbar: RwSignal::new(None),
            snackbar_timer: StoredValue::new(None),
            show_login: RwSignal::new(false),
            show_register: RwSignal::new(false),
            show_edit_password: RwSignal::new(false),
            show_note_form: RwSignal::new(false),
            feedback_url: StoredValue::new(config.feedback_url.clone()),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.current_user.with(Option::is_some)
    }

    pub fn login_succeeded(&self, user: User) {
        sessions().save(&user);
        self.api_client.update(|c| c.set_token(&user.token));
        tracing::info!(user = %user.email, "logged in");
        self.current_user.set(Some(user));
        self.refresh_notes();
    }

    pub fn logout(&self) {
        self.api_client.update(|c| sessions().clear(c));
        self.current_user.set(None);
        self.board.update(NoteBoard::clear);
        self.hide_snackbar();
        tracing::info!("logged out");
    }

    pub fn refresh_notes(&self) {
        if !self.api_client.with_untracked(ApiClient::is_authenticated) {
            return;
        }
        let api = self.api_client.get_untracked();
        let state = *self;
        spawn_local(async move {
            actions::load_notes(&api, &state).await;
        });
    }

    pub fn create_note(&self, draft: NoteDraft) {
        let api = self.api_client.get_untracked();
        let state = *self;
        spawn_local(async move {
            actions::create_note(&api, &state, draft).await;
        });
    }

    /// `on_done` receives whether the server accepted the change.
    pub fn update_note(
        &self,
        id: String,
        draft: NoteDraft,
        operation: NoteOperation,
        on_done: impl FnOnce(bool) + 'static,
    ) {
        let api = self.api_client.get_untracked();
        let state = *self;
        spawn_local(async move {
            let ok = actions::update_note(&api, &state, &id, draft, operation).await;
            on_done(ok);
        });
    }

    pub fn delete_note(&self, id: String) {
        let api = self.api_client.get_untracked();
        let state = *self;
        spawn_local(async move {
            actions::delete_note(&api, &state, &id, now_ms()).await;
        });
    }

    pub fn undo_delete(&self, ticket: u64) {
        let api = self.api_client.get_untracked();
        let state = *self;
        spawn_local(async move {
            actions::undo_delete(&api, &state, ticket).await;
        });
    }

    /// Snackbar closed by the user or its timer: an undo offer it carried is
    /// withdrawn for good.
    pub fn dismiss_snackbar(&self) {
        actions::dismiss_snackbar(self);
    }

    fn clear_snackbar_timer(&self) {
        if let Some(tid) = self.snackbar_timer.get_value() {
            window().clear_timeout_with_handle(tid);
            self.snackbar_timer.set_value(None);
        }
    }

    fn start_snackbar_timer(&self) {
        let state = *self;
        let cb = wasm_bindgen::closure::Closure::once_into_js(move || {
            state.snackbar_timer.set_value(None);
            state.dismiss_snackbar();
        });

        match window().set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.as_ref().unchecked_ref(),
            UNDO_TIMEOUT_MS,
        ) {
            Ok(tid) => self.snackbar_timer.set_value(Some(tid)),
            Err(_) => tracing::error!("failed to schedule snackbar timeout"),
        }
    }
}

impl BoardHost for AppState {
    fn update_board<R>(&self, f: impl FnOnce(&mut NoteBoard) -> R) -> Option<R> {
        self.board.try_update(f)
    }

    fn show_error(&self, message: ErrorMessage) {
        self.error.set(Some(message));
    }

    fn current_undo(&self) -> Option<UndoAction> {
        self.snackbar.with_untracked(|s| s.as_ref().and_then(|s| s.undo))
    }

    fn set_snackbar(&self, snackbar: Option<Snackbar>) {
        self.clear_snackbar_timer();
        let shown = snackbar.is_some();
        self.snackbar.set(snackbar);
        if shown {
            self.start_snackbar_timer();
        }
    }
}

#[derive(Clone, Copy)]
pub(crate) struct AppContext(pub AppState);
