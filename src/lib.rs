mod api;
mod app;
mod auth;
mod cache;
mod components;
mod logging;
mod models;
mod notify;
mod pages;
mod session;
mod sort;
mod state;
mod storage;
mod util;

use crate::api::EnvConfig;
use crate::app::App;
use leptos::prelude::*;

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;

// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use crate::models::User;
    use crate::session::SessionStore;
    use crate::storage::{BrowserStorage, KeyValueStore, USER_KEY};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_session_roundtrip_through_local_storage() {
        let sessions = SessionStore::new(BrowserStorage);
        BrowserStorage.remove_item(USER_KEY);
        assert!(sessions.restore().is_none());

        let user = User {
            id: "u1".to_string(),
            email: "u@example.com".to_string(),
            name: "u".to_string(),
            token: "t1".to_string(),
            verified: true,
        };
        sessions.save(&user);
        assert_eq!(sessions.restore(), Some(user));

        BrowserStorage.remove_item(USER_KEY);
        assert!(sessions.restore().is_none());
    }

    #[wasm_bindgen_test]
    fn test_garbage_in_local_storage_is_dropped() {
        BrowserStorage.set_item(USER_KEY, "{not json");
        assert!(SessionStore::new(BrowserStorage).restore().is_none());
        assert!(BrowserStorage.get_item(USER_KEY).is_none());
    }
}

// Only register the WASM start function for normal builds (not for tests),
// otherwise wasm-bindgen-test will end up with multiple entry symbols.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();

    let config = EnvConfig::new();
    logging::init_logging(&config.log_level);
    tracing::info!(api_url = %config.api_url, "starting");

    mount_to_body(move || view! { <App config=config.clone() /> });
}
