mod account;
mod app_bar;
mod feedback;
mod notes;

pub use account::{EditPasswordDialog, LoginDialog, RegisterDialog};
pub use app_bar::ApplicationBar;
pub use feedback::{ErrorDialog, NotificationSnackbar};
pub use notes::{NewFab, NoteFormDialog, NotesPanel};
