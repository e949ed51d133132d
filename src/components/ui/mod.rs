pub mod button;
pub mod card;
pub mod dialog;
pub mod input;
pub mod label;
pub mod separator;
pub mod spinner;
pub mod switch;
pub mod textarea;

// Re-export component symbols so callers can `use crate::components::ui::Button` etc.
pub use button::*;
pub use card::*;
pub use dialog::*;
pub use input::*;
pub use label::*;
pub use separator::*;
pub use spinner::*;
pub use switch::*;
pub use textarea::*;
