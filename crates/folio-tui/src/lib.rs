pub mod app;
pub mod counter;
pub mod event;
pub mod input;
pub mod keymap;
pub mod scroll;
pub mod theme;
pub mod themes;
pub mod typewriter;
pub mod widgets;

pub use app::App;
pub use theme::Theme;
pub use themes::{available_themes, load_theme};
pub use typewriter::{TypewriterFrame, TypewriterTask};
