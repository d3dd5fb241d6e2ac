mod navbar;
pub mod page;
mod popup;
mod status_bar;

pub use navbar::NavbarWidget;
pub use page::{PageLayout, PageView, PageWidget};
pub use popup::PopupWidget;
pub use status_bar::StatusBarWidget;
