//! Smooth page scrolling
//!
//! `easing`, `timing` and `config` are pure helpers; `animation` combines
//! them into the `PageScroller` the app drives once per frame:
//!
//! ```ignore
//! let mut scroller = PageScroller::new(config.ui.scroll.clone());
//! scroller.scroll_by(3, max_scroll);       // key or mouse wheel
//! scroller.scroll_to(section_top, max_scroll); // nav jump
//! let top_row = scroller.update(max_scroll);
//! ```

pub mod config;
pub mod easing;
pub mod timing;

pub mod animation;

pub use animation::PageScroller;
pub use config::{ScrollConfig, ScrollConfigExt};
pub use easing::{EasingType, EasingTypeExt};
