pub mod config;
pub mod contact;
pub mod content;
pub mod error;
pub mod sections;
pub mod typewriter;

pub use config::{AppConfig, EasingType, ScrollConfig};
pub use contact::{ContactMessage, MailDelivery, OutboxMailer};
pub use content::{Portfolio, Project, ProjectFilter};
pub use error::{Error, Result};
pub use sections::{ActiveSectionTracker, SectionBoundary, TrackerConfig};
pub use typewriter::{Tick, TypeMode, TypewriterAnimator, TypewriterTiming};
