//! The extension's independently running surfaces

pub mod background;
pub mod options;
pub mod page;
pub mod popup;

pub use background::background_router;
pub use options::{SettingsField, SettingsForm};
pub use page::{PageAction, PageSurface, SelectionSource, SharedSelection, page_router};
pub use popup::{PendingCall, PopupSurface, PopupTab};
