//! UI Components for the Intelli Extract form.
//!
//! # Layout Components
//! - [`Hero`] - Page title and subtitle
//! - [`Footer`] - Page footer
//!
//! # Feature Components
//! - [`CategoryList`] - Document type picker
//! - [`FilePreview`] - Staged image preview and upload button
//! - [`ResultTable`] - Per-method comparison with score badges
//! - [`Notification`] - Auto-hiding error banner

mod hero;
mod category_list;
mod file_preview;
mod result_table;
mod notification;
mod footer;

pub use hero::*;
pub use category_list::*;
pub use file_preview::*;
pub use result_table::*;
pub use notification::*;
pub use footer::*;
