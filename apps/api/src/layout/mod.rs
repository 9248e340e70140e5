// Export layout: paginates the annotated stream into fixed pages of draw commands.
// Pure computation; handlers run it inside tokio::task::spawn_blocking.

pub mod config;
pub mod draw;
pub mod handlers;
pub mod metrics;
pub mod paginate;
pub mod wrap;

// Re-export the public API consumed by other modules (config loading, handlers).
pub use config::{ExportLayoutConfig, ExportLayoutOverrides, LayoutError};
pub use paginate::{layout_for_export, ExportDocument, HeaderInfo};
