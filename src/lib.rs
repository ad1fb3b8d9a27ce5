// Glossa - localized string resolution for Rust
//
// Nested translation catalogs addressed by dotted keys, with `{0}`-style
// positional placeholders and pluggable rich-content composition.

// Re-export the engine
pub use glossa_i18n::*;

// Re-export diagnostics logging
pub use glossa_log;

/// Prelude for common imports
pub mod prelude {
    pub use glossa_i18n::prelude::*;
    pub use glossa_log::{LogConfig, init as init_logging};
}
