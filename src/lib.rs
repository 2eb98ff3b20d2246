pub mod allocator;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod formation;
pub mod nature;
pub mod session;
pub mod stats;

pub use allocator::{allocate, apportion, normalize, Allocation, NormalizedShares};
pub use clipboard::{detect_clipboard, ClipboardSink, CommandClipboard, Osc52Clipboard};
pub use config::{load_preset, FormationPreset};
pub use error::{AllocationError, ClipboardError, ConfigError};
pub use formation::{compute_final, export, format_export, ExportStatus, Formation};
pub use nature::{Marker, Nature};
pub use session::{Notice, SessionState};
pub use stats::{Attribute, PerStat, RawWeights, MAX_INPUT};
