pub mod format;

pub use format::{format_date, format_mmss, progress_bar, truncate_text};
