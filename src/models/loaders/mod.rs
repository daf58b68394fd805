pub mod markdown_loader;

pub use markdown_loader::{discover_markdown_files, load_source_document};
