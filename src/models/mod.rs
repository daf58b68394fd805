pub mod loaders;
pub mod module;
pub mod templates;

pub use loaders::{discover_markdown_files, load_source_document};
pub use module::{ModuleRecord, SourceDocument};
pub use templates::Templates;
