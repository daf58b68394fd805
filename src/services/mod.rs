pub mod content_generator;
pub mod content_splitter;
pub mod llm_service;
pub mod module_extractor;
pub mod module_writer;
pub mod reassembly;
pub mod slugifier;

pub use content_generator::{build_module_prompt, ContentGenerator};
pub use content_splitter::split_module_contents;
pub use llm_service::LlmService;
pub use module_extractor::{extract_modules, LineClassifier, LineKind};
pub use module_writer::write_module_file;
pub use reassembly::{inject_resources, truncate_after_fence};
pub use slugifier::{module_file_name, slugify};
