pub mod module_ctx;
pub mod module_flow;

pub use module_ctx::ModuleCtx;
pub use module_flow::{ModuleFlow, ModuleOutput};
