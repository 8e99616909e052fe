mod code_block;
mod config_script;
mod section;

pub use code_block::CodeBlock;
pub use config_script::{CopyConfigScript, embedded_json};
pub use section::Section;
