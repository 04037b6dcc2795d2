//! Steps run after the project files are written

pub mod post;
pub mod tools;

pub use post::{print_instructions, run_post, PostContext, ProjectTools};
pub use tools::SystemTools;
