//! Go source loading: package resolution, file selection and tree-sitter parsing.

pub mod constraint;
pub mod loader;
pub mod parser;
pub mod resolver;
