pub mod compiler;
pub mod directive;
pub mod error;
pub mod normalize;
pub mod operators;
pub mod options;

mod fields;
mod filter;
mod order;
mod paging;

pub use compiler::{QueryCompiler, compile, compile_expression, compile_with};
pub use directive::Directive;
pub use error::CompileError;
pub use normalize::normalize;
pub use options::{CompileOptions, DuplicatePolicy, IntegerParsing};
