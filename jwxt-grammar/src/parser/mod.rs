//! Parser module for the class-time encoding

pub mod ast;
pub mod parser;

pub use ast::*;
pub use parser::*;
