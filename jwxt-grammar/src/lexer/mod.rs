//! Lexer module for the class-time encoding

pub mod token;
pub mod scanner;

pub use token::*;
pub use scanner::*;
