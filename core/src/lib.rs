pub mod config;
mod cursor;
mod error;
mod lexer;
mod position;
mod sink;
mod source;
mod state;
mod token;

pub use config::LexerConfig;
pub use error::{BoxError, ContextError, Error};
pub use lexer::{ErrorHandler, Lexer};
pub use position::{Position, SourceRange};
pub use sink::Tokens;
pub use source::{REPLACEMENT, Source};
pub use state::{StateFn, Step};
pub use token::{Span, Token};
