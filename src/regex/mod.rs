pub mod class;
pub mod classifier;
pub mod dialect;
pub mod matcher;
pub mod scanner;
pub mod token;

pub use classifier::{Classification, classify};
pub use dialect::to_host_syntax;
pub use matcher::Matcher;
pub use scanner::{Scanner, scan};
pub use token::{Token, TokenKind};
