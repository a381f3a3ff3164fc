#![forbid(unsafe_code)]

mod error;
mod host;
mod token;
mod viewer;

pub use error::Error;
pub use host::{EditorHost, EditorOptions};
pub use token::{result_path, Token, TokenKind, TokenState};
pub use viewer::{HoverInfo, ResultViewer, ViewerProps};
