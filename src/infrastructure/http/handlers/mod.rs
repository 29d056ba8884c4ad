//! HTTP Handlers

mod author;
mod book;
mod ping;

pub use author::*;
pub use book::*;
pub use ping::*;
