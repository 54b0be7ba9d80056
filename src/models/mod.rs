//! Wire types shared by the API boundary and the client.

mod document;
mod file;

pub use document::*;
pub use file::*;
