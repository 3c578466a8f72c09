//! Wire model for the lectern line protocol.
//!
//! Lectern services speak newline-delimited JSON over inherited stdio: each
//! input line is one request, each output line is one response, and output
//! order always equals input order. This crate owns the framing and codec
//! half of that contract; the serve loop and dispatch live in
//! `lectern-service`.
//!
//! A session looks like this on the wire:
//!
//! ```text
//! > {"id":1,"method":"design.tokens.get"}
//! < {"id":1,"result":{"accent":"emerald","bg":"#000000","fg":"#ffffff","theme":"ryze-pro-metallic"}}
//! > {"id":2,"method":"bogus.method"}
//! < {"id":2,"error":{"message":"unknown method"}}
//! ```

pub mod error;
pub mod reader;
pub mod request;
pub mod response;

pub use error::{DecodeError, EncodeError};
pub use reader::{LineReader, MAX_REQUEST_BYTES, RequestLine};
pub use request::Request;
pub use response::{Response, ResponseError, ResponseWriter};
