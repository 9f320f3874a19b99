#![forbid(unsafe_code)]
#![deny(unreachable_pub)]

//! Repository contracts the Mirroring Engine consumes, plus the
//! implementations that back them: an HTTP-backed remote index client and
//! in-memory stores standing in for the relational/document databases.
//!
//! The engine itself treats these purely as the three traits in
//! [`traits`]; which concrete implementation is wired in is a bootstrap
//! concern (see the `sunflower` binary crate).

mod http_remote;
mod memory;
pub mod traits;

pub use http_remote::HttpRemoteIndexRepository;
pub use memory::{InMemoryDocumentRepository, InMemoryRelationalRepository};
pub use traits::{DocumentInfoRepository, RelationalGalleryinfoRepository, RemoteIndexRepository};
