#![forbid(unsafe_code)]
#![deny(unreachable_pub)]

//! Domain entities mirrored from the upstream gallery index: the full
//! `Galleryinfo` record and its derived, search-oriented `Info` projection.

mod diff;
mod error;
mod galleryinfo;
mod info;

pub use diff::GalleryinfoDiff;
pub use error::DomainError;
pub use galleryinfo::{Galleryinfo, GalleryinfoFile, Tag};
pub use info::Info;
