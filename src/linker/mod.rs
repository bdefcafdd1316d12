pub mod tag_linker;

pub use tag_linker::{TagLinkStats, TagLinker};
