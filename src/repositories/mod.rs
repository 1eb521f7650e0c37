pub mod inquiry_repo;

pub use inquiry_repo::*;
