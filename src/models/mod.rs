pub mod inquiry;

pub use inquiry::*;
