pub mod inquiries;

pub use inquiries::*;
