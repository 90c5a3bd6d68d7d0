pub mod api;
pub mod deployment;

pub use deployment::*;
