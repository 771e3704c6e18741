//! Project composition: layout selection, ordered template layering and
//! manifest mutation

pub mod composer;
pub mod plan;

pub use composer::Scaffolder;
pub use plan::{dependency_layers, Layout, Plan, Step};
