//! Core abstractions for class analysis
//!
//! The data model, the normalizers and the relationship classifier, plus the
//! traits the pipeline uses to reach a source front end.

mod builder;
mod classifier;
pub mod config;
mod declaration;
mod error;
mod frontend;
pub mod logging;
mod model;
mod modifiers;
mod type_name;

pub use builder::*;
pub use classifier::*;
pub use config::*;
pub use declaration::*;
pub use error::*;
pub use frontend::*;
pub use logging::*;
pub use model::*;
pub use modifiers::*;
pub use type_name::*;
