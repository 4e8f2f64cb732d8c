//! Common types and pure helpers shared by the importmend crates.
//!
//! - `naming`: conversions between camel/Pascal, kebab and `base.role` file names
//! - `conventions`: the convention tables (roles, extensions, alias, exclusions)

pub mod conventions;
pub mod naming;

pub use conventions::{Conventions, Role, RoleVocabulary};
pub use naming::NamingForm;
