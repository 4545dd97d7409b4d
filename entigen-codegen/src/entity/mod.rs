mod base_entity;
mod field;
mod naming;
mod transformer;
mod writer;

pub use base_entity::*;
pub use field::*;
pub use naming::*;
pub use transformer::*;
pub use writer::*;
