//! Pure decision logic: parsing, access policy, reply composition.

pub mod command;
pub mod policy;
pub mod reply;
