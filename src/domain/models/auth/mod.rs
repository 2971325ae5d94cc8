pub mod authenticated_user;
pub mod policy;
pub mod role;

pub use authenticated_user::*;
pub use policy::{authorize, enforce, policy_for, Access, Operation, Owner, Ownership, Policy, Resource};
pub use role::*;
