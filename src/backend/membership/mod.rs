//! Registration, authentication, and team membership.

pub mod registry;

pub use registry::MembershipRegistry;
