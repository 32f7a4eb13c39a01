//! Authentication HTTP handlers.

pub mod join_team;
pub mod login;
pub mod me;
pub mod register;
pub mod types;

pub use join_team::join_team;
pub use login::login;
pub use me::get_me;
pub use register::register;
