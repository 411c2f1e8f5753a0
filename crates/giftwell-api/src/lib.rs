pub mod auth;
pub mod error;
pub mod friends;
pub mod gifts;
pub mod identity;
pub mod lists;
pub mod middleware;
