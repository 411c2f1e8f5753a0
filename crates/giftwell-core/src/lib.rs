pub mod claim;
pub mod error;
pub mod friends;
pub mod gate;
pub mod identity;
pub mod store;

pub use error::{CoreError, CoreResult};

#[cfg(test)]
mod testutil;
