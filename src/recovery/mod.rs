pub mod complete;
pub mod issue;

pub use complete::complete;
pub use issue::{issue, IssuedRecoveryKey};
