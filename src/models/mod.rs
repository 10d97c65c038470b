pub mod comment;
pub mod common;
pub mod favorite;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod movie;
pub mod order;
pub mod pagination;
pub mod user;
pub mod verification;

pub use comment::*;
pub use common::*;
pub use favorite::*;
pub use movie::*;
pub use order::*;
pub use pagination::*;
pub use user::*;
pub use verification::*;
