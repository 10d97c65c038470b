pub mod code_generator;
pub mod password;
pub mod phone;
pub mod time;

pub use code_generator::{generate_entity_id, generate_six_digit_code};
pub use password::*;
pub use phone::*;
pub use time::*;
