pub mod logout_handler;
pub mod signup_handler;

pub use logout_handler::logout_handler;
pub use signup_handler::signup_handler;
