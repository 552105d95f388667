pub mod generate_handler;

pub use generate_handler::generate_handler;
