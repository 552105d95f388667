pub mod chat_handler;
pub mod send_message_handler;

pub use chat_handler::chat_handler;
pub use send_message_handler::send_message_handler;
