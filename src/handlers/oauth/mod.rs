pub mod callback_handler;
pub mod google_handler;
pub mod set_session_handler;

pub use callback_handler::callback_handler;
pub use google_handler::google_handler;
pub use set_session_handler::set_session_handler;
