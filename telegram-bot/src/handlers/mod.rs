//! Chain handlers that are not part of the session state machine.

mod logging_handler;

pub use logging_handler::LoggingHandler;
