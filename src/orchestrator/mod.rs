pub mod chat_dispatcher;
pub mod session_store;

pub use chat_dispatcher::ChatDispatcher;
pub use session_store::{Session, SessionState, SessionStore};
