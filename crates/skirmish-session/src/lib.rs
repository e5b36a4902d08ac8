//! Session registry for Skirmish.
//!
//! A session is one connected player: their allocated [`PlayerId`] and the
//! channel their connection's writer task drains. The [`SessionManager`]
//! is how the rest of the server turns a `PlayerId` into an actual
//! delivered notification without ever touching a socket.
//!
//! [`PlayerId`]: skirmish_protocol::PlayerId

mod error;
mod manager;
mod session;

pub use error::SessionError;
pub use manager::SessionManager;
pub use session::Session;
