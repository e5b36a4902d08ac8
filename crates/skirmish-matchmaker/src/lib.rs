//! Matchmaking for Skirmish: a FIFO wait queue and the registry of
//! active battle rooms.
//!
//! The [`Matchmaker`] is the single owner of all battle state. It lives
//! behind one mutex in the server; every inbound action and the periodic
//! matchmaking tick mutate it through that lock, which is what serializes
//! room mutations and keeps a player from being matched twice.

mod error;
mod matchmaker;
mod queue;

pub use error::MatchmakerError;
pub use matchmaker::Matchmaker;
pub use queue::MatchQueue;
