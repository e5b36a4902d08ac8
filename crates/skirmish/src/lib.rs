//! # Skirmish
//!
//! A server for head-to-head card battles over WebSockets. Players join
//! a FIFO matchmaking queue; a fixed-interval tick pairs them into
//! battle rooms where both sides play cards, end their turns, and have
//! combat resolved simultaneously by field-slot index.
//!
//! This meta crate ties the layers together: transport → protocol →
//! session → matchmaker → battle.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use skirmish::prelude::*;
//!
//! # async fn run(catalog: Vec<skirmish_protocol::CardTemplate>) -> Result<(), SkirmishError> {
//! let server = SkirmishServer::builder()
//!     .bind("0.0.0.0:8080")
//!     .catalog(catalog)
//!     .build()
//!     .await?;
//! server.run().await
//! # }
//! ```

mod catalog;
mod error;
mod handler;
mod server;

pub use catalog::{load_catalog, parse_catalog};
pub use error::SkirmishError;
pub use server::{SkirmishServer, SkirmishServerBuilder};

pub mod prelude {
    pub use crate::{SkirmishError, SkirmishServer, SkirmishServerBuilder, load_catalog};
    pub use skirmish_battle::BattleConfig;
    pub use skirmish_protocol::{Action, Card, CardId, CardTemplate, Notification, PlayerId};
}
