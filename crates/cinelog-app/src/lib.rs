//! Application layer: the watchlist view-model and the route guard.
//!
//! Sits between the HTTP clients and whatever shell renders state (the
//! bundled CLI, or a future GUI). Errors never escape as panics; every
//! failure becomes a displayable message.

pub mod guard;
pub mod watchlist;

pub use guard::{RouteDecision, RouteGuard};
pub use watchlist::{ListState, WatchlistModel};
