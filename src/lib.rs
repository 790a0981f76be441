//! GastroLog - client for a social restaurant-review service
//!
//! The library holds the whole client: the view state machine in [`app`],
//! the backend operations in [`gateway`], and the state helpers that keep
//! local state consistent with asynchronous results in [`state`]. The
//! binary is a thin line-oriented front end over [`cli`].

pub mod adapters;
pub mod app;
pub mod cli;
pub mod error;
pub mod gateway;
pub mod models;
pub mod session;
pub mod startup;
pub mod state;
pub mod traits;
