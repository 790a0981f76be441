//! Error handling for the GastroLog client.
//!
//! - **Error Categories**: coarse classification used to pick how a failure is shown
//! - **Domain errors**: [`NetworkError`], [`AuthError`], [`ValidationError`]
//! - **Unified type**: [`GastroError`] and the [`GastroResult`] alias
//! - **Context**: [`ErrorContext`] attached through [`ResultExt`]
//!
//! | Category | Raised by | Shown as |
//! |----------|-----------|----------|
//! | Network | transport failure | generic network message |
//! | Server | non-2xx status, undecodable body | inline or fallback view |
//! | Auth | login, reset token, missing session | inline on the auth form |
//! | Validation | local checks before any request | inline on the form |
//! | Client | impossible request for the current state | inline |
//! | Storage | token file I/O | startup or logout notice |

mod auth;
mod category;
mod context;
mod gastro_error;
mod network;
mod result;
mod validation;

pub use auth::AuthError;
pub use category::ErrorCategory;
pub use context::ErrorContext;
pub use gastro_error::GastroError;
pub use network::NetworkError;
pub use result::{GastroResult, ResultExt};
pub use validation::ValidationError;
