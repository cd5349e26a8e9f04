//! # User Confirmation
//!
//! Nothing is serialized until the user has approved every prompt of the
//! sequence for the transaction kind. The device renders one prompt at a
//! time and each [`ConfirmationUi::confirm`] call blocks until the user
//! decides, so the sequence is a plain chain of calls: the first decline
//! returns [`UserRejected`](crate::error::TransactionError::UserRejected) and
//! nothing after it runs.
//!
//! ```text
//! prompt.rs - the Prompt values and the ConfirmationUi port
//! layout.rs - the prompt sequences for transfers and importance transfers
//! ```

pub mod layout;
pub mod prompt;

pub use layout::{confirm_importance_transfer, confirm_transfer};
pub use prompt::{ConfirmationUi, Prompt};
