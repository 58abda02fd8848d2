//! Briefing Wizard
//!
//! The two user-facing flows of the briefing system.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                         Wizard                           │
//! │  Identity → Basic info → Design → (submit) → Done        │
//! │  - Next checks the current stage with the Validator      │
//! │  - Next on Design submits through Storage                │
//! │  - Back always moves one stage back                      │
//! └──────────────────────────────────────────────────────────┘
//!                              │ Definition
//!                              ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │                         Walker                           │
//! │  step 0 → step 1 → ... → Finished (index == step count)  │
//! │  - read-only over a fetched Definition                   │
//! │  - collects one answer per field                         │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Every remote call is raced against a [`CancellationToken`] owned by the
//! view that issued it. Once the token is cancelled, results are dropped.
//!
//! [`CancellationToken`]: tokio_util::sync::CancellationToken

mod designer;
mod error;
mod guard;
mod walker;
mod wizard;

pub use designer::Designer;
pub use error::{ErrorNotice, WizardError};
pub use walker::{RenderedField, Walker};
pub use wizard::{Wizard, WizardState};
