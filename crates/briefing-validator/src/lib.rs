//! Briefing Validator
//!
//! Decides whether an in-progress design may leave a wizard stage and whether
//! a finished design may be submitted. Submission additionally resolves every
//! catalog and step reference in the design.

mod error;
mod stage;
mod validator;

pub use error::ValidationError;
pub use stage::Stage;
pub use validator::Validator;
