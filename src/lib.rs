//! Clinic intake: onboarding form core for health-service businesses.
//!
//! Collects identity, staff credentials, address, opening hours and the
//! service catalog, then relays the result to an intake webhook.

pub mod address;
pub mod config;
pub mod entities;
pub mod error;
pub mod form;
pub mod format;
pub mod logging;
pub mod model;
pub mod submission;
pub mod validation;

pub use address::{AddressLookup, ResolvedAddress, ViaCepClient};
pub use config::IntakeConfig;
pub use error::{Error, Result};
pub use form::{FormController, FormNotice, FormState, SubmitOutcome};
pub use submission::{IntakePayload, IntakeSink, SubmissionPhase, WebhookClient};
