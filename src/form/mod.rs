//! The form session: state, controller, and user-facing notices.

pub mod controller;
pub mod notice;
pub mod state;

pub use controller::{FormController, SubmitOutcome};
pub use notice::FormNotice;
pub use state::{FormState, SlugField};
