//! FormController owns the form session and wires field edits to their
//! side effects (slug regeneration, postal code lookup) and to submission.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{RwLock, broadcast};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::notice::FormNotice;
use super::state::FormState;
use crate::address::{AddressLookup, ViaCepClient};
use crate::config::IntakeConfig;
use crate::error::{ConfigError, SubmissionError, ValidationError};
use crate::format::{POSTAL_CODE_DIGITS, digits_only, mask_phone, mask_postal_code};
use crate::model::{BusinessField, ProcedureField, ProfessionalField, ScheduleUpdate, Weekday};
use crate::submission::{IntakeSink, SubmissionPhase, WebhookClient, build_payload};
use crate::validation::{self, FieldHint};

/// Default broadcast channel capacity for notices.
const NOTICE_CHANNEL_CAPACITY: usize = 32;

/// Result of a call to [`FormController::submit`].
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The request completed; the form was reset.
    Submitted,
    /// Another submission was already in flight; nothing happened.
    Ignored,
    /// Validation blocked the submission; the form is unchanged.
    Rejected(ValidationError),
    /// The request failed; the form is unchanged and can be resubmitted.
    Failed(SubmissionError),
}

struct Session {
    form: FormState,
    phase: SubmissionPhase,
    /// Bumped on every postal code edit and on reset. A lookup only applies
    /// its result if the generation it started with is still current.
    lookup_generation: u64,
}

/// Coordinates one form session.
pub struct FormController {
    origin: String,
    session: Arc<RwLock<Session>>,
    lookup: Arc<dyn AddressLookup>,
    sink: Arc<dyn IntakeSink>,
    notices: broadcast::Sender<FormNotice>,
}

impl FormController {
    pub fn new(config: &IntakeConfig, lookup: Arc<dyn AddressLookup>, sink: Arc<dyn IntakeSink>) -> Self {
        let (notices, _rx) = broadcast::channel(NOTICE_CHANNEL_CAPACITY);
        Self {
            origin: config.origin.clone(),
            session: Arc::new(RwLock::new(Session {
                form: FormState::default(),
                phase: SubmissionPhase::Idle,
                lookup_generation: 0,
            })),
            lookup,
            sink,
            notices,
        }
    }

    /// Build a controller backed by the real HTTP clients.
    pub fn from_config(config: &IntakeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
        let lookup = Arc::new(ViaCepClient::with_client(&config.address_service_url, client.clone()));
        let sink = Arc::new(WebhookClient::with_client(&config.intake_endpoint_url, client));
        Ok(Self::new(config, lookup, sink))
    }

    /// Subscribe to notices (success, validation and failure toasts).
    pub fn subscribe(&self) -> broadcast::Receiver<FormNotice> {
        self.notices.subscribe()
    }

    /// Copy of the current form, for rendering.
    pub async fn snapshot(&self) -> FormState {
        self.session.read().await.form.clone()
    }

    pub async fn phase(&self) -> SubmissionPhase {
        self.session.read().await.phase
    }

    /// Advisory hints for live feedback. Never blocks submission.
    pub async fn hints(&self) -> Vec<FieldHint> {
        validation::hints(&self.session.read().await.form)
    }

    // ── Business record ────────────────────────────────────────────

    /// Apply an edit to a business field, masking and triggering side
    /// effects as needed. Returns `false` if the value was rejected.
    pub async fn set_business_field(&self, field: BusinessField, value: &str) -> bool {
        match field {
            BusinessField::BusinessName => {
                self.session.write().await.form.set_business_name(value);
                true
            }
            BusinessField::Phone => {
                let masked = mask_phone(value);
                self.session.write().await.form.business.set(field, &masked)
            }
            BusinessField::PostalCode => {
                // The lookup runs detached; callers that need it use set_postal_code.
                let _ = self.set_postal_code(value).await;
                true
            }
            _ => {
                let applied = self.session.write().await.form.business.set(field, value);
                if !applied {
                    debug!(?field, value, "Rejected value outside closed set");
                }
                applied
            }
        }
    }

    /// Store the masked postal code. When the stored code changes and holds
    /// all eight digits, start an address lookup in the background and
    /// return its handle.
    ///
    /// Input that masks to the stored value (digits past the eighth, say)
    /// is a no-op and leaves any running lookup alone.
    pub async fn set_postal_code(&self, value: &str) -> Option<JoinHandle<()>> {
        let digits: String = digits_only(value).chars().take(POSTAL_CODE_DIGITS).collect();
        let masked = mask_postal_code(&digits);
        let generation = {
            let mut session = self.session.write().await;
            if session.form.business.postal_code == masked {
                return None;
            }
            session.form.business.postal_code = masked;
            session.lookup_generation += 1;
            session.lookup_generation
        };

        if digits.len() != POSTAL_CODE_DIGITS {
            return None;
        }

        let lookup = Arc::clone(&self.lookup);
        let session = Arc::clone(&self.session);
        Some(tokio::spawn(async move {
            let resolved = match lookup.resolve(&digits).await {
                Ok(resolved) => resolved,
                Err(e) => {
                    warn!(cep = %digits, error = %e, "Postal code lookup failed");
                    return;
                }
            };

            let mut session = session.write().await;
            if session.lookup_generation != generation {
                debug!(cep = %digits, "Discarding stale postal code lookup");
                return;
            }
            match resolved {
                Some(address) => {
                    address.apply_to(&mut session.form.business);
                    info!(cep = %digits, city = %address.city, "Address filled from postal code");
                }
                None => debug!(cep = %digits, "Postal code not found; address left as is"),
            }
        }))
    }

    /// Manually edit the slug. From now on name changes leave it alone.
    pub async fn set_slug(&self, value: &str) {
        self.session.write().await.form.slug.edit(value);
    }

    // ── Professionals ──────────────────────────────────────────────

    pub async fn add_professional(&self) -> Uuid {
        self.session.write().await.form.professionals.add()
    }

    /// Remove a professional. The last one cannot be removed.
    pub async fn remove_professional(&self, id: Uuid) -> bool {
        self.session.write().await.form.professionals.remove(id)
    }

    pub async fn update_professional(&self, id: Uuid, field: ProfessionalField, value: &str) -> bool {
        self.session.write().await.form.professionals.update(id, field, value)
    }

    // ── Procedures ─────────────────────────────────────────────────

    pub async fn add_procedure(&self) -> Uuid {
        self.session.write().await.form.procedures.add()
    }

    /// Remove a procedure. The last one cannot be removed.
    pub async fn remove_procedure(&self, id: Uuid) -> bool {
        self.session.write().await.form.procedures.remove(id)
    }

    pub async fn update_procedure(&self, id: Uuid, field: ProcedureField, value: &str) -> bool {
        self.session.write().await.form.procedures.update(id, field, value)
    }

    // ── Schedule ───────────────────────────────────────────────────

    pub async fn update_schedule(&self, day: Weekday, update: ScheduleUpdate) {
        self.session.write().await.form.schedule.update(day, update);
    }

    // ── Submission ─────────────────────────────────────────────────

    /// Validate, send, then reset on success or keep everything on failure.
    ///
    /// A call made while another submission is in flight returns
    /// [`SubmitOutcome::Ignored`] without touching anything.
    pub async fn submit(&self) -> SubmitOutcome {
        let payload = {
            let mut session = self.session.write().await;
            if !session.phase.can_transition_to(SubmissionPhase::Submitting) {
                debug!(phase = %session.phase, "Submit ignored; already in flight");
                return SubmitOutcome::Ignored;
            }

            if let Err(err) = validation::validate(&session.form) {
                warn!(invalid = err.invalid_professionals.len(), "Submission blocked by validation");
                let _ = self.notices.send(FormNotice::ValidationFailed {
                    message: err.message.clone(),
                });
                return SubmitOutcome::Rejected(err);
            }

            session.phase = SubmissionPhase::Submitting;
            build_payload(&session.form, &self.origin, Utc::now())
        };

        info!(
            professionals = payload.professionals.len(),
            procedures = payload.procedures.len(),
            days = payload.working_hours.len(),
            "Submitting registration"
        );

        let result = self.sink.deliver(&payload).await;

        let mut session = self.session.write().await;
        session.phase = SubmissionPhase::Idle;
        match result {
            Ok(()) => {
                session.form = FormState::default();
                session.lookup_generation += 1;
                info!("Registration submitted; form reset");
                let _ = self.notices.send(FormNotice::Submitted);
                SubmitOutcome::Submitted
            }
            Err(e) => {
                warn!(error = %e, "Registration submission failed; form kept");
                let _ = self.notices.send(FormNotice::SubmissionFailed { reason: e.to_string() });
                SubmitOutcome::Failed(e)
            }
        }
    }
}
