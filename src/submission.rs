//! Submission pipeline: phase tracking and webhook delivery.
//!
//! The intake endpoint is treated as an opaque sink: its response body and
//! status are never interpreted. A request that completes counts as
//! delivered; only a transport failure counts as a failure.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::error::SubmissionError;
use crate::form::FormState;
use crate::model::{BusinessRecord, Procedure, Professional, WorkingHours};

/// Whether a submission is in flight.
///
/// `Idle -> Submitting -> Idle`. Success and failure are outcomes of the
/// `Submitting -> Idle` transition, not resting phases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Submitting,
}

impl SubmissionPhase {
    pub fn can_transition_to(&self, target: SubmissionPhase) -> bool {
        use SubmissionPhase::*;
        matches!((self, target), (Idle, Submitting) | (Submitting, Idle))
    }
}

impl std::fmt::Display for SubmissionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Submitting => "submitting",
        };
        write!(f, "{s}")
    }
}

/// Body POSTed to the intake endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakePayload {
    #[serde(flatten)]
    pub business: BusinessRecord,
    pub slug: String,
    /// Named professionals only.
    pub professionals: Vec<Professional>,
    /// Named procedures only.
    pub procedures: Vec<Procedure>,
    /// Enabled days only.
    pub working_hours: WorkingHours,
    #[serde(serialize_with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "triggered_from")]
    pub triggered_from: String,
}

fn iso_millis<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Shape the current form into a payload, dropping drafts and closed days.
pub fn build_payload(form: &FormState, origin: &str, now: DateTime<Utc>) -> IntakePayload {
    IntakePayload {
        business: form.business.clone(),
        slug: form.slug.value().to_string(),
        professionals: form.professionals.submittable(),
        procedures: form.procedures.submittable(),
        working_hours: form.schedule.working_hours(),
        timestamp: now,
        triggered_from: origin.to_string(),
    }
}

/// Destination for finished submissions.
#[async_trait]
pub trait IntakeSink: Send + Sync {
    /// Deliver `payload`. `Ok` means the request completed, nothing more.
    async fn deliver(&self, payload: &IntakePayload) -> Result<(), SubmissionError>;
}

/// Posts payloads as JSON to a fixed webhook URL.
pub struct WebhookClient {
    endpoint: String,
    client: reqwest::Client,
}

impl WebhookClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(endpoint, reqwest::Client::new())
    }

    pub fn with_client(endpoint: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            endpoint: endpoint.into(),
            client,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl IntakeSink for WebhookClient {
    async fn deliver(&self, payload: &IntakePayload) -> Result<(), SubmissionError> {
        let resp = self
            .client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await
            .map_err(|e| SubmissionError::Transport(e.to_string()))?;

        // Opaque: the status is recorded but never turned into a failure.
        debug!(status = %resp.status(), endpoint = %self.endpoint, "Intake request completed");
        Ok(())
    }
}
