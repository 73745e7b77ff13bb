//! Submission gate and advisory field hints.
//!
//! Only one rule blocks a submission: every named professional needs a
//! registration number of 4 to 10 digits. Hints are for live feedback and
//! never block anything.

use serde::Serialize;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::form::FormState;
use crate::model::professional::{REGISTRATION_NUMBER_MAX_DIGITS, REGISTRATION_NUMBER_MIN_DIGITS};

/// User-facing message for the registration number rule.
pub const REGISTRATION_NUMBER_MESSAGE: &str = "Número de registro deve ter entre 4 e 10 dígitos.";

/// A registration number is 4 to 10 ASCII digits.
pub fn is_valid_registration_number(number: &str) -> bool {
    (REGISTRATION_NUMBER_MIN_DIGITS..=REGISTRATION_NUMBER_MAX_DIGITS).contains(&number.len())
        && number.bytes().all(|b| b.is_ascii_digit())
}

/// Check the whole form once, at submit time.
///
/// Drafts (professionals without a name) are skipped. Any number of bad rows
/// produce a single aggregate error.
pub fn validate(form: &FormState) -> Result<(), ValidationError> {
    let invalid: Vec<Uuid> = form
        .professionals
        .iter()
        .filter(|p| !p.professional_name.trim().is_empty())
        .filter(|p| !is_valid_registration_number(&p.registration_number))
        .map(|p| p.id)
        .collect();

    if invalid.is_empty() {
        Ok(())
    } else {
        Err(ValidationError {
            message: REGISTRATION_NUMBER_MESSAGE.to_string(),
            invalid_professionals: invalid,
        })
    }
}

/// Non-blocking feedback for a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldHint {
    /// Registration number typed but outside 4..=10 digits.
    RegistrationNumberLength { professional_id: Uuid, digits: usize },
    /// Price typed but not a decimal number.
    InvalidPrice { procedure_id: Uuid },
    /// Duration typed but not a whole number of minutes.
    InvalidDuration { procedure_id: Uuid },
}

/// Collect hints for every non-empty field that would look wrong to a user.
pub fn hints(form: &FormState) -> Vec<FieldHint> {
    let mut out = Vec::new();

    for p in &form.professionals {
        if !p.registration_number.is_empty() && !is_valid_registration_number(&p.registration_number) {
            out.push(FieldHint::RegistrationNumberLength {
                professional_id: p.id,
                digits: p.registration_number.len(),
            });
        }
    }

    for procedure in &form.procedures {
        if !procedure.price.trim().is_empty() && procedure.price_amount().is_none() {
            out.push(FieldHint::InvalidPrice { procedure_id: procedure.id });
        }
        if !procedure.duration.trim().is_empty() && procedure.duration_minutes().is_none() {
            out.push(FieldHint::InvalidDuration { procedure_id: procedure.id });
        }
    }

    out
}
