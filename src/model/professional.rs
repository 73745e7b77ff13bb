//! Staff credentials: professions and their registration authorities.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{BrazilianState, UnknownValue, blank_option, parse_choice};
use crate::entities::Entity;
use crate::format::digits_only;

/// Longest registration number accepted at input time.
pub const REGISTRATION_NUMBER_MAX_DIGITS: usize = 10;

/// Shortest registration number accepted at submit time.
pub const REGISTRATION_NUMBER_MIN_DIGITS: usize = 4;

/// Supported health professions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Profession {
    Medico,
    Dentista,
    Nutricionista,
    Psicologo,
    Fisioterapeuta,
    Fonoaudiologo,
    TerapeutaOcupacional,
}

impl Profession {
    pub const ALL: [Profession; 7] = [
        Self::Medico,
        Self::Dentista,
        Self::Nutricionista,
        Self::Psicologo,
        Self::Fisioterapeuta,
        Self::Fonoaudiologo,
        Self::TerapeutaOcupacional,
    ];

    /// Wire value, e.g. `"terapeuta-ocupacional"`.
    pub fn value(&self) -> &'static str {
        match self {
            Self::Medico => "medico",
            Self::Dentista => "dentista",
            Self::Nutricionista => "nutricionista",
            Self::Psicologo => "psicologo",
            Self::Fisioterapeuta => "fisioterapeuta",
            Self::Fonoaudiologo => "fonoaudiologo",
            Self::TerapeutaOcupacional => "terapeuta-ocupacional",
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Medico => "Médico",
            Self::Dentista => "Dentista",
            Self::Nutricionista => "Nutricionista",
            Self::Psicologo => "Psicólogo",
            Self::Fisioterapeuta => "Fisioterapeuta",
            Self::Fonoaudiologo => "Fonoaudiólogo",
            Self::TerapeutaOcupacional => "Terapeuta Ocupacional",
        }
    }

    /// Short code of the council that issues the registration number.
    pub fn registration_authority(&self) -> &'static str {
        match self {
            Self::Medico => "CRM",
            Self::Dentista => "CRO",
            Self::Nutricionista => "CRN",
            Self::Psicologo => "CRP",
            Self::Fisioterapeuta | Self::TerapeutaOcupacional => "CREFITO",
            Self::Fonoaudiologo => "CRFa",
        }
    }
}

impl std::fmt::Display for Profession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.value())
    }
}

impl FromStr for Profession {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.value() == value)
            .ok_or_else(|| UnknownValue::new("profession", s))
    }
}

/// Editable fields of [`Professional`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfessionalField {
    Name,
    Profession,
    RegistrationNumber,
    RegistrationState,
}

/// One staff member and their council registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Professional {
    pub id: Uuid,
    pub professional_name: String,
    #[serde(with = "blank_option")]
    pub profession: Option<Profession>,
    /// Digits only.
    pub registration_number: String,
    #[serde(with = "blank_option")]
    pub registration_state: Option<BrazilianState>,
}

impl Professional {
    /// Label shown next to the registration number, if a profession is chosen.
    pub fn registration_authority(&self) -> Option<&'static str> {
        self.profession.map(|p| p.registration_authority())
    }
}

impl Entity for Professional {
    type Field = ProfessionalField;

    fn with_id(id: Uuid) -> Self {
        Self {
            id,
            professional_name: String::new(),
            profession: None,
            registration_number: String::new(),
            registration_state: None,
        }
    }

    fn id(&self) -> Uuid {
        self.id
    }

    /// Registration numbers are reduced to digits; an input longer than
    /// [`REGISTRATION_NUMBER_MAX_DIGITS`] is ignored. Unknown profession or
    /// state values are ignored.
    fn set_field(&mut self, field: ProfessionalField, value: &str) -> bool {
        match field {
            ProfessionalField::Name => {
                self.professional_name = value.to_string();
                true
            }
            ProfessionalField::Profession => match parse_choice(value) {
                Ok(profession) => {
                    self.profession = profession;
                    true
                }
                Err(_) => false,
            },
            ProfessionalField::RegistrationNumber => {
                let digits = digits_only(value);
                if digits.len() > REGISTRATION_NUMBER_MAX_DIGITS {
                    return false;
                }
                self.registration_number = digits;
                true
            }
            ProfessionalField::RegistrationState => match parse_choice(value) {
                Ok(state) => {
                    self.registration_state = state;
                    true
                }
                Err(_) => false,
            },
        }
    }

    fn is_draft(&self) -> bool {
        self.professional_name.trim().is_empty()
    }
}
