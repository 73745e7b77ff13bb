//! Top-level business record and the Brazilian state catalog.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{UnknownValue, blank_option, parse_choice};

/// The 27 federative units (UF).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BrazilianState {
    Ac,
    Al,
    Ap,
    Am,
    Ba,
    Ce,
    Df,
    Es,
    Go,
    Ma,
    Mt,
    Ms,
    Mg,
    Pa,
    Pb,
    Pr,
    Pe,
    Pi,
    Rj,
    Rn,
    Rs,
    Ro,
    Rr,
    Sc,
    Sp,
    Se,
    To,
}

impl BrazilianState {
    /// All states in catalog order.
    pub const ALL: [BrazilianState; 27] = [
        Self::Ac,
        Self::Al,
        Self::Ap,
        Self::Am,
        Self::Ba,
        Self::Ce,
        Self::Df,
        Self::Es,
        Self::Go,
        Self::Ma,
        Self::Mt,
        Self::Ms,
        Self::Mg,
        Self::Pa,
        Self::Pb,
        Self::Pr,
        Self::Pe,
        Self::Pi,
        Self::Rj,
        Self::Rn,
        Self::Rs,
        Self::Ro,
        Self::Rr,
        Self::Sc,
        Self::Sp,
        Self::Se,
        Self::To,
    ];

    /// Two-letter code, e.g. `"SP"`.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Ac => "AC",
            Self::Al => "AL",
            Self::Ap => "AP",
            Self::Am => "AM",
            Self::Ba => "BA",
            Self::Ce => "CE",
            Self::Df => "DF",
            Self::Es => "ES",
            Self::Go => "GO",
            Self::Ma => "MA",
            Self::Mt => "MT",
            Self::Ms => "MS",
            Self::Mg => "MG",
            Self::Pa => "PA",
            Self::Pb => "PB",
            Self::Pr => "PR",
            Self::Pe => "PE",
            Self::Pi => "PI",
            Self::Rj => "RJ",
            Self::Rn => "RN",
            Self::Rs => "RS",
            Self::Ro => "RO",
            Self::Rr => "RR",
            Self::Sc => "SC",
            Self::Sp => "SP",
            Self::Se => "SE",
            Self::To => "TO",
        }
    }

    /// Full state name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ac => "Acre",
            Self::Al => "Alagoas",
            Self::Ap => "Amapá",
            Self::Am => "Amazonas",
            Self::Ba => "Bahia",
            Self::Ce => "Ceará",
            Self::Df => "Distrito Federal",
            Self::Es => "Espírito Santo",
            Self::Go => "Goiás",
            Self::Ma => "Maranhão",
            Self::Mt => "Mato Grosso",
            Self::Ms => "Mato Grosso do Sul",
            Self::Mg => "Minas Gerais",
            Self::Pa => "Pará",
            Self::Pb => "Paraíba",
            Self::Pr => "Paraná",
            Self::Pe => "Pernambuco",
            Self::Pi => "Piauí",
            Self::Rj => "Rio de Janeiro",
            Self::Rn => "Rio Grande do Norte",
            Self::Rs => "Rio Grande do Sul",
            Self::Ro => "Rondônia",
            Self::Rr => "Roraima",
            Self::Sc => "Santa Catarina",
            Self::Sp => "São Paulo",
            Self::Se => "Sergipe",
            Self::To => "Tocantins",
        }
    }

    /// Select label, e.g. `"SP - São Paulo"`.
    pub fn label(&self) -> String {
        format!("{} - {}", self.code(), self.name())
    }
}

impl std::fmt::Display for BrazilianState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for BrazilianState {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Self::ALL
            .into_iter()
            .find(|state| state.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| UnknownValue::new("state", s))
    }
}

/// Editable fields of [`BusinessRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusinessField {
    BusinessName,
    Phone,
    PostalCode,
    City,
    State,
    Street,
    Neighborhood,
    Number,
    Complement,
}

/// Identity and address of the business being registered.
///
/// Serializes to the flat field set the intake endpoint expects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessRecord {
    pub business_name: String,
    /// Masked, e.g. `"(11) 98888-7777"`.
    pub phone: String,
    /// Masked, e.g. `"01001-000"`.
    #[serde(rename = "cep")]
    pub postal_code: String,
    pub city: String,
    #[serde(with = "blank_option")]
    pub state: Option<BrazilianState>,
    pub street: String,
    pub neighborhood: String,
    pub number: String,
    pub complement: String,
}

impl BusinessRecord {
    /// Store `value` verbatim in `field`.
    ///
    /// Masking is the caller's job. Returns `false` (record unchanged) when
    /// `field` is [`BusinessField::State`] and `value` is not a known code.
    pub fn set(&mut self, field: BusinessField, value: &str) -> bool {
        let slot = match field {
            BusinessField::BusinessName => &mut self.business_name,
            BusinessField::Phone => &mut self.phone,
            BusinessField::PostalCode => &mut self.postal_code,
            BusinessField::City => &mut self.city,
            BusinessField::Street => &mut self.street,
            BusinessField::Neighborhood => &mut self.neighborhood,
            BusinessField::Number => &mut self.number,
            BusinessField::Complement => &mut self.complement,
            BusinessField::State => {
                return match parse_choice::<BrazilianState>(value) {
                    Ok(state) => {
                        self.state = state;
                        true
                    }
                    Err(_) => false,
                };
            }
        };
        *slot = value.to_string();
        true
    }
}
