//! Service catalog entries.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::Entity;

/// Editable fields of [`Procedure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcedureField {
    Name,
    Price,
    Duration,
    Description,
}

/// A service offered by the business. Price and duration are kept as typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Procedure {
    pub id: Uuid,
    pub name: String,
    /// Decimal string, e.g. `"150.00"`.
    pub price: String,
    /// Whole minutes as a string.
    pub duration: String,
    pub description: String,
}

impl Procedure {
    /// Price as a decimal. Accepts `,` as the decimal separator.
    pub fn price_amount(&self) -> Option<Decimal> {
        let trimmed = self.price.trim();
        if trimmed.is_empty() {
            return None;
        }
        Decimal::from_str(&trimmed.replace(',', ".")).ok()
    }

    /// Duration in minutes.
    pub fn duration_minutes(&self) -> Option<u32> {
        self.duration.trim().parse().ok()
    }
}

impl Entity for Procedure {
    type Field = ProcedureField;

    fn with_id(id: Uuid) -> Self {
        Self {
            id,
            name: String::new(),
            price: String::new(),
            duration: String::new(),
            description: String::new(),
        }
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn set_field(&mut self, field: ProcedureField, value: &str) -> bool {
        let slot = match field {
            ProcedureField::Name => &mut self.name,
            ProcedureField::Price => &mut self.price,
            ProcedureField::Duration => &mut self.duration,
            ProcedureField::Description => &mut self.description,
        };
        *slot = value.to_string();
        true
    }

    fn is_draft(&self) -> bool {
        self.name.trim().is_empty()
    }
}
