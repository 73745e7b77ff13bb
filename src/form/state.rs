//! In-memory form state for one session.

use crate::entities::EntityList;
use crate::format::generate_slug;
use crate::model::{BusinessField, BusinessRecord, Procedure, Professional, Schedule};

/// Slug with an explicit "user has typed here" flag.
///
/// Until touched, the slug follows the business name. After a manual edit
/// it is left alone by name changes, even if it happens to equal the
/// generated value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlugField {
    value: String,
    touched: bool,
}

impl SlugField {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }

    /// Regenerate from `name` unless the user has edited the slug.
    pub fn follow_name(&mut self, name: &str) {
        if !self.touched {
            self.value = generate_slug(name);
        }
    }

    /// Store a manual edit verbatim and stop following the name.
    pub fn edit(&mut self, value: &str) {
        self.value = value.to_string();
        self.touched = true;
    }
}

/// Everything the user has entered so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub business: BusinessRecord,
    pub slug: SlugField,
    pub professionals: EntityList<Professional>,
    pub procedures: EntityList<Procedure>,
    pub schedule: Schedule,
}

impl FormState {
    /// Set the business name and let the slug follow it.
    pub fn set_business_name(&mut self, name: &str) {
        self.business.set(BusinessField::BusinessName, name);
        self.slug.follow_name(name);
    }

    /// Whether every field is back to its initial value. Row ids are ignored.
    pub fn is_pristine(&self) -> bool {
        let fresh = FormState::default();
        self.business == fresh.business
            && self.slug == fresh.slug
            && self.schedule == fresh.schedule
            && self.professionals.len() == 1
            && self.procedures.len() == 1
            && self.professionals.iter().all(|p| {
                p.professional_name.is_empty()
                    && p.profession.is_none()
                    && p.registration_number.is_empty()
                    && p.registration_state.is_none()
            })
            && self.procedures.iter().all(|p| {
                p.name.is_empty() && p.price.is_empty() && p.duration.is_empty() && p.description.is_empty()
            })
    }
}
