// src/validation.rs

//! Form checks run before a payload is sent.
//!
//! Every rule is evaluated and the failures are reported together as one
//! [`AppError::Validation`], formatted `field: reason; field: reason`.

use std::sync::LazyLock;

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use crate::constants::limits;
use crate::error::{AppError, Result};
use crate::models::{NewListing, RegisterRequest, Role};

static EMAIL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

static PHONE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(\+33|0)[1-9](\d{8})$").ok());

static SIRET: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^\d{14}$").ok());

fn matches(pattern: &LazyLock<Option<Regex>>, value: &str) -> bool {
    pattern.as_ref().is_some_and(|re| re.is_match(value))
}

pub fn is_valid_email(email: &str) -> bool {
    matches(&EMAIL, email.trim())
}

/// French phone number, spaces ignored (`06 12 34 56 78`, `+33612345678`).
pub fn is_valid_phone(phone: &str) -> bool {
    let compact: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    matches(&PHONE, &compact)
}

pub fn is_valid_siret(siret: &str) -> bool {
    matches(&SIRET, siret.trim())
}

/// Length as a reader counts it.
fn grapheme_len(text: &str) -> usize {
    text.graphemes(true).count()
}

/// Accumulates field failures.
#[derive(Debug, Default)]
struct Report {
    failures: Vec<String>,
}

impl Report {
    fn check(&mut self, ok: bool, field: &str, reason: &str) {
        if !ok {
            self.failures.push(format!("{}: {}", field, reason));
        }
    }

    fn required(&mut self, value: &str, field: &str) {
        self.check(!value.trim().is_empty(), field, "is required");
    }

    fn finish(self) -> Result<()> {
        if self.failures.is_empty() {
            Ok(())
        } else {
            Err(AppError::validation(self.failures.join("; ")))
        }
    }
}

impl NewListing {
    /// Check a listing before it is published.
    pub fn validate(&self) -> Result<()> {
        let mut report = Report::default();

        report.required(&self.title, "title");
        report.check(
            grapheme_len(&self.title) <= limits::MAX_TITLE_LENGTH,
            "title",
            &format!("at most {} characters", limits::MAX_TITLE_LENGTH),
        );
        report.required(&self.description, "description");
        report.check(
            grapheme_len(&self.description) <= limits::MAX_DESCRIPTION_LENGTH,
            "description",
            &format!("at most {} characters", limits::MAX_DESCRIPTION_LENGTH),
        );
        report.check(self.kind.is_some(), "type", "is required");
        report.required(&self.origin_address, "origin address");
        report.required(&self.destination_address, "destination address");
        report.required(&self.origin_city, "origin city");
        report.required(&self.destination_city, "destination city");
        report.check(
            self.proposed_price.is_finite() && self.proposed_price > 0.0,
            "price",
            "must be greater than 0",
        );
        if let Some(weight) = self.weight_kg {
            report.check(weight > 0.0, "weight", "must be greater than 0");
        }
        if let (Some(deadline), Some(preferred)) = (self.deadline, self.preferred_date) {
            report.check(
                preferred <= deadline,
                "preferred date",
                "must not be after the deadline",
            );
        }

        report.finish()
    }
}

impl RegisterRequest {
    /// Check a sign-up form. `confirmation` is the repeated password.
    pub fn validate(&self, confirmation: &str) -> Result<()> {
        let mut report = Report::default();

        report.check(Role::SIGN_UP.contains(&self.role), "role", "cannot be chosen at sign-up");
        report.required(&self.last_name, "last name");
        report.required(&self.first_name, "first name");
        if self.email.trim().is_empty() {
            report.required(&self.email, "email");
        } else {
            report.check(is_valid_email(&self.email), "email", "invalid format");
        }
        report.check(
            self.password.chars().count() >= limits::MIN_PASSWORD_LENGTH,
            "password",
            &format!("at least {} characters", limits::MIN_PASSWORD_LENGTH),
        );
        report.check(self.password == confirmation, "password confirmation", "does not match");
        if self.phone.trim().is_empty() {
            report.required(&self.phone, "phone");
        } else {
            report.check(is_valid_phone(&self.phone), "phone", "invalid French number");
        }

        match self.role {
            Role::Courier => {
                report.required(self.vehicle.as_deref().unwrap_or_default(), "vehicle");
                report.check(
                    self.license_verified.unwrap_or(false),
                    "driving licence",
                    "must be certified",
                );
            }
            Role::Merchant => match self.siret.as_deref().map(str::trim) {
                Some(siret) if !siret.is_empty() => {
                    report.check(is_valid_siret(siret), "siret", "must be 14 digits");
                }
                _ => report.required("", "siret"),
            },
            Role::ServiceProvider => {
                report.required(self.service_type.as_deref().unwrap_or_default(), "service type");
                report.check(
                    self.hourly_rate.is_some_and(|rate| rate > 0.0),
                    "hourly rate",
                    "must be greater than 0",
                );
            }
            _ => {}
        }

        report.finish()
    }
}
