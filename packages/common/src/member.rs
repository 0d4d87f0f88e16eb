use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("valid phone regex"));

/// Personal, academic and contact details of one registrant.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberData {
    #[schema(example = "Asha Verma")]
    pub name: String,
    #[schema(example = "RA2211003010123")]
    pub registration_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[schema(example = "second")]
    pub year: String,
    #[schema(example = "CSE")]
    pub branch: String,
    #[schema(example = "av1234@university.edu")]
    pub official_email: String,
    #[schema(example = "9876543210")]
    pub phone_number: String,
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

fn require(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField { field });
    }
    Ok(())
}

impl MemberData {
    /// Presence and format checks, in the order the form reports them.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require(&self.name, "name")?;
        require(&self.registration_number, "registrationNumber")?;
        require(&self.year, "year")?;
        require(&self.branch, "branch")?;
        require(&self.official_email, "officialEmail")?;
        require(&self.phone_number, "phoneNumber")?;

        if !is_valid_email(self.official_email.trim()) {
            return Err(ValidationError::InvalidEmail);
        }
        if !is_valid_phone(self.phone_number.trim()) {
            return Err(ValidationError::InvalidPhone);
        }
        Ok(())
    }

    /// Copy with surrounding whitespace removed and the email lowercased.
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            registration_number: self.registration_number.trim().to_string(),
            section: self
                .section
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            year: self.year.trim().to_string(),
            branch: self.branch.trim().to_string(),
            official_email: self.official_email.trim().to_lowercase(),
            phone_number: self.phone_number.trim().to_string(),
        }
    }
}

/// Validate every member of a team and reject people listed twice.
pub fn validate_members(members: &[MemberData]) -> Result<(), ValidationError> {
    let mut reg_numbers = HashSet::new();
    let mut emails = HashSet::new();
    for member in members {
        member.validate()?;
        let normalized = member.normalized();
        if !reg_numbers.insert(normalized.registration_number) {
            return Err(ValidationError::DuplicateMember {
                field: "registration number",
            });
        }
        if !emails.insert(normalized.official_email) {
            return Err(ValidationError::DuplicateMember { field: "email" });
        }
    }
    Ok(())
}
