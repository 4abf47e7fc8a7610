use super::error::DomainError;
use super::user::normalize_email;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ContactMessage {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) company: Option<String>,
    pub(crate) message: String,
}

impl ContactMessage {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let name = self.name.trim();
        if name.is_empty() || name.chars().count() > 100 {
            return Err(DomainError::Validation {
                field: "name",
                message: "must be 1..100 chars",
            });
        }

        let email = normalize_email(&self.email)?;

        let company = self
            .company
            .map(|company| company.trim().to_string())
            .filter(|company| !company.is_empty());

        let message = self.message.trim();
        if message.chars().count() < 10 || message.chars().count() > 5000 {
            return Err(DomainError::Validation {
                field: "message",
                message: "must be 10..5000 chars",
            });
        }

        Ok(Self {
            name: name.to_string(),
            email,
            company,
            message: message.to_string(),
        })
    }

    pub(crate) fn subject(&self) -> String {
        match &self.company {
            Some(company) => format!("New inquiry from {} ({company})", self.name),
            None => format!("New inquiry from {}", self.name),
        }
    }
}
