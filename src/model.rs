use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const MIN_MESSAGE_CHARS: usize = 10;

/// Inquiry fields as submitted, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawInquiry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

impl RawInquiry {
    pub fn validate(self) -> Result<Inquiry> {
        Inquiry::new(self.name, self.email, self.subject, self.message)
    }
}

/// A customer inquiry that passed boundary validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inquiry {
    name: String,
    email: String,
    subject: String,
    message: String,
}

impl Inquiry {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<Self> {
        let inquiry = Self {
            name: name.into(),
            email: email.into(),
            subject: subject.into(),
            message: message.into(),
        };

        if inquiry.name.trim().is_empty() {
            return Err(Error::InvalidInquiry("name is required".to_string()));
        }
        if !is_valid_email(&inquiry.email) {
            return Err(Error::InvalidInquiry(format!(
                "invalid email address: {:?}",
                inquiry.email
            )));
        }
        if inquiry.subject.trim().is_empty() {
            return Err(Error::InvalidInquiry("subject is required".to_string()));
        }
        if inquiry.message.trim().chars().count() < MIN_MESSAGE_CHARS {
            return Err(Error::InvalidInquiry(format!(
                "message must be at least {MIN_MESSAGE_CHARS} characters"
            )));
        }

        Ok(inquiry)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryStatus {
    Automated,
    Pending,
}

impl QueryStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            QueryStatus::Automated => "automated",
            QueryStatus::Pending => "pending",
        }
    }
}

/// Outcome of matching; an automated reply always carries its answer and time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Reply {
    Automated {
        response: String,
        #[serde(rename = "autoRepliedAt")]
        auto_replied_at: DateTime<Utc>,
    },
    Pending,
}

/// Record handed to storage for one inquiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedQuery {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    #[serde(flatten)]
    pub reply: Reply,
    pub created_at: DateTime<Utc>,
}

impl ProcessedQuery {
    pub fn status(&self) -> QueryStatus {
        match self.reply {
            Reply::Automated { .. } => QueryStatus::Automated,
            Reply::Pending => QueryStatus::Pending,
        }
    }

    pub fn response(&self) -> Option<&str> {
        match &self.reply {
            Reply::Automated { response, .. } => Some(response),
            Reply::Pending => None,
        }
    }

    pub fn auto_replied_at(&self) -> Option<DateTime<Utc>> {
        match self.reply {
            Reply::Automated {
                auto_replied_at, ..
            } => Some(auto_replied_at),
            Reply::Pending => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::{Value, json};

    use super::*;

    fn inquiry(name: &str, email: &str, subject: &str, message: &str) -> Result<Inquiry> {
        Inquiry::new(name, email, subject, message)
    }

    #[test]
    fn accepts_well_formed_inquiry() {
        let q = inquiry(
            "Sarah",
            "s@x.com",
            "Laptop Recycling",
            "What are your rates?",
        )
        .expect("valid");
        assert_eq!(q.name(), "Sarah");
        assert_eq!(q.message(), "What are your rates?");
    }

    #[test]
    fn rejects_missing_fields() {
        assert!(inquiry(" ", "s@x.com", "subj", "long enough message").is_err());
        assert!(inquiry("Sarah", "s@x.com", "", "long enough message").is_err());
        assert!(inquiry("Sarah", "s@x.com", "subj", "too short").is_err());
    }

    #[test]
    fn rejects_malformed_emails() {
        for email in ["", "sarah", "@x.com", "s@x", "s@.com", "s@x.", "s a@x.com", "s@x@y.com"] {
            let err = inquiry("Sarah", email, "subj", "long enough message").expect_err(email);
            assert!(matches!(err, Error::InvalidInquiry(_)), "{email}");
        }
    }

    #[test]
    fn raw_inquiry_with_missing_message_fails_validation() {
        let raw: RawInquiry =
            serde_json::from_value(json!({"name": "Sarah", "email": "s@x.com", "subject": "s"}))
                .expect("deserialize");
        assert!(raw.validate().is_err());
    }

    #[test]
    fn status_label_matches_serialized_form() {
        for status in [QueryStatus::Automated, QueryStatus::Pending] {
            assert_eq!(serde_json::to_value(status).expect("serialize"), status.as_str());
        }
    }

    #[test]
    fn automated_record_serializes_flat_camel_case() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let record = ProcessedQuery {
            name: "Sarah".into(),
            email: "s@x.com".into(),
            subject: "Laptops".into(),
            message: "What are your rates?".into(),
            reply: Reply::Automated {
                response: "M50 per unit".into(),
                auto_replied_at: at,
            },
            created_at: at,
        };

        let value = serde_json::to_value(&record).expect("serialize");
        assert_eq!(value["status"], "automated");
        assert_eq!(value["response"], "M50 per unit");
        assert_eq!(value["autoRepliedAt"], "2024-05-01T12:00:00Z");
        assert_eq!(value["createdAt"], "2024-05-01T12:00:00Z");

        let back: ProcessedQuery = serde_json::from_value(value).expect("deserialize");
        assert_eq!(back, record);
    }

    #[test]
    fn pending_record_omits_reply_fields() {
        let record = ProcessedQuery {
            name: "Sarah".into(),
            email: "s@x.com".into(),
            subject: "Weather".into(),
            message: "What is the weather today?".into(),
            reply: Reply::Pending,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        };

        let value = serde_json::to_value(&record).expect("serialize");
        assert_eq!(value["status"], "pending");
        assert_eq!(value.get("response"), None::<&Value>);
        assert_eq!(value.get("autoRepliedAt"), None::<&Value>);
        assert_eq!(record.status(), QueryStatus::Pending);
        assert_eq!(record.response(), None);
        assert_eq!(record.auto_replied_at(), None);
    }
}
