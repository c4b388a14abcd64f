use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A communication/interaction record to append to a customer's history.
///
/// `kind` is free-form at this layer; call/sms/email/note/meeting are the
/// documented conventions but membership is not enforced here.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewEngagement {
    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 20, message = "type must be 1-20 characters"))]
    pub kind: String,
    #[validate(length(min = 1, max = 250, message = "summary must be 1-250 characters"))]
    pub summary: String,
    /// Defaults to the append time when omitted.
    pub at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_uses_type_on_the_wire() {
        let engagement: NewEngagement =
            serde_json::from_str(r#"{"type":"call","summary":"Discussed pricing"}"#).unwrap();
        assert_eq!(engagement.kind, "call");
        assert!(engagement.at.is_none());
    }

    #[test]
    fn arbitrary_kind_passes_validation() {
        let engagement = NewEngagement {
            kind: "carrier-pigeon".to_string(),
            summary: "Sent a note".to_string(),
            at: None,
        };
        assert!(engagement.validate().is_ok());
    }
}
