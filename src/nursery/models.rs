//! Domain payloads, as the API shapes them.
//!
//! The server owns these shapes; we display and forward them without
//! enforcing relationships, so every model keeps unrecognized fields in
//! `extra` instead of dropping them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Envelope returned by every list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Paged<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Child {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub classroom_id: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classroom {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub teacher_id: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teacher {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    pub child_id: i64,
    /// Amount in cents.
    pub amount: i64,
    #[serde(default)]
    pub paid_at: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyReport {
    pub id: i64,
    pub child_id: i64,
    pub date: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressReport {
    pub id: i64,
    pub child_id: i64,
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceEntry {
    pub date: String,
    pub present: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Enrollment request for a new child.
#[derive(Debug, Clone, Serialize)]
pub struct NewChild {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classroom_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewClassroom {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewTeacher {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewPayment {
    pub child_id: i64,
    /// Amount in cents.
    pub amount: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn child_keeps_unknown_fields() {
        let child: Child = serde_json::from_value(json!({
            "id": 1,
            "name": "Mia",
            "allergies": ["peanuts"],
            "pickup_code": "X9"
        }))
        .unwrap();
        assert_eq!(child.name, "Mia");
        assert_eq!(child.extra["allergies"], json!(["peanuts"]));
        assert_eq!(child.extra["pickup_code"], "X9");
    }

    #[test]
    fn child_round_trips_extras() {
        let child: Child = serde_json::from_value(json!({
            "id": 2, "name": "Noa", "favorite_color": "green"
        }))
        .unwrap();
        let back = serde_json::to_value(&child).unwrap();
        assert_eq!(back["favorite_color"], "green");
    }

    #[test]
    fn paged_envelope_parses() {
        let paged: Paged<Child> = serde_json::from_value(json!({
            "items": [{"id": 1, "name": "Mia"}],
            "total": 41
        }))
        .unwrap();
        assert_eq!(paged.items.len(), 1);
        assert_eq!(paged.total, Some(41));
    }

    #[test]
    fn paged_total_is_optional() {
        let paged: Paged<Teacher> = serde_json::from_value(json!({"items": []})).unwrap();
        assert!(paged.items.is_empty());
        assert_eq!(paged.total, None);
    }

    #[test]
    fn new_child_omits_empty_fields() {
        let body = serde_json::to_value(NewChild {
            name: "Mia".to_string(),
            birth_date: None,
            classroom_id: None,
        })
        .unwrap();
        assert_eq!(body, json!({"name": "Mia"}));
    }

    #[test]
    fn payment_amount_is_cents() {
        let payment: Payment = serde_json::from_value(json!({
            "id": 9, "child_id": 1, "amount": 45000
        }))
        .unwrap();
        assert_eq!(crate::consts::format_amount(payment.amount), "$450.00");
    }
}
