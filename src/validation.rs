//! Request payload validation.
//!
//! Every check runs against the raw JSON body so that all problems are
//! reported together, keyed by field name, instead of stopping at the first
//! bad value the way a typed deserializer would.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::models::{MemberInput, WorkoutSessionInput};

pub const SCHEMA_KEY: &str = "_schema";

pub const MISSING: &str = "Missing data for required field.";
pub const NULL: &str = "Field may not be null.";
pub const NOT_STRING: &str = "Not a valid string.";
pub const NOT_INTEGER: &str = "Not a valid integer.";
pub const NOT_DATE: &str = "Not a valid date.";
pub const UNKNOWN_FIELD: &str = "Unknown field.";
pub const INVALID_INPUT: &str = "Invalid input type.";

pub const ACTIVITY_MAX_LEN: usize = 233;

const I64_MIN_F64: f64 = -9_223_372_036_854_775_808.0;
const I64_MAX_EXCLUSIVE_F64: f64 = 9_223_372_036_854_775_808.0;

/// Field name to the list of problems found with it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Error for a body that is not a JSON object at all.
    pub fn invalid_payload() -> Self {
        let mut errors = Self::new();
        errors.add(SCHEMA_KEY, INVALID_INPUT);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fields: Vec<&str> = self.fields().collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Presence {
    Required,
    Optional,
}

/// Which shape of workout session payload is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSchema {
    /// The owning member comes from the URL, so `member_id` may be omitted.
    Create,
    /// Full replacement, `member_id` included.
    Update,
}

struct Fields<'a> {
    payload: &'a Map<String, Value>,
    errors: ValidationErrors,
}

impl<'a> Fields<'a> {
    fn new(payload: &'a Value, allowed: &[&str]) -> Result<Self, ValidationErrors> {
        let payload = payload
            .as_object()
            .ok_or_else(ValidationErrors::invalid_payload)?;

        let mut errors = ValidationErrors::new();
        for key in payload.keys() {
            if !allowed.contains(&key.as_str()) {
                errors.add(key, UNKNOWN_FIELD);
            }
        }

        Ok(Self { payload, errors })
    }

    fn value(&mut self, name: &str, presence: Presence) -> Option<&'a Value> {
        let payload: &'a Map<String, Value> = self.payload;
        match payload.get(name) {
            None => {
                if presence == Presence::Required {
                    self.errors.add(name, MISSING);
                }
                None
            }
            Some(Value::Null) => {
                self.errors.add(name, NULL);
                None
            }
            Some(value) => Some(value),
        }
    }

    fn string(&mut self, name: &str, presence: Presence) -> Option<String> {
        match self.value(name, presence)? {
            Value::String(s) => Some(s.clone()),
            _ => {
                self.errors.add(name, NOT_STRING);
                None
            }
        }
    }

    fn bounded_string(
        &mut self,
        name: &str,
        presence: Presence,
        min: usize,
        max: Option<usize>,
    ) -> Option<String> {
        let s = self.string(name, presence)?;
        let len = s.chars().count();
        if len < min {
            self.errors
                .add(name, format!("Shorter than minimum length {}.", min));
            return None;
        }
        if let Some(max) = max.filter(|max| len > *max) {
            self.errors
                .add(name, format!("Longer than maximum length {}.", max));
            return None;
        }
        Some(s)
    }

    fn integer(&mut self, name: &str, presence: Presence) -> Option<i64> {
        let value = self.value(name, presence)?;
        let parsed = match value {
            Value::Number(n) => n.as_i64().or_else(|| {
                // Integral floats only, and only while they still fit an i64
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && (I64_MIN_F64..I64_MAX_EXCLUSIVE_F64).contains(f))
                    .map(|f| f as i64)
            }),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        };
        if parsed.is_none() {
            self.errors.add(name, NOT_INTEGER);
        }
        parsed
    }

    fn date(&mut self, name: &str, presence: Presence) -> Option<NaiveDate> {
        let parsed = match self.value(name, presence)? {
            Value::String(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d").ok(),
            _ => None,
        };
        if parsed.is_none() {
            self.errors.add(name, NOT_DATE);
        }
        parsed
    }

    fn finish<T>(self, value: Option<T>) -> Result<T, ValidationErrors> {
        match value {
            Some(value) if self.errors.is_empty() => Ok(value),
            _ => Err(self.errors),
        }
    }
}

impl MemberInput {
    const FIELDS: &'static [&'static str] = &["name", "age"];

    pub fn validate(payload: &Value) -> Result<Self, ValidationErrors> {
        let mut fields = Fields::new(payload, Self::FIELDS)?;

        let name = fields.bounded_string("name", Presence::Required, 1, None);
        let age = fields.integer("age", Presence::Required);

        let input = match (name, age) {
            (Some(name), Some(age)) => Some(Self { name, age }),
            _ => None,
        };
        fields.finish(input)
    }
}

impl WorkoutSessionInput {
    const FIELDS: &'static [&'static str] = &[
        "date",
        "session_time",
        "activity",
        "calories_burned",
        "duration_minutes",
        "member_id",
    ];

    pub fn validate(payload: &Value, schema: SessionSchema) -> Result<Self, ValidationErrors> {
        let mut fields = Fields::new(payload, Self::FIELDS)?;

        let date = fields.date("date", Presence::Required);
        let session_time = fields.string("session_time", Presence::Required);
        let activity =
            fields.bounded_string("activity", Presence::Required, 0, Some(ACTIVITY_MAX_LEN));
        let calories_burned = fields.integer("calories_burned", Presence::Required);
        let duration_minutes = fields.integer("duration_minutes", Presence::Required);
        let member_id = match schema {
            SessionSchema::Create => fields.integer("member_id", Presence::Optional),
            SessionSchema::Update => fields.integer("member_id", Presence::Required),
        };

        let input = match (date, session_time, activity, calories_burned, duration_minutes) {
            (
                Some(date),
                Some(session_time),
                Some(activity),
                Some(calories_burned),
                Some(duration_minutes),
            ) => Some(Self {
                date,
                session_time,
                activity,
                calories_burned,
                duration_minutes,
                member_id,
            }),
            _ => None,
        };
        fields.finish(input)
    }
}
