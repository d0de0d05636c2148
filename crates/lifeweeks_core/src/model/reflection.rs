//! Daily reflection record.
//!
//! # Responsibility
//! - Define the immutable reflection record and its two-valued type.
//! - Normalize legacy type labels into the current variant set.
//!
//! # Invariants
//! - Records are never edited; callers delete and create instead.
//! - New data is always written with the current labels.
//! - Reading never fails on an unknown label; it falls back to `SpentWell`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// Stable identifier of one reflection row.
pub type ReflectionId = Uuid;

/// Label written for `SpentWell` by current builds.
pub const SPENT_WELL_LABEL: &str = "Spent Well";
/// Label written for `SpentWell` by early builds. Read-only.
pub const LEGACY_SPENT_WELL_LABEL: &str = "Meaningful";
/// Label for `Wasted`, unchanged across builds.
pub const WASTED_LABEL: &str = "Wasted";

/// How the user classified a day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ReflectionType {
    #[default]
    SpentWell,
    Wasted,
}

impl ReflectionType {
    /// All variants in picker order.
    pub const ALL: [ReflectionType; 2] = [ReflectionType::SpentWell, ReflectionType::Wasted];

    /// Recognizes current and historical labels; `None` for anything else.
    ///
    /// This is the only place that knows about historical labels.
    pub fn parse_label(label: &str) -> Option<Self> {
        match label {
            SPENT_WELL_LABEL | LEGACY_SPENT_WELL_LABEL => Some(Self::SpentWell),
            WASTED_LABEL => Some(Self::Wasted),
            _ => None,
        }
    }

    /// Maps any persisted label onto a variant, unknown ones to the default.
    pub fn from_label(label: &str) -> Self {
        Self::parse_label(label).unwrap_or_default()
    }

    /// Current label used for all writes.
    pub fn label(self) -> &'static str {
        match self {
            Self::SpentWell => SPENT_WELL_LABEL,
            Self::Wasted => WASTED_LABEL,
        }
    }
}

impl Serialize for ReflectionType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for ReflectionType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Self::from_label(&label))
    }
}

/// One user-authored daily reflection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reflection {
    pub id: ReflectionId,
    /// Creation instant; also the sort key for listing.
    pub date: DateTime<Utc>,
    /// Serialized as `type` to match the stored label column.
    #[serde(rename = "type")]
    pub kind: ReflectionType,
    /// Free text, may be empty.
    pub explanation: String,
}

impl Reflection {
    /// Creates a reflection with a freshly generated id.
    pub fn new(kind: ReflectionType, explanation: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self::with_id(Uuid::new_v4(), kind, explanation, date)
    }

    /// Creates a reflection with a caller-provided id (import/restore paths).
    pub fn with_id(
        id: ReflectionId,
        kind: ReflectionType,
        explanation: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            date,
            kind,
            explanation: explanation.into(),
        }
    }
}
