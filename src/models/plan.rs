use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A structured learning plan made of ordered steps.
///
/// Steps are always returned in `order_index` order, and `order_index` is
/// always the step's position in the list: it is re-derived whenever the plan
/// is written, whatever the caller sent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LearningPlan {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub target_completion_date: Option<DateTime<Utc>>,
    pub status: PlanStatus,
    pub steps: Vec<LearningStep>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Progress of a plan as a whole.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
    OnHold,
}

impl PlanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "NOT_STARTED",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::OnHold => "ON_HOLD",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "NOT_STARTED" => Some(Self::NotStarted),
            "IN_PROGRESS" => Some(Self::InProgress),
            "COMPLETED" => Some(Self::Completed),
            "ON_HOLD" => Some(Self::OnHold),
            _ => None,
        }
    }
}

/// One step of a learning plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LearningStep {
    pub id: Uuid,
    pub plan_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub resource_url: Option<String>,
    /// Zero-based position within the plan.
    pub order_index: i64,
    pub status: StepStatus,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StepStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl StepStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "NOT_STARTED",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "NOT_STARTED" => Some(Self::NotStarted),
            "IN_PROGRESS" => Some(Self::InProgress),
            "COMPLETED" => Some(Self::Completed),
            _ => None,
        }
    }
}

/// Input for creating or replacing a learning plan.
///
/// Updates replace the step list wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningPlanInput {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub target_completion_date: Option<DateTime<Utc>>,
    /// Defaults to `NotStarted` if not specified.
    #[serde(default)]
    pub status: Option<PlanStatus>,
    #[serde(default)]
    pub steps: Vec<LearningStepInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningStepInput {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub resource_url: Option<String>,
    /// Accepted for compatibility with older clients and ignored; the
    /// position in `steps` decides the order.
    #[serde(default)]
    pub order_index: Option<i64>,
    #[serde(default)]
    pub status: Option<StepStatus>,
}

/// Input for sharing a plan with another user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharePlanInput {
    pub recipient_id: Uuid,
}
