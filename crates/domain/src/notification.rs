use crate::{
    preference::Category,
    shared::entity::{Entity, Owned, ID},
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationType {
    Reminder,
    Bill,
    PostPublished,
    PostFailed,
    BudgetAlert,
    GoalProgress,
    System,
    Custom,
}

/// How a `NotificationType` is rendered on a client
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TypeDisplay {
    pub icon: &'static str,
    pub color: &'static str,
}

static TYPE_TABLE: [(NotificationType, &str, Category, TypeDisplay); 8] = [
    (
        NotificationType::Reminder,
        "reminder",
        Category::Reminders,
        TypeDisplay {
            icon: "/icons/reminder.png",
            color: "#6366f1",
        },
    ),
    (
        NotificationType::Bill,
        "bill",
        Category::Billing,
        TypeDisplay {
            icon: "/icons/bill.png",
            color: "#f59e0b",
        },
    ),
    (
        NotificationType::PostPublished,
        "post-published",
        Category::Posts,
        TypeDisplay {
            icon: "/icons/post-published.png",
            color: "#10b981",
        },
    ),
    (
        NotificationType::PostFailed,
        "post-failed",
        Category::Posts,
        TypeDisplay {
            icon: "/icons/post-failed.png",
            color: "#ef4444",
        },
    ),
    (
        NotificationType::BudgetAlert,
        "budget-alert",
        Category::Finance,
        TypeDisplay {
            icon: "/icons/budget-alert.png",
            color: "#f97316",
        },
    ),
    (
        NotificationType::GoalProgress,
        "goal-progress",
        Category::Finance,
        TypeDisplay {
            icon: "/icons/goal-progress.png",
            color: "#22c55e",
        },
    ),
    (
        NotificationType::System,
        "system",
        Category::System,
        TypeDisplay {
            icon: "/icons/system.png",
            color: "#64748b",
        },
    ),
    (
        NotificationType::Custom,
        "custom",
        Category::System,
        TypeDisplay {
            icon: "/icons/icon-192x192.png",
            color: "#3b82f6",
        },
    ),
];

impl NotificationType {
    fn row(&self) -> &'static (NotificationType, &'static str, Category, TypeDisplay) {
        // Every variant has exactly one row
        TYPE_TABLE
            .iter()
            .find(|(t, ..)| t == self)
            .unwrap_or(&TYPE_TABLE[TYPE_TABLE.len() - 1])
    }

    pub fn as_str(&self) -> &'static str {
        self.row().1
    }

    /// The preference `Category` that gates this type
    pub fn category(&self) -> Category {
        self.row().2
    }

    pub fn display(&self) -> TypeDisplay {
        self.row().3
    }
}

impl FromStr for NotificationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TYPE_TABLE
            .iter()
            .find(|(_, name, ..)| *name == s)
            .map(|(t, ..)| *t)
            .ok_or_else(|| format!("Unknown notification type: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Normal,
    High,
    Urgent,
}

impl Default for Priority {
    fn default() -> Self {
        Self::Normal
    }
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Normal => "normal",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "normal" => Ok(Self::Normal),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            _ => Err(format!("Unknown priority: {}", s)),
        }
    }
}

/// A message to a single user produced by some subsystem.
///
/// At most one unread `Notification` exists per `(owner_id, tag)`, a new
/// event with the same tag replaces the content of the unread one.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: ID,
    pub owner_id: ID,
    /// Stable dedupe key, e.g. `bill:<bill id>`
    pub tag: String,
    pub notification_type: NotificationType,
    pub title: String,
    pub body: String,
    pub priority: Priority,
    pub action_url: Option<String>,
    /// Only ever goes from false to true
    pub is_read: bool,
    pub created_at: i64,
}

impl Notification {
    pub fn mark_read(&mut self) {
        self.is_read = true;
    }

    /// Default tag when a producer did not provide one. Collapses per
    /// entity when there is one.
    pub fn default_tag(notification_type: NotificationType, entity_id: Option<&str>) -> String {
        match entity_id {
            Some(entity_id) => format!("{}:{}", notification_type.as_str(), entity_id),
            None => format!("{}:{}", notification_type.as_str(), ID::new()),
        }
    }
}

impl Entity for Notification {
    fn id(&self) -> &ID {
        &self.id
    }
}

impl Owned for Notification {
    fn owner_id(&self) -> &ID {
        &self.owner_id
    }
}
