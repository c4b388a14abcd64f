use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Employee lifecycle status. Toggling to `Inactive` is the one transition
/// that triggers cross-entity cascades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmployeeStatus {
    Active,
    Inactive,
}

impl EmployeeStatus {
    pub fn toggled(self) -> Self {
        match self {
            EmployeeStatus::Active => EmployeeStatus::Inactive,
            EmployeeStatus::Inactive => EmployeeStatus::Active,
        }
    }
}

impl fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmployeeStatus::Active => write!(f, "Active"),
            EmployeeStatus::Inactive => write!(f, "Inactive"),
        }
    }
}

impl FromStr for EmployeeStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(EmployeeStatus::Active),
            "Inactive" => Ok(EmployeeStatus::Inactive),
            _ => Err(()),
        }
    }
}

/// Customer pipeline status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CustomerStatus {
    Lead,
    Contact,
    Converted,
}

impl fmt::Display for CustomerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CustomerStatus::Lead => write!(f, "Lead"),
            CustomerStatus::Contact => write!(f, "Contact"),
            CustomerStatus::Converted => write!(f, "Converted"),
        }
    }
}

impl FromStr for CustomerStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Lead" => Ok(CustomerStatus::Lead),
            "Contact" => Ok(CustomerStatus::Contact),
            "Converted" => Ok(CustomerStatus::Converted),
            _ => Err(()),
        }
    }
}

/// Ticket workflow status. `InProgress` keeps the legacy spaced wire
/// string so existing documents deserialize unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TicketStatus {
    Open,
    #[serde(rename = "In Progress")]
    InProgress,
    Resolved,
    Closed,
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TicketStatus::Open => write!(f, "Open"),
            TicketStatus::InProgress => write!(f, "In Progress"),
            TicketStatus::Resolved => write!(f, "Resolved"),
            TicketStatus::Closed => write!(f, "Closed"),
        }
    }
}

impl FromStr for TicketStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Open" => Ok(TicketStatus::Open),
            "In Progress" => Ok(TicketStatus::InProgress),
            "Resolved" => Ok(TicketStatus::Resolved),
            "Closed" => Ok(TicketStatus::Closed),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TicketPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl fmt::Display for TicketPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TicketPriority::Low => write!(f, "Low"),
            TicketPriority::Medium => write!(f, "Medium"),
            TicketPriority::High => write!(f, "High"),
            TicketPriority::Urgent => write!(f, "Urgent"),
        }
    }
}

impl FromStr for TicketPriority {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(TicketPriority::Low),
            "Medium" => Ok(TicketPriority::Medium),
            "High" => Ok(TicketPriority::High),
            "Urgent" => Ok(TicketPriority::Urgent),
            _ => Err(()),
        }
    }
}

/// Soft-delete marker on Customer documents. Deactivated records stay in
/// the store and keep their audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordState {
    Active,
    Deactive,
}
