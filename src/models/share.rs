//! Modelos del flujo de compartición
//!
//! ShareRequest es la propuesta (pending/accepted/rejected). El grant
//! durable vive en la tabla vehicle_shares y solo se consulta via joins.

use sqlx::FromRow;
use chrono::{DateTime, Utc};

/// Estados de una solicitud de compartición
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareRequestStatus {
    Pending,
    Accepted,
    Rejected,
}

impl ShareRequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShareRequestStatus::Pending => "pending",
            ShareRequestStatus::Accepted => "accepted",
            ShareRequestStatus::Rejected => "rejected",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(ShareRequestStatus::Pending),
            "accepted" => Some(ShareRequestStatus::Accepted),
            "rejected" => Some(ShareRequestStatus::Rejected),
            _ => None,
        }
    }

    /// Los estados accepted/rejected son terminales y nunca revierten
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ShareRequestStatus::Pending)
    }
}

/// ShareRequest - mapea exactamente a la tabla share_requests
#[derive(Debug, Clone, FromRow)]
pub struct ShareRequest {
    pub id: i64,
    pub vehicle_id: i64,
    pub shared_by_user_id: i64,
    pub shared_to_user_id: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ShareRequest {
    pub fn status(&self) -> Option<ShareRequestStatus> {
        ShareRequestStatus::from_str(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        assert_eq!(ShareRequestStatus::from_str("pending"), Some(ShareRequestStatus::Pending));
        assert_eq!(ShareRequestStatus::from_str("accepted"), Some(ShareRequestStatus::Accepted));
        assert_eq!(ShareRequestStatus::from_str("rejected"), Some(ShareRequestStatus::Rejected));
        assert_eq!(ShareRequestStatus::from_str("cancelled"), None);
    }

    #[test]
    fn test_terminal_states() {
        assert!(!ShareRequestStatus::Pending.is_terminal());
        assert!(ShareRequestStatus::Accepted.is_terminal());
        assert!(ShareRequestStatus::Rejected.is_terminal());
    }
}
