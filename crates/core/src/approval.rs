//! Approval workflow validation.
//!
//! The second campaign axis: `draft -> internal_review -> client_review ->
//! approved -> locked`. Unlike the operational lifecycle there is no
//! enforced adjacency; any state may be requested from any state. Review
//! and approval decisions do require the campaign to have been finalized
//! (questions linked, pricing snapshotted). Every accepted decision is
//! appended to an audit trail that is never rewritten.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Status enum
// ---------------------------------------------------------------------------

/// Approval workflow state. Semantically monotonic in practice, but not
/// enforced as such.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    Draft,
    InternalReview,
    ClientReview,
    Approved,
    Locked,
}

impl ApprovalStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::InternalReview => "internal_review",
            Self::ClientReview => "client_review",
            Self::Approved => "approved",
            Self::Locked => "locked",
        }
    }

    /// Parse an approval status string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "draft" => Ok(Self::Draft),
            "internal_review" => Ok(Self::InternalReview),
            "client_review" => Ok(Self::ClientReview),
            "approved" => Ok(Self::Approved),
            "locked" => Ok(Self::Locked),
            _ => Err(CoreError::Validation(format!(
                "Invalid approval status '{s}'. Must be one of: draft, internal_review, \
                 client_review, approved, locked"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Decision validation
// ---------------------------------------------------------------------------

/// Validate an approval decision against the campaign's finalization state.
///
/// `approved` and `client_review` both put the campaign in front of a
/// client, so they require linked questions and at least one pricing
/// snapshot. The error names whichever precondition failed first.
pub fn validate_approval_decision(
    requested: ApprovalStatus,
    question_count: i64,
    snapshot_count: i64,
) -> Result<(), CoreError> {
    let needs_finalized = matches!(
        requested,
        ApprovalStatus::Approved | ApprovalStatus::ClientReview
    );
    if !needs_finalized {
        return Ok(());
    }

    if question_count == 0 {
        return Err(CoreError::Validation(format!(
            "Cannot move to '{}': campaign has no questions. Finalize the campaign first",
            requested.as_str()
        )));
    }
    if snapshot_count == 0 {
        return Err(CoreError::Validation(format!(
            "Cannot move to '{}': campaign has no pricing snapshot. Finalize the campaign first",
            requested.as_str()
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use ApprovalStatus::*;

    #[test]
    fn non_client_facing_decisions_need_nothing() {
        for status in [Draft, InternalReview, Locked] {
            assert!(validate_approval_decision(status, 0, 0).is_ok());
        }
    }

    #[test]
    fn approval_requires_questions() {
        let err = validate_approval_decision(Approved, 0, 1).unwrap_err();
        assert!(err.to_string().contains("no questions"));
    }

    #[test]
    fn client_review_requires_snapshot() {
        let err = validate_approval_decision(ClientReview, 5, 0).unwrap_err();
        assert!(err.to_string().contains("no pricing snapshot"));
    }

    #[test]
    fn questions_checked_before_pricing() {
        let err = validate_approval_decision(Approved, 0, 0).unwrap_err();
        assert!(err.to_string().contains("no questions"));
    }

    #[test]
    fn finalized_campaign_passes() {
        assert!(validate_approval_decision(Approved, 3, 1).is_ok());
        assert!(validate_approval_decision(ClientReview, 3, 1).is_ok());
    }

    #[test]
    fn status_round_trip() {
        for status in [Draft, InternalReview, ClientReview, Approved, Locked] {
            assert_eq!(
                ApprovalStatus::from_str_db(status.as_str()).unwrap(),
                status
            );
        }
        assert!(ApprovalStatus::from_str_db("rejected").is_err());
    }
}
