//! Message templates for governance notifications.

/// Subject and body for one outbound message.
pub struct NotificationContent {
    pub subject: String,
    pub body: String,
}

impl NotificationContent {
    /// Sent to each admin when a club registration lands in the queue.
    /// Carries the single-use verification token the admin needs to
    /// approve or reject the submission.
    pub fn registration_submitted(club_name: &str, head_name: &str, token: &str) -> Self {
        Self {
            subject: format!("New club registration: {}", club_name),
            body: format!(
                r#"A new club "{}" has been submitted by {} and is waiting for review.

Verification token: {}

Use this token to approve or reject the registration. The token is
single-use and expires; a restart of the service invalidates it and the
registrant will have to resubmit."#,
                club_name, head_name, token
            ),
        }
    }

    /// Sent to the head-designate once their registration is approved.
    pub fn registration_approved(club_name: &str) -> Self {
        Self {
            subject: format!("Club registration approved: {}", club_name),
            body: format!(
                "Congratulations! Your club registration for {} has been approved. \
                 You are now the club head.",
                club_name
            ),
        }
    }

    /// Sent to the head-designate when their registration is rejected.
    pub fn registration_rejected(club_name: &str, reason: &str) -> Self {
        Self {
            subject: format!("Club registration rejected: {}", club_name),
            body: format!(
                "Your club registration for {} has been rejected.\n\nReason: {}",
                club_name, reason
            ),
        }
    }

    /// Sent to the club head when a user asks to join.
    pub fn request_received(club_name: &str, requester_name: &str) -> Self {
        Self {
            subject: format!("New membership request for {}", club_name),
            body: format!(
                "{} has requested to join {}. Please log in to process this request.",
                requester_name, club_name
            ),
        }
    }

    /// Sent to the requester when their join request is approved.
    pub fn request_approved(club_name: &str) -> Self {
        Self {
            subject: format!("Membership request approved for {}", club_name),
            body: format!(
                "Congratulations! Your request to join {} has been approved. \
                 You are now a member of the club.",
                club_name
            ),
        }
    }

    /// Sent to the requester when their join request is rejected.
    pub fn request_rejected(club_name: &str, reason: Option<&str>) -> Self {
        Self {
            subject: format!("Membership request rejected for {}", club_name),
            body: format!(
                "We're sorry, but your request to join {} has been rejected.\n\nReason: {}",
                club_name,
                reason.unwrap_or("No reason provided.")
            ),
        }
    }
}
