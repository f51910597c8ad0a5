//! Membership-request workflow tests.

use agora_storage::RequestStatus;

use super::common::*;
use crate::GovernanceError;

#[tokio::test]
async fn request_requires_open_club() {
    let (engine, _) = create_engine();
    let head = seed_user(&engine, "head@example.edu", "Hale", "Baskan").await;
    let user = seed_user(&engine, "m1@example.edu", "Mert", "Uye").await;

    // Pending club: not joinable yet.
    let submission = engine
        .submit_registration("Chess Club", "", &head.id)
        .await
        .unwrap();
    let err = engine
        .request_membership(&user.id, &submission.club.id, None)
        .await
        .unwrap_err();
    assert!(matches!(err, GovernanceError::PreconditionFailed(_)));

    // Deactivated approved club: not joinable either.
    let club = approved_club(&engine, "Go Club", &head.id).await;
    engine.deactivate_club(&club.id).await.unwrap();
    let err = engine
        .request_membership(&user.id, &club.id, None)
        .await
        .unwrap_err();
    assert!(matches!(err, GovernanceError::PreconditionFailed(_)));
}

#[tokio::test]
async fn duplicate_pending_request_is_conflict() {
    let (engine, _) = create_engine();
    let head = seed_user(&engine, "head@example.edu", "Hale", "Baskan").await;
    let user = seed_user(&engine, "m1@example.edu", "Mert", "Uye").await;
    let club = approved_club(&engine, "Chess Club", &head.id).await;

    engine
        .request_membership(&user.id, &club.id, Some("hi".to_string()))
        .await
        .unwrap();
    let err = engine
        .request_membership(&user.id, &club.id, None)
        .await
        .unwrap_err();
    assert!(matches!(err, GovernanceError::Conflict(_)));
}

#[tokio::test]
async fn member_cannot_request_again() {
    let (engine, _) = create_engine();
    let head = seed_user(&engine, "head@example.edu", "Hale", "Baskan").await;
    let user = seed_user(&engine, "m1@example.edu", "Mert", "Uye").await;
    let club = approved_club(&engine, "Chess Club", &head.id).await;

    engine.add_member(&club.id, &user.id).await.unwrap();
    let err = engine
        .request_membership(&user.id, &club.id, None)
        .await
        .unwrap_err();
    assert!(matches!(err, GovernanceError::Conflict(_)));
}

#[tokio::test]
async fn head_notified_on_new_request() {
    let (engine, notifier) = create_engine();
    let head = seed_user(&engine, "head@example.edu", "Hale", "Baskan").await;
    let user = seed_user(&engine, "m1@example.edu", "Mert", "Uye").await;
    let club = approved_club(&engine, "Chess Club", &head.id).await;

    engine
        .request_membership(&user.id, &club.id, None)
        .await
        .unwrap();

    let sent = notifier.sent();
    let mail = sent
        .iter()
        .filter(|n| n.to == "head@example.edu")
        .last()
        .expect("head must be notified");
    assert!(mail.subject.contains("Chess Club"));
    assert!(mail.body.contains("Mert Uye"));
}

#[tokio::test]
async fn approval_by_head_admits_the_member() {
    let (engine, notifier) = create_engine();
    let head = seed_user(&engine, "head@example.edu", "Hale", "Baskan").await;
    let user = seed_user(&engine, "m1@example.edu", "Mert", "Uye").await;
    let club = approved_club(&engine, "Chess Club", &head.id).await;

    let request = engine
        .request_membership(&user.id, &club.id, None)
        .await
        .unwrap();
    let processed = engine
        .approve_request(&request.id, &head.id, Some("welcome".to_string()))
        .await
        .unwrap();

    assert_eq!(processed.status, RequestStatus::Approved);
    assert_eq!(processed.processed_by, Some(head.id.clone()));
    assert!(processed.processed_at.is_some());
    assert!(engine.is_member(&club.id, &user.id).await.unwrap());

    let sent = notifier.sent();
    assert!(sent
        .iter()
        .any(|n| n.to == "m1@example.edu" && n.subject.contains("approved")));
}

#[tokio::test]
async fn executive_and_admin_may_process() {
    let (engine, _) = create_engine();
    let head = seed_user(&engine, "head@example.edu", "Hale", "Baskan").await;
    let exec = seed_user(&engine, "exec@example.edu", "Ece", "Kurul").await;
    let admin = seed_admin(&engine, "admin@example.edu").await;
    let u1 = seed_user(&engine, "m1@example.edu", "Mert", "Uye").await;
    let u2 = seed_user(&engine, "m2@example.edu", "Melis", "Uye").await;
    let club = approved_club(&engine, "Chess Club", &head.id).await;
    engine
        .add_executive(&club.id, &exec.id, "Membership")
        .await
        .unwrap();

    let r1 = engine
        .request_membership(&u1.id, &club.id, None)
        .await
        .unwrap();
    engine.approve_request(&r1.id, &exec.id, None).await.unwrap();

    let r2 = engine
        .request_membership(&u2.id, &club.id, None)
        .await
        .unwrap();
    engine.approve_request(&r2.id, &admin.id, None).await.unwrap();

    assert!(engine.is_member(&club.id, &u1.id).await.unwrap());
    assert!(engine.is_member(&club.id, &u2.id).await.unwrap());
}

#[tokio::test]
async fn outsider_cannot_process() {
    let (engine, _) = create_engine();
    let head = seed_user(&engine, "head@example.edu", "Hale", "Baskan").await;
    let outsider = seed_user(&engine, "rando@example.edu", "Riza", "Disarda").await;
    let user = seed_user(&engine, "m1@example.edu", "Mert", "Uye").await;
    let club = approved_club(&engine, "Chess Club", &head.id).await;

    let request = engine
        .request_membership(&user.id, &club.id, None)
        .await
        .unwrap();
    let err = engine
        .approve_request(&request.id, &outsider.id, None)
        .await
        .unwrap_err();
    assert!(matches!(err, GovernanceError::Unauthorized(_)));

    // A plain member of the club is no better.
    engine.add_member(&club.id, &outsider.id).await.unwrap();
    let err = engine
        .reject_request(&request.id, &outsider.id, None)
        .await
        .unwrap_err();
    assert!(matches!(err, GovernanceError::Unauthorized(_)));
}

#[tokio::test]
async fn processing_twice_is_precondition_failed() {
    let (engine, _) = create_engine();
    let head = seed_user(&engine, "head@example.edu", "Hale", "Baskan").await;
    let user = seed_user(&engine, "m1@example.edu", "Mert", "Uye").await;
    let club = approved_club(&engine, "Chess Club", &head.id).await;

    let request = engine
        .request_membership(&user.id, &club.id, None)
        .await
        .unwrap();
    engine.approve_request(&request.id, &head.id, None).await.unwrap();

    let err = engine
        .approve_request(&request.id, &head.id, None)
        .await
        .unwrap_err();
    assert!(matches!(err, GovernanceError::PreconditionFailed(_)));
    let err = engine
        .reject_request(&request.id, &head.id, None)
        .await
        .unwrap_err();
    assert!(matches!(err, GovernanceError::PreconditionFailed(_)));
}

#[tokio::test]
async fn rejection_never_touches_the_roster() {
    let (engine, notifier) = create_engine();
    let head = seed_user(&engine, "head@example.edu", "Hale", "Baskan").await;
    let user = seed_user(&engine, "m1@example.edu", "Mert", "Uye").await;
    let club = approved_club(&engine, "Chess Club", &head.id).await;

    let request = engine
        .request_membership(&user.id, &club.id, None)
        .await
        .unwrap();
    let processed = engine
        .reject_request(&request.id, &head.id, Some("roster is full".to_string()))
        .await
        .unwrap();

    assert_eq!(processed.status, RequestStatus::Rejected);
    assert!(!engine.is_member(&club.id, &user.id).await.unwrap());

    let sent = notifier.sent();
    let mail = sent
        .iter()
        .find(|n| n.to == "m1@example.edu" && n.subject.contains("rejected"))
        .expect("requester must be notified");
    assert!(mail.body.contains("roster is full"));
}

#[tokio::test]
async fn only_the_requester_may_cancel_while_pending() {
    let (engine, _) = create_engine();
    let head = seed_user(&engine, "head@example.edu", "Hale", "Baskan").await;
    let user = seed_user(&engine, "m1@example.edu", "Mert", "Uye").await;
    let club = approved_club(&engine, "Chess Club", &head.id).await;

    let request = engine
        .request_membership(&user.id, &club.id, None)
        .await
        .unwrap();

    let err = engine
        .cancel_request(&request.id, &head.id)
        .await
        .unwrap_err();
    assert!(matches!(err, GovernanceError::Unauthorized(_)));

    engine.cancel_request(&request.id, &user.id).await.unwrap();
    // Cancellation deletes the row outright.
    let err = engine.request(&request.id).await.unwrap_err();
    assert!(matches!(err, GovernanceError::NotFound(_)));

    // And a processed request can no longer be cancelled.
    let request = engine
        .request_membership(&user.id, &club.id, None)
        .await
        .unwrap();
    engine.approve_request(&request.id, &head.id, None).await.unwrap();
    let err = engine
        .cancel_request(&request.id, &user.id)
        .await
        .unwrap_err();
    assert!(matches!(err, GovernanceError::PreconditionFailed(_)));
}

#[tokio::test]
async fn request_queries_filter_by_status_and_owner() {
    let (engine, _) = create_engine();
    let head = seed_user(&engine, "head@example.edu", "Hale", "Baskan").await;
    let u1 = seed_user(&engine, "m1@example.edu", "Mert", "Uye").await;
    let u2 = seed_user(&engine, "m2@example.edu", "Melis", "Uye").await;
    let club = approved_club(&engine, "Chess Club", &head.id).await;

    let r1 = engine
        .request_membership(&u1.id, &club.id, None)
        .await
        .unwrap();
    engine
        .request_membership(&u2.id, &club.id, None)
        .await
        .unwrap();
    engine.approve_request(&r1.id, &head.id, None).await.unwrap();

    assert_eq!(engine.requests_for_club(&club.id).await.unwrap().len(), 2);
    assert_eq!(
        engine.pending_requests_for_club(&club.id).await.unwrap().len(),
        1
    );
    assert_eq!(engine.requests_for_user(&u1.id).await.unwrap().len(), 1);
    assert!(engine
        .pending_requests_for_user(&u1.id)
        .await
        .unwrap()
        .is_empty());
    assert_eq!(
        engine.pending_requests_for_user(&u2.id).await.unwrap().len(),
        1
    );
}

#[tokio::test]
async fn approval_after_separate_admission_is_conflict() {
    let (engine, _) = create_engine();
    let head = seed_user(&engine, "head@example.edu", "Hale", "Baskan").await;
    let user = seed_user(&engine, "m1@example.edu", "Mert", "Uye").await;
    let club = approved_club(&engine, "Chess Club", &head.id).await;

    let request = engine
        .request_membership(&user.id, &club.id, None)
        .await
        .unwrap();
    // The user got added through the ledger in the meantime.
    engine.add_member(&club.id, &user.id).await.unwrap();

    let err = engine
        .approve_request(&request.id, &head.id, None)
        .await
        .unwrap_err();
    assert!(matches!(err, GovernanceError::Conflict(_)));

    // The failed approval rolled back: the request is still pending.
    let request = engine.request(&request.id).await.unwrap();
    assert_eq!(request.status, RequestStatus::Pending);
}
