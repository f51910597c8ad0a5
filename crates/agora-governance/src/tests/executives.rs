//! Executive ledger tests.

use agora_storage::UserRole;

use super::common::*;
use crate::GovernanceError;

#[tokio::test]
async fn appointment_auto_adds_membership_and_promotes() {
    let (engine, _) = create_engine();
    let head = seed_user(&engine, "head@example.edu", "Hale", "Baskan").await;
    let user = seed_user(&engine, "e1@example.edu", "Ece", "Kurul").await;
    let club = approved_club(&engine, "Chess Club", &head.id).await;

    // Not a member yet; appointment must create the membership too.
    let executive = engine
        .add_executive(&club.id, &user.id, "Treasurer")
        .await
        .unwrap();
    assert_eq!(executive.position, "Treasurer");
    assert!(engine.is_member(&club.id, &user.id).await.unwrap());
    assert_eq!(role_of(&engine, &user.id).await, UserRole::Executive);
}

#[tokio::test]
async fn double_appointment_is_conflict() {
    let (engine, _) = create_engine();
    let head = seed_user(&engine, "head@example.edu", "Hale", "Baskan").await;
    let user = seed_user(&engine, "e1@example.edu", "Ece", "Kurul").await;
    let club = approved_club(&engine, "Chess Club", &head.id).await;

    engine
        .add_executive(&club.id, &user.id, "Treasurer")
        .await
        .unwrap();
    let err = engine
        .add_executive(&club.id, &user.id, "Secretary")
        .await
        .unwrap_err();
    assert!(matches!(err, GovernanceError::Conflict(_)));
}

#[tokio::test]
async fn add_remove_reactivate_round_trip() {
    let (engine, _) = create_engine();
    let head = seed_user(&engine, "head@example.edu", "Hale", "Baskan").await;
    let user = seed_user(&engine, "e1@example.edu", "Ece", "Kurul").await;
    let club = approved_club(&engine, "Chess Club", &head.id).await;

    let first = engine
        .add_executive(&club.id, &user.id, "Treasurer")
        .await
        .unwrap();
    engine.remove_executive(&club.id, &user.id).await.unwrap();

    let history = engine.executive_history(&club.id).await.unwrap();
    let row = history.iter().find(|e| e.user_id == user.id).unwrap();
    assert!(!row.active);
    assert!(row.leave_date.is_some());

    let revived = engine
        .reactivate_executive(&user.id, &club.id, "Secretary")
        .await
        .unwrap();
    assert!(revived.active);
    assert_eq!(revived.position, "Secretary");
    assert!(revived.leave_date.is_none());
    assert!(revived.join_date >= first.join_date);
    assert_eq!(role_of(&engine, &user.id).await, UserRole::Executive);
}

#[tokio::test]
async fn head_cannot_be_demoted_directly() {
    let (engine, _) = create_engine();
    let head = seed_user(&engine, "head@example.edu", "Hale", "Baskan").await;
    let club = approved_club(&engine, "Chess Club", &head.id).await;

    let err = engine
        .remove_executive(&club.id, &head.id)
        .await
        .unwrap_err();
    assert!(matches!(err, GovernanceError::PreconditionFailed(_)));
    assert_single_head(&engine, &club.id).await;
}

#[tokio::test]
async fn role_survives_while_another_executive_seat_remains() {
    let (engine, _) = create_engine();
    let head_a = seed_user(&engine, "ha@example.edu", "Hale", "Bir").await;
    let head_b = seed_user(&engine, "hb@example.edu", "Hulya", "Iki").await;
    let user = seed_user(&engine, "u3@example.edu", "Umay", "Uc").await;
    let club_a = approved_club(&engine, "Chess Club", &head_a.id).await;
    let club_b = approved_club(&engine, "Go Club", &head_b.id).await;

    engine
        .add_executive(&club_a.id, &user.id, "Events")
        .await
        .unwrap();
    engine
        .add_executive(&club_b.id, &user.id, "Events")
        .await
        .unwrap();

    engine.remove_executive(&club_a.id, &user.id).await.unwrap();
    // Still an executive elsewhere, so the coarse role holds.
    assert_eq!(role_of(&engine, &user.id).await, UserRole::Executive);

    engine.remove_executive(&club_b.id, &user.id).await.unwrap();
    assert_eq!(role_of(&engine, &user.id).await, UserRole::Member);
}

#[tokio::test]
async fn update_position_rewrites_label() {
    let (engine, _) = create_engine();
    let head = seed_user(&engine, "head@example.edu", "Hale", "Baskan").await;
    let user = seed_user(&engine, "e1@example.edu", "Ece", "Kurul").await;
    let club = approved_club(&engine, "Chess Club", &head.id).await;

    engine
        .add_executive(&club.id, &user.id, "Treasurer")
        .await
        .unwrap();
    let updated = engine
        .update_position(&user.id, &club.id, "Vice President")
        .await
        .unwrap();
    assert_eq!(updated.position, "Vice President");
}

#[tokio::test]
async fn update_position_refuses_the_head_row() {
    let (engine, _) = create_engine();
    let head = seed_user(&engine, "head@example.edu", "Hale", "Baskan").await;
    let club = approved_club(&engine, "Chess Club", &head.id).await;

    let err = engine
        .update_position(&head.id, &club.id, "Advisor")
        .await
        .unwrap_err();
    assert!(matches!(err, GovernanceError::PreconditionFailed(_)));
}

#[tokio::test]
async fn reactivate_active_executive_is_conflict() {
    let (engine, _) = create_engine();
    let head = seed_user(&engine, "head@example.edu", "Hale", "Baskan").await;
    let user = seed_user(&engine, "e1@example.edu", "Ece", "Kurul").await;
    let club = approved_club(&engine, "Chess Club", &head.id).await;

    engine
        .add_executive(&club.id, &user.id, "Treasurer")
        .await
        .unwrap();
    let err = engine
        .reactivate_executive(&user.id, &club.id, "Treasurer")
        .await
        .unwrap_err();
    assert!(matches!(err, GovernanceError::Conflict(_)));
}

#[tokio::test]
async fn reactivate_without_history_is_not_found() {
    let (engine, _) = create_engine();
    let head = seed_user(&engine, "head@example.edu", "Hale", "Baskan").await;
    let user = seed_user(&engine, "e1@example.edu", "Ece", "Kurul").await;
    let club = approved_club(&engine, "Chess Club", &head.id).await;

    let err = engine
        .reactivate_executive(&user.id, &club.id, "Treasurer")
        .await
        .unwrap_err();
    assert!(matches!(err, GovernanceError::NotFound(_)));
}

#[tokio::test]
async fn reactivation_restores_membership_too() {
    let (engine, _) = create_engine();
    let head = seed_user(&engine, "head@example.edu", "Hale", "Baskan").await;
    let user = seed_user(&engine, "e1@example.edu", "Ece", "Kurul").await;
    let club = approved_club(&engine, "Chess Club", &head.id).await;

    engine
        .add_executive(&club.id, &user.id, "Treasurer")
        .await
        .unwrap();
    engine.remove_executive(&club.id, &user.id).await.unwrap();
    engine.remove_member(&club.id, &user.id).await.unwrap();

    engine
        .reactivate_executive(&user.id, &club.id, "Treasurer")
        .await
        .unwrap();
    // Executives are always members.
    assert!(engine.is_member(&club.id, &user.id).await.unwrap());
}

#[tokio::test]
async fn clubs_with_executive_follows_active_seats() {
    let (engine, _) = create_engine();
    let head = seed_user(&engine, "head@example.edu", "Hale", "Baskan").await;
    let user = seed_user(&engine, "e1@example.edu", "Ece", "Kurul").await;
    let chess = approved_club(&engine, "Chess Club", &head.id).await;
    let go = approved_club(&engine, "Go Club", &head.id).await;

    engine
        .add_executive(&chess.id, &user.id, "Events")
        .await
        .unwrap();
    engine
        .add_executive(&go.id, &user.id, "Events")
        .await
        .unwrap();
    engine.remove_executive(&go.id, &user.id).await.unwrap();

    let clubs = engine.clubs_with_executive(&user.id).await.unwrap();
    assert_eq!(clubs.len(), 1);
    assert_eq!(clubs[0].id, chess.id);
}
