use crate::domain::colors::Team;
use crate::domain::membership::{Membership, Role};
use crate::errors::domain::GameError;

fn roster(ids: &[i64]) -> Membership {
    let mut members = Membership::new();
    for &id in ids {
        members.join(id, &format!("user{id}"));
    }
    members
}

#[test]
fn join_balances_teams() {
    let members = roster(&[1, 2, 3, 4, 5]);
    assert_eq!(members.team_size(Team::Red), 3);
    assert_eq!(members.team_size(Team::Blue), 2);
    assert!(members.members().all(|m| m.role == Role::Operative));
}

#[test]
fn join_is_idempotent() {
    let mut members = roster(&[1]);
    let first = members.get(1).cloned().unwrap();
    let again = members.join(1, "renamed").clone();
    assert_eq!(first, again);
    assert_eq!(members.len(), 1);
}

#[test]
fn captain_seat_cannot_be_taken_over() {
    let mut members = roster(&[1, 2]);
    members.assign(Team::Red, 1, Role::Spymaster).unwrap();
    assert_eq!(
        members.assign(Team::Red, 2, Role::Spymaster).unwrap_err(),
        GameError::SeatTaken
    );
    assert_eq!(members.captains().red, Some(1));
    assert!(!members.is_spymaster(2));

    // Re-assigning the holder is fine.
    members.assign(Team::Red, 1, Role::Spymaster).unwrap();
    assert!(members.is_spymaster(1));
}

#[test]
fn assign_requires_membership() {
    let mut members = roster(&[1]);
    assert_eq!(
        members.assign(Team::Blue, 9, Role::Spymaster).unwrap_err(),
        GameError::NotAMember(9)
    );
    assert_eq!(members.captains().blue, None);
}

#[test]
fn switching_seats_releases_the_old_one() {
    let mut members = roster(&[1]);
    members.assign(Team::Red, 1, Role::Spymaster).unwrap();
    members.assign(Team::Blue, 1, Role::Spymaster).unwrap();
    assert_eq!(members.captains().red, None);
    assert_eq!(members.captains().blue, Some(1));
    assert_eq!(members.get(1).unwrap().team, Team::Blue);
}

#[test]
fn demotion_to_operative_drops_key_access() {
    let mut members = roster(&[1]);
    members.assign(Team::Red, 1, Role::Spymaster).unwrap();
    members.assign(Team::Red, 1, Role::Operative).unwrap();
    assert_eq!(members.captains().red, None);
    assert!(!members.is_spymaster(1));
}

#[test]
fn leaving_releases_the_seat() {
    let mut members = roster(&[1, 2]);
    members.assign(Team::Blue, 2, Role::Spymaster).unwrap();
    let gone = members.leave(2).unwrap();
    assert_eq!(gone.user_id, 2);
    assert_eq!(members.captains().blue, None);
    assert!(members.leave(2).is_none());
    assert_eq!(members.require(2).unwrap_err(), GameError::NotAMember(2));
}

#[test]
fn presence_tracking() {
    let mut members = roster(&[1, 2]);
    members.set_online(1, true);
    members.set_online(42, true);
    assert_eq!(members.online_count(), 1);
    members.set_online(1, false);
    assert_eq!(members.online_count(), 0);
}
