//! Participants, their teams and roles, and the two captain seats.

use std::collections::BTreeMap;

use serde::Serialize;
use time::OffsetDateTime;

use crate::domain::colors::Team;
use crate::errors::domain::GameError;

/// Participant identity as supplied by the caller (e.g. a chat user id).
pub type ParticipantId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Captain: sees the full key and gives hints.
    Spymaster,
    /// Agent: sees only revealed outcomes.
    Operative,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Member {
    pub user_id: ParticipantId,
    pub display_name: String,
    pub team: Team,
    pub role: Role,
    pub online: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub joined_at: OffsetDateTime,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Captains {
    pub red: Option<ParticipantId>,
    pub blue: Option<ParticipantId>,
}

impl Captains {
    pub fn get(&self, team: Team) -> Option<ParticipantId> {
        match team {
            Team::Red => self.red,
            Team::Blue => self.blue,
        }
    }

    fn slot_mut(&mut self, team: Team) -> &mut Option<ParticipantId> {
        match team {
            Team::Red => &mut self.red,
            Team::Blue => &mut self.blue,
        }
    }

    pub fn both_filled(&self) -> bool {
        self.red.is_some() && self.blue.is_some()
    }

    /// Team whose seat `identity` holds, if any.
    pub fn seat_of(&self, identity: ParticipantId) -> Option<Team> {
        Team::ALL.into_iter().find(|&t| self.get(t) == Some(identity))
    }

    fn release(&mut self, identity: ParticipantId) {
        for team in Team::ALL {
            let slot = self.slot_mut(team);
            if *slot == Some(identity) {
                *slot = None;
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Membership {
    members: BTreeMap<ParticipantId, Member>,
    captains: Captains,
}

impl Membership {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a participant to the smaller team (ties go to Red) as an operative.
    /// Joining twice returns the existing record unchanged.
    pub fn join(&mut self, identity: ParticipantId, display_name: &str) -> &Member {
        let team = self.least_populated_team();
        self.members.entry(identity).or_insert_with(|| Member {
            user_id: identity,
            display_name: display_name.trim().to_string(),
            team,
            role: Role::Operative,
            online: false,
            joined_at: OffsetDateTime::now_utc(),
        })
    }

    /// Puts `identity` on `team` with `role`.
    ///
    /// As spymaster it takes the team's captain seat; an occupied seat is refused
    /// with `SeatTaken` unless the occupant is `identity` itself. Any other seat the
    /// identity held is released so captain and membership entries stay consistent.
    pub fn assign(
        &mut self,
        team: Team,
        identity: ParticipantId,
        role: Role,
    ) -> Result<&Member, GameError> {
        if !self.members.contains_key(&identity) {
            return Err(GameError::NotAMember(identity));
        }
        if role == Role::Spymaster {
            if let Some(holder) = self.captains.get(team) {
                if holder != identity {
                    return Err(GameError::SeatTaken);
                }
            }
        }

        self.captains.release(identity);
        if role == Role::Spymaster {
            *self.captains.slot_mut(team) = Some(identity);
        }

        let member = self
            .members
            .get_mut(&identity)
            .ok_or(GameError::NotAMember(identity))?;
        member.team = team;
        member.role = role;
        Ok(member)
    }

    /// Removes a participant, releasing any captain seat it held.
    pub fn leave(&mut self, identity: ParticipantId) -> Option<Member> {
        let removed = self.members.remove(&identity)?;
        self.captains.release(identity);
        Some(removed)
    }

    pub fn set_online(&mut self, identity: ParticipantId, online: bool) {
        if let Some(member) = self.members.get_mut(&identity) {
            member.online = online;
        }
    }

    pub fn get(&self, identity: ParticipantId) -> Option<&Member> {
        self.members.get(&identity)
    }

    pub fn require(&self, identity: ParticipantId) -> Result<&Member, GameError> {
        self.get(identity).ok_or(GameError::NotAMember(identity))
    }

    /// True only for a recorded captain whose member record also says spymaster.
    pub fn is_spymaster(&self, identity: ParticipantId) -> bool {
        let Some(member) = self.members.get(&identity) else {
            return false;
        };
        member.role == Role::Spymaster && self.captains.get(member.team) == Some(identity)
    }

    pub fn captains(&self) -> &Captains {
        &self.captains
    }

    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.members.values()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn online_count(&self) -> usize {
        self.members.values().filter(|m| m.online).count()
    }

    pub fn team_size(&self, team: Team) -> usize {
        self.members.values().filter(|m| m.team == team).count()
    }

    fn least_populated_team(&self) -> Team {
        if self.team_size(Team::Red) <= self.team_size(Team::Blue) {
            Team::Red
        } else {
            Team::Blue
        }
    }
}
