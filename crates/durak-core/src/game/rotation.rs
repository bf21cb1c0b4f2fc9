use crate::game::error::GameError;
use crate::game::round::RoundOutcome;
use crate::model::player::{Player, Seat};
use serde::{Deserialize, Serialize};

/// Attacker and defender for one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roles {
    pub attacker: Seat,
    pub defender: Seat,
}

/// First player after `seat` in seating order who still holds cards,
/// wrapping past the end of the list. `seat` itself is never returned.
pub fn next_player_after(players: &[Player], seat: Seat) -> Option<Seat> {
    let start = seat.index();
    let after = (start + 1..players.len()).find(|&i| players[i].has_cards());
    let before = || (0..start.min(players.len())).find(|&i| players[i].has_cards());
    after.or_else(before).map(Seat::new)
}

/// Picks the roles for the coming round from the previous one.
///
/// The first round opens with the first seat. After a repelled attack the
/// turn passes to the next player after the attacker; after a successful
/// attack the defender who picked up is skipped.
pub fn choose_roles(
    players: &[Player],
    previous: Option<Roles>,
    outcome: Option<RoundOutcome>,
) -> Result<Roles, GameError> {
    let attacker = match (previous, outcome) {
        (None, None) => Seat::new(0),
        (Some(roles), Some(RoundOutcome::AttackerFailed)) => {
            next_player_after(players, roles.attacker)
                .ok_or(GameError::NoEligiblePlayer(roles.attacker))?
        }
        (Some(roles), Some(RoundOutcome::AttackerSucceeded)) => {
            next_player_after(players, roles.defender)
                .ok_or(GameError::NoEligiblePlayer(roles.defender))?
        }
        _ => return Err(GameError::UnresolvedRound),
    };

    let defender =
        next_player_after(players, attacker).ok_or(GameError::NoEligiblePlayer(attacker))?;

    Ok(Roles { attacker, defender })
}
