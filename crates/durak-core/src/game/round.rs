use crate::game::error::GameError;
use crate::game::log::GameLog;
use crate::game::rotation::Roles;
use crate::model::player::{Player, Seat};
use crate::model::suit::Suit;
use crate::model::table::TableStack;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundOutcome {
    /// The defender could not beat a card and picked up the table.
    AttackerSucceeded,
    /// The attacker ran out of follow-ups, or someone ran out of cards.
    AttackerFailed,
}

/// What happened in one completed round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundReport {
    pub number: u32,
    pub roles: Roles,
    pub outcome: RoundOutcome,
    /// Attacking cards placed on the table.
    pub attacks: u32,
    /// Cards removed from play when the table was cleared.
    pub discarded: usize,
    /// Cards picked up by the defender.
    pub taken: usize,
}

/// Plays one attack/defence round between the two seats in `roles`.
///
/// The table is always empty again when this returns `Ok`.
pub(crate) fn play_round(
    players: &mut [Player],
    number: u32,
    roles: Roles,
    table: &mut TableStack,
    trump: Suit,
    exchange_limit: u32,
    log: &mut GameLog,
) -> Result<RoundReport, GameError> {
    let (attacker, defender) = pair_mut(players, roles.attacker, roles.defender)
        .ok_or(GameError::NoEligiblePlayer(roles.attacker))?;

    let mut exchanges = 0u32;
    let mut attacks = 0u32;
    let report = |outcome, attacks, discarded, taken| RoundReport {
        number,
        roles,
        outcome,
        attacks,
        discarded,
        taken,
    };

    while attacker.has_cards() && defender.has_cards() {
        exchanges += 1;
        if exchanges > exchange_limit {
            return Err(GameError::RoundExchangeLimit {
                limit: exchange_limit,
            });
        }

        let attack = attacker
            .hand()
            .attacking_card(table, trump)
            .and_then(|index| attacker.hand_mut().take(index));
        let Some(attack) = attack else {
            let discarded = table.purify().len();
            debug!(
                target: "durak_core::round",
                round = number,
                attacker = attacker.name(),
                defender = defender.name(),
                attacks,
                discarded,
                "attack repelled"
            );
            return Ok(report(RoundOutcome::AttackerFailed, attacks, discarded, 0));
        };

        attacks += 1;
        table.add(attack);
        log.record(|| format!("{} -->{}", attacker.name(), attack));

        let defence = defender
            .hand()
            .defending_card(&attack, trump)
            .and_then(|index| defender.hand_mut().take(index));
        let Some(defence) = defence else {
            attacker.hand_mut().dump_matching_to(table, trump);
            for card in table.cards() {
                log.record(|| format!("{} <--{}", defender.name(), card));
            }
            defender.hand_mut().take_table(table);
            let taken = table.purify().len();
            debug!(
                target: "durak_core::round",
                round = number,
                attacker = attacker.name(),
                defender = defender.name(),
                attacks,
                taken,
                "defender picked up"
            );
            return Ok(report(RoundOutcome::AttackerSucceeded, attacks, 0, taken));
        };

        log.record(|| format!("{} <--{}", defence, defender.name()));
        table.add(defence);
    }

    let discarded = table.purify().len();
    debug!(
        target: "durak_core::round",
        round = number,
        attacker = attacker.name(),
        defender = defender.name(),
        attacks,
        discarded,
        "round ended with an empty hand"
    );
    Ok(report(RoundOutcome::AttackerFailed, attacks, discarded, 0))
}

fn pair_mut(
    players: &mut [Player],
    first: Seat,
    second: Seat,
) -> Option<(&mut Player, &mut Player)> {
    let (a, b) = (first.index(), second.index());
    if a < b {
        let (left, right) = players.split_at_mut(b);
        Some((left.get_mut(a)?, right.first_mut()?))
    } else if b < a {
        let (left, right) = players.split_at_mut(a);
        Some((right.first_mut()?, left.get_mut(b)?))
    } else {
        None
    }
}
