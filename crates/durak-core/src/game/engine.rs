use crate::game::error::GameError;
use crate::game::log::GameLog;
use crate::game::rotation::{self, Roles};
use crate::game::round::{self, RoundOutcome, RoundReport};
use crate::game::rules::{DRAW_SENTINEL, RulesConfig};
use crate::model::card::Card;
use crate::model::deck::Deck;
use crate::model::player::{Player, Seat};
use crate::model::suit::Suit;
use crate::model::table::TableStack;
use core::fmt;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, trace};

/// Final result of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOutcome {
    /// The named player was left holding cards.
    Fool(String),
    /// The last two players emptied their hands in the same round.
    Draw,
}

impl GameOutcome {
    pub fn fool(&self) -> Option<&str> {
        match self {
            GameOutcome::Fool(name) => Some(name),
            GameOutcome::Draw => None,
        }
    }

    pub fn is_draw(&self) -> bool {
        matches!(self, GameOutcome::Draw)
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::Fool(name) => f.write_str(name),
            GameOutcome::Draw => f.write_str(DRAW_SENTINEL),
        }
    }
}

/// Drives one game from a shuffled deck to a single loser.
///
/// Each engine owns its deck, hands and table outright; independent games
/// never share state.
#[derive(Debug, Clone)]
pub struct GameEngine {
    rules: RulesConfig,
    players: Vec<Player>,
    deck: Deck,
    table: TableStack,
    trump_card: Option<Card>,
    roles: Option<Roles>,
    last_outcome: Option<RoundOutcome>,
    rounds_played: u32,
    discarded: usize,
    dealt: bool,
    log: GameLog,
}

impl GameEngine {
    pub fn new<S: AsRef<str>>(seed: u64, names: &[S]) -> Result<Self, GameError> {
        Self::with_rules(seed, names, RulesConfig::default())
    }

    pub fn with_rules<S: AsRef<str>>(
        seed: u64,
        names: &[S],
        rules: RulesConfig,
    ) -> Result<Self, GameError> {
        rules.validate()?;
        validate_names(&rules, names.iter().map(|name| name.as_ref()))?;

        let deck = Deck::shuffled_with_seed(seed, rules.shuffle_iterations);
        let players = names.iter().map(|name| Player::new(name.as_ref())).collect();

        Ok(Self {
            rules,
            players,
            deck,
            table: TableStack::new(),
            trump_card: None,
            roles: None,
            last_outcome: None,
            rounds_played: 0,
            discarded: 0,
            dealt: false,
            log: GameLog::default(),
        })
    }

    /// Builds an engine that is already dealt: `deck` must have its trump
    /// revealed, and the players' hands are weighted against it.
    pub fn from_parts(
        rules: RulesConfig,
        mut players: Vec<Player>,
        deck: Deck,
    ) -> Result<Self, GameError> {
        rules.validate()?;
        validate_names(&rules, players.iter().map(Player::name))?;
        let trump = deck.trump().ok_or(GameError::TrumpNotRevealed)?;
        for player in players.iter_mut() {
            player.hand_mut().assign_weights(trump);
        }
        let trump_card = deck.trump_card().copied();

        Ok(Self {
            rules,
            players,
            deck,
            table: TableStack::new(),
            trump_card,
            roles: None,
            last_outcome: None,
            rounds_played: 0,
            discarded: 0,
            dealt: true,
            log: GameLog::default(),
        })
    }

    /// Enables or disables the human-readable trace.
    pub fn with_trace(mut self, enabled: bool) -> Self {
        self.log = GameLog::new(enabled);
        self
    }

    /// Plays rounds until at most one player holds cards.
    pub fn run(&mut self) -> Result<GameOutcome, GameError> {
        self.setup()?;

        while self.players_left() > 1 {
            self.play_next_round()?;
        }

        let outcome = self.final_outcome();
        debug!(
            target: "durak_core::game",
            seed = self.deck.seed(),
            rounds = self.rounds_played,
            discarded = self.discarded,
            result = %outcome,
            "game finished"
        );
        Ok(outcome)
    }

    /// Plays a single round and refills the attacker's and then the
    /// defender's hand from the deck.
    pub fn play_next_round(&mut self) -> Result<RoundReport, GameError> {
        self.setup()?;
        if self.rounds_played >= self.rules.max_rounds {
            return Err(GameError::RoundLimit {
                limit: self.rules.max_rounds,
            });
        }

        let trump = self.deck.trump().ok_or(GameError::TrumpNotRevealed)?;
        let roles = self.choose_roles()?;
        let number = self.rounds_played + 1;
        self.log_round_header(number, roles);

        let report = round::play_round(
            &mut self.players,
            number,
            roles,
            &mut self.table,
            trump,
            self.rules.max_exchanges_per_round,
            &mut self.log,
        )?;

        self.discarded += report.discarded;
        self.replenish(roles.attacker);
        self.replenish(roles.defender);

        self.roles = Some(roles);
        self.last_outcome = Some(report.outcome);
        self.rounds_played = number;
        Ok(report)
    }

    /// Roles the next round would use, without playing it.
    pub fn choose_roles(&self) -> Result<Roles, GameError> {
        rotation::choose_roles(&self.players, self.roles, self.last_outcome)
    }

    /// `None` while two or more players still hold cards.
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.is_finished().then(|| self.final_outcome())
    }

    pub fn is_finished(&self) -> bool {
        self.dealt && self.players_left() <= 1
    }

    pub fn players_left(&self) -> usize {
        self.players.iter().filter(|p| p.has_cards()).count()
    }

    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, seat: Seat) -> Option<&Player> {
        self.players.get(seat.index())
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn table(&self) -> &TableStack {
        &self.table
    }

    pub fn trump(&self) -> Option<Suit> {
        self.deck.trump()
    }

    /// The card revealed for trump, even after it has been drawn.
    pub fn trump_card(&self) -> Option<Card> {
        self.trump_card
    }

    pub fn roles(&self) -> Option<Roles> {
        self.roles
    }

    pub fn last_outcome(&self) -> Option<RoundOutcome> {
        self.last_outcome
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    /// Cards permanently removed from play by defended rounds.
    pub fn discarded(&self) -> usize {
        self.discarded
    }

    /// Cards still held by players, left in the deck, or lying on the table.
    pub fn total_cards_in_play(&self) -> usize {
        let held: usize = self.players.iter().map(|p| p.hand().len()).sum();
        held + self.deck.len() + self.table.len()
    }

    pub fn log_lines(&self) -> &[String] {
        self.log.lines()
    }

    fn setup(&mut self) -> Result<(), GameError> {
        if self.dealt {
            return Ok(());
        }

        for index in 0..self.players.len() {
            for _ in 0..self.rules.hand_size {
                self.draw_into(Seat::new(index));
            }
        }

        let trump = self.deck.reveal_trump().ok_or(GameError::TrumpNotRevealed)?;
        self.trump_card = self.deck.trump_card().copied();
        self.deck.assign_weights();
        for player in self.players.iter_mut() {
            player.hand_mut().assign_weights(trump);
        }
        self.dealt = true;
        self.log_preamble();

        debug!(
            target: "durak_core::game",
            seed = self.deck.seed(),
            players = self.players.len(),
            trump = %trump,
            "cards dealt"
        );
        Ok(())
    }

    fn replenish(&mut self, seat: Seat) {
        let target = self.rules.hand_size;
        while self
            .player(seat)
            .is_some_and(|player| player.hand().len() < target)
        {
            if !self.draw_into(seat) {
                break;
            }
        }
    }

    fn draw_into(&mut self, seat: Seat) -> bool {
        let Some(player) = self.players.get_mut(seat.index()) else {
            return false;
        };
        let Some(card) = self.deck.draw() else {
            return false;
        };
        trace!(target: "durak_core::deck", player = player.name(), card = %card, "draw");
        player.hand_mut().add(card);
        true
    }

    fn final_outcome(&self) -> GameOutcome {
        let mut holding = self.players.iter().filter(|p| p.has_cards());
        match (holding.next(), holding.next()) {
            (Some(player), None) => GameOutcome::Fool(player.name().to_string()),
            _ => GameOutcome::Draw,
        }
    }

    fn log_preamble(&mut self) {
        let seed = self.deck.seed();
        let trump = self
            .trump_card
            .map(|card| card.to_string())
            .or_else(|| self.deck.trump().map(|suit| suit.to_string()))
            .unwrap_or_default();
        self.log.record(|| format!("Deck random: {seed}"));
        self.log.record(|| format!("Trump: {trump}"));
        for player in &self.players {
            self.log
                .record(|| format!("{}: {}", player.name(), player.hand()));
        }
    }

    fn log_round_header(&mut self, number: u32, roles: Roles) {
        let (Some(attacker), Some(defender)) = (
            self.players.get(roles.attacker.index()),
            self.players.get(roles.defender.index()),
        ) else {
            return;
        };
        self.log.record(String::new);
        self.log.record(|| {
            format!(
                "{number:02}: {}({}) vs {}({})",
                attacker.name(),
                attacker.hand(),
                defender.name(),
                defender.hand()
            )
        });
    }
}

fn validate_names<'a>(
    rules: &RulesConfig,
    names: impl ExactSizeIterator<Item = &'a str>,
) -> Result<(), GameError> {
    let found = names.len();
    if !rules.supports_player_count(found) {
        return Err(GameError::InvalidPlayerCount {
            found,
            min: rules.min_players,
            max: rules.max_players,
        });
    }

    let mut seen = HashSet::with_capacity(found);
    for name in names {
        if !seen.insert(name) {
            return Err(GameError::DuplicatePlayer(name.to_string()));
        }
    }
    Ok(())
}

/// Runs a full game with the default rules and returns the loser's name,
/// or the draw sentinel.
pub fn play_game<S: AsRef<str>>(seed: u64, names: &[S]) -> Result<String, GameError> {
    let mut engine = GameEngine::new(seed, names)?;
    Ok(engine.run()?.to_string())
}
