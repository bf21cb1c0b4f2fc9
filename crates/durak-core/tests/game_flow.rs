use durak_core::game::round::RoundOutcome;
use durak_core::model::card::Card;
use durak_core::model::deck::Deck;
use durak_core::model::hand::Hand;
use durak_core::model::player::{Player, Seat};
use durak_core::model::rank::Rank;
use durak_core::model::suit::Suit;
use durak_core::{DRAW_SENTINEL, GameEngine, GameOutcome, RulesConfig, play_game};

const NAMES: [&str; 4] = ["A", "B", "C", "D"];

fn hand(cards: &[(Rank, Suit)]) -> Hand {
    Hand::with_cards(cards.iter().map(|&(r, s)| Card::new(r, s)).collect())
}

fn is_sorted(hand: &Hand) -> bool {
    hand.cards().windows(2).all(|w| w[0].weight() <= w[1].weight())
}

#[test]
fn fixed_seeds_produce_recorded_losers() {
    assert_eq!(play_game(1, &NAMES[..2]).unwrap(), "B");
    assert_eq!(play_game(7, &NAMES[..3]).unwrap(), "A");
    assert_eq!(play_game(5, &NAMES).unwrap(), "D");
    assert_eq!(play_game(0, &["North", "East", "South"]).unwrap(), "East");
}

#[test]
fn repeated_runs_are_identical() {
    for players in 2..=4 {
        let run = || {
            let mut engine = GameEngine::new(11, &NAMES[..players])
                .unwrap()
                .with_trace(true);
            let outcome = engine.run().unwrap();
            (outcome, engine.log_lines().to_vec())
        };
        let (first_outcome, first_log) = run();
        let (second_outcome, second_log) = run();
        assert_eq!(first_outcome, second_outcome);
        assert_eq!(first_log, second_log);
        assert!(!first_log.is_empty());
    }
}

#[test]
fn every_seed_and_player_count_terminates() {
    for players in 2..=4 {
        for seed in 0..72u64 {
            let mut engine = GameEngine::new(seed, &NAMES[..players]).unwrap();
            let outcome = engine
                .run()
                .unwrap_or_else(|err| panic!("seed {seed} with {players} players: {err}"));
            assert!(engine.rounds_played() <= RulesConfig::default().max_rounds);
            match &outcome {
                GameOutcome::Fool(name) => assert!(NAMES[..players].contains(&name.as_str())),
                GameOutcome::Draw => assert_eq!(outcome.to_string(), DRAW_SENTINEL),
            }
        }
    }
}

#[test]
fn cards_are_conserved_round_by_round() {
    for players in 2..=4 {
        let mut engine = GameEngine::new(23, &NAMES[..players]).unwrap();
        let mut discarded = 0;
        while !engine.is_finished() {
            let report = engine.play_next_round().unwrap();
            if report.outcome == RoundOutcome::AttackerFailed {
                assert_eq!(report.taken, 0);
            } else {
                assert_eq!(report.discarded, 0);
                // every attack but the last was beaten; dumped cards come on top
                let attacks = report.attacks as usize;
                assert!(attacks >= 1);
                assert!(report.taken >= 2 * attacks - 1);
            }
            discarded += report.discarded;

            assert!(engine.table().is_empty());
            assert_eq!(engine.discarded(), discarded);
            assert_eq!(engine.total_cards_in_play() + discarded, Deck::SIZE);
            for player in engine.players() {
                assert!(is_sorted(player.hand()));
            }
            if engine.deck().has_cards() {
                for seat in [report.roles.attacker, report.roles.defender] {
                    let held = engine.player(seat).unwrap().hand().len();
                    assert!(held >= engine.rules().hand_size);
                }
            }
        }
    }
}

#[test]
fn repelled_attack_passes_turn_to_next_seat() {
    let players = vec![
        Player::with_hand("A", hand(&[(Rank::Six, Suit::Spades), (Rank::King, Suit::Diamonds)])),
        Player::with_hand(
            "B",
            hand(&[
                (Rank::Seven, Suit::Spades),
                (Rank::Ace, Suit::Diamonds),
                (Rank::Nine, Suit::Clubs),
            ]),
        ),
        Player::with_hand("C", hand(&[(Rank::Eight, Suit::Clubs), (Rank::Ten, Suit::Clubs)])),
    ];
    let deck = Deck::from_cards(0, Vec::<Card>::new(), Suit::Hearts);
    let mut engine = GameEngine::from_parts(RulesConfig::default(), players, deck).unwrap();

    let first = engine.play_next_round().unwrap();
    assert_eq!(first.roles.attacker, Seat::new(0));
    assert_eq!(first.roles.defender, Seat::new(1));
    assert_eq!(first.outcome, RoundOutcome::AttackerFailed);
    assert_eq!(first.discarded, 2);

    let next = engine.choose_roles().unwrap();
    assert_eq!(next.attacker, Seat::new(1));
    assert_eq!(next.defender, Seat::new(2));
}

#[test]
fn repelled_attack_skips_a_defender_who_emptied_their_hand() {
    let players = vec![
        Player::with_hand(
            "A",
            hand(&[
                (Rank::Six, Suit::Spades),
                (Rank::Seven, Suit::Clubs),
                (Rank::Queen, Suit::Diamonds),
            ]),
        ),
        Player::with_hand("B", hand(&[(Rank::Seven, Suit::Spades), (Rank::Eight, Suit::Clubs)])),
        Player::with_hand("C", hand(&[(Rank::Nine, Suit::Clubs), (Rank::Ten, Suit::Clubs)])),
    ];
    let deck = Deck::from_cards(0, Vec::<Card>::new(), Suit::Hearts);
    let mut engine = GameEngine::from_parts(RulesConfig::default(), players, deck).unwrap();

    let first = engine.play_next_round().unwrap();
    assert_eq!(first.outcome, RoundOutcome::AttackerFailed);
    assert_eq!(first.attacks, 2);
    assert_eq!(first.discarded, 4);
    assert!(!engine.players()[1].has_cards());

    let next = engine.choose_roles().unwrap();
    assert_eq!(next.attacker, Seat::new(2));
    assert_eq!(next.defender, Seat::new(0));
}

#[test]
fn successful_attack_skips_the_defender_for_the_next_attack() {
    let players = vec![
        Player::with_hand("A", hand(&[(Rank::Ace, Suit::Spades), (Rank::Six, Suit::Clubs)])),
        Player::with_hand("B", hand(&[(Rank::Six, Suit::Diamonds), (Rank::Seven, Suit::Diamonds)])),
        Player::with_hand("C", hand(&[(Rank::Nine, Suit::Clubs), (Rank::Ten, Suit::Clubs)])),
    ];
    let deck = Deck::from_cards(0, Vec::<Card>::new(), Suit::Hearts);
    let mut engine = GameEngine::from_parts(RulesConfig::default(), players, deck).unwrap();

    let first = engine.play_next_round().unwrap();
    assert_eq!(first.outcome, RoundOutcome::AttackerSucceeded);
    assert_eq!(first.taken, 1);
    assert_eq!(engine.players()[1].hand().len(), 3);

    let next = engine.choose_roles().unwrap();
    assert_eq!(next.attacker, Seat::new(2));
    assert_eq!(next.defender, Seat::new(0));
}
