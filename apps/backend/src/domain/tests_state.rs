use crate::domain::colors::{CardColor, Team};
use crate::domain::fixtures::BoardFixtures;
use crate::domain::membership::Captains;
use crate::domain::state::{GameState, Status, MAX_HINT_COUNT};
use crate::errors::domain::GameError;

fn active() -> GameState {
    GameState::activated(BoardFixtures::ordered())
}

#[test]
fn new_game_waits_for_captains() {
    let mut game = GameState::new(BoardFixtures::ordered());
    assert_eq!(game.status(), Status::Waiting);
    assert_eq!(game.current_team(), Team::Red);
    assert_eq!(game.turn_number(), 1);
    assert_eq!(game.remaining().red, 9);
    assert_eq!(game.remaining().blue, 8);

    assert_eq!(
        game.start(&Captains {
            red: Some(1),
            blue: None
        }),
        Err(GameError::CaptainsMissing)
    );
    assert_eq!(
        game.apply_reveal(0, Team::Red).unwrap_err(),
        GameError::NotActive
    );

    let both = Captains {
        red: Some(1),
        blue: Some(2),
    };
    game.start(&both).unwrap();
    assert_eq!(game.status(), Status::Active);
    assert_eq!(game.start(&both), Err(GameError::AlreadyStarted));
}

#[test]
fn own_color_keeps_the_turn() {
    let mut game = active();
    let outcome = game.apply_reveal(0, Team::Red).unwrap();
    assert_eq!(outcome.color, CardColor::Red);
    assert!(!outcome.turn_switched);
    assert!(!outcome.game_over);
    assert_eq!(game.current_team(), Team::Red);
    assert_eq!(game.remaining().red, 8);
}

#[test]
fn neutral_keeps_the_turn() {
    let mut game = active();
    let outcome = game
        .apply_reveal(BoardFixtures::NEUTRAL.start, Team::Red)
        .unwrap();
    assert_eq!(outcome.color, CardColor::Neutral);
    assert!(!outcome.turn_switched);
    assert_eq!(game.current_team(), Team::Red);
    assert_eq!(game.remaining().red, 9);
    assert_eq!(game.remaining().blue, 8);
}

#[test]
fn opponent_color_passes_the_turn() {
    let mut game = active();
    let outcome = game
        .apply_reveal(BoardFixtures::BLUE.start, Team::Red)
        .unwrap();
    assert!(outcome.turn_switched);
    assert_eq!(outcome.current_team, Team::Blue);
    assert_eq!(outcome.turn_number, 2);
    assert_eq!(game.remaining().blue, 7);
}

#[test]
fn assassin_hands_the_win_to_the_other_team() {
    let mut game = active();
    let outcome = game
        .apply_reveal(BoardFixtures::ASSASSIN, Team::Red)
        .unwrap();
    assert!(outcome.game_over);
    assert_eq!(outcome.winner, Some(Team::Blue));
    assert_eq!(game.status(), Status::Finished);
    assert_eq!(game.winner(), Some(Team::Blue));

    assert_eq!(
        game.apply_reveal(0, Team::Red).unwrap_err(),
        GameError::NotActive
    );
}

#[test]
fn revealing_every_own_card_wins() {
    let mut game = active();
    for i in BoardFixtures::RED {
        let outcome = game.apply_reveal(i, Team::Red).unwrap();
        if i + 1 < BoardFixtures::RED.end {
            assert!(!outcome.game_over);
        } else {
            assert_eq!(outcome.winner, Some(Team::Red));
        }
    }
    assert_eq!(game.remaining().red, 0);
    assert_eq!(game.status(), Status::Finished);
}

#[test]
fn opponent_can_win_on_acting_teams_reveal() {
    let mut game = active();
    // Blue has 8 cards; Red reveals a blue card which passes the turn, then Blue finishes.
    game.apply_reveal(BoardFixtures::BLUE.start, Team::Red).unwrap();
    for i in BoardFixtures::BLUE.skip(1).take(6) {
        game.apply_reveal(i, Team::Blue).unwrap();
    }
    assert_eq!(game.remaining().blue, 1);
    // Blue hands the turn back by hitting a red card.
    game.apply_reveal(0, Team::Blue).unwrap();
    assert_eq!(game.current_team(), Team::Red);

    let last_blue = BoardFixtures::BLUE.end - 1;
    let outcome = game.apply_reveal(last_blue, Team::Red).unwrap();
    assert!(outcome.game_over);
    assert_eq!(outcome.winner, Some(Team::Blue));
}

#[test]
fn wrong_team_is_rejected_without_mutation() {
    let mut game = active();
    let before = game.clone();
    assert_eq!(
        game.apply_reveal(0, Team::Blue).unwrap_err(),
        GameError::WrongTurn
    );
    assert_eq!(game.board(), before.board());
    assert_eq!(game.remaining(), before.remaining());
    assert_eq!(game.turn_number(), before.turn_number());
}

#[test]
fn double_reveal_is_an_error_not_a_noop() {
    let mut game = active();
    game.apply_reveal(1, Team::Red).unwrap();
    let remaining = game.remaining();
    assert_eq!(
        game.apply_reveal(1, Team::Red).unwrap_err(),
        GameError::AlreadyRevealed { index: 1 }
    );
    assert_eq!(game.remaining(), remaining);
}

#[test]
fn out_of_range_reveal() {
    let mut game = active();
    assert_eq!(
        game.apply_reveal(99, Team::Red).unwrap_err(),
        GameError::OutOfRange { index: 99 }
    );
}

#[test]
fn hint_sets_guess_budget() {
    let mut game = active();
    game.give_hint("  fruit ", 2, Team::Red).unwrap();
    let hint = game.hint().unwrap();
    assert_eq!(hint.word, "fruit");
    assert_eq!(hint.count, 2);
    assert_eq!(game.guesses_left(), 3);

    game.apply_reveal(0, Team::Red).unwrap();
    assert_eq!(game.guesses_left(), 2);
}

#[test]
fn hint_validation() {
    let mut game = active();
    assert!(matches!(
        game.give_hint("   ", 1, Team::Red),
        Err(GameError::InvalidHint(_))
    ));
    for count in [i64::from(MAX_HINT_COUNT) + 1, 256, -1] {
        assert!(matches!(
            game.give_hint("word", count, Team::Red),
            Err(GameError::InvalidHint(_))
        ));
    }
    assert_eq!(
        game.give_hint("word", 1, Team::Blue),
        Err(GameError::WrongTurn)
    );
    assert!(game.hint().is_none());
}

#[test]
fn end_turn_clears_hint_and_switches() {
    let mut game = active();
    game.give_hint("fruit", 1, Team::Red).unwrap();
    game.end_turn(Team::Red).unwrap();
    assert_eq!(game.current_team(), Team::Blue);
    assert_eq!(game.turn_number(), 2);
    assert!(game.hint().is_none());
    assert_eq!(game.guesses_left(), 0);
    assert_eq!(game.end_turn(Team::Red), Err(GameError::WrongTurn));
}

#[test]
fn reset_returns_to_waiting_with_a_fresh_board() {
    let mut game = active();
    game.apply_reveal(BoardFixtures::ASSASSIN, Team::Red).unwrap();
    game.reset(BoardFixtures::ordered());
    assert_eq!(game.status(), Status::Waiting);
    assert_eq!(game.winner(), None);
    assert_eq!(game.turn_number(), 1);
    assert!(game.board().revealed().iter().all(|r| !r));
}
