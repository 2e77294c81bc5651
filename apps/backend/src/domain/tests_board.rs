use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::domain::board::{Board, BOARD_SIZE};
use crate::domain::colors::CardColor;
use crate::domain::deck::WordDeck;
use crate::domain::fixtures::BoardFixtures;
use crate::errors::domain::GameError;

fn seeded_board(seed: u64) -> Board {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let words = WordDeck::builtin().draw(&mut rng, BOARD_SIZE).unwrap();
    Board::new(words, &mut rng).unwrap()
}

#[test]
fn fresh_board_is_fully_hidden() {
    let board = seeded_board(11);
    assert_eq!(board.words().len(), BOARD_SIZE);
    assert_eq!(board.ownership().len(), BOARD_SIZE);
    assert!(board.revealed().iter().all(|open| !open));
    assert!(board.revealed_colors().iter().all(Option::is_none));
}

#[test]
fn reveal_returns_color_then_rejects_repeat() {
    let mut board = BoardFixtures::ordered();
    assert_eq!(board.reveal(BoardFixtures::ASSASSIN), Ok(CardColor::Assassin));

    let before = board.clone();
    assert_eq!(
        board.reveal(BoardFixtures::ASSASSIN),
        Err(GameError::AlreadyRevealed {
            index: BoardFixtures::ASSASSIN
        })
    );
    assert_eq!(board, before, "failed reveal must not change the board");
}

#[test]
fn reveal_out_of_range() {
    let mut board = BoardFixtures::ordered();
    assert_eq!(
        board.reveal(BOARD_SIZE),
        Err(GameError::OutOfRange { index: 25 })
    );
    assert_eq!(board, BoardFixtures::ordered());
}

#[test]
fn revealed_colors_expose_only_open_cards() {
    let mut board = BoardFixtures::ordered();
    board.reveal(BoardFixtures::BLUE.start).unwrap();
    let colors = board.revealed_colors();
    assert_eq!(colors[BoardFixtures::BLUE.start], Some(CardColor::Blue));
    assert_eq!(colors.iter().filter(|c| c.is_some()).count(), 1);
    assert_eq!(board.unrevealed_count(CardColor::Blue), 7);
}

#[test]
fn rejects_duplicate_words() {
    let mut words = BoardFixtures::words();
    words[24] = words[0].clone();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    assert!(matches!(
        Board::new(words, &mut rng),
        Err(GameError::InvalidBoard(_))
    ));
}

#[test]
fn rejects_short_word_list() {
    let words = BoardFixtures::words().into_iter().take(24).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    assert!(matches!(
        Board::new(words, &mut rng),
        Err(GameError::InvalidBoard(_))
    ));
}

#[test]
fn rejects_long_word_list_naming_the_count() {
    let mut words = BoardFixtures::words();
    words.push("extra".into());
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let err = Board::new(words, &mut rng).unwrap_err();
    assert!(matches!(err, GameError::InvalidBoard(_)));
    assert!(err.to_string().contains("got 26 words"), "{err}");
}

#[test]
fn layout_must_match_color_multiset() {
    let mut layout = crate::domain::colors::standard_layout();
    layout[BoardFixtures::ASSASSIN] = CardColor::Neutral;
    let err = Board::from_layout(BoardFixtures::words(), layout).unwrap_err();
    assert!(matches!(err, GameError::InvalidBoard(_)));
    assert!(err.to_string().contains("color layout"), "{err}");
    assert!(!err.to_string().contains("deck"), "{err}");
}

#[test]
fn color_at_reads_without_revealing() {
    let board = BoardFixtures::ordered();
    assert_eq!(board.color_at(BoardFixtures::ASSASSIN), Some(CardColor::Assassin));
    assert_eq!(board.color_at(25), None);
    assert!(board.revealed().iter().all(|open| !open));
}
