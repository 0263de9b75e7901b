//! Integration tests for level corpus parsing, covering the shipped corpus
//! and the parser's behavior on degraded input.

use mushman::{parse_corpus, Direction, LevelState, Tile, TileKind, DEFAULT_CORPUS};
use proptest::prelude::*;

#[test]
fn test_shipped_corpus_has_six_levels() {
    let levels = parse_corpus(DEFAULT_CORPUS);
    let titles: Vec<&str> = levels.iter().map(|level| level.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "First Steps",
            "Sweet Obstruction",
            "Deep Water",
            "Demolition Day",
            "Twin Doors",
            "Point Blank",
        ]
    );
}

#[test]
fn test_shipped_corpus_keeps_authors() {
    let levels = parse_corpus(DEFAULT_CORPUS);
    assert_eq!(levels[0].author, "rosie");
    assert_eq!(levels[5].author, "ada");
}

#[test]
fn test_shipped_levels_are_well_formed() {
    for level in parse_corpus(DEFAULT_CORPUS) {
        assert!(level.width() > 0, "{} has no width", level.title);
        assert!(level.height() > 0, "{} has no height", level.title);

        let state = LevelState::from_definition(&level);
        assert!(
            state.player().is_some(),
            "{} has no player start",
            level.title
        );
        assert!(
            !state.grid().find_all_of_kind(TileKind::Exit).is_empty(),
            "{} has no exit",
            level.title
        );
    }
}

#[test]
fn test_shipped_portal_pair_is_linked() {
    let levels = parse_corpus(DEFAULT_CORPUS);
    let twin_doors = &levels[4];
    let state = LevelState::from_definition(twin_doors);

    let pads = state.grid().find_all_of_kind(TileKind::Portal);
    assert_eq!(pads.len(), 2);
    for pad in pads {
        let tile = state.grid().get(pad).unwrap();
        assert_eq!(tile.portal.unwrap().pair, 1);
        let partner = state.grid().portal_partner(1, pad);
        assert!(partner.is_some(), "pad at {pad:?} has no partner");
    }
}

#[test]
fn test_portal_codes_compress_to_one_cell() {
    let levels = parse_corpus("Compressed\nnone\nwt12t21w\n");
    let row = &levels[0].rows[0];
    assert_eq!(row.len(), 4);
    assert_eq!(row[1], Some(Tile::portal(1, Direction::Down)));
    assert_eq!(row[2], Some(Tile::portal(2, Direction::Up)));
}

#[test]
fn test_invalid_direction_digit_leaves_pad_unlinked() {
    let levels = parse_corpus("Broken Gate\nnone\nwt07ew\n");
    let row = &levels[0].rows[0];
    assert_eq!(row.len(), 4);
    assert_eq!(row[1], Some(Tile::new(TileKind::Portal)));
    assert_eq!(row[2], Some(Tile::new(TileKind::Exit)));
}

#[test]
fn test_incomplete_portal_code_decodes_per_character() {
    let levels = parse_corpus("Half Code\nnone\nwt4ew\n");
    let row = &levels[0].rows[0];
    // 't4e' is not a code: the pad, then a digit cell, then the exit.
    assert_eq!(row.len(), 5);
    assert_eq!(row[1], Some(Tile::new(TileKind::Portal)));
    assert_eq!(row[2], None);
    assert_eq!(row[3], Some(Tile::new(TileKind::Exit)));
}

#[test]
fn test_corpus_without_any_titles_is_empty() {
    let levels = parse_corpus("wwww\nwsew\nwwww\n");
    assert!(levels.is_empty());
}

#[test]
fn test_interleaved_housekeeping_lines_are_ignored() {
    let text = "Mushroom Man Levels\n42\n\nCastle\nnina\nwsew\n\n7\nMoat\nnina\nws~ew\n";
    let levels = parse_corpus(text);
    assert_eq!(levels.len(), 2);
    assert_eq!(levels[0].title, "Castle");
    assert_eq!(levels[1].title, "Moat");
    assert_eq!(levels[1].rows[0].len(), 5);
}

#[test]
fn test_empty_input_parses_to_nothing() {
    assert!(parse_corpus("").is_empty());
    assert!(parse_corpus("\n\n\n").is_empty());
}

proptest! {
    #[test]
    fn test_parser_never_panics(input in ".*") {
        let _ = parse_corpus(&input);
    }

    #[test]
    fn test_well_formed_blocks_parse_one_to_one(
        blocks in prop::collection::vec(
            (
                "[A-Z][a-z]{0,8}",
                "[a-z]{1,8}",
                prop::collection::vec("[wk][ws k]{0,8}", 1..4),
            ),
            1..6,
        )
    ) {
        let mut text = String::new();
        for (title, author, rows) in &blocks {
            text.push_str(title);
            text.push('\n');
            text.push_str(author);
            text.push('\n');
            for row in rows {
                text.push_str(row);
                text.push('\n');
            }
        }

        let levels = parse_corpus(&text);
        prop_assert_eq!(levels.len(), blocks.len());
        for (level, (title, author, rows)) in levels.iter().zip(&blocks) {
            prop_assert_eq!(&level.title, title);
            prop_assert_eq!(&level.author, author);
            prop_assert_eq!(level.rows.len(), rows.len());
        }
    }
}
