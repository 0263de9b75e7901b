//! # Levels Module
//!
//! Parsing of the level corpus text format. A corpus is a plain-text file
//! carrying any number of levels back to back:
//!
//! ```text
//! Level Title
//! author name
//! wwwww
//! ws ew
//! wwwww
//! ```
//!
//! Housekeeping lines (blank lines, `Mushroom Man` headers, bare level
//! counts) may appear anywhere and are skipped. A line containing an ASCII
//! uppercase letter is read as a title; the tile vocabulary is all
//! lowercase. The line after a title is always the author, taken verbatim.
//!
//! Parsing is total: malformed input degrades to fewer or smaller levels
//! and is reported through the log, never through an error.

use crate::game::{Direction, Tile, TileKind};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// The corpus shipped inside the binary, used when no file is given.
pub const DEFAULT_CORPUS: &str = include_str!("../../assets/levels.txt");

/// One parsed level, immutable once loaded.
///
/// `rows` holds the decoded grid in reading order; `None` cells are empty
/// floor. Rows may have different lengths, the level rectangle is the
/// longest row by the number of rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDefinition {
    pub title: String,
    pub author: String,
    pub rows: Vec<Vec<Option<Tile>>>,
}

impl LevelDefinition {
    /// Width of the level rectangle in cells.
    pub fn width(&self) -> i32 {
        self.rows.iter().map(|row| row.len()).max().unwrap_or(0) as i32
    }

    /// Height of the level rectangle in cells.
    pub fn height(&self) -> i32 {
        self.rows.len() as i32
    }
}

/// Parses a whole corpus into its levels.
///
/// Titled blocks without any grid rows are dropped, as are grid rows that
/// appear before the first title. Both are logged at debug level.
///
/// # Examples
///
/// ```
/// use mushman::parse_corpus;
///
/// let text = "Mushroom Man Levels\n1\nGarden Path\nanonymous\nws ke\nwwwww\n";
/// let levels = parse_corpus(text);
///
/// assert_eq!(levels.len(), 1);
/// assert_eq!(levels[0].title, "Garden Path");
/// assert_eq!(levels[0].author, "anonymous");
/// assert_eq!(levels[0].height(), 2);
/// assert_eq!(levels[0].width(), 5);
/// ```
pub fn parse_corpus(text: &str) -> Vec<LevelDefinition> {
    let lines: Vec<&str> = text.lines().map(str::trim).collect();
    let mut levels: Vec<LevelDefinition> = Vec::new();
    let mut current: Option<LevelDefinition> = None;
    let mut orphan_rows = 0usize;

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        if line.is_empty() || line.starts_with("Mushroom Man") || is_bare_number(line) {
            i += 1;
            continue;
        }
        if is_grid_line(line) {
            match current.as_mut() {
                Some(level) => level.rows.push(decode_row(line)),
                None => orphan_rows += 1,
            }
            i += 1;
        } else {
            flush(&mut levels, current.take());
            let author = lines.get(i + 1).copied().unwrap_or("");
            current = Some(LevelDefinition {
                title: line.to_string(),
                author: if author.is_empty() {
                    "Unknown".to_string()
                } else {
                    author.to_string()
                },
                rows: Vec::new(),
            });
            i += 2;
        }
    }
    flush(&mut levels, current.take());

    if orphan_rows > 0 {
        debug!("dropped {orphan_rows} grid rows that appeared before any title");
    }
    info!("loaded {} levels", levels.len());
    levels
}

fn flush(levels: &mut Vec<LevelDefinition>, finished: Option<LevelDefinition>) {
    if let Some(level) = finished {
        if level.rows.is_empty() {
            debug!("dropping level '{}' with no grid rows", level.title);
        } else {
            levels.push(level);
        }
    }
}

fn is_grid_line(line: &str) -> bool {
    !line.chars().any(|c| c.is_ascii_uppercase())
}

fn is_bare_number(line: &str) -> bool {
    !line.is_empty() && line.chars().all(|c| c.is_ascii_digit())
}

/// Decodes one grid row.
///
/// A `t` followed by two digits is a three-character teleporter code
/// (pair digit, then direction digit) occupying a single cell. Spaces and
/// characters outside the vocabulary decode as empty cells.
fn decode_row(line: &str) -> Vec<Option<Tile>> {
    let chars: Vec<char> = line.chars().collect();
    let mut row = Vec::new();

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let coded = c == 't'
            && i + 2 < chars.len()
            && chars[i + 1].is_ascii_digit()
            && chars[i + 2].is_ascii_digit();
        if coded {
            let pair = chars[i + 1] as u8 - b'0';
            let direction_digit = chars[i + 2] as u8 - b'0';
            match Direction::from_digit(direction_digit) {
                Some(direction) => row.push(Some(Tile::portal(pair, direction))),
                None => {
                    warn!(
                        "teleporter code t{pair}{direction_digit} has no valid direction, \
                         pad left unlinked"
                    );
                    row.push(Some(Tile::new(TileKind::Portal)));
                }
            }
            i += 3;
        } else if c == ' ' {
            row.push(None);
            i += 1;
        } else {
            row.push(TileKind::from_symbol(c).map(Tile::new));
            i += 1;
        }
    }
    row
}
