//! Plain-text import format: blank-line-separated key/value blocks.
//!
//! ```text
//! Title: Касабланка
//! Release Year: 1942
//! Format: DVD
//! Stars: Гамфрі Богарт, Інгрід Бергман
//! ```

use filmoteka_catalog::normalize;
use filmoteka_catalog::types::{MovieCandidate, MovieFormat};

/// Split raw import text into movie candidates.
///
/// Blocks are separated by blank (or whitespace-only) lines. A block
/// must carry all four keys (`Title`, `Release Year`, `Format`, `Stars`)
/// to produce a candidate; incomplete blocks are dropped with a warning
/// and never counted. A year or format value that does not parse counts
/// as missing.
pub fn parse_candidates(content: &str) -> Vec<MovieCandidate> {
    let mut candidates = Vec::new();
    for block in split_blocks(content) {
        match parse_block(&block) {
            Some(candidate) => candidates.push(candidate),
            None => log::warn!("dropping incomplete import block: {}", block_label(&block)),
        }
    }
    candidates
}

/// Group non-blank lines into blocks.
fn split_blocks(content: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in content.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }
    blocks
}

/// Assemble one candidate from a block's lines.
///
/// Only the first `:` on a line splits key from value; later colons
/// belong to the value, so "Title: Heat 2: The Reckoning" keeps its
/// subtitle. Unknown keys are ignored.
fn parse_block(lines: &[&str]) -> Option<MovieCandidate> {
    let mut title = None;
    let mut year = None;
    let mut format = None;
    let mut stars = None;

    for line in lines {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        match key.trim() {
            "Title" => title = Some(normalize::clean(value)),
            "Release Year" => year = value.parse::<i32>().ok(),
            "Format" => format = MovieFormat::parse_loose(value),
            "Stars" => {
                stars = Some(
                    value
                        .split(',')
                        .map(normalize::clean)
                        .filter(|name| !name.is_empty())
                        .collect::<Vec<_>>(),
                );
            }
            _ => {}
        }
    }

    let title = title.filter(|t| !t.is_empty())?;
    Some(MovieCandidate {
        title,
        year: year?,
        format: format?,
        actors: stars?,
    })
}

fn block_label<'a>(lines: &[&'a str]) -> &'a str {
    lines.first().map(|l| l.trim()).unwrap_or("")
}
