use std::collections::HashMap;
use std::path::PathBuf;

use unicode_width::UnicodeWidthChar;

use crate::deck::{Deck, DeckBlock};
use crate::images::{caption, ImageState};

/// One rendered row of a block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockLine {
    Title(String),
    Text(String),
    Image(String),
}

/// Lay a block out at `width` columns
pub fn block_lines(
    block: &DeckBlock,
    width: usize,
    images: &HashMap<PathBuf, ImageState>,
) -> Vec<BlockLine> {
    let width = width.max(1);
    let mut lines = Vec::new();

    if !block.title.is_empty() {
        lines.extend(
            wrap_text_unicode(&block.title, width)
                .into_iter()
                .map(BlockLine::Title),
        );
    }
    lines.extend(
        wrap_text_unicode(&block.body, width)
            .into_iter()
            .map(BlockLine::Text),
    );
    for path in &block.images {
        let state = images.get(path).cloned().unwrap_or(ImageState::Loading);
        lines.extend(
            wrap_text_unicode(&caption(path, &state), width)
                .into_iter()
                .map(BlockLine::Image),
        );
    }
    lines
}

/// Rows every block needs at `width` columns
pub fn measure(deck: &Deck, width: usize, images: &HashMap<PathBuf, ImageState>) -> Vec<f64> {
    deck.article
        .blocks
        .iter()
        .map(|block| block_lines(block, width, images).len() as f64)
        .collect()
}

/// Wrap text respecting unicode character widths (CJK = 2 columns)
pub fn wrap_text_unicode(text: &str, max_width: usize) -> Vec<String> {
    let mut result = Vec::new();

    for paragraph in text.lines() {
        if paragraph.trim().is_empty() {
            result.push(String::new());
            continue;
        }

        let mut current_line = String::new();
        let mut current_width = 0;

        for word in paragraph.split_whitespace() {
            let word_width: usize = word.chars().map(|c| c.width().unwrap_or(1)).sum();
            let gap = usize::from(!current_line.is_empty());

            if current_width + gap + word_width <= max_width {
                if gap == 1 {
                    current_line.push(' ');
                }
                current_line.push_str(word);
                current_width += gap + word_width;
                continue;
            }

            if !current_line.is_empty() {
                result.push(std::mem::take(&mut current_line));
                current_width = 0;
            }

            // Words longer than a line are split by character
            for ch in word.chars() {
                let ch_width = ch.width().unwrap_or(1);
                if current_width + ch_width > max_width && !current_line.is_empty() {
                    result.push(std::mem::take(&mut current_line));
                    current_width = 0;
                }
                current_line.push(ch);
                current_width += ch_width;
            }
        }

        if !current_line.is_empty() {
            result.push(current_line);
        }
    }

    result
}
