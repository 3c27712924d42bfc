use std::{collections::HashMap, fs, path::Path};

use crate::Error;

/// Hard cap on vocabulary size.
pub const MAX_CHARS: usize = 1000;

/// Ordered set of unique characters, first-seen order, capped at
/// [`MAX_CHARS`]. The position of a character is its stable index for the
/// duration of a run and correlates rendered and handwritten glyphs
/// through the `{index}_{char}.png` naming convention.
#[derive(Clone, Debug, Default)]
pub struct Vocabulary {
    chars: Vec<char>,
    index: HashMap<char, usize>,
}

impl Vocabulary {
    /// Collect characters in encounter order, skipping duplicates,
    /// stopping at the cap.
    pub fn from_chars(chars: impl Iterator<Item = char>) -> Self {
        let mut vocab = Self::default();
        for ch in chars {
            if vocab.chars.len() >= MAX_CHARS {
                break;
            }
            if vocab.index.contains_key(&ch) {
                continue;
            }
            vocab.index.insert(ch, vocab.chars.len());
            vocab.chars.push(ch);
        }
        vocab
    }

    /// Load from a newline-delimited UTF-8 character list. Only
    /// line-boundary whitespace is stripped; a space in the middle of a
    /// line becomes a vocabulary entry like any other character.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = fs::read_to_string(path).map_err(|source| Error::io(path, source))?;
        Ok(Self::from_chars(
            text.lines().flat_map(|line| line.trim().chars()),
        ))
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn index_of(&self, ch: char) -> Option<usize> {
        self.index.get(&ch).copied()
    }

    /// Iterate `(index, character)` pairs in vocabulary order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, char)> + '_ {
        self.chars.iter().copied().enumerate()
    }
}

/// Output filename correlating a glyph image with its vocabulary slot;
/// both dataset sides use it so train pairs line up by name.
pub(crate) fn glyph_filename(index: usize, ch: char) -> String {
    format!("{index}_{ch}.png")
}
