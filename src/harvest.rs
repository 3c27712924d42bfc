use std::{ffi::OsStr, fs, path::Path};

use crate::{
    vocab::{glyph_filename, Vocabulary},
    Error,
};

/// Walk the handwriting sample tree and re-save every in-vocabulary
/// `.gif` as a grayscale `{index}_{char}.png` under `dest`.
///
/// The character of a sample is the last character of its containing
/// directory's name; this is the round-trip contract with the vocabulary,
/// kept as-is despite its fragility. Samples for characters outside the
/// vocabulary are skipped. Multiple samples of one character overwrite
/// each other, last write wins.
pub fn harvest_handwriting(root: &Path, vocab: &Vocabulary, dest: &Path) -> Result<usize, Error> {
    let mut harvested = 0;
    walk(root, vocab, dest, &mut harvested)?;
    Ok(harvested)
}

fn walk(dir: &Path, vocab: &Vocabulary, dest: &Path, harvested: &mut usize) -> Result<(), Error> {
    let dir_char = dir
        .file_name()
        .and_then(OsStr::to_str)
        .and_then(|name| name.chars().last());
    let entries = fs::read_dir(dir).map_err(|source| Error::io(dir, source))?;
    for entry in entries {
        let entry = entry.map_err(|source| Error::io(dir, source))?;
        let path = entry.path();
        if path.is_dir() {
            walk(&path, vocab, dest, harvested)?;
            continue;
        }
        if path.extension().and_then(OsStr::to_str) != Some("gif") {
            continue;
        }
        let Some(ch) = dir_char else { continue };
        let Some(index) = vocab.index_of(ch) else {
            log::debug!("skipping {}: '{ch}' not in vocabulary", path.display());
            continue;
        };
        let img = image::open(&path)
            .map_err(|source| Error::image(&path, source))?
            .to_luma8();
        let out = dest.join(glyph_filename(index, ch));
        img.save(&out).map_err(|source| Error::image(&out, source))?;
        *harvested += 1;
    }
    Ok(())
}
