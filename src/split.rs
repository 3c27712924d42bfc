use std::{fs, path::Path};

use rand::{seq::SliceRandom, Rng};

use crate::{recreate_dir, Error};

/// Shuffle the files of `src` and copy `floor(fraction * n)` of them into
/// `train`, the rest into `test`. Both destinations are destroyed and
/// recreated first, so the split is a full rebuild. The file list is
/// sorted before shuffling so a seeded RNG reproduces the same partition
/// regardless of directory enumeration order.
pub fn split_dataset(
    src: &Path,
    train: &Path,
    test: &Path,
    fraction: f32,
    rng: &mut impl Rng,
) -> Result<(usize, usize), Error> {
    recreate_dir(train)?;
    recreate_dir(test)?;

    let entries = fs::read_dir(src).map_err(|source| Error::io(src, source))?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| Error::io(src, source))?;
        if entry.path().is_file() {
            names.push(entry.file_name());
        }
    }
    names.sort();
    names.shuffle(rng);

    let split = (names.len() as f32 * fraction) as usize;
    for (i, name) in names.iter().enumerate() {
        let dest = if i < split { train } else { test };
        let to = dest.join(name);
        fs::copy(src.join(name), &to).map_err(|source| Error::io(&to, source))?;
    }
    Ok((split, names.len() - split))
}
