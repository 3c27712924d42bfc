//! Paired glyph dataset generation for font-to-handwriting image
//! translation.
//!
//! Renders a vocabulary of characters from a font onto fixed-size
//! grayscale canvases (side "A"), harvests matching handwritten samples
//! from a directory tree (side "B"), normalizes both to a common canvas
//! geometry, and splits each side into train/test partitions.

mod center;
mod edge;
mod harvest;
mod math;
mod raster;
mod split;
mod vocab;

pub use center::{content_bounds, Recenter, HANDWRITTEN, RENDERED};
pub use vocab::{Vocabulary, MAX_CHARS};

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::info;
use rand::{rngs::SmallRng, SeedableRng};
use ttf_parser::Face;

pub const CANVAS_SIZE: u32 = 256;
pub const FONT_SIZE: f32 = 200.0;
pub const TRAIN_SPLIT: f32 = 0.9;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to parse font: {0}")]
    FontParse(#[from] ttf_parser::FaceParsingError),
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl Error {
    pub(crate) fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.as_ref().to_owned(),
            source,
        }
    }

    pub(crate) fn image(path: impl AsRef<Path>, source: image::ImageError) -> Self {
        Error::Image {
            path: path.as_ref().to_owned(),
            source,
        }
    }
}

/// Input files and the output root of one dataset build.
#[derive(Clone, Debug)]
pub struct DatasetPaths {
    pub font: PathBuf,
    pub charlist: PathBuf,
    pub handwriting: PathBuf,
    pub out: PathBuf,
}

impl DatasetPaths {
    fn all_a(&self) -> PathBuf {
        self.out.join("allA")
    }

    fn all_b(&self) -> PathBuf {
        self.out.join("allB")
    }

    fn all_b_resized(&self) -> PathBuf {
        self.out.join("allB_resized")
    }

    pub fn train_a(&self) -> PathBuf {
        self.out.join("trainA")
    }

    pub fn test_a(&self) -> PathBuf {
        self.out.join("testA")
    }

    pub fn train_b(&self) -> PathBuf {
        self.out.join("trainB")
    }

    pub fn test_b(&self) -> PathBuf {
        self.out.join("testB")
    }
}

#[derive(Clone, Copy, Debug)]
#[non_exhaustive]
pub struct Summary {
    pub vocab_len: usize,
    pub harvested: usize,
    pub train_a: usize,
    pub test_a: usize,
    pub train_b: usize,
    pub test_b: usize,
}

#[derive(Clone, Copy, Debug)]
pub struct DatasetBuilder {
    canvas_size: u32,
    font_size: f32,
    train_fraction: f32,
    seed: Option<u64>,
}

impl Default for DatasetBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetBuilder {
    pub fn new() -> Self {
        Self {
            canvas_size: CANVAS_SIZE,
            font_size: FONT_SIZE,
            train_fraction: TRAIN_SPLIT,
            seed: None,
        }
    }

    pub fn with_canvas_size(self, canvas_size: u32) -> Self {
        assert!(canvas_size >= 2);
        Self {
            canvas_size,
            ..self
        }
    }

    pub fn with_font_size(self, font_size: f32) -> Self {
        assert!(font_size > 0.0);
        Self { font_size, ..self }
    }

    pub fn with_train_fraction(self, train_fraction: f32) -> Self {
        assert!((0.0..=1.0).contains(&train_fraction));
        Self {
            train_fraction,
            ..self
        }
    }

    /// Seed the split shuffle for reproducible partitions. Without a seed
    /// the shuffle is OS-seeded and differs between runs.
    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..self
        }
    }

    /// Run the whole pipeline: render, harvest, normalize, split, clean
    /// up the intermediate directories. Sequential and crash-to-halt; the
    /// first error aborts and leaves output directories as they were.
    pub fn run(&self, paths: &DatasetPaths) -> Result<Summary, Error> {
        let vocab = Vocabulary::load(&paths.charlist)?;
        info!("loaded {} characters", vocab.len());

        let font_data =
            fs::read(&paths.font).map_err(|source| Error::io(&paths.font, source))?;
        let face = Face::parse(&font_data, 0)?;

        let all_a = paths.all_a();
        recreate_dir(&all_a)?;
        for (index, ch) in vocab.iter() {
            let glyph = raster::render_glyph(&face, ch, self.font_size, self.canvas_size);
            let centered = RENDERED.apply(&glyph, self.canvas_size);
            let out = all_a.join(vocab::glyph_filename(index, ch));
            centered
                .save(&out)
                .map_err(|source| Error::image(&out, source))?;
        }
        info!("rendered {} glyphs from {}", vocab.len(), paths.font.display());

        self.assemble(paths, &vocab)
    }

    /// Post-render tail of the pipeline: harvest side B, normalize it,
    /// split both sides, then remove the intermediate directories.
    /// Expects the rendered "A" set to already sit in `allA`.
    fn assemble(&self, paths: &DatasetPaths, vocab: &Vocabulary) -> Result<Summary, Error> {
        let all_a = paths.all_a();
        let all_b = paths.all_b();
        recreate_dir(&all_b)?;
        let harvested = harvest::harvest_handwriting(&paths.handwriting, vocab, &all_b)?;
        info!("harvested {harvested} handwriting samples");

        let resized = paths.all_b_resized();
        recreate_dir(&resized)?;
        let entries = fs::read_dir(&all_b).map_err(|source| Error::io(&all_b, source))?;
        for entry in entries {
            let entry = entry.map_err(|source| Error::io(&all_b, source))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let img = image::open(&path)
                .map_err(|source| Error::image(&path, source))?
                .to_luma8();
            let centered = HANDWRITTEN.apply(&img, self.canvas_size);
            let out = resized.join(entry.file_name());
            centered
                .save(&out)
                .map_err(|source| Error::image(&out, source))?;
        }

        let mut rng = match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        let (train_a, test_a) = split::split_dataset(
            &all_a,
            &paths.train_a(),
            &paths.test_a(),
            self.train_fraction,
            &mut rng,
        )?;
        let (train_b, test_b) = split::split_dataset(
            &resized,
            &paths.train_b(),
            &paths.test_b(),
            self.train_fraction,
            &mut rng,
        )?;

        for dir in [&all_a, &all_b, &resized] {
            fs::remove_dir_all(dir).map_err(|source| Error::io(dir, source))?;
        }

        Ok(Summary {
            vocab_len: vocab.len(),
            harvested,
            train_a,
            test_a,
            train_b,
            test_b,
        })
    }
}

pub(crate) fn recreate_dir(path: &Path) -> Result<(), Error> {
    if path.exists() {
        fs::remove_dir_all(path).map_err(|source| Error::io(path, source))?;
    }
    fs::create_dir_all(path).map_err(|source| Error::io(path, source))
}
