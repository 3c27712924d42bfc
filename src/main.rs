use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use glyphpair::{DatasetBuilder, DatasetPaths};

/// Build a paired font/handwriting glyph dataset.
#[derive(Parser, Debug)]
#[command(name = "glyphpair", version, about)]
struct Cli {
    /// Font used to render the "A" side
    #[arg(long, default_value = "song.ttf")]
    font: PathBuf,

    /// Font size in pixels
    #[arg(long, default_value_t = glyphpair::FONT_SIZE)]
    font_size: f32,

    /// Newline-delimited character list; first 1000 unique characters
    /// become the vocabulary
    #[arg(long, default_value = "Chinese-common.txt")]
    charlist: PathBuf,

    /// Root directory of scanned handwriting samples, one subdirectory
    /// per character
    #[arg(long, default_value = "./handwrittings")]
    handwriting: PathBuf,

    /// Output directory; train/test partitions are created beneath it
    #[arg(long, default_value = "dataset")]
    out: PathBuf,

    /// Side length of the square output canvases
    #[arg(long, default_value_t = glyphpair::CANVAS_SIZE)]
    canvas_size: u32,

    /// Fraction of each side copied to the train partition
    #[arg(long, default_value_t = glyphpair::TRAIN_SPLIT)]
    train_split: f32,

    /// Shuffle seed for reproducible splits
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut builder = DatasetBuilder::new()
        .with_canvas_size(cli.canvas_size)
        .with_font_size(cli.font_size)
        .with_train_fraction(cli.train_split);
    if let Some(seed) = cli.seed {
        builder = builder.with_seed(seed);
    }

    let paths = DatasetPaths {
        font: cli.font,
        charlist: cli.charlist,
        handwriting: cli.handwriting,
        out: cli.out,
    };
    let summary = builder.run(&paths).context("dataset build failed")?;

    println!("Loaded {} characters", summary.vocab_len);
    println!("Dataset ready.");
    println!("TrainA: {}", summary.train_a);
    println!("TrainB: {}", summary.train_b);
    Ok(())
}
