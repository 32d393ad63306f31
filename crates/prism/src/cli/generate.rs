//! The `prism generate` command: scan, extract, shuffle, write.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use futures_util::stream::{self, StreamExt};
use prism_core::{shuffle_items, Config, GalleryProcessor, GalleryScanner, ManifestWriter};

/// Arguments for the `generate` command.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Gallery directory (defaults to the configured one)
    #[arg(long)]
    pub gallery_dir: Option<PathBuf>,

    /// Number of parallel workers (defaults to the configured count)
    #[arg(short, long)]
    pub parallel: Option<usize>,
}

/// Execute the generate command.
///
/// Per-file extraction is fanned out with bounded concurrency and joined
/// into a complete item list before the shuffle and the single manifest
/// write; the write never observes a partial list.
pub async fn execute(args: GenerateArgs, mut config: Config) -> anyhow::Result<()> {
    if let Some(dir) = args.gallery_dir {
        config.gallery.dir = dir;
    }
    let workers = args
        .parallel
        .unwrap_or(config.processing.parallel_workers)
        .max(1);

    let gallery_dir = config.gallery_dir();
    let scanner = GalleryScanner::new(config.processing.clone());
    let files = scanner.scan(&gallery_dir, &config.gallery.manifest_name)?;
    tracing::info!("Found {} image(s) in {:?}", files.len(), gallery_dir);

    let progress = create_progress_bar(files.len() as u64);
    let start_time = std::time::Instant::now();

    let processor = Arc::new(GalleryProcessor::new(&config));
    let mut tasks = stream::iter(files.into_iter().map(|file| {
        let processor = Arc::clone(&processor);
        async move { processor.process(&file).await }
    }))
    .buffer_unordered(workers);

    // Join point: all per-file work completes before shuffle and write
    let mut items = Vec::new();
    while let Some(item) = tasks.next().await {
        items.push(item);
        progress.inc(1);
        let elapsed = start_time.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            progress.set_message(format!("{:.1} img/sec", items.len() as f64 / elapsed));
        }
    }
    progress.finish_and_clear();

    shuffle_items(&mut items, &mut rand::thread_rng());

    let writer = ManifestWriter::new(config.manifest_path());
    let count = writer.write(&items)?;

    let elapsed = start_time.elapsed();
    tracing::info!(
        "Wrote {} item(s) to {:?} in {:.2}s",
        count,
        writer.path(),
        elapsed.as_secs_f64()
    );
    Ok(())
}

/// Progress bar over per-file extraction; the message slot carries the
/// running throughput once the first file completes.
fn create_progress_bar(total: u64) -> indicatif::ProgressBar {
    use indicatif::{ProgressBar, ProgressStyle};

    let bar = ProgressBar::new(total);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} {pos}/{len} images [{bar:32.green/white}] {msg}")
            .unwrap()
            .progress_chars("=> "),
    );
    bar.set_message("reading metadata");
    bar
}
