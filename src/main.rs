//! Batch CLI: walk a Confluence export directory, convert every page to
//! Markdown in parallel, copy the referenced images, and optionally
//! emit a JSON report.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use jwalk::WalkDir;
use rayon::prelude::*;
use serde::Serialize;

use confluence2md::{AssetCatalog, ConvertOptions, PageConverter};

#[derive(Parser)]
#[command(
    name = "confluence2md",
    version,
    about = "Convert a Confluence HTML export directory to Markdown"
)]
struct Cli {
    /// Export directory containing the HTML pages
    input: PathBuf,

    /// Output directory for Markdown and copied images
    /// (defaults to <input>-md next to the input)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Conversion options as a JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write a JSON batch report to this path
    #[arg(long)]
    report: Option<PathBuf>,

    /// Keep references to images missing from the export instead of
    /// dropping them
    #[arg(long)]
    keep_missing_images: bool,

    /// Skip the `{#slug}` anchor suffix on headings
    #[arg(long)]
    no_anchors: bool,
}

#[derive(Debug, Serialize)]
struct PageReport {
    page: PathBuf,
    output: Option<PathBuf>,
    images: usize,
    warnings: Vec<String>,
    error: Option<String>,
}

fn main() -> Result<()> {
    let _ = env_logger::try_init();
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let mut options = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str::<ConvertOptions>(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => ConvertOptions::default(),
    };
    if cli.keep_missing_images {
        options.drop_missing_images = false;
    }
    if cli.no_anchors {
        options.emit_heading_anchors = false;
    }

    let output_root = cli.output.clone().unwrap_or_else(|| {
        let name = cli
            .input
            .file_name()
            .map(|n| format!("{}-md", n.to_string_lossy()))
            .unwrap_or_else(|| "export-md".to_string());
        cli.input.with_file_name(name)
    });
    std::fs::create_dir_all(&output_root)
        .with_context(|| format!("creating output directory {}", output_root.display()))?;

    let pages = discover_pages(&cli.input);
    if pages.is_empty() {
        anyhow::bail!("no .html pages found under {}", cli.input.display());
    }
    log::info!("converting {} pages from {}", pages.len(), cli.input.display());

    let catalog = AssetCatalog::scan(&cli.input);
    let converter = PageConverter::with_assets(options, catalog);

    let reports: Vec<PageReport> = pages
        .par_iter()
        .map(|page| convert_page(&converter, page, &cli.input, &output_root))
        .collect();

    let failed = reports.iter().filter(|r| r.error.is_some()).count();
    let warned: usize = reports.iter().map(|r| r.warnings.len()).sum();
    for report in reports.iter().filter(|r| r.error.is_some()) {
        log::error!(
            "{}: {}",
            report.page.display(),
            report.error.as_deref().unwrap_or("unknown")
        );
    }

    if let Some(path) = &cli.report {
        let json = serde_json::to_string_pretty(&reports)?;
        std::fs::write(path, json)
            .with_context(|| format!("writing report {}", path.display()))?;
    }

    println!(
        "converted {} pages ({} failed, {} warnings) into {}",
        reports.len() - failed,
        failed,
        warned,
        output_root.display()
    );
    if failed > 0 {
        anyhow::bail!("{failed} pages failed to convert");
    }
    Ok(())
}

fn discover_pages(root: &Path) -> Vec<PathBuf> {
    let mut pages: Vec<PathBuf> = WalkDir::new(root)
        .skip_hidden(true)
        .into_iter()
        .flatten()
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path())
        .filter(|p| {
            matches!(
                p.extension().and_then(|e| e.to_str()),
                Some("html" | "htm")
            )
        })
        .collect();
    pages.sort();
    pages
}

fn convert_page(
    converter: &PageConverter,
    page: &Path,
    input_root: &Path,
    output_root: &Path,
) -> PageReport {
    let rel = pathdiff::diff_paths(page, input_root)
        .unwrap_or_else(|| PathBuf::from(page.file_name().unwrap_or_default()));

    // One bad page must not take the batch down with it.
    let outcome = catch_unwind(AssertUnwindSafe(|| converter.convert_file(page)));

    let output = match outcome {
        Ok(Ok(output)) => output,
        Ok(Err(err)) => {
            return PageReport {
                page: page.to_path_buf(),
                output: None,
                images: 0,
                warnings: Vec::new(),
                error: Some(err.to_string()),
            };
        }
        Err(_) => {
            return PageReport {
                page: page.to_path_buf(),
                output: None,
                images: 0,
                warnings: Vec::new(),
                error: Some("conversion panicked".to_string()),
            };
        }
    };

    for warning in &output.warnings {
        log::warn!("{}: {warning}", rel.display());
    }

    let out_path = markdown_path(output_root, &rel);
    if let Err(err) = write_page(&out_path, &output.markdown) {
        return PageReport {
            page: page.to_path_buf(),
            output: None,
            images: 0,
            warnings: output.warnings,
            error: Some(format!("{err:#}")),
        };
    }

    let mut copied = 0usize;
    for pair in &output.images {
        let dest = output_root.join(&pair.relative);
        match copy_image(&pair.source, &dest) {
            Ok(()) => copied += 1,
            Err(err) => log::warn!("copying {}: {err:#}", pair.source.display()),
        }
    }

    PageReport {
        page: page.to_path_buf(),
        output: Some(out_path),
        images: copied,
        warnings: output.warnings,
        error: None,
    }
}

fn markdown_path(output_root: &Path, rel: &Path) -> PathBuf {
    let stem = rel
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "page".to_string());
    let name = format!("{}.md", sanitize_filename::sanitize(&stem));
    match rel.parent() {
        Some(parent) if parent != Path::new("") => output_root.join(parent).join(name),
        _ => output_root.join(name),
    }
}

fn write_page(path: &Path, markdown: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    std::fs::write(path, markdown).with_context(|| format!("writing {}", path.display()))
}

fn copy_image(source: &Path, dest: &Path) -> Result<()> {
    if dest.exists() {
        return Ok(());
    }
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    std::fs::copy(source, dest)
        .with_context(|| format!("copying to {}", dest.display()))?;
    Ok(())
}
