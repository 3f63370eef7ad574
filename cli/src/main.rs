//! paperdeck CLI - slide decks from Markdown, figures from PDFs

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use paperdeck::figures::{run_batch, PdfiumLibrary};
use paperdeck::{
    detect_input_kind, markdown_to_layouts, to_json, write_pptx, Dpi, ExtractOptions,
    FigureExtractor, HeightPolicy, InputKind, JsonFormat, LayoutOptions, PageSelection,
};

/// Default output folder for single-document figure extraction
const DEFAULT_FIGURES_DIR: &str = "extracted_figures";

/// Default output base folder for batch extraction
const DEFAULT_BATCH_DIR: &str = "batch_extracted_figures";

#[derive(Parser)]
#[command(name = "paperdeck")]
#[command(version)]
#[command(about = "Build slide decks from Markdown and extract figures from PDFs", long_about = None)]
struct Cli {
    /// Input file (Markdown or PDF)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output file or directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a Markdown outline to a .pptx deck
    #[command(alias = "pptx")]
    Slides {
        /// Input Markdown file
        #[arg(value_name = "MD")]
        input: PathBuf,

        /// Output .pptx file (defaults to the input name)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Module content height policy
        #[arg(long, value_enum, default_value = "fixed")]
        height: HeightMode,
    },

    /// Print the computed slide layout as JSON
    Layout {
        /// Input Markdown file
        #[arg(value_name = "MD")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Module content height policy
        #[arg(long, value_enum, default_value = "fixed")]
        height: HeightMode,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Extract figure regions from a PDF as JPEG files
    #[command(alias = "extract")]
    Figures {
        /// Input PDF file
        #[arg(value_name = "PDF")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR", env = "PAPERDECK_OUTPUT")]
        output: Option<PathBuf>,

        /// Rendering resolution (150, 300 or 600)
        #[arg(long, env = "PAPERDECK_DPI", default_value = "300", value_parser = parse_dpi)]
        dpi: Dpi,

        /// Keep side-by-side figures as separate crops
        #[arg(long)]
        no_merge_row: bool,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,

        /// Also write manifest.json into the output directory
        #[arg(long)]
        manifest: bool,

        /// Encode crops on one thread
        #[arg(long)]
        sequential: bool,
    },

    /// Extract figures from every PDF in a folder
    Batch {
        /// Folder containing PDF files
        #[arg(value_name = "DIR")]
        folder: PathBuf,

        /// Output base directory; each PDF gets a `<name>_figures` folder
        #[arg(short, long, value_name = "DIR", env = "PAPERDECK_OUTPUT")]
        output: Option<PathBuf>,

        /// Rendering resolution (150, 300 or 600)
        #[arg(long, env = "PAPERDECK_DPI", default_value = "300", value_parser = parse_dpi)]
        dpi: Dpi,

        /// Keep side-by-side figures as separate crops
        #[arg(long)]
        no_merge_row: bool,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum HeightMode {
    /// Fixed module heights per column
    Fixed,
    /// Grow module heights with their text
    Estimated,
}

impl From<HeightMode> for HeightPolicy {
    fn from(mode: HeightMode) -> Self {
        match mode {
            HeightMode::Fixed => HeightPolicy::Fixed,
            HeightMode::Estimated => HeightPolicy::Estimated,
        }
    }
}

fn parse_dpi(s: &str) -> Result<Dpi, String> {
    s.parse::<Dpi>().map_err(|e| e.to_string())
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Slides {
            input,
            output,
            height,
        }) => cmd_slides(&input, output.as_deref(), height),
        Some(Commands::Layout {
            input,
            output,
            height,
            compact,
        }) => cmd_layout(&input, output.as_deref(), height, compact),
        Some(Commands::Figures {
            input,
            output,
            dpi,
            no_merge_row,
            pages,
            manifest,
            sequential,
        }) => {
            let options = ExtractOptions::new()
                .with_dpi(dpi)
                .with_merge_same_row(!no_merge_row)
                .with_parallel(!sequential);
            cmd_figures(&input, output.as_deref(), options, pages.as_deref(), manifest)
        }
        Some(Commands::Batch {
            folder,
            output,
            dpi,
            no_merge_row,
        }) => {
            let options = ExtractOptions::new()
                .with_dpi(dpi)
                .with_merge_same_row(!no_merge_row);
            cmd_batch(&folder, output.as_deref(), options)
        }
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: dispatch on the input kind
            if let Some(input) = cli.input {
                cmd_default(&input, cli.output.as_deref())
            } else {
                println!("{}", "Usage: paperdeck <FILE> [OUTPUT]".yellow());
                println!("       paperdeck --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_default(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let kind = detect_input_kind(input)?;
    log::debug!("{} detected as {:?}", input.display(), kind);
    match kind {
        InputKind::Markdown => cmd_slides(input, output, HeightMode::Fixed),
        InputKind::Pdf => cmd_figures(input, output, ExtractOptions::default(), None, false),
    }
}

fn cmd_slides(
    input: &Path,
    output: Option<&Path>,
    height: HeightMode,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| input.with_extension("pptx"));
    let options = LayoutOptions::default().with_height_policy(height.into());

    let pb = ProgressBar::new(2);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Laying out slides...");
    let layouts = markdown_to_layouts(input, &options)?;
    pb.inc(1);

    pb.set_message("Writing deck...");
    write_pptx(&layouts, &options, &output)?;
    pb.inc(1);
    pb.finish_with_message("Done!");

    for layout in layouts
        .iter()
        .filter(|l| l.overflows(options.canvas_height))
    {
        println!(
            "{} slide \"{}\" extends past the bottom edge",
            "Warning:".yellow().bold(),
            layout.title
        );
    }

    println!(
        "\n{} {} slides to {}",
        "Saved".green().bold(),
        layouts.len(),
        output.display()
    );
    Ok(())
}

fn cmd_layout(
    input: &Path,
    output: Option<&Path>,
    height: HeightMode,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = LayoutOptions::default().with_height_policy(height.into());
    let layouts = markdown_to_layouts(input, &options)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = to_json(&layouts, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_figures(
    input: &Path,
    output: Option<&Path>,
    options: ExtractOptions,
    pages: Option<&str>,
    manifest: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let page_selection = match pages {
        Some(p) => PageSelection::parse(p)?,
        None => PageSelection::All,
    };
    let options = options.with_pages(page_selection);
    let output_dir = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_FIGURES_DIR));

    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Extracting figures at {} dpi...", options.dpi));
    pb.enable_steady_tick(std::time::Duration::from_millis(120));

    let library = PdfiumLibrary::bind()?;
    let document = library.open(input)?;
    let report = FigureExtractor::new(options).extract_document(&document, &output_dir)?;
    pb.finish_and_clear();

    for figure in &report.figures {
        let name = figure
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        println!(
            "{} {} {}",
            "Saved".green(),
            name,
            format!(
                "({}x{} px, {:.1}x{:.1} cm)",
                figure.pixels.width, figure.pixels.height, figure.size_cm.0, figure.size_cm.1
            )
            .dimmed()
        );
    }

    if manifest {
        let path = output_dir.join("manifest.json");
        fs::write(&path, to_json(&report, JsonFormat::Pretty)?)?;
        println!("{} {}", "Manifest".green(), path.display());
    }

    if report.pages_failed > 0 {
        println!(
            "{} {} pages could not be processed",
            "Warning:".yellow().bold(),
            report.pages_failed
        );
    }
    println!(
        "\n{} {} figures saved to {}",
        "Done!".green().bold(),
        report.figure_count(),
        output_dir.display()
    );
    Ok(())
}

fn cmd_batch(
    folder: &Path,
    output: Option<&Path>,
    options: ExtractOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let out_base = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_BATCH_DIR));
    let total = paperdeck::figures::find_pdfs(folder)?.len();

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let library = PdfiumLibrary::bind()?;
    let extractor = FigureExtractor::new(options);
    let report = run_batch(folder, &out_base, |pdf, out_dir| {
        pb.set_message(
            pdf.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        );
        let result = library
            .open(pdf)
            .and_then(|document| extractor.extract_document(&document, out_dir));
        pb.inc(1);
        result
    })?;
    pb.finish_and_clear();

    if report.documents.is_empty() {
        println!("{} no PDF files in {}", "Warning:".yellow().bold(), folder.display());
        return Ok(());
    }

    for entry in &report.documents {
        match &entry.error {
            None => println!(
                "  {} {} ({} figures)",
                "├─".dimmed(),
                entry.source.display(),
                entry.figures
            ),
            Some(error) => println!(
                "  {} {} {}",
                "├─".dimmed(),
                entry.source.display(),
                error.red()
            ),
        }
    }

    println!(
        "\n{} {} documents, {} failed, {} figures under {}",
        "Done!".green().bold(),
        report.succeeded(),
        report.failed(),
        report.total_figures(),
        out_base.display()
    );
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "paperdeck".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Slide decks from Markdown, figures from PDFs");
    println!();
    println!("License: MIT");
}
