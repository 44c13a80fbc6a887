//! unalto CLI - ALTO XML extraction tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use unalto::catalog::{self, Catalog};
use unalto::render::{self, OverlayOptions};
use unalto::{AltoParser, ElementKind, JsonFormat, ParseOptions, Region};

#[derive(Parser)]
#[command(name = "unalto")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Extract text, geometry and OCR metadata from ALTO XML", long_about = None)]
struct Cli {
    /// Input ALTO file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Fail when the Layout or Page element is missing
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert ALTO to all formats (text, JSON, SVG overlay)
    Convert {
        /// Input ALTO file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Extract the transcribed text
    Text {
        /// Input ALTO file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Export geometry, text and OCR metadata as JSON
    Json {
        /// Input ALTO file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show page and OCR information
    Info {
        /// Input ALTO file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Draw bounding boxes as an SVG overlay
    Overlay {
        /// Input ALTO file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Records to draw
        #[arg(long, value_enum, default_value = "blocks")]
        view: View,

        /// Image size as WIDTHxHEIGHT (page size if not specified)
        #[arg(long, value_parser = parse_size)]
        image_size: Option<(u32, u32)>,

        /// Image to draw beneath the boxes
        #[arg(long, value_name = "HREF")]
        image: Option<String>,

        /// Edge colour for lines and words
        #[arg(long)]
        color: Option<String>,

        /// Number the text blocks
        #[arg(short, long)]
        numbers: bool,
    },

    /// Assemble the text of many pages into one document
    Document {
        /// ALTO files in page order
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Parse pages one at a time
        #[arg(long)]
        sequential: bool,
    },

    /// Show catalog links for a document page
    Links {
        /// URN or catalog link
        #[arg(value_name = "URN")]
        urn: String,

        /// Page number
        #[arg(short, long, default_value = "1")]
        page: u32,

        /// Image scale in percent
        #[arg(long, default_value = "66")]
        scale: u32,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum View {
    /// Text blocks, numbered and coloured by region
    Blocks,
    /// Text lines
    Lines,
    /// Words
    Words,
}

impl From<View> for ElementKind {
    fn from(view: View) -> Self {
        match view {
            View::Blocks => ElementKind::Blocks,
            View::Lines => ElementKind::Lines,
            View::Words => ElementKind::Words,
        }
    }
}

fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {:?}", s))?;
    let w: u32 = w.trim().parse().map_err(|_| "Invalid width")?;
    let h: u32 = h.trim().parse().map_err(|_| "Invalid height")?;
    Ok((w, h))
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let options = if cli.strict {
        ParseOptions::new().strict()
    } else {
        ParseOptions::new()
    };

    let result = match cli.command {
        Some(Commands::Convert { input, output }) => cmd_convert(&input, output.as_deref(), options),
        Some(Commands::Text { input, output }) => cmd_text(&input, output.as_deref(), options),
        Some(Commands::Json {
            input,
            output,
            compact,
        }) => cmd_json(&input, output.as_deref(), compact, options),
        Some(Commands::Info { input }) => cmd_info(&input, options),
        Some(Commands::Overlay {
            input,
            output,
            view,
            image_size,
            image,
            color,
            numbers,
        }) => {
            let mut overlay = OverlayOptions::new()
                .with_kind(view.into())
                .with_numbers(numbers);
            if let Some(href) = image {
                overlay = overlay.with_image_href(href);
            }
            if let Some(color) = color {
                overlay = overlay.with_color(color);
            }
            cmd_overlay(&input, output.as_deref(), image_size, &overlay, options)
        }
        Some(Commands::Document {
            inputs,
            output,
            sequential,
        }) => {
            let options = if sequential {
                options.sequential()
            } else {
                options
            };
            cmd_document(&inputs, output.as_deref(), &options)
        }
        Some(Commands::Links { urn, page, scale }) => cmd_links(&urn, page, scale),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(&input, cli.output.as_deref(), options)
            } else {
                println!("{}", "Usage: unalto <FILE> [OUTPUT]".yellow());
                println!("       unalto --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn write_or_print(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    options: ParseOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_output", stem))
    });

    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(4);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    pb.set_message("Parsing ALTO...");
    let summary = AltoParser::open_with_options(input, options)?.summary()?;
    pb.inc(1);

    pb.set_message("Generating text...");
    fs::write(output_dir.join("extract.txt"), render::to_text(&summary.layout))?;
    pb.inc(1);

    pb.set_message("Generating JSON...");
    let json = render::to_json(&summary, JsonFormat::Pretty)?;
    fs::write(output_dir.join("content.json"), &json)?;
    pb.inc(1);

    // The overlay needs page dimensions; a page-less document has none.
    let svg_written = match summary.layout.dimensions() {
        Some(size) => {
            pb.set_message("Generating overlay...");
            let overlay = OverlayOptions::new().with_numbers(true);
            let svg = render::render_overlay_svg(&summary.layout, size, &overlay)?;
            fs::write(output_dir.join("blocks.svg"), &svg)?;
            true
        }
        None => false,
    };
    pb.inc(1);

    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    println!("  {} extract.txt", "├─".dimmed());
    if svg_written {
        println!("  {} content.json", "├─".dimmed());
        println!("  {} blocks.svg", "└─".dimmed());
    } else {
        println!("  {} content.json", "└─".dimmed());
    }

    Ok(())
}

fn cmd_text(
    input: &Path,
    output: Option<&Path>,
    options: ParseOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let layout = unalto::parse_file_with_options(input, options)?;
    let text = render::to_text(&layout);

    if text.is_empty() {
        eprintln!("{}", "No transcribed text available for this page.".yellow());
    }

    write_or_print(output, &text)
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    options: ParseOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let summary = AltoParser::open_with_options(input, options)?.summary()?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = render::to_json(&summary, format)?;
    write_or_print(output, &json)
}

fn cmd_info(input: &Path, options: ParseOptions) -> Result<(), Box<dyn std::error::Error>> {
    let format = unalto::detect_format_from_path(input)?;
    let summary = AltoParser::open_with_options(input, options)?.summary()?;
    let layout = &summary.layout;

    println!("{}", "Page Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Format".bold(), format);
    if !format.namespace.is_empty() {
        println!("{}: {}", "Namespace".bold(), format.namespace);
    }
    match layout.dimensions() {
        Some((w, h)) => println!("{}: {} x {}", "Page size".bold(), w, h),
        None => println!("{}: {}", "Page size".bold(), "unavailable".yellow()),
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Blocks".bold(), layout.blocks.len());
    for region in Region::ALL {
        let count = layout.blocks_in(region).count();
        if count > 0 {
            println!("  {} {}: {}", "·".dimmed(), region, count);
        }
    }
    println!("{}: {}", "Lines".bold(), layout.lines.len());
    println!("{}: {}", "Words".bold(), summary.word_count());
    println!("{}: {}", "Characters".bold(), layout.full_text.chars().count());

    println!();
    println!("{}", "OCR Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let ocr_info = summary.ocr_info();
    if ocr_info.is_empty() {
        println!("{}", "No OCR processing metadata".dimmed());
    }
    for line in &ocr_info {
        println!("{}", line);
    }
    if let Some(wc) = summary.average_confidence {
        println!("{}: {}", "Word Confidence".bold(), wc);
    }

    Ok(())
}

fn cmd_overlay(
    input: &Path,
    output: Option<&Path>,
    image_size: Option<(u32, u32)>,
    overlay: &OverlayOptions,
    options: ParseOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let layout = unalto::parse_file_with_options(input, options)?;

    let size = image_size
        .or_else(|| layout.dimensions())
        .ok_or("page dimensions unavailable; pass --image-size")?;

    let svg = render::render_overlay_svg(&layout, size, overlay)?;
    write_or_print(output, &svg)
}

fn cmd_document(
    inputs: &[PathBuf],
    output: Option<&Path>,
    options: &ParseOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message("Reading pages...");

    let mut pages = Vec::with_capacity(inputs.len());
    for input in inputs {
        match fs::read_to_string(input) {
            Ok(xml) => pages.push(Some(xml)),
            Err(e) => {
                log::warn!("Could not read {}: {}", input.display(), e);
                pages.push(None);
            }
        }
        pb.inc(1);
    }

    pb.set_message("Extracting text...");
    let text = render::document_text(&pages, options)?;
    pb.finish_and_clear();

    write_or_print(output, &text)
}

fn cmd_links(input: &str, page: u32, scale: u32) -> Result<(), Box<dyn std::error::Error>> {
    let urn = catalog::extract_urn(input).ok_or("no URN found in input")?;
    let nb = Catalog::default();

    println!("{}: {}", "URN".bold(), urn);
    println!("{}: {}", "Page".bold(), catalog::page_id(&urn, page));
    println!("{}: {}", "ALTO XML".bold(), nb.alto_url(&urn, page));
    println!("{}: {}", "Image".bold(), nb.image_url(&urn, page, scale));
    println!("{}: {}", "Manifest".bold(), nb.manifest_url(&urn));
    println!("{}: {}", "Item".bold(), nb.viewer_url(&urn));

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "unalto".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("ALTO XML extraction tool");
    println!();
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("1200x1800").unwrap(), (1200, 1800));
        assert_eq!(parse_size("10X20").unwrap(), (10, 20));
        assert!(parse_size("1200").is_err());
        assert!(parse_size("ax2").is_err());
    }

    #[test]
    fn test_view_conversion() {
        assert_eq!(ElementKind::from(View::Words), ElementKind::Words);
        assert_eq!(ElementKind::from(View::Blocks), ElementKind::Blocks);
    }

    #[test]
    fn test_cmd_text_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("page.xml");
        let output = dir.path().join("page.txt");
        fs::write(
            &input,
            r#"<alto><Layout><Page WIDTH="10" HEIGHT="10"><PrintSpace>
                 <TextBlock HPOS="0" VPOS="0" WIDTH="1" HEIGHT="1">
                   <TextLine HPOS="0" VPOS="0" WIDTH="1" HEIGHT="1">
                     <String HPOS="0" VPOS="0" WIDTH="1" HEIGHT="1" CONTENT="hei"/>
                   </TextLine>
                 </TextBlock>
               </PrintSpace></Page></Layout></alto>"#,
        )
        .unwrap();

        cmd_text(&input, Some(&output), ParseOptions::new()).unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), "hei");
    }
}
