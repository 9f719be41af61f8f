//! docalign CLI - inspect and query AI-extracted document layouts

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;

use docalign::{annotate, parse_file, AlignmentEngine, Document, ScreenRect, ViewportContext};

#[derive(Parser)]
#[command(name = "docalign")]
#[command(version)]
#[command(about = "Inspect and query AI-extracted document layouts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show document summary
    Info {
        /// Extraction-service layout JSON
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Print computed paragraph regions as JSON
    Regions {
        /// Extraction-service layout JSON
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Restrict to one page
        #[arg(short, long)]
        page: Option<u32>,
    },

    /// Locate excerpt text and print its highlight bounds as JSON
    Locate {
        /// Extraction-service layout JSON
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Text to locate
        #[arg(value_name = "TEXT")]
        text: String,

        /// Leave gaps between highlight lines unstitched
        #[arg(long)]
        no_force_overlap: bool,
    },

    /// Resolve a screen selection to its excerpt and bounds
    Select {
        /// Extraction-service layout JSON
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Page the selection was drawn on (1-indexed)
        #[arg(short, long)]
        page: u32,

        /// Selection rectangle as X,Y,W,H in pixels (repeatable)
        #[arg(short, long = "rect", value_name = "X,Y,W,H", required = true)]
        rects: Vec<String>,

        /// Horizontal viewport offset in pixels
        #[arg(long, default_value_t = 0.0)]
        dx: f64,

        /// Vertical viewport offset in pixels
        #[arg(long, default_value_t = 0.0)]
        dy: f64,

        /// Pixels per page-space unit
        #[arg(long, default_value_t = docalign::PIXELS_PER_UNIT)]
        scale: f64,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Info { input } => cmd_info(&input),
        Commands::Regions { input, page } => cmd_regions(&input, page),
        Commands::Locate {
            input,
            text,
            no_force_overlap,
        } => cmd_locate(&input, &text, !no_force_overlap),
        Commands::Select {
            input,
            page,
            rects,
            dx,
            dy,
            scale,
        } => cmd_select(&input, page, &rects, dx, dy, scale),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn load(input: &PathBuf) -> Result<Document, Box<dyn std::error::Error>> {
    Ok(annotate(parse_file(input)?))
}

fn cmd_info(input: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load(input)?;

    println!("{}", "Document".bold());
    if let Some(model_id) = &doc.metadata.model_id {
        println!("  {} {}", "model:".dimmed(), model_id);
    }
    if let Some(created) = &doc.metadata.created {
        println!("  {} {}", "created:".dimmed(), created);
    }
    println!("  {} {}", "pages:".dimmed(), doc.page_count());
    println!("  {} {}", "paragraphs:".dimmed(), doc.paragraphs.len());

    for page in &doc.pages {
        println!(
            "  {} {:>3}  {} words, {} lines, {} regions ({}x{})",
            "page".cyan(),
            page.page_number,
            page.words.len(),
            page.lines.len(),
            page.regions.len(),
            page.width,
            page.height,
        );
    }
    Ok(())
}

fn cmd_regions(input: &PathBuf, page: Option<u32>) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load(input)?;
    let pages: Vec<_> = doc
        .pages
        .iter()
        .filter(|p| page.map_or(true, |n| p.page_number == n))
        .map(|p| {
            serde_json::json!({
                "pageNumber": p.page_number,
                "regions": p.regions,
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&pages)?);
    Ok(())
}

fn cmd_locate(
    input: &PathBuf,
    text: &str,
    force_overlap: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load(input)?;
    let engine = AlignmentEngine::new();
    let bounds = engine.locate_text(&doc, text, force_overlap);

    if bounds.is_empty() {
        eprintln!("{}", "Text not found".yellow());
    }
    println!("{}", serde_json::to_string_pretty(&bounds)?);
    Ok(())
}

fn cmd_select(
    input: &PathBuf,
    page: u32,
    rects: &[String],
    dx: f64,
    dy: f64,
    scale: f64,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load(input)?;
    let rects = rects
        .iter()
        .map(|s| parse_rect(s))
        .collect::<Result<Vec<_>, _>>()?;

    let engine = AlignmentEngine::new()
        .with_viewport(ViewportContext::new(dx, dy).with_scale(scale));
    let selection = engine.resolve_selection(&doc, page, &rects)?;

    if selection.excerpt.is_empty() {
        eprintln!("{}", "Selection covers no recognized text".yellow());
    } else {
        println!("{} {}", "excerpt:".green().bold(), selection.excerpt);
    }
    println!("{}", serde_json::to_string_pretty(&selection.bounds)?);
    Ok(())
}

/// Parse a selection rectangle from its `X,Y,W,H` form.
fn parse_rect(s: &str) -> Result<ScreenRect, String> {
    let parts: Vec<f64> = s
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|e| format!("invalid rectangle {s:?}: {e}"))?;
    if parts.len() != 4 {
        return Err(format!(
            "invalid rectangle {s:?}: expected X,Y,W,H (got {} values)",
            parts.len()
        ));
    }
    Ok(ScreenRect {
        x: parts[0],
        y: parts[1],
        width: parts[2],
        height: parts[3],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_rect() {
        let rect = parse_rect("10,20,30.5,40").unwrap();
        assert_eq!(rect.x, 10.0);
        assert_eq!(rect.y, 20.0);
        assert_eq!(rect.width, 30.5);
        assert_eq!(rect.height, 40.0);

        assert!(parse_rect("10,20,30").is_err());
        assert!(parse_rect("a,b,c,d").is_err());
    }

    #[test]
    fn test_load_annotates_document() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "content": "Hi",
                "pages": [{{
                    "pageNumber": 1, "width": 8.5, "height": 11.0,
                    "words": [{{
                        "content": "Hi",
                        "polygon": [1.0, 1.0, 1.3, 1.0, 1.3, 1.2, 1.0, 1.2],
                        "span": {{"offset": 0, "length": 2}}
                    }}],
                    "lines": [{{
                        "content": "Hi",
                        "polygon": [1.0, 1.0, 1.3, 1.0, 1.3, 1.2, 1.0, 1.2],
                        "spans": [{{"offset": 0, "length": 2}}]
                    }}]
                }}],
                "paragraphs": [{{
                    "content": "Hi",
                    "spans": [{{"offset": 0, "length": 2}}],
                    "boundingRegions": [{{
                        "pageNumber": 1,
                        "polygon": [1.0, 1.0, 1.3, 1.0, 1.3, 1.2, 1.0, 1.2]
                    }}]
                }}]
            }}"#
        )
        .unwrap();

        let doc = load(&file.path().to_path_buf()).unwrap();
        assert!(doc.is_annotated());
        assert_eq!(doc.page(1).unwrap().regions.len(), 1);
    }
}
