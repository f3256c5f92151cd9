//! cvlayout CLI - resume structure reconstruction tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use cvlayout::{
    BlockKind, CleanupPreset, CvLayout, CvLayoutResult, JsonFormat, PageSelection, RenderOptions,
    Vocabulary,
};

#[derive(Parser)]
#[command(name = "cvlayout")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Rebuild resume structure from PDF text as Markdown, text, and JSON", long_about = None)]
struct Cli {
    /// Input PDF or fragment dump
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Options shared by every conversion command.
#[derive(Args, Clone)]
struct InputArgs {
    /// Input PDF or JSON fragment dump
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Page range (e.g., "1-2", "1,3")
    #[arg(long)]
    pages: Option<String>,

    /// JSON file with extra header keywords and skills
    #[arg(long, value_name = "FILE", env = "CVLAYOUT_VOCABULARY")]
    vocabulary: Option<PathBuf>,

    /// Skip pages whose text cannot be decoded
    #[arg(long)]
    lenient: bool,

    /// Text cleanup preset
    #[arg(long, value_enum)]
    cleanup: Option<CleanupLevel>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a resume to all formats (Markdown, text, JSON)
    Convert {
        #[command(flatten)]
        args: InputArgs,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Convert a resume to Markdown
    #[command(alias = "md")]
    Markdown {
        #[command(flatten)]
        args: InputArgs,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Render skills as a plain list instead of a grid
        #[arg(long)]
        no_grid: bool,

        /// Drop body blocks that repeat the contact header
        #[arg(long)]
        dedupe_contact: bool,
    },

    /// Convert a resume to plain text
    Text {
        #[command(flatten)]
        args: InputArgs,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Convert a resume to JSON
    Json {
        #[command(flatten)]
        args: InputArgs,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// List classified blocks
    Blocks {
        #[command(flatten)]
        args: InputArgs,
    },

    /// Show extracted contact details and skills
    Contact {
        #[command(flatten)]
        args: InputArgs,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum CleanupLevel {
    /// Minimal cleanup (entities and whitespace only)
    Minimal,
    /// Standard cleanup (default)
    Standard,
}

impl From<CleanupLevel> for CleanupPreset {
    fn from(level: CleanupLevel) -> Self {
        match level {
            CleanupLevel::Minimal => CleanupPreset::Minimal,
            CleanupLevel::Standard => CleanupPreset::Standard,
        }
    }
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert { args, output }) => cmd_convert(&args, output.as_deref()),
        Some(Commands::Markdown {
            args,
            output,
            no_grid,
            dedupe_contact,
        }) => cmd_markdown(&args, output.as_deref(), no_grid, dedupe_contact),
        Some(Commands::Text { args, output }) => cmd_text(&args, output.as_deref()),
        Some(Commands::Json {
            args,
            output,
            compact,
        }) => cmd_json(&args, output.as_deref(), compact),
        Some(Commands::Blocks { args }) => cmd_blocks(&args),
        Some(Commands::Contact { args }) => cmd_contact(&args),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                let args = InputArgs {
                    input,
                    pages: None,
                    vocabulary: None,
                    lenient: true,
                    cleanup: None,
                };
                cmd_convert(&args, cli.output.as_deref())
            } else {
                println!("{}", "Usage: cvlayout <FILE> [OUTPUT]".yellow());
                println!("       cvlayout --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Build the pipeline from shared flags.
fn builder(args: &InputArgs, render_options: RenderOptions) -> Result<CvLayout, Box<dyn std::error::Error>> {
    let mut render_options = render_options;
    if let Some(level) = args.cleanup {
        render_options = render_options.with_cleanup_preset(level.into());
    }

    let mut vocabulary = Vocabulary::default();
    if let Some(path) = &args.vocabulary {
        let json = fs::read_to_string(path)?;
        let extra = Vocabulary::from_json(&json)
            .map_err(|e| format!("Invalid vocabulary {}: {}", path.display(), e))?;
        log::info!(
            "Loaded {} header keywords and {} skills from {}",
            extra.header_keywords.len(),
            extra.skills.len(),
            path.display()
        );
        vocabulary.extend(extra);
    }

    let mut layout = CvLayout::new()
        .with_render_options(render_options)
        .with_vocabulary(vocabulary);

    if let Some(p) = &args.pages {
        let pages = PageSelection::parse(p).map_err(|e| format!("Invalid page range: {}", e))?;
        layout = layout.with_pages(pages);
    }
    if args.lenient {
        layout = layout.lenient();
    }
    Ok(layout)
}

fn run(args: &InputArgs, render_options: RenderOptions) -> Result<CvLayoutResult, Box<dyn std::error::Error>> {
    Ok(builder(args, render_options)?.parse(&args.input)?)
}

fn write_or_print(output: Option<&Path>, content: &str) -> CliResult {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_convert(args: &InputArgs, output: Option<&Path>) -> CliResult {
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = args.input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_output", stem))
    });

    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(4);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Structuring resume...");
    let result = run(args, RenderOptions::default())?;
    pb.inc(1);

    pb.set_message("Generating Markdown...");
    fs::write(output_dir.join("resume.md"), result.to_markdown()?)?;
    pb.inc(1);

    pb.set_message("Generating text...");
    fs::write(output_dir.join("resume.txt"), result.to_text()?)?;
    pb.inc(1);

    pb.set_message("Generating JSON...");
    fs::write(
        output_dir.join("structure.json"),
        result.to_json(JsonFormat::Pretty)?,
    )?;
    pb.inc(1);

    pb.finish_with_message("Done!");

    let stats = result.stats();
    println!("\n{}", "Output files:".green().bold());
    println!("  {} resume.md", "├─".dimmed());
    println!("  {} resume.txt", "├─".dimmed());
    println!("  {} structure.json", "└─".dimmed());
    println!(
        "\n{} pages, {} lines, {} blocks, {} skills",
        stats.page_count,
        stats.line_count,
        stats.block_count(),
        stats.skill_count
    );

    Ok(())
}

fn cmd_markdown(
    args: &InputArgs,
    output: Option<&Path>,
    no_grid: bool,
    dedupe_contact: bool,
) -> CliResult {
    let render_options = RenderOptions::new()
        .with_skills_grid(!no_grid)
        .with_contact_dedupe(dedupe_contact);
    let markdown = run(args, render_options)?.to_markdown()?;
    write_or_print(output, &markdown)
}

fn cmd_text(args: &InputArgs, output: Option<&Path>) -> CliResult {
    let text = run(args, RenderOptions::default())?.to_text()?;
    write_or_print(output, &text)
}

fn cmd_json(args: &InputArgs, output: Option<&Path>, compact: bool) -> CliResult {
    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = run(args, RenderOptions::default())?.to_json(format)?;
    write_or_print(output, &json)
}

fn cmd_blocks(args: &InputArgs) -> CliResult {
    let result = run(args, RenderOptions::default())?;

    println!("{}", "Classified Blocks".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for block in result.blocks() {
        let label = format!("{:<10}", block.kind.label());
        let label = match block.kind {
            BlockKind::Header => label.magenta().bold(),
            BlockKind::Subsection => label.blue(),
            BlockKind::Bullet => label.green(),
            BlockKind::Text => label.normal(),
        };
        println!(
            "{} {} {}",
            format!("p{:<3}", block.page).dimmed(),
            label,
            block.content
        );
    }

    let stats = result.stats();
    println!();
    println!(
        "{}: {}  {}: {}  {}: {}  {}: {}",
        "Headers".bold(),
        stats.header_count,
        "Subsections".bold(),
        stats.subsection_count,
        "Bullets".bold(),
        stats.bullet_count,
        "Text".bold(),
        stats.text_count
    );

    Ok(())
}

fn cmd_contact(args: &InputArgs) -> CliResult {
    let result = run(args, RenderOptions::default())?;
    let contact = result.contact();

    println!("{}", "Contact Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let missing = "-".dimmed().to_string();
    let fields = [
        ("Name", &contact.name),
        ("Email", &contact.email),
        ("Phone", &contact.phone),
        ("Location", &contact.location),
    ];
    for (label, value) in fields {
        println!(
            "{}: {}",
            label.bold(),
            value.as_deref().unwrap_or(missing.as_str())
        );
    }

    println!();
    println!("{}", "Skills".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let skills = &result.resume.skills;
    if skills.is_empty() {
        println!("{}", "No skills section found".dimmed());
    } else {
        println!("{}", skills.matches.join(", "));
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "cvlayout".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Resume structure reconstruction tool");
    println!();
    println!("License: MIT");
}
