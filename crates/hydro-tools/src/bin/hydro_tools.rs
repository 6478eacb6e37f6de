//! Command-line front end for converting `.apf` model assets.
//!
//! Run: `cargo run -p hydro-tools --bin hydro_tools -- model <input> --variant static`

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use hydro_tools::{ModelVariant, convert_model, inspect_model};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hydro_tools")]
#[command(about = "Extract models from .apf game archives")]
#[command(version)]
struct Cli {
    /// Log decoding progress
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a model asset to OBJ
    Model {
        /// Model asset extracted from an archive
        input: PathBuf,

        /// Output .obj file (default: input path with .obj appended)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Model layout
        #[arg(long, value_enum)]
        variant: Variant,
    },

    /// Print a model's header and block layout without converting it
    Inspect {
        /// Model asset extracted from an archive
        input: PathBuf,

        /// Model layout
        #[arg(long, value_enum)]
        variant: Variant,
    },

    /// Choose an operation from a menu
    Interactive,
}

#[derive(Clone, Copy, ValueEnum)]
enum Variant {
    /// Boats and other things that move and collide
    Animated,
    /// Maps and other things that don't move
    Static,
}

impl From<Variant> for ModelVariant {
    fn from(variant: Variant) -> Self {
        match variant {
            Variant::Animated => ModelVariant::Animated,
            Variant::Static => ModelVariant::Static,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Model {
            input,
            output,
            variant,
        } => {
            convert(&input, output.as_deref(), variant.into())?;
        }
        Commands::Inspect { input, variant } => {
            inspect_model(&input, variant.into())
                .with_context(|| format!("Failed to inspect {}", input.display()))?;
        }
        Commands::Interactive => {
            let stdin = io::stdin();
            interactive(&mut stdin.lock())?;
        }
    }

    Ok(())
}

fn convert(input: &Path, output: Option<&Path>, variant: ModelVariant) -> Result<()> {
    let summary = convert_model(input, output, variant)
        .with_context(|| format!("Failed to extract {variant} model {}", input.display()))?;
    tracing::info!(
        "Exported {} vertices and {} triangles",
        summary.vertex_count,
        summary.triangle_count
    );
    Ok(())
}

const MENU: &str = "\
What would you like to do?

1: Extract .apf archive
2: Extract model (to OBJ)
3: Extract texture (to PNG)
";

const VARIANT_MENU: &str = "
Dynamic or static? (Dynamic = boats, things that move & collide. Static = maps, things that don't collide or don't move.)
1: Dynamic
2: Static
";

fn interactive(input: &mut impl BufRead) -> Result<()> {
    println!("Hydro Tools v{}\n", env!("CARGO_PKG_VERSION"));

    let Some(choice) = prompt_number(input, MENU)? else {
        return Ok(());
    };
    match choice {
        1 | 3 => println!("Not supported yet, sorry!"),
        2 => extract_model(input)?,
        _ => println!("{choice} is not an option."),
    }
    Ok(())
}

fn extract_model(input: &mut impl BufRead) -> Result<()> {
    let variant = match prompt_number(input, VARIANT_MENU)? {
        Some(1) => ModelVariant::Animated,
        Some(2) => ModelVariant::Static,
        _ => return Ok(()),
    };

    let Some(path) = prompt_line(input, "\nWhat is the model path?\n")? else {
        return Ok(());
    };
    let Some(export) = prompt_line(input, "\nWhere would you like to export to? (empty for default)\n")?
    else {
        return Ok(());
    };

    let export = (!export.is_empty()).then(|| PathBuf::from(export));
    convert(Path::new(&path), export.as_deref(), variant)
}

/// Ask until the answer is a number. `None` when input ends.
fn prompt_number(input: &mut impl BufRead, message: &str) -> Result<Option<u32>> {
    loop {
        let Some(answer) = prompt_line(input, message)? else {
            return Ok(None);
        };
        match answer.parse() {
            Ok(number) if answer.bytes().all(|b| b.is_ascii_digit()) => return Ok(Some(number)),
            _ => println!("{answer} is not an option."),
        }
    }
}

/// Print `message` and read one trimmed line. `None` when input ends.
fn prompt_line(input: &mut impl BufRead, message: &str) -> Result<Option<String>> {
    print!("{message}");
    io::stdout().flush().context("Failed to write prompt")?;

    let mut line = String::new();
    if input.read_line(&mut line).context("Failed to read input")? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_owned()))
}
