use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use wxjsx_cli::{EmitMode, InputFormat, convert_cmd};
use wxjsx_jsx::{EmitOptions, Layout, QuoteStyle};

#[derive(Parser)]
#[command(name = "wxjsx", version, about = "Mini-program template to JSX converter")]
struct Cli {
    /// Log pass progress (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a directive template into JSX.
    Convert {
        /// Template file, or `-` for stdin
        input: PathBuf,
        /// Output directory (default: print to stdout)
        #[arg(long)]
        out_dir: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = InputFormat::Pug)]
        input_format: InputFormat,
        /// What to emit: JSX text or the output tree as JSON
        #[arg(long, value_enum, default_value_t = EmitMode::Jsx)]
        emit: EmitMode,
        /// Use double quotes for string literals
        #[arg(long)]
        double_quote: bool,
        /// Terminate statements with `;`
        #[arg(long)]
        semi: bool,
        /// One line per top-level fragment
        #[arg(long)]
        compact: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Commands::Convert {
            input,
            out_dir,
            input_format,
            emit,
            double_quote,
            semi,
            compact,
        } => {
            let opts = EmitOptions {
                quote: if double_quote {
                    QuoteStyle::Double
                } else {
                    QuoteStyle::Single
                },
                semi,
                layout: if compact { Layout::Compact } else { Layout::Pretty },
            };
            convert_cmd(&input.into(), out_dir.as_deref(), input_format, emit, &opts)?;
        }
    }
    Ok(())
}
