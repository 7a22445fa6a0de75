use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use zsanitize::{Disposition, ParseOptions, Whitelist};

#[derive(Debug, Parser)]
#[command(
    name = "zsanitize",
    version,
    about = "Sanitize HTML against a whitelist of tags and attributes"
)]
struct Args {
    /// Input HTML file (defaults to stdin)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,
    /// Whitelist JSON file
    #[arg(short, long, value_name = "WHITELIST")]
    whitelist: PathBuf,
    /// What to do with elements that are not whitelisted
    #[arg(short, long, value_enum, default_value_t = ModeArg::Remove)]
    mode: ModeArg,
    /// Treat the input as body content instead of a full document
    #[arg(long)]
    fragment: bool,
    /// Fail on any markup error instead of repairing it
    #[arg(long)]
    strict: bool,
    /// Trim whitespace from text nodes regardless of the whitelist setting
    #[arg(long)]
    strip_whitespace: bool,
    /// Drop comments regardless of the whitelist setting
    #[arg(long)]
    strip_comments: bool,
    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,
    /// Print the effective whitelist as JSON and exit
    #[arg(long)]
    print_whitelist: bool,
}

#[derive(Clone, Debug, ValueEnum)]
enum ModeArg {
    Remove,
    Unwrap,
}

impl From<ModeArg> for Disposition {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Remove => Disposition::Remove,
            ModeArg::Unwrap => Disposition::Unwrap,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let args = Args::parse();
    let whitelist = load_whitelist(&args)?;

    if args.print_whitelist {
        let mut json = whitelist.to_json_pretty()?;
        json.push('\n');
        return write_output(&args.output, json.as_bytes());
    }

    let input_data = read_input(&args.input)?;
    let disposition = Disposition::from(args.mode.clone());
    let options = if args.strict {
        ParseOptions::strict()
    } else {
        ParseOptions::default()
    };
    debug!(%disposition, fragment = args.fragment, strict = args.strict, "sanitizing");

    let output = if args.fragment {
        let input = String::from_utf8_lossy(&input_data);
        zsanitize::sanitize_fragment_str_with_options(&input, &whitelist, disposition, options)
    } else {
        zsanitize::sanitize_reader(input_data.as_slice(), &whitelist, disposition, options)
    }
    .context("failed to sanitize input")?;

    info!(bytes_in = input_data.len(), bytes_out = output.len(), "sanitized");
    write_output(&args.output, output.as_bytes())
}

fn load_whitelist(args: &Args) -> Result<Whitelist> {
    let mut whitelist = Whitelist::from_path(&args.whitelist)
        .with_context(|| format!("failed to load whitelist {}", args.whitelist.display()))?;
    if args.strip_whitespace {
        whitelist.set_strip_whitespace(true);
    }
    if args.strip_comments {
        whitelist.set_strip_comments(true);
    }
    Ok(whitelist)
}

fn read_input(path: &Option<PathBuf>) -> Result<Vec<u8>> {
    match path {
        Some(path) => std::fs::read(path)
            .with_context(|| format!("failed to read input file {}", path.display())),
        None => {
            let mut buffer = Vec::new();
            io::stdin()
                .read_to_end(&mut buffer)
                .context("failed to read stdin")?;
            if buffer.iter().all(u8::is_ascii_whitespace) {
                bail!("no input provided on stdin");
            }
            Ok(buffer)
        }
    }
}

fn write_output(path: &Option<PathBuf>, data: &[u8]) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, data)
            .with_context(|| format!("failed to write output file {}", path.display())),
        None => {
            let mut stdout = io::stdout();
            stdout.write_all(data).context("failed to write stdout")?;
            Ok(())
        }
    }
}
