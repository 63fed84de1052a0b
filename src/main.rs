use std::{
    fmt::Display,
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::Context;
use clap::Parser;
use codec::Codec;
use mode::{Mode, Operation};
use tap::Pipe;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod codec;
mod container;
mod mode;

const EXAMPLE: &str = "\
Example: idFileDeCompressor D:\\e1m1.entities D:\\e1m1.dec

If no option is provided, the tool will attempt to auto-detect the action to perform.
If no destination path is provided, the tool will use the source path with an added extension.";

#[derive(Debug, Parser)]
#[command(name = "idFileDeCompressor", version, about = "Compresses and decompresses .entities files", after_help = EXAMPLE)]
struct Cli {
    /// File to read
    #[arg(allow_hyphen_values = true)]
    pub input: PathBuf,
    /// File to write, defaults to <src>.entities or <src>.dec
    #[arg(allow_hyphen_values = true)]
    pub output: Option<PathBuf>,

    /// Decompress a compressed .entities file
    #[arg(short, long, overrides_with_all = ["compress", "decompress"])]
    pub decompress: bool,

    /// Compress an uncompressed .entities file
    #[arg(short, long, overrides_with_all = ["compress", "decompress"])]
    pub compress: bool,
}

impl Cli {
    fn mode(&self) -> Mode {
        match (self.compress, self.decompress) {
            (true, _) => Mode::Compress,
            (_, true) => Mode::Decompress,
            _ => Mode::Unset,
        }
    }
}

#[derive(Debug)]
struct Outcome {
    operation: Operation,
    input: PathBuf,
    output: PathBuf,
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Successfully {} {} into {}.",
            self.operation,
            self.input.display(),
            self.output.display()
        )
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    println!("idFileDeCompressor v{}\n", env!("CARGO_PKG_VERSION"));

    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(e) => {
            e.print().ok();
            return ExitCode::from(parse_failure_code(&e));
        }
    };

    match run(&args, codec::default_codec()) {
        Ok(outcome) => {
            println!("{outcome}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("ERROR: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Help and version requests end up here too, and are not failures.
fn parse_failure_code(e: &clap::Error) -> u8 {
    if e.use_stderr() {
        1
    } else {
        0
    }
}

fn run(args: &Cli, codec: impl Codec) -> anyhow::Result<Outcome> {
    let input = args.input.as_path();
    let data = std::fs::read(input)
        .with_context(|| format!("Failed to read from {}", input.display()))?;

    let operation = args
        .mode()
        .resolve(&data)
        .with_context(|| format!("Couldn't tell whether {} is compressed", input.display()))?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| operation.default_output(input));
    info!(?operation, input = %input.display(), output = %output.display(), "resolved");

    let transformed = transform(operation, codec, &data, input)?;

    std::fs::write(&output, &transformed)
        .with_context(|| format!("Failed to write to {}", output.display()))?;

    Outcome {
        operation,
        input: input.to_owned(),
        output,
    }
    .pipe(Ok)
}

fn transform(
    operation: Operation,
    codec: impl Codec,
    data: &[u8],
    input: &Path,
) -> anyhow::Result<bytes::Bytes> {
    match operation {
        Operation::Compress => container::compress(codec, data)
            .with_context(|| format!("Couldn't compress {}", input.display())),
        Operation::Decompress => container::decompress(codec, data)
            .with_context(|| format!("Couldn't decompress {}, bad file?", input.display())),
    }
}
