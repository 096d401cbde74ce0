use std::path::{Path, PathBuf};
use std::process::ExitCode;

use ants::downloader::config::DEFAULT_DIRECTORY;
use ants::{
    resolve_output, ConflictPolicy, DownloadRequest, DownloaderBuilder, Error, OutputTarget,
    ProgressBarOpts,
};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "ants")]
#[command(about = "Download a file with several parallel range requests")]
struct Cli {
    /// URL to download
    url: String,

    /// Number of workers
    #[arg(short = 'n', long = "workers", default_value_t = 4)]
    workers: usize,

    /// Output directory or file [default: ./downloads]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Extra request header, as "Name: value"
    #[arg(short = 'H', long = "header")]
    headers: Vec<String>,

    /// What to do when a .part file already exists (overwrite, skip, rename, raise)
    #[arg(long, default_value_t = ConflictPolicy::Skip)]
    on_conflict: ConflictPolicy,

    /// Hide the progress bar
    #[arg(short, long, default_value_t = false)]
    quiet: bool,

    /// Log debug output
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "ants=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn build_request(cli: &Cli) -> Result<DownloadRequest, Error> {
    let mut request = DownloadRequest::try_from(cli.url.as_str())?;
    for raw in &cli.headers {
        let (name, value) = raw
            .split_once(':')
            .ok_or_else(|| Error::InvalidHeader(format!("expected \"Name: value\", got {raw:?}")))?;
        request = request.with_header(name.trim(), value.trim())?;
    }
    Ok(request)
}

/// Where to write. Without `-o` the default directory is always a directory,
/// created on demand by the downloader.
fn output_target(output: Option<&Path>) -> Result<OutputTarget, Error> {
    match output {
        Some(output) => {
            let target = resolve_output(output)?;
            debug!("Resolved {:?} to {:?}", output, target);
            Ok(target)
        }
        None => Ok(OutputTarget::Directory(
            std::env::current_dir()?.join(DEFAULT_DIRECTORY),
        )),
    }
}

async fn run(cli: Cli) -> Result<PathBuf, Error> {
    let target = output_target(cli.output.as_deref())?;

    let mut request = build_request(&cli)?;
    if let Some(filename) = target.filename() {
        request = request.with_filename(filename);
    }

    let token = CancellationToken::new();
    let interrupt = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            interrupt.cancel();
        }
    });

    let progress = if cli.quiet {
        ProgressBarOpts::hidden()
    } else {
        ProgressBarOpts::default()
    };

    let downloader = DownloaderBuilder::new()
        .directory(target.directory().to_path_buf())
        .max_workers(cli.workers)
        .on_conflict(cli.on_conflict)
        .progress(progress)
        .cancellation_token(token)
        .build();

    downloader.download(&request).await
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(path) => {
            println!("{}", path.display());
            ExitCode::SUCCESS
        }
        Err(Error::Cancelled) => {
            eprintln!("Download cancelled");
            ExitCode::from(130)
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
