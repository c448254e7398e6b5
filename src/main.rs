use clap::Parser;
use qr_generator::config::{self, CliSource, Environment};
use qr_generator::generate::{ErrorKind, Generator};
use qr_generator::qr::QrcodeEngine;
use qr_generator::{output, telemetry};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "qr-generator")]
#[command(about = "Generate QR codes for URLs")]
#[command(long_about = "\
Generate QR codes for URLs

Encodes a URL into a PNG QR code with rounded modules, black on white.
Each run writes a timestamped log file under logs/.

Environment:
  QR_URL           URL to encode when --url is not given
  QR_OUTPUT_DIR    Output directory when --dir is not given")]
#[command(after_help = "\
Examples:
  qr-generator --url https://github.com/kaw393939
  qr-generator --url https://www.njit.edu --output custom_qr.png
  qr-generator --url https://example.com --dir /custom/path")]
#[command(version)]
struct Cli {
    /// URL to encode in the QR code
    #[arg(long)]
    url: Option<String>,

    /// Output filename for the QR code image (.png is appended if missing)
    #[arg(long)]
    output: Option<String>,

    /// Output directory for QR code images [default: qr_codes]
    #[arg(long)]
    dir: Option<PathBuf>,
}

impl Cli {
    fn into_source(self) -> CliSource {
        CliSource {
            url: self.url,
            dir: self.dir,
            output: self.output,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Resolve before logging starts: a usage error leaves no files behind.
    let request = match config::resolve(&cli.into_source(), &Environment::capture()) {
        Ok(request) => request,
        Err(err) => {
            output::print_failure(&err);
            return ExitCode::from(ErrorKind::Configuration.exit_code());
        }
    };

    let _telemetry = telemetry::init(Path::new(telemetry::LOG_DIR), telemetry::TOOL_NAME);
    info!("Starting QR Code Generator");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!(
        "Arguments: url={} ({}), dir={} ({}), output={}",
        request.payload(),
        request.payload_source(),
        request.output_directory().display(),
        request.directory_source(),
        request.filename().unwrap_or("<generated>"),
    );

    let result = Generator::new(QrcodeEngine::new()).generate(&request);
    match result.into_result() {
        Ok(path) => {
            output::print_success(&path);
            info!("QR Code Generator completed successfully");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("Application failed: {err}");
            output::print_failure(&err);
            ExitCode::from(err.kind().exit_code())
        }
    }
}
