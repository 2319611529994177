//! # Thermaltext CLI
//!
//! Command-line interface for converting and printing receipt markup.
//!
//! ## Usage
//!
//! ```bash
//! # Convert markup to printer text (stdin to stdout)
//! thermaltext convert < receipt.html
//!
//! # Write a browser print page
//! thermaltext preview receipt.html -o receipt-print.html --print-dialog
//!
//! # Print through the spooler, framed as a raw ESC/POS job
//! thermaltext print receipt.html --printer TM-T20 --raw
//!
//! # List print queues
//! thermaltext printers
//!
//! # Show the bundled sample receipt as printer text
//! thermaltext sample
//!
//! # Run the HTTP print service
//! thermaltext serve --listen 0.0.0.0:5000
//! ```

use clap::{Args, Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};

use thermaltext::{
    Converter, ConverterConfig, PaperProfile, SpoolTransport, ThermaltextError,
    preview::{DocumentKind, render_document},
    printer::PaperMetrics,
    protocol::commands,
    server::{self, SAMPLE_RECEIPT, ServerConfig},
    transport::{list_printers, spool::DEFAULT_PRINTER},
};
use tracing_subscriber::EnvFilter;

/// Thermaltext - Receipt markup to thermal printer text
#[derive(Parser, Debug)]
#[command(name = "thermaltext")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    profile: ProfileArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Converter configuration flags shared by every subcommand.
#[derive(Args, Debug)]
struct ProfileArgs {
    /// Converter config JSON (paper, table layout, centered phrases)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Printable paper width in millimetres
    #[arg(long, global = true)]
    paper_width_mm: Option<f64>,

    /// Print head resolution in dots per millimetre
    #[arg(long, global = true)]
    dots_per_mm: Option<f64>,

    /// Character cell width in dots
    #[arg(long, global = true)]
    font_width_chars: Option<u32>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert markup to printer text
    Convert {
        /// Markup file (stdin when omitted)
        file: Option<PathBuf>,

        /// Write to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Wrap markup in a 79mm browser print page
    Preview {
        /// Markup file (stdin when omitted)
        file: Option<PathBuf>,

        /// Write to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Open the print dialog when the page loads
        #[arg(long)]
        print_dialog: bool,
    },

    /// Convert markup and send it to a print queue
    Print {
        /// Markup file (stdin when omitted)
        file: Option<PathBuf>,

        /// Print queue name
        #[arg(long, default_value = DEFAULT_PRINTER)]
        printer: String,

        /// Frame the job with ESC/POS init and cut commands, sent unfiltered
        #[arg(long)]
        raw: bool,
    },

    /// List print queues
    Printers,

    /// Convert the bundled sample receipt
    Sample,

    /// Run the HTTP print service
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "0.0.0.0:5000")]
        listen: String,

        /// Queue used when a request names no printer
        #[arg(long, default_value = DEFAULT_PRINTER)]
        printer: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "thermaltext=info,tower_http=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), ThermaltextError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert { file, output } => {
            let converter = build_converter(&cli.profile)?;
            let text = converter.convert(&read_input(file.as_deref())?);
            write_output(output.as_deref(), &text)?;
        }

        Commands::Preview {
            file,
            output,
            print_dialog,
        } => {
            let kind = if print_dialog {
                DocumentKind::Print
            } else {
                DocumentKind::Preview
            };
            let page = render_document(&read_input(file.as_deref())?, kind);
            write_output(output.as_deref(), &page)?;
        }

        Commands::Print { file, printer, raw } => {
            let converter = build_converter(&cli.profile)?;
            let text = converter.convert(&read_input(file.as_deref())?);
            let transport = SpoolTransport::new(&printer);

            if raw {
                transport.submit(&commands::frame_text(&text), true)?;
            } else {
                transport.submit(text.as_bytes(), false)?;
            }
            println!(
                "Sent to {} ({} characters per line)",
                transport.printer().unwrap_or(DEFAULT_PRINTER),
                converter.paper_width_chars()
            );
        }

        Commands::Printers => {
            for name in list_printers() {
                println!("{}", name);
            }
        }

        Commands::Sample => {
            let converter = build_converter(&cli.profile)?;
            print!("{}", converter.convert(SAMPLE_RECEIPT));
        }

        Commands::Serve { listen, printer } => {
            let converter = build_converter(&cli.profile)?;
            let config = ServerConfig {
                listen_addr: listen,
                default_printer: printer,
            };
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::serve(config, converter))?;
        }
    }

    Ok(())
}

/// Load the config file, if any, then apply profile overrides.
fn build_converter(args: &ProfileArgs) -> Result<Converter, ThermaltextError> {
    let mut config = match &args.config {
        Some(path) => ConverterConfig::load(path)?,
        None => ConverterConfig::default(),
    };

    let mut metrics: PaperMetrics = *config.paper.metrics();
    if let Some(mm) = args.paper_width_mm {
        metrics.paper_width_mm = mm;
    }
    if let Some(dpm) = args.dots_per_mm {
        metrics.dots_per_mm = dpm;
    }
    if let Some(fw) = args.font_width_chars {
        metrics.font_width_chars = fw;
    }
    config.paper = PaperProfile::from(metrics);

    Converter::new(config)
}

fn read_input(file: Option<&Path>) -> Result<String, ThermaltextError> {
    match file {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut input = String::new();
            std::io::stdin().read_to_string(&mut input)?;
            Ok(input)
        }
    }
}

fn write_output(path: Option<&Path>, content: &str) -> Result<(), ThermaltextError> {
    match path {
        Some(path) => {
            std::fs::write(path, content)?;
            tracing::info!(path = %path.display(), bytes = content.len(), "wrote output");
        }
        None => print!("{}", content),
    }
    Ok(())
}
