use std::fs;
use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgAction, CommandFactory, FromArgMatches, Parser, ValueEnum};
use mbpoll_core::{
    ClientError, DEFAULT_PORT, DEFAULT_TIMEOUT_SECS, DEFAULT_UNIT_ID, PollError, PollReport,
    PollTarget, SpecError, WordOrder, parse_csv, poll_target, wire_offset,
};
use tracing::debug;

mod logging;
mod output;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("MBPOLL_BUILD_COMMIT"),
    " ",
    env!("MBPOLL_BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "mbpoll")]
#[command(version, long_version = LONG_VERSION)]
#[command(about = "Poll the specified holding register(s) via Modbus/TCP.", long_about = None)]
struct Cli {
    /// Device IPv4 address
    ip_address: String,

    /// Registers as start,end_or_count,format (e.g. 40001,10,u)
    registers: String,

    /// Destination port number
    #[arg(short = 'p', long, default_value_t = DEFAULT_PORT,
          value_parser = clap::value_parser!(u16).range(1..))]
    port: u16,

    /// Response timeout in seconds
    #[arg(short = 't', long, default_value_t = DEFAULT_TIMEOUT_SECS,
          value_parser = clap::value_parser!(u64).range(1..))]
    timeout: u64,

    /// Slave RTU address (Modbus unit id)
    #[arg(short = 's', long, default_value_t = DEFAULT_UNIT_ID,
          value_parser = clap::value_parser!(u8).range(1..))]
    slave: u8,

    /// Register order for 32-bit formats (S, U, f)
    #[arg(short = 'w', long, value_enum, default_value_t = WordOrderArg::HighFirst)]
    word_order: WordOrderArg,

    /// Print the JSON report to stdout instead of text
    #[arg(long)]
    json: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Also write the JSON report to this path
    #[arg(short = 'o', long)]
    report: Option<PathBuf>,

    /// Omit the connection summary in text output
    #[arg(short = 'q', long)]
    quiet: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum WordOrderArg {
    /// Lower address holds the high 16 bits
    HighFirst,
    /// Lower address holds the low 16 bits
    LowFirst,
}

impl From<WordOrderArg> for WordOrder {
    fn from(value: WordOrderArg) -> Self {
        match value {
            WordOrderArg::HighFirst => WordOrder::HighFirst,
            WordOrderArg::LowFirst => WordOrder::LowFirst,
        }
    }
}

fn main() -> ExitCode {
    let command = Cli::command();
    let footer = output::help_footer(command.get_name());
    let matches = command.after_help(footer).get_matches();
    let cli = match Cli::from_arg_matches(&matches) {
        Ok(cli) => cli,
        Err(err) => err.exit(),
    };
    logging::init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = &err.hint {
                eprintln!("hint: {}", hint);
            }
            err.exit_code()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FailureKind {
    /// Bad arguments; nothing was sent to the device.
    Validation,
    /// Connection, timeout or device-side failure.
    Transport,
    /// Local output could not be produced.
    Output,
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
    kind: FailureKind,
}

impl CliError {
    fn new(kind: FailureKind, message: impl Into<String>, hint: Option<&str>) -> Self {
        Self {
            message: message.into(),
            hint: hint.map(str::to_string),
            kind,
        }
    }

    fn code(&self) -> u8 {
        match self.kind {
            FailureKind::Transport => 1,
            FailureKind::Validation => 2,
            FailureKind::Output => 3,
        }
    }

    fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code())
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(FailureKind::Output, format!("{err:#}"), None)
    }
}

impl From<SpecError> for CliError {
    fn from(err: SpecError) -> Self {
        let hint = match &err {
            SpecError::MalformedSpec { .. } | SpecError::InvalidNumber { .. } => {
                "expected start,end_or_count,format, e.g. 40001,10,u"
            }
            SpecError::InvalidFormat { .. } => "use one of u, U, s, S, f, b, a",
            SpecError::InvalidAddress { .. } => "starting register must be within 40000-49999",
            SpecError::RangeExceeded { .. } => "try fewer registers",
            SpecError::InvalidCount { .. } => {
                "read 1 to 125 registers; 32-bit formats round odd counts up"
            }
        };
        CliError::new(FailureKind::Validation, err.to_string(), Some(hint))
    }
}

impl From<PollError> for CliError {
    fn from(err: PollError) -> Self {
        let hint = match &err {
            PollError::Unaddressable { .. } => Some("start at register 40001 or above"),
            PollError::Client(ClientError::Connect { .. }) => {
                Some("check the address and port, and that the device accepts Modbus/TCP")
            }
            PollError::Client(ClientError::Timeout { .. }) => {
                Some("check the slave address or raise the timeout with -t")
            }
            PollError::Client(ClientError::Exception { code: 0x02, .. }) => {
                Some("the device does not expose this register range")
            }
            _ => None,
        };
        let kind = if err.is_transport() {
            FailureKind::Transport
        } else {
            FailureKind::Validation
        };
        CliError::new(kind, format!("read failed: {err}"), hint)
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let address = parse_ip(&cli.ip_address)?;
    let plan = parse_csv(&cli.registers)?;
    let target = PollTarget {
        address: IpAddr::V4(address),
        port: cli.port,
        unit_id: cli.slave,
        timeout: Duration::from_secs(cli.timeout),
    };
    let word_order = WordOrder::from(cli.word_order);
    wire_offset(&plan)?;
    debug!(?target, ?plan, ?word_order, "validated poll request");

    if !cli.json && !cli.quiet {
        print!("{}", output::render_header(&target, &plan));
    }

    let report = poll_target(&target, &plan, word_order)?;

    if let Some(path) = cli.report.as_deref() {
        write_report(path, &report, cli.pretty)?;
    }
    if cli.json {
        let json = output::serialize_report(&report, cli.pretty)
            .context("JSON serialization failed")?;
        println!("{}", json);
    } else {
        print!("{}", output::render_values(&report.registers));
    }
    Ok(())
}

fn parse_ip(input: &str) -> Result<Ipv4Addr, CliError> {
    input.parse::<Ipv4Addr>().map_err(|_| {
        CliError::new(
            FailureKind::Validation,
            format!("invalid IP address '{}'", input),
            Some("expected a dotted IPv4 address such as 192.168.1.5"),
        )
    })
}

fn write_report(path: &Path, report: &PollReport, pretty: bool) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    let json = output::serialize_report(report, pretty).context("JSON serialization failed")?;
    fs::write(path, json).with_context(|| format!("Failed to write report: {}", path.display()))
}
