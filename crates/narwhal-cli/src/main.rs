use narwhal::{Engine, EngineConfig, GraphRequest, RadarRequest};
use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Narwhal(narwhal::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Narwhal(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<narwhal::Error> for CliError {
    fn from(value: narwhal::Error) -> Self {
        Self::Narwhal(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy)]
enum Command {
    Graph,
    Radar,
}

#[derive(Debug, Default)]
struct Args {
    command: Option<Command>,
    input: Option<String>,
    pretty: bool,
    cache_dir: Option<PathBuf>,
    no_cache: bool,
    config: Option<PathBuf>,
}

fn usage() -> &'static str {
    "narwhal-cli\n\
\n\
USAGE:\n\
  narwhal-cli graph [--pretty] [--cache-dir <dir>] [--no-cache] [--config <file>] [<path>|-]\n\
  narwhal-cli radar [--pretty] [--cache-dir <dir>] [--no-cache] [--config <file>] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', the JSON request is read from stdin.\n\
  - graph expects {from_nodes, to_nodes, roles, dimension, layout?, k?}.\n\
  - radar expects {data, amplitude, thread, node_type, dimension}.\n\
  - The output is a JSON array with one value per input row (null for rows of a degenerate graph).\n\
  - NARWHAL_CACHE_DIR, NARWHAL_NO_CACHE, NARWHAL_WEIGHT_POLICY and NARWHAL_DUMP_INPUT override\n\
    the configuration file; command-line flags override both.\n\
  - NARWHAL_LOG sets the log filter (default: warn). Logs go to stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "graph" if args.command.is_none() => args.command = Some(Command::Graph),
            "radar" if args.command.is_none() => args.command = Some(Command::Radar),
            "--pretty" => args.pretty = true,
            "--no-cache" => args.no_cache = true,
            "--cache-dir" => {
                let Some(dir) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.cache_dir = Some(PathBuf::from(dir));
            }
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(PathBuf::from(path));
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.command.is_none() || args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    if args.command.is_none() {
        return Err(CliError::Usage(usage()));
    }
    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

/// Configuration file, then `NARWHAL_*` variables, then flags.
fn load_config(args: &Args) -> Result<EngineConfig, CliError> {
    let config = match &args.config {
        Some(path) => EngineConfig::from_json_str(&std::fs::read_to_string(path)?)?,
        None => EngineConfig::default(),
    };
    let mut config = config.apply_env()?;
    if let Some(dir) = &args.cache_dir {
        config.cache_dir = dir.clone();
    }
    if args.no_cache {
        config.cache_enabled = false;
    }
    Ok(config)
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("NARWHAL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(args: Args) -> Result<(), CliError> {
    let config = load_config(&args)?;
    tracing::debug!(?config, "engine configuration");
    let engine = Engine::new(config);

    let text = read_input(args.input.as_deref())?;
    match args.command {
        Some(Command::Graph) => {
            let request: GraphRequest = serde_json::from_str(&text)?;
            let out = engine.graph_coordinates(&request)?;
            write_json(&out, args.pretty)
        }
        Some(Command::Radar) => {
            let request: RadarRequest = serde_json::from_str(&text)?;
            let out = engine.radar_coordinates(&request)?;
            write_json(&out, args.pretty)
        }
        None => Err(CliError::Usage(usage())),
    }
}

fn main() {
    init_logging();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
