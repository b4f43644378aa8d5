use crate::rcfile::load_config;
use crate::terminal::execute_line;
use rpncalc::{Base, Config, Mode, Session};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parsed command-line arguments
#[derive(Debug, Default)]
pub(crate) struct CliArgs {
    pub(crate) command: Option<String>,
    pub(crate) script: Option<String>,
    pub(crate) config: Option<PathBuf>,
    pub(crate) width: Option<u32>,
    pub(crate) base: Option<Base>,
    pub(crate) mode: Option<Mode>,
    pub(crate) help: bool,
    pub(crate) version: bool,
}

impl CliArgs {
    /// Command-line flags win over the config file
    pub(crate) fn apply(&self, config: &mut Config) {
        if let Some(width) = self.width {
            config.bit_width = width;
        }
        if let Some(base) = self.base {
            config.base = base;
        }
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
    }
}

fn parse_base(s: &str) -> Result<Base, String> {
    match s.to_ascii_lowercase().as_str() {
        "bin" | "2" => Ok(Base::Bin),
        "oct" | "8" => Ok(Base::Oct),
        "dec" | "10" => Ok(Base::Dec),
        "hex" | "16" => Ok(Base::Hex),
        _ => Err(format!("unknown base: {}", s)),
    }
}

fn parse_mode(s: &str) -> Result<Mode, String> {
    match s.to_ascii_lowercase().as_str() {
        "basic" => Ok(Mode::Basic),
        "programmer" | "prog" => Ok(Mode::Programmer),
        "scientific" | "sci" => Ok(Mode::Scientific),
        "statistics" | "stats" => Ok(Mode::Statistics),
        _ => Err(format!("unknown mode: {}", s)),
    }
}

/// Parse command-line arguments
pub(crate) fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut cli = CliArgs::default();

    let mut i = 1; // Skip program name
    while i < args.len() {
        let value = |i: usize| {
            args.get(i + 1)
                .cloned()
                .ok_or_else(|| format!("{} needs a value", args[i]))
        };
        match args[i].as_str() {
            "-c" => {
                // Everything after -c is the command
                if i + 1 < args.len() {
                    cli.command = Some(args[i + 1..].join(" "));
                }
                break;
            }
            "--config" => {
                cli.config = Some(PathBuf::from(value(i)?));
                i += 1;
            }
            "-w" | "--width" => {
                let raw = value(i)?;
                let width = raw
                    .parse::<u32>()
                    .map_err(|_| format!("invalid width: {}", raw))?;
                cli.width = Some(width);
                i += 1;
            }
            "-b" | "--base" => {
                cli.base = Some(parse_base(&value(i)?)?);
                i += 1;
            }
            "-m" | "--mode" => {
                cli.mode = Some(parse_mode(&value(i)?)?);
                i += 1;
            }
            "--help" | "-h" => {
                cli.help = true;
            }
            "--version" | "-V" => {
                cli.version = true;
            }
            path if !path.starts_with('-') => {
                cli.script = Some(path.to_string());
            }
            flag => return Err(format!("unknown option: {}", flag)),
        }
        i += 1;
    }

    Ok(cli)
}

pub(crate) fn print_help() {
    println!(
        r#"rpncalc {} - reverse polish notation calculator

USAGE:
    rpncalc                     Start interactive REPL
    rpncalc -c <tokens>         Evaluate tokens and print the stack
    rpncalc <script>            Evaluate a script file, one line at a time
    rpncalc --help              Show this help message
    rpncalc --version           Show version

OPTIONS:
    --config <path>             Config file (default ~/.rpncalc.toml)
    -w, --width <bits>          Programmer register width, 1-128
    -b, --base <bin|oct|dec|hex>
    -m, --mode <basic|programmer|scientific|stats>

ENVIRONMENT:
    RPNCALC_LOG                 Log filter, e.g. debug (default warn)

Type ? at the prompt for the commands of the current mode."#,
        VERSION
    );
}

pub(crate) fn print_version() {
    println!("rpncalc {}", VERSION);
}

fn start_session(cli: &CliArgs) -> Result<Session, String> {
    let mut config = load_config(cli.config.as_deref());
    cli.apply(&mut config);
    Session::with_config(config).map_err(|e| e.to_string())
}

/// Evaluate a single line of tokens
pub(crate) fn execute_command(cmd: &str, cli: &CliArgs) -> ExitCode {
    let mut session = match start_session(cli) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match execute_line(&mut session, cmd, true) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Evaluate a script file. The stack carries over between lines and is
/// printed once at the end.
pub(crate) fn execute_script(path: &str, cli: &CliArgs) -> ExitCode {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading {}: {}", path, e);
            return ExitCode::FAILURE;
        }
    };

    let mut session = match start_session(cli) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    for (line_num, line) in content.lines().enumerate() {
        let trimmed = line.trim();

        // Skip empty lines and comments
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if let Err(e) = execute_line(&mut session, trimmed, false) {
            eprintln!("Error at line {}: {}", line_num + 1, e);
            return ExitCode::FAILURE;
        }
    }

    crate::terminal::print_stack(&session);
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("rpncalc")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_command_takes_rest_of_line() {
        let cli = parse_args(&args(&["-c", "3", "4", "+"])).unwrap();
        assert_eq!(cli.command.as_deref(), Some("3 4 +"));
    }

    #[test]
    fn test_overrides() {
        let cli = parse_args(&args(&["--width", "16", "--base", "hex", "-m", "prog"])).unwrap();
        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config.bit_width, 16);
        assert_eq!(config.base, Base::Hex);
        assert_eq!(config.mode, Mode::Programmer);
    }

    #[test]
    fn test_bad_arguments() {
        assert!(parse_args(&args(&["--width"])).is_err());
        assert!(parse_args(&args(&["--width", "wide"])).is_err());
        assert!(parse_args(&args(&["--base", "base64"])).is_err());
        assert!(parse_args(&args(&["--frobnicate"])).is_err());
    }

    #[test]
    fn test_script_path() {
        let cli = parse_args(&args(&["sums.rpn"])).unwrap();
        assert_eq!(cli.script.as_deref(), Some("sums.rpn"));
    }
}
