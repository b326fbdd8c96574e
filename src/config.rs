use clap::Parser;
use std::path::PathBuf;

/// program file used by the load and save keys when none is given
pub const DEFAULT_PROGRAM: &str = "file.prg";

#[derive(Parser, Debug, Clone)]
#[command(name = "c64term")]
#[command(version)]
#[command(about = "Commodore 64 front end for the terminal", long_about = None)]
pub struct CliArgs {
    /// Program to load and run once BASIC is ready; also used by the
    /// load (page down) and save (page up) keys
    #[arg(value_name = "FILE")]
    pub program: Option<PathBuf>,

    /// Draw every character two columns wide
    #[arg(long)]
    pub wide: bool,

    /// Write log output to this file
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

/// runtime options for a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub program: PathBuf,
    pub autorun: bool,
    pub wide: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            program: PathBuf::from(DEFAULT_PROGRAM),
            autorun: false,
            wide: false,
        }
    }
}

impl From<&CliArgs> for Config {
    fn from(args: &CliArgs) -> Self {
        match &args.program {
            Some(program) => Config {
                program: program.clone(),
                autorun: true,
                wide: args.wide,
            },
            None => Config {
                wide: args.wide,
                ..Config::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<CliArgs, clap::Error> {
        CliArgs::try_parse_from(std::iter::once("c64term").chain(args.iter().copied()))
    }

    #[test]
    fn test_no_args() {
        let config = Config::from(&parse(&[]).unwrap());
        assert_eq!(config, Config::default());
        assert_eq!(config.program, PathBuf::from("file.prg"));
        assert!(!config.autorun);
    }

    #[test]
    fn test_program_enables_autorun() {
        let config = Config::from(&parse(&["games/elite.prg"]).unwrap());
        assert_eq!(config.program, PathBuf::from("games/elite.prg"));
        assert!(config.autorun);
    }

    #[test]
    fn test_flags() {
        let args = parse(&["--wide", "--log-file", "c64.log"]).unwrap();
        assert!(args.wide);
        assert_eq!(args.log_file, Some(PathBuf::from("c64.log")));
        assert!(Config::from(&args).wide);
    }

    #[test]
    fn test_help() {
        for flag in ["-h", "--help"] {
            let err = parse(&[flag]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::DisplayHelp);
            assert!(!err.use_stderr());
        }
    }

    #[test]
    fn test_unknown_flag() {
        let err = parse(&["--turbo"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
        assert!(err.use_stderr());
    }
}
