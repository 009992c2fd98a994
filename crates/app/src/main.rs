mod terminal;

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use services::{
    Clock, GameHandle, GameRunner, GameSession, QuestionBank, RandomShuffler, ToneCue,
    load_catalog, sample_catalog,
};
use tracing_subscriber::EnvFilter;
use trivia_core::model::GameSettings;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidRoundSecs { raw: String },
    InvalidSeed { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidRoundSecs { raw } => write!(f, "invalid --round-secs value: {raw}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--catalog <path>] [--round-secs <n>] [--seed <u64>] [--summary-json]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  built-in catalog, 10 second rounds, random seed");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  TRIVIA_CATALOG, TRIVIA_ROUND_SECS, TRIVIA_SEED, RUST_LOG");
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    catalog: Option<PathBuf>,
    round_secs: Option<u32>,
    seed: Option<u64>,
    summary_json: bool,
    help: bool,
}

impl Args {
    fn from_env() -> Result<Self, ArgsError> {
        let env = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());
        let mut args = Self {
            catalog: env("TRIVIA_CATALOG").map(PathBuf::from),
            ..Self::default()
        };
        if let Some(raw) = env("TRIVIA_ROUND_SECS") {
            args.round_secs = Some(parse_round_secs(raw)?);
        }
        if let Some(raw) = env("TRIVIA_SEED") {
            args.seed = Some(parse_seed(raw)?);
        }
        Ok(args)
    }

    /// Flags override whatever the environment provided.
    fn parse(mut self, args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--catalog" => {
                    self.catalog = Some(PathBuf::from(require_value(args, "--catalog")?));
                }
                "--round-secs" => {
                    self.round_secs = Some(parse_round_secs(require_value(args, "--round-secs")?)?);
                }
                "--seed" => {
                    self.seed = Some(parse_seed(require_value(args, "--seed")?)?);
                }
                "--summary-json" => self.summary_json = true,
                "--help" | "-h" => self.help = true,
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }
        Ok(self)
    }
}

fn parse_round_secs(raw: String) -> Result<u32, ArgsError> {
    raw.trim()
        .parse()
        .map_err(|_| ArgsError::InvalidRoundSecs { raw })
}

fn parse_seed(raw: String) -> Result<u64, ArgsError> {
    raw.trim().parse().map_err(|_| ArgsError::InvalidSeed { raw })
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // Logs go to stderr so they never interleave with the game screen on stdout.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::from_env()
        .and_then(|env| env.parse(&mut argv))
        .map_err(|e| {
            eprintln!("{e}");
            print_usage();
            e
        })?;
    if args.help {
        print_usage();
        return Ok(());
    }

    let settings = match args.round_secs {
        Some(secs) => GameSettings::default().with_round_secs(secs)?,
        None => GameSettings::default(),
    };
    let catalog = match &args.catalog {
        Some(path) => load_catalog(path)?,
        None => sample_catalog()?,
    };
    if catalog.is_empty() {
        tracing::warn!("catalog has no questions");
    }

    let shuffler = match args.seed {
        Some(seed) => RandomShuffler::seeded(seed),
        None => RandomShuffler::from_entropy(),
    };
    let session = GameSession::start(&QuestionBank::new(catalog), &settings, Box::new(shuffler));
    let cue = Arc::new(ToneCue::from_settings(&settings));
    let (runner, handle) = GameRunner::new(session, cue, Clock::system());
    let GameHandle { intents, snapshots } = handle;

    let game = tokio::spawn(runner.run());
    let screen = tokio::spawn(terminal::render_loop(snapshots.clone()));
    terminal::spawn_input_thread(intents, snapshots);

    let session = game.await?;
    screen.await?;

    if let Some(score) = session.final_score() {
        println!("{}", terminal::Summary::new(score, session.results()));
        if args.summary_json {
            println!("{}", serde_json::to_string_pretty(session.results())?);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    init_logging();
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, ArgsError> {
        let mut iter = args.iter().map(|s| (*s).to_string());
        Args::default().parse(&mut iter)
    }

    #[test]
    fn parses_all_flags() {
        let args = parse(&[
            "--catalog",
            "quiz.toml",
            "--round-secs",
            "15",
            "--seed",
            "7",
            "--summary-json",
        ])
        .unwrap();
        assert_eq!(args.catalog, Some(PathBuf::from("quiz.toml")));
        assert_eq!(args.round_secs, Some(15));
        assert_eq!(args.seed, Some(7));
        assert!(args.summary_json);
    }

    #[test]
    fn reports_bad_values() {
        assert!(matches!(
            parse(&["--round-secs", "soon"]),
            Err(ArgsError::InvalidRoundSecs { .. })
        ));
        assert!(matches!(
            parse(&["--seed"]),
            Err(ArgsError::MissingValue { flag: "--seed" })
        ));
        assert!(matches!(
            parse(&["--fast"]),
            Err(ArgsError::UnknownArg(arg)) if arg == "--fast"
        ));
    }

    #[test]
    fn flags_override_environment_values() {
        let base = Args {
            round_secs: Some(20),
            ..Args::default()
        };
        let mut iter = ["--round-secs", "5"].iter().map(|s| (*s).to_string());
        let args = base.parse(&mut iter).unwrap();
        assert_eq!(args.round_secs, Some(5));
    }
}
