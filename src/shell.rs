use std::path::PathBuf;
use std::time::Duration;
use anyhow::Result;
use chrono::Local;
use colored::*;
use rustyline::error::ReadlineError;
use rustyline::Editor;
use rustyline::completion::{Completer, Pair};
use rustyline::history::DefaultHistory;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::Helper;
use tracing::debug;

use crate::cli;
use crate::config::Config;
use crate::core::footprint::LocalFoodShare;
use crate::core::market::{self, Market, PriceSource, SimRng};
use crate::core::overview;
use crate::core::projection::{project, Scenario};
use crate::core::quiz::QuizSession;
use crate::core::sliders;
use crate::core::SimError;
use crate::formatter::{Dashboard, FOOTER};

const COMMANDS: &[&str] = &[
    "/home", "/mix", "/footprint", "/market", "/buy", "/advance",
    "/quiz", "/select", "/check", "/reset", "/project", "/help", "/exit",
];

pub async fn handle_shell(data_dir: Option<PathBuf>) -> Result<()> {
    let config = Config::new(data_dir)?;
    let mut shell = ShellMode::new(config)?;
    shell.run().await
}

#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Home,
    Mix([Option<i64>; 6]),
    Footprint(Vec<(String, String)>),
    Market,
    Buy(u32),
    Advance,
    Quiz,
    Select { question: usize, option: usize },
    Check(usize),
    Reset,
    Project { year: Option<i64>, scenario: Scenario },
    Help,
    Exit,
}

fn parse_int(raw: &str) -> Result<i64, SimError> {
    raw.parse()
        .map_err(|_| SimError::Parse(format!("'{}' is not a whole number", raw)))
}

fn parse_index(raw: &str) -> Result<usize, SimError> {
    match raw.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(SimError::Parse(format!("'{}' is not a 1-based number", raw))),
    }
}

/// Parse one shell line. Question and option numbers are 1-based.
pub fn parse_command(line: &str) -> Result<ShellCommand, SimError> {
    let mut parts = line.split_whitespace();
    let head = parts.next().unwrap_or("");
    let args: Vec<&str> = parts.collect();

    let command = match head {
        "/home" => ShellCommand::Home,
        "/mix" => {
            if !args.is_empty() && args.len() != 6 {
                return Err(SimError::Parse(
                    "usage: /mix [coal gas nuclear hydro solar wind]".to_string(),
                ));
            }
            let mut shares = [None; 6];
            for (slot, raw) in shares.iter_mut().zip(&args) {
                *slot = Some(parse_int(raw)?);
            }
            ShellCommand::Mix(shares)
        }
        "/footprint" => {
            let mut pairs = Vec::new();
            for arg in &args {
                let (key, value) = arg.split_once('=').ok_or_else(|| {
                    SimError::Parse(format!("expected key=value, got '{}'", arg))
                })?;
                pairs.push((key.to_string(), value.to_string()));
            }
            ShellCommand::Footprint(pairs)
        }
        "/market" => ShellCommand::Market,
        "/buy" => match args.as_slice() {
            [units] => ShellCommand::Buy(sliders::CREDITS.parse(units)?),
            _ => return Err(SimError::Parse("usage: /buy <units>".to_string())),
        },
        "/advance" => ShellCommand::Advance,
        "/quiz" => ShellCommand::Quiz,
        "/select" => match args.as_slice() {
            [q, o] => ShellCommand::Select { question: parse_index(q)?, option: parse_index(o)? },
            _ => return Err(SimError::Parse("usage: /select <question> <option>".to_string())),
        },
        "/check" => match args.as_slice() {
            [q] => ShellCommand::Check(parse_index(q)?),
            _ => return Err(SimError::Parse("usage: /check <question>".to_string())),
        },
        "/reset" => ShellCommand::Reset,
        "/project" => {
            let year = args.first().map(|y| parse_int(y)).transpose()?;
            let scenario = match args.get(1) {
                Some(s) => s.parse()?,
                None => Scenario::Baseline,
            };
            ShellCommand::Project { year, scenario }
        }
        "/help" => ShellCommand::Help,
        "/exit" | "/quit" => ShellCommand::Exit,
        other => return Err(SimError::Parse(format!("unknown command '{}', try /help", other))),
    };
    Ok(command)
}

struct ShellCompleter;

impl Helper for ShellCompleter {}

impl Hinter for ShellCompleter {
    type Hint = String;

    fn hint(&self, _line: &str, _pos: usize, _ctx: &rustyline::Context<'_>) -> Option<String> {
        None
    }
}

impl Highlighter for ShellCompleter {}

impl Validator for ShellCompleter {}

impl Completer for ShellCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        if !line.starts_with('/') || line[..pos].contains(' ') {
            return Ok((pos, Vec::new()));
        }
        let word = &line[..pos];
        let matches = COMMANDS
            .iter()
            .filter(|cmd| cmd.starts_with(word))
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: cmd.to_string(),
            })
            .collect();
        Ok((0, matches))
    }
}

/// Session state that outlives a single command: portfolio and quiz answers.
pub struct Session<P: PriceSource> {
    pub config: Config,
    pub market: Market<P>,
    pub quiz: QuizSession,
}

impl<P: PriceSource> Session<P> {
    pub fn new(config: Config, source: P) -> Result<Self> {
        let market = Market::new(config.market_settings(), source)?;
        let quiz = QuizSession::new(config.questions()?)?;
        Ok(Session { config, market, quiz })
    }

    /// Run one command and return what to print. `Home` and `Exit` are
    /// handled by the caller.
    pub fn execute(&mut self, command: ShellCommand) -> Result<String> {
        let output = match command {
            ShellCommand::Home => Dashboard::format_home(&overview::headlines()),
            ShellCommand::Mix(shares) => {
                let mix = cli::build_mix(shares)?;
                match mix.assess() {
                    Ok(report) => Dashboard::format_emissions(&report),
                    Err(SimError::MixSum { total }) => Dashboard::format_mix_warning(total),
                    Err(e) => return Err(e.into()),
                }
            }
            ShellCommand::Footprint(pairs) => {
                let mut values: [Option<i64>; 6] = [None; 6];
                let mut local_food = LocalFoodShare::default();
                for (key, value) in &pairs {
                    let slot = match key.as_str() {
                        "car" => 0,
                        "bus" => 1,
                        "train" => 2,
                        "electricity" => 3,
                        "gas" => 4,
                        "meat" | "meat_meals" => 5,
                        "local_food" | "food" => {
                            local_food = value.parse()?;
                            continue;
                        }
                        other => {
                            return Err(SimError::Parse(format!("unknown footprint input '{}'", other)).into())
                        }
                    };
                    values[slot] = Some(parse_int(value)?);
                }
                let [car, bus, train, electricity, gas, meat] = values;
                let inputs = cli::build_footprint(car, bus, train, electricity, gas, meat, local_food)?;
                Dashboard::format_footprint(&inputs.estimate())
            }
            ShellCommand::Market => format!(
                "{}\n\n{}",
                Dashboard::format_board(&market::market_board()),
                Dashboard::format_portfolio(&self.market.portfolio())
            ),
            ShellCommand::Buy(units) => Dashboard::format_portfolio(&self.market.buy(units)),
            ShellCommand::Advance => Dashboard::format_period(&self.market.advance()),
            ShellCommand::Quiz => Dashboard::format_quiz(&self.quiz),
            ShellCommand::Select { question, option } => {
                self.quiz.select(question, option)?;
                format!("Q{}: option {} selected", question + 1, option + 1)
            }
            ShellCommand::Check(question) => {
                let outcome = self.quiz.check(question)?;
                let mut out = Dashboard::format_check(&outcome);
                if let Some(score) = Dashboard::format_score(&self.quiz) {
                    out.push('\n');
                    out.push_str(&score);
                }
                out
            }
            ShellCommand::Reset => {
                self.quiz.reset();
                self.market.reset();
                "Quiz answers and portfolio reset".to_string()
            }
            ShellCommand::Project { year, scenario } => {
                let year = sliders::YEAR.or_default(year)? as i32;
                Dashboard::format_projection(&project(year, scenario))
            }
            ShellCommand::Help => help_text(),
            ShellCommand::Exit => String::new(),
        };
        Ok(output)
    }
}

fn help_text() -> String {
    [
        format!("{}", "Commands".cyan().bold()),
        "  /home                                   welcome screen".to_string(),
        "  /mix [coal gas nuclear hydro solar wind] generation mix emissions".to_string(),
        "  /footprint [car=N bus=N train=N electricity=N gas=N meat=N food=CAT]".to_string(),
        "  /market                                 market board and portfolio".to_string(),
        "  /buy <units>                            buy carbon credits".to_string(),
        "  /advance                                simulate one market year".to_string(),
        "  /quiz                                   show the quiz".to_string(),
        "  /select <question> <option>             pick an answer".to_string(),
        "  /check <question>                       check an answer".to_string(),
        "  /reset                                  clear quiz and portfolio".to_string(),
        "  /project [year] [scenario]              future projection".to_string(),
        "  /exit                                   leave the shell".to_string(),
    ]
    .join("\n")
}

pub struct ShellMode {
    session: Session<SimRng>,
    editor: Editor<ShellCompleter, DefaultHistory>,
}

impl ShellMode {
    pub fn new(config: Config) -> Result<Self> {
        let rng = SimRng::new(config.market.seed);
        let session = Session::new(config, rng)?;

        let mut editor = Editor::with_config(
            rustyline::Config::builder()
                .tab_stop(4)
                .build()
        )?;
        editor.set_helper(Some(ShellCompleter));

        let history_file = session.config.history_file();
        if history_file.exists() {
            let _ = editor.load_history(&history_file);
        }

        Ok(ShellMode { session, editor })
    }

    pub async fn run(&mut self) -> Result<()> {
        println!("{}", "🌍 Energy Future Simulator".cyan().bold());
        println!("Session started {}", Local::now().format("%Y-%m-%d %H:%M"));
        println!("Type /help for commands, /exit to leave\n");

        loop {
            let line = match self.editor.readline(&format!("{} ", "energy>".green())) {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(e) => return Err(e.into()),
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let _ = self.editor.add_history_entry(line);

            let command = match parse_command(line) {
                Ok(command) => command,
                Err(e) => {
                    println!("{}", format!("❌ {}", e).red());
                    continue;
                }
            };
            debug!(?command, "shell command");

            match command {
                ShellCommand::Exit => break,
                ShellCommand::Home => {
                    let animation = &self.session.config.animation;
                    if animation.enabled {
                        cli::play_transition(Duration::from_millis(animation.step_ms)).await?;
                    }
                    println!("{}", Dashboard::format_home(&overview::headlines()));
                }
                command => match self.session.execute(command) {
                    Ok(output) => println!("{}", output),
                    Err(e) => println!("{}", format!("❌ {}", e).red()),
                },
            }
            println!();
        }

        let history_file = self.session.config.history_file();
        if let Err(e) = self.editor.save_history(&history_file) {
            tracing::warn!(error = %e, "failed to save shell history");
        }
        println!("{}", FOOTER.dimmed());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::market::FixedChange;

    fn session() -> (tempfile::TempDir, Session<FixedChange>) {
        colored::control::set_override(false);
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(Some(dir.path().to_path_buf())).unwrap();
        let session = Session::new(config, FixedChange(5.0)).unwrap();
        (dir, session)
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_command("/market").unwrap(), ShellCommand::Market);
        assert_eq!(parse_command("/buy 20").unwrap(), ShellCommand::Buy(20));
        assert_eq!(
            parse_command("/select 2 1").unwrap(),
            ShellCommand::Select { question: 1, option: 0 }
        );
        assert_eq!(
            parse_command("/project 2040 aggressive").unwrap(),
            ShellCommand::Project { year: Some(2040), scenario: Scenario::Aggressive }
        );
        assert_eq!(
            parse_command("/mix 40 20 10 8 12 10").unwrap(),
            ShellCommand::Mix([Some(40), Some(20), Some(10), Some(8), Some(12), Some(10)])
        );
        assert_eq!(parse_command("/quit").unwrap(), ShellCommand::Exit);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_command("/mix 40 20").is_err());
        assert!(parse_command("/buy").is_err());
        assert!(parse_command("/buy 101").is_err());
        assert!(parse_command("/buy lots").is_err());
        assert!(parse_command("/check 0").is_err());
        assert!(parse_command("/project 2040 moonshot").is_err());
        assert!(parse_command("/teleport").is_err());
        assert!(parse_command("/footprint car").is_err());
    }

    #[test]
    fn test_market_session_flow() {
        let (_dir, mut session) = session();

        let out = session.execute(ShellCommand::Buy(20)).unwrap();
        assert!(out.contains("$9088.00"));

        let out = session.execute(ShellCommand::Advance).unwrap();
        assert!(out.contains("$50.60"));
        assert!(out.contains("$10100.00"));

        // Later buys still go at the listing price
        let out = session.execute(parse_command("/buy 10").unwrap()).unwrap();
        assert!(out.contains("$8632.00"));
        assert!(out.contains("30 units @ $50.60"));
    }

    #[test]
    fn test_quiz_session_flow() {
        let (_dir, mut session) = session();

        assert!(session.execute(ShellCommand::Check(0)).is_err());
        session.execute(ShellCommand::Select { question: 0, option: 1 }).unwrap();

        let out = session.execute(ShellCommand::Check(0)).unwrap();
        assert!(out.contains("Correct!"));
        assert!(out.contains("Your score: 1/3"));

        session.execute(ShellCommand::Check(0)).unwrap();
        assert_eq!(session.quiz.score(), 1);

        session.execute(ShellCommand::Reset).unwrap();
        assert_eq!(session.quiz.score(), 0);
    }

    #[test]
    fn test_unbalanced_mix_warns() {
        let (_dir, mut session) = session();
        let command = parse_command("/mix 40 20 10 8 12 9").unwrap();
        let out = session.execute(command).unwrap();
        assert!(out.contains("99%"));
    }

    #[test]
    fn test_footprint_command() {
        let (_dir, mut session) = session();
        let command = parse_command("/footprint car=100 bus=50 train=30 electricity=300 gas=20 meat=7 food=half").unwrap();
        let out = session.execute(command).unwrap();
        assert!(out.contains("3336 kgCO₂"));
        assert!(out.contains("half"));
    }
}
