use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use anyhow::{anyhow, Result};
use colored::*;

use crate::config::Config;
use crate::core::footprint::{FootprintInputs, LocalFoodShare};
use crate::core::generation::GenerationMix;
use crate::core::market::{self, Market, SimRng};
use crate::core::overview::{self, TransitionStage, ANIMATION_STEPS};
use crate::core::projection::{project, Scenario};
use crate::core::quiz::QuizSession;
use crate::core::sliders;
use crate::core::SimError;
use crate::formatter::Dashboard;
use crate::report::{emit, OutputFormat};

pub use commands::{Args, Commands};

mod commands;

pub async fn handle_home(no_animation: bool, format: OutputFormat, data_dir: Option<PathBuf>) -> Result<()> {
    let config = Config::new(data_dir)?;
    let headlines = overview::headlines();

    if format == OutputFormat::Table && config.animation.enabled && !no_animation {
        play_transition(Duration::from_millis(config.animation.step_ms)).await?;
    }

    emit(format, "home", &headlines, || Dashboard::format_home(&headlines))
}

/// Progress animation for the home screen.
pub async fn play_transition(step: Duration) -> Result<()> {
    let mut stdout = std::io::stdout();
    for i in 0..ANIMATION_STEPS {
        let done = ((i + 1) * 40 / ANIMATION_STEPS) as usize;
        let bar = format!("{}{}", "█".repeat(done), "░".repeat(40 - done));
        print!("\r{} {:>3}% {:<32}", bar, i + 1, TransitionStage::at_step(i).message());
        stdout.flush()?;
        if !step.is_zero() {
            tokio::time::sleep(step).await;
        }
    }
    println!("\r{:<80}", "");
    println!("{}", format!("✅ {}", overview::COMPLETION_MESSAGE).green());
    Ok(())
}

pub fn build_mix(shares: [Option<i64>; 6]) -> Result<GenerationMix, SimError> {
    let [coal, gas, nuclear, hydro, solar, wind] = shares;
    Ok(GenerationMix {
        coal: sliders::COAL.or_default(coal)?,
        gas: sliders::GAS.or_default(gas)?,
        nuclear: sliders::NUCLEAR.or_default(nuclear)?,
        hydro: sliders::HYDRO.or_default(hydro)?,
        solar: sliders::SOLAR.or_default(solar)?,
        wind: sliders::WIND.or_default(wind)?,
    })
}

pub fn handle_mix(shares: [Option<i64>; 6], format: OutputFormat) -> Result<()> {
    let mix = build_mix(shares)?;

    match mix.assess() {
        Ok(report) => emit(format, "mix", &report, || Dashboard::format_emissions(&report)),
        // Not fatal: the user just has to rebalance the shares
        Err(SimError::MixSum { total }) => {
            match format {
                OutputFormat::Table => println!("{}", Dashboard::format_mix_warning(total)),
                OutputFormat::Json => {
                    let warning = serde_json::json!({ "warning": "unbalanced_mix", "total": total });
                    emit(format, "mix", &warning, String::new)?;
                }
            }
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

pub fn build_footprint(
    car: Option<i64>,
    bus: Option<i64>,
    train: Option<i64>,
    electricity: Option<i64>,
    gas: Option<i64>,
    meat_meals: Option<i64>,
    local_food: LocalFoodShare,
) -> Result<FootprintInputs, SimError> {
    Ok(FootprintInputs {
        car_km: sliders::CAR_KM.or_default(car)?,
        bus_km: sliders::BUS_KM.or_default(bus)?,
        train_km: sliders::TRAIN_KM.or_default(train)?,
        electricity_kwh: sliders::ELECTRICITY_KWH.or_default(electricity)?,
        gas_m3: sliders::GAS_M3.or_default(gas)?,
        meat_meals: sliders::MEAT_MEALS.or_default(meat_meals)?,
        local_food,
    })
}

pub fn handle_footprint(inputs: FootprintInputs, format: OutputFormat) -> Result<()> {
    let report = inputs.estimate();
    emit(format, "footprint", &report, || Dashboard::format_footprint(&report))
}

pub fn handle_market(
    buy: Option<i64>,
    years: u32,
    seed: Option<u64>,
    format: OutputFormat,
    data_dir: Option<PathBuf>,
) -> Result<()> {
    let config = Config::new(data_dir)?;
    let units = sliders::CREDITS.or_default(buy)?;
    let rng = SimRng::new(seed.or(config.market.seed));
    let mut market = Market::new(config.market_settings(), rng)?;

    let portfolio = market.buy(units);
    let periods: Vec<_> = (0..years).map(|_| market.advance()).collect();

    let result = serde_json::json!({
        "board": market::market_board(),
        "portfolio": portfolio,
        "periods": periods,
    });
    emit(format, "market", &result, || {
        let mut out = vec![
            Dashboard::format_board(&market::market_board()),
            String::new(),
            Dashboard::format_portfolio(&portfolio),
        ];
        for period in &periods {
            out.push(String::new());
            out.push(Dashboard::format_period(period));
        }
        out.join("\n")
    })
}

/// Parse a 1-based `question=option` pair into 0-based indices.
pub fn parse_answer(raw: &str) -> Result<(usize, usize), SimError> {
    let (q, o) = raw
        .split_once('=')
        .ok_or_else(|| SimError::Parse(format!("expected question=option, got '{}'", raw)))?;
    let parse_index = |s: &str| -> Result<usize, SimError> {
        match s.trim().parse::<usize>() {
            Ok(n) if n >= 1 => Ok(n - 1),
            _ => Err(SimError::Parse(format!("'{}' is not a 1-based number", s))),
        }
    };
    Ok((parse_index(q)?, parse_index(o)?))
}

pub fn handle_quiz(answers: &[String], format: OutputFormat, data_dir: Option<PathBuf>) -> Result<()> {
    let config = Config::new(data_dir)?;
    let mut quiz = QuizSession::new(config.questions()?)?;

    let mut outcomes = Vec::new();
    for raw in answers {
        let (question, option) = parse_answer(raw)?;
        quiz.select(question, option)?;
        outcomes.push(quiz.check(question)?);
    }

    let result = serde_json::json!({
        "questions": quiz.questions(),
        "outcomes": outcomes,
        "score": quiz.score(),
        "total": quiz.len(),
    });
    emit(format, "quiz", &result, || {
        if outcomes.is_empty() {
            return Dashboard::format_quiz(&quiz);
        }
        let mut out: Vec<String> = outcomes.iter().map(Dashboard::format_check).collect();
        if let Some(score) = Dashboard::format_score(&quiz) {
            out.push(score);
        }
        out.join("\n")
    })
}

pub fn handle_project(year: Option<i64>, scenario: Scenario, format: OutputFormat) -> Result<()> {
    let year = sliders::YEAR.or_default(year)?;
    let year = i32::try_from(year).map_err(|_| anyhow!("year {} does not fit", year))?;
    let projection = project(year, scenario);
    emit(format, "project", &projection, || Dashboard::format_projection(&projection))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_mix_uses_defaults() {
        let mix = build_mix([None; 6]).unwrap();
        assert_eq!(mix.total(), 100);

        let mix = build_mix([Some(50), None, None, None, None, Some(0)]).unwrap();
        assert_eq!(mix.coal, 50);
        assert_eq!(mix.wind, 0);
        assert_eq!(mix.total(), 100);
    }

    #[test]
    fn test_build_mix_rejects_out_of_range() {
        assert!(matches!(
            build_mix([Some(101), None, None, None, None, None]),
            Err(SimError::OutOfRange { field: "coal", .. })
        ));
    }

    #[test]
    fn test_build_footprint_bounds() {
        let inputs = build_footprint(None, None, None, None, None, None, LocalFoodShare::Half).unwrap();
        assert_eq!(inputs.car_km, 100);
        assert_eq!(inputs.meat_meals, 7);
        assert!(build_footprint(None, None, None, None, None, Some(22), LocalFoodShare::Half).is_err());
    }

    #[test]
    fn test_parse_answer() {
        assert_eq!(parse_answer("1=2").unwrap(), (0, 1));
        assert_eq!(parse_answer(" 3 = 1 ").unwrap(), (2, 0));
        assert!(parse_answer("0=1").is_err());
        assert!(parse_answer("12").is_err());
    }
}
