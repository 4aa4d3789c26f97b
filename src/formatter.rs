use colored::*;

use crate::core::footprint::FootprintReport;
use crate::core::generation::EmissionReport;
use crate::core::market::{BoardEntry, PeriodOutcome, Portfolio};
use crate::core::overview::Headline;
use crate::core::projection::Projection;
use crate::core::quiz::{CheckOutcome, QuizSession};

pub const FOOTER: &str = "🌱 For educational use only, figures are simplified estimates.";

fn metric(label: &str, value: &str, delta: &str) -> String {
    if delta.is_empty() {
        format!("  {:<20} {}", label, value.bold())
    } else if delta.starts_with('-') {
        format!("  {:<20} {} ({})", label, value.bold(), delta.red())
    } else {
        format!("  {:<20} {} ({})", label, value.bold(), delta.green())
    }
}

/// Terminal rendering for every dashboard screen.
pub struct Dashboard;

impl Dashboard {
    pub fn format_home(headlines: &[Headline]) -> String {
        let mut out = vec![format!("{}", "🏠 Welcome to the Energy Future Simulator".cyan().bold())];
        for h in headlines {
            out.push(metric(h.label, h.value, h.delta));
        }
        out.push(String::new());
        out.push("Explore: mix, footprint, market, quiz, project".to_string());
        out.join("\n")
    }

    pub fn format_emissions(report: &EmissionReport) -> String {
        let mut out = vec![format!("{}", "⚡ Generation Mix".cyan().bold())];
        for share in &report.shares {
            let bar = "█".repeat((share.percent / 2) as usize);
            out.push(format!("  {:<8} {:>3}% {}", share.source.label(), share.percent, bar));
        }
        out.push(String::new());
        out.push(format!("{}", "Environmental impact".cyan()));
        out.push(metric("Carbon intensity", &format!("{:.2} kgCO₂/kWh", report.intensity), ""));
        out.push(metric("Annual emissions", &format!("{:.0} t", report.annual_emissions), ""));
        out.push(metric("Trees equivalent", &format!("{:.0} trees", report.trees_equivalent), ""));
        out.join("\n")
    }

    pub fn format_mix_warning(total: u32) -> String {
        format!(
            "{}",
            format!("⚠️  Generation shares add up to {}%, adjust them to 100%", total).yellow()
        )
    }

    pub fn format_footprint(report: &FootprintReport) -> String {
        let mut out = vec![format!("{}", "👣 Personal Carbon Footprint".cyan().bold())];
        out.push(format!("  Transport  {:>10.1} kgCO₂", report.transport));
        out.push(format!("  Energy     {:>10.1} kgCO₂", report.energy));
        out.push(format!("  Food       {:>10.1} kgCO₂", report.food));
        out.push(format!("  Local food {:>10}", report.local_food.to_string()));
        out.push(String::new());
        out.push(format!(
            "{}",
            format!("Your estimated annual footprint: {:.0} kgCO₂", report.total).green().bold()
        ));
        out.push("Comparison:".to_string());
        for b in &report.benchmarks {
            out.push(format!("  - {}: ~{:.0} kgCO₂", b.label, b.kg_co2));
        }
        out.join("\n")
    }

    pub fn format_board(board: &[BoardEntry]) -> String {
        let mut out = vec![format!("{}", "💰 Carbon Credit Market".cyan().bold())];
        for entry in board {
            out.push(metric(entry.label, entry.value, entry.delta));
        }
        out.join("\n")
    }

    pub fn format_portfolio(portfolio: &Portfolio) -> String {
        [
            format!("{}", "Your portfolio".cyan()),
            format!("  Cash balance: ${:.2}", portfolio.cash),
            format!("  Credits held: {} units @ ${:.2}", portfolio.credits, portfolio.price),
            format!("  Value:        ${:.2}", portfolio.value),
        ]
        .join("\n")
    }

    pub fn format_period(outcome: &PeriodOutcome) -> String {
        let change = format!("{:+.2}", outcome.price_change);
        let gain = format!("{:+.2}", outcome.gain);
        [
            format!("{}", format!("📈 Year {} of trading", outcome.period).cyan()),
            metric("New credit price", &format!("${:.2}", outcome.new_price), &change),
            metric("Portfolio value", &format!("${:.2}", outcome.portfolio_value), &gain),
        ]
        .join("\n")
    }

    pub fn format_quiz(quiz: &QuizSession) -> String {
        let mut out = vec![format!("{}", "❓ Energy Knowledge Challenge".cyan().bold())];
        for (i, q) in quiz.questions().iter().enumerate() {
            out.push(format!("{} {}", format!("Q{}.", i + 1).bold(), q.prompt));
            for (j, option) in q.options.iter().enumerate() {
                let marker = if quiz.selection(i) == Some(j) { "●" } else { "○" };
                out.push(format!("    {} {}. {}", marker, j + 1, option));
            }
        }
        if let Some(line) = Self::format_score(quiz) {
            out.push(String::new());
            out.push(line);
        }
        out.join("\n")
    }

    pub fn format_check(outcome: &CheckOutcome) -> String {
        let verdict = if outcome.correct {
            format!("{}", "✅ Correct!".green())
        } else {
            format!("{}", "❌ Wrong!".red())
        };
        format!(
            "Q{}: {}\n  Correct answer: {}",
            outcome.question + 1,
            verdict,
            outcome.correct_answer
        )
    }

    /// Score line, shown only once something has been answered correctly.
    pub fn format_score(quiz: &QuizSession) -> Option<String> {
        if quiz.score() == 0 {
            return None;
        }
        Some(format!(
            "{}",
            format!("Your score: {}/{}", quiz.score(), quiz.len()).green().bold()
        ))
    }

    pub fn format_projection(p: &Projection) -> String {
        [
            format!("{}", format!("📊 {} projection", p.year).cyan().bold()),
            metric("Renewable share", &format!("{:.1}%", p.renewable_share), ""),
            metric("Coal share", &format!("{:.1}%", p.coal_share), ""),
            metric("Emissions cut", &format!("{:.1}%", p.emissions_reduction), ""),
            String::new(),
            format!(
                "ℹ️  Under the {} scenario renewables could gain an extra {:.0}%",
                p.scenario.description(),
                p.scenario_bonus
            ),
        ]
        .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::footprint::{FootprintInputs, LocalFoodShare};
    use crate::core::generation::GenerationMix;
    use crate::core::projection::{project, Scenario};
    use crate::core::quiz::default_questions;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_format_emissions() {
        plain();
        let mix = GenerationMix { coal: 40, gas: 20, nuclear: 10, hydro: 8, solar: 12, wind: 10 };
        let text = Dashboard::format_emissions(&mix.assess().unwrap());
        assert!(text.contains("47.92 kgCO₂/kWh"));
        assert!(text.contains("Coal"));
    }

    #[test]
    fn test_format_footprint() {
        plain();
        let inputs = FootprintInputs {
            car_km: 100,
            bus_km: 50,
            train_km: 30,
            electricity_kwh: 300,
            gas_m3: 20,
            meat_meals: 7,
            local_food: LocalFoodShare::Occasional,
        };
        let text = Dashboard::format_footprint(&inputs.estimate());
        assert!(text.contains("3336 kgCO₂"));
        assert!(text.contains("~10000 kgCO₂"));
    }

    #[test]
    fn test_score_hidden_until_positive() {
        plain();
        let mut quiz = QuizSession::new(default_questions()).unwrap();
        assert!(Dashboard::format_score(&quiz).is_none());

        quiz.select(0, 1).unwrap();
        quiz.check(0).unwrap();
        assert_eq!(Dashboard::format_score(&quiz).unwrap(), "Your score: 1/3");
        assert!(Dashboard::format_quiz(&quiz).contains("● 2. Yes, at reduced efficiency"));
    }

    #[test]
    fn test_format_projection() {
        plain();
        let text = Dashboard::format_projection(&project(2050, Scenario::Breakthrough));
        assert!(text.contains("57.5%"));
        assert!(text.contains("extra 25%"));
    }
}
