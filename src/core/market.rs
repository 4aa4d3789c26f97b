//! Mock carbon-credit market.
//!
//! The only source of randomness in the simulator is the yearly price draw.
//! It goes through [`PriceSource`] so sessions can be seeded and tests can
//! force an exact price change.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, warn};

use super::error::{Result, SimError};

pub const STARTING_CASH: f64 = 10_000.0;
pub const UNIT_PRICE: f64 = 45.60;
pub const PRICE_CHANGE_MIN: f64 = -10.0;
pub const PRICE_CHANGE_MAX: f64 = 20.0;

/// Draws the price change for one simulated period.
pub trait PriceSource {
    fn draw_change(&mut self, min: f64, max: f64) -> f64;
}

/// Seedable ChaCha8 generator, identical seeds give identical markets.
pub struct SimRng(pub ChaCha8Rng);

impl SimRng {
    pub fn from_seed_u64(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self(ChaCha8Rng::from_entropy())
    }

    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed_u64(seed),
            None => Self::from_entropy(),
        }
    }
}

impl PriceSource for SimRng {
    fn draw_change(&mut self, min: f64, max: f64) -> f64 {
        self.0.gen_range(min..=max)
    }
}

/// Always returns the same change. Useful for replaying a known scenario.
#[derive(Debug, Clone, Copy)]
pub struct FixedChange(pub f64);

impl PriceSource for FixedChange {
    fn draw_change(&mut self, _min: f64, _max: f64) -> f64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarketSettings {
    pub starting_cash: f64,
    pub unit_price: f64,
    pub price_change_min: f64,
    pub price_change_max: f64,
}

impl Default for MarketSettings {
    fn default() -> Self {
        Self {
            starting_cash: STARTING_CASH,
            unit_price: UNIT_PRICE,
            price_change_min: PRICE_CHANGE_MIN,
            price_change_max: PRICE_CHANGE_MAX,
        }
    }
}

impl MarketSettings {
    pub fn validate(&self) -> Result<()> {
        let bounds = [
            ("starting_cash", self.starting_cash),
            ("unit_price", self.unit_price),
            ("price_change_min", self.price_change_min),
            ("price_change_max", self.price_change_max),
        ];
        if let Some((name, value)) = bounds.iter().find(|(_, v)| !v.is_finite()) {
            return Err(SimError::Config(format!("{} must be a finite number, got {}", name, value)));
        }
        if !(self.price_change_max - self.price_change_min).is_finite() {
            return Err(SimError::Config(format!(
                "price change range {}..{} is too wide",
                self.price_change_min, self.price_change_max
            )));
        }
        if !(self.price_change_min < self.price_change_max) {
            return Err(SimError::Config(format!(
                "price_change_min ({}) must be below price_change_max ({})",
                self.price_change_min, self.price_change_max
            )));
        }
        if self.unit_price <= 0.0 {
            return Err(SimError::Config(format!(
                "unit_price must be positive, got {}",
                self.unit_price
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Portfolio {
    pub cash: f64,
    pub credits: u32,
    pub price: f64,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PeriodOutcome {
    pub period: u32,
    pub price_change: f64,
    pub new_price: f64,
    pub portfolio_value: f64,
    pub gain: f64,
}

/// Static market board shown above the portfolio.
#[derive(Debug, Clone, Serialize)]
pub struct BoardEntry {
    pub label: &'static str,
    pub value: &'static str,
    pub delta: &'static str,
}

pub fn market_board() -> Vec<BoardEntry> {
    vec![
        BoardEntry { label: "Credit price", value: "$45.60", delta: "+$2.30" },
        BoardEntry { label: "Volume", value: "1.2M", delta: "+150K" },
        BoardEntry { label: "Sentiment", value: "Bullish", delta: "" },
    ]
}

pub struct Market<P: PriceSource> {
    settings: MarketSettings,
    cash: f64,
    credits: u32,
    price: f64,
    period: u32,
    source: P,
}

impl<P: PriceSource> Market<P> {
    pub fn new(settings: MarketSettings, source: P) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            cash: settings.starting_cash,
            credits: 0,
            price: settings.unit_price,
            period: 0,
            settings,
            source,
        })
    }

    pub fn cash(&self) -> f64 {
        self.cash
    }

    pub fn credits(&self) -> u32 {
        self.credits
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    /// Buy `units` credits at the listing price, whatever the market has
    /// done since. Cash is not floored.
    pub fn buy(&mut self, units: u32) -> Portfolio {
        self.cash -= units as f64 * self.settings.unit_price;
        self.credits = self.credits.saturating_add(units);

        if self.cash < 0.0 {
            warn!(cash = self.cash, credits = self.credits, "portfolio cash went negative");
        }
        debug!(units, cash = self.cash, "bought credits");

        self.portfolio()
    }

    /// Simulate one year of trading: move the price and revalue holdings.
    pub fn advance(&mut self) -> PeriodOutcome {
        let price_change = self
            .source
            .draw_change(self.settings.price_change_min, self.settings.price_change_max);
        self.price += price_change;
        self.period += 1;

        let portfolio_value = self.value();
        let outcome = PeriodOutcome {
            period: self.period,
            price_change,
            new_price: self.price,
            portfolio_value,
            gain: portfolio_value - self.settings.starting_cash,
        };
        debug!(?outcome, "advanced market");
        outcome
    }

    pub fn value(&self) -> f64 {
        self.cash + self.credits as f64 * self.price
    }

    pub fn portfolio(&self) -> Portfolio {
        Portfolio {
            cash: self.cash,
            credits: self.credits,
            price: self.price,
            value: self.value(),
        }
    }

    /// Back to the starting cash and listing price.
    pub fn reset(&mut self) {
        self.cash = self.settings.starting_cash;
        self.credits = 0;
        self.price = self.settings.unit_price;
        self.period = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_buy_then_advance() {
        let mut market = Market::new(MarketSettings::default(), FixedChange(5.0)).unwrap();

        let portfolio = market.buy(20);
        assert!((portfolio.cash - 9088.0).abs() < EPS);
        assert_eq!(portfolio.credits, 20);

        let outcome = market.advance();
        assert_eq!(outcome.period, 1);
        assert!((outcome.new_price - 50.60).abs() < EPS);
        assert!((outcome.portfolio_value - 10100.0).abs() < EPS);
        assert!((outcome.gain - 100.0).abs() < EPS);
    }

    #[test]
    fn test_buy_after_advance_uses_listing_price() {
        let mut market = Market::new(MarketSettings::default(), FixedChange(5.0)).unwrap();
        market.buy(10);
        market.advance();
        let portfolio = market.buy(10);
        assert!((portfolio.cash - 9088.0).abs() < EPS);
        assert_eq!(portfolio.credits, 20);
        assert!((portfolio.price - 50.60).abs() < EPS);
    }

    #[test]
    fn test_buy_at_negative_market_price_still_costs_cash() {
        let mut market = Market::new(MarketSettings::default(), FixedChange(-10.0)).unwrap();
        for _ in 0..5 {
            market.advance();
        }
        assert!(market.price() < 0.0);
        let portfolio = market.buy(10);
        assert!((portfolio.cash - (10_000.0 - 456.0)).abs() < EPS);
    }

    #[test]
    fn test_credit_count_saturates() {
        let mut market = Market::new(MarketSettings::default(), FixedChange(0.0)).unwrap();
        market.buy(u32::MAX);
        let portfolio = market.buy(1);
        assert_eq!(portfolio.credits, u32::MAX);
    }

    #[test]
    fn test_buy_accumulates() {
        let mut market = Market::new(MarketSettings::default(), FixedChange(0.0)).unwrap();
        market.buy(10);
        market.buy(5);
        assert_eq!(market.credits(), 15);
        assert!((market.cash() - (10_000.0 - 15.0 * 45.60)).abs() < EPS);
    }

    #[test]
    fn test_cash_is_not_floored() {
        let settings = MarketSettings { starting_cash: 100.0, ..MarketSettings::default() };
        let mut market = Market::new(settings, FixedChange(0.0)).unwrap();
        let portfolio = market.buy(10);
        assert!(portfolio.cash < 0.0);
        assert_eq!(portfolio.credits, 10);
    }

    #[test]
    fn test_price_walk_persists() {
        let mut market = Market::new(MarketSettings::default(), FixedChange(-10.0)).unwrap();
        market.advance();
        let second = market.advance();
        assert_eq!(second.period, 2);
        assert!((second.new_price - 25.60).abs() < EPS);
    }

    #[test]
    fn test_seeded_draws_are_in_range_and_repeatable() {
        let mut a = SimRng::from_seed_u64(7);
        let mut b = SimRng::from_seed_u64(7);
        for _ in 0..200 {
            let x = a.draw_change(PRICE_CHANGE_MIN, PRICE_CHANGE_MAX);
            let y = b.draw_change(PRICE_CHANGE_MIN, PRICE_CHANGE_MAX);
            assert_eq!(x, y);
            assert!((PRICE_CHANGE_MIN..=PRICE_CHANGE_MAX).contains(&x));
        }
    }

    #[test]
    fn test_reset() {
        let mut market = Market::new(MarketSettings::default(), FixedChange(3.0)).unwrap();
        market.buy(20);
        market.advance();
        market.reset();
        assert_eq!(market.credits(), 0);
        assert_eq!(market.cash(), 10_000.0);
        assert_eq!(market.price(), 45.60);
    }

    #[test]
    fn test_invalid_settings() {
        let settings = MarketSettings {
            price_change_min: 5.0,
            price_change_max: 5.0,
            ..MarketSettings::default()
        };
        assert!(matches!(
            Market::new(settings, FixedChange(0.0)),
            Err(SimError::Config(_))
        ));
    }

    #[test]
    fn test_rejects_non_finite_settings() {
        let too_wide = MarketSettings {
            price_change_min: -1e308,
            price_change_max: 1e308,
            ..MarketSettings::default()
        };
        assert!(matches!(too_wide.validate(), Err(SimError::Config(_))));
        assert!(Market::new(too_wide, SimRng::from_seed_u64(1)).is_err());

        let infinite_cash = MarketSettings { starting_cash: f64::INFINITY, ..MarketSettings::default() };
        assert!(infinite_cash.validate().is_err());

        let nan_price = MarketSettings { unit_price: f64::NAN, ..MarketSettings::default() };
        assert!(nan_price.validate().is_err());
    }
}
