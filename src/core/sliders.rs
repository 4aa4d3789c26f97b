use super::error::{Result, SimError};

/// Bounded integer input, mirroring a dashboard slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slider {
    pub name: &'static str,
    pub min: u32,
    pub max: u32,
    pub default: u32,
}

impl Slider {
    pub const fn new(name: &'static str, min: u32, max: u32, default: u32) -> Self {
        Self { name, min, max, default }
    }

    /// Accept `value` if it lies inside the slider range.
    pub fn check(&self, value: i64) -> Result<u32> {
        if value < self.min as i64 || value > self.max as i64 {
            return Err(SimError::OutOfRange {
                field: self.name,
                value,
                min: self.min,
                max: self.max,
            });
        }
        Ok(value as u32)
    }

    /// Parse a textual value and check it.
    pub fn parse(&self, raw: &str) -> Result<u32> {
        let value: i64 = raw
            .trim()
            .parse()
            .map_err(|_| SimError::Parse(format!("{} expects a whole number, got '{}'", self.name, raw)))?;
        self.check(value)
    }

    /// Check an optional value, falling back to the slider default.
    pub fn or_default(&self, value: Option<i64>) -> Result<u32> {
        match value {
            Some(v) => self.check(v),
            None => Ok(self.default),
        }
    }
}

// Generation mix (%)
pub const COAL: Slider = Slider::new("coal", 0, 100, 40);
pub const GAS: Slider = Slider::new("gas", 0, 100, 20);
pub const NUCLEAR: Slider = Slider::new("nuclear", 0, 100, 10);
pub const HYDRO: Slider = Slider::new("hydro", 0, 100, 8);
pub const SOLAR: Slider = Slider::new("solar", 0, 100, 12);
pub const WIND: Slider = Slider::new("wind", 0, 100, 10);

// Footprint
pub const CAR_KM: Slider = Slider::new("car km per week", 0, 500, 100);
pub const BUS_KM: Slider = Slider::new("bus km per week", 0, 300, 50);
pub const TRAIN_KM: Slider = Slider::new("train km per week", 0, 200, 30);
pub const ELECTRICITY_KWH: Slider = Slider::new("electricity kWh per month", 0, 1000, 300);
pub const GAS_M3: Slider = Slider::new("gas m3 per month", 0, 100, 20);
pub const MEAT_MEALS: Slider = Slider::new("meat meals per week", 0, 21, 7);

// Market
pub const CREDITS: Slider = Slider::new("carbon credits", 0, 100, 20);

// Projection
pub const YEAR: Slider = Slider::new("projection year", 2025, 2050, 2035);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_bounds() {
        assert_eq!(CAR_KM.check(0).unwrap(), 0);
        assert_eq!(CAR_KM.check(500).unwrap(), 500);
        assert!(CAR_KM.check(501).is_err());
        assert!(CAR_KM.check(-1).is_err());
    }

    #[test]
    fn test_out_of_range_names_field() {
        let err = YEAR.check(2051).unwrap_err();
        match err {
            SimError::OutOfRange { field, value, min, max } => {
                assert_eq!(field, "projection year");
                assert_eq!(value, 2051);
                assert_eq!((min, max), (2025, 2050));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_and_default() {
        assert_eq!(MEAT_MEALS.parse(" 14 ").unwrap(), 14);
        assert!(matches!(MEAT_MEALS.parse("many"), Err(SimError::Parse(_))));
        assert_eq!(YEAR.or_default(None).unwrap(), 2035);
        assert_eq!(YEAR.or_default(Some(2040)).unwrap(), 2040);
    }

    #[test]
    fn test_default_mix_is_balanced() {
        let total: u32 = [COAL, GAS, NUCLEAR, HYDRO, SOLAR, WIND]
            .iter()
            .map(|s| s.default)
            .sum();
        assert_eq!(total, 100);
    }
}
