use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use super::error::SimError;

pub const WEEKS_PER_YEAR: f64 = 52.0;

const CAR_KG_PER_KM: f64 = 0.2;
const BUS_KG_PER_KM: f64 = 0.08;
const TRAIN_KG_PER_KM: f64 = 0.05;
const ELECTRICITY_KG_PER_KWH: f64 = 0.5;
const GAS_KG_PER_M3: f64 = 2.0;
const KG_PER_MEAT_MEAL: f64 = 5.0;

/// Reference per-capita footprint (kgCO2/year).
pub const REGIONAL_AVERAGE: f64 = 10_000.0;
/// Per-capita footprint compatible with climate targets (kgCO2/year).
pub const GLOBAL_TARGET: f64 = 2_000.0;

/// How much of the diet is locally sourced. Recorded but not part of the estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocalFoodShare {
    #[default]
    Rarely,
    #[serde(rename = "some")]
    Occasional,
    Half,
    Mostly,
    All,
}

impl LocalFoodShare {
    pub const ALL: [LocalFoodShare; 5] = [
        LocalFoodShare::Rarely,
        LocalFoodShare::Occasional,
        LocalFoodShare::Half,
        LocalFoodShare::Mostly,
        LocalFoodShare::All,
    ];
}

impl fmt::Display for LocalFoodShare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocalFoodShare::Rarely => write!(f, "rarely"),
            LocalFoodShare::Occasional => write!(f, "some"),
            LocalFoodShare::Half => write!(f, "half"),
            LocalFoodShare::Mostly => write!(f, "mostly"),
            LocalFoodShare::All => write!(f, "all"),
        }
    }
}

impl FromStr for LocalFoodShare {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LocalFoodShare::ALL
            .iter()
            .find(|c| c.to_string() == s.trim().to_lowercase())
            .copied()
            .ok_or_else(|| SimError::UnknownFoodShare(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FootprintInputs {
    pub car_km: u32,
    pub bus_km: u32,
    pub train_km: u32,
    pub electricity_kwh: u32,
    pub gas_m3: u32,
    pub meat_meals: u32,
    pub local_food: LocalFoodShare,
}

#[derive(Debug, Clone, Serialize)]
pub struct Benchmark {
    pub label: &'static str,
    pub kg_co2: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FootprintReport {
    pub transport: f64,
    pub energy: f64,
    pub food: f64,
    pub total: f64,
    pub local_food: LocalFoodShare,
    pub benchmarks: Vec<Benchmark>,
}

impl FootprintInputs {
    /// Annual kgCO2 estimate. All inputs come pre-bounded, so this never fails.
    pub fn estimate(&self) -> FootprintReport {
        let transport = (self.car_km as f64 * CAR_KG_PER_KM
            + self.bus_km as f64 * BUS_KG_PER_KM
            + self.train_km as f64 * TRAIN_KG_PER_KM)
            * WEEKS_PER_YEAR;
        let energy = self.electricity_kwh as f64 * ELECTRICITY_KG_PER_KWH
            + self.gas_m3 as f64 * GAS_KG_PER_M3;
        let food = self.meat_meals as f64 * KG_PER_MEAT_MEAL * WEEKS_PER_YEAR;
        let total = transport + energy + food;

        debug!(transport, energy, food, total, "estimated footprint");

        FootprintReport {
            transport,
            energy,
            food,
            total,
            local_food: self.local_food,
            benchmarks: vec![
                Benchmark { label: "Regional per-capita average", kg_co2: REGIONAL_AVERAGE },
                Benchmark { label: "Global per-capita target", kg_co2: GLOBAL_TARGET },
            ],
        }
    }
}
