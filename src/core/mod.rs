pub mod error;
pub mod footprint;
pub mod generation;
pub mod market;
pub mod overview;
pub mod projection;
pub mod quiz;
pub mod sliders;

pub use error::{Result, SimError};
pub use footprint::{FootprintInputs, FootprintReport, LocalFoodShare};
pub use generation::{EmissionReport, GenerationMix, Source};
pub use market::{FixedChange, Market, MarketSettings, PeriodOutcome, Portfolio, PriceSource, SimRng};
pub use overview::{Headline, TransitionStage};
pub use projection::{project, Projection, Scenario};
pub use quiz::{CheckOutcome, Question, QuizSession};
pub use sliders::Slider;
