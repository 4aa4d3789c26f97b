use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Generation shares add up to {total}%, adjust them to 100%")]
    MixSum { total: u32 },

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: u32,
        max: u32,
    },

    #[error("Unknown scenario: {0} (expected baseline, aggressive or breakthrough)")]
    UnknownScenario(String),

    #[error("Unknown local food share: {0} (expected rarely, some, half, mostly or all)")]
    UnknownFoodShare(String),

    #[error("Question {0} does not exist")]
    UnknownQuestion(usize),

    #[error("Question {question} has no option {option}")]
    UnknownOption { question: usize, option: usize },

    #[error("Question {0} has no selected answer yet")]
    Unanswered(usize),

    #[error("Invalid question bank: {0}")]
    InvalidQuestionBank(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
