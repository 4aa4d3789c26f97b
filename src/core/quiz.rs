use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use super::error::{Result, SimError};

pub const OPTIONS_PER_QUESTION: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub prompt: String,
    pub options: Vec<String>,
    pub answer: usize,
}

impl Question {
    pub fn new(prompt: &str, options: [&str; OPTIONS_PER_QUESTION], answer: usize) -> Self {
        Self {
            prompt: prompt.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            answer,
        }
    }

    pub fn correct_option(&self) -> &str {
        &self.options[self.answer]
    }

    fn validate(&self, index: usize) -> Result<()> {
        if self.options.len() != OPTIONS_PER_QUESTION {
            return Err(SimError::InvalidQuestionBank(format!(
                "question {} has {} options, expected {}",
                index + 1,
                self.options.len(),
                OPTIONS_PER_QUESTION
            )));
        }
        if self.answer >= self.options.len() {
            return Err(SimError::InvalidQuestionBank(format!(
                "question {} points at option {} which does not exist",
                index + 1,
                self.answer + 1
            )));
        }
        Ok(())
    }
}

pub fn default_questions() -> Vec<Question> {
    vec![
        Question::new(
            "Can solar panels generate electricity on cloudy days?",
            [
                "Not at all",
                "Yes, at reduced efficiency",
                "Yes, more efficiently than on sunny days",
            ],
            1,
        ),
        Question::new(
            "Which of these sources has the highest carbon emissions?",
            ["Wind power", "Coal power", "Nuclear power"],
            1,
        ),
        Question::new(
            "What is the main purpose of carbon trading?",
            [
                "Making a profit",
                "Reducing greenhouse gas emissions",
                "Promoting international trade",
            ],
            1,
        ),
    ]
}

/// Read a question bank from a JSON array of questions.
pub fn load_questions(path: &Path) -> Result<Vec<Question>> {
    let raw = std::fs::read_to_string(path)?;
    let questions: Vec<Question> = serde_json::from_str(&raw)?;
    if questions.is_empty() {
        return Err(SimError::InvalidQuestionBank(format!(
            "{} contains no questions",
            path.display()
        )));
    }
    for (i, question) in questions.iter().enumerate() {
        question.validate(i)?;
    }
    Ok(questions)
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckOutcome {
    pub question: usize,
    pub correct: bool,
    pub correct_answer: String,
    /// Whether this check added to the score.
    pub scored: bool,
    pub score: u32,
}

/// Answers and score for one quiz run. Questions are addressed 0-based.
#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Vec<Question>,
    selections: Vec<Option<usize>>,
    scored: Vec<bool>,
    score: u32,
}

impl QuizSession {
    pub fn new(questions: Vec<Question>) -> Result<Self> {
        for (i, question) in questions.iter().enumerate() {
            question.validate(i)?;
        }
        let n = questions.len();
        Ok(Self {
            questions,
            selections: vec![None; n],
            scored: vec![false; n],
            score: 0,
        })
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn selection(&self, question: usize) -> Option<usize> {
        self.selections.get(question).copied().flatten()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn select(&mut self, question: usize, option: usize) -> Result<()> {
        let q = self
            .questions
            .get(question)
            .ok_or(SimError::UnknownQuestion(question + 1))?;
        if option >= q.options.len() {
            return Err(SimError::UnknownOption {
                question: question + 1,
                option: option + 1,
            });
        }
        self.selections[question] = Some(option);
        Ok(())
    }

    /// Grade the selected answer. A question only scores once per run.
    pub fn check(&mut self, question: usize) -> Result<CheckOutcome> {
        let q = self
            .questions
            .get(question)
            .ok_or(SimError::UnknownQuestion(question + 1))?;
        let selected = self.selections[question].ok_or(SimError::Unanswered(question + 1))?;

        let correct = selected == q.answer;
        let scored = correct && !self.scored[question];
        if scored {
            self.scored[question] = true;
            self.score += 1;
        }
        debug!(question, selected, correct, scored, score = self.score, "checked answer");

        Ok(CheckOutcome {
            question,
            correct,
            correct_answer: q.correct_option().to_string(),
            scored,
            score: self.score,
        })
    }

    /// Clear selections and score.
    pub fn reset(&mut self) {
        self.selections.iter_mut().for_each(|s| *s = None);
        self.scored.iter_mut().for_each(|s| *s = false);
        self.score = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn session() -> QuizSession {
        QuizSession::new(default_questions()).unwrap()
    }

    #[test]
    fn test_correct_answer_scores_once() {
        let mut quiz = session();
        quiz.select(0, 1).unwrap();

        let first = quiz.check(0).unwrap();
        assert!(first.correct);
        assert!(first.scored);
        assert_eq!(first.score, 1);

        let again = quiz.check(0).unwrap();
        assert!(again.correct);
        assert!(!again.scored);
        assert_eq!(quiz.score(), 1);
    }

    #[test]
    fn test_wrong_answer_reports_correct_text() {
        let mut quiz = session();
        quiz.select(1, 0).unwrap();
        let outcome = quiz.check(1).unwrap();
        assert!(!outcome.correct);
        assert!(!outcome.scored);
        assert_eq!(outcome.correct_answer, "Coal power");
        assert_eq!(quiz.score(), 0);
    }

    #[test]
    fn test_every_canonical_answer_is_correct() {
        let mut quiz = session();
        for i in 0..quiz.len() {
            let answer = quiz.questions()[i].answer;
            quiz.select(i, answer).unwrap();
            assert!(quiz.check(i).unwrap().correct);
        }
        assert_eq!(quiz.score(), 3);
    }

    #[test]
    fn test_reset_allows_scoring_again() {
        let mut quiz = session();
        quiz.select(2, 1).unwrap();
        quiz.check(2).unwrap();
        quiz.reset();
        assert_eq!(quiz.score(), 0);
        assert_eq!(quiz.selection(2), None);

        quiz.select(2, 1).unwrap();
        assert!(quiz.check(2).unwrap().scored);
        assert_eq!(quiz.score(), 1);
    }

    #[test]
    fn test_invalid_indices() {
        let mut quiz = session();
        assert!(matches!(quiz.select(5, 0), Err(SimError::UnknownQuestion(6))));
        assert!(matches!(
            quiz.select(0, 3),
            Err(SimError::UnknownOption { question: 1, option: 4 })
        ));
        assert!(matches!(quiz.check(0), Err(SimError::Unanswered(1))));
    }

    #[test]
    fn test_load_questions_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"prompt": "Which is renewable?", "options": ["Coal", "Wind", "Oil"], "answer": 1}}]"#
        )
        .unwrap();

        let questions = load_questions(file.path()).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].correct_option(), "Wind");
    }

    #[test]
    fn test_load_rejects_bad_answer_index() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"prompt": "Q", "options": ["a", "b", "c"], "answer": 3}}]"#
        )
        .unwrap();

        assert!(matches!(
            load_questions(file.path()),
            Err(SimError::InvalidQuestionBank(_))
        ));
    }
}
