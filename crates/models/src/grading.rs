use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Letter grade on the five-bucket scale used for report cards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LetterGrade {
    A,
    B,
    C,
    D,
    F,
}

impl LetterGrade {
    /// Buckets a percentage: A >= 90, B >= 80, C >= 70, D >= 60, else F.
    /// Boundaries are exact, so 90 is an A and 89.999 is a B.
    pub fn from_percentage(percentage: Decimal) -> Self {
        if percentage >= Decimal::from(90) {
            Self::A
        } else if percentage >= Decimal::from(80) {
            Self::B
        } else if percentage >= Decimal::from(70) {
            Self::C
        } else if percentage >= Decimal::from(60) {
            Self::D
        } else {
            Self::F
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        }
    }
}

impl Display for LetterGrade {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// Share of points earned, scaled to 0-100.
/// A non-positive maximum yields 0 rather than dividing by it.
pub fn percentage(score: Decimal, max_score: Decimal) -> Decimal {
    if max_score > Decimal::ZERO {
        score / max_score * Decimal::from(100)
    } else {
        Decimal::ZERO
    }
}

/// Letter grade for a single score out of a maximum
pub fn letter_grade(score: Decimal, max_score: Decimal) -> LetterGrade {
    LetterGrade::from_percentage(percentage(score, max_score))
}

/// Arithmetic mean of a set of scores; an empty set averages to 0
pub fn mean(scores: &[Decimal]) -> Decimal {
    if scores.is_empty() {
        return Decimal::ZERO;
    }

    scores.iter().sum::<Decimal>() / Decimal::from(scores.len() as u64)
}
