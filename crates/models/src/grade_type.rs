use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

/// The kind of assessment a grade records
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
#[serde(rename_all = "lowercase")]
pub enum GradeType {
    #[sea_orm(string_value = "activity")]
    Activity,
    #[sea_orm(string_value = "quiz")]
    Quiz,
    #[sea_orm(string_value = "exam")]
    Exam,
}

impl GradeType {
    /// The wire/database spelling of each variant
    pub const CHOICES: [&'static str; 3] = ["activity", "quiz", "exam"];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Activity => "activity",
            Self::Quiz => "quiz",
            Self::Exam => "exam",
        }
    }
}

impl FromStr for GradeType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "activity" => Ok(Self::Activity),
            "quiz" => Ok(Self::Quiz),
            "exam" => Ok(Self::Exam),
            _ => Err(()),
        }
    }
}

impl Display for GradeType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_type_from_str() {
        assert_eq!(GradeType::from_str("activity"), Ok(GradeType::Activity));
        assert_eq!(GradeType::from_str("quiz"), Ok(GradeType::Quiz));
        assert_eq!(GradeType::from_str("exam"), Ok(GradeType::Exam));
        assert_eq!(GradeType::from_str("final"), Err(()));
        assert_eq!(GradeType::from_str("Quiz"), Err(()));
    }

    #[test]
    fn test_grade_type_display() {
        assert_eq!(GradeType::Activity.to_string(), "activity");
        assert_eq!(GradeType::Exam.to_string(), "exam");
    }
}
