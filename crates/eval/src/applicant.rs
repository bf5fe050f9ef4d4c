//! The applicant profile collected by the form.
//!
//! Six fields are collected; only four are handed to the evaluator.
//! `community_service` and `semester` are validated and displayed but
//! no rule in the default set reads them, so they are not facts.

use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::numeric::parse_decimal;
use crate::types::{FactSet, Value};

/// A form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Cgpa,
    CoCurricularScore,
    FamilyIncome,
    CommunityService,
    Semester,
    DisciplinaryActions,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Cgpa,
        Field::CoCurricularScore,
        Field::FamilyIncome,
        Field::CommunityService,
        Field::Semester,
        Field::DisciplinaryActions,
    ];

    /// Fact name used in rule conditions.
    pub fn name(self) -> &'static str {
        match self {
            Field::Cgpa => "cgpa",
            Field::CoCurricularScore => "co_curricular_score",
            Field::FamilyIncome => "family_income",
            Field::CommunityService => "community_service",
            Field::Semester => "semester",
            Field::DisciplinaryActions => "disciplinary_actions",
        }
    }

    /// Form label.
    pub fn label(self) -> &'static str {
        match self {
            Field::Cgpa => "Cumulative GPA (CGPA)",
            Field::CoCurricularScore => "Co-curricular involvement score (0-100)",
            Field::FamilyIncome => "Monthly family income (RM)",
            Field::CommunityService => "Community service hours",
            Field::Semester => "Current semester of study",
            Field::DisciplinaryActions => "Number of disciplinary actions",
        }
    }

    /// Inclusive bounds; `None` for an open upper bound.
    pub fn bounds(self) -> (Decimal, Option<Decimal>) {
        match self {
            Field::Cgpa => (Decimal::ZERO, Some(Decimal::from(4))),
            Field::CoCurricularScore => (Decimal::ZERO, Some(Decimal::from(100))),
            Field::Semester => (Decimal::ONE, Some(Decimal::from(14))),
            Field::FamilyIncome | Field::CommunityService | Field::DisciplinaryActions => {
                (Decimal::ZERO, None)
            }
        }
    }

    /// Whether the evaluator receives this field as a fact.
    pub fn is_fact(self) -> bool {
        !matches!(self, Field::CommunityService | Field::Semester)
    }

    fn is_integer(self) -> bool {
        self != Field::Cgpa
    }
}

impl FromStr for Field {
    type Err = ApplicantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_").to_lowercase();
        Field::ALL
            .into_iter()
            .find(|f| f.name() == wanted)
            .ok_or_else(|| ApplicantError::UnknownField {
                field: s.to_string(),
            })
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Invalid form input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApplicantError {
    #[error("unknown field '{field}'")]
    UnknownField { field: String },
    #[error("{field} expects {expected}, got '{value}'")]
    InvalidNumber {
        field: Field,
        expected: &'static str,
        value: String,
    },
    #[error("{field} must be {range}, got {value}")]
    OutOfRange {
        field: Field,
        value: Decimal,
        range: String,
    },
}

/// The applicant's academic profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applicant {
    pub cgpa: Decimal,
    pub co_curricular_score: i64,
    pub family_income: i64,
    pub community_service: i64,
    pub semester: i64,
    pub disciplinary_actions: i64,
}

impl Default for Applicant {
    /// The form's initial values.
    fn default() -> Self {
        Applicant {
            cgpa: Decimal::new(35, 1),
            co_curricular_score: 75,
            family_income: 6000,
            community_service: 50,
            semester: 5,
            disciplinary_actions: 0,
        }
    }
}

impl Applicant {
    pub fn get(&self, field: Field) -> Decimal {
        match field {
            Field::Cgpa => self.cgpa,
            Field::CoCurricularScore => Decimal::from(self.co_curricular_score),
            Field::FamilyIncome => Decimal::from(self.family_income),
            Field::CommunityService => Decimal::from(self.community_service),
            Field::Semester => Decimal::from(self.semester),
            Field::DisciplinaryActions => Decimal::from(self.disciplinary_actions),
        }
    }

    /// Set a field from typed input, checking its bounds.
    pub fn set(&mut self, field: Field, value: Decimal) -> Result<(), ApplicantError> {
        check_bounds(field, value)?;
        let whole = || {
            value
                .to_i64()
                .filter(|_| value.fract().is_zero())
                .ok_or_else(|| ApplicantError::InvalidNumber {
                    field,
                    expected: "a whole number",
                    value: value.to_string(),
                })
        };
        match field {
            Field::Cgpa => self.cgpa = value,
            Field::CoCurricularScore => self.co_curricular_score = whole()?,
            Field::FamilyIncome => self.family_income = whole()?,
            Field::CommunityService => self.community_service = whole()?,
            Field::Semester => self.semester = whole()?,
            Field::DisciplinaryActions => self.disciplinary_actions = whole()?,
        }
        Ok(())
    }

    /// Set a field from raw text as typed into the form.
    pub fn set_text(&mut self, field: Field, raw: &str) -> Result<(), ApplicantError> {
        let value = parse_decimal(raw).ok_or_else(|| ApplicantError::InvalidNumber {
            field,
            expected: if field.is_integer() {
                "a whole number"
            } else {
                "a number"
            },
            value: raw.to_string(),
        })?;
        self.set(field, value)
    }

    /// Check every field against its bounds.
    pub fn validate(&self) -> Result<(), ApplicantError> {
        for field in Field::ALL {
            check_bounds(field, self.get(field))?;
        }
        Ok(())
    }

    /// The facts the evaluator sees.
    pub fn to_facts(&self) -> FactSet {
        Field::ALL
            .into_iter()
            .filter(|f| f.is_fact())
            .map(|f| (f.name(), Value::Number(self.get(f))))
            .collect()
    }
}

fn check_bounds(field: Field, value: Decimal) -> Result<(), ApplicantError> {
    let (min, max) = field.bounds();
    let too_high = max.is_some_and(|m| value > m);
    if value < min || too_high {
        let range = match max {
            Some(m) => format!("between {} and {}", min, m),
            None => format!("at least {}", min),
        };
        return Err(ApplicantError::OutOfRange {
            field,
            value,
            range,
        });
    }
    Ok(())
}
