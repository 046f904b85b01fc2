//! Relevance - MoSCoW importance supplied when a story is requested

use super::ValueObjectError;

/// How important a story is to the people asking for it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relevance {
    MustHave,
    ShouldHave,
    CouldHave,
    WontHave,
}

impl Relevance {
    pub const ALL: [Relevance; 4] = [
        Relevance::MustHave,
        Relevance::ShouldHave,
        Relevance::CouldHave,
        Relevance::WontHave,
    ];

    /// Wire value used by clients (`0` = must have)
    pub fn code(&self) -> i32 {
        match self {
            Self::MustHave => 0,
            Self::ShouldHave => 1,
            Self::CouldHave => 2,
            Self::WontHave => 3,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.code() == code)
    }
}

impl TryFrom<i32> for Relevance {
    type Error = ValueObjectError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Relevance::from_code(code).ok_or(ValueObjectError::NotAMember {
            field: "importance",
            value: code,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for relevance in Relevance::ALL {
            assert_eq!(Relevance::from_code(relevance.code()), Some(relevance));
        }
    }

    #[test]
    fn test_unknown_code_is_not_a_member() {
        assert_eq!(Relevance::from_code(5), None);
        assert_eq!(Relevance::from_code(-1), None);
        assert!(Relevance::try_from(4).is_err());
    }
}
