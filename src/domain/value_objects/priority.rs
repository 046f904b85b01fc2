//! Priority - the rank a story is worked on in
//!
//! A priority can only be obtained through [`Priority::create`], so any
//! `Priority` held by an aggregate is already inside the accepted range.

use super::{Relevance, ValueObjectError};

/// Rank of a user story, `1` being the most urgent
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Priority(i32);

impl Priority {
    /// Lowest accepted rank (most urgent)
    pub const MIN: i32 = 1;
    /// Highest accepted rank (least urgent)
    pub const MAX: i32 = 4;

    pub const HIGHEST: Priority = Priority(Self::MIN);

    /// Validate `rank` and wrap it
    pub fn create(rank: i32) -> Result<Self, ValueObjectError> {
        if !(Self::MIN..=Self::MAX).contains(&rank) {
            return Err(ValueObjectError::OutOfRange {
                field: "priority",
                value: rank,
                min: Self::MIN,
                max: Self::MAX,
            });
        }
        Ok(Self(rank))
    }

    /// One rank per importance level, `MustHave` being the most urgent
    pub fn from_relevance(relevance: Relevance) -> Self {
        match relevance {
            Relevance::MustHave => Self(1),
            Relevance::ShouldHave => Self(2),
            Relevance::CouldHave => Self(3),
            Relevance::WontHave => Self(4),
        }
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_accepts_every_rank_in_range() {
        for rank in Priority::MIN..=Priority::MAX {
            let priority = Priority::create(rank).unwrap();
            assert_eq!(priority.value(), rank);
        }
    }

    #[test]
    fn test_create_rejects_ranks_outside_range() {
        for rank in [i32::MIN, -100, -1, 0, 5, 10, i32::MAX] {
            let err = Priority::create(rank).unwrap_err();
            assert!(matches!(
                err,
                ValueObjectError::OutOfRange { value, .. } if value == rank
            ));
        }
    }

    #[test]
    fn test_equality_is_by_rank() {
        assert_eq!(Priority::create(2).unwrap(), Priority::create(2).unwrap());
        assert_ne!(Priority::create(1).unwrap(), Priority::create(3).unwrap());
    }

    #[test]
    fn test_from_relevance_stays_in_range() {
        for relevance in Relevance::ALL {
            let priority = Priority::from_relevance(relevance);
            assert_eq!(Priority::create(priority.value()).unwrap(), priority);
        }
        assert_eq!(Priority::from_relevance(Relevance::MustHave).value(), 1);
        assert_eq!(Priority::from_relevance(Relevance::WontHave).value(), 4);
    }

    #[test]
    fn test_error_message_names_bounds() {
        let err = Priority::create(9).unwrap_err();
        assert_eq!(err.to_string(), "priority 9 is out of range 1..=4");
    }
}
