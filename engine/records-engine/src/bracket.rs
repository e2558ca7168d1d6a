//! Playoff bracket shapes
//!
//! A season's playoff settings determine which numbered matchup slots count
//! as real bracket games each week. Byes and consolation games share the same
//! weekly matchup lists, so the reducer needs an explicit per-week list of
//! "relevant" slot numbers rather than a formula. Nine shapes are known:
//! 4/6/8-team brackets crossed with the three round formats Sleeper supports.
//! The setting only exists from the 2020 season onward; earlier years always
//! played one week per round.

use thiserror::Error;

/// Errors resolving a bracket shape
#[derive(Error, Debug, PartialEq, Eq)]
pub enum BracketError {
    #[error("Unsupported playoff team count: {0}")]
    UnsupportedTeamCount(u8),

    #[error("Unsupported playoff round type: {0}")]
    UnsupportedRoundType(u8),
}

/// Playoff round format, from the league's `playoff_round_type` setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundFormat {
    OneWeekPerRound,
    /// One week per round, two-week championship
    TwoWeekChampionship,
    TwoWeeksPerRound,
}

impl RoundFormat {
    fn from_setting(setting: u8) -> Result<Self, BracketError> {
        match setting {
            0 => Ok(RoundFormat::OneWeekPerRound),
            1 => Ok(RoundFormat::TwoWeekChampionship),
            2 => Ok(RoundFormat::TwoWeeksPerRound),
            other => Err(BracketError::UnsupportedRoundType(other)),
        }
    }
}

/// The year Sleeper introduced configurable round formats
const ROUND_TYPE_FIRST_YEAR: u16 = 2020;

/// A resolved bracket: for each playoff week, the matchup slots that count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketShape {
    pub teams: u8,
    pub format: RoundFormat,
    weeks: &'static [&'static [u64]],
}

// Relevant matchup-slot tables, one row per playoff week.
const FOUR_SINGLE: &[&[u64]] = &[&[1, 2], &[1]];
const FOUR_TWO_WEEK_FINAL: &[&[u64]] = &[&[1, 2], &[1], &[1]];
const FOUR_TWO_WEEK_ROUNDS: &[&[u64]] = &[&[1, 2], &[1, 2], &[1], &[1]];

const SIX_SINGLE: &[&[u64]] = &[&[1, 2], &[1, 2], &[1]];
const SIX_TWO_WEEK_FINAL: &[&[u64]] = &[&[1, 2], &[1, 2], &[1], &[1]];
const SIX_TWO_WEEK_ROUNDS: &[&[u64]] = &[&[1, 2], &[1, 2], &[1, 2], &[1, 2], &[1], &[1]];

const EIGHT_SINGLE: &[&[u64]] = &[&[1, 2, 3, 4], &[1, 2], &[1]];
const EIGHT_TWO_WEEK_FINAL: &[&[u64]] = &[&[1, 2, 3, 4], &[1, 2], &[1], &[1]];
const EIGHT_TWO_WEEK_ROUNDS: &[&[u64]] =
    &[&[1, 2, 3, 4], &[1, 2, 3, 4], &[1, 2], &[1, 2], &[1], &[1]];

impl BracketShape {
    /// Resolve the bracket shape for a season's playoff settings
    pub fn resolve(teams: u8, round_type: Option<u8>, year: u16) -> Result<Self, BracketError> {
        let format = if year < ROUND_TYPE_FIRST_YEAR {
            RoundFormat::OneWeekPerRound
        } else {
            RoundFormat::from_setting(round_type.unwrap_or(0))?
        };

        let weeks = match (teams, format) {
            (4, RoundFormat::OneWeekPerRound) => FOUR_SINGLE,
            (4, RoundFormat::TwoWeekChampionship) => FOUR_TWO_WEEK_FINAL,
            (4, RoundFormat::TwoWeeksPerRound) => FOUR_TWO_WEEK_ROUNDS,
            (6, RoundFormat::OneWeekPerRound) => SIX_SINGLE,
            (6, RoundFormat::TwoWeekChampionship) => SIX_TWO_WEEK_FINAL,
            (6, RoundFormat::TwoWeeksPerRound) => SIX_TWO_WEEK_ROUNDS,
            (8, RoundFormat::OneWeekPerRound) => EIGHT_SINGLE,
            (8, RoundFormat::TwoWeekChampionship) => EIGHT_TWO_WEEK_FINAL,
            (8, RoundFormat::TwoWeeksPerRound) => EIGHT_TWO_WEEK_ROUNDS,
            (other, _) => return Err(BracketError::UnsupportedTeamCount(other)),
        };

        Ok(Self { teams, format, weeks })
    }

    /// Number of weeks the bracket spans
    pub fn playoff_length(&self) -> u16 {
        self.weeks.len() as u16
    }

    /// Matchup slots that count as bracket games at a week offset
    pub fn relevant_slots(&self, week_offset: u16) -> Option<&'static [u64]> {
        self.weeks.get(week_offset as usize).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_nine_shapes_resolve() {
        let cases: [(u8, u8, u16, &[u64]); 9] = [
            (4, 0, 2, &[2, 1]),
            (4, 1, 3, &[2, 1, 1]),
            (4, 2, 4, &[2, 2, 1, 1]),
            (6, 0, 3, &[2, 2, 1]),
            (6, 1, 4, &[2, 2, 1, 1]),
            (6, 2, 6, &[2, 2, 2, 2, 1, 1]),
            (8, 0, 3, &[4, 2, 1]),
            (8, 1, 4, &[4, 2, 1, 1]),
            (8, 2, 6, &[4, 4, 2, 2, 1, 1]),
        ];

        for (teams, round_type, length, slot_counts) in cases {
            let shape = BracketShape::resolve(teams, Some(round_type), 2022).unwrap();
            assert_eq!(shape.playoff_length(), length, "{} teams type {}", teams, round_type);
            for (offset, expected) in slot_counts.iter().enumerate() {
                let slots = shape.relevant_slots(offset as u16).unwrap();
                assert_eq!(slots.len() as u64, *expected);
                // Slots are the low-numbered matchups each week
                assert_eq!(slots[0], 1);
            }
            assert_eq!(shape.relevant_slots(length), None);
        }
    }

    #[test]
    fn test_pre_2020_seasons_force_one_week_rounds() {
        let shape = BracketShape::resolve(6, Some(2), 2019).unwrap();
        assert_eq!(shape.format, RoundFormat::OneWeekPerRound);
        assert_eq!(shape.playoff_length(), 3);

        // Absent setting defaults the same way
        let shape = BracketShape::resolve(6, None, 2018).unwrap();
        assert_eq!(shape.playoff_length(), 3);
    }

    #[test]
    fn test_unknown_shapes_error() {
        assert_eq!(
            BracketShape::resolve(10, Some(0), 2022),
            Err(BracketError::UnsupportedTeamCount(10))
        );
        assert_eq!(
            BracketShape::resolve(6, Some(7), 2022),
            Err(BracketError::UnsupportedRoundType(7))
        );
    }
}
