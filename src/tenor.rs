use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

use crate::error::{ParseError, TenorError};
use crate::parser::{self, MAX_UNIT_VALUE};

const DAYS_PER_YEAR: i64 = 360;
const DAYS_PER_MONTH: i64 = 30;
const DAYS_PER_WEEK: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Years,
    Months,
    Weeks,
    Days,
}

impl Unit {
    pub const ALL: [Unit; 4] = [Unit::Years, Unit::Months, Unit::Weeks, Unit::Days];

    /// Map a unit letter, in either case, to its unit.
    pub fn from_separator(byte: u8) -> Option<Unit> {
        match byte.to_ascii_lowercase() {
            b'y' => Some(Unit::Years),
            b'm' => Some(Unit::Months),
            b'w' => Some(Unit::Weeks),
            b'd' => Some(Unit::Days),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Unit::Years => 'y',
            Unit::Months => 'm',
            Unit::Weeks => 'w',
            Unit::Days => 'd',
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Unit::Years => "years",
            Unit::Months => "months",
            Unit::Weeks => "weeks",
            Unit::Days => "days",
        })
    }
}

/// A calendar length made of years, months, weeks and days.
///
/// Ordering, equality and hashing only look at [`Tenor::total_days`], which
/// weighs a year as 360 days and a month as 30. Two tenors with different
/// fields can therefore be equal: `1w1d == 8d`. Use the field accessors when
/// the exact composition matters.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tenor {
    years: u32,
    months: u32,
    weeks: u32,
    days: u32,
    total_days: i64,
}

impl Tenor {
    pub const ZERO: Tenor = Tenor::new(0, 0, 0, 0);

    /// # Panics
    ///
    /// Panics if any field exceeds [`MAX_UNIT_VALUE`], the largest value the
    /// parser reads back. Use [`Tenor::try_new`] for unchecked input.
    pub const fn new(years: u32, months: u32, weeks: u32, days: u32) -> Self {
        assert!(
            years <= MAX_UNIT_VALUE
                && months <= MAX_UNIT_VALUE
                && weeks <= MAX_UNIT_VALUE
                && days <= MAX_UNIT_VALUE,
            "tenor field exceeds 2147483647"
        );
        let total_days = years as i64 * DAYS_PER_YEAR
            + months as i64 * DAYS_PER_MONTH
            + weeks as i64 * DAYS_PER_WEEK
            + days as i64;
        Self {
            years,
            months,
            weeks,
            days,
            total_days,
        }
    }

    /// Build a tenor from signed components, rejecting the first one that is
    /// negative or too large with [`TenorError::OutOfRange`].
    pub fn try_new(years: i64, months: i64, weeks: i64, days: i64) -> Result<Self, TenorError> {
        Ok(Self::new(
            checked_field("years", years)?,
            checked_field("months", months)?,
            checked_field("weeks", weeks)?,
            checked_field("days", days)?,
        ))
    }

    pub const fn from_years(years: u32) -> Self {
        Self::new(years, 0, 0, 0)
    }

    pub const fn from_months(months: u32) -> Self {
        Self::new(0, months, 0, 0)
    }

    pub const fn from_weeks(weeks: u32) -> Self {
        Self::new(0, 0, weeks, 0)
    }

    pub const fn from_days(days: u32) -> Self {
        Self::new(0, 0, 0, days)
    }

    pub fn parse(text: &str) -> Result<Self, ParseError> {
        parser::parse(text)
    }

    /// Never fails; returns `(false, Tenor::ZERO)` for absent or malformed input.
    pub fn try_parse(text: Option<&str>) -> (bool, Self) {
        parser::try_parse(text)
    }

    pub fn years(&self) -> u32 {
        self.years
    }

    pub fn months(&self) -> u32 {
        self.months
    }

    pub fn weeks(&self) -> u32 {
        self.weeks
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    /// Approximate length in days, used only for ordering.
    pub fn total_days(&self) -> i64 {
        self.total_days
    }

    pub fn is_zero(&self) -> bool {
        self.total_days == 0
    }

    /// Three-way comparison as `-1`, `0` or `1`.
    pub fn compare(a: &Tenor, b: &Tenor) -> i32 {
        match a.cmp(b) {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        }
    }

    pub fn get(&self, unit: Unit) -> u32 {
        match unit {
            Unit::Years => self.years,
            Unit::Months => self.months,
            Unit::Weeks => self.weeks,
            Unit::Days => self.days,
        }
    }
}

fn checked_field(field: &'static str, value: i64) -> Result<u32, TenorError> {
    u32::try_from(value)
        .ok()
        .filter(|checked| *checked <= MAX_UNIT_VALUE)
        .ok_or(TenorError::OutOfRange { field, value })
}

impl PartialEq for Tenor {
    fn eq(&self, other: &Self) -> bool {
        self.total_days == other.total_days
    }
}

impl Eq for Tenor {}

impl Hash for Tenor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.total_days.hash(state);
    }
}

impl PartialOrd for Tenor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tenor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.total_days.cmp(&other.total_days)
    }
}

/// Canonical form: `{n}{letter}` for every non-zero field, largest unit first.
/// The zero tenor renders as an empty string.
impl fmt::Display for Tenor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for unit in Unit::ALL {
            let value = self.get(unit);
            if value > 0 {
                write!(f, "{value}{}", unit.letter())?;
            }
        }
        Ok(())
    }
}

impl Serialize for Tenor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct TenorVisitor;

impl de::Visitor<'_> for TenorVisitor {
    type Value = Tenor;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a tenor string such as 1y6m")
    }

    fn visit_str<E: de::Error>(self, text: &str) -> Result<Tenor, E> {
        parser::parse(text).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Tenor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(TenorVisitor)
    }
}
