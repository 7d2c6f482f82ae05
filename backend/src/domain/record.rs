//! Drink record data model.
//!
//! A record captures how much of one drink was consumed on one calendar day.
//! The pair of date and drink type identifies a record; the amount is stored
//! in half-portion steps.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Validation errors returned by the record value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    InvalidDate,
    UnknownDrinkType,
    AmountOutOfRange,
    YearOutOfRange { min: u16, max: u16 },
    MonthOutOfRange,
}

impl fmt::Display for RecordValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDate => write!(f, "date must be a calendar date in YYYY-MM-DD form"),
            Self::UnknownDrinkType => write!(f, "drink type must be one of [soju, beer]"),
            Self::AmountOutOfRange => {
                write!(f, "amount must be a multiple of 0.5 between 0.5 and 5")
            }
            Self::YearOutOfRange { min, max } => {
                write!(f, "year must be between {min} and {max}")
            }
            Self::MonthOutOfRange => write!(f, "month must be between 1 and 12"),
        }
    }
}

impl std::error::Error for RecordValidationError {}

/// Kind of drink a record refers to.
///
/// # Examples
///
/// ```
/// # use drinklog::domain::DrinkType;
/// let beer: DrinkType = "beer".parse().expect("known drink type");
/// assert_eq!(beer, DrinkType::Beer);
/// assert_eq!(DrinkType::Soju.as_str(), "soju");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrinkType {
    Soju,
    Beer,
}

impl DrinkType {
    /// Every accepted drink type.
    pub const ALL: [Self; 2] = [Self::Soju, Self::Beer];

    /// Returns the wire and database representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Soju => "soju",
            Self::Beer => "beer",
        }
    }
}

impl fmt::Display for DrinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DrinkType {
    type Err = RecordValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "soju" => Ok(Self::Soju),
            "beer" => Ok(Self::Beer),
            _ => Err(RecordValidationError::UnknownDrinkType),
        }
    }
}

/// Quantity consumed, held as a count of half portions.
///
/// Only the ten values `0.5, 1, ..., 5` are representable.
///
/// # Examples
///
/// ```
/// # use drinklog::domain::Amount;
/// let amount = Amount::try_from(3.5).expect("on the half-portion grid");
/// assert_eq!(amount.as_f64(), 3.5);
/// assert!(Amount::try_from(3.3).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Amount(u8);

impl Amount {
    /// Smallest number of half portions.
    pub const MIN_HALVES: u8 = 1;
    /// Largest number of half portions.
    pub const MAX_HALVES: u8 = 10;

    /// Construct from a count of half portions.
    pub fn from_halves(halves: u8) -> Result<Self, RecordValidationError> {
        if (Self::MIN_HALVES..=Self::MAX_HALVES).contains(&halves) {
            Ok(Self(halves))
        } else {
            Err(RecordValidationError::AmountOutOfRange)
        }
    }

    /// Every accepted amount in ascending order.
    pub fn allowed() -> impl Iterator<Item = Self> {
        (Self::MIN_HALVES..=Self::MAX_HALVES).map(Self)
    }

    /// Number of half portions.
    pub fn halves(self) -> u8 {
        self.0
    }

    /// Amount expressed in whole portions.
    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / 2.0
    }
}

impl TryFrom<f64> for Amount {
    type Error = RecordValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        let doubled = value * 2.0;
        (Self::MIN_HALVES..=Self::MAX_HALVES)
            .find(|halves| f64::from(*halves) == doubled)
            .map(Self)
            .ok_or(RecordValidationError::AmountOutOfRange)
    }
}

impl From<Amount> for f64 {
    fn from(value: Amount) -> Self {
        value.as_f64()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_f64())
    }
}

/// Calendar day of a record, written as `YYYY-MM-DD`.
///
/// Parsing accepts only the zero-padded ISO 8601 calendar form, so
/// `2024-1-5` and `2024.01.05` are both rejected.
///
/// # Examples
///
/// ```
/// # use drinklog::domain::RecordDate;
/// let date: RecordDate = "2024-02-29".parse().expect("leap day");
/// assert_eq!(date.to_string(), "2024-02-29");
/// assert!("2024-01-32".parse::<RecordDate>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordDate(NaiveDate);

impl RecordDate {
    const FORMAT: &'static str = "%Y-%m-%d";

    /// Wrap an already valid date.
    pub fn new(date: NaiveDate) -> Result<Self, RecordValidationError> {
        Year::new(date.year())?;
        Ok(Self(date))
    }

    /// Access the underlying date.
    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }
}

impl FromStr for RecordDate {
    type Err = RecordValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let well_formed = s.len() == 10
            && s.bytes().enumerate().all(|(index, byte)| match index {
                4 | 7 => byte == b'-',
                _ => byte.is_ascii_digit(),
            });
        if !well_formed {
            return Err(RecordValidationError::InvalidDate);
        }
        let date = NaiveDate::parse_from_str(s, Self::FORMAT)
            .map_err(|_| RecordValidationError::InvalidDate)?;
        Self::new(date).map_err(|_| RecordValidationError::InvalidDate)
    }
}

impl TryFrom<String> for RecordDate {
    type Error = RecordValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RecordDate> for String {
    fn from(value: RecordDate) -> Self {
        value.to_string()
    }
}

impl fmt::Display for RecordDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

/// Four-digit calendar year used by period queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Year(u16);

impl Year {
    pub const MIN: u16 = 1;
    pub const MAX: u16 = 9999;

    /// Validate and construct a year.
    pub fn new(value: impl TryInto<u16>) -> Result<Self, RecordValidationError> {
        let out_of_range = RecordValidationError::YearOutOfRange {
            min: Self::MIN,
            max: Self::MAX,
        };
        let value: u16 = value.try_into().map_err(|_| out_of_range.clone())?;
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(out_of_range)
        }
    }

    pub fn value(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

/// Month of the year, `1..=12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Month(u8);

impl Month {
    /// Validate and construct a month.
    pub fn new(value: impl TryInto<u8>) -> Result<Self, RecordValidationError> {
        let value: u8 = value
            .try_into()
            .map_err(|_| RecordValidationError::MonthOutOfRange)?;
        if (1..=12).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RecordValidationError::MonthOutOfRange)
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// Key formatting a year and month as `YYYY-MM`.
///
/// # Examples
///
/// ```
/// # use drinklog::domain::{Month, Year, month_key};
/// let key = month_key(Year::new(2024).unwrap(), Month::new(1).unwrap());
/// assert_eq!(key, "2024-01");
/// ```
pub fn month_key(year: Year, month: Month) -> String {
    format!("{year}-{month}")
}

/// Identifies a single record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordKey {
    pub date: RecordDate,
    pub drink_type: DrinkType,
}

/// A validated drink record as submitted by a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub date: RecordDate,
    pub drink_type: DrinkType,
    pub amount: Amount,
}

impl Record {
    pub fn new(date: RecordDate, drink_type: DrinkType, amount: Amount) -> Self {
        Self {
            date,
            drink_type,
            amount,
        }
    }

    /// Key identifying this record.
    pub fn key(&self) -> RecordKey {
        RecordKey {
            date: self.date,
            drink_type: self.drink_type,
        }
    }
}

/// A record as persisted, including its insertion time.
///
/// `amount` is kept as read from storage; rows written by other tools are
/// not forced onto the half-portion grid.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRecord {
    pub date: RecordDate,
    pub drink_type: DrinkType,
    pub amount: f64,
    pub created_at: NaiveDateTime,
}

impl StoredRecord {
    pub fn key(&self) -> RecordKey {
        RecordKey {
            date: self.date,
            drink_type: self.drink_type,
        }
    }

    /// Output entry for this record.
    pub fn total(&self) -> DrinkTotal {
        DrinkTotal {
            drink_type: self.drink_type,
            amount: self.amount,
        }
    }
}

/// Amount of one drink type within a day or month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrinkTotal {
    pub drink_type: DrinkType,
    pub amount: f64,
}

/// Sum of one drink type over one month of a year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyTotal {
    pub month: Month,
    pub drink_type: DrinkType,
    pub amount: f64,
}
