//! Request validation for the record endpoints.
//!
//! Each request shape is checked field by field in a fixed order and the
//! first violation wins. Messages quote the wire field name; `details`
//! carries the field, the offending value and a machine-readable code.

use serde_json::{Value, json};

use crate::domain::{Amount, DrinkType, Error, Month, RecordDate, Year};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidNumber,
    OutOfRange,
    InvalidDate,
    InvalidDrinkType,
    InvalidAmount,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidNumber => "invalid_number",
            Self::OutOfRange => "out_of_range",
            Self::InvalidDate => "invalid_date",
            Self::InvalidDrinkType => "invalid_drink_type",
            Self::InvalidAmount => "invalid_amount",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) const YEAR: FieldName = FieldName::new("year");
pub(crate) const MONTH: FieldName = FieldName::new("month");
pub(crate) const DATE: FieldName = FieldName::new("date");
pub(crate) const DRINK_TYPE: FieldName = FieldName::new("drinkType");
pub(crate) const AMOUNT: FieldName = FieldName::new("amount");

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<Value>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("\"{field}\" is required")).with_code(ErrorCode::MissingField)
}

fn invalid_number_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("\"{field}\" must be a number"))
        .with_value(ErrorCode::InvalidNumber, value)
}

fn out_of_range_error(field: FieldName, value: &str, min: u16, max: u16) -> Error {
    let field = field.as_str();
    ValidationError::new(
        field,
        format!("\"{field}\" must be between {min} and {max}"),
    )
    .with_value(ErrorCode::OutOfRange, value)
}

fn invalid_date_error(value: impl Into<Value>) -> Error {
    let field = DATE.as_str();
    ValidationError::new(field, format!("\"{field}\" must be in ISO 8601 date format"))
        .with_value(ErrorCode::InvalidDate, value)
}

fn invalid_drink_type_error(value: impl Into<Value>) -> Error {
    let field = DRINK_TYPE.as_str();
    let allowed: Vec<&str> = DrinkType::ALL.iter().map(DrinkType::as_str).collect();
    ValidationError::new(
        field,
        format!("\"{field}\" must be one of [{}]", allowed.join(", ")),
    )
    .with_value(ErrorCode::InvalidDrinkType, value)
}

fn invalid_amount_error(value: impl Into<Value>) -> Error {
    let field = AMOUNT.as_str();
    let allowed: Vec<String> = Amount::allowed().map(|amount| amount.to_string()).collect();
    ValidationError::new(
        field,
        format!("\"{field}\" must be one of [{}]", allowed.join(", ")),
    )
    .with_value(ErrorCode::InvalidAmount, value)
}

/// Parse an integer path segment, accepting an optional sign and digits.
fn parse_integer(raw: &str, field: FieldName) -> Result<i64, Error> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| invalid_number_error(field, raw))
}

/// Parse the `year` segment of a period query.
pub(crate) fn parse_year(raw: &str) -> Result<Year, Error> {
    let value = parse_integer(raw, YEAR)?;
    Year::new(value).map_err(|_| out_of_range_error(YEAR, raw, Year::MIN, Year::MAX))
}

/// Parse the `month` segment of a period query.
pub(crate) fn parse_month(raw: &str) -> Result<Month, Error> {
    let value = parse_integer(raw, MONTH)?;
    Month::new(value).map_err(|_| out_of_range_error(MONTH, raw, 1, 12))
}

/// Parse a `YYYY-MM-DD` date.
pub(crate) fn parse_date(raw: &str) -> Result<RecordDate, Error> {
    raw.parse().map_err(|_| invalid_date_error(raw))
}

/// Parse a drink type name.
pub(crate) fn parse_drink_type(raw: &str) -> Result<DrinkType, Error> {
    raw.parse().map_err(|_| invalid_drink_type_error(raw))
}

/// Validate the `date` member of a JSON body.
pub(crate) fn date_from_json(value: Option<Value>) -> Result<RecordDate, Error> {
    match value {
        None | Some(Value::Null) => Err(missing_field_error(DATE)),
        Some(Value::String(raw)) => parse_date(&raw),
        Some(other) => Err(invalid_date_error(other)),
    }
}

/// Validate the `drinkType` member of a JSON body.
pub(crate) fn drink_type_from_json(value: Option<Value>) -> Result<DrinkType, Error> {
    match value {
        None | Some(Value::Null) => Err(missing_field_error(DRINK_TYPE)),
        Some(Value::String(raw)) => parse_drink_type(&raw),
        Some(other) => Err(invalid_drink_type_error(other)),
    }
}

/// Validate the `amount` member of a JSON body.
pub(crate) fn amount_from_json(value: Option<Value>) -> Result<Amount, Error> {
    match value {
        None | Some(Value::Null) => Err(missing_field_error(AMOUNT)),
        Some(Value::Number(number)) => number
            .as_f64()
            .and_then(|raw| Amount::try_from(raw).ok())
            .ok_or_else(|| invalid_amount_error(number)),
        Some(other) => Err(invalid_amount_error(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn details(error: &Error) -> &Value {
        error.details().expect("validation errors carry details")
    }

    #[rstest]
    #[case("2024", 2024)]
    #[case("1", 1)]
    #[case("9999", 9999)]
    fn year_accepts_four_digit_range(#[case] raw: &str, #[case] expected: u16) {
        assert_eq!(parse_year(raw).map(Year::value), Ok(expected));
    }

    #[rstest]
    #[case("abc", "\"year\" must be a number", "invalid_number")]
    #[case("20x4", "\"year\" must be a number", "invalid_number")]
    #[case("0", "\"year\" must be between 1 and 9999", "out_of_range")]
    #[case("10000", "\"year\" must be between 1 and 9999", "out_of_range")]
    fn year_rejections_name_the_field(
        #[case] raw: &str,
        #[case] message: &str,
        #[case] code: &str,
    ) {
        let error = parse_year(raw).expect_err("invalid year");

        assert_eq!(error.message(), message);
        assert_eq!(details(&error)["field"], "year");
        assert_eq!(details(&error)["value"], raw);
        assert_eq!(details(&error)["code"], code);
    }

    #[rstest]
    #[case("1", true)]
    #[case("01", true)]
    #[case("12", true)]
    #[case("13", false)]
    #[case("0", false)]
    #[case("jan", false)]
    fn month_accepts_one_to_twelve(#[case] raw: &str, #[case] accepted: bool) {
        assert_eq!(parse_month(raw).is_ok(), accepted);
    }

    #[rstest]
    #[case("2024.01.01")]
    #[case("2024-01-32")]
    #[case("invalid-date")]
    fn path_date_rejections_use_iso_message(#[case] raw: &str) {
        let error = parse_date(raw).expect_err("invalid date");
        assert_eq!(error.message(), "\"date\" must be in ISO 8601 date format");
    }

    #[rstest]
    fn drink_type_rejection_lists_choices() {
        let error = parse_drink_type("juice").expect_err("unknown drink type");
        assert_eq!(error.message(), "\"drinkType\" must be one of [soju, beer]");
        assert_eq!(details(&error)["value"], "juice");
    }

    #[rstest]
    #[case(json!(-5))]
    #[case(json!(0))]
    #[case(json!(3.3))]
    #[case(json!(5.5))]
    #[case(json!("3"))]
    fn amount_rejections_list_allowed_values(#[case] value: Value) {
        let error = amount_from_json(Some(value)).expect_err("invalid amount");
        assert_eq!(
            error.message(),
            "\"amount\" must be one of [0.5, 1, 1.5, 2, 2.5, 3, 3.5, 4, 4.5, 5]"
        );
    }

    #[rstest]
    #[case(json!(3.5), 3.5)]
    #[case(json!(3), 3.0)]
    fn amount_accepts_grid_values(#[case] value: Value, #[case] expected: f64) {
        let amount = amount_from_json(Some(value)).expect("valid amount");
        assert_eq!(amount.as_f64(), expected);
    }

    #[rstest]
    #[case(None)]
    #[case(Some(Value::Null))]
    fn missing_members_are_required(#[case] value: Option<Value>) {
        let error = date_from_json(value).expect_err("missing date");
        assert_eq!(error.message(), "\"date\" is required");
        assert_eq!(details(&error)["code"], "missing_field");
    }

    #[rstest]
    fn non_string_date_is_rejected() {
        let error = date_from_json(Some(json!(20_240_101))).expect_err("numeric date");
        assert_eq!(details(&error)["code"], "invalid_date");
    }
}
