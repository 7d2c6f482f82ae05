//! Driving port for record read models.
//!
//! Both views are ordered maps so JSON output has a stable key order.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::domain::{DrinkTotal, Error, Month, Year};

/// Entries of one month keyed by `YYYY-MM-DD`.
pub type RecordsByDate = BTreeMap<String, Vec<DrinkTotal>>;

/// Summed entries of one year keyed by `YYYY-MM`.
pub type TotalsByMonth = BTreeMap<String, Vec<DrinkTotal>>;

/// Driving port for the month and year views.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordsQuery: Send + Sync {
    /// Records of one month grouped by date.
    async fn records_for_month(&self, year: Year, month: Month) -> Result<RecordsByDate, Error>;

    /// Totals of one year grouped by month and drink type.
    async fn totals_for_year(&self, year: Year) -> Result<TotalsByMonth, Error>;
}

/// Fixture implementation returning empty views.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRecordsQuery;

#[async_trait]
impl RecordsQuery for FixtureRecordsQuery {
    async fn records_for_month(
        &self,
        _year: Year,
        _month: Month,
    ) -> Result<RecordsByDate, Error> {
        Ok(RecordsByDate::new())
    }

    async fn totals_for_year(&self, _year: Year) -> Result<TotalsByMonth, Error> {
        Ok(TotalsByMonth::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_query_returns_empty_views() {
        let year = Year::new(2024).expect("valid year");
        let month = Month::new(1).expect("valid month");

        let by_date = FixtureRecordsQuery
            .records_for_month(year, month)
            .await
            .expect("fixture query succeeds");
        let by_month = FixtureRecordsQuery
            .totals_for_year(year)
            .await
            .expect("fixture query succeeds");

        assert!(by_date.is_empty());
        assert!(by_month.is_empty());
    }
}
