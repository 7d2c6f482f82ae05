//! Integration tests for `DieselRecordRepository` against a SQLite file.

use drinklog::domain::ports::{RecordRepository, RecordRepositoryError};
use drinklog::domain::{Amount, DrinkType, Month, Record, RecordDate, RecordKey, Year};
use rstest::rstest;

mod support;

use support::TestDatabase;

fn record(date: &str, drink_type: DrinkType, amount: f64) -> Record {
    Record::new(
        date.parse().expect("valid date"),
        drink_type,
        Amount::try_from(amount).expect("valid amount"),
    )
}

fn year(value: u16) -> Year {
    Year::new(value).expect("valid year")
}

fn month(value: u8) -> Month {
    Month::new(value).expect("valid month")
}

#[rstest]
#[tokio::test]
async fn insert_then_find_by_key_returns_stored_record() {
    let db = TestDatabase::new().await;
    let repo = db.repository();
    let entry = record("2024-01-01", DrinkType::Soju, 3.5);

    repo.insert(&entry).await.expect("insert succeeds");
    let stored = repo
        .find_by_key(&entry.key())
        .await
        .expect("lookup succeeds")
        .expect("record exists");

    assert_eq!(stored.date, entry.date);
    assert_eq!(stored.drink_type, DrinkType::Soju);
    assert_eq!(stored.amount, 3.5);
}

#[rstest]
#[tokio::test]
async fn second_insert_for_same_key_is_duplicate() {
    let db = TestDatabase::new().await;
    let repo = db.repository();

    repo.insert(&record("2024-01-01", DrinkType::Beer, 1.0))
        .await
        .expect("first insert succeeds");
    let error = repo
        .insert(&record("2024-01-01", DrinkType::Beer, 4.0))
        .await
        .expect_err("second insert collides");

    assert_eq!(error, RecordRepositoryError::duplicate("2024-01-01", "beer"));
}

#[rstest]
#[tokio::test]
async fn same_date_different_drink_types_coexist() {
    let db = TestDatabase::new().await;
    let repo = db.repository();

    repo.insert(&record("2024-10-02", DrinkType::Soju, 2.5))
        .await
        .expect("soju insert");
    repo.insert(&record("2024-10-02", DrinkType::Beer, 1.0))
        .await
        .expect("beer insert");

    let date: RecordDate = "2024-10-02".parse().expect("valid date");
    let on_date = repo.find_by_date(&date).await.expect("lookup succeeds");

    let kinds: Vec<_> = on_date.iter().map(|stored| stored.drink_type).collect();
    assert_eq!(kinds, vec![DrinkType::Soju, DrinkType::Beer]);
}

#[rstest]
#[tokio::test]
async fn delete_reports_whether_a_row_was_removed() {
    let db = TestDatabase::new().await;
    let repo = db.repository();
    let entry = record("2024-01-01", DrinkType::Soju, 1.0);
    repo.insert(&entry).await.expect("insert succeeds");

    let first = repo.delete(&entry.key()).await.expect("delete succeeds");
    let second = repo.delete(&entry.key()).await.expect("delete succeeds");

    assert!(first);
    assert!(!second);
    assert!(
        repo.find_by_key(&entry.key())
            .await
            .expect("lookup succeeds")
            .is_none()
    );
}

#[rstest]
#[tokio::test]
async fn list_month_is_bounded_and_ordered_by_date() {
    let db = TestDatabase::new().await;
    let repo = db.repository();
    for entry in [
        record("2024-01-31", DrinkType::Soju, 1.0),
        record("2024-02-01", DrinkType::Soju, 2.0),
        record("2024-01-05", DrinkType::Beer, 0.5),
        record("2023-01-10", DrinkType::Soju, 5.0),
    ] {
        repo.insert(&entry).await.expect("insert succeeds");
    }

    let listed = repo
        .list_month(year(2024), month(1))
        .await
        .expect("list succeeds");

    let dates: Vec<String> = listed.iter().map(|stored| stored.date.to_string()).collect();
    assert_eq!(dates, vec!["2024-01-05", "2024-01-31"]);
}

#[rstest]
#[tokio::test]
async fn monthly_totals_sum_per_month_and_drink_type() {
    let db = TestDatabase::new().await;
    let repo = db.repository();
    for entry in [
        record("2024-01-01", DrinkType::Soju, 3.0),
        record("2024-01-02", DrinkType::Soju, 2.0),
        record("2024-01-02", DrinkType::Beer, 1.5),
        record("2024-03-15", DrinkType::Beer, 0.5),
        record("2025-01-01", DrinkType::Soju, 4.0),
    ] {
        repo.insert(&entry).await.expect("insert succeeds");
    }

    let totals = repo
        .monthly_totals(year(2024))
        .await
        .expect("aggregate succeeds");

    let flattened: Vec<(u8, DrinkType, f64)> = totals
        .iter()
        .map(|total| (total.month.value(), total.drink_type, total.amount))
        .collect();
    assert_eq!(
        flattened,
        vec![
            (1, DrinkType::Beer, 1.5),
            (1, DrinkType::Soju, 5.0),
            (3, DrinkType::Beer, 0.5),
        ]
    );
}

#[rstest]
#[tokio::test]
async fn lookups_on_empty_store_find_nothing() {
    let db = TestDatabase::new().await;
    let repo = db.repository();
    let key = RecordKey {
        date: "2024-01-01".parse().expect("valid date"),
        drink_type: DrinkType::Beer,
    };

    assert!(repo.find_by_key(&key).await.expect("lookup").is_none());
    assert!(
        repo.monthly_totals(year(2024))
            .await
            .expect("aggregate")
            .is_empty()
    );
}
