//! Diesel table definitions for the SQLite schema.
//!
//! These definitions must match `migrations/` exactly. The drink type column
//! keeps its camel-case SQL name for compatibility with existing databases.

diesel::table! {
    /// Drink records.
    ///
    /// One row per calendar day and drink type; the pair is the primary key.
    records (date, drink_type) {
        /// Calendar day as `YYYY-MM-DD`.
        date -> Text,
        /// Lowercase drink type name (`soju` or `beer`).
        #[sql_name = "drinkType"]
        drink_type -> Text,
        /// Portions consumed; never negative.
        amount -> Double,
        /// Insertion timestamp assigned by the database.
        created_at -> Timestamp,
    }
}
