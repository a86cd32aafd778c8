//! Monthly aggregation of transactions

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};

use crate::error::{Error, Result};
use crate::models::{MonthBucket, Transaction};

/// Group transactions into calendar-month buckets, oldest first.
///
/// Months without transactions produce no bucket, so consecutive buckets
/// are not necessarily consecutive calendar months.
pub fn aggregate_monthly(transactions: &[Transaction]) -> Result<Vec<MonthBucket>> {
    let mut buckets: HashMap<(i32, u32), MonthBucket> = HashMap::new();

    for tx in transactions {
        let (year, month) = (tx.date.year(), tx.date.month());
        let anchor_date = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| Error::Parse(format!("Invalid month: {}-{}", year, month)))?;

        let bucket = buckets.entry((year, month)).or_insert_with(|| MonthBucket {
            year,
            month,
            total: 0.0,
            count: 0,
            anchor_date,
        });
        bucket.total += tx.amount;
        bucket.count += 1;
    }

    let mut months: Vec<MonthBucket> = buckets.into_values().collect();
    months.sort_by_key(|b| b.anchor_date);

    Ok(months)
}

/// Totals of each bucket, in bucket order
pub fn monthly_totals(buckets: &[MonthBucket]) -> Vec<f64> {
    buckets.iter().map(|b| b.total).collect()
}
