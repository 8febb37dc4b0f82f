//! CSV serialization of the transaction list.

use std::fmt::Write;

use crate::ledger::Transaction;

pub const CSV_FILE_NAME: &str = "transactions.csv";
pub const CSV_MIME: &str = "text/csv";

const CSV_HEADER: &str = "Date,Description,Amount,Category,Type";

/// Serializes the ledger to CSV in list order.
///
/// Fields are comma-joined without quoting, matching the files produced by
/// earlier versions of the tracker; descriptions containing commas shift the
/// columns. Known limitation, kept for byte-for-byte compatibility.
pub fn to_csv(transactions: &[Transaction]) -> String {
    let mut out = String::from(CSV_HEADER);
    for txn in transactions {
        out.push('\n');
        let _ = write!(
            out,
            "{},{},{},{},{}",
            txn.date, txn.description, txn.amount, txn.category, txn.kind
        );
    }
    out
}
