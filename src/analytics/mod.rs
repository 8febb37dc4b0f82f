//! Pure aggregation functions over the current transaction list.
//!
//! Nothing in this module mutates or persists; every function takes the
//! ledger slice (and a reference date where time matters) and returns a
//! value. Monetary results stay unrounded here, rounding to two decimals
//! happens at presentation time only.

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::ledger::Transaction;

/// Window length for the trailing daily income/expense series.
pub const DEFAULT_WINDOW_DAYS: usize = 7;

const PROJECTED_SAVINGS_RATE: f64 = 0.20;

/// Net balance: income sum minus expense sum.
pub fn balance(transactions: &[Transaction]) -> f64 {
    transactions.iter().map(Transaction::signed_amount).sum()
}

pub fn total_income(transactions: &[Transaction]) -> f64 {
    transactions
        .iter()
        .filter(|t| t.is_income())
        .map(|t| t.amount)
        .sum()
}

pub fn total_expense(transactions: &[Transaction]) -> f64 {
    transactions
        .iter()
        .filter(|t| t.is_expense())
        .map(|t| t.amount)
        .sum()
}

/// Expense total for the calendar month and year of `today`.
pub fn current_month_expense(transactions: &[Transaction], today: NaiveDate) -> f64 {
    transactions
        .iter()
        .filter(|t| {
            t.is_expense() && t.date.month() == today.month() && t.date.year() == today.year()
        })
        .map(|t| t.amount)
        .sum()
}

/// One expense category and its summed amount.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// Expense totals per category, in first-encountered order.
pub fn category_totals(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for txn in transactions.iter().filter(|t| t.is_expense()) {
        match totals.iter_mut().find(|c| c.category == txn.category) {
            Some(entry) => entry.total += txn.amount,
            None => totals.push(CategoryTotal {
                category: txn.category.clone(),
                total: txn.amount,
            }),
        }
    }
    totals
}

/// A category's expense total and its share of all expenses.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub category: String,
    pub total: f64,
    pub percent: f64,
}

/// Per-category expense shares, sorted descending by amount. The sort is
/// stable, so ties keep first-encountered order.
pub fn category_breakdown(transactions: &[Transaction]) -> Vec<CategoryShare> {
    let mut totals = category_totals(transactions);
    totals.sort_by(|a, b| b.total.partial_cmp(&a.total).unwrap_or(std::cmp::Ordering::Equal));
    let overall: f64 = totals.iter().map(|c| c.total).sum();
    totals
        .into_iter()
        .map(|c| {
            let percent = if overall > 0.0 {
                c.total / overall * 100.0
            } else {
                0.0
            };
            CategoryShare {
                category: c.category,
                total: c.total,
                percent,
            }
        })
        .collect()
}

/// Category with the largest expense total, if any expenses exist.
pub fn top_category(transactions: &[Transaction]) -> Option<CategoryTotal> {
    category_totals(transactions)
        .into_iter()
        .fold(None, |best: Option<CategoryTotal>, candidate| match best {
            Some(current) if current.total >= candidate.total => Some(current),
            _ => Some(candidate),
        })
}

/// Aligned daily income and expense sums for a trailing window of days.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySeries {
    pub days: Vec<NaiveDate>,
    pub income: Vec<f64>,
    pub expense: Vec<f64>,
}

/// Sums income and expense per calendar day for the last `window_days` days
/// ending at `today` inclusive, oldest first and zero-filled.
pub fn daily_series(
    transactions: &[Transaction],
    today: NaiveDate,
    window_days: usize,
) -> DailySeries {
    let mut days = Vec::with_capacity(window_days);
    let mut income = Vec::with_capacity(window_days);
    let mut expense = Vec::with_capacity(window_days);
    for offset in (0..window_days as u64).rev() {
        let day = today
            .checked_sub_days(Days::new(offset))
            .unwrap_or(NaiveDate::MIN);
        let day_income: f64 = transactions
            .iter()
            .filter(|t| t.is_income() && t.date == day)
            .map(|t| t.amount)
            .sum();
        let day_expense: f64 = transactions
            .iter()
            .filter(|t| t.is_expense() && t.date == day)
            .map(|t| t.amount)
            .sum();
        days.push(day);
        income.push(day_income);
        expense.push(day_expense);
    }
    DailySeries {
        days,
        income,
        expense,
    }
}

/// The weekday with the lowest expense total.
#[derive(Debug, Clone, PartialEq)]
pub struct BestDay {
    pub weekday: Weekday,
    pub total: f64,
}

/// Weekday with the *minimum* expense total. "Best" deliberately means the
/// least-spending day; ties keep the first-encountered weekday.
pub fn best_spending_day(transactions: &[Transaction]) -> Option<BestDay> {
    let mut per_day: Vec<BestDay> = Vec::new();
    for txn in transactions.iter().filter(|t| t.is_expense()) {
        let weekday = txn.date.weekday();
        match per_day.iter_mut().find(|d| d.weekday == weekday) {
            Some(entry) => entry.total += txn.amount,
            None => per_day.push(BestDay {
                weekday,
                total: txn.amount,
            }),
        }
    }
    per_day.into_iter().fold(None, |best, candidate| match best {
        Some(current) if current.total <= candidate.total => Some(current),
        _ => Some(candidate),
    })
}

/// Full English weekday label for display.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthBand {
    Excellent,
    Good,
    NeedsAttention,
}

impl HealthBand {
    pub fn label(&self) -> &'static str {
        match self {
            HealthBand::Excellent => "excellent",
            HealthBand::Good => "good",
            HealthBand::NeedsAttention => "needs attention",
        }
    }
}

/// A 0-100 heuristic derived from the savings rate, with its band label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthScore {
    pub score: u8,
    pub band: HealthBand,
}

/// Savings rate as a percentage of income, rounded and clamped to 0-100.
/// Zero income scores zero; no division by zero is possible.
pub fn health_score(total_income: f64, total_expense: f64) -> HealthScore {
    let savings_rate = if total_income > 0.0 {
        (total_income - total_expense) / total_income * 100.0
    } else {
        0.0
    };
    let score = savings_rate.round().clamp(0.0, 100.0) as u8;
    let band = match score {
        70..=100 => HealthBand::Excellent,
        40..=69 => HealthBand::Good,
        _ => HealthBand::NeedsAttention,
    };
    HealthScore { score, band }
}

/// Illustrative potential savings: 20% of the expense total.
pub fn projected_savings(total_expense: f64) -> f64 {
    total_expense * PROJECTED_SAVINGS_RATE
}

/// Mean expense amount; an empty expense list averages to zero.
pub fn average_expense(transactions: &[Transaction]) -> f64 {
    let count = transactions.iter().filter(|t| t.is_expense()).count();
    total_expense(transactions) / count.max(1) as f64
}

/// Expense total for the trailing `days` days (date on or after
/// `today - days`).
pub fn recent_expense(transactions: &[Transaction], today: NaiveDate, days: u64) -> f64 {
    let cutoff = today.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN);
    transactions
        .iter()
        .filter(|t| t.is_expense() && t.date >= cutoff)
        .map(|t| t.amount)
        .sum()
}

/// One-pass snapshot of everything the insights view renders.
#[derive(Debug, Clone, PartialEq)]
pub struct Insights {
    pub total_income: f64,
    pub total_expense: f64,
    pub net: f64,
    pub health: HealthScore,
    pub top_category: Option<CategoryTotal>,
    pub recent_week_expense: f64,
    pub average_expense: f64,
    pub best_day: Option<BestDay>,
    pub projected_savings: f64,
}

pub fn insights(transactions: &[Transaction], today: NaiveDate) -> Insights {
    let income = total_income(transactions);
    let expense = total_expense(transactions);
    Insights {
        total_income: income,
        total_expense: expense,
        net: income - expense,
        health: health_score(income, expense),
        top_category: top_category(transactions),
        recent_week_expense: recent_expense(transactions, today, 7),
        average_expense: average_expense(transactions),
        best_day: best_spending_day(transactions),
        projected_savings: projected_savings(expense),
    }
}
