use chrono::Utc;

use crate::{analytics, errors::LedgerError, storage::StorageBackend};

use super::{Transaction, TransactionDraft};

/// Notification emitted after a ledger mutation, carrying the balance on both
/// sides of the change so subscribers can decide on feedback effects.
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerEvent {
    Added {
        transaction: Transaction,
        balance_before: f64,
        balance_after: f64,
    },
    Deleted {
        id: i64,
        balance_before: f64,
        balance_after: f64,
    },
}

type Subscriber = Box<dyn Fn(&LedgerEvent)>;

/// Owns the ordered transaction sequence for one user session.
///
/// The store is the sole mutator of the ledger: every successful mutation is
/// persisted wholesale through the storage backend and announced to
/// subscribers. Persistence write failures are logged and deliberately not
/// surfaced to the mutation caller.
pub struct LedgerStore {
    user_key: String,
    transactions: Vec<Transaction>,
    storage: Box<dyn StorageBackend>,
    subscribers: Vec<Subscriber>,
    last_id: i64,
}

impl LedgerStore {
    /// Opens the ledger for `user_key`, loading whatever the backend has
    /// stored (an empty ledger when nothing is stored or the data is
    /// unreadable).
    pub fn open(user_key: impl Into<String>, storage: Box<dyn StorageBackend>) -> Self {
        let user_key = user_key.into();
        let transactions = storage.load(&user_key);
        let last_id = transactions.iter().map(|t| t.id).max().unwrap_or(0);
        tracing::debug!(
            user = %user_key,
            count = transactions.len(),
            "ledger session opened"
        );
        Self {
            user_key,
            transactions,
            storage,
            subscribers: Vec::new(),
            last_id,
        }
    }

    pub fn user_key(&self) -> &str {
        &self.user_key
    }

    /// Read-only view of the ledger in insertion order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Registers a callback invoked after every mutation.
    pub fn subscribe(&mut self, callback: impl Fn(&LedgerEvent) + 'static) {
        self.subscribers.push(Box::new(callback));
    }

    /// Validates and records a new transaction, returning the stored record.
    ///
    /// The id is derived from the creation instant in Unix milliseconds and
    /// bumped past the previous id on collision, so ids stay unique and
    /// non-decreasing within a session. The date defaults to today (UTC) when
    /// the draft does not carry one.
    pub fn add(&mut self, draft: TransactionDraft) -> Result<Transaction, LedgerError> {
        draft.validate()?;
        let balance_before = analytics::balance(&self.transactions);

        let id = Utc::now().timestamp_millis().max(self.last_id + 1);
        let transaction = Transaction {
            id,
            description: draft.description,
            amount: draft.amount,
            category: draft.category,
            kind: draft.kind,
            date: draft.date.unwrap_or_else(|| Utc::now().date_naive()),
        };
        self.last_id = id;
        self.transactions.push(transaction.clone());
        self.persist();

        let balance_after = analytics::balance(&self.transactions);
        self.notify(&LedgerEvent::Added {
            transaction: transaction.clone(),
            balance_before,
            balance_after,
        });
        Ok(transaction)
    }

    /// Removes the transaction with the matching id, reporting whether a
    /// removal occurred. Deleting an absent id is a no-op.
    pub fn delete(&mut self, id: i64) -> bool {
        let Some(index) = self.transactions.iter().position(|t| t.id == id) else {
            return false;
        };
        let balance_before = analytics::balance(&self.transactions);
        self.transactions.remove(index);
        self.persist();

        let balance_after = analytics::balance(&self.transactions);
        self.notify(&LedgerEvent::Deleted {
            id,
            balance_before,
            balance_after,
        });
        true
    }

    fn persist(&self) {
        if let Err(err) = self.storage.save(&self.user_key, &self.transactions) {
            tracing::warn!(user = %self.user_key, %err, "failed to persist ledger");
        }
    }

    fn notify(&self, event: &LedgerEvent) {
        for subscriber in &self.subscribers {
            subscriber(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::TransactionKind;
    use crate::storage::JsonStorage;
    use chrono::NaiveDate;
    use std::{cell::RefCell, rc::Rc};
    use tempfile::TempDir;

    fn open_store() -> (LedgerStore, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let storage = JsonStorage::new(Some(temp.path().to_path_buf())).expect("json storage");
        (LedgerStore::open("tester", Box::new(storage)), temp)
    }

    fn expense_draft(amount: f64) -> TransactionDraft {
        TransactionDraft::new("Lunch", amount, "Food", TransactionKind::Expense)
            .on(NaiveDate::from_ymd_opt(2024, 6, 2).unwrap())
    }

    #[test]
    fn add_appends_exactly_one_record_with_submitted_fields() {
        let (mut store, _guard) = open_store();
        let recorded = store.add(expense_draft(25.0)).expect("add transaction");
        assert_eq!(store.len(), 1);
        let stored = &store.transactions()[0];
        assert_eq!(stored, &recorded);
        assert_eq!(stored.description, "Lunch");
        assert_eq!(stored.amount, 25.0);
        assert_eq!(stored.category, "Food");
        assert_eq!(stored.kind, TransactionKind::Expense);
    }

    #[test]
    fn add_assigns_unique_non_decreasing_ids() {
        let (mut store, _guard) = open_store();
        let first = store.add(expense_draft(1.0)).unwrap();
        let second = store.add(expense_draft(2.0)).unwrap();
        let third = store.add(expense_draft(3.0)).unwrap();
        assert!(first.id < second.id && second.id < third.id);
    }

    #[test]
    fn add_rejects_invalid_drafts_without_mutating() {
        let (mut store, _guard) = open_store();
        let blank = TransactionDraft::new("", 10.0, "Food", TransactionKind::Expense);
        assert!(store.add(blank).is_err());
        let negative = TransactionDraft::new("Lunch", -1.0, "Food", TransactionKind::Expense);
        assert!(store.add(negative).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn delete_removes_only_the_matching_record() {
        let (mut store, _guard) = open_store();
        let keep = store.add(expense_draft(1.0)).unwrap();
        let drop = store.add(expense_draft(2.0)).unwrap();
        assert!(store.delete(drop.id));
        assert_eq!(store.len(), 1);
        assert_eq!(store.transactions()[0].id, keep.id);
    }

    #[test]
    fn delete_of_unknown_id_is_a_noop() {
        let (mut store, _guard) = open_store();
        store.add(expense_draft(1.0)).unwrap();
        assert!(!store.delete(42));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn events_carry_before_and_after_balance() {
        let (mut store, _guard) = open_store();
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        store.subscribe(move |event| sink.borrow_mut().push(event.clone()));

        let income =
            TransactionDraft::new("Salary", 1000.0, "Salary", TransactionKind::Income);
        let recorded = store.add(income).unwrap();
        store.add(expense_draft(200.0)).unwrap();
        store.delete(recorded.id);

        let events = events.borrow();
        assert_eq!(events.len(), 3);
        assert!(matches!(
            events[0],
            LedgerEvent::Added { balance_before, balance_after, .. }
                if balance_before == 0.0 && balance_after == 1000.0
        ));
        assert!(matches!(
            events[1],
            LedgerEvent::Added { balance_before, balance_after, .. }
                if balance_before == 1000.0 && balance_after == 800.0
        ));
        assert!(matches!(
            events[2],
            LedgerEvent::Deleted { balance_before, balance_after, .. }
                if balance_before == 800.0 && balance_after == -200.0
        ));
    }

    #[test]
    fn reopened_session_sees_persisted_transactions() {
        let temp = TempDir::new().expect("temp dir");
        let storage = JsonStorage::new(Some(temp.path().to_path_buf())).expect("json storage");
        let mut store = LedgerStore::open("tester", Box::new(storage.clone()));
        store.add(expense_draft(25.0)).unwrap();
        drop(store);

        let reopened = LedgerStore::open("tester", Box::new(storage));
        assert_eq!(reopened.len(), 1);
        assert_eq!(reopened.transactions()[0].description, "Lunch");
    }
}
