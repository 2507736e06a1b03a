//! Admin bookkeeping: the debtor ledger, the expense log, and the sticky
//! note board.

use crate::errors::{Error, Result};
use crate::models::{timestamp_id, Debtor, Expense, ExpenseKind, StickyNote};
use crate::store::{self, keys};
use sea_orm::DatabaseConnection;
use tracing::{info, instrument};

pub async fn get_debtors(db: &DatabaseConnection) -> Result<Vec<Debtor>> {
    store::read_collection(db, keys::DEBTORS).await
}

/// Records a new debt, newest first.
#[instrument(skip(db, name, reason), fields(name = %name))]
pub async fn add_debtor(
    db: &DatabaseConnection,
    name: &str,
    amount: f64,
    reason: &str,
    phone: Option<String>,
    now_ms: i64,
) -> Result<Vec<Debtor>> {
    if name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Debtor name cannot be empty".to_string(),
        });
    }
    if amount <= 0.0 {
        return Err(Error::Validation {
            message: format!("Debt amount must be positive, got {amount}"),
        });
    }

    let mut debtors = get_debtors(db).await?;
    debtors.insert(
        0,
        Debtor {
            id: timestamp_id(now_ms),
            name: name.to_string(),
            amount,
            reason: reason.to_string(),
            date: now_ms,
            phone,
            is_paid: false,
        },
    );
    store::write_value(db, keys::DEBTORS, &debtors).await?;
    Ok(debtors)
}

/// Marks a debt as settled; the entry stays in the ledger.
#[instrument(skip(db))]
pub async fn pay_debt(db: &DatabaseConnection, debtor_id: &str) -> Result<Vec<Debtor>> {
    let mut debtors = get_debtors(db).await?;
    for debtor in &mut debtors {
        if debtor.id == debtor_id {
            debtor.is_paid = true;
            info!("Debt '{}' marked paid", debtor_id);
        }
    }
    store::write_value(db, keys::DEBTORS, &debtors).await?;
    Ok(debtors)
}

pub async fn get_expenses(db: &DatabaseConnection) -> Result<Vec<Expense>> {
    store::read_collection(db, keys::EXPENSES).await
}

/// Logs a business expense, newest first.
#[instrument(skip(db, description))]
pub async fn add_expense(
    db: &DatabaseConnection,
    description: &str,
    amount: f64,
    category: ExpenseKind,
    now_ms: i64,
) -> Result<Vec<Expense>> {
    if amount <= 0.0 {
        return Err(Error::Validation {
            message: format!("Expense amount must be positive, got {amount}"),
        });
    }

    let mut expenses = get_expenses(db).await?;
    expenses.insert(
        0,
        Expense {
            id: timestamp_id(now_ms),
            description: description.to_string(),
            amount,
            date: now_ms,
            category,
        },
    );
    store::write_value(db, keys::EXPENSES, &expenses).await?;
    Ok(expenses)
}

pub async fn get_sticky_notes(db: &DatabaseConnection) -> Result<Vec<StickyNote>> {
    store::read_collection(db, keys::STICKY_NOTES).await
}

/// Pins a note on the board.
pub async fn add_sticky_note(
    db: &DatabaseConnection,
    text: &str,
    color: &str,
    now_ms: i64,
) -> Result<Vec<StickyNote>> {
    let mut notes = get_sticky_notes(db).await?;
    notes.insert(
        0,
        StickyNote {
            id: timestamp_id(now_ms),
            text: text.to_string(),
            color: color.to_string(),
        },
    );
    store::write_value(db, keys::STICKY_NOTES, &notes).await?;
    Ok(notes)
}

/// Removes a note from the board.
pub async fn delete_sticky_note(db: &DatabaseConnection, note_id: &str) -> Result<Vec<StickyNote>> {
    let mut notes = get_sticky_notes(db).await?;
    notes.retain(|n| n.id != note_id);
    store::write_value(db, keys::STICKY_NOTES, &notes).await?;
    Ok(notes)
}
