//! Write paths of the ledger.
//!
//! Every function here runs against a [`LedgerTransaction`], so a job made
//! of several calls either commits as a whole or leaves no trace. Storage
//! backends provide the transaction; the rules live here.

use chrono::NaiveDateTime;
use log::debug;

use super::balance_calculator::{check_movement, compute_balance};
use super::movements_model::{
    normalize_note, validate_quantity, Movement, MovementKind, MovementUpdate, NewMovement,
    TransferRequest, TransferResult,
};
use crate::utils::time_utils::next_ledger_timestamp;
use crate::{Error, Result};

/// Unit of work handed to ledger jobs by the storage layer.
///
/// All reads observe the writes made earlier in the same transaction.
pub trait LedgerTransaction {
    fn product_exists(&mut self, sku: &str) -> Result<bool>;

    fn warehouse_exists(&mut self, warehouse_id: i32) -> Result<bool>;

    /// All movements of one SKU/warehouse pair, in any order.
    fn pair_history(&mut self, sku: &str, warehouse_id: i32) -> Result<Vec<Movement>>;

    fn get_movement(&mut self, movement_id: i32) -> Result<Option<Movement>>;

    /// Inserts the movement with the given timestamp and a zero cached balance.
    fn insert_movement(
        &mut self,
        movement: &NewMovement,
        timestamp: NaiveDateTime,
    ) -> Result<Movement>;

    fn update_movement(
        &mut self,
        movement_id: i32,
        quantity: i64,
        note: Option<String>,
    ) -> Result<Movement>;

    fn delete_movement(&mut self, movement_id: i32) -> Result<usize>;

    fn set_cached_balance(&mut self, movement_id: i32, balance: i64) -> Result<()>;
}

/// A ledger job as executed by the storage writer.
pub type LedgerJob =
    Box<dyn FnOnce(&mut dyn LedgerTransaction) -> Result<Vec<Movement>> + Send + 'static>;

fn ensure_exists(tx: &mut dyn LedgerTransaction, sku: &str, warehouse_id: i32) -> Result<()> {
    if !tx.product_exists(sku)? {
        return Err(Error::NotFound(format!("Product '{}'", sku)));
    }
    if !tx.warehouse_exists(warehouse_id)? {
        return Err(Error::NotFound(format!("Warehouse {}", warehouse_id)));
    }
    Ok(())
}

/// Records one movement and stores the resulting balance on the new row.
pub fn record_in(
    tx: &mut dyn LedgerTransaction,
    new_movement: NewMovement,
    now: NaiveDateTime,
) -> Result<Movement> {
    let new_movement = new_movement.normalized()?;
    ensure_exists(tx, &new_movement.sku, new_movement.warehouse_id)?;

    let history = tx.pair_history(&new_movement.sku, new_movement.warehouse_id)?;
    let current = compute_balance(&history);
    check_movement(
        &new_movement.sku,
        new_movement.warehouse_id,
        new_movement.kind,
        new_movement.quantity,
        current,
    )?;

    let latest = history.iter().map(|m| m.timestamp).max();
    let timestamp = next_ledger_timestamp(now, latest);
    let mut inserted = tx.insert_movement(&new_movement, timestamp)?;

    let balance = compute_balance(&tx.pair_history(&inserted.sku, inserted.warehouse_id)?);
    tx.set_cached_balance(inserted.id, balance)?;
    inserted.balance = balance;

    debug!(
        "Recorded {} of {} for '{}' in warehouse {} (balance {})",
        inserted.kind, inserted.quantity, inserted.sku, inserted.warehouse_id, balance
    );
    Ok(inserted)
}

/// Moves stock between two warehouses as an EXIT followed by an ENTRY.
pub fn transfer_in(
    tx: &mut dyn LedgerTransaction,
    request: TransferRequest,
    now: NaiveDateTime,
) -> Result<TransferResult> {
    if request.origin_id == request.destination_id {
        return Err(Error::invalid_input(
            "Origin and destination warehouses must differ",
        ));
    }
    if request.quantity <= 0 {
        return Err(Error::invalid_input("Transfer quantity must be positive"));
    }
    let sku = request.sku.trim().to_string();
    if !tx.warehouse_exists(request.destination_id)? {
        return Err(Error::NotFound(format!(
            "Warehouse {}",
            request.destination_id
        )));
    }

    let exit = record_in(
        tx,
        NewMovement {
            sku: sku.clone(),
            warehouse_id: request.origin_id,
            quantity: request.quantity,
            kind: MovementKind::Exit,
            note: request.note.clone(),
        },
        now,
    )?;
    let entry = record_in(
        tx,
        NewMovement {
            sku,
            warehouse_id: request.destination_id,
            quantity: request.quantity,
            kind: MovementKind::Entry,
            note: request.note,
        },
        now,
    )?;
    Ok(TransferResult { exit, entry })
}

fn negative_balance_error(before: &Movement, current: i64, after: i64) -> Error {
    Error::InsufficientBalance {
        sku: before.sku.clone(),
        warehouse_id: before.warehouse_id,
        available: current,
        requested: current - after,
    }
}

/// Edits quantity and note of a recorded movement.
pub fn update_in(
    tx: &mut dyn LedgerTransaction,
    movement_id: i32,
    update: MovementUpdate,
) -> Result<Movement> {
    let existing = tx
        .get_movement(movement_id)?
        .ok_or_else(|| Error::NotFound(format!("Movement {}", movement_id)))?;
    validate_quantity(existing.kind, update.quantity)?;
    let note = normalize_note(update.note)?;

    let current = compute_balance(&tx.pair_history(&existing.sku, existing.warehouse_id)?);
    let mut updated = tx.update_movement(movement_id, update.quantity, note)?;
    let after = compute_balance(&tx.pair_history(&existing.sku, existing.warehouse_id)?);
    if after < 0 {
        return Err(negative_balance_error(&existing, current, after));
    }
    tx.set_cached_balance(movement_id, after)?;
    updated.balance = after;
    Ok(updated)
}

/// Removes a movement, refusing when the remaining history goes negative.
///
/// Returns the removed row.
pub fn delete_in(tx: &mut dyn LedgerTransaction, movement_id: i32) -> Result<Movement> {
    let existing = tx
        .get_movement(movement_id)?
        .ok_or_else(|| Error::NotFound(format!("Movement {}", movement_id)))?;

    let current = compute_balance(&tx.pair_history(&existing.sku, existing.warehouse_id)?);
    tx.delete_movement(movement_id)?;
    let after = compute_balance(&tx.pair_history(&existing.sku, existing.warehouse_id)?);
    if after < 0 {
        return Err(negative_balance_error(&existing, current, after));
    }
    debug!(
        "Deleted movement {} of '{}' in warehouse {}",
        movement_id, existing.sku, existing.warehouse_id
    );
    Ok(existing)
}
