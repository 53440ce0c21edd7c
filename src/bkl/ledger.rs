use crate::ids::{AccountId, MovementId};
use crate::models::Movement;
use crate::Money;
use crate::money::MoneyError;

use std::collections::HashMap;

/// Represents a WORM (Write Once, Read Many) data structure for keeping track of movements
#[derive(Debug, Default)]
pub struct Ledger {
    history: Vec<Movement>,
    lookup_map: HashMap<MovementId, usize>,
    account_map: HashMap<AccountId, Vec<usize>>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, movement: Movement) -> usize {
        let index = self.history.len();

        self.lookup_map.insert(movement.id, index);
        self.account_map
            .entry(movement.account_id)
            .or_default()
            .push(index);

        self.history.push(movement);

        index
    }

    pub fn get_by_index(&self, index: &usize) -> Option<&Movement> {
        self.history.get(*index)
    }

    pub fn get(&self, id: &MovementId) -> Option<&Movement> {
        self.lookup_map
            .get(id)
            .and_then(|index| self.get_by_index(index))
    }

    /// Indicies of an account's movements, in append order
    pub fn find_indicies_for_account(&self, account_id: AccountId) -> &[usize] {
        self.account_map
            .get(&account_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Movements of an account in the order they were recorded
    pub fn movements_for(&self, account_id: AccountId) -> Vec<&Movement> {
        self.find_indicies_for_account(account_id)
            .iter()
            .filter_map(|idx| self.get_by_index(idx))
            .collect()
    }

    /// Replays every movement of an account to rebuild its balance
    pub fn balance_of(&self, account_id: AccountId) -> Result<Money, MoneyError> {
        let mut balance = Money::ZERO;

        for movement in self.movements_for(account_id) {
            balance.add(&movement.signed_amount())?;
        }

        Ok(balance)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Movement> {
        self.history.iter()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
