//! Client-side cart store: a product-id to quantity mapping persisted as one
//! JSON blob, with totals recomputed from scratch on every mutation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: i32,
    pub name: String,
    pub price: Decimal,
    pub image: Option<String>,
    pub quantity: i32,
}

/// Whole-cart persistence with last-write-wins semantics. The browser
/// counterpart is a single local-storage key.
pub trait CartStorage {
    fn load(&self) -> Option<String>;
    fn store(&mut self, payload: &str);
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    payload: Option<String>,
}

impl CartStorage for MemoryStorage {
    fn load(&self) -> Option<String> {
        self.payload.clone()
    }

    fn store(&mut self, payload: &str) {
        self.payload = Some(payload.to_string());
    }
}

#[derive(Debug)]
pub struct Cart<S: CartStorage> {
    items: Vec<CartItem>,
    total_items: i32,
    total_price: Decimal,
    storage: S,
}

impl<S: CartStorage> Cart<S> {
    /// Restores the cart from storage. A missing or corrupt payload starts an
    /// empty cart rather than failing.
    pub fn load(storage: S) -> Self {
        let items = storage
            .load()
            .and_then(|payload| serde_json::from_str(&payload).ok())
            .unwrap_or_default();

        let mut cart = Self {
            items,
            total_items: 0,
            total_price: Decimal::ZERO,
            storage,
        };
        cart.recompute_totals();
        cart
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn total_items(&self) -> i32 {
        self.total_items
    }

    pub fn total_price(&self) -> Decimal {
        self.total_price
    }

    pub fn quantity_of(&self, product_id: i32) -> i32 {
        self.items
            .iter()
            .find(|item| item.product_id == product_id)
            .map(|item| item.quantity)
            .unwrap_or(0)
    }

    /// Merges by product id, summing quantities. No check that the quantity
    /// stays positive or within stock.
    pub fn add_to_cart(&mut self, item: CartItem) {
        match self
            .items
            .iter_mut()
            .find(|existing| existing.product_id == item.product_id)
        {
            Some(existing) => existing.quantity += item.quantity,
            None => self.items.push(item),
        }

        self.sync();
    }

    /// Overwrites the quantity of an existing line; unknown ids are ignored.
    pub fn update_quantity(&mut self, product_id: i32, quantity: i32) {
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.product_id == product_id)
        {
            item.quantity = quantity;
        }

        self.sync();
    }

    pub fn remove_from_cart(&mut self, product_id: i32) {
        self.items.retain(|item| item.product_id != product_id);

        self.sync();
    }

    pub fn clear_cart(&mut self) {
        self.items.clear();

        self.sync();
    }

    /// Every mutation re-serializes the whole cart and rescans it for totals.
    fn sync(&mut self) {
        match serde_json::to_string(&self.items) {
            Ok(payload) => self.storage.store(&payload),
            Err(e) => tracing::error!("Failed to serialize cart: {}", e),
        }

        self.recompute_totals();
    }

    fn recompute_totals(&mut self) {
        self.total_items = self.items.iter().map(|item| item.quantity).sum();
        self.total_price = self
            .items
            .iter()
            .map(|item| item.price * Decimal::from(item.quantity))
            .sum();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::dec;

    fn item(product_id: i32, price: Decimal, quantity: i32) -> CartItem {
        CartItem {
            product_id,
            name: format!("product-{}", product_id),
            price,
            image: None,
            quantity,
        }
    }

    #[test]
    fn test_add_merges_by_product_id() {
        let mut cart = Cart::load(MemoryStorage::default());

        cart.add_to_cart(item(1, dec!(2.5), 2));
        cart.add_to_cart(item(1, dec!(2.5), 3));

        assert_eq!(cart.quantity_of(1), 5);
        assert_eq!(cart.total_items(), 5);
        assert_eq!(cart.total_price(), dec!(12.5));
    }

    #[test]
    fn test_update_quantity_overwrites() {
        let mut cart = Cart::load(MemoryStorage::default());

        cart.add_to_cart(item(1, dec!(1.0), 4));
        cart.update_quantity(1, 2);

        assert_eq!(cart.quantity_of(1), 2);
        assert_eq!(cart.total_price(), dec!(2.0));
    }

    #[test]
    fn test_remove_filters_out_line() {
        let mut cart = Cart::load(MemoryStorage::default());

        cart.add_to_cart(item(1, dec!(1.0), 1));
        cart.add_to_cart(item(2, dec!(3.0), 2));
        cart.remove_from_cart(1);

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.total_items(), 2);
        assert_eq!(cart.total_price(), dec!(6.0));
    }

    #[test]
    fn test_clear_empties_cart() {
        let mut cart = Cart::load(MemoryStorage::default());

        cart.add_to_cart(item(1, dec!(1.0), 1));
        cart.clear_cart();

        assert!(cart.items().is_empty());
        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.total_price(), Decimal::ZERO);
    }

    #[test]
    fn test_mutations_persist_to_storage() {
        let mut cart = Cart::load(MemoryStorage::default());
        cart.add_to_cart(item(1, dec!(2.5), 2));

        let Cart { storage, .. } = cart;
        let reloaded = Cart::load(storage);

        assert_eq!(reloaded.quantity_of(1), 2);
        assert_eq!(reloaded.total_price(), dec!(5.0));
    }

    #[test]
    fn test_corrupt_payload_starts_empty() {
        let mut storage = MemoryStorage::default();
        storage.store("not json");

        let cart = Cart::load(storage);

        assert!(cart.items().is_empty());
        assert_eq!(cart.total_items(), 0);
    }
}
