//! Transaction model
//!
//! A cleared bilateral trade of the conversion-year entitlement. Once a
//! transaction is recorded it is immutable; the seller's effective vote
//! becomes the transaction's year, and wealth moves from buyer to seller
//! by exactly `price`.

use serde::{Deserialize, Serialize};

use crate::models::household::{HouseholdId, Year};

/// A cleared trade between one buyer and one seller
///
/// # Example
/// ```
/// use polder_auction_core::Transaction;
///
/// let trade = Transaction::new(0, 1, 3, 9.0);
/// assert_eq!(trade.buyer(), 0);
/// assert_eq!(trade.seller(), 1);
/// assert_eq!(trade.year(), 3);
/// assert_eq!(trade.price(), 9.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Household paying to pull the seller into `year`
    buyer: HouseholdId,

    /// Household selling its entitlement; its vote becomes `year`
    seller: HouseholdId,

    /// Conversion year the seller commits to vote for
    year: Year,

    /// Clearing price (midpoint of offer and ask)
    price: f64,
}

impl Transaction {
    /// Record a cleared trade
    ///
    /// # Panics
    /// Panics if price is negative or non-finite, or buyer == seller.
    pub fn new(buyer: HouseholdId, seller: HouseholdId, year: Year, price: f64) -> Self {
        assert!(price >= 0.0 && price.is_finite(), "price must be finite and non-negative");
        assert!(buyer != seller, "buyer and seller must differ");
        Self {
            buyer,
            seller,
            year,
            price,
        }
    }

    /// Buyer household id
    pub fn buyer(&self) -> HouseholdId {
        self.buyer
    }

    /// Seller household id
    pub fn seller(&self) -> HouseholdId {
        self.seller
    }

    /// Year traded into
    pub fn year(&self) -> Year {
        self.year
    }

    /// Clearing price
    pub fn price(&self) -> f64 {
        self.price
    }
}
