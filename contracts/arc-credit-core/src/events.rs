use soroban_sdk::{contractevent, Address};

use crate::storage::Stablecoin;

/// Emitted when a loan is originated and the stablecoin disbursed.
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LoanCreated {
    #[topic]
    pub borrower: Address,
    pub collateral_amount: u128,
    pub borrowed_amount: u128,
    pub credit_score: u32,
    pub rate_bps: u32,
    pub asset: Stablecoin,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InterestAccrued {
    #[topic]
    pub borrower: Address,
    pub interest_added: u128,
    pub interest_accrued: u128,
}

/// Emitted when a loan is settled and its collateral released.
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LoanRepaid {
    #[topic]
    pub borrower: Address,
    pub principal: u128,
    pub interest: u128,
    pub collateral_returned: u128,
    pub asset: Stablecoin,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReservesFunded {
    #[topic]
    pub funder: Address,
    pub asset: Stablecoin,
    pub amount: u128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReservesWithdrawn {
    #[topic]
    pub to: Address,
    pub asset: Stablecoin,
    pub amount: u128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NewRateModel {
    #[topic]
    pub model: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NewAdmin {
    #[topic]
    pub admin: Address,
}
