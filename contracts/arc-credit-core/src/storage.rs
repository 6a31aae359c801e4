use soroban_sdk::{contracttype, Address, Env};

use crate::constants::{TTL_EXTEND_TO, TTL_THRESHOLD};

#[soroban_sdk::contractclient(name = "RateModelClient")]
pub trait RateModelContract {
    fn calculate_borrow_rate(env: Env, credit_score: u32) -> u32;
}

#[contracttype]
pub enum DataKey {
    Admin,                     // Address
    Usdc,                      // Address, also the collateral asset
    Eurc,                      // Address
    RateModel,                 // Address
    Loan(Address),             // Loan per borrower
    TotalCollateral,           // u128, USDC held in custody
    TotalBorrowed(Stablecoin), // u128 principal outstanding per asset
}

/// Asset a loan is disbursed and repaid in. Collateral is always USDC.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Stablecoin {
    Usdc = 0,
    Eurc = 1,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Loan {
    pub collateral_amount: u128,
    pub borrowed_amount: u128,
    pub borrowed_asset: Stablecoin,
    pub interest_accrued: u128,
    pub credit_score: u32,
    pub rate_bps: u32,
    pub last_accrual_timestamp: u64,
    pub active: bool,
}

impl Loan {
    /// Settled loan: everything zeroed, record kept.
    pub fn closed(borrowed_asset: Stablecoin, now: u64) -> Self {
        Loan {
            collateral_amount: 0,
            borrowed_amount: 0,
            borrowed_asset,
            interest_accrued: 0,
            credit_score: 0,
            rate_bps: 0,
            last_accrual_timestamp: now,
            active: false,
        }
    }

    pub fn total_owed(&self) -> u128 {
        self.borrowed_amount.saturating_add(self.interest_accrued)
    }
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().persistent().has(&DataKey::Admin)
}

pub fn ensure_initialized(env: &Env) {
    if !is_initialized(env) {
        panic!("not initialized");
    }
    bump_core_ttl(env);
}

pub fn require_admin(env: &Env, admin: &Address) {
    let stored: Address = env
        .storage()
        .persistent()
        .get(&DataKey::Admin)
        .expect("not initialized");
    bump_core_ttl(env);
    if stored != *admin {
        panic!("not admin");
    }
    admin.require_auth();
}

pub fn read_admin(env: &Env) -> Address {
    env.storage()
        .persistent()
        .get(&DataKey::Admin)
        .expect("not initialized")
}

pub fn token_address(env: &Env, asset: Stablecoin) -> Address {
    let key = match asset {
        Stablecoin::Usdc => DataKey::Usdc,
        Stablecoin::Eurc => DataKey::Eurc,
    };
    env.storage()
        .persistent()
        .get(&key)
        .expect("not initialized")
}

/// Collateral is always posted in USDC.
pub fn collateral_token(env: &Env) -> Address {
    token_address(env, Stablecoin::Usdc)
}

pub fn rate_model(env: &Env) -> RateModelClient<'_> {
    let addr: Address = env
        .storage()
        .persistent()
        .get(&DataKey::RateModel)
        .expect("rate model not set");
    RateModelClient::new(env, &addr)
}

pub fn read_loan(env: &Env, borrower: &Address) -> Option<Loan> {
    let key = DataKey::Loan(borrower.clone());
    let loan = env.storage().persistent().get(&key);
    if loan.is_some() {
        bump_loan_ttl(env, borrower);
    }
    loan
}

pub fn read_active_loan(env: &Env, borrower: &Address) -> Option<Loan> {
    read_loan(env, borrower).filter(|loan| loan.active)
}

pub fn write_loan(env: &Env, borrower: &Address, loan: &Loan) {
    env.storage()
        .persistent()
        .set(&DataKey::Loan(borrower.clone()), loan);
    bump_loan_ttl(env, borrower);
}

pub fn read_total_collateral(env: &Env) -> u128 {
    env.storage()
        .persistent()
        .get(&DataKey::TotalCollateral)
        .unwrap_or(0u128)
}

pub fn write_total_collateral(env: &Env, value: u128) {
    env.storage()
        .persistent()
        .set(&DataKey::TotalCollateral, &value);
}

pub fn read_total_borrowed(env: &Env, asset: Stablecoin) -> u128 {
    env.storage()
        .persistent()
        .get(&DataKey::TotalBorrowed(asset))
        .unwrap_or(0u128)
}

pub fn write_total_borrowed(env: &Env, asset: Stablecoin, value: u128) {
    env.storage()
        .persistent()
        .set(&DataKey::TotalBorrowed(asset), &value);
}

pub fn bump_core_ttl(env: &Env) {
    let persistent = env.storage().persistent();
    let keys = [
        DataKey::Admin,
        DataKey::Usdc,
        DataKey::Eurc,
        DataKey::RateModel,
        DataKey::TotalCollateral,
        DataKey::TotalBorrowed(Stablecoin::Usdc),
        DataKey::TotalBorrowed(Stablecoin::Eurc),
    ];
    for key in keys.iter() {
        if persistent.has(key) {
            persistent.extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
        }
    }
}

pub fn bump_loan_ttl(env: &Env, borrower: &Address) {
    let key = DataKey::Loan(borrower.clone());
    let persistent = env.storage().persistent();
    if persistent.has(&key) {
        persistent.extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
}
