#![no_std]
use soroban_sdk::{contract, contractevent, contractimpl, contracttype, Address, Env};

pub const MAX_CREDIT_SCORE: u32 = 100;
/// 5% base APR.
pub const DEFAULT_BASE_RATE_BPS: u32 = 500;
/// 0.5% per point below the maximum score.
pub const DEFAULT_SLOPE_BPS: u32 = 50;
pub const MAX_RATE_BPS: u32 = 10_000;
pub const MAX_SLOPE_BPS: u32 = 100;
const TTL_THRESHOLD: u32 = 100_000_000;
const TTL_EXTEND_TO: u32 = 200_000_000;

#[contracttype]
pub enum DataKey {
    BaseRateBps,  // u32
    SlopeBps,     // u32, per credit-score point
    Admin,        // Address
}

/// Credit-score based borrow rate: `base + (100 - score) * slope`, in basis points.
#[contract]
pub struct InterestRateModel;

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ModelInitialized {
    #[topic]
    pub admin: Address,
    pub base_rate_bps: u32,
    pub slope_bps: u32,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParamsUpdated {
    pub base_rate_bps: u32,
    pub slope_bps: u32,
}

#[contractimpl]
impl InterestRateModel {
    pub fn initialize(env: Env, admin: Address, base_rate_bps: u32, slope_bps: u32) {
        if env
            .storage()
            .persistent()
            .get::<_, Address>(&DataKey::Admin)
            .is_some()
        {
            panic!("already initialized");
        }
        admin.require_auth();
        validate_params(base_rate_bps, slope_bps);
        env.storage().persistent().set(&DataKey::Admin, &admin);
        env.storage()
            .persistent()
            .set(&DataKey::BaseRateBps, &base_rate_bps);
        env.storage().persistent().set(&DataKey::SlopeBps, &slope_bps);
        bump_ttl(&env);
        ModelInitialized {
            admin,
            base_rate_bps,
            slope_bps,
        }
        .publish(&env);
    }

    /// Annual borrow rate in basis points for a score in `0..=100`.
    pub fn calculate_borrow_rate(env: Env, credit_score: u32) -> u32 {
        ensure_initialized(&env);
        bump_ttl(&env);
        if credit_score > MAX_CREDIT_SCORE {
            panic!("invalid credit score");
        }
        let (base, slope) = read_params(&env);
        // Bounded by validate_params: at most 10_000 + 100 * 100.
        base + (MAX_CREDIT_SCORE - credit_score) * slope
    }

    pub fn set_params(env: Env, admin: Address, base_rate_bps: u32, slope_bps: u32) {
        require_admin(&env, &admin);
        validate_params(base_rate_bps, slope_bps);
        env.storage()
            .persistent()
            .set(&DataKey::BaseRateBps, &base_rate_bps);
        env.storage().persistent().set(&DataKey::SlopeBps, &slope_bps);
        ParamsUpdated {
            base_rate_bps,
            slope_bps,
        }
        .publish(&env);
    }

    pub fn get_params(env: Env) -> (u32, u32) {
        ensure_initialized(&env);
        read_params(&env)
    }

    pub fn get_admin(env: Env) -> Address {
        env.storage()
            .persistent()
            .get(&DataKey::Admin)
            .expect("model not initialized")
    }
}

fn validate_params(base_rate_bps: u32, slope_bps: u32) {
    if base_rate_bps > MAX_RATE_BPS || slope_bps > MAX_SLOPE_BPS {
        panic!("invalid rate params");
    }
}

fn read_params(env: &Env) -> (u32, u32) {
    let base: u32 = env
        .storage()
        .persistent()
        .get(&DataKey::BaseRateBps)
        .unwrap_or(DEFAULT_BASE_RATE_BPS);
    let slope: u32 = env
        .storage()
        .persistent()
        .get(&DataKey::SlopeBps)
        .unwrap_or(DEFAULT_SLOPE_BPS);
    (base, slope)
}

fn ensure_initialized(env: &Env) {
    if env
        .storage()
        .persistent()
        .get::<_, Address>(&DataKey::Admin)
        .is_none()
    {
        panic!("model not initialized");
    }
}

fn require_admin(env: &Env, admin: &Address) {
    let stored: Address = env
        .storage()
        .persistent()
        .get(&DataKey::Admin)
        .expect("model not initialized");
    bump_ttl(env);
    if stored != *admin {
        panic!("not admin");
    }
    admin.require_auth();
}

fn bump_ttl(env: &Env) {
    let persistent = env.storage().persistent();
    if persistent.has(&DataKey::Admin) {
        persistent.extend_ttl(&DataKey::Admin, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
    if persistent.has(&DataKey::BaseRateBps) {
        persistent.extend_ttl(&DataKey::BaseRateBps, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
    if persistent.has(&DataKey::SlopeBps) {
        persistent.extend_ttl(&DataKey::SlopeBps, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
}
