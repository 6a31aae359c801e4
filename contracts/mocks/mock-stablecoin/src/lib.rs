#![no_std]

use soroban_sdk::{contract, contractimpl, contracttype, Address, Env, MuxedAddress, String};
use stellar_tokens::fungible::burnable::emit_burn;
use stellar_tokens::fungible::Base as TokenBase;

/// USDC and EURC both use six decimals.
pub const STABLECOIN_DECIMALS: u32 = 6;

#[contracttype]
enum DataKey {
    Deployed, // bool, set once metadata is written
}

/// Freely mintable SEP-41 stablecoin. The USDC and EURC deployments are two
/// instances of this contract; only the name and symbol differ.
#[contract]
pub struct MockStablecoin;

#[contractimpl]
impl MockStablecoin {
    pub fn initialize(env: Env, name: String, symbol: String) {
        let storage = env.storage().persistent();
        if storage.has(&DataKey::Deployed) {
            panic!("already initialized");
        }
        TokenBase::set_metadata(&env, STABLECOIN_DECIMALS, name, symbol);
        storage.set(&DataKey::Deployed, &true);
    }

    pub fn name(env: Env) -> String {
        TokenBase::name(&env)
    }

    pub fn symbol(env: Env) -> String {
        TokenBase::symbol(&env)
    }

    pub fn decimals(env: Env) -> u32 {
        TokenBase::decimals(&env)
    }

    pub fn total_supply(env: Env) -> i128 {
        TokenBase::total_supply(&env)
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        TokenBase::balance(&env, &id)
    }

    /// ERC-20 style alias used by the UI.
    pub fn balance_of(env: Env, id: Address) -> i128 {
        TokenBase::balance(&env, &id)
    }

    pub fn allowance(env: Env, owner: Address, spender: Address) -> i128 {
        TokenBase::allowance(&env, &owner, &spender)
    }

    /// Zero clears the allowance. Approvals live as long as the network allows.
    pub fn approve(env: Env, owner: Address, spender: Address, amount: i128) {
        if amount < 0 {
            panic!("bad amount");
        }
        let live_until = env.ledger().max_live_until_ledger();
        TokenBase::approve(&env, &owner, &spender, amount, live_until);
    }

    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) {
        require_positive(amount);
        TokenBase::transfer(&env, &from, &MuxedAddress::from(&to), amount);
    }

    pub fn transfer_from(env: Env, spender: Address, owner: Address, to: Address, amount: i128) {
        require_positive(amount);
        TokenBase::transfer_from(&env, &spender, &owner, &to, amount);
    }

    /// Open faucet: anyone may mint to anyone.
    pub fn mint(env: Env, to: Address, amount: i128) {
        require_positive(amount);
        TokenBase::mint(&env, &to, amount);
    }

    pub fn burn(env: Env, from: Address, amount: i128) {
        from.require_auth();
        require_positive(amount);
        if TokenBase::balance(&env, &from) < amount {
            panic!("insufficient balance");
        }
        TokenBase::update(&env, Some(&from), None, amount);
        emit_burn(&env, &from, amount);
    }
}

fn require_positive(amount: i128) {
    if amount <= 0 {
        panic!("bad amount");
    }
}
