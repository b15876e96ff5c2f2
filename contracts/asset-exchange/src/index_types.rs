use soroban_sdk::{Address, contractevent};

use crate::Direction;

#[contractevent(topics = ["swap"])]
pub struct Swapped {
    #[topic]
    pub caller: Address,
    pub direction: Direction,
    pub amount_in: i128,
    pub amount_out: i128,
    pub price: i128,
    pub ledger: u32,
}

#[contractevent(topics = ["seeded"])]
pub struct LiquiditySeeded {
    #[topic]
    pub from: Address,
    pub token_amount: i128,
    pub native_amount: i128,
}
