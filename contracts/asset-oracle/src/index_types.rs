use soroban_sdk::{Symbol, contractevent};

#[contractevent(topics = ["price"])]
pub struct PriceUpdated {
    #[topic]
    pub symbol: Symbol,
    pub price: i128,
    pub version: u64,
}
