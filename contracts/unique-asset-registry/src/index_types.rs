use soroban_sdk::{Address, String, contractevent};

#[contractevent(topics = ["minted"])]
pub struct Minted {
    #[topic]
    pub to: Address,
    pub token_id: u64,
    pub uri: String,
}

#[contractevent(topics = ["transfer"], data_format = "single-value")]
pub struct Transferred {
    #[topic]
    pub from: Address,
    #[topic]
    pub to: Address,
    pub token_id: u64,
}
