use soroban_sdk::{Address, contractevent};

#[contractevent(topics = ["minted"], data_format = "single-value")]
pub struct Minted {
    #[topic]
    pub to: Address,
    pub amount: i128,
}

#[contractevent(topics = ["burned"], data_format = "single-value")]
pub struct Burned {
    #[topic]
    pub from: Address,
    pub amount: i128,
}

#[contractevent(topics = ["transfer"], data_format = "single-value")]
pub struct Transferred {
    #[topic]
    pub from: Address,
    #[topic]
    pub to: Address,
    pub amount: i128,
}
