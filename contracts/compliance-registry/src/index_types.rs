use soroban_sdk::{Address, contractevent};

#[contractevent(topics = ["compliance"])]
pub struct ComplianceChanged {
    #[topic]
    pub account: Address,
    pub whitelisted: bool,
    pub blacklisted: bool,
}
