use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    /// Insufficient balance
    InsufficientBalance = 1,

    /// Insufficient allowance; spender must call `approve` first
    InsufficientAllowance = 2,

    /// A required party is not verified by the compliance registry
    NotCompliant = 3,

    /// Value must be greater than or equal to 0
    ValueNotPositive = 4,

    /// live_until_ledger must be greater than or equal to the current ledger number
    InvalidLedgerSequence = 5,

    /// Arithmetic overflow or underflow occurred
    ArithmeticError = 6,
}
