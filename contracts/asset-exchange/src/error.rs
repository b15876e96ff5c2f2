use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    /// The held reserve cannot cover the requested output
    InsufficientLiquidity = 1,

    /// Output fell below the caller's minimum
    SlippageExceeded = 2,

    /// A required party is not verified by the compliance registry
    NotCompliant = 3,

    /// Failed to fetch a price from the oracle
    PriceUnavailable = 4,

    /// The oracle price is zero or negative; no swap can be priced against it
    InvalidPrice = 5,

    /// Value must be greater than 0
    ValueNotPositive = 6,

    /// A token or native transfer leg failed
    TransferFailed = 7,

    /// Arithmetic overflow or underflow occurred
    ArithmeticError = 8,
}
