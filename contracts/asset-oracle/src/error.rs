use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    /// No price has ever been recorded for this symbol
    UnknownSymbol = 1,

    /// Value must be greater than or equal to 0
    ValueNotPositive = 2,
}
