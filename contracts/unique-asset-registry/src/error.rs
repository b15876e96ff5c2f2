use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    /// This URI was already consumed by an earlier mint
    UriAlreadyMinted = 1,

    /// No token with this id was ever minted
    UnknownToken = 2,

    /// Caller is neither the owner nor the approved address for this token
    NotOwnerOrApproved = 3,

    /// A required party is not verified by the compliance registry
    NotCompliant = 4,

    /// Attached payment does not equal the fixed mint price
    WrongPayment = 5,

    /// Value must be greater than or equal to 0
    ValueNotPositive = 6,

    /// Transfer of the payment token failed
    PaymentFailed = 7,

    /// Arithmetic overflow or underflow occurred
    ArithmeticError = 8,
}
