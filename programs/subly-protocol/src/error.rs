use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    // Lifecycle errors
    #[msg("Protocol is already initialized")]
    AlreadyInitialized,
    #[msg("Account already exists")]
    AlreadyExists,
    #[msg("Account not found")]
    NotFound,
    #[msg("Account address does not match its derivation")]
    InvalidAddress,
    #[msg("Account discriminator does not match the expected type")]
    InvalidDiscriminator,
    #[msg("Unsupported account version")]
    UnsupportedAccountVersion,
    #[msg("Supplied id does not match the live counter")]
    StaleCounter,
    #[msg("Supplied account list does not match the stored counter")]
    AccountListMismatch,

    // Validation errors
    #[msg("Name is too long")]
    NameTooLong,
    #[msg("Description is too long")]
    DescriptionTooLong,
    #[msg("URL is too long")]
    UrlTooLong,
    #[msg("Invalid fee amount")]
    InvalidFeeAmount,
    #[msg("Invalid billing frequency")]
    InvalidBillingFrequency,
    #[msg("Invalid amount")]
    InvalidAmount,
    #[msg("Invalid subscriber cap")]
    InvalidMaxSubscribers,

    // Authorization errors
    #[msg("Unauthorized user")]
    UnauthorizedUser,
    #[msg("Unauthorized authority")]
    UnauthorizedAuthority,
    #[msg("Unauthorized provider")]
    UnauthorizedProvider,

    // Balance errors
    #[msg("Insufficient available balance")]
    InsufficientBalance,
    #[msg("Insufficient staked funds")]
    InsufficientStakedFunds,

    // Subscription errors
    #[msg("Subscription is already inactive")]
    AlreadyInactive,
    #[msg("Cannot subscribe to own service")]
    CannotSubscribeToOwnService,
    #[msg("Service not active")]
    ServiceNotActive,
    #[msg("Service subscriber limit reached")]
    SubscriberLimitReached,
    #[msg("Payment not yet due")]
    PaymentNotDue,
    #[msg("Provider wallet cannot hold the payment without becoming rent paying")]
    ProviderWalletUnfunded,

    // Token errors
    #[msg("Identity or certificate token accounts are required")]
    TokenAccountsMissing,
    #[msg("Certificate does not belong to this subscription")]
    InvalidCertificate,

    // Price feed errors
    #[msg("Invalid price feed")]
    InvalidPriceFeed,
    #[msg("Price not available")]
    PriceNotAvailable,
    #[msg("Invalid price")]
    InvalidPrice,

    // Staking errors
    #[msg("Staking not available")]
    StakingNotAvailable,

    // Protocol errors
    #[msg("Protocol is paused")]
    ProtocolPaused,
    #[msg("Invalid protocol fee")]
    InvalidProtocolFee,

    // Math errors
    #[msg("Arithmetic overflow")]
    Overflow,
    #[msg("Arithmetic underflow")]
    Underflow,
}
