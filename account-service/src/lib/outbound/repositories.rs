pub mod account;
pub mod reset_token;

pub use account::PostgresAccountRepository;
pub use reset_token::PostgresResetTokenRepository;
