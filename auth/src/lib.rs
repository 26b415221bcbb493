//! Credential primitives library
//!
//! Provides the purely computational building blocks for credential handling:
//! - Password hashing and verification (Argon2id)
//! - Reset-token generation (CSPRNG-backed)
//!
//! No I/O happens here; services own persistence and orchestration and adapt
//! these primitives behind their own ports.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Reset Tokens
//! ```
//! use auth::ResetTokenGenerator;
//!
//! let generator = ResetTokenGenerator::new();
//! let token = generator.generate();
//! assert_eq!(token.len(), 32);
//! ```

pub mod password;
pub mod token;

// Re-export commonly used items
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::ResetTokenGenerator;
