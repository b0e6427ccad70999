pub mod token_cipher;

pub use token_cipher::{StoredToken, TokenCipher};
