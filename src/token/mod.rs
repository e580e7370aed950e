pub mod access_token;
pub mod fetcher;

pub use access_token::AccessTokenData;
pub use fetcher::{GoogleTokenFetcher, TokenFetcher};
