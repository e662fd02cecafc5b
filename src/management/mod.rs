//! Persistence of the Spotify user token obtained through the PKCE login.

mod auth;

pub use auth::TokenManager;
