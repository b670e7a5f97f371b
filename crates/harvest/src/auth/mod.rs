//! Authentication module for Twitter/X access.
//!
//! Sessions are cookie pairs captured from a logged-in browser.

mod session;

pub use session::Session;
