// Trustgate: moderation gateway for user-submitted posts.
//
// This is the library root. Each module corresponds to a stage of the
// moderation flow: evaluate text, then gate publication on the verdict.

pub mod config;
pub mod moderation;
pub mod output;
pub mod publication;

#[cfg(feature = "web")]
pub mod web;
