//! Playlist Service — mood playlists over a ZeroMQ request/reply socket.
//!
//! Clients send one line of text per request and get one line (or block) of
//! text back:
//!
//! ```text
//! classical                                   -> a random classical playlist URL
//! add lofi https://www.youtube.com/watch?v=X  -> "Playlist added to lofi."
//! anything else                               -> usage text
//! ```
//!
//! The catalog of moods lives in memory, owned by the request handler, and is
//! mirrored to a JSON file after every successful `add`.

pub mod catalog;
pub mod client;
pub mod command;
pub mod config;
pub mod handler;
pub mod logger;
pub mod service;
