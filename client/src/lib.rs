//! Client-side utility layer for the learning platform.
//!
//! Does for native callers what the browser bundle does for anonymous
//! visitors: keep a durable random session id in a cookie jar and tag
//! analytics events sent to the backend collector. Event delivery is fire
//! and forget; nothing in this crate blocks the caller on the network or
//! surfaces a delivery failure.

pub mod events;
pub mod session;

pub use events::EventRecorder;
pub use session::get_or_create_session_id;
