//! Pure transformations for response classification.
//!
//! Nothing in here touches the network: every function works on a
//! [`ResponseHead`](crate::ResponseHead), a header value, or raw bytes.

mod decode;
mod location;
mod validation;

pub use decode::decode_body;
pub use location::resolve_location;
pub use validation::{
    charset, is_html, is_redirect, is_redirect_status, media_type, parse_status_line, status_code,
};
