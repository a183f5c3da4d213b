// Endpoint helpers
pub mod url_parser;
pub mod masking;

// Parsing and number helpers
pub mod parse_flag;
pub mod numbers;

pub use url_parser::hostname_from_url;
pub use masking::mask_token;
pub use parse_flag::parse_flag;
pub use numbers::round_to;
