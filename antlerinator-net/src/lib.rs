// antlerinator-net/src/lib.rs
pub mod http;
pub mod validation;

pub use antlerinator_common::{
    error::{AntlrError, Result},
    Config,
};
pub use http::{HttpTransport, Transport};
pub use validation::validate_url;
