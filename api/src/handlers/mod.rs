pub mod error;

pub use error::{
    domain_error_response, extractor_error, log_error_response, validation_error_response,
};
