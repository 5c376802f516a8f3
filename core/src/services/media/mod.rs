//! Image upload validation and storage
//!
//! Extension and size are checked before anything is written. Accepted files
//! are stored as `<uuid><ext>` and exposed under `<base_url>media/`.

mod policy;
mod service;
mod traits;

#[cfg(any(test, feature = "mocks"))]
mod mock;

pub use policy::{UploadPolicy, ALLOWED_EXTENSIONS};
pub use service::MediaService;
pub use traits::MediaStorage;

#[cfg(any(test, feature = "mocks"))]
pub use mock::MockMediaStorage;
