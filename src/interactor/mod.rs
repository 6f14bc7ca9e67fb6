pub mod fee_interactor;
pub mod issuance_interactor;
pub mod request_registry;
pub mod upload_interactor;

pub use fee_interactor::{FeeInteractor, FeeInteractorImpl};
pub use issuance_interactor::{validate_token_params, IssuanceInteractor, IssuanceInteractorImpl};
pub use request_registry::{Admission, RequestRegistry};
pub use upload_interactor::{UploadInteractor, UploadInteractorImpl};
