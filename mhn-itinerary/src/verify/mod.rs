mod verification_result;
pub mod verify_ops;

pub use verification_result::VerificationResult;
