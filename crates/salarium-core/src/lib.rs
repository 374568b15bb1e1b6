pub mod aggregate;
pub mod captcha;
pub mod error;
pub mod runner;
pub mod salary;
pub mod source;
pub mod traits;
pub mod vacancy;

#[cfg(test)]
pub mod testutil;

pub use aggregate::TermAggregate;
pub use captcha::CaptchaChallenge;
pub use error::AppError;
pub use runner::{BatchRunner, RunnerConfig, TermOutcome};
pub use source::{SearchQuery, SourceDescriptor, SourceKind};
pub use traits::{PageFetcher, VacancyPage};
pub use vacancy::{HhPage, SjPage};
