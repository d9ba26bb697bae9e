pub mod banner;
pub mod context;

pub use banner::TutorialBanner;
pub use context::{use_tutorial, TutorialContext};
