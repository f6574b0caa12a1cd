pub mod confirm_quit;
pub mod error_banner;
pub mod question_view;
pub mod spinner;
pub mod success_view;

pub use confirm_quit::{ConfirmQuitDialog, QuitSelection};
pub use question_view::QuestionView;
pub use spinner::LoadingIndicator;
