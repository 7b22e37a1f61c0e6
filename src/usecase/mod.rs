pub mod storage;
pub mod store;
pub mod types;

pub use storage::{get_store_path, load_draft, load_store, save_store};
pub use store::{StoreError, UseCaseStore};
pub use types::{Answers, UseCase, UseCaseDraft};
