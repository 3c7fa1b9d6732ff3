pub use categories::Category;
pub use error::EngineError;
pub use money::MoneyCents;
pub use record::{ExpenseDraft, ExpenseRecord};

mod categories;
mod error;
mod money;
mod record;
pub mod report;

type ResultEngine<T> = Result<T, EngineError>;
