pub mod category;
pub mod money;

pub use category::Category;
pub use money::Money;
