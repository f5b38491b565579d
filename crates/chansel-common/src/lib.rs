pub mod error;
pub mod normalize;
pub mod page;
pub mod protocol;

pub use error::PageError;
pub use normalize::normalize_name;
pub use page::Page;
pub use protocol::{AncestorInfo, ClickTarget, PageQuery, SelectorResult};
