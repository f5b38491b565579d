pub mod cdp;
pub mod page;
pub mod session;

pub use cdp::LaunchOptions;
pub use page::CdpPage;
pub use session::{HeadlessSession, SessionError};
