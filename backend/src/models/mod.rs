pub mod diagnostics;
pub mod port;
pub mod report;
pub mod time;

pub use diagnostics::*;
pub use port::*;
pub use report::*;
pub use time::*;
