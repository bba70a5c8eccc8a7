pub mod attack;
pub mod claims;
pub mod report;
pub mod request;
pub mod scan;

pub use attack::{
    CrackOutcome, ForgeOutcome, KidAttempt, KidTraversalOutcome, NoneAttempt, NoneBypassOutcome,
    TamperOutcome,
};
pub use claims::Claims;
pub use report::{HeaderEntry, HeaderKind, HeaderReport};
pub use request::{RawRequest, ReplayOptions};
pub use scan::{CheckedFile, CommonFilesProgress, FoundFile, WaybackEvent};
