pub mod error;
pub mod locate;
pub mod session;
pub mod triggers;

pub use error::{LocateError, SearchError};
pub use locate::{acquire, FixedLocation, Geolocator, IpApiLocator, Located, LocationStatus};
pub use session::{SearchOutcome, SearchSession, SessionSettings, SessionSnapshot};
pub use triggers::{drive_triggers, ExploreEvent, SearchTrigger};
