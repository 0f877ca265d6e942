pub mod alert;
pub mod config;
pub mod fall;
pub mod geofence;
pub mod location;
pub mod poller;
pub mod scene;
pub mod store;
pub mod summary;

pub use alert::{FallBanner, Severity, Snackbar};
pub use config::Config;
pub use fall::FallNotification;
pub use location::{Coordinate, HomeLocation, HomeUpdate, SosLocation};
pub use poller::{PollGuard, Poller, Scheduler, Timer};
pub use scene::MapScene;
pub use store::{Action, DashboardState, Effect};
pub use summary::{ActivitySummary, SummaryRequest, SummaryState};
