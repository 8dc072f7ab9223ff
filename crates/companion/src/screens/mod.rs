//! Per-screen controllers.

pub mod home;
pub mod profile;
pub mod scanner;
pub mod store_map;
pub mod voice;

pub use home::HomeFeed;
pub use profile::{Preferences, Profile, ProfileStats};
pub use scanner::{ScanPhase, ScannerSession, ScannerState};
pub use store_map::{FloorPosition, StoreMap};
pub use voice::{VoiceSearch, VoiceState};
