pub mod class;
pub mod health;
pub mod metrics;
pub mod messages;
pub mod error;

pub use class::*;
pub use health::*;
pub use metrics::*;
pub use messages::*;
pub use error::*;
