pub mod health;
pub mod class_create;
pub mod class_close;
pub mod metrics;

pub use health::*;
pub use class_create::*;
pub use class_close::*;
pub use metrics::*;
