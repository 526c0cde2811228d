pub mod config;
pub mod inquiry;
pub mod post;
pub mod site;
pub mod site_config;

pub use config::*;
pub use inquiry::*;
pub use post::*;
pub use site::*;
pub use site_config::*;
