//! Configuration module

mod site;

pub use site::ContentConfig;
pub use site::ServerConfig;
pub use site::SiteConfig;
pub use site::SmtpConfig;
