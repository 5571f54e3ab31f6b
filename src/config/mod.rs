//! Configuration module

mod site;

pub use site::FeatureCard;
pub use site::NavLink;
pub use site::SiteConfig;
pub use site::VersionMapping;
