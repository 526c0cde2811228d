use std::path::PathBuf;

use super::inquiry::{Inquiry, default_inquiries};
use super::post::{Post, default_posts};
use super::site_config::SiteConfig;

/// The three persisted records of a site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteRecords {
    pub config: SiteConfig,
    /// Newest first
    pub posts: Vec<Post>,
    /// Newest first
    pub inquiries: Vec<Inquiry>,
}

impl Default for SiteRecords {
    fn default() -> Self {
        SiteRecords {
            config: SiteConfig::default(),
            posts: default_posts(),
            inquiries: default_inquiries(),
        }
    }
}

impl SiteRecords {
    pub fn find_post(&self, id: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    pub fn find_inquiry(&self, id: &str) -> Option<&Inquiry> {
        self.inquiries.iter().find(|i| i.id == id)
    }

    /// Number of inquiries still awaiting a response
    pub fn pending_count(&self) -> usize {
        self.inquiries
            .iter()
            .filter(|i| i.status == super::InquiryStatus::Pending)
            .count()
    }
}

/// Location of a site on disk
#[derive(Debug, Clone)]
pub struct SitePaths {
    /// Directory the site was discovered from (parent of `site/`)
    pub root: PathBuf,
    /// Path to the `site/` directory holding settings and store files
    pub site_dir: PathBuf,
}

impl SitePaths {
    pub fn new(root: PathBuf) -> Self {
        let site_dir = root.join("site");
        SitePaths { root, site_dir }
    }

    pub fn settings_file(&self) -> PathBuf {
        self.site_dir.join("site.toml")
    }

    pub fn log_file(&self) -> PathBuf {
        self.site_dir.join(".showcase.log")
    }
}
