pub mod command;
pub mod ids;
pub mod inquiry_ops;
pub mod post_ops;
pub mod search;
