pub mod activity;
pub mod page;
pub mod record;
