pub mod chat;
pub mod outreach;
pub mod plan;
