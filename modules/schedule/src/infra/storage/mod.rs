pub mod mapper;
pub mod migrations;
pub mod schedule_items;
pub mod users;
