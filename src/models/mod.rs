pub mod casting;
pub mod property;
pub mod tenant;
