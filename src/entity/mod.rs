pub mod courses;
pub mod orders;
pub mod purchases;
pub mod users;
