pub mod announcements;
pub mod attendance;
pub mod classes;
pub mod db_utils;
pub mod grades;
pub mod initialize;
pub mod log;
pub mod migrate;
pub mod pool;
pub mod seed;
pub mod stats;
pub mod students;
pub mod subjects;
pub mod teachers;
pub mod users;
