//! Domain models for the school record store.
//! Row structs map 1:1 to SQLite tables; `*Row` structs are eager-loaded
//! listing views joined with their relations.

pub mod announcement;
pub mod attendance;
pub mod choice;
pub mod dashboard;
pub mod grade;
pub mod page;
pub mod role;
pub mod school_class;
pub mod status;
pub mod student;
pub mod subject;
pub mod teacher;
pub mod user;

pub use choice::Choice;
pub use page::Page;
