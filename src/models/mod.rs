// Data models for the portal payloads
//
// Field names mirror the portal's wire format (Vietnamese snake_case).
// Everything is optional-by-default: the portal omits fields freely and a
// missing value must never fail a whole response.

pub mod curriculum;
pub mod grades;
pub mod posts;
pub mod schedule;
pub mod student;
pub mod tuition;
