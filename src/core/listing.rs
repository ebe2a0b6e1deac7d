//! The seven listings. Each is newest first and paginated.

use crate::db::{announcements, attendance, classes, grades, students, subjects, teachers};
use crate::errors::{AppError, AppResult};
use crate::models::Page;
use crate::models::announcement::AnnouncementRow;
use crate::models::attendance::AttendanceRow;
use crate::models::grade::GradeRow;
use crate::models::school_class::ClassRow;
use crate::models::student::StudentRow;
use crate::models::subject::Subject;
use crate::models::teacher::TeacherRow;
use chrono::NaiveDate;
use rusqlite::Connection;

/// 1-based page request.
#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    pub page: u32,
    pub per_page: u32,
}

impl PageRequest {
    pub fn new(page: u32, per_page: u32) -> AppResult<Self> {
        if page == 0 {
            return Err(AppError::validation("page numbers start at 1"));
        }
        if per_page == 0 {
            return Err(AppError::validation("page size must be at least 1"));
        }
        Ok(Self { page, per_page })
    }
}

pub struct ListingLogic;

impl ListingLogic {
    pub fn students(
        conn: &Connection,
        class_id: Option<i64>,
        req: PageRequest,
    ) -> AppResult<Page<StudentRow>> {
        students::list_page(conn, class_id, req.page, req.per_page)
    }

    pub fn teachers(conn: &Connection, req: PageRequest) -> AppResult<Page<TeacherRow>> {
        teachers::list_page(conn, req.page, req.per_page)
    }

    pub fn classes(conn: &Connection, req: PageRequest) -> AppResult<Page<ClassRow>> {
        classes::list_page(conn, req.page, req.per_page)
    }

    pub fn subjects(conn: &Connection, req: PageRequest) -> AppResult<Page<Subject>> {
        subjects::list_page(conn, req.page, req.per_page)
    }

    pub fn grades(
        conn: &Connection,
        student_id: Option<i64>,
        req: PageRequest,
    ) -> AppResult<Page<GradeRow>> {
        grades::list_page(conn, student_id, req.page, req.per_page)
    }

    pub fn attendance(
        conn: &Connection,
        on: Option<NaiveDate>,
        class_id: Option<i64>,
        req: PageRequest,
    ) -> AppResult<Page<AttendanceRow>> {
        attendance::list_page(conn, on, class_id, req.page, req.per_page)
    }

    pub fn announcements(conn: &Connection, req: PageRequest) -> AppResult<Page<AnnouncementRow>> {
        announcements::list_page(conn, req.page, req.per_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::DbPool;
    use crate::db::seed::seed_demo;
    use crate::utils::date;

    #[test]
    fn page_zero_is_rejected() {
        assert!(matches!(
            PageRequest::new(0, 20),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn subjects_paginate_with_metadata() {
        let pool = DbPool::in_memory().unwrap();
        seed_demo(&pool.conn, &date::now()).unwrap();

        let first = ListingLogic::subjects(&pool.conn, PageRequest::new(1, 4).unwrap()).unwrap();
        assert_eq!(first.data.len(), 4);
        assert_eq!(first.total, 6);
        assert_eq!(first.last_page, 2);

        let second = ListingLogic::subjects(&pool.conn, PageRequest::new(2, 4).unwrap()).unwrap();
        assert_eq!(second.data.len(), 2);

        let beyond = ListingLogic::subjects(&pool.conn, PageRequest::new(9, 4).unwrap()).unwrap();
        assert!(beyond.is_empty());
        assert_eq!(beyond.total, 6);
    }

    #[test]
    fn empty_listing_still_has_one_page() {
        let pool = DbPool::in_memory().unwrap();
        let page = ListingLogic::grades(&pool.conn, None, PageRequest::new(1, 20).unwrap()).unwrap();
        assert!(page.is_empty());
        assert_eq!(page.last_page, 1);
    }

    #[test]
    fn students_can_be_filtered_by_class() {
        let pool = DbPool::in_memory().unwrap();
        seed_demo(&pool.conn, &date::now()).unwrap();
        let req = PageRequest::new(1, 20).unwrap();

        let all = ListingLogic::students(&pool.conn, None, req).unwrap();
        assert_eq!(all.total, 1);
        let class_id = all.data[0].class_id.unwrap();
        assert_eq!(all.data[0].class_name.as_deref(), Some("Grade 5A"));

        assert_eq!(
            ListingLogic::students(&pool.conn, Some(class_id), req)
                .unwrap()
                .total,
            1
        );
        assert_eq!(
            ListingLogic::students(&pool.conn, Some(class_id + 1), req)
                .unwrap()
                .total,
            0
        );
    }
}
