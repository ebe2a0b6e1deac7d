use crate::cli::commands::{open_pool, parse_opt_date, print_json};
use crate::cli::parser::{Commands, ListTarget, PageArgs};
use crate::config::Config;
use crate::core::listing::{ListingLogic, PageRequest};
use crate::errors::AppResult;
use crate::export::Tabular;
use crate::models::Page;
use crate::ui::messages::{header, info};
use crate::utils::colors::{GREY, RESET};
use crate::utils::or_dash;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { target } = cmd {
        let pool = open_pool(cfg)?;
        let conn = &pool.conn;

        match target {
            ListTarget::Students { class, paging } => {
                let page = ListingLogic::students(conn, *class, request(paging, cfg)?)?;
                show("Students", &page, paging.json)?;
            }
            ListTarget::Teachers { paging } => {
                let page = ListingLogic::teachers(conn, request(paging, cfg)?)?;
                show("Teachers", &page, paging.json)?;
            }
            ListTarget::Classes { paging } => {
                let page = ListingLogic::classes(conn, request(paging, cfg)?)?;
                show("Classes", &page, paging.json)?;
            }
            ListTarget::Subjects { paging } => {
                let page = ListingLogic::subjects(conn, request(paging, cfg)?)?;
                show("Subjects", &page, paging.json)?;
            }
            ListTarget::Grades { student, paging } => {
                let page = ListingLogic::grades(conn, *student, request(paging, cfg)?)?;
                show("Grades", &page, paging.json)?;
            }
            ListTarget::Attendance {
                date,
                class,
                paging,
            } => {
                let on = parse_opt_date(date.as_deref())?;
                let page = ListingLogic::attendance(conn, on, *class, request(paging, cfg)?)?;
                show("Attendance", &page, paging.json)?;
            }
            ListTarget::Announcements { paging } => {
                let page = ListingLogic::announcements(conn, request(paging, cfg)?)?;
                show("Announcements", &page, paging.json)?;
            }
        }
    }
    Ok(())
}

fn request(paging: &PageArgs, cfg: &Config) -> AppResult<PageRequest> {
    PageRequest::new(paging.page, paging.per_page.unwrap_or(cfg.page_size))
}

fn show<T: Tabular>(title: &str, page: &Page<T>, json: bool) -> AppResult<()> {
    if json {
        return print_json(page);
    }

    header(title);
    if page.is_empty() {
        info(format!("No {} found.", title.to_lowercase()));
    } else {
        print!("{}", render_rows(&page.data));
    }
    println!(
        "{GREY}Page {}/{} · {} per page · {} total{RESET}",
        page.current_page, page.last_page, page.per_page, page.total
    );
    Ok(())
}

/// Lay `rows` out as a text table, empty cells shown as `--`.
pub(crate) fn render_rows<T: Tabular>(rows: &[T]) -> String {
    let mut table = Table::new(T::HEADERS.to_vec());
    for row in rows {
        table.add_row(
            row.cells()
                .iter()
                .map(|c| or_dash(Some(c.to_string().as_str())))
                .collect(),
        );
    }
    table.render()
}
