// src/export/xlsx.rs

use crate::errors::{AppError, AppResult};
use crate::export::excel_date::excel_date;
use crate::export::model::{Cell, Tabular};
use crate::export::notify_export_success;
use crate::ui::messages::info;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

/// Export XLSX with a styled header, banded rows and fitted column widths.
pub(crate) fn export_xlsx<T: Tabular>(rows: &[T], sheet: &str, path: &Path) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet).map_err(to_export_error)?;

    // ---------------------------
    // Header
    // ---------------------------
    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in T::HEADERS.iter().enumerate() {
        worksheet
            .write_with_format(0, col as u16, *header, &header_format)
            .map_err(to_export_error)?;
    }

    worksheet.set_freeze_panes(1, 0).map_err(to_export_error)?;

    let mut col_widths: Vec<usize> = T::HEADERS
        .iter()
        .map(|h| UnicodeWidthStr::width(*h))
        .collect();

    let band1 = Color::RGB(0xEAF3FB);
    let band2 = Color::RGB(0xFFFFFF);

    // ---------------------------
    // Rows
    // ---------------------------
    for (row_index, item) in rows.iter().enumerate() {
        let row = (row_index + 1) as u32;
        let band_color = if row_index % 2 == 0 { band1 } else { band2 };

        for (col, cell) in item.cells().iter().enumerate() {
            write_xlsx_cell(worksheet, row, col as u16, cell, band_color)?;

            if let Some(w) = col_widths.get_mut(col) {
                *w = (*w).max(UnicodeWidthStr::width(cell.to_string().as_str()));
            }
        }
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet
            .set_column_width(c as u16, (*w).min(60) as f64 + 2.0)
            .map_err(to_export_error)?;
    }

    workbook.save(path).map_err(to_export_error)?;

    if rows.is_empty() {
        notify_export_success("XLSX (empty dataset)", path);
    } else {
        notify_export_success("XLSX", path);
    }
    Ok(())
}

fn base_format(bg: Color) -> Format {
    Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin)
}

fn write_xlsx_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &Cell,
    bg: Color,
) -> AppResult<()> {
    if let Some((num_format, serial)) = excel_date(cell) {
        let fmt = base_format(bg).set_num_format(num_format);
        worksheet
            .write_with_format(row, col, serial, &fmt)
            .map_err(to_export_error)?;
        return Ok(());
    }

    match cell {
        Cell::Int(v) => {
            let fmt = base_format(bg).set_align(FormatAlign::Right);
            worksheet
                .write_with_format(row, col, *v as f64, &fmt)
                .map_err(to_export_error)?;
        }
        Cell::Float(v) => {
            let fmt = base_format(bg)
                .set_align(FormatAlign::Right)
                .set_num_format("0.00");
            worksheet
                .write_with_format(row, col, *v, &fmt)
                .map_err(to_export_error)?;
        }
        Cell::Empty => {
            worksheet
                .write_blank(row, col, &base_format(bg))
                .map_err(to_export_error)?;
        }
        other => {
            worksheet
                .write_with_format(row, col, other.to_string(), &base_format(bg))
                .map_err(to_export_error)?;
        }
    }

    Ok(())
}

fn to_export_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(e.to_string())
}
