use crate::db::log::load_log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::formatting::truncate;
use crate::utils::table::strip_ansi;
use ansi_term::Colour;

const OP_TARGET_MAX: usize = 60;

/// ANSI colour for an audit operation.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" => Colour::Green,
        "del" => Colour::Red,
        "edit" => Colour::Yellow,
        "mark" => Colour::Cyan,
        "publish" => Colour::Blue,
        "migration_applied" | "migrate" => Colour::Purple,
        "backup" | "export" => Colour::Blue,
        "init" | "seed" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &mut DbPool) -> AppResult<()> {
        let entries = load_log(&pool.conn)?;

        if entries.is_empty() {
            info("The internal log is empty.");
            return Ok(());
        }

        let rendered: Vec<(String, String)> = entries
            .iter()
            .map(|e| {
                let plain = if e.target.is_empty() {
                    e.operation.clone()
                } else {
                    format!("{} ({})", e.operation, e.target)
                };
                let plain = truncate(&plain, OP_TARGET_MAX);

                // colour only the operation word
                let colored = match plain.split_once(' ') {
                    Some((op, rest)) => {
                        format!("{} {}", color_for_operation(&e.operation).paint(op), rest)
                    }
                    None => color_for_operation(&e.operation)
                        .paint(plain.as_str())
                        .to_string(),
                };
                (plain, colored)
            })
            .collect();

        let op_w = rendered
            .iter()
            .map(|(plain, _)| plain.chars().count())
            .max()
            .unwrap_or(10);
        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(19);

        println!("📜 Internal log:\n");

        for (e, (_, colored)) in entries.iter().zip(rendered) {
            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&colored).chars().count()));

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                e.id,
                e.date,
                colored,
                padding,
                e.message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}
