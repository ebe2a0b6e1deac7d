use crate::cli::commands::{open_pool, parse_choice, parse_opt_datetime};
use crate::cli::parser::{AnnounceAction, Commands};
use crate::config::Config;
use crate::core::records::AnnouncementLogic;
use crate::errors::AppResult;
use crate::models::announcement::NewAnnouncement;
use crate::ui::messages::success;
use crate::utils::date;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Announce { action } = cmd {
        let mut pool = open_pool(cfg)?;
        let now = date::now();

        match action {
            AnnounceAction::Add {
                title,
                content,
                kind,
                target_audience,
                target_class_id,
                created_by,
                publish,
                publish_at,
                expires_at,
            } => {
                let ann = NewAnnouncement {
                    title: title.clone(),
                    content: content.clone(),
                    kind: parse_choice(kind.as_deref())?.unwrap_or_default(),
                    target_audience: parse_choice(target_audience.as_deref())?.unwrap_or_default(),
                    target_class_id: *target_class_id,
                    created_by: *created_by,
                    is_published: *publish,
                    publish_at: parse_opt_datetime(publish_at.as_deref())?,
                    expires_at: parse_opt_datetime(expires_at.as_deref())?,
                };
                let id = AnnouncementLogic::add(&mut pool, &ann, now)?;
                let state = if ann.is_published { "published" } else { "draft" };
                success(format!("Announcement #{} created ({})", id, state));
            }
            AnnounceAction::Publish { id } => {
                AnnouncementLogic::set_published(&mut pool, *id, true, now)?;
                success(format!("Announcement #{} published", id));
            }
            AnnounceAction::Unpublish { id } => {
                AnnouncementLogic::set_published(&mut pool, *id, false, now)?;
                success(format!("Announcement #{} unpublished", id));
            }
            AnnounceAction::Del { id } => {
                AnnouncementLogic::delete(&mut pool, *id)?;
                success(format!("Announcement #{} deleted", id));
            }
        }
    }
    Ok(())
}
