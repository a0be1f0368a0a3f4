//! `nido classrooms` subcommands.

use anyhow::Result;

use crate::api::Pager;
use crate::nursery::{NewClassroom, NurseryApi};
use crate::spinner::spinner_hooks;

pub async fn list(api: &NurseryApi, per_page: u32) -> Result<()> {
    let mut pager = Pager::new(per_page);
    while let Some(page) = pager.begin() {
        let paged = match api
            .list_classrooms(spinner_hooks("loading classrooms"), &pager.query(page))
            .await
        {
            Ok(paged) => paged,
            Err(err) => {
                pager.fail();
                return Err(err.into());
            }
        };

        for room in &paged.items {
            let teacher = room
                .teacher_id
                .map(|id| format!("teacher {id}"))
                .unwrap_or_else(|| "no teacher".to_string());
            let capacity = room
                .capacity
                .map(|c| format!("{c} places"))
                .unwrap_or_default();
            println!("  {:>5}  {:<24} {:<12} {}", room.id, room.name, teacher, capacity);
        }
        pager.complete(paged.items.len());
    }
    Ok(())
}

pub async fn create(api: &NurseryApi, name: String, capacity: Option<u32>) -> Result<()> {
    let room = api
        .create_classroom(&NewClassroom { name, capacity }, spinner_hooks("creating"))
        .await?;
    println!("✓ created classroom {} (id {})", room.name, room.id);
    Ok(())
}

pub async fn assign(api: &NurseryApi, classroom_id: i64, teacher_id: i64) -> Result<()> {
    let room = api
        .assign_teacher(classroom_id, teacher_id, spinner_hooks("assigning"))
        .await?;
    println!("✓ teacher {teacher_id} now runs {}", room.name);
    Ok(())
}

pub async fn remove(api: &NurseryApi, id: i64) -> Result<()> {
    api.remove_classroom(id, spinner_hooks("removing")).await?;
    println!("✓ removed classroom {id}");
    Ok(())
}
