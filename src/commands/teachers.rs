//! `nido teachers` subcommands.

use anyhow::Result;

use crate::api::Pager;
use crate::nursery::{NewTeacher, NurseryApi};
use crate::spinner::spinner_hooks;

pub async fn list(api: &NurseryApi, per_page: u32) -> Result<()> {
    let mut pager = Pager::new(per_page);
    while let Some(page) = pager.begin() {
        let paged = match api
            .list_teachers(spinner_hooks("loading teachers"), &pager.query(page))
            .await
        {
            Ok(paged) => paged,
            Err(err) => {
                pager.fail();
                return Err(err.into());
            }
        };

        for teacher in &paged.items {
            println!(
                "  {:>5}  {:<24} {}",
                teacher.id,
                teacher.name,
                teacher.email.as_deref().unwrap_or("")
            );
        }
        pager.complete(paged.items.len());
    }
    Ok(())
}

pub async fn add(api: &NurseryApi, name: String, email: Option<String>) -> Result<()> {
    let teacher = api
        .add_teacher(&NewTeacher { name, email }, spinner_hooks("adding teacher"))
        .await?;
    println!("✓ added {} (id {})", teacher.name, teacher.id);
    Ok(())
}

pub async fn remove(api: &NurseryApi, id: i64) -> Result<()> {
    api.remove_teacher(id, spinner_hooks("removing")).await?;
    println!("✓ removed teacher {id}");
    Ok(())
}
