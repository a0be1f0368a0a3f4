//! `nido children` subcommands.

use anyhow::Result;

use crate::api::Pager;
use crate::nursery::{NewChild, NurseryApi};
use crate::spinner::spinner_hooks;

pub async fn list(
    api: &NurseryApi,
    classroom: Option<i64>,
    all_pages: bool,
    per_page: u32,
) -> Result<()> {
    let mut pager = Pager::new(per_page);
    let mut shown = 0u64;
    let mut total = None;

    while let Some(page) = pager.begin() {
        let mut query = pager.query(page);
        if let Some(id) = classroom {
            query.push(("classroom_id".to_string(), id.to_string()));
        }

        let paged = match api.list_children(spinner_hooks("loading children"), &query).await {
            Ok(paged) => paged,
            Err(err) => {
                pager.fail();
                return Err(err.into());
            }
        };

        for child in &paged.items {
            let classroom = child
                .classroom_id
                .map(|id| format!("classroom {id}"))
                .unwrap_or_else(|| "unassigned".to_string());
            println!("  {:>5}  {:<24} {}", child.id, child.name, classroom);
        }

        shown += paged.items.len() as u64;
        total = total.or(paged.total);
        pager.complete(paged.items.len());

        if !all_pages {
            break;
        }
    }

    match total {
        Some(total) => println!("{shown} of {total} children"),
        None => println!("{shown} children"),
    }
    Ok(())
}

pub async fn show(api: &NurseryApi, id: i64) -> Result<()> {
    let child = api.child(id, spinner_hooks("loading child")).await?;
    println!("  id          {}", child.id);
    println!("  name        {}", child.name);
    if let Some(birth_date) = &child.birth_date {
        println!("  birth date  {birth_date}");
    }
    if let Some(classroom_id) = child.classroom_id {
        println!("  classroom   {classroom_id}");
    }
    for (key, value) in &child.extra {
        println!("  {key:<11} {value}");
    }
    Ok(())
}

pub async fn enroll(
    api: &NurseryApi,
    name: String,
    birth_date: Option<String>,
    classroom_id: Option<i64>,
) -> Result<()> {
    let child = api
        .enroll_child(
            &NewChild {
                name,
                birth_date,
                classroom_id,
            },
            spinner_hooks("enrolling"),
        )
        .await?;
    println!("✓ enrolled {} (id {})", child.name, child.id);
    Ok(())
}

pub async fn remove(api: &NurseryApi, id: i64) -> Result<()> {
    api.remove_child(id, spinner_hooks("removing")).await?;
    println!("✓ removed child {id}");
    Ok(())
}
