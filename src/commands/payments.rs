//! `nido payments` subcommands.

use anyhow::{Result, bail};

use crate::api::Pager;
use crate::consts::{format_amount, parse_amount};
use crate::nursery::{NewPayment, NurseryApi};
use crate::spinner::spinner_hooks;

pub async fn list(api: &NurseryApi, child: Option<i64>, per_page: u32) -> Result<()> {
    let mut pager = Pager::new(per_page);
    let mut sum = 0i64;

    while let Some(page) = pager.begin() {
        let paged = match api
            .list_payments(child, spinner_hooks("loading payments"), &pager.query(page))
            .await
        {
            Ok(paged) => paged,
            Err(err) => {
                pager.fail();
                return Err(err.into());
            }
        };

        for payment in &paged.items {
            println!(
                "  {:>5}  child {:<6} {:>10}  {}",
                payment.id,
                payment.child_id,
                format_amount(payment.amount),
                payment.paid_at.as_deref().unwrap_or("pending")
            );
            sum += payment.amount;
        }
        pager.complete(paged.items.len());
    }

    println!("total {}", format_amount(sum));
    Ok(())
}

pub async fn record(api: &NurseryApi, child: i64, amount: &str, note: Option<String>) -> Result<()> {
    let Some(cents) = parse_amount(amount) else {
        bail!("could not read {amount:?} as an amount, try something like 450.00");
    };

    let payment = api
        .record_payment(
            &NewPayment {
                child_id: child,
                amount: cents,
                note,
            },
            spinner_hooks("recording payment"),
        )
        .await?;
    println!(
        "✓ recorded {} for child {} (payment {})",
        format_amount(payment.amount),
        payment.child_id,
        payment.id
    );
    Ok(())
}
