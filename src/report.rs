//! Plain text rendering for the non-interactive commands

use anyhow::{bail, Context, Result};
use unicode_width::UnicodeWidthStr;

use crate::api::ApiClient;
use crate::console::ui::fit_width;
use crate::models::{
    Campaign, Chapter, Platform, Post, PostStatus, PostType, Resource, Tag, Topic,
};
use crate::schema::{Column, Entity};

/// Widest a printed column may get
const MAX_COLUMN_WIDTH: usize = 40;

/// Lay out `rows` under the column headers, one line per row.
///
/// Each column is as wide as its widest cell, capped at
/// `MAX_COLUMN_WIDTH`; longer cells are cut with an ellipsis.
pub fn format_table(columns: &[Column], rows: &[Vec<String>]) -> String {
    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| UnicodeWidthStr::width(cell.as_str()))
                .chain(std::iter::once(column.title.len()))
                .max()
                .unwrap_or(0)
                .min(MAX_COLUMN_WIDTH)
        })
        .collect();

    let line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| fit_width(cell, *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = Vec::with_capacity(rows.len() + 2);
    out.push(line(columns.iter().map(|c| c.title).collect()));
    out.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in rows {
        out.push(line(row.iter().map(String::as_str).collect()));
    }
    out.join("\n")
}

/// Table of entities using their declared columns
pub fn entity_table<E: Entity>(items: &[E]) -> String {
    if items.is_empty() {
        return format!("No {} found.", E::RESOURCE.plural());
    }
    let rows: Vec<Vec<String>> = items.iter().map(|item| item.cells()).collect();
    format!(
        "{}\n\n{} {}",
        format_table(E::columns(), &rows),
        items.len(),
        E::RESOURCE.plural()
    )
}

/// Fetch every `resource` entity and lay them out as a table
pub async fn resource_table(client: &ApiClient, resource: Resource) -> Result<String> {
    let context = || format!("Failed to fetch {}", resource.plural());
    let table = match resource {
        Resource::Posts => {
            entity_table(&client.list::<Post>(resource).await.with_context(context)?)
        }
        Resource::Campaigns => {
            entity_table(&client.list::<Campaign>(resource).await.with_context(context)?)
        }
        Resource::Platforms => {
            entity_table(&client.list::<Platform>(resource).await.with_context(context)?)
        }
        Resource::Tags => entity_table(&client.list::<Tag>(resource).await.with_context(context)?),
        Resource::PostTypes => {
            entity_table(&client.list::<PostType>(resource).await.with_context(context)?)
        }
        Resource::PostStatuses => {
            entity_table(&client.list::<PostStatus>(resource).await.with_context(context)?)
        }
        Resource::Topics => {
            entity_table(&client.list::<Topic>(resource).await.with_context(context)?)
        }
        Resource::Chapters => bail!("Chapters are listed per topic: run `contentdesk topic <id>`"),
    };
    Ok(table)
}

/// Topic heading followed by its chapters
pub fn topic_summary(topic: &Topic, chapters: &[Chapter]) -> String {
    let mut out = vec![format!("{} (#{})", topic.title, topic.id)];
    if let Some(description) = topic.description.as_deref().filter(|d| !d.is_empty()) {
        out.push(description.to_string());
    }
    out.push(String::new());
    if chapters.is_empty() {
        out.push("No chapters found for this topic.".to_string());
    } else {
        for (i, chapter) in chapters.iter().enumerate() {
            out.push(format!("{:>3}. {}", i + 1, chapter.title));
        }
    }
    out.join("\n")
}
