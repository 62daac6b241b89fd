//! Skill CLI commands: list, add, show, rename, level, delete.

use anyhow::Result;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;

use skillbook_types::error::SkillError;
use skillbook_types::skill::{LevelOfConfidence, NewSkill, Skill, SkillId};

use crate::http::extractors::query::SkillListQuery;
use crate::state::AppState;

fn parse_level(level: &str) -> Result<LevelOfConfidence> {
    level.parse::<LevelOfConfidence>().map_err(|e| anyhow::anyhow!(e))
}

fn level_cell(level: LevelOfConfidence) -> Cell {
    let color = match level {
        LevelOfConfidence::Level1 => Color::Yellow,
        LevelOfConfidence::Level2 => Color::Cyan,
        LevelOfConfidence::Level3 => Color::Green,
    };
    Cell::new(format!("{level}  {}", level.description())).fg(color)
}

fn print_skill(skill: &Skill, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(skill)?);
        return Ok(());
    }

    println!();
    println!("  {}  {}", style("Name:").bold(), style(&skill.skill_name).cyan());
    println!("  {}    {}", style("ID:").bold(), skill.skill_id);
    println!(
        "  {} {} {}",
        style("Level:").bold(),
        skill.level_of_confidence,
        style(format!("({})", skill.level_of_confidence.description())).dim()
    );
    println!();
    Ok(())
}

/// List skills in a table, one page at a time.
pub async fn list_skills(
    state: &AppState,
    offset: u64,
    limit: Option<u64>,
    json: bool,
) -> Result<()> {
    let query = SkillListQuery {
        offset: Some(offset),
        limit,
    };
    let page = state
        .skill_service
        .list_skills(query.page_request(&state.pagination))
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&page)?);
        return Ok(());
    }

    if page.items.is_empty() {
        println!();
        println!(
            "  {} No skills found. Add one with: {}",
            style("i").blue().bold(),
            style("skillbook add <name> --level LEVEL_1").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("ID").fg(Color::White),
        Cell::new("Name").fg(Color::White),
        Cell::new("Level").fg(Color::White),
    ]);

    for skill in &page.items {
        table.add_row(vec![
            Cell::new(skill.skill_id).fg(Color::DarkGrey),
            Cell::new(&skill.skill_name).fg(Color::Cyan),
            level_cell(skill.level_of_confidence),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} of {} skill{} (page {} of {})",
        style(page.items.len()).bold(),
        page.total,
        if page.total == 1 { "" } else { "s" },
        page.offset / page.limit + 1,
        page.total_pages()
    );
    println!();

    Ok(())
}

/// Add a new skill.
pub async fn add_skill(state: &AppState, name: String, level: &str, json: bool) -> Result<()> {
    let level = parse_level(level)?;
    let skill = state
        .skill_service
        .create_skill(NewSkill::new(name, level))
        .await?;

    if !json {
        println!();
        println!("  {} Skill added successfully!", style("✓").green().bold());
    }
    print_skill(&skill, json)
}

/// Show one skill. Numeric input is tried as an id first, then as a name.
pub async fn show_skill(state: &AppState, skill: &str, json: bool) -> Result<()> {
    let found = match skill.parse::<SkillId>() {
        Ok(id) => match state.skill_service.get_skill_by_id(id).await {
            Err(SkillError::NotFoundById(_)) => state.skill_service.get_skill_by_name(skill).await,
            other => other,
        },
        Err(_) => state.skill_service.get_skill_by_name(skill).await,
    }?;

    print_skill(&found, json)
}

/// Rename a skill.
pub async fn rename_skill(state: &AppState, id: i64, new_name: &str, json: bool) -> Result<()> {
    let skill = state.skill_service.rename_skill(SkillId(id), new_name).await?;

    if !json {
        println!();
        println!("  {} Skill renamed.", style("✓").green().bold());
    }
    print_skill(&skill, json)
}

/// Change a skill's confidence level.
pub async fn set_level(state: &AppState, id: i64, level: &str, json: bool) -> Result<()> {
    let level = parse_level(level)?;
    let skill = state.skill_service.set_skill_level(SkillId(id), level).await?;

    if !json {
        println!();
        println!("  {} Level updated.", style("✓").green().bold());
    }
    print_skill(&skill, json)
}

/// Delete a skill. Deleting a missing id succeeds silently.
pub async fn delete_skill(state: &AppState, id: i64, json: bool) -> Result<()> {
    state.skill_service.delete_skill(SkillId(id)).await?;

    if json {
        println!("{}", serde_json::json!({ "deleted": true, "skill_id": id }));
    } else {
        println!();
        println!("  {} Skill {} deleted.", style("✓").green().bold(), id);
        println!();
    }
    Ok(())
}
