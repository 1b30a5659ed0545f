//! `mdgen project list|create|update|show`

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use mdgen_core::{
    config, FileStore, Project, ProjectId, ProjectRegistry, ProjectStatus, ProjectUpdate,
    UpdateOutcome,
};

use super::super::StatusArg;

/// Create, update and inspect projects.
#[derive(Subcommand, Debug)]
pub enum ProjectCommand {
    /// List all projects, newest first.
    List(ListArgs),

    /// Create a new draft project.
    Create(CreateArgs),

    /// Update fields of an existing project. Status is re-derived from the step.
    Update(UpdateArgs),

    /// Show a single project.
    Show(ShowArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Project title.
    pub title: String,

    /// Short description. A placeholder is stored when omitted or empty.
    #[arg(long, short = 'd', default_value = "")]
    pub description: String,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Id of the project to update.
    pub id: u64,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Current workflow step (1 = draft, 2-4 = in progress, 5 = completed).
    #[arg(long, short = 's', allow_negative_numbers = true)]
    pub step: Option<i64>,

    /// Accepted for completeness; overridden by the status derived from the step.
    #[arg(long, value_name = "STATUS")]
    pub status: Option<StatusArg>,

    #[arg(long)]
    pub image_url: Option<String>,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Id of the project to show.
    pub id: u64,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Tabled)]
struct ProjectTableRow {
    #[tabled(rename = "id")]
    id: u64,
    #[tabled(rename = "title")]
    title: String,
    #[tabled(rename = "status")]
    status: String,
    #[tabled(rename = "step")]
    step: String,
    #[tabled(rename = "created")]
    date: String,
}

pub fn run(cmd: ProjectCommand) -> Result<()> {
    let mut registry = open_registry()?;
    match cmd {
        ProjectCommand::List(args) => list(&registry, args),
        ProjectCommand::Create(args) => create(&mut registry, args),
        ProjectCommand::Update(args) => update(&mut registry, args),
        ProjectCommand::Show(args) => show(&registry, args),
    }
}

fn open_registry() -> Result<ProjectRegistry<FileStore>> {
    let config = config::load().context("failed to load ~/.mdgen/config.yaml")?;
    let store = FileStore::open().context("cannot locate the project store")?;
    Ok(ProjectRegistry::hydrate(store, config))
}

fn list(registry: &ProjectRegistry<FileStore>, args: ListArgs) -> Result<()> {
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(registry.projects())
                .context("failed to serialize projects")?
        );
        return Ok(());
    }

    if registry.is_empty() {
        println!("No projects yet.");
        println!("Run: mdgen project create <title>");
        return Ok(());
    }

    let rows: Vec<ProjectTableRow> = registry
        .projects()
        .iter()
        .map(|p| ProjectTableRow {
            id: p.id.0,
            title: p.title.clone(),
            status: p.status.to_string(),
            step: format_progress(p),
            date: p.date.clone(),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
    Ok(())
}

fn create(registry: &mut ProjectRegistry<FileStore>, args: CreateArgs) -> Result<()> {
    let project = registry
        .create_project(args.title, args.description)
        .context("project created but could not be saved")?;

    println!("✓ Created project {} '{}'", project.id, project.title);
    Ok(())
}

fn update(registry: &mut ProjectRegistry<FileStore>, args: UpdateArgs) -> Result<()> {
    let id = ProjectId(args.id);
    let changes = ProjectUpdate {
        title: args.title,
        description: args.description,
        status: args.status.map(ProjectStatus::from),
        step_current: args.step,
        image_url: args.image_url,
        ..Default::default()
    };

    let outcome = registry
        .update_project(id, changes)
        .with_context(|| format!("failed to update project {id}"))?;

    match outcome {
        UpdateOutcome::Updated(project) => {
            println!(
                "✓ Updated project {} — {} ({})",
                project.id,
                status_colored(project.status),
                format_progress(&project)
            );
            Ok(())
        }
        UpdateOutcome::NotFound => bail!("project {id} not found"),
    }
}

fn show(registry: &ProjectRegistry<FileStore>, args: ShowArgs) -> Result<()> {
    let id = ProjectId(args.id);
    let Some(project) = registry.get_project(id) else {
        bail!("project {id} not found");
    };

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(project).context("failed to serialize project")?
        );
        return Ok(());
    }

    println!("{} {}", format!("#{}", project.id).bold(), project.title.bold());
    println!("  status:      {}", status_colored(project.status));
    println!("  step:        {}", format_progress(project));
    println!("  created:     {}", project.date);
    println!("  description: {}", project.description);
    println!("  image:       {}", project.image_url);
    Ok(())
}

fn format_progress(project: &Project) -> String {
    let (current, total) = project.progress();
    format!("{current}/{total}")
}

fn status_colored(status: ProjectStatus) -> String {
    let label = status.to_string();
    match status {
        ProjectStatus::Draft => label.bright_black().to_string(),
        ProjectStatus::InProgress => label.yellow().to_string(),
        ProjectStatus::Completed => label.green().to_string(),
    }
}
