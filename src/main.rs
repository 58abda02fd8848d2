mod config;

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use briefing_client::{HttpClient, load_catalog};
use briefing_config::{Definition, Step};
use briefing_editor::{ConditionField, EditError, EntryField, StepField, StepTree};
use briefing_validator::Validator;
use briefing_wizard::{Walker, Wizard, WizardState};

/// Briefing - design multi-step forms and walk through them
#[derive(Parser)]
#[command(name = "briefing")]
#[command(version, about, long_about = None)]
struct Cli {
  /// Path to the data directory (default: ~/.briefing)
  #[arg(long, global = true)]
  data_dir: Option<PathBuf>,

  /// Path to the JSON config file (default: <data dir>/config.json)
  #[arg(long, global = true)]
  config: Option<PathBuf>,

  /// Base URL of the briefing API, overriding the config file
  #[arg(long, global = true, env = "BRIEFING_API_URL")]
  base_url: Option<String>,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Print the available input types and condition types
  Catalog,

  /// Check a briefing file the way submit would
  Validate {
    /// Path to the briefing definition (JSON)
    file: PathBuf,
  },

  /// Create a briefing through the designer wizard and submit it
  New {
    /// Path to the briefing definition (JSON)
    file: PathBuf,
  },

  /// Walk through a stored briefing step by step
  Show {
    /// Id of the stored briefing
    id: String,

    /// Answers as a JSON object keyed "<position>.<index>"
    #[arg(long)]
    answers: Option<PathBuf>,
  },
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
    )
    .with_writer(io::stderr)
    .init();

  let cli = Cli::parse();

  let data_dir = match cli.data_dir {
    Some(dir) => dir,
    None => dirs::home_dir()
      .context("could not determine home directory")?
      .join(".briefing"),
  };

  let Some(command) = cli.command else {
    println!("briefing - use --help to see available commands");
    return Ok(());
  };

  let client_config = config::load_client_config(cli.config.as_deref(), &data_dir, cli.base_url)?;
  let client = HttpClient::new(client_config).context("failed to create API client")?;

  let rt = tokio::runtime::Runtime::new()?;
  rt.block_on(async {
    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
      if tokio::signal::ctrl_c().await.is_ok() {
        warn!("interrupted, ignoring pending results");
        on_interrupt.cancel();
      }
    });

    match command {
      Commands::Catalog => print_catalog(&client).await,
      Commands::Validate { file } => validate(&client, &file).await,
      Commands::New { file } => create(client, &file, &cancel).await,
      Commands::Show { id, answers } => show(&client, &id, answers.as_deref(), &cancel).await,
    }
  })
}

async fn print_catalog(client: &HttpClient) -> Result<()> {
  let catalog = load_catalog(client)
    .await
    .context("failed to load catalog")?;

  let output = serde_json::json!({
    "inputTypes": catalog.input_types,
    "conditionTypes": catalog.condition_types,
  });
  println!("{}", serde_json::to_string_pretty(&output)?);
  Ok(())
}

async fn validate(client: &HttpClient, file: &Path) -> Result<()> {
  let definition = read_definition(file).await?;
  let catalog = load_catalog(client)
    .await
    .context("failed to load catalog")?;

  match Validator::new(&catalog).validate_submit(&definition) {
    Ok(()) => {
      println!("{}", serde_json::json!({ "valid": true }));
      Ok(())
    }
    Err(e) => {
      println!(
        "{}",
        serde_json::json!({
          "valid": false,
          "stage": e.stage.label(),
          "field": e.field,
          "message": e.message,
        })
      );
      anyhow::bail!("{} is not a valid briefing", file.display())
    }
  }
}

async fn create(client: HttpClient, file: &Path, cancel: &CancellationToken) -> Result<()> {
  let definition = read_definition(file).await?;
  let mut wizard = Wizard::load(&client, client.clone(), cancel)
    .await
    .context("failed to start the designer")?;

  wizard.designer_mut().author = definition.author;
  wizard.next(cancel).await.context("identity stage failed")?;

  wizard.designer_mut().title = definition.title;
  wizard.designer_mut().description = definition.description;
  wizard.next(cancel).await.context("basic info stage failed")?;

  replay_design(wizard.designer_mut().steps_mut(), definition.steps)
    .context("failed to build the design")?;

  let state = wizard.next(cancel).await.context("submit failed")?;
  if let WizardState::Done { definition_id } = state {
    info!(definition_id = %definition_id, "briefing created");
    println!("{}", serde_json::json!({ "id": definition_id }));
  }
  Ok(())
}

/// Rebuild a step list through the editor operations, in position order.
fn replay_design(tree: &mut StepTree, mut steps: Vec<Step>) -> Result<(), EditError> {
  steps.sort_by_key(|s| s.position);

  for step in steps {
    let mut position = tree.add_step()?;
    if position != step.position {
      tree.set_step_field(position, StepField::Position(step.position))?;
      position = step.position;
    }
    tree.set_step_field(position, StepField::Title(step.title))?;
    tree.set_step_field(position, StepField::Description(step.description))?;

    for entry in step.inputs {
      let index = tree.add_field_entry(position)?;
      tree.set_entry_field(position, index, EntryField::InputType(entry.input_type_id))?;
      tree.set_entry_field(position, index, EntryField::Label(entry.label))?;
      tree.set_entry_field(position, index, EntryField::Helper(entry.helper))?;
      tree.set_entry_field(position, index, EntryField::Classes(entry.classes))?;

      for condition in entry.conditions {
        let c = tree.add_condition(position, index)?;
        tree.set_condition_field(
          position,
          index,
          c,
          ConditionField::ConditionType(condition.condition_type_id),
        )?;
        tree.set_condition_field(
          position,
          index,
          c,
          ConditionField::TargetStep(condition.target_step_position),
        )?;
        tree.set_condition_field(position, index, c, ConditionField::Value(condition.value))?;
      }
    }
  }

  Ok(())
}

async fn show(
  client: &HttpClient,
  id: &str,
  answers: Option<&Path>,
  cancel: &CancellationToken,
) -> Result<()> {
  let mut walker = Walker::load(client, client, id, cancel)
    .await
    .with_context(|| format!("failed to load briefing '{}'", id))?;

  if let Some(path) = answers {
    for ((position, index), value) in read_answers(path).await? {
      walker
        .set_answer(position, index, value)
        .with_context(|| format!("invalid answer key '{}.{}'", position, index))?;
    }
  }

  let mut pages = Vec::new();
  while let Some(step) = walker.current_step() {
    pages.push(serde_json::json!({
      "position": step.position,
      "title": step.label(),
      "description": step.description,
      "fields": walker.fields(),
    }));
    walker.next();
  }

  let output = serde_json::json!({
    "title": walker.definition().title,
    "steps": pages,
  });
  println!("{}", serde_json::to_string_pretty(&output)?);
  Ok(())
}

async fn read_definition(file: &Path) -> Result<Definition> {
  let content = tokio::fs::read_to_string(file)
    .await
    .with_context(|| format!("failed to read briefing file: {}", file.display()))?;

  serde_json::from_str(&content)
    .with_context(|| format!("failed to parse briefing file: {}", file.display()))
}

async fn read_answers(file: &Path) -> Result<Vec<((u32, usize), String)>> {
  let content = tokio::fs::read_to_string(file)
    .await
    .with_context(|| format!("failed to read answers file: {}", file.display()))?;
  let raw: HashMap<String, String> = serde_json::from_str(&content)
    .with_context(|| format!("failed to parse answers file: {}", file.display()))?;

  raw
    .into_iter()
    .map(|(key, value)| Ok((parse_answer_key(&key)?, value)))
    .collect()
}

fn parse_answer_key(key: &str) -> Result<(u32, usize)> {
  let (position, index) = key
    .split_once('.')
    .with_context(|| format!("answer key '{}' is not '<position>.<index>'", key))?;
  let position = position
    .parse()
    .with_context(|| format!("invalid step position in answer key '{}'", key))?;
  let index = index
    .parse()
    .with_context(|| format!("invalid field index in answer key '{}'", key))?;
  Ok((position, index))
}

#[cfg(test)]
mod tests {
  use super::*;
  use briefing_config::{Condition, FieldEntry};

  #[test]
  fn test_parse_answer_key() {
    assert_eq!(parse_answer_key("2.0").unwrap(), (2, 0));
    assert!(parse_answer_key("2").is_err());
    assert!(parse_answer_key("a.0").is_err());
    assert!(parse_answer_key("1.-1").is_err());
  }

  #[test]
  fn test_replay_keeps_positions_and_content() {
    let mut later = Step::new(5);
    later.title = "Budget".to_string();
    later.inputs.push(FieldEntry {
      input_type_id: "text".to_string(),
      label: "Amount".to_string(),
      conditions: vec![Condition {
        condition_type_id: "equals".to_string(),
        target_step_position: Some(2),
        value: "yes".to_string(),
        ..Default::default()
      }],
      ..Default::default()
    });
    let mut first = Step::new(2);
    first.title = "Contact".to_string();

    let mut tree = StepTree::new();
    replay_design(&mut tree, vec![later.clone(), first.clone()]).unwrap();

    assert_eq!(tree.positions(), vec![2, 5]);
    assert_eq!(tree.step(2), Some(&first));
    assert_eq!(tree.step(5), Some(&later));
  }

  #[test]
  fn test_replay_rejects_position_zero() {
    let mut tree = StepTree::new();
    let result = replay_design(&mut tree, vec![Step::new(0)]);
    assert_eq!(result, Err(EditError::InvalidPosition));
  }
}
