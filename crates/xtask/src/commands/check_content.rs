//! Load and cross-check a content directory.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use console::style;

use game_content::GameContent;
use game_core::{FloorRequest, GameRng, GeneratorKind, PartKind, Template, TemplateId};
use runtime::PLAYER_TEMPLATE;
use strum::IntoEnumIterator;

use crate::utils::load_content;

/// Load and cross-check a content directory
#[derive(Parser, Debug)]
pub struct CheckContent {
    /// Content directory (defaults to the embedded content)
    #[arg(value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Also generate this many floors with every generator as a smoke test
    #[arg(long, default_value_t = 0)]
    floors: u32,
}

impl CheckContent {
    pub fn execute(self) -> Result<()> {
        let source = match &self.data_dir {
            Some(dir) => dir.display().to_string(),
            None => "embedded".to_string(),
        };
        let content = load_content(self.data_dir.as_deref())?;

        let (mut actors, mut items) = (0, 0);
        for id in content.templates.ids() {
            match content.templates.get(id) {
                Some(Template::Actor(_)) => actors += 1,
                Some(Template::Item(_)) => items += 1,
                None => {}
            }
        }

        println!("{} {}", style("Content:").bold().cyan(), source);
        println!("  Actor templates: {actors}");
        println!("  Item templates: {items}");
        println!(
            "  Generator rotation: {}",
            content
                .config
                .generator_rotation
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        );

        let mut problems = Vec::new();
        if !content.templates.contains(&TemplateId::from(PLAYER_TEMPLATE)) {
            problems.push(format!("no '{PLAYER_TEMPLATE}' actor template"));
        }
        for kind in PartKind::iter() {
            if content.templates.phantom_part(kind).is_err() {
                problems.push(format!("no phantom part for {kind}"));
            }
        }
        if problems.is_empty() {
            smoke_test(&content, self.floors, &mut problems);
        }

        if problems.is_empty() {
            println!("{}", style("✓ content is consistent").green().bold());
            return Ok(());
        }
        for problem in &problems {
            println!("{} {problem}", style("✗").red().bold());
        }
        anyhow::bail!("{} content problem(s) found", problems.len())
    }
}

fn smoke_test(content: &GameContent, floors: u32, problems: &mut Vec<String>) {
    for floor in 1..=floors {
        for kind in GeneratorKind::iter() {
            let request =
                FloorRequest::new(floor, &content.config, &content.templates, &content.tables);
            let result = content
                .templates
                .spawn_actor(&TemplateId::from(PLAYER_TEMPLATE))
                .map_err(|e| e.to_string())
                .and_then(|player| {
                    kind.generate(&request, player, &mut GameRng::new(u64::from(floor)))
                        .map_err(|e| e.to_string())
                });
            if let Err(error) = result {
                problems.push(format!("floor {floor} ({kind}): {error}"));
            }
        }
    }
}
