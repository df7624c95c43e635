//! Assembling loaded catalogs into a [`TemplateRegistry`].

use game_core::{Item, PartKind, SpawnTables, Template, TemplateId, TemplateRegistry};
use strum::IntoEnumIterator;

use crate::loaders::{ActorSpec, ItemSpec, LoadResult, PartSpec};

/// Registers parts (as part-carrying items), then items, then actors.
///
/// Ids share one namespace; a repeated id is an error. Part kinds without a
/// `phantom_<kind>` template are reported with a warning, since rituals on
/// those parts will be refused.
pub fn build_registry(
    parts: &[PartSpec],
    items: &[ItemSpec],
    actors: &[ActorSpec],
) -> LoadResult<TemplateRegistry> {
    let mut registry = TemplateRegistry::new();

    for spec in parts {
        registry
            .insert_item(spec.id.as_str(), Item::from_part(spec.build()))
            .map_err(|e| anyhow::anyhow!("Failed to register part: {}", e))?;
    }
    for spec in items {
        registry
            .insert_item(spec.id.as_str(), spec.build())
            .map_err(|e| anyhow::anyhow!("Failed to register item: {}", e))?;
    }
    for spec in actors {
        let actor = spec.build(&registry)?;
        registry
            .insert_actor(spec.id.as_str(), actor)
            .map_err(|e| anyhow::anyhow!("Failed to register actor: {}", e))?;
    }

    for kind in PartKind::iter() {
        if registry.phantom_part(kind).is_err() {
            tracing::warn!(%kind, "no phantom part template; rituals on this kind will fail");
        }
    }

    tracing::debug!(
        parts = parts.len(),
        items = items.len(),
        actors = actors.len(),
        "template registry built"
    );
    Ok(registry)
}

/// Checks that every spawn table entry names a template of the right kind.
pub fn validate_tables(tables: &SpawnTables, templates: &TemplateRegistry) -> LoadResult<()> {
    for entry in tables.items.entries() {
        match templates.get(&entry.template) {
            Some(Template::Item(_)) => {}
            Some(Template::Actor(_)) => anyhow::bail!(
                "Item table entry '{}' (floor {}) names an actor",
                entry.template,
                entry.floor
            ),
            None => anyhow::bail!(
                "Item table entry '{}' (floor {}) names an unknown template",
                entry.template,
                entry.floor
            ),
        }
    }
    for entry in tables.monsters.entries() {
        match templates.get(&entry.template) {
            Some(Template::Actor(_)) => {}
            Some(Template::Item(_)) => anyhow::bail!(
                "Monster table entry '{}' (floor {}) names an item",
                entry.template,
                entry.floor
            ),
            None => anyhow::bail!(
                "Monster table entry '{}' (floor {}) names an unknown template",
                entry.template,
                entry.floor
            ),
        }
    }
    if !templates.contains(&TemplateId::from("player")) {
        tracing::warn!("no `player` actor template");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loaders::{ActorLoader, ItemLoader, PartLoader, TablesLoader};

    fn specs() -> (Vec<PartSpec>, Vec<ItemSpec>, Vec<ActorSpec>) {
        let parts = PartLoader::parse(
            r#"(parts: [
                (id: "human_arm", name: "Human Arm", kind: arm, health: 2),
                (id: "phantom_arm", name: "Phantom Arm", kind: arm, form: spirit),
            ])"#,
        )
        .expect("parts");
        let items = ItemLoader::parse(
            r#"(items: [(id: "torn_scrap", name: "Torn Scrap", glyph: '=', color: (1, 2, 3), stack: Some((count: 5, quality: 1)))])"#,
        )
        .expect("items");
        let actors = ActorLoader::parse(
            r#"(actors: [(id: "orc", name: "Orc", glyph: 'o', color: (63, 127, 63), ai: hostile,
                fighter: (hp: 10, power: 3), body: ["human_arm"])])"#,
        )
        .expect("actors");
        (parts, items, actors)
    }

    #[test]
    fn parts_become_item_templates() {
        let (parts, items, actors) = specs();
        let registry = build_registry(&parts, &items, &actors).expect("registry");

        assert_eq!(registry.len(), 4);
        let arm = registry
            .spawn_part(&TemplateId::from("human_arm"))
            .expect("part template");
        assert_eq!(arm.name, "Human Arm");
        assert!(registry.phantom_part(PartKind::Arm).is_ok());

        let orc = registry
            .spawn_actor(&TemplateId::from("orc"))
            .expect("actor template");
        assert_eq!(orc.body.parts()[0].name, "Human Arm");
    }

    #[test]
    fn ids_share_one_namespace() {
        let (parts, mut items, actors) = specs();
        items[0].id = "human_arm".to_string();
        let err = build_registry(&parts, &items, &actors).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to register item: template `human_arm` is already registered"
        );
    }

    #[test]
    fn tables_must_name_matching_templates() {
        let (parts, items, actors) = specs();
        let registry = build_registry(&parts, &items, &actors).expect("registry");

        let good = TablesLoader::parse(
            "[[items]]\nfloor = 0\ntemplate = \"torn_scrap\"\nweight = 1\n\n[[monsters]]\nfloor = 0\ntemplate = \"orc\"\nweight = 1\n",
        )
        .expect("tables");
        validate_tables(&good, &registry).expect("valid");

        let swapped = TablesLoader::parse("[[monsters]]\nfloor = 2\ntemplate = \"torn_scrap\"\nweight = 1\n")
            .expect("tables");
        assert_eq!(
            validate_tables(&swapped, &registry).unwrap_err().to_string(),
            "Monster table entry 'torn_scrap' (floor 2) names an item"
        );

        let unknown = TablesLoader::parse("[[items]]\nfloor = 1\ntemplate = \"ghost\"\nweight = 1\n")
            .expect("tables");
        assert_eq!(
            validate_tables(&unknown, &registry).unwrap_err().to_string(),
            "Item table entry 'ghost' (floor 1) names an unknown template"
        );
    }
}
