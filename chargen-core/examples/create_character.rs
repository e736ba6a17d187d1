//! Create one character through both form stages and save the roster.
//!
//! Run with: `cargo run -p chargen-core --example create_character -- roll`
//!
//! Reads `CHARGEN_ROSTER_PATH`, `CHARGEN_RNG_SEED` and `CHARGEN_LOG` from the
//! environment or a `.env` file.

use chargen_core::form::{
    assignment_field, CLASS_FIELD, GENERATED_STATS_FIELD, METHOD_FIELD, NAME_FIELD, RACE_FIELD,
};
use chargen_core::testing::sample_catalog;
use chargen_core::{
    Ability, CharacterStore, ChargenConfig, CreationWorkflow, FormData, SavedRoster, Submission,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ChargenConfig::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .init();

    let method = std::env::args().nth(1).unwrap_or_else(|| "roll".to_string());

    let (mut catalog, store) = SavedRoster::load_or_default(&config.roster_path)
        .await?
        .into_parts();
    if catalog.list_races().is_empty() {
        catalog = sample_catalog();
    }

    let race = catalog.list_races().remove(0);
    let class = catalog.list_classes().remove(0);
    let mut workflow = CreationWorkflow::new(catalog, store, config.rng());

    println!("=== Stage one ===");
    let data = FormData::new()
        .with(NAME_FIELD, "Example Hero")
        .with(RACE_FIELD, &race.id)
        .with(CLASS_FIELD, &class.id)
        .with(METHOD_FIELD, &method);

    let stats = match workflow.submit(&data) {
        Submission::StatsGenerated { stats, .. } => stats,
        other => {
            println!("Stage one rejected: {:?}", other.form().map(|f| &f.errors));
            return Ok(());
        }
    };
    println!("Generated ({method}): {stats}");

    println!("\n=== Stage two ===");
    let mut data = data.with(GENERATED_STATS_FIELD, stats.to_string());
    for (ability, value) in Ability::all().into_iter().zip(stats.sorted_desc()) {
        println!("  {:<12} {value}", ability.name());
        data.insert(assignment_field(ability), value.to_string());
    }

    match workflow.submit(&data) {
        Submission::Created(character) => {
            println!("\nCreated {}", character.summary(workflow.catalog()));
        }
        other => {
            println!("\nStage two rejected: {:?}", other.form().map(|f| &f.errors));
            return Ok(());
        }
    }

    let (catalog, store) = workflow.into_parts();
    SavedRoster::new(&catalog, &store)
        .save_json(&config.roster_path)
        .await?;
    println!(
        "Saved {} character(s) to {}",
        store.list().len(),
        config.roster_path.display()
    );

    Ok(())
}
