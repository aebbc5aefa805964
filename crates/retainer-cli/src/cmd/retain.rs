use crate::cmd::RetentionArgs;
use crate::output::print_json;
use retainer_core::retain_releases;
use std::path::Path;

pub fn run(root: &Path, args: RetentionArgs, json: bool) -> anyhow::Result<()> {
    let options = args.load_options(root)?;
    let retention = retain_releases(&options);

    for event in &retention.events {
        tracing::info!(
            release_id = %event.release_id,
            environment_id = %event.environment_id,
            "{event}"
        );
    }

    if json {
        let value = serde_json::json!({
            "keep": options.num_of_releases_to_keep(),
            "retained": retention.releases,
            "events": retention.events,
        });
        print_json(&value)?;
        return Ok(());
    }

    if retention.is_empty() {
        println!("No releases retained.");
        return Ok(());
    }

    for event in &retention.events {
        println!("{event}");
    }
    println!();
    println!(
        "Retained {} release occurrence(s), keeping up to {} per project/environment.",
        retention.releases.len(),
        options.num_of_releases_to_keep()
    );
    Ok(())
}
