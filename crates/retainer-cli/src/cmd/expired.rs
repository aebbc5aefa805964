use crate::cmd::RetentionArgs;
use crate::output::{print_json, print_table};
use retainer_core::{expired_releases, retain_releases};
use std::path::Path;

pub fn run(root: &Path, args: RetentionArgs, json: bool) -> anyhow::Result<()> {
    let options = args.load_options(root)?;
    let retention = retain_releases(&options);
    let expired = expired_releases(&options, &retention);

    tracing::debug!(
        retained = retention.releases.len(),
        expired = expired.len(),
        "computed expiry"
    );

    if json {
        let value = serde_json::json!({
            "keep": options.num_of_releases_to_keep(),
            "expired": expired,
        });
        print_json(&value)?;
        return Ok(());
    }

    if expired.is_empty() {
        println!("Nothing to expire. Every release is retained.");
        return Ok(());
    }

    let rows = expired
        .iter()
        .map(|r| {
            vec![
                r.id.clone(),
                r.project_id.clone().unwrap_or_else(|| "-".to_string()),
                r.version.clone().unwrap_or_else(|| "-".to_string()),
                r.created.to_rfc3339(),
            ]
        })
        .collect();
    print_table(&["RELEASE", "PROJECT", "VERSION", "CREATED"], rows);
    Ok(())
}
