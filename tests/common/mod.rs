#![allow(dead_code)]

use std::io::Write;

/// Build an in-memory zip. Names ending in `/` become directory entries.
pub fn zip_archive(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);

    for (name, content) in entries {
        if name.ends_with('/') {
            writer.add_directory(*name, options).unwrap();
        } else {
            writer.start_file(*name, options).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
    }

    writer.finish().unwrap().into_inner()
}

/// JSON page listing `runs`, each given as (id, conclusion)
pub fn runs_body(base: &str, runs: &[(u64, Option<&str>)]) -> String {
    let runs: Vec<serde_json::Value> = runs
        .iter()
        .map(|(id, conclusion)| run_json(base, *id, *conclusion))
        .collect();
    serde_json::json!({ "total_count": runs.len(), "workflow_runs": runs }).to_string()
}

/// JSON document of a single run
pub fn run_json(base: &str, id: u64, conclusion: Option<&str>) -> serde_json::Value {
    let status = if conclusion.is_some() { "completed" } else { "in_progress" };
    serde_json::json!({
        "id": id,
        "url": format!("{}/repos/pyca/cryptography/actions/runs/{}", base, id),
        "artifacts_url": format!("{}/repos/pyca/cryptography/actions/runs/{}/artifacts", base, id),
        "status": status,
        "conclusion": conclusion,
        "head_branch": "42.0.1",
        "html_url": format!("https://github.com/pyca/cryptography/actions/runs/{}", id),
    })
}

/// JSON page listing artifacts, each given as (id, name)
pub fn artifacts_body(base: &str, artifacts: &[(u64, &str)]) -> String {
    let artifacts: Vec<serde_json::Value> = artifacts
        .iter()
        .map(|(id, name)| {
            serde_json::json!({
                "id": id,
                "name": name,
                "archive_download_url": format!("{}/download/{}/zip", base, id),
                "size_in_bytes": 1024,
                "expired": false,
            })
        })
        .collect();
    serde_json::json!({ "total_count": artifacts.len(), "artifacts": artifacts }).to_string()
}
