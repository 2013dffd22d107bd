// ABOUTME: Integration tests for the pierre-ranker binary
// ABOUTME: Runs rank, plan and learn-weights against request files written to a temp directory
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Integration tests for the pierre-ranker binary.
//!
//! These tests verify command structure, JSON output and error handling.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use helpers::fixtures::*;
use pierre_recipe_ranker::intelligence::daily_plan::PlanOptions;
use pierre_recipe_ranker::services::{PlanRequest, RankRequest};
use pierre_recipe_ranker::store::UserRecord;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;
use uuid::Uuid;

/// Helper to run the CLI and capture output
fn run_cli(args: &[&str]) -> (i32, String, String) {
    run_cli_with_env(args, &[])
}

/// Run the CLI with extra environment variables
fn run_cli_with_env(args: &[&str], vars: &[(&str, &str)]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_pierre-ranker"))
        .args(args)
        .env("RUST_LOG", "warn")
        .envs(vars.iter().copied())
        .output()
        .unwrap();

    let exit_code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    (exit_code, stdout, stderr)
}

fn write_request(dir: &TempDir, name: &str, value: &Value) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

fn rank_request(user_id: Option<Uuid>) -> Value {
    let mut request = RankRequest::new(candidates(), basic_context());
    if let Some(id) = user_id {
        request = request.for_user(id);
    }
    serde_json::to_value(request).unwrap()
}

fn target_user(user_id: Uuid) -> UserRecord {
    UserRecord::new(user_id, preferences())
        .with_macro_goals(meal_goals())
        .with_interactions(behavior_history().interactions)
}

#[test]
fn test_cli_help_shows_commands() {
    let (exit_code, stdout, _stderr) = run_cli(&["--help"]);

    assert_eq!(exit_code, 0, "CLI help should exit with 0");
    assert!(stdout.contains("rank"), "Help should mention 'rank' command");
    assert!(stdout.contains("plan"), "Help should mention 'plan' command");
    assert!(
        stdout.contains("learn-weights"),
        "Help should mention 'learn-weights' command"
    );
}

#[test]
fn test_rank_prints_sorted_json() {
    let dir = TempDir::new().unwrap();
    let input = write_request(&dir, "rank.json", &rank_request(None));

    let (exit_code, stdout, stderr) = run_cli(&["rank", "--input", path_str(&input), "--limit", "3"]);
    assert_eq!(exit_code, 0, "rank failed: {stderr}");

    let output: Value = serde_json::from_str(&stdout).unwrap();
    let recipes = output["recipes"].as_array().unwrap();
    assert_eq!(recipes.len(), 3);
    let scores: Vec<f64> = recipes.iter().map(|r| r["score"].as_f64().unwrap()).collect();
    assert!(scores.windows(2).all(|pair| pair[0] >= pair[1]));
    assert_eq!(output["learned_weights"], json!(false));
}

#[test]
fn test_rank_table_output() {
    let dir = TempDir::new().unwrap();
    let input = write_request(&dir, "rank.json", &rank_request(None));

    let (exit_code, stdout, _stderr) =
        run_cli(&["rank", "-i", path_str(&input), "--format", "table"]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains("RANK"));
    assert!(stdout.contains("Salmon Quinoa Bowl"));
    assert!(stdout.contains("Weights: default"));
}

#[test]
fn test_rank_with_users_adds_collaborative_scores() {
    let dir = TempDir::new().unwrap();
    let user_id = Uuid::new_v4();
    let mut request = rank_request(Some(user_id));
    request["users"] = serde_json::to_value(vec![target_user(user_id)]).unwrap();
    let input = write_request(&dir, "rank.json", &request);

    let (exit_code, stdout, stderr) = run_cli(&["rank", "--input", path_str(&input)]);
    assert_eq!(exit_code, 0, "rank failed: {stderr}");

    let output: Value = serde_json::from_str(&stdout).unwrap();
    let recipes = output["recipes"].as_array().unwrap();
    assert!(recipes.iter().all(|r| r["collaborative"].is_object()));
}

#[test]
fn test_plan_with_slot_flags() {
    let dir = TempDir::new().unwrap();
    let request = PlanRequest {
        candidates: candidates(),
        daily_goals: daily_goals(),
        context: basic_context(),
        options: PlanOptions::default(),
    };
    let input = write_request(&dir, "plan.json", &serde_json::to_value(request).unwrap());

    let (exit_code, stdout, stderr) = run_cli(&[
        "plan",
        "--input",
        path_str(&input),
        "--slots",
        "lunch,snack",
        "--distinct",
    ]);
    assert_eq!(exit_code, 0, "plan failed: {stderr}");

    let output: Value = serde_json::from_str(&stdout).unwrap();
    let meals = output["meals"].as_array().unwrap();
    assert_eq!(meals.len(), 2);
    assert_eq!(meals[0]["slot"], json!("lunch"));
    assert_eq!(meals[1]["slot"], json!("snack"));
    assert_ne!(meals[0]["recipe"]["id"], meals[1]["recipe"]["id"]);
}

#[test]
fn test_learn_weights_reports_samples() {
    let dir = TempDir::new().unwrap();
    let user_id = Uuid::new_v4();
    let request = json!({
        "user_id": user_id,
        "context": basic_context(),
        "users": [target_user(user_id)],
    });
    let input = write_request(&dir, "learn.json", &request);

    let (exit_code, stdout, stderr) = run_cli(&["learn-weights", "--input", path_str(&input)]);
    assert_eq!(exit_code, 0, "learn-weights failed: {stderr}");

    let output: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(output["sample_size"], json!(7));
    assert!(output["weights"]["discriminatory"].is_number());
}

#[test]
fn test_missing_input_file_fails() {
    let (exit_code, _stdout, stderr) = run_cli(&["rank", "--input", "/nonexistent/request.json"]);
    assert_ne!(exit_code, 0);
    assert!(stderr.contains("Failed to read request file"));
}

#[test]
fn test_invalid_json_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();

    let (exit_code, _stdout, stderr) = run_cli(&["plan", "--input", path_str(&path)]);
    assert_ne!(exit_code, 0);
    assert!(stderr.contains("Invalid request file"));
}

#[test]
fn test_unknown_slot_is_rejected() {
    let (exit_code, _stdout, _stderr) =
        run_cli(&["plan", "--input", "unused.json", "--slots", "brunch"]);
    assert_eq!(exit_code, 2);
}

#[test]
fn test_non_finite_config_override_fails() {
    let dir = TempDir::new().unwrap();
    let input = write_request(&dir, "rank.json", &rank_request(None));

    let (exit_code, stdout, stderr) = run_cli_with_env(
        &["rank", "--input", path_str(&input)],
        &[("PIERRE_RANKING_MACRO_WEIGHT", "NaN")],
    );
    assert_ne!(exit_code, 0);
    assert!(stdout.is_empty());
    assert!(
        stderr.contains("Configuration is invalid"),
        "unexpected stderr: {stderr}"
    );
}
