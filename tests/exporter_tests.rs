// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::{run, store};
use fintrack::seed;
use tempfile::tempdir;

#[test]
fn export_json_writes_the_backup_document() {
    let mut s = store();
    seed::populate(&mut s);

    let dir = tempdir().unwrap();
    let out_path = dir.path().join("fintrack-data.json");
    let out_str = out_path.to_string_lossy().to_string();
    run(&mut s, &["export", "json", "--out", &out_str]).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    let mut keys: Vec<&str> = parsed
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    keys.sort();
    assert_eq!(
        keys,
        [
            "budgets",
            "categories",
            "expenses",
            "financialHealthScores",
            "incomes",
            "savingsGoals",
            "user",
        ]
    );
    assert_eq!(
        parsed["expenses"].as_array().unwrap().len(),
        s.snapshot().expenses.len()
    );
    assert_eq!(parsed["user"]["name"], "Guest");
    assert_eq!(parsed["financialHealthScores"].as_array().unwrap().len(), 1);
    // money is written as strings
    assert!(parsed["budgets"][0]["amount"].is_string());
}

#[test]
fn export_csv_has_one_row_per_expense() {
    let mut s = store();
    run(&mut s, &["category", "add", "Food"]).unwrap();
    run(
        &mut s,
        &["expense", "add", "--amount", "12.50", "--category", "Food", "--date", "2025-08-02", "--notes", "Lunch, with team"],
    )
    .unwrap();
    run(
        &mut s,
        &["expense", "add", "--amount", "3", "--category", "Food", "--date", "2025-08-01"],
    )
    .unwrap();

    let dir = tempdir().unwrap();
    let out_path = dir.path().join("expenses.csv");
    let out_str = out_path.to_string_lossy().to_string();
    run(&mut s, &["export", "csv", "--out", &out_str]).unwrap();

    let mut rdr = csv::Reader::from_path(&out_path).unwrap();
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(&headers[1], "date");
    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    // oldest first
    assert_eq!(&rows[0][1], "2025-08-01");
    assert_eq!(&rows[1][2], "Food");
    assert_eq!(&rows[1][3], "12.50");
    assert_eq!(&rows[1][4], "Lunch, with team");
}

#[test]
fn export_into_missing_directory_fails() {
    let mut s = store();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("nope").join("out.json");
    let out_str = out_path.to_string_lossy().to_string();
    assert!(run(&mut s, &["export", "json", "--out", &out_str]).is_err());
}
