//! End-to-end CLI integration tests for the `fo` binary.
//!
//! Each test creates its own temporary directory, initializes a forma
//! project, and exercises the `fo` binary as a subprocess via `assert_cmd`.

use assert_cmd::Command;
use chrono::Datelike;
use predicates::prelude::*;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build a `Command` targeting the cargo-built `fo` binary.
fn fo() -> Command {
    let mut cmd = Command::cargo_bin("fo").unwrap();
    cmd.env_remove("FORMA_DIR");
    cmd
}

/// Initialize a fresh forma project in a temp directory and return the handle.
fn init_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    fo().args(["init", "--quiet"])
        .current_dir(tmp.path())
        .assert()
        .success();
    tmp
}

/// Add a field and return its ID (parsed from `--json` output).
fn add_field(tmp: &TempDir, field_type: &str, label: &str, extra_args: &[&str]) -> String {
    let mut args = vec!["field", "add", field_type, label, "--json"];
    args.extend_from_slice(extra_args);
    let output = fo().args(&args).current_dir(tmp.path()).output().unwrap();
    assert!(
        output.status.success(),
        "field add failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    json["id"].as_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// Flow 1: Build a form field by field
// ---------------------------------------------------------------------------

#[test]
fn flow1_build_a_form() {
    let tmp = init_project();

    let name_id = add_field(
        &tmp,
        "text",
        "Name",
        &["--required", "--rule", "required=Name is required"],
    );
    let email_id = add_field(
        &tmp,
        "text",
        "Email",
        &["--rule", "email=Enter a valid email"],
    );
    let country_id = add_field(
        &tmp,
        "select",
        "Country",
        &["--option", "DE", "--option", "FR"],
    );

    // Generated ids carry the field prefix
    assert!(name_id.starts_with("fld-"), "unexpected id: {}", name_id);
    assert!(email_id.starts_with("fld-"));
    assert!(country_id.starts_with("fld-"));

    // fo field list --json => 3 fields in insertion order
    let output = fo()
        .args(["field", "list", "--json"])
        .current_dir(tmp.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    let list: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let arr = list.as_array().expect("field list --json should return array");
    assert_eq!(arr.len(), 3);
    assert_eq!(arr[0]["id"].as_str().unwrap(), name_id);
    assert_eq!(arr[2]["id"].as_str().unwrap(), country_id);

    // Wire shape: "type" key, camelCase rule list
    assert_eq!(arr[0]["type"].as_str().unwrap(), "text");
    assert_eq!(
        arr[0]["validationRules"][0]["type"].as_str().unwrap(),
        "required"
    );
    assert_eq!(arr[2]["options"].as_array().unwrap().len(), 2);

    // fo field show renders the detail view
    fo().args(["field", "show", &country_id])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Options: DE, FR"));
}

// ---------------------------------------------------------------------------
// Flow 2: Update, move, delete
// ---------------------------------------------------------------------------

#[test]
fn flow2_update_move_delete() {
    let tmp = init_project();

    let a = add_field(&tmp, "text", "A", &[]);
    let b = add_field(&tmp, "text", "B", &[]);
    let c = add_field(&tmp, "text", "C", &[]);

    // Update label and required flag
    fo().args(["field", "update", &a, "--label", "Renamed", "--required", "true"])
        .current_dir(tmp.path())
        .assert()
        .success();

    let output = fo()
        .args(["field", "show", &a, "--json"])
        .current_dir(tmp.path())
        .output()
        .unwrap();
    let field: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(field["label"].as_str().unwrap(), "Renamed");
    assert_eq!(field["required"].as_bool().unwrap(), true);
    // Untouched attributes survive the partial update
    assert_eq!(field["type"].as_str().unwrap(), "text");

    // Move first field to the end: [A,B,C] -> [B,C,A]
    let output = fo()
        .args(["field", "move", "0", "2", "--json"])
        .current_dir(tmp.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    let order: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let ids: Vec<&str> = order
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(ids, vec![b.as_str(), c.as_str(), a.as_str()]);

    // Out-of-bounds move fails without changing anything
    fo().args(["field", "move", "0", "9"])
        .current_dir(tmp.path())
        .assert()
        .failure();

    // Delete the middle field
    fo().args(["field", "delete", &c])
        .current_dir(tmp.path())
        .assert()
        .success();

    let output = fo()
        .args(["field", "list", "--json"])
        .current_dir(tmp.path())
        .output()
        .unwrap();
    let list: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(list.as_array().unwrap().len(), 2);

    // Deleting an unknown id fails
    fo().args(["field", "delete", "fld-nope"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

// ---------------------------------------------------------------------------
// Flow 3: Save, load and manage named forms
// ---------------------------------------------------------------------------

#[test]
fn flow3_save_and_load_forms() {
    let tmp = init_project();

    add_field(&tmp, "text", "Name", &[]);
    add_field(&tmp, "date", "Date of Birth", &[]);

    // Save under a name
    let output = fo()
        .args(["form", "save", "Contact", "--json"])
        .current_dir(tmp.path())
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "form save failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let schema: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let form_id = schema["id"].as_str().unwrap().to_string();
    assert!(form_id.starts_with("frm-"));
    assert_eq!(schema["name"].as_str().unwrap(), "Contact");
    assert_eq!(schema["fields"].as_array().unwrap().len(), 2);
    assert!(schema["createdAt"].is_string());

    // The collection lands in .forma/forms.json
    assert!(tmp.path().join(".forma").join("forms.json").is_file());

    // Clear the working form; the saved copy is untouched
    fo().args(["form", "clear"])
        .current_dir(tmp.path())
        .assert()
        .success();

    let output = fo()
        .args(["field", "list", "--json"])
        .current_dir(tmp.path())
        .output()
        .unwrap();
    let list: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(list.as_array().unwrap().len(), 0);

    fo().args(["form", "list"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Contact"));

    // Load it back
    fo().args(["form", "load", &form_id])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Contact"));

    let output = fo()
        .args(["field", "list", "--json"])
        .current_dir(tmp.path())
        .output()
        .unwrap();
    let list: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(list.as_array().unwrap().len(), 2);

    // Delete the saved form
    fo().args(["form", "delete", &form_id])
        .current_dir(tmp.path())
        .assert()
        .success();

    fo().args(["form", "load", &form_id])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn saving_an_empty_form_fails() {
    let tmp = init_project();

    fo().args(["form", "save", "Empty"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no fields"));
}

// ---------------------------------------------------------------------------
// Flow 4: Preview with validation and derivation
// ---------------------------------------------------------------------------

#[test]
fn flow4_preview_validation_and_derivation() {
    let tmp = init_project();

    let name_id = add_field(
        &tmp,
        "text",
        "Name",
        &["--rule", "required=Name is required", "--rule", "minLength:3=At least 3 chars"],
    );
    let dob_id = add_field(&tmp, "date", "Date of Birth", &[]);
    let age_id = add_field(
        &tmp,
        "number",
        "Age",
        &["--derived", "--parent", &dob_id, "--formula", "age from date of birth"],
    );

    // With no values, the required rule fires and the derived field shows
    // its placeholder (no parent value yet).
    let output = fo()
        .args(["preview", "--json"])
        .current_dir(tmp.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        result["errors"][&name_id].as_str().unwrap(),
        "Name is required"
    );
    assert!(result["values"].get(&age_id).is_none());

    fo().args(["preview"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Calculated value"))
        .stdout(predicate::str::contains("Name is required"));

    // Rule order matters: a 2-char name trips minLength, not required.
    let set_name = format!("{}=Al", name_id);
    let output = fo()
        .args(["preview", "--set", &set_name, "--json"])
        .current_dir(tmp.path())
        .output()
        .unwrap();
    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        result["errors"][&name_id].as_str().unwrap(),
        "At least 3 chars"
    );

    // With a birth date set, the derived age is computed.
    let set_name = format!("{}=Ada", name_id);
    let set_dob = format!("{}=2000-01-01", dob_id);
    let output = fo()
        .args(["preview", "--set", &set_name, "--set", &set_dob, "--json"])
        .current_dir(tmp.path())
        .output()
        .unwrap();
    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(result["errors"].as_object().unwrap().is_empty());
    let expected_age = (chrono::Local::now().year() - 2000).to_string();
    assert_eq!(result["values"][&age_id].as_str().unwrap(), expected_age);

    // A garbage date leaves the derived slot empty; the preview shows the
    // placeholder instead of an error.
    let set_dob = format!("{}=not-a-date", dob_id);
    let output = fo()
        .args(["preview", "--set", &set_name, "--set", &set_dob, "--json"])
        .current_dir(tmp.path())
        .output()
        .unwrap();
    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(result["values"].get(&age_id).is_none());

    // Derived values cannot be set by hand.
    let set_age = format!("{}=99", age_id);
    fo().args(["preview", "--set", &set_age])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("derived"));
}

// ---------------------------------------------------------------------------
// Flow 5: Submission
// ---------------------------------------------------------------------------

#[test]
fn flow5_submit_accept_and_reject() {
    let tmp = init_project();

    let name_id = add_field(
        &tmp,
        "text",
        "Name",
        &["--rule", "required=Name is required"],
    );
    let top_id = add_field(
        &tmp,
        "checkbox",
        "Toppings",
        &["--option", "cheese", "--option", "ham"],
    );

    // Missing required value => rejected, exit code 1
    let output = fo()
        .args(["submit", "--json"])
        .current_dir(tmp.path())
        .output()
        .unwrap();
    assert!(!output.status.success(), "submit should fail validation");
    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["submitted"].as_bool().unwrap(), false);
    assert_eq!(
        result["errors"][&name_id].as_str().unwrap(),
        "Name is required"
    );

    // Valid values => accepted; checkbox values split on commas
    let set_name = format!("{}=Ada", name_id);
    let set_top = format!("{}=cheese,ham", top_id);
    let output = fo()
        .args(["submit", "--set", &set_name, "--set", &set_top, "--json"])
        .current_dir(tmp.path())
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "submit failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["submitted"].as_bool().unwrap(), true);
    assert_eq!(result["values"][&name_id].as_str().unwrap(), "Ada");
    let toppings: Vec<&str> = result["values"][&top_id]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(toppings, vec!["cheese", "ham"]);

    // Human-readable success output
    fo().args(["submit", "--set", &set_name])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("submitted successfully"));
}

// ---------------------------------------------------------------------------
// Flow 6: Defaults
// ---------------------------------------------------------------------------

#[test]
fn flow6_defaults_seed_the_preview() {
    let tmp = init_project();

    let city_id = add_field(&tmp, "text", "City", &["--default", "Berlin"]);
    add_field(&tmp, "text", "Street", &[]);

    let output = fo()
        .args(["preview", "--json"])
        .current_dir(tmp.path())
        .output()
        .unwrap();
    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["values"][&city_id].as_str().unwrap(), "Berlin");

    // An explicit --set wins over the default
    let set_city = format!("{}=Paris", city_id);
    let output = fo()
        .args(["preview", "--set", &set_city, "--json"])
        .current_dir(tmp.path())
        .output()
        .unwrap();
    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["values"][&city_id].as_str().unwrap(), "Paris");
}

// ---------------------------------------------------------------------------
// Authoring guards
// ---------------------------------------------------------------------------

#[test]
fn choice_field_without_options_is_rejected() {
    let tmp = init_project();

    fo().args(["field", "add", "select", "Country"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("option"));
}

#[test]
fn derived_field_with_unknown_parent_is_rejected() {
    let tmp = init_project();

    fo().args([
        "field", "add", "number", "Age", "--derived", "--parent", "fld-missing",
    ])
    .current_dir(tmp.path())
    .assert()
    .failure()
    .stderr(predicate::str::contains("parent"));
}

#[test]
fn length_rule_without_length_is_rejected_by_the_parser() {
    let tmp = init_project();

    fo().args([
        "field", "add", "text", "Name", "--rule", "minLength=too short",
    ])
    .current_dir(tmp.path())
    .assert()
    .failure()
    .stderr(predicate::str::contains("length"));
}

// ---------------------------------------------------------------------------
// Environment and errors
// ---------------------------------------------------------------------------

#[test]
fn init_creates_forma_dir() {
    let tmp = TempDir::new().unwrap();
    fo().args(["init", "--quiet"])
        .current_dir(tmp.path())
        .assert()
        .success();
    assert!(tmp.path().join(".forma").is_dir());
}

#[test]
fn commands_fail_without_a_forma_dir() {
    let tmp = TempDir::new().unwrap();
    fo().args(["field", "list"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("fo init"));
}

#[test]
fn explicit_dir_flag_overrides_discovery() {
    let tmp = init_project();
    let elsewhere = TempDir::new().unwrap();

    let forma_dir = tmp.path().join(".forma");
    fo().args(["--dir", forma_dir.to_str().unwrap(), "field", "list"])
        .current_dir(elsewhere.path())
        .assert()
        .success();
}

#[test]
fn json_mode_reports_errors_as_json() {
    let tmp = init_project();

    let output = fo()
        .args(["field", "delete", "fld-nope", "--json"])
        .current_dir(tmp.path())
        .output()
        .unwrap();
    assert!(!output.status.success());
    let err: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert!(err["error"].as_str().unwrap().contains("fld-nope"));
}

#[test]
fn version_command() {
    fo().args(["version"]).assert().success();
}

#[test]
fn draft_survives_across_invocations() {
    let tmp = init_project();

    add_field(&tmp, "text", "Name", &[]);

    // A separate invocation sees the same working form.
    let output = fo()
        .args(["field", "list", "--json"])
        .current_dir(tmp.path())
        .output()
        .unwrap();
    let list: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert!(tmp.path().join(".forma").join("draft.json").is_file());
}
