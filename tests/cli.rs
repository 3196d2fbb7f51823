use assert_cmd::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use std::fs;
use tempfile::tempdir;

fn document(minted: Value, blocks: Value) -> String {
    json!({
        "pandoc-api-version": [1, 23, 1],
        "meta": {"minted": {"t": "MetaMap", "c": minted}},
        "blocks": blocks
    })
    .to_string()
}

fn simple_doc() -> String {
    document(
        json!({}),
        json!([
            {"t": "Header", "c": [2, ["slide", [], []], [{"t": "Str", "c": "Slide"}]]},
            {"t": "CodeBlock", "c": [["", ["cpp"], []], "int x;"]},
            {"t": "Para", "c": [{"t": "Code", "c": [["", ["cpp"], []], "x|y"]}]}
        ]),
    )
}

fn parse_stdout(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).expect("stdout is a pandoc JSON document")
}

#[test]
fn latex_is_the_default_format() {
    let mut cmd = cargo_bin_cmd!("pandoc-minted");
    cmd.write_stdin(simple_doc());

    // JSON escapes the backslashes.
    cmd.assert().success().stdout(
        predicate::str::contains("\\\\begin{minted}[autogobble]{cpp}")
            .and(predicate::str::contains("\\\\mintinline[]{cpp}!x|y!"))
            .and(predicate::str::contains("fragile").not()),
    );
}

#[test]
fn beamer_marks_frames_fragile() {
    let mut cmd = cargo_bin_cmd!("pandoc-minted");
    cmd.arg("beamer").write_stdin(simple_doc());

    let out = cmd.assert().success().get_output().stdout.clone();
    let doc = parse_stdout(&out);
    assert_eq!(doc["blocks"][0]["c"][1], json!(["slide", ["fragile"], []]));
}

#[test]
fn html_strips_minted_attributes() {
    let input = document(
        json!({}),
        json!([{"t": "CodeBlock", "c": [["", ["cpp", "linenos"], [["style", "tango"]]], "int x;"]}]),
    );
    let mut cmd = cargo_bin_cmd!("pandoc-minted");
    cmd.arg("html5").write_stdin(input);

    let out = cmd.assert().success().get_output().stdout.clone();
    let doc = parse_stdout(&out);
    assert_eq!(
        doc["blocks"][0],
        json!({"t": "CodeBlock", "c": [["", ["cpp"], []], "int x;"]})
    );
}

#[test]
fn bypassed_code_keeps_language_with_no_highlight() {
    let input = document(
        json!({"no_mintinline": {"t": "MetaBool", "c": true}}),
        json!([{"t": "Para", "c": [{"t": "Code", "c": [["", ["cpp", "linenos"], []], "x"]}]}]),
    );
    let want = json!({"t": "Code", "c": [["", ["cpp"], []], "x"]});

    let mut cmd = cargo_bin_cmd!("pandoc-minted");
    cmd.args(["latex", "--no-highlight"]).write_stdin(input.clone());
    let out = cmd.assert().success().get_output().stdout.clone();
    assert_eq!(parse_stdout(&out)["blocks"][0]["c"][0], want);

    let mut cmd = cargo_bin_cmd!("pandoc-minted");
    cmd.arg("latex")
        .env("PANDOC_MINTED_NO_HIGHLIGHT", "true")
        .write_stdin(input);
    let out = cmd.assert().success().get_output().stdout.clone();
    assert_eq!(parse_stdout(&out)["blocks"][0]["c"][0], want);
}

#[test]
fn config_file_supplies_defaults_under_document_metadata() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("minted.yaml");
    fs::write(
        &config,
        "minted:\n  block_attributes:\n    - linenos\n  default_block_language: haskell\n  no_default_autogobble: true\n",
    )
    .unwrap();

    let input = document(
        json!({"default_block_language": {"t": "MetaInlines", "c": [{"t": "Str", "c": "rust"}]}}),
        json!([{"t": "CodeBlock", "c": [["", [], []], "fn main() {}"]}]),
    );

    let mut cmd = cargo_bin_cmd!("pandoc-minted");
    cmd.arg("latex").arg("--config").arg(&config).write_stdin(input);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\\\\begin{minted}[linenos]{rust}"));
}

#[test]
fn config_file_accepts_markdown_front_matter() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("defaults.md");
    fs::write(
        &config,
        "---\nminted:\n  inline_attributes: [showspaces]\n---\n# ignored body\n",
    )
    .unwrap();

    let input = document(
        json!({}),
        json!([{"t": "Para", "c": [{"t": "Code", "c": [["", ["c"], []], "a b"]}]}]),
    );

    let mut cmd = cargo_bin_cmd!("pandoc-minted");
    cmd.arg("--config").arg(&config).write_stdin(input);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\\\\mintinline[showspaces]{c}|a b|"));
}

#[test]
fn broken_config_file_fails() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("broken.yaml");
    fs::write(&config, "minted: [unclosed\n").unwrap();

    let mut cmd = cargo_bin_cmd!("pandoc-minted");
    cmd.arg("--config").arg(&config).write_stdin(simple_doc());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("broken.yaml"));
}

#[test]
fn input_and_output_files() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.json");
    let output = dir.path().join("out.json");
    fs::write(&input, simple_doc()).unwrap();

    let mut cmd = cargo_bin_cmd!("pandoc-minted");
    cmd.arg("latex").arg("-i").arg(&input).arg("-o").arg(&output);
    cmd.assert().success().stdout(predicate::str::is_empty());

    let written = fs::read(&output).unwrap();
    let doc = parse_stdout(&written);
    assert_eq!(doc["blocks"][1]["t"], json!("RawBlock"));
    assert_eq!(
        doc["blocks"][1]["c"][1],
        json!("\\begin{minted}[autogobble]{cpp}\nint x;\n\\end{minted}")
    );
}

#[test]
fn invalid_json_fails_without_output() {
    let mut cmd = cargo_bin_cmd!("pandoc-minted");
    cmd.arg("latex").write_stdin("{\"blocks\": ");

    cmd.assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("invalid pandoc JSON"));
}

#[test]
fn out_of_range_slide_level_is_rejected() {
    let mut cmd = cargo_bin_cmd!("pandoc-minted");
    cmd.args(["beamer", "--slide-level", "9"]).write_stdin(simple_doc());

    cmd.assert().failure();
}
