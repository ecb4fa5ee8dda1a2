use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const REFERENCE_EVIDENCE: &str = r#"{
  "files": [
    {"name": ".eslintrc", "type": "file"},
    {"name": "lib", "type": "file"},
    {"name": "tests", "type": "file"},
    {"name": ".travis.yml", "type": "file"},
    {"name": "a.test.js", "type": "file"}
  ],
  "commits": [
    {"message": "feat: first feature", "date": "2020-01-01T00:00:00Z"}
  ],
  "readme": "Install it with the package manager.",
  "dependencyManifest": "",
  "repoMeta": {"fullName": "octo/reference", "description": null, "language": "JavaScript", "license": "MIT"}
}"#;

const LYING_REPLY: &str = r#"{
  "overallScore": 99,
  "agentScores": {"codeQuality": 99, "documentation": 99, "commitHealth": 99, "testCoverage": 99, "techStack": 99},
  "summary": "A compact project with good hygiene.",
  "strengths": ["Linting", "Tests", "CI"],
  "weaknesses": ["No manifest", "Old commits", "Thin README"],
  "roadmap": [
    {"title": "Add package.json", "description": "Declare dependencies.", "difficulty": "Beginner", "category": "Code Quality"},
    {"title": "Write usage docs", "description": "Show an example.", "difficulty": "Beginner", "category": "Documentation"},
    {"title": "Commit regularly", "description": "Keep history fresh.", "difficulty": "Beginner", "category": "DevOps"},
    {"title": "Add lock file", "description": "Pin versions.", "difficulty": "Intermediate", "category": "Code Quality"},
    {"title": "Publish", "description": "Release a version.", "difficulty": "Advanced", "category": "Features"}
  ]
}"#;

struct Workspace {
    home: TempDir,
    files: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            home: TempDir::new().expect("home temp dir should be created"),
            files: TempDir::new().expect("files temp dir should be created"),
        }
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.files.path().join(name);
        fs::write(&path, content).expect("fixture should write");
        path
    }

    fn data_dir(&self) -> PathBuf {
        self.home.path().join("data")
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("reposcore").expect("binary should compile");
        cmd.env("HOME", self.home.path())
            .env("REPOSCORE_DATA_DIR", self.data_dir())
            .env_remove("RUST_LOG")
            .current_dir(self.files.path());
        cmd
    }

    fn analyze(&self, evidence: &Path, reply: &Path) -> Command {
        let mut cmd = self.cmd();
        cmd.arg("analyze")
            .arg("--evidence")
            .arg(evidence)
            .args(["--format", "json", "--generator", "cat", "--generator-arg"])
            .arg(reply);
        cmd
    }
}

fn history_id(stderr: &[u8]) -> String {
    String::from_utf8_lossy(stderr)
        .lines()
        .find_map(|line| line.strip_prefix("history id: "))
        .map(|id| id.trim().to_string())
        .expect("analyze should print a history id")
}

#[test]
fn score_snapshot_reproduces_reference_formula() {
    let ws = Workspace::new();
    let evidence = ws.write("evidence.json", REFERENCE_EVIDENCE);

    ws.cmd()
        .arg("score")
        .arg("--evidence")
        .arg(&evidence)
        .args(["--format", "json"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("\"codeQuality\": 80"))
        .stdout(predicate::str::contains("\"documentation\": 60"))
        .stdout(predicate::str::contains("\"commitHealth\": 40"))
        .stdout(predicate::str::contains("\"testCoverage\": 100"))
        .stdout(predicate::str::contains("\"techStack\": 20"))
        .stdout(predicate::str::contains("\"overallScore\": 64"));
}

#[test]
fn payload_uses_custom_role_fallback() {
    let ws = Workspace::new();
    let evidence = ws.write("evidence.json", REFERENCE_EVIDENCE);

    ws.cmd()
        .arg("payload")
        .arg("--evidence")
        .arg(&evidence)
        .args(["--style", "informativeness", "--role", "Product Owner"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("\"overallScore\": 64"))
        .stdout(predicate::str::contains("\"style\": \"Informativeness\""))
        .stdout(predicate::str::contains(
            "Focus on values important to a Product Owner",
        ))
        .stdout(predicate::str::contains("\"responseSchema\""));
}

#[test]
fn analyze_overwrites_generator_scores() {
    let ws = Workspace::new();
    let evidence = ws.write("evidence.json", REFERENCE_EVIDENCE);
    let reply = ws.write("reply.json", LYING_REPLY);

    ws.analyze(&evidence, &reply)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("\"overallScore\": 64"))
        .stdout(predicate::str::contains("\"codeQuality\": 80"))
        .stdout(predicate::str::contains("\"overallScore\": 99").not())
        .stdout(predicate::str::contains("A compact project with good hygiene."));
}

#[test]
fn analyze_without_generator_fails() {
    let ws = Workspace::new();
    let evidence = ws.write("evidence.json", REFERENCE_EVIDENCE);

    ws.cmd()
        .arg("analyze")
        .arg("--evidence")
        .arg(&evidence)
        .arg("--no-cache")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("no narrative generator configured"));
}

#[test]
fn analyze_fails_on_empty_generator_reply() {
    let ws = Workspace::new();
    let evidence = ws.write("evidence.json", REFERENCE_EVIDENCE);

    ws.cmd()
        .arg("analyze")
        .arg("--evidence")
        .arg(&evidence)
        .args(["--generator", "true"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("empty response"));
    assert!(!ws.data_dir().join("history.json").exists());
}

#[test]
fn analyze_fails_on_unparseable_reply() {
    let ws = Workspace::new();
    let evidence = ws.write("evidence.json", REFERENCE_EVIDENCE);
    let reply = ws.write("reply.txt", "Looks good to me!");

    ws.analyze(&evidence, &reply)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("failed to parse narrative response"));
}

#[test]
fn second_analysis_is_served_from_cache() {
    let ws = Workspace::new();
    let evidence = ws.write("evidence.json", REFERENCE_EVIDENCE);
    let reply = ws.write("reply.json", LYING_REPLY);

    ws.analyze(&evidence, &reply).assert().code(0);

    ws.cmd()
        .arg("analyze")
        .arg("--evidence")
        .arg(&evidence)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("A compact project with good hygiene."));
}

#[test]
fn history_lists_deletes_and_clears() {
    let ws = Workspace::new();
    let evidence = ws.write("evidence.json", REFERENCE_EVIDENCE);
    let reply = ws.write("reply.json", LYING_REPLY);

    let output = ws.analyze(&evidence, &reply).assert().code(0);
    let id = history_id(&output.get_output().stderr);

    ws.cmd()
        .args(["history", "list"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains(id.as_str()))
        .stdout(predicate::str::contains("octo/reference"));

    ws.cmd()
        .args(["history", "delete", id.as_str()])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("deleted"));

    ws.cmd()
        .args(["history", "delete", id.as_str()])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("history entry not found"));

    ws.cmd()
        .args(["history", "clear"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("history cleared"));

    ws.cmd()
        .args(["history", "list"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("history: no entries"));
}

#[test]
fn chat_continues_a_stored_conversation() {
    let ws = Workspace::new();
    let evidence = ws.write("evidence.json", REFERENCE_EVIDENCE);
    let reply = ws.write("reply.json", LYING_REPLY);
    let chat_reply = ws.write("chat.txt", "Your test coverage score is 100.\n");

    let output = ws.analyze(&evidence, &reply).assert().code(0);
    let id = history_id(&output.get_output().stderr);

    for _ in 0..2 {
        ws.cmd()
            .args(["chat", id.as_str(), "--message", "How are my tests?"])
            .args(["--generator", "cat", "--generator-arg"])
            .arg(&chat_reply)
            .assert()
            .code(0)
            .stdout(predicate::str::contains("Your test coverage score is 100."));
    }

    let stored = fs::read_to_string(
        ws.data_dir()
            .join("conversations")
            .join(format!("{id}.json")),
    )
    .expect("conversation should be stored");
    let conversation: serde_json::Value =
        serde_json::from_str(&stored).expect("conversation should be json");
    let turns = conversation["history"]
        .as_array()
        .expect("history should be an array");
    assert_eq!(turns.len(), 5);
    assert_eq!(turns[0]["speaker"], "model");
    assert_eq!(turns[1]["speaker"], "user");
}

#[test]
fn chat_rejects_unknown_history_id() {
    let ws = Workspace::new();

    ws.cmd()
        .args(["chat", "nope", "--message", "hi", "--generator", "cat"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("history entry not found"));
}
