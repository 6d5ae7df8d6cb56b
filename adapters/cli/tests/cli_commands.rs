use std::io::Write;
use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fight-cave-waves"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to launch fight-cave-waves")
}

fn stdout(output: &Output) -> String {
    assert!(output.status.success(), "command failed: {output:?}");
    String::from_utf8(output.stdout.clone()).expect("utf8 stdout")
}

#[test]
fn list_prints_the_whole_fight_cave_table() {
    let text = stdout(&run(&["list", "--encounter", "fight-caves"]));
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 63);
    assert_eq!(lines[0], "Wave 1: 1x Tz-Kih");
    assert_eq!(lines[4], "Wave 5: 2x Tz-Kih, 1x Tz-Kek");
}

#[test]
fn show_omits_the_next_section_on_the_final_wave() {
    let text = stdout(&run(&["show", "-e", "inferno", "-w", "69"]));
    assert_eq!(text, "Wave 69\n  1x TzKal-Zuk\n");
}

#[test]
fn show_rejects_waves_past_the_end() {
    let output = run(&["show", "-e", "inferno", "-w", "70"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("has no wave 70"), "stderr: {stderr}");
}

#[test]
fn track_replays_a_chat_log() {
    let mut log = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(log, "Welcome to the Fight Cave.\n<col=ef1020>Wave: 1</col>").expect("write log");
    let path = log.path().to_str().expect("utf8 path");

    let text = stdout(&run(&[
        "track", "--region", "9551", "--input", path, "--mode", "current",
    ]));
    assert_eq!(text, "Wave 1\n  1x Tz-Kih\n");
}
