mod common;
use common::{
    init_db_with_events, leadership_answers, register, setup_test_db, staff, submit_feedback,
};
use outreach::export::pdf::win_ansi;
use predicates::prelude::*;
use predicates::str::contains;
use std::fs;

fn pdf_files(dir: &std::path::Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .filter(|n| n.ends_with(".pdf"))
        .collect();
    names.sort();
    names
}

#[test]
fn test_certificates_one_file_per_participant() {
    let db_path = setup_test_db("cert_per_participant");
    let (completed, _, _) = init_db_with_events(&db_path);
    register(&db_path, &completed, "José Núñez", "jose@example.org");
    register(&db_path, &completed, "Ada Lovelace", "ada@example.org");
    // same name, different person
    register(&db_path, &completed, "Ada Lovelace", "ada.l@example.org");

    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().to_string_lossy().to_string();

    staff(&db_path)
        .args(["certificate", "--event", &completed, "--out-dir", &out_dir])
        .assert()
        .success()
        .stdout(contains("Certificates generated for 3 participant(s)"));

    assert_eq!(
        pdf_files(dir.path()),
        vec![
            "certificate-ada-lovelace-2.pdf",
            "certificate-ada-lovelace.pdf",
            "certificate-jos-n-ez.pdf",
        ]
    );

    let bytes = fs::read(dir.path().join("certificate-ada-lovelace.pdf")).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_certificates_refused_before_event_completes() {
    let db_path = setup_test_db("cert_not_completed");
    let (_, ongoing, upcoming) = init_db_with_events(&db_path);
    register(&db_path, &upcoming, "Ada Lovelace", "ada@example.org");
    register(&db_path, &ongoing, "Ada Lovelace", "ada@example.org");

    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().to_string_lossy().to_string();

    staff(&db_path)
        .args(["certificate", "--event", &upcoming, "--out-dir", &out_dir])
        .assert()
        .failure()
        .stderr(contains("is upcoming"))
        .stderr(contains("--force"));

    staff(&db_path)
        .args(["certificate", "--event", &ongoing, "--out-dir", &out_dir])
        .assert()
        .failure()
        .stderr(contains("is ongoing"));

    assert!(pdf_files(dir.path()).is_empty());

    staff(&db_path)
        .args(["certificate", "--event", &ongoing, "--out-dir", &out_dir, "--force"])
        .assert()
        .success();

    assert_eq!(pdf_files(dir.path()), vec!["certificate-ada-lovelace.pdf"]);
}

#[test]
fn test_certificates_combined_pdf() {
    let db_path = setup_test_db("cert_combined");
    let (completed, _, _) = init_db_with_events(&db_path);
    register(&db_path, &completed, "Ada Lovelace", "ada@example.org");
    register(&db_path, &completed, "Alan Turing", "alan@example.org");

    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().to_string_lossy().to_string();

    staff(&db_path)
        .args(["certificate", "--event", &completed, "--out-dir", &out_dir, "--combined"])
        .assert()
        .success();

    assert_eq!(
        pdf_files(dir.path()),
        vec!["certificates-leaders-of-tomorrow.pdf"]
    );

    let bytes = fs::read(dir.path().join("certificates-leaders-of-tomorrow.pdf")).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
    let text = String::from_utf8_lossy(&bytes);
    assert!(text.contains("/Count 2"));
}

#[test]
fn test_certificates_feedback_only_and_send() {
    let db_path = setup_test_db("cert_feedback_only");
    let (completed, _, _) = init_db_with_events(&db_path);
    register(&db_path, &completed, "Ada Lovelace", "ada@example.org");
    register(&db_path, &completed, "Alan Turing", "alan@example.org");
    submit_feedback(
        &db_path,
        &completed,
        "Ada Lovelace",
        "ADA@example.org",
        leadership_answers(),
    );

    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().to_string_lossy().to_string();

    staff(&db_path)
        .args([
            "certificate",
            "--event",
            &completed,
            "--out-dir",
            &out_dir,
            "--feedback-only",
            "--send",
        ])
        .assert()
        .success()
        .stdout(contains("Certificates generated for 1 participant(s)"))
        .stdout(contains("Mailed: 1"));

    assert_eq!(pdf_files(dir.path()), vec!["certificate-ada-lovelace.pdf"]);

    staff(&db_path)
        .args(["outbox", "--print"])
        .assert()
        .success()
        .stdout(contains("Your certificate: Leaders of Tomorrow"))
        .stdout(contains("Attachments: certificate-ada-lovelace.pdf"))
        .stdout(contains("Your certificate: Leaders of Tomorrow").count(1));
}

#[test]
fn test_certificates_without_participants() {
    let db_path = setup_test_db("cert_empty");
    let (completed, _, _) = init_db_with_events(&db_path);

    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().to_string_lossy().to_string();

    staff(&db_path)
        .args(["certificate", "--event", &completed, "--out-dir", &out_dir])
        .assert()
        .success()
        .stdout(contains("No participants"));

    staff(&db_path)
        .args(["certificate", "--event", &completed, "--out-dir", "certs"])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));
}

#[test]
fn test_certificate_text_uses_win_ansi_glyphs() {
    assert_eq!(win_ansi("Zo\u{eb}"), vec![b'Z', b'o', 0xEB]);
    assert_eq!(
        win_ansi("\u{2018}A\u{2019} \u{201C}B\u{201D} \u{2013} \u{20AC}5"),
        vec![0x91, b'A', 0x92, b' ', 0x93, b'B', 0x94, b' ', 0x96, b' ', 0x80, b'5']
    );
    assert_eq!(win_ansi("\u{2026}\u{2122}\u{0152}"), vec![0x85, 0x99, 0x8C]);
    // C1 controls and characters outside WinAnsi have no glyph
    assert_eq!(win_ansi("\u{0085}\u{4E2D}"), vec![b'?', b'?']);
}
