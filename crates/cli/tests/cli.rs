use assert_cmd::Command;

#[test]
fn openapi_lists_book_routes() {
    let output = Command::cargo_bin("shelf")
        .unwrap()
        .env("SHELF_ENV", "local")
        .arg("openapi")
        .output()
        .unwrap();

    assert!(output.status.success());
    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(doc["paths"]["/api/books"].is_object());
    assert!(doc["paths"]["/api/books/{id}/lend"]["post"].is_object());
    assert!(doc["components"]["schemas"]["DetailedRating"].is_object());
}

#[test]
fn unknown_environment_fails() {
    Command::cargo_bin("shelf")
        .unwrap()
        .env("SHELF_ENV", "moon")
        .arg("openapi")
        .assert()
        .failure();
}

#[test]
fn subcommand_is_required() {
    Command::cargo_bin("shelf").unwrap().assert().failure();
}
