//! Integration tests for the markdownify CLI.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_markdownify"))
}

#[test]
fn test_basic_stdin() {
    cli()
        .write_stdin("<h1>Title</h1><p>Content</p>")
        .assert()
        .success()
        .stdout("Title\n=====\nContent\n");
}

#[test]
fn test_file_input() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = temp_dir.path().join("input.html");
    fs::write(&input_path, "<p>Test content</p>").unwrap();

    cli()
        .arg(input_path.to_str().unwrap())
        .assert()
        .success()
        .stdout("Test content\n");
}

#[test]
fn test_file_output() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("output.md");

    cli()
        .arg("-o")
        .arg(output_path.to_str().unwrap())
        .write_stdin("<p>Output test</p>")
        .assert()
        .success()
        .stdout("");

    let output = fs::read_to_string(&output_path).unwrap();
    assert_eq!(output, "Output test\n");
}

#[test]
fn test_dash_reads_stdin() {
    cli()
        .arg("-")
        .write_stdin("<p>Dash test</p>")
        .assert()
        .success()
        .stdout("Dash test\n");
}

#[test]
fn test_multiple_inputs_concatenate() {
    let temp_dir = TempDir::new().unwrap();
    let first = temp_dir.path().join("a.html");
    let second = temp_dir.path().join("b.html");
    fs::write(&first, "<p>one</p>").unwrap();
    fs::write(&second, "<p>two</p>").unwrap();

    cli()
        .arg(&first)
        .arg(&second)
        .assert()
        .success()
        .stdout("one\ntwo\n");
}

#[test]
fn test_output_dir() {
    let temp_dir = TempDir::new().unwrap();
    let first = temp_dir.path().join("chat.page.html");
    let second = temp_dir.path().join("notes.html");
    fs::write(&first, "<ul><li>x</li></ul>").unwrap();
    fs::write(&second, "<h3>Notes</h3>").unwrap();
    let out_dir = temp_dir.path().join("out");

    cli()
        .arg("--output-dir")
        .arg(&out_dir)
        .arg(&first)
        .arg(&second)
        .assert()
        .success();

    assert_eq!(fs::read_to_string(out_dir.join("chat.page.md")).unwrap(), "* x\n");
    assert_eq!(fs::read_to_string(out_dir.join("notes.md")).unwrap(), "### Notes\n");
}

#[test]
fn test_output_dir_rejects_stdin() {
    let temp_dir = TempDir::new().unwrap();

    cli()
        .arg("--output-dir")
        .arg(temp_dir.path())
        .write_stdin("<p>x</p>")
        .assert()
        .failure()
        .stderr(predicate::str::contains("needs file inputs"));
}

#[test]
fn test_output_conflicts_with_output_dir() {
    cli()
        .arg("-o")
        .arg("a.md")
        .arg("--output-dir")
        .arg("out")
        .write_stdin("<p>x</p>")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_output_rejects_multiple_inputs() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = temp_dir.path().join("a.html");
    fs::write(&input_path, "<p>a</p>").unwrap();

    cli()
        .arg("-o")
        .arg(temp_dir.path().join("out.md"))
        .arg(&input_path)
        .arg(&input_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("single input"));
}

#[test]
fn test_fast_parser() {
    cli()
        .arg("--parser")
        .arg("fast")
        .write_stdin("<table><tr><th>A</th></tr><tr><td>1</td></tr></table>")
        .assert()
        .success()
        .stdout("\n\n| A |\n| --- |\n| 1 |\n\n");
}

#[test]
fn test_invalid_parser() {
    cli()
        .arg("--parser")
        .arg("regex")
        .write_stdin("<p>x</p>")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_preserve_whitespace() {
    cli()
        .arg("--preserve-whitespace")
        .write_stdin("<p>a    b</p>")
        .assert()
        .success()
        .stdout("a    b\n");

    cli().write_stdin("<p>a    b</p>").assert().success().stdout("a b\n");
}

#[test]
fn test_code_cleanup_default_and_disabled() {
    let html = "<pre>pythonCopy code\nprint(1)</pre>";

    cli()
        .write_stdin(html)
        .assert()
        .success()
        .stdout("\n```python\nprint(1)\n```\n");

    cli()
        .arg("--no-code-cleanup")
        .write_stdin(html)
        .assert()
        .success()
        .stdout("\n```\npythonCopy code\nprint(1)\n```\n");
}

#[test]
fn test_transcript() {
    cli()
        .arg("--transcript")
        .write_stdin(r#"<pre><div><span>rust</span><button>Copy code</button></div><code>let  x = 1;</code></pre>"#)
        .assert()
        .success()
        .stdout("\n```rust\nlet  x = 1;\n```\n");
}

#[test]
fn test_preclean_code() {
    cli()
        .arg("--preclean-code")
        .arg("--no-code-cleanup")
        .write_stdin(r#"<pre><span>bash</span><button>Copy code</button>ls</pre>"#)
        .assert()
        .success()
        .stdout("\n```bash\nls\n```\n");
}

#[test]
fn test_max_depth() {
    cli()
        .arg("--max-depth")
        .arg("2")
        .write_stdin("<div><div><div><p>deep</p></div></div></div>")
        .assert()
        .success()
        .stdout("");
}

#[test]
fn test_max_depth_validation() {
    cli()
        .arg("--max-depth")
        .arg("0")
        .write_stdin("<p>Test</p>")
        .assert()
        .failure()
        .stderr(predicate::str::contains("between 1 and 4096"));

    cli()
        .arg("--max-depth")
        .arg("4097")
        .write_stdin("<p>Test</p>")
        .assert()
        .failure();
}

#[test]
fn test_debug_flag() {
    cli().arg("--debug").write_stdin("<p>Test</p>").assert().success();
}

#[test]
fn test_encoding_utf8() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = temp_dir.path().join("test.html");
    fs::write(&input_path, "<p>Test UTF-8: 你好</p>").unwrap();

    cli()
        .arg("--encoding")
        .arg("utf-8")
        .arg(input_path.to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains("你好"));
}

#[test]
fn test_encoding_latin1() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = temp_dir.path().join("latin1.html");
    fs::write(&input_path, b"<p>caf\xe9</p>").unwrap();

    cli()
        .arg("--encoding")
        .arg("latin1")
        .arg(&input_path)
        .assert()
        .success()
        .stdout("café\n");
}

#[test]
fn test_encoding_invalid() {
    cli()
        .arg("--encoding")
        .arg("invalid-encoding")
        .write_stdin("<p>Test</p>")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown encoding"));
}

#[test]
fn test_nonexistent_file() {
    cli()
        .arg("/nonexistent/file.html")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error reading file"));
}

#[test]
fn test_invalid_html() {
    cli().write_stdin("<p>Unclosed paragraph<p>Another").assert().success();
}

#[test]
fn test_empty_input() {
    cli().write_stdin("").assert().success().stdout("");
}

#[test]
fn test_complex_document() {
    let html = r#"
        <html>
            <head><title>Test Document</title></head>
            <body>
                <h1>Main Title</h1>
                <p>Introduction with <strong>bold</strong> and <em>italic</em>.</p>
                <ul>
                    <li>Item 1</li>
                    <li>Item 2
                        <ul>
                            <li>Nested item</li>
                        </ul>
                    </li>
                </ul>
                <pre class="rust"><code>fn main() {
    println!("Hello");
}</code></pre>
                <p>Link: <a href="https://example.com">Example</a></p>
            </body>
        </html>
    "#;

    cli()
        .write_stdin(html)
        .assert()
        .success()
        .stdout(predicate::str::contains("Main Title\n=========="))
        .stdout(predicate::str::contains("Introduction with **bold** and *italic*."))
        .stdout(predicate::str::contains("* Item 1\n* Item 2\n\t+ Nested item\n"))
        .stdout(predicate::str::contains("```rust\nfn main() {\n    println!(\"Hello\");\n}\n```"))
        .stdout(predicate::str::contains("Link: [Example](https://example.com)"));
}

#[test]
fn test_version_flag() {
    cli()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_flag() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Options:"));
}

#[test]
fn test_generate_completion_bash() {
    cli()
        .arg("--generate-completion")
        .arg("bash")
        .assert()
        .success()
        .stdout(predicate::str::contains("_markdownify()"));
}

#[test]
fn test_generate_completion_zsh() {
    cli()
        .arg("--generate-completion")
        .arg("zsh")
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_generate_man() {
    cli()
        .arg("--generate-man")
        .assert()
        .success()
        .stdout(predicate::str::contains(".TH"))
        .stdout(predicate::str::contains("markdownify"));
}
