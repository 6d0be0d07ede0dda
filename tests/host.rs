use std::{
    cell::RefCell,
    env, fs,
    io::{self, Write},
    path::Path,
    rc::Rc,
};

use nixi::{
    ast::StyleProperty,
    error::{Error, RuntimeError},
    evaluate_source, get_result,
    interpreter::{evaluator::core::Context, value::core::Value},
    presenter::Presenter,
};

/// A writer whose contents stay readable after it is handed to a context.
#[derive(Clone, Default)]
struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

/// Records every call instead of rendering.
#[derive(Clone, Default)]
struct RecordingPresenter(Rc<RefCell<Vec<String>>>);

impl Presenter for RecordingPresenter {
    fn generate_html(&mut self, value: &Value, title: &str) -> String {
        self.0.borrow_mut().push(format!("generate {title}: {value}"));
        format!("[{title}]")
    }

    fn save_to_file(&mut self, text: &str, path: &Path) -> io::Result<()> {
        self.0.borrow_mut().push(format!("save {text} to {}", path.display()));
        Ok(())
    }

    fn add_style(&mut self, selector: &str, properties: &[StyleProperty]) {
        self.0.borrow_mut().push(format!("style {selector} ({})", properties.len()));
    }

    fn add_css(&mut self, rule: &str) {
        self.0.borrow_mut().push(format!("css {}", rule.lines().next().unwrap_or_default()));
    }
}

fn quoted(path: &Path) -> String {
    format!("{:?}", path.display().to_string())
}

#[test]
fn echo_writes_native_forms_separated_by_spaces() {
    let output = SharedBuffer::default();
    let mut context = Context::new().with_output(Box::new(output.clone()));

    let value = get_result(&mut context, r#"echo("total:", 5, [1, 2], null)"#, "<test>").unwrap();
    get_result(&mut context, "echo()", "<test>").unwrap();

    assert_eq!(value, Value::Null);
    assert_eq!(output.contents(), "total: 5 1,2 null\n\n");
}

#[test]
fn presenter_calls_arrive_in_program_order() {
    let presenter = RecordingPresenter::default();
    let mut context = Context::with_presenter(Box::new(presenter.clone()));

    let source = r#"style ".a" { top: "0"; left: "0"; }
body{ margin: 0 }
addStyle(".b", { color: "red" })
page = renderHTML(p { text: "hi" }, "Home")
saveHTML("<b>x</b>", "out.html", "Saved")
page"#;
    let value = get_result(&mut context, source, "<test>").unwrap();

    assert_eq!(value, Value::from("[Home]"));
    assert_eq!(*presenter.0.borrow(),
               vec!["style .a (2)".to_string(),
                    "css body {".to_string(),
                    "style .b (1)".to_string(),
                    r#"generate Home: { type = "p", props = { text = "hi" } }"#.to_string(),
                    r#"generate Saved: "<b>x</b>""#.to_string(),
                    "save [Saved] to out.html".to_string()]);
}

#[test]
fn save_html_writes_the_document() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("page.html");

    let source = format!(r#"style ".card" {{ color: "red"; }}
saveHTML(div {{ text: "Hello" }}, {}, "Saved page")"#,
                         quoted(&target));
    assert_eq!(evaluate_source(&source, "<test>").unwrap(), Value::Null);

    let page = fs::read_to_string(&target).unwrap();
    assert!(page.contains("<title>Saved page</title>"));
    assert!(page.contains(".card {\n  color: red;\n}"));
    assert!(page.contains("<div>Hello</div>"));
}

#[test]
fn save_html_reports_io_errors() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("missing").join("page.html");

    let source = format!(r#"saveHTML("<p></p>", {}, "x")"#, quoted(&target));
    match evaluate_source(&source, "<test>").unwrap_err().error {
        Error::Runtime(RuntimeError::Io { details, line }) => {
            assert!(details.starts_with("saveHTML failed: "));
            assert_eq!(line, 1);
        },
        other => panic!("expected an I/O error, got {other}"),
    }
}

#[test]
fn ls_lists_sorted_entry_names() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("b.nixi"), "1").unwrap();
    fs::write(dir.path().join("a.nixi"), "2").unwrap();
    fs::create_dir(dir.path().join("c")).unwrap();

    let value = evaluate_source(&format!("ls({})", quoted(dir.path())), "<test>").unwrap();
    assert_eq!(value.to_string(), r#"["a.nixi", "b.nixi", "c"]"#);

    assert!(matches!(evaluate_source("ls 5", "<test>").unwrap_err().error,
                     Error::Runtime(RuntimeError::TypeError { .. })));
    assert!(matches!(evaluate_source(&format!("ls({})", quoted(&dir.path().join("nope"))), "<test>").unwrap_err()
                                                                                               .error,
                     Error::Runtime(RuntimeError::Io { .. })));
}

#[test]
fn cd_changes_the_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    let original = env::current_dir().unwrap();

    let mut context = Context::new();
    let result = get_result(&mut context, &format!("cd({})\npwd()", quoted(dir.path())), "<test>");
    env::set_current_dir(&original).unwrap();

    let Value::Str(printed) = result.unwrap() else {
        panic!("pwd should return a string");
    };
    assert_eq!(fs::canonicalize(printed).unwrap(),
               fs::canonicalize(dir.path()).unwrap());

    assert!(matches!(get_result(&mut context, r#"cd("/definitely/not/here")"#, "<test>").unwrap_err()
                                                                                  .error,
                     Error::Runtime(RuntimeError::Io { .. })));
}
