use reportkit::content_tree::{Alignment, DocumentBuilder, ListStyle, Node, TextRun};
use reportkit::renderer::{DocumentRenderer, RenderError};
use reportkit::{inspect, BuildError, DocxRenderer, SealedDocument};

/// Title, centered italic subject line and three bullets
fn scenario_document() -> SealedDocument {
    let mut builder = DocumentBuilder::new();
    builder.add_heading("Title", 0, Alignment::Left).unwrap();
    let subject = builder.add_paragraph(Alignment::Center).unwrap();
    builder
        .add_run(subject, TextRun::new("Subject").italic())
        .unwrap();
    for text in ["A", "B", "C"] {
        builder.add_list_item(text, ListStyle::Bullet).unwrap();
    }
    builder.seal().unwrap()
}

#[test]
fn test_scenario_reads_back_five_nodes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scenario.docx");

    DocxRenderer::new()
        .render(&scenario_document(), &path)
        .unwrap();
    let nodes = inspect(&path).unwrap();

    assert_eq!(nodes.len(), 5);
    assert_eq!(
        nodes[0],
        Node::Heading {
            level: 0,
            runs: vec![TextRun::new("Title")],
            alignment: Alignment::Left,
        }
    );
    assert_eq!(
        nodes[1],
        Node::Paragraph {
            runs: vec![TextRun::new("Subject").italic()],
            list_style: None,
            alignment: Alignment::Center,
        }
    );
    let bullets: Vec<String> = nodes[2..].iter().map(Node::plain_text).collect();
    assert_eq!(bullets, ["A", "B", "C"]);
    assert!(nodes[2..]
        .iter()
        .all(|n| n.list_style() == Some(ListStyle::Bullet)));
}

#[test]
fn test_order_preserved_for_nodes_and_runs() {
    let mut builder = DocumentBuilder::new();
    builder.add_heading("Deep first", 3, Alignment::Left).unwrap();
    builder.add_heading("Then shallow", 1, Alignment::Right).unwrap();
    let para = builder.add_paragraph(Alignment::Left).unwrap();
    builder
        .add_run(para, TextRun::new("Conflict: ").bold())
        .unwrap();
    builder
        .add_run(para, TextRun::new("cadence vs. freeze index"))
        .unwrap();
    builder
        .add_run(para, TextRun::new(" (sized)").size(10.5))
        .unwrap();
    builder.add_list_item("one", ListStyle::Number).unwrap();
    builder.add_list_item("two", ListStyle::Number).unwrap();
    builder
        .add_text_paragraph("Loss ≈ 0.6% & <1% overall", Alignment::Left)
        .unwrap();
    builder.add_list_item("restart", ListStyle::Number).unwrap();
    let doc = builder.seal().unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("order.docx");
    DocxRenderer::new().render(&doc, &path).unwrap();

    assert_eq!(inspect(&path).unwrap().as_slice(), doc.nodes());
}

#[test]
fn test_rerender_is_structurally_identical() {
    let doc = scenario_document();
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.docx");
    let second = dir.path().join("second.docx");

    let renderer = DocxRenderer::new();
    renderer.render(&doc, &first).unwrap();
    renderer.render(&doc, &second).unwrap();

    assert_eq!(inspect(&first).unwrap(), inspect(&second).unwrap());
}

#[test]
fn test_empty_document_renders() {
    let doc = DocumentBuilder::new().seal().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.docx");

    DocxRenderer::new().render(&doc, &path).unwrap();

    assert!(path.exists());
    assert!(inspect(&path).unwrap().is_empty());
}

#[test]
fn test_unwritable_destination_leaves_nothing_behind() {
    let doc = scenario_document();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("report.docx");

    let err = DocxRenderer::new().render(&doc, &path).unwrap_err();

    assert!(matches!(err, RenderError::Io(_)));
    assert!(!path.exists());
    assert!(!dir.path().join("no-such-dir").exists());
}

/// Backend that always fails to encode
struct FailingRenderer;

impl DocumentRenderer for FailingRenderer {
    fn format_name(&self) -> &'static str {
        "failing"
    }

    fn encode(&self, _doc: &SealedDocument) -> Result<Vec<u8>, RenderError> {
        Err(RenderError::Format("encoder gave up".to_string()))
    }
}

#[test]
fn test_failed_render_keeps_previous_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.docx");

    let renderer = DocxRenderer::new();
    renderer.render(&scenario_document(), &path).unwrap();
    let previous = std::fs::read(&path).unwrap();

    let err = FailingRenderer
        .render(&scenario_document(), &path)
        .unwrap_err();
    assert!(matches!(err, RenderError::Format(_)));

    assert_eq!(std::fs::read(&path).unwrap(), previous);
    assert_eq!(inspect(&path).unwrap().len(), 5);
    let entries: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(entries, [std::ffi::OsString::from("report.docx")]);
}

#[test]
fn test_blocked_rename_keeps_existing_destination() {
    let dir = tempfile::tempdir().unwrap();
    let blocked = dir.path().join("blocked.docx");
    std::fs::create_dir(&blocked).unwrap();

    let err = DocxRenderer::new()
        .render(&scenario_document(), &blocked)
        .unwrap_err();

    assert!(matches!(err, RenderError::Io(_)));
    assert!(blocked.is_dir());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_sealed_document_renders_from_several_threads() {
    let doc = scenario_document();
    let dir = tempfile::tempdir().unwrap();

    let handles: Vec<_> = (0..3)
        .map(|i| {
            let doc = doc.clone();
            let path = dir.path().join(format!("thread-{}.docx", i));
            std::thread::spawn(move || {
                DocxRenderer::new().render(&doc, &path).unwrap();
                inspect(&path).unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().as_slice(), doc.nodes());
    }
}

#[test]
fn test_seal_is_one_way() {
    let mut builder = DocumentBuilder::new();
    let para = builder.add_paragraph(Alignment::Left).unwrap();
    builder.seal().unwrap();

    assert_eq!(
        builder.add_run(para, TextRun::new("late")),
        Err(BuildError::SealedDocument)
    );
    assert_eq!(builder.seal(), Err(BuildError::AlreadySealed));
}
