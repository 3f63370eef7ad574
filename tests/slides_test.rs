//! Integration tests for the Markdown to slide deck pipeline.

use std::io::{Cursor, Read};

use paperdeck::layout::{compute_deck, BoxKind, HeightPolicy, LayoutOptions};
use paperdeck::markdown::{parse_markdown, to_markdown};
use paperdeck::{markdown_to_pptx, to_pptx_bytes, Error};

const DECK: &str = "\
Notes before the first slide are ignored.

# Attention Is All You Need
Transformer architecture based solely on attention.

## Background
Recurrent models process tokens **sequentially**.

Parallelism is limited.

## Model
**Encoder** and **decoder** stacks.

## Training
WMT 2014 English-German.

## Results
BLEU 28.4

## Conclusion
Attention generalizes well.

## Appendix
Never rendered.

# Second Slide
## Only Module
Content
";

fn read_entry(bytes: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut file = archive.by_name(name).unwrap();
    let mut xml = String::new();
    file.read_to_string(&mut xml).unwrap();
    xml
}

#[test]
fn test_parse_deck() {
    let slides = parse_markdown(DECK);
    assert_eq!(slides.len(), 2);

    let first = &slides[0];
    assert_eq!(first.title, "Attention Is All You Need");
    assert_eq!(
        first.description,
        "Transformer architecture based solely on attention."
    );
    assert_eq!(first.modules.len(), 6);
    assert_eq!(first.modules[0].title, "Background");
    assert_eq!(
        first.modules[0].content,
        "Recurrent models process tokens **sequentially**.\n\nParallelism is limited.\n"
    );
    assert_eq!(slides[1].modules[0].content, "Content");
}

#[test]
fn test_markdown_round_trip() {
    let slides = parse_markdown(DECK);
    assert_eq!(parse_markdown(&to_markdown(&slides)), slides);
}

#[test]
fn test_layout_columns() {
    let slides = parse_markdown(DECK);
    let layouts = compute_deck(&slides, &LayoutOptions::default());
    assert_eq!(layouts.len(), 2);

    let first = &layouts[0];
    assert_eq!(first.boxes_of(BoxKind::Title).count(), 1);
    assert_eq!(first.boxes_of(BoxKind::Description).count(), 1);

    // Five of six modules are placed
    let titles: Vec<f32> = first
        .boxes_of(BoxKind::ModuleTitle)
        .map(|b| b.rect.x)
        .collect();
    assert_eq!(titles, vec![1.0, 1.0, 1.0, 16.0, 16.0]);
    assert!(!first
        .boxes
        .iter()
        .any(|b| b.paragraphs.iter().any(|p| p.plain_text() == "Appendix")));
}

#[test]
fn test_estimated_heights_grow_with_text() {
    let long = format!("# S\n## M\n{}\n", "word ".repeat(400));
    let slides = parse_markdown(&long);

    let fixed = compute_deck(&slides, &LayoutOptions::default());
    let estimated = compute_deck(
        &slides,
        &LayoutOptions::default().with_height_policy(HeightPolicy::Estimated),
    );

    let height = |layouts: &[paperdeck::SlideLayout]| {
        layouts[0]
            .boxes_of(BoxKind::ModuleContent)
            .map(|b| b.rect.height)
            .next()
            .unwrap()
    };
    assert_eq!(height(&fixed), 4.2);
    assert!(height(&estimated) > 4.2);
}

#[test]
fn test_pptx_contents() {
    let options = LayoutOptions::default();
    let layouts = compute_deck(&parse_markdown(DECK), &options);
    let bytes = to_pptx_bytes(&layouts, &options).unwrap();

    let presentation = read_entry(&bytes, "ppt/presentation.xml");
    assert!(presentation.contains(r#"<p:sldId id="256" r:id="rId3"/>"#));
    assert!(presentation.contains(r#"<p:sldId id="257" r:id="rId4"/>"#));

    let slide = read_entry(&bytes, "ppt/slides/slide1.xml");
    assert!(slide.contains("Attention Is All You Need"));
    assert!(slide.contains("<a:t>sequentially</a:t>"));
    assert!(slide.contains(r#"<a:srgbClr val="8B0000"/>"#));
    assert!(!slide.contains("Never rendered"));

    let second = read_entry(&bytes, "ppt/slides/slide2.xml");
    assert!(second.contains("Only Module"));
}

#[test]
fn test_markdown_to_pptx_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("paper.md");
    let output = dir.path().join("paper.pptx");
    std::fs::write(&input, DECK).unwrap();

    let count = markdown_to_pptx(&input, &output, &LayoutOptions::default()).unwrap();
    assert_eq!(count, 2);

    let bytes = std::fs::read(&output).unwrap();
    let content_types = read_entry(&bytes, "[Content_Types].xml");
    assert!(content_types.contains("/ppt/slides/slide2.xml"));
}

#[test]
fn test_missing_markdown_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = markdown_to_pptx(
        dir.path().join("missing.md"),
        dir.path().join("out.pptx"),
        &LayoutOptions::default(),
    );
    assert!(matches!(result, Err(Error::FileNotFound(_))));
}
