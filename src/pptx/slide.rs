//! Slide part generation.

use std::fmt::Write;

use super::xml::{escape_xml, fmt_err, XML_DECLARATION};
use crate::error::Result;
use crate::layout::{
    cm_to_emu, pt_to_centipoints, Alignment, Anchor, FontSpec, SlideLayout, TextBox,
};
use crate::model::{Paragraph, TextSpan};

const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";

/// Language tag on runs; East Asian text is the common case for these decks.
const RUN_LANG: &str = "zh-CN";

/// Generate `ppt/slides/slideN.xml` for one slide layout.
pub fn slide_xml(layout: &SlideLayout) -> Result<String> {
    let mut xml = String::with_capacity(4096);
    xml.push_str(XML_DECLARATION);
    write!(
        xml,
        r#"<p:sld xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">"#,
        NS_A, NS_R, NS_P
    )
    .map_err(fmt_err)?;
    xml.push_str("<p:cSld><p:spTree>");
    xml.push_str(GROUP_SHAPE_PROPS);

    // Shape id 1 is the group itself
    for (idx, text_box) in layout.boxes.iter().enumerate() {
        write_shape(&mut xml, text_box, idx as u32 + 2)?;
    }

    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
    xml.push_str("</p:sld>");
    Ok(xml)
}

/// Group properties every `p:spTree` starts with.
pub(crate) const GROUP_SHAPE_PROPS: &str = concat!(
    r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#,
    r#"<p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/>"#,
    r#"<a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#
);

fn write_shape(xml: &mut String, text_box: &TextBox, id: u32) -> Result<()> {
    let is_text_box = text_box.fill.is_none();

    xml.push_str("<p:sp><p:nvSpPr>");
    if is_text_box {
        write!(xml, r#"<p:cNvPr id="{}" name="TextBox {}"/>"#, id, id - 1).map_err(fmt_err)?;
        xml.push_str(r#"<p:cNvSpPr txBox="1"/>"#);
    } else {
        write!(xml, r#"<p:cNvPr id="{}" name="Rectangle {}"/>"#, id, id - 1)
            .map_err(fmt_err)?;
        xml.push_str("<p:cNvSpPr/>");
    }
    xml.push_str("<p:nvPr/></p:nvSpPr>");

    let rect = &text_box.rect;
    xml.push_str("<p:spPr><a:xfrm>");
    write!(
        xml,
        r#"<a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/>"#,
        cm_to_emu(rect.x),
        cm_to_emu(rect.y),
        cm_to_emu(rect.width),
        cm_to_emu(rect.height)
    )
    .map_err(fmt_err)?;
    xml.push_str("</a:xfrm>");
    xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
    match text_box.fill {
        Some(fill) => {
            write!(
                xml,
                r#"<a:solidFill><a:srgbClr val="{}"/></a:solidFill>"#,
                fill.hex()
            )
            .map_err(fmt_err)?;
            xml.push_str("<a:ln><a:noFill/></a:ln><a:effectLst/>");
        }
        None => xml.push_str("<a:noFill/>"),
    }
    xml.push_str("</p:spPr>");

    xml.push_str("<p:txBody>");
    write!(
        xml,
        r#"<a:bodyPr wrap="{}" rtlCol="0" anchor="{}"><a:noAutofit/></a:bodyPr>"#,
        if text_box.word_wrap { "square" } else { "none" },
        anchor_attr(text_box.anchor)
    )
    .map_err(fmt_err)?;
    xml.push_str("<a:lstStyle/>");

    if text_box.paragraphs.is_empty() {
        write_paragraph(xml, &Paragraph::new(), text_box)?;
    }
    for paragraph in &text_box.paragraphs {
        write_paragraph(xml, paragraph, text_box)?;
    }

    xml.push_str("</p:txBody></p:sp>");
    Ok(())
}

fn write_paragraph(xml: &mut String, paragraph: &Paragraph, text_box: &TextBox) -> Result<()> {
    write!(xml, r#"<a:p><a:pPr algn="{}"/>"#, align_attr(text_box.alignment)).map_err(fmt_err)?;

    if paragraph.is_empty() {
        write_run_props(xml, "a:endParaRPr", &text_box.font, false)?;
    } else {
        for span in &paragraph.spans {
            write_run(xml, span, &text_box.font)?;
        }
    }

    xml.push_str("</a:p>");
    Ok(())
}

fn write_run(xml: &mut String, span: &TextSpan, font: &FontSpec) -> Result<()> {
    xml.push_str("<a:r>");
    write_run_props(xml, "a:rPr", font, span.bold)?;
    write!(xml, "<a:t>{}</a:t>", escape_xml(&span.text)).map_err(fmt_err)?;
    xml.push_str("</a:r>");
    Ok(())
}

fn write_run_props(xml: &mut String, tag: &str, font: &FontSpec, bold: bool) -> Result<()> {
    write!(
        xml,
        r#"<{} lang="{}" altLang="en-US" sz="{}" b="{}" dirty="0">"#,
        tag,
        RUN_LANG,
        pt_to_centipoints(font.size_pt),
        if bold { 1 } else { 0 }
    )
    .map_err(fmt_err)?;
    // Fill must precede the typefaces in CT_TextCharacterProperties
    write!(
        xml,
        r#"<a:solidFill><a:srgbClr val="{}"/></a:solidFill>"#,
        font.color.hex()
    )
    .map_err(fmt_err)?;
    let family = escape_xml(&font.family);
    write!(
        xml,
        r#"<a:latin typeface="{0}"/><a:ea typeface="{0}"/>"#,
        family
    )
    .map_err(fmt_err)?;
    write!(xml, "</{}>", tag).map_err(fmt_err)?;
    Ok(())
}

fn align_attr(alignment: Alignment) -> &'static str {
    match alignment {
        Alignment::Left => "l",
        Alignment::Center => "ctr",
        Alignment::Right => "r",
    }
}

fn anchor_attr(anchor: Anchor) -> &'static str {
    match anchor {
        Anchor::Top => "t",
        Anchor::Middle => "ctr",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{compute_layout, LayoutOptions};
    use crate::model::{ModuleRecord, SlideRecord};

    fn sample_xml() -> String {
        let slide = SlideRecord::new("A & B")
            .with_description("Intro")
            .with_module(ModuleRecord::new("Method", "plain **bold**\n\nnext"));
        let layout = compute_layout(&slide, &LayoutOptions::default());
        slide_xml(&layout).unwrap()
    }

    #[test]
    fn test_slide_structure() {
        let xml = sample_xml();
        assert!(xml.starts_with(XML_DECLARATION));
        assert!(xml.contains("<p:sld "));
        assert!(xml.ends_with("</p:sld>"));
        // title, description, module title, module content
        assert_eq!(xml.matches("<p:sp>").count(), 4);
        assert_eq!(xml.matches(r#"<p:cNvSpPr txBox="1"/>"#).count(), 2);
    }

    #[test]
    fn test_text_is_escaped() {
        let xml = sample_xml();
        assert!(xml.contains("<a:t>A &amp; B</a:t>"));
    }

    #[test]
    fn test_bars_have_fill_and_no_outline() {
        let xml = sample_xml();
        assert_eq!(
            xml.matches(r#"<a:solidFill><a:srgbClr val="8B0000"/></a:solidFill><a:ln><a:noFill/></a:ln><a:effectLst/>"#)
                .count(),
            2
        );
    }

    #[test]
    fn test_runs_and_spacers() {
        let xml = sample_xml();
        assert!(xml.contains(r#"b="1" dirty="0">"#));
        assert!(xml.contains("<a:t>bold</a:t>"));
        assert!(xml.contains("<a:endParaRPr "));
        assert!(xml.contains(r#"sz="1200""#));
        assert!(xml.contains(r#"<a:latin typeface="Microsoft YaHei"/>"#));
    }

    #[test]
    fn test_geometry_in_emu() {
        let xml = sample_xml();
        // Description bar at y = 1.7 cm, 34 cm x 0.6 cm
        assert!(xml.contains(r#"<a:off x="0" y="612000"/><a:ext cx="12240000" cy="216000"/>"#));
        // Module title bar at (1 cm, 3 cm)
        assert!(xml.contains(r#"<a:off x="360000" y="1080000"/>"#));
    }
}
