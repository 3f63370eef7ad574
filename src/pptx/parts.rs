//! Fixed package parts: content types, relationships, properties, master,
//! layout and theme.

use std::fmt::Write;

use chrono::{DateTime, Utc};

use super::slide::GROUP_SHAPE_PROPS;
use super::xml::{escape_xml, fmt_err, XML_DECLARATION};
use crate::error::Result;
use crate::layout::Theme;

const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
const NS_RELS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

const RT_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const RT_CORE_PROPS: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
const RT_EXT_PROPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
const RT_SLIDE_MASTER: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";
const RT_SLIDE_LAYOUT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
const RT_SLIDE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
const RT_THEME: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";

const CT_PRESENTATION: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml";
const CT_SLIDE_MASTER: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml";
const CT_SLIDE_LAYOUT: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml";
const CT_SLIDE: &str = "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";
const CT_THEME: &str = "application/vnd.openxmlformats-officedocument.theme+xml";
const CT_CORE_PROPS: &str = "application/vnd.openxmlformats-package.core-properties+xml";
const CT_EXT_PROPS: &str = "application/vnd.openxmlformats-officedocument.extended-properties+xml";

/// Relationship id of the first slide in `presentation.xml.rels`.
const FIRST_SLIDE_REL: usize = 3;

/// First `p:sldId` value; ids below 256 are reserved.
const FIRST_SLIDE_ID: usize = 256;

/// Document properties written to `docProps/core.xml`.
#[derive(Debug, Clone, PartialEq)]
pub struct DeckMetadata {
    /// Document title
    pub title: String,
    /// Author
    pub creator: String,
    /// Creation and modification time
    pub created: DateTime<Utc>,
}

impl Default for DeckMetadata {
    fn default() -> Self {
        Self {
            title: String::new(),
            creator: "paperdeck".to_string(),
            created: Utc::now(),
        }
    }
}

/// `[Content_Types].xml`
pub fn content_types_xml(slide_count: usize) -> Result<String> {
    let mut xml = String::with_capacity(1024 + slide_count * 128);
    xml.push_str(XML_DECLARATION);
    xml.push_str(
        r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    );
    xml.push_str(
        r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
    );
    xml.push_str(r#"<Default Extension="xml" ContentType="application/xml"/>"#);

    let overrides = [
        ("/ppt/presentation.xml", CT_PRESENTATION),
        ("/ppt/slideMasters/slideMaster1.xml", CT_SLIDE_MASTER),
        ("/ppt/slideLayouts/slideLayout1.xml", CT_SLIDE_LAYOUT),
        ("/ppt/theme/theme1.xml", CT_THEME),
        ("/docProps/core.xml", CT_CORE_PROPS),
        ("/docProps/app.xml", CT_EXT_PROPS),
    ];
    for (part, content_type) in overrides {
        write!(
            xml,
            r#"<Override PartName="{}" ContentType="{}"/>"#,
            part, content_type
        )
        .map_err(fmt_err)?;
    }
    for n in 1..=slide_count {
        write!(
            xml,
            r#"<Override PartName="/ppt/slides/slide{}.xml" ContentType="{}"/>"#,
            n, CT_SLIDE
        )
        .map_err(fmt_err)?;
    }

    xml.push_str("</Types>");
    Ok(xml)
}

/// `_rels/.rels`
pub fn package_rels_xml() -> Result<String> {
    relationships_xml(&[
        ("rId1", RT_OFFICE_DOCUMENT, "ppt/presentation.xml"),
        ("rId2", RT_CORE_PROPS, "docProps/core.xml"),
        ("rId3", RT_EXT_PROPS, "docProps/app.xml"),
    ])
}

/// `ppt/_rels/presentation.xml.rels`
pub fn presentation_rels_xml(slide_count: usize) -> Result<String> {
    let slide_targets: Vec<(String, String)> = (0..slide_count)
        .map(|i| {
            (
                format!("rId{}", FIRST_SLIDE_REL + i),
                format!("slides/slide{}.xml", i + 1),
            )
        })
        .collect();

    let mut rels = vec![
        ("rId1", RT_SLIDE_MASTER, "slideMasters/slideMaster1.xml"),
        ("rId2", RT_THEME, "theme/theme1.xml"),
    ];
    rels.extend(
        slide_targets
            .iter()
            .map(|(id, target)| (id.as_str(), RT_SLIDE, target.as_str())),
    );
    relationships_xml(&rels)
}

/// `ppt/slideMasters/_rels/slideMaster1.xml.rels`
pub fn slide_master_rels_xml() -> Result<String> {
    relationships_xml(&[
        ("rId1", RT_SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml"),
        ("rId2", RT_THEME, "../theme/theme1.xml"),
    ])
}

/// `ppt/slideLayouts/_rels/slideLayout1.xml.rels`
pub fn slide_layout_rels_xml() -> Result<String> {
    relationships_xml(&[("rId1", RT_SLIDE_MASTER, "../slideMasters/slideMaster1.xml")])
}

/// `ppt/slides/_rels/slideN.xml.rels`
pub fn slide_rels_xml() -> Result<String> {
    relationships_xml(&[("rId1", RT_SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml")])
}

fn relationships_xml(rels: &[(&str, &str, &str)]) -> Result<String> {
    let mut xml = String::with_capacity(256 + rels.len() * 160);
    xml.push_str(XML_DECLARATION);
    write!(xml, r#"<Relationships xmlns="{}">"#, NS_RELS).map_err(fmt_err)?;
    for (id, rel_type, target) in rels {
        write!(
            xml,
            r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#,
            id, rel_type, target
        )
        .map_err(fmt_err)?;
    }
    xml.push_str("</Relationships>");
    Ok(xml)
}

/// `ppt/presentation.xml`
pub fn presentation_xml(slide_count: usize, width_emu: i64, height_emu: i64) -> Result<String> {
    let mut xml = String::with_capacity(1024 + slide_count * 64);
    xml.push_str(XML_DECLARATION);
    write!(
        xml,
        r#"<p:presentation xmlns:a="{}" xmlns:r="{}" xmlns:p="{}" saveSubsetFonts="1">"#,
        NS_A, NS_R, NS_P
    )
    .map_err(fmt_err)?;

    xml.push_str(r#"<p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>"#);
    if slide_count > 0 {
        xml.push_str("<p:sldIdLst>");
        for i in 0..slide_count {
            write!(
                xml,
                r#"<p:sldId id="{}" r:id="rId{}"/>"#,
                FIRST_SLIDE_ID + i,
                FIRST_SLIDE_REL + i
            )
            .map_err(fmt_err)?;
        }
        xml.push_str("</p:sldIdLst>");
    }
    write!(xml, r#"<p:sldSz cx="{}" cy="{}"/>"#, width_emu, height_emu).map_err(fmt_err)?;
    xml.push_str(r#"<p:notesSz cx="6858000" cy="9144000"/>"#);
    xml.push_str("</p:presentation>");
    Ok(xml)
}

/// `ppt/slideMasters/slideMaster1.xml`
pub fn slide_master_xml() -> Result<String> {
    let mut xml = String::with_capacity(2048);
    xml.push_str(XML_DECLARATION);
    write!(
        xml,
        r#"<p:sldMaster xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">"#,
        NS_A, NS_R, NS_P
    )
    .map_err(fmt_err)?;
    xml.push_str(r#"<p:cSld><p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg>"#);
    xml.push_str("<p:spTree>");
    xml.push_str(GROUP_SHAPE_PROPS);
    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str(concat!(
        r#"<p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" "#,
        r#"accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" "#,
        r#"accent6="accent6" hlink="hlink" folHlink="folHlink"/>"#
    ));
    xml.push_str(r#"<p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst>"#);
    xml.push_str(concat!(
        "<p:txStyles>",
        r#"<p:titleStyle><a:lvl1pPr><a:defRPr sz="4400"/></a:lvl1pPr></p:titleStyle>"#,
        r#"<p:bodyStyle><a:lvl1pPr><a:defRPr sz="1800"/></a:lvl1pPr></p:bodyStyle>"#,
        r#"<p:otherStyle><a:lvl1pPr><a:defRPr sz="1800"/></a:lvl1pPr></p:otherStyle>"#,
        "</p:txStyles>"
    ));
    xml.push_str("</p:sldMaster>");
    Ok(xml)
}

/// `ppt/slideLayouts/slideLayout1.xml` (blank)
pub fn slide_layout_xml() -> Result<String> {
    let mut xml = String::with_capacity(1024);
    xml.push_str(XML_DECLARATION);
    write!(
        xml,
        r#"<p:sldLayout xmlns:a="{}" xmlns:r="{}" xmlns:p="{}" type="blank" preserve="1">"#,
        NS_A, NS_R, NS_P
    )
    .map_err(fmt_err)?;
    xml.push_str(r#"<p:cSld name="Blank"><p:spTree>"#);
    xml.push_str(GROUP_SHAPE_PROPS);
    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
    xml.push_str("</p:sldLayout>");
    Ok(xml)
}

/// `ppt/theme/theme1.xml`, with the deck accent as `accent1` and the deck
/// typeface as both major and minor font.
pub fn theme_xml(theme: &Theme) -> Result<String> {
    let mut xml = String::with_capacity(4096);
    xml.push_str(XML_DECLARATION);
    write!(xml, r#"<a:theme xmlns:a="{}" name="paperdeck">"#, NS_A).map_err(fmt_err)?;
    xml.push_str("<a:themeElements>");

    xml.push_str(r#"<a:clrScheme name="paperdeck">"#);
    xml.push_str(r#"<a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1>"#);
    xml.push_str(r#"<a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1>"#);
    xml.push_str(r#"<a:dk2><a:srgbClr val="44546A"/></a:dk2>"#);
    xml.push_str(r#"<a:lt2><a:srgbClr val="E7E6E6"/></a:lt2>"#);
    let accents = [
        theme.accent.hex(),
        "ED7D31".to_string(),
        "A5A5A5".to_string(),
        "FFC000".to_string(),
        "5B9BD5".to_string(),
        "70AD47".to_string(),
    ];
    for (i, color) in accents.iter().enumerate() {
        write!(
            xml,
            r#"<a:accent{0}><a:srgbClr val="{1}"/></a:accent{0}>"#,
            i + 1,
            color
        )
        .map_err(fmt_err)?;
    }
    xml.push_str(r#"<a:hlink><a:srgbClr val="0563C1"/></a:hlink>"#);
    xml.push_str(r#"<a:folHlink><a:srgbClr val="954F72"/></a:folHlink>"#);
    xml.push_str("</a:clrScheme>");

    let family = escape_xml(&theme.font_family);
    write!(
        xml,
        concat!(
            r#"<a:fontScheme name="paperdeck">"#,
            r#"<a:majorFont><a:latin typeface="{0}"/><a:ea typeface="{0}"/><a:cs typeface=""/></a:majorFont>"#,
            r#"<a:minorFont><a:latin typeface="{0}"/><a:ea typeface="{0}"/><a:cs typeface=""/></a:minorFont>"#,
            "</a:fontScheme>"
        ),
        family
    )
    .map_err(fmt_err)?;

    let solid = r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#;
    xml.push_str(r#"<a:fmtScheme name="paperdeck">"#);
    xml.push_str("<a:fillStyleLst>");
    (0..3).for_each(|_| xml.push_str(solid));
    xml.push_str("</a:fillStyleLst>");
    xml.push_str("<a:lnStyleLst>");
    for width in [6350, 12700, 19050] {
        write!(xml, r#"<a:ln w="{}">{}</a:ln>"#, width, solid).map_err(fmt_err)?;
    }
    xml.push_str("</a:lnStyleLst>");
    xml.push_str("<a:effectStyleLst>");
    (0..3).for_each(|_| xml.push_str("<a:effectStyle><a:effectLst/></a:effectStyle>"));
    xml.push_str("</a:effectStyleLst>");
    xml.push_str("<a:bgFillStyleLst>");
    (0..3).for_each(|_| xml.push_str(solid));
    xml.push_str("</a:bgFillStyleLst>");
    xml.push_str("</a:fmtScheme>");

    xml.push_str("</a:themeElements></a:theme>");
    Ok(xml)
}

/// `docProps/core.xml`
pub fn core_props_xml(metadata: &DeckMetadata) -> Result<String> {
    let timestamp = metadata.created.format("%Y-%m-%dT%H:%M:%SZ").to_string();
    let mut xml = String::with_capacity(1024);
    xml.push_str(XML_DECLARATION);
    xml.push_str(concat!(
        r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#,
        r#"xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" "#,
        r#"xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#
    ));
    write!(xml, "<dc:title>{}</dc:title>", escape_xml(&metadata.title)).map_err(fmt_err)?;
    write!(xml, "<dc:creator>{}</dc:creator>", escape_xml(&metadata.creator)).map_err(fmt_err)?;
    write!(
        xml,
        r#"<dcterms:created xsi:type="dcterms:W3CDTF">{0}</dcterms:created><dcterms:modified xsi:type="dcterms:W3CDTF">{0}</dcterms:modified>"#,
        timestamp
    )
    .map_err(fmt_err)?;
    xml.push_str("</cp:coreProperties>");
    Ok(xml)
}

/// `docProps/app.xml`
pub fn app_props_xml(slide_count: usize) -> Result<String> {
    let mut xml = String::with_capacity(512);
    xml.push_str(XML_DECLARATION);
    xml.push_str(concat!(
        r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" "#,
        r#"xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">"#
    ));
    write!(
        xml,
        "<Application>paperdeck {}</Application><Slides>{}</Slides>",
        env!("CARGO_PKG_VERSION"),
        slide_count
    )
    .map_err(fmt_err)?;
    xml.push_str("</Properties>");
    Ok(xml)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_content_types_lists_slides() {
        let xml = content_types_xml(2).unwrap();
        assert!(xml.contains(r#"PartName="/ppt/slides/slide1.xml""#));
        assert!(xml.contains(r#"PartName="/ppt/slides/slide2.xml""#));
        assert!(!xml.contains("slide3.xml"));
        assert!(xml.contains(CT_THEME));
    }

    #[test]
    fn test_presentation_ids() {
        let xml = presentation_xml(2, 12188952, 6858000).unwrap();
        assert!(xml.contains(r#"<p:sldId id="256" r:id="rId3"/>"#));
        assert!(xml.contains(r#"<p:sldId id="257" r:id="rId4"/>"#));
        assert!(xml.contains(r#"<p:sldSz cx="12188952" cy="6858000"/>"#));

        let rels = presentation_rels_xml(2).unwrap();
        assert!(rels.contains(r#"Id="rId4""#));
        assert!(rels.contains(r#"Target="slides/slide2.xml""#));
    }

    #[test]
    fn test_empty_presentation_has_no_slide_list() {
        let xml = presentation_xml(0, 1, 1).unwrap();
        assert!(!xml.contains("sldIdLst"));
    }

    #[test]
    fn test_theme_uses_accent_and_font() {
        let xml = theme_xml(&Theme::default()).unwrap();
        assert!(xml.contains(r#"<a:accent1><a:srgbClr val="8B0000"/></a:accent1>"#));
        assert!(xml.contains(r#"<a:ea typeface="Microsoft YaHei"/>"#));
        assert_eq!(xml.matches("<a:effectStyle>").count(), 3);
    }

    #[test]
    fn test_core_props_timestamp() {
        let metadata = DeckMetadata {
            title: "R&D".to_string(),
            creator: "paperdeck".to_string(),
            created: Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap(),
        };
        let xml = core_props_xml(&metadata).unwrap();
        assert!(xml.contains("<dc:title>R&amp;D</dc:title>"));
        assert!(xml.contains(">2024-03-01T12:30:00Z</dcterms:created>"));
    }
}
