//! XML for the CalDAV `REPORT` round trip.
//!
//! The request side writes a `calendar-query` with a `time-range` filter.
//! The response side pulls `calendar-data` blobs out of a `multistatus`
//! document. Servers disagree on namespace prefixes, and element names are
//! matched on their qualified form as written, so the accepted spellings are
//! kept in ordered candidate tables below. Supporting another server dialect
//! means adding one entry.

use std::io::Cursor;

use chrono::{DateTime, Utc};
use quick_xml::{Reader, Writer};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};

use roomboard_core::TimeWindow;

use crate::error::{ProviderError, ProviderResult};

/// DAV namespace
pub const DAV_NS: &str = "DAV:";
/// CalDAV namespace
pub const CALDAV_NS: &str = "urn:ietf:params:xml:ns:caldav";

/// `(multistatus, response)` spellings, tried in order.
const MULTISTATUS_DIALECTS: &[(&str, &str)] = &[
    ("D:multistatus", "D:response"),
    ("d:multistatus", "d:response"),
    ("multistatus", "response"),
];

/// `propstat` spellings, tried in order.
const PROPSTAT_NAMES: &[&str] = &["D:propstat", "d:propstat", "propstat"];

/// `prop` spellings, tried in order.
const PROP_NAMES: &[&str] = &["D:prop", "d:prop", "prop"];

/// `calendar-data` spellings, tried in order.
const CALENDAR_DATA_NAMES: &[&str] = &["C:calendar-data", "cal:calendar-data", "calendar-data"];

/// Builds the `calendar-query` REPORT body for `window`.
pub fn calendar_query_body(window: &TimeWindow) -> ProviderResult<String> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(xml_error)?;

    let mut query = BytesStart::new("C:calendar-query");
    query.push_attribute(("xmlns:D", DAV_NS));
    query.push_attribute(("xmlns:C", CALDAV_NS));
    open(&mut writer, query)?;

    open(&mut writer, BytesStart::new("D:prop"))?;
    empty(&mut writer, BytesStart::new("D:getetag"))?;
    empty(&mut writer, BytesStart::new("C:calendar-data"))?;
    close(&mut writer, "D:prop")?;

    open(&mut writer, BytesStart::new("C:filter"))?;
    let mut vcalendar = BytesStart::new("C:comp-filter");
    vcalendar.push_attribute(("name", "VCALENDAR"));
    open(&mut writer, vcalendar)?;
    let mut vevent = BytesStart::new("C:comp-filter");
    vevent.push_attribute(("name", "VEVENT"));
    open(&mut writer, vevent)?;

    let mut time_range = BytesStart::new("C:time-range");
    time_range.push_attribute(("start", format_icalendar_datetime(window.start).as_str()));
    time_range.push_attribute(("end", format_icalendar_datetime(window.end).as_str()));
    empty(&mut writer, time_range)?;

    close(&mut writer, "C:comp-filter")?;
    close(&mut writer, "C:comp-filter")?;
    close(&mut writer, "C:filter")?;
    close(&mut writer, "C:calendar-query")?;

    String::from_utf8(writer.into_inner().into_inner()).map_err(xml_error)
}

/// Extracts every `calendar-data` payload from a multistatus response.
///
/// Only the first `propstat` and the first `prop` of each response are
/// consulted. Responses without calendar data are skipped.
pub fn extract_calendar_data(xml: &str) -> ProviderResult<Vec<String>> {
    let root = parse_tree(xml)?;

    let responses = MULTISTATUS_DIALECTS
        .iter()
        .filter(|(multistatus, _)| root.name == *multistatus)
        .map(|(_, response)| root.children_named(response))
        .find(|responses| !responses.is_empty())
        .unwrap_or_default();

    Ok(responses
        .into_iter()
        .filter_map(|response| {
            let propstat = response.first_child(PROPSTAT_NAMES)?;
            let prop = propstat.first_child(PROP_NAMES)?;
            let data = prop.first_child(CALENDAR_DATA_NAMES)?;
            Some(data.text.clone())
        })
        .collect())
}

/// Formats a datetime for iCalendar time-range filters (UTC format).
pub fn format_icalendar_datetime(dt: DateTime<Utc>) -> String {
    dt.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Minimal element tree keyed by qualified name.
#[derive(Debug, Default)]
struct XmlNode {
    name: String,
    text: String,
    children: Vec<XmlNode>,
}

impl XmlNode {
    fn named(name: String) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    fn children_named(&self, name: &str) -> Vec<&XmlNode> {
        self.children.iter().filter(|c| c.name == name).collect()
    }

    /// First child under the first candidate name that has any.
    fn first_child(&self, candidates: &[&str]) -> Option<&XmlNode> {
        candidates
            .iter()
            .find_map(|name| self.children.iter().find(|c| c.name == *name))
    }
}

fn parse_tree(xml: &str) -> ProviderResult<XmlNode> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<XmlNode> = Vec::new();
    let mut root: Option<XmlNode> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                stack.push(XmlNode::named(qualified_name(&e)));
            }
            Ok(Event::Empty(e)) => {
                attach(&mut stack, &mut root, XmlNode::named(qualified_name(&e)));
            }
            Ok(Event::End(_)) => {
                let node = stack
                    .pop()
                    .ok_or_else(|| ProviderError::malformed("unbalanced end tag"))?;
                attach(&mut stack, &mut root, node);
            }
            Ok(Event::Text(e)) => {
                if let Some(node) = stack.last_mut() {
                    let text = e.unescape().map_err(|err| {
                        ProviderError::malformed(format!("bad text in multistatus: {}", err))
                    })?;
                    node.text.push_str(&text);
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(node) = stack.last_mut() {
                    node.text.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Ok(Event::Eof) => break,
            Err(err) => {
                return Err(ProviderError::malformed(format!(
                    "invalid multistatus XML at byte {}: {}",
                    reader.buffer_position(),
                    err
                )));
            }
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(ProviderError::malformed(format!(
            "unclosed element <{}>",
            open.name
        )));
    }
    root.ok_or_else(|| ProviderError::malformed("empty multistatus document"))
}

fn attach(stack: &mut [XmlNode], root: &mut Option<XmlNode>, node: XmlNode) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => {
            if root.is_none() {
                *root = Some(node);
            }
        }
    }
}

fn qualified_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).into_owned()
}

fn open(writer: &mut Writer<Cursor<Vec<u8>>>, start: BytesStart<'_>) -> ProviderResult<()> {
    writer.write_event(Event::Start(start)).map_err(xml_error)
}

fn empty(writer: &mut Writer<Cursor<Vec<u8>>>, start: BytesStart<'_>) -> ProviderResult<()> {
    writer.write_event(Event::Empty(start)).map_err(xml_error)
}

fn close(writer: &mut Writer<Cursor<Vec<u8>>>, name: &str) -> ProviderResult<()> {
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(xml_error)
}

fn xml_error(err: impl std::fmt::Display) -> ProviderError {
    ProviderError::internal(format!("failed to write REPORT body: {}", err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const EVENT_ICS: &str = "BEGIN:VCALENDAR\nBEGIN:VEVENT\nSUMMARY:Team Meeting\nEND:VEVENT\nEND:VCALENDAR";

    #[test]
    fn calendar_query_body_generation() {
        let window = TimeWindow::new(
            Utc.with_ymd_and_hms(2025, 2, 4, 21, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 2, 5, 21, 0, 0).unwrap(),
        );
        let body = calendar_query_body(&window).unwrap();

        assert!(body.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
        assert!(body.contains("<C:calendar-query xmlns:D=\"DAV:\" xmlns:C=\"urn:ietf:params:xml:ns:caldav\">"));
        assert!(body.contains("<D:getetag/>"));
        assert!(body.contains("<C:calendar-data/>"));
        assert!(body.contains("<C:comp-filter name=\"VCALENDAR\">"));
        assert!(body.contains("<C:comp-filter name=\"VEVENT\">"));
        assert!(body.contains("<C:time-range start=\"20250204T210000Z\" end=\"20250205T210000Z\"/>"));
    }

    #[test]
    fn query_body_is_well_formed() {
        let window = TimeWindow::new(
            Utc.with_ymd_and_hms(2025, 2, 5, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 2, 6, 0, 0, 0).unwrap(),
        );
        let tree = parse_tree(&calendar_query_body(&window).unwrap()).unwrap();

        assert_eq!(tree.name, "C:calendar-query");
        let filter = tree.first_child(&["C:filter"]).unwrap();
        let vevent = filter.children[0].children[0].first_child(&["C:time-range"]);
        assert!(vevent.is_some());
    }

    #[test]
    fn extracts_uppercase_dialect() {
        let xml = format!(
            r#"<?xml version="1.0" encoding="utf-8"?>
<D:multistatus xmlns:D="DAV:" xmlns:C="urn:ietf:params:xml:ns:caldav">
  <D:response>
    <D:href>/cal/room/1.ics</D:href>
    <D:propstat>
      <D:prop>
        <D:getetag>"abc"</D:getetag>
        <C:calendar-data>{EVENT_ICS}</C:calendar-data>
      </D:prop>
      <D:status>HTTP/1.1 200 OK</D:status>
    </D:propstat>
  </D:response>
  <D:response>
    <D:href>/cal/room/2.ics</D:href>
    <D:propstat>
      <D:prop>
        <C:calendar-data><![CDATA[{EVENT_ICS}]]></C:calendar-data>
      </D:prop>
    </D:propstat>
  </D:response>
</D:multistatus>"#
        );

        let blobs = extract_calendar_data(&xml).unwrap();
        assert_eq!(blobs.len(), 2);
        assert_eq!(blobs[0], EVENT_ICS);
        assert_eq!(blobs[1], EVENT_ICS);
    }

    #[test]
    fn extracts_lowercase_dialect() {
        let xml = format!(
            r#"<d:multistatus xmlns:d="DAV:" xmlns:cal="urn:ietf:params:xml:ns:caldav">
  <d:response>
    <d:propstat>
      <d:prop><cal:calendar-data>{EVENT_ICS}</cal:calendar-data></d:prop>
    </d:propstat>
  </d:response>
</d:multistatus>"#
        );

        let blobs = extract_calendar_data(&xml).unwrap();
        assert_eq!(blobs, vec![EVENT_ICS.to_string()]);
    }

    #[test]
    fn extracts_unprefixed_dialect() {
        let xml = r#"<multistatus xmlns="DAV:" xmlns:C="urn:ietf:params:xml:ns:caldav">
  <response>
    <propstat><prop><C:calendar-data>BEGIN:VEVENT&#13;
SUMMARY:A &amp; B&#13;
END:VEVENT</C:calendar-data></prop></propstat>
  </response>
</multistatus>"#;

        let blobs = extract_calendar_data(xml).unwrap();
        assert_eq!(blobs.len(), 1);
        assert!(blobs[0].contains("SUMMARY:A & B"));
    }

    #[test]
    fn skips_responses_without_calendar_data() {
        let xml = r#"<D:multistatus xmlns:D="DAV:">
  <D:response><D:propstat><D:prop><D:getetag>"x"</D:getetag></D:prop></D:propstat></D:response>
  <D:response><D:status>HTTP/1.1 404 Not Found</D:status></D:response>
</D:multistatus>"#;

        assert!(extract_calendar_data(xml).unwrap().is_empty());
    }

    #[test]
    fn only_first_propstat_is_consulted() {
        let xml = r#"<D:multistatus xmlns:D="DAV:" xmlns:C="urn:ietf:params:xml:ns:caldav">
  <D:response>
    <D:propstat><D:prop><D:getetag>"x"</D:getetag></D:prop></D:propstat>
    <D:propstat><D:prop><C:calendar-data>BEGIN:VEVENT</C:calendar-data></D:prop></D:propstat>
  </D:response>
</D:multistatus>"#;

        assert!(extract_calendar_data(xml).unwrap().is_empty());
    }

    #[test]
    fn unknown_root_yields_nothing() {
        let xml = "<ns0:multistatus xmlns:ns0=\"DAV:\"><ns0:response/></ns0:multistatus>";
        assert!(extract_calendar_data(xml).unwrap().is_empty());
    }

    #[test]
    fn malformed_xml_is_an_error() {
        let err = extract_calendar_data("<D:multistatus><D:response></D:multistatus>").unwrap_err();
        assert_eq!(err.code(), crate::ProviderErrorCode::MalformedPayload);

        assert!(extract_calendar_data("").is_err());
        assert!(extract_calendar_data("<D:multistatus>").is_err());
    }

    #[test]
    fn format_datetime_for_icalendar() {
        let dt = Utc.with_ymd_and_hms(2025, 2, 5, 14, 30, 0).unwrap();
        assert_eq!(format_icalendar_datetime(dt), "20250205T143000Z");
    }
}
