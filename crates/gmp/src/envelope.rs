//! List response parsing.
//!
//! A list response looks like:
//!
//! ```text
//! <get_tasks_response status="200" status_text="OK">
//!   <task id="...">...</task>
//!   <task id="...">...</task>
//!   <filters id="">...</filters>
//!   <tasks start="1" max="10"/>
//!   <task_count>20<filtered>2</filtered><page>2</page></task_count>
//! </get_tasks_response>
//! ```
//!
//! Result nodes are kept as verbatim XML subtrees for the entity resolvers.
//! Only the count and window elements are interpreted here.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use scanql_core::error::{UpstreamError, UpstreamResult};
use scanql_core::models::{RawCounts, RawWindow};
use scanql_core::ports::ListPage;

/// Element names of a list response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvelopeLayout {
    /// Result node element (`task`).
    pub node: String,
    /// Window element carrying `start`/`max` (`tasks`).
    pub window: String,
    /// Count element carrying the total and `<filtered>` (`task_count`).
    pub count: String,
}

impl EnvelopeLayout {
    pub fn new(
        node: impl Into<String>,
        window: impl Into<String>,
        count: impl Into<String>,
    ) -> Self {
        Self {
            node: node.into(),
            window: window.into(),
            count: count.into(),
        }
    }

    /// Layout of a regularly named entity.
    pub fn for_entity(entity: &str) -> Self {
        Self::new(entity, format!("{entity}s"), format!("{entity}_count"))
    }
}

/// An opaque result node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlNode {
    /// Value of the node's `id` attribute.
    pub id: Option<String>,
    /// The node element, verbatim.
    pub xml: String,
}

/// Parse a list response into its nodes and count envelope.
pub fn parse_list_response(
    xml: &str,
    layout: &EnvelopeLayout,
) -> UpstreamResult<ListPage<XmlNode>> {
    let mut reader = Reader::from_str(xml);

    let mut depth = 0usize;
    let mut nodes = Vec::new();
    // Byte offset and id of the node element currently open.
    let mut open_node: Option<(usize, Option<String>)> = None;

    let mut window: Option<RawWindow> = None;
    let mut count_seen = false;
    let mut in_count = false;
    let mut in_filtered = false;
    let mut total_text = String::new();
    let mut filtered_text: Option<String> = None;

    loop {
        let event_start = position(&reader);
        let event = reader
            .read_event()
            .map_err(|e| UpstreamError::MalformedXml(e.to_string()))?;

        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let is_empty = matches!(event, Event::Empty(_));
                depth += 1;
                let name = e.local_name();
                let name = name.as_ref();

                match depth {
                    1 => check_status(e)?,
                    // Window first: some entities share the node and window element name.
                    2 if name == layout.window.as_bytes()
                        && attribute(e, b"start").is_some() =>
                    {
                        window = Some(parse_window(e, &layout.window)?);
                    }
                    2 if name == layout.node.as_bytes() => {
                        let id = attribute(e, b"id");
                        if is_empty {
                            nodes.push(XmlNode {
                                id,
                                xml: slice(xml, event_start, position(&reader))?,
                            });
                        } else {
                            open_node = Some((event_start, id));
                        }
                    }
                    2 if name == layout.count.as_bytes() => {
                        count_seen = true;
                        in_count = !is_empty;
                    }
                    3 if in_count && name == b"filtered" => {
                        filtered_text = Some(String::new());
                        in_filtered = !is_empty;
                    }
                    _ => {}
                }

                if is_empty {
                    depth -= 1;
                }
            }
            Event::End(ref e) => {
                let name = e.local_name();
                let name = name.as_ref();

                match depth {
                    2 if name == layout.node.as_bytes() => {
                        if let Some((start, id)) = open_node.take() {
                            nodes.push(XmlNode {
                                id,
                                xml: slice(xml, start, position(&reader))?,
                            });
                        }
                    }
                    2 if name == layout.count.as_bytes() => in_count = false,
                    3 if name == b"filtered" => in_filtered = false,
                    _ => {}
                }

                depth = depth.saturating_sub(1);
            }
            Event::Text(ref e) => {
                if in_filtered || (in_count && depth == 2) {
                    let text = e
                        .unescape()
                        .map_err(|e| UpstreamError::MalformedXml(e.to_string()))?;
                    if in_filtered {
                        if let Some(filtered) = filtered_text.as_mut() {
                            filtered.push_str(&text);
                        }
                    } else {
                        total_text.push_str(&text);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !count_seen {
        return Err(UpstreamError::MalformedEnvelope(format!(
            "missing <{}> element",
            layout.count
        )));
    }

    let total = parse_count(&total_text, &layout.count)?;
    let filtered = match filtered_text {
        Some(text) => parse_count(&text, "filtered")?,
        None => {
            return Err(UpstreamError::MalformedEnvelope(format!(
                "<{}> has no <filtered> count",
                layout.count
            )))
        }
    };

    Ok(ListPage {
        nodes,
        counts: RawCounts {
            total,
            filtered,
            window,
        },
    })
}

/// Reject responses whose root `status` is not 2xx.
fn check_status(root: &BytesStart<'_>) -> UpstreamResult<()> {
    match attribute(root, b"status") {
        Some(status) if !status.starts_with('2') => Err(UpstreamError::Rejected {
            text: attribute(root, b"status_text").unwrap_or_default(),
            status,
        }),
        _ => Ok(()),
    }
}

fn parse_window(element: &BytesStart<'_>, name: &str) -> UpstreamResult<RawWindow> {
    let read = |key: &str| {
        attribute(element, key.as_bytes()).ok_or_else(|| {
            UpstreamError::MalformedEnvelope(format!("<{name}> has no '{key}' attribute"))
        })
    };

    let start = read("start")?;
    let max = read("max")?;

    Ok(RawWindow {
        start: start.trim().parse().map_err(|_| {
            UpstreamError::MalformedEnvelope(format!("<{name}> start '{start}' is not a count"))
        })?,
        max: max.trim().parse().map_err(|_| {
            UpstreamError::MalformedEnvelope(format!("<{name}> max '{max}' is not a number"))
        })?,
    })
}

fn parse_count(text: &str, element: &str) -> UpstreamResult<u64> {
    text.trim().parse().map_err(|_| {
        UpstreamError::MalformedEnvelope(format!(
            "<{element}> count '{}' is not a number",
            text.trim()
        ))
    })
}

fn attribute(element: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    element
        .attributes()
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == key)
        .map(|attr| String::from_utf8_lossy(&attr.value).to_string())
}

fn position(reader: &Reader<&[u8]>) -> usize {
    usize::try_from(reader.buffer_position()).unwrap_or(usize::MAX)
}

fn slice(xml: &str, start: usize, end: usize) -> UpstreamResult<String> {
    xml.get(start..end)
        .map(|s| s.trim().to_string())
        .ok_or_else(|| UpstreamError::MalformedXml(format!("invalid node span {start}..{end}")))
}
