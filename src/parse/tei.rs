//! Parla-CLARIN TEI session reader.
//!
//! A single streaming pass over the document collects the header title, the
//! first dated element's `when` attribute, and every `<u>` utterance with its
//! `<seg>` text. Only the elements the record needs are tracked; everything
//! else (page breaks, notes, gaps) is skipped without buffering the tree.

use crate::corpus::Corpus;
use crate::error::FileError;
use crate::parse::{SessionRecord, Utterance};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Strip a namespace prefix from a qualified name.
fn local_name(qname: &[u8]) -> &[u8] {
    match qname.iter().position(|&b| b == b':') {
        Some(i) => &qname[i + 1..],
        None => qname,
    }
}

/// Fetch an attribute value by its local name (`xml:id` matches `id`).
fn attr_val(e: &BytesStart<'_>, key_local: &[u8]) -> Option<String> {
    for attr in e.attributes().with_checks(false).flatten() {
        if local_name(attr.key.as_ref()) == key_local {
            return Some(String::from_utf8_lossy(&attr.value).into_owned());
        }
    }
    None
}

/// Parse one TEI session document into a [`SessionRecord`].
///
/// `fallback_id` (normally the file stem) is used when the root carries no
/// `xml:id`. Malformed XML and a missing TEI root are per-file failures.
pub fn parse_session(
    xml: &str,
    corpus: Corpus,
    fallback_id: &str,
) -> Result<SessionRecord, FileError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();

    let mut record = SessionRecord {
        corpus,
        id: fallback_id.to_string(),
        title: None,
        date: None,
        utterances: Vec::new(),
    };

    let mut root_seen = false;
    let mut in_title_stmt = false;
    let mut in_title = false;
    let mut title_text = String::new();
    let mut current: Option<Utterance> = None;
    let mut in_seg = false;
    let mut seg_text = String::new();

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match local_name(e.name().as_ref()) {
                b"TEI" => {
                    root_seen = true;
                    if let Some(id) = attr_val(&e, b"id") {
                        record.id = id;
                    }
                }
                b"titleStmt" => in_title_stmt = true,
                b"title" if in_title_stmt && record.title.is_none() => {
                    in_title = true;
                    title_text.clear();
                }
                b"date" if record.date.is_none() => {
                    if let Some(when) = attr_val(&e, b"when") {
                        record.date = Some(when);
                    }
                }
                b"u" => {
                    current = Some(Utterance {
                        id: attr_val(&e, b"id"),
                        speaker: attr_val(&e, b"who")
                            .map(|w| w.trim_start_matches('#').to_string()),
                        text: String::new(),
                    });
                }
                b"seg" if current.is_some() => {
                    in_seg = true;
                    seg_text.clear();
                }
                _ => {}
            },
            Ok(Event::Empty(e)) => {
                if local_name(e.name().as_ref()) == b"date" && record.date.is_none() {
                    if let Some(when) = attr_val(&e, b"when") {
                        record.date = Some(when);
                    }
                }
            }
            Ok(Event::Text(t)) => {
                let text = t.unescape().map_err(|e| FileError::XmlParseFailed {
                    detail: e.to_string(),
                })?;
                if in_title {
                    title_text.push_str(&text);
                } else if in_seg {
                    seg_text.push_str(&text);
                }
            }
            Ok(Event::End(e)) => match local_name(e.name().as_ref()) {
                b"titleStmt" => in_title_stmt = false,
                b"title" if in_title => {
                    in_title = false;
                    let trimmed = title_text.trim();
                    if !trimmed.is_empty() {
                        record.title = Some(trimmed.to_string());
                    }
                }
                b"seg" if in_seg => {
                    in_seg = false;
                    if let Some(u) = current.as_mut() {
                        let trimmed = seg_text.trim();
                        if !trimmed.is_empty() {
                            if !u.text.is_empty() {
                                u.text.push('\n');
                            }
                            u.text.push_str(trimmed);
                        }
                    }
                }
                b"u" => {
                    if let Some(u) = current.take() {
                        record.utterances.push(u);
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(FileError::XmlParseFailed {
                    detail: e.to_string(),
                });
            }
        }
    }

    if !root_seen {
        return Err(FileError::XmlParseFailed {
            detail: "no TEI root element".to_string(),
        });
    }

    Ok(record)
}
